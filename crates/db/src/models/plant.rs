use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::info;
use ts_rs::TS;

use crate::{Pool, store::next_id};

pub const DEFAULT_LOCATION: &str = "Unknown";
pub const DEFAULT_WATER_DAYS: i32 = 3;

/// Light status of a plant's spot
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LightStatus {
    /// The add-plant form calls this level "medium".
    #[default]
    #[serde(alias = "medium")]
    Ok,
    Low,
    High,
}

/// Soil moisture status
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SoilStatus {
    #[default]
    Ok,
    Dry,
    Wet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: i64,
    pub name: String,     // Scientific or common name
    pub nickname: String, // User-given label
    pub image: String,    // URI, never fetched or validated
    pub location: String,
    pub tags: Vec<String>,
    pub water_days: i32, // Days until next watering, <= 0 means due
    pub light: LightStatus,
    pub soil: SoilStatus,
}

/// Payload of the add and edit flows.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlant {
    pub name: String,
    pub nickname: String,
    pub image: Option<String>,
    pub location: Option<String>,
    pub tags: Option<Vec<String>>,
    pub water_days: Option<i32>,
    pub light: Option<LightStatus>,
    pub soil: Option<SoilStatus>,
}

impl CreatePlant {
    pub fn new(name: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nickname: nickname.into(),
            ..Default::default()
        }
    }

    /// Both labels must be present; nothing else is validated.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.nickname.trim().is_empty()
    }

    /// Build the plant `data` describes. Every absent field falls back to
    /// `existing`, then to the add-time default.
    pub fn into_plant(self, id: i64, existing: Option<&Plant>) -> Plant {
        Plant {
            id,
            name: self.name,
            nickname: self.nickname,
            image: self
                .image
                .filter(|i| !i.is_empty())
                .or_else(|| existing.map(|p| p.image.clone()))
                .unwrap_or_default(),
            location: self
                .location
                .filter(|l| !l.trim().is_empty())
                .or_else(|| existing.map(|p| p.location.clone()))
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            tags: match self.tags {
                Some(tags) => normalize_tags(tags),
                None => existing.map(|p| p.tags.clone()).unwrap_or_default(),
            },
            water_days: self
                .water_days
                .or(existing.map(|p| p.water_days))
                .unwrap_or(DEFAULT_WATER_DAYS),
            light: self.light.or(existing.map(|p| p.light)).unwrap_or_default(),
            soil: self.soil.or(existing.map(|p| p.soil)).unwrap_or_default(),
        }
    }
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

impl Plant {
    pub async fn find_all(pool: &Pool) -> Vec<Self> {
        pool.read().await.plants.clone()
    }

    pub async fn find_by_id(pool: &Pool, id: i64) -> Option<Self> {
        pool.read().await.plants.iter().find(|p| p.id == id).cloned()
    }

    pub async fn find_by_tag(pool: &Pool, tag: &str) -> Vec<Self> {
        pool.read()
            .await
            .plants
            .iter()
            .filter(|p| p.tags.iter().any(|t| t == tag))
            .cloned()
            .collect()
    }

    /// Distinct tags across the garden, in first-seen order.
    pub async fn all_tags(pool: &Pool) -> Vec<String> {
        let store = pool.read().await;
        let mut tags: Vec<String> = Vec::new();
        for tag in store.plants.iter().flat_map(|p| p.tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }

    pub async fn create(pool: &Pool, data: CreatePlant) -> Self {
        let mut store = pool.write().await;
        let id = next_id(store.plants.iter().map(|p| p.id));
        let plant = data.into_plant(id, None);
        store.plants.push(plant.clone());
        info!(plant_id = id, nickname = %plant.nickname, "Plant created");
        plant
    }

    /// Replace every editable field, keeping the id. Returns `None` when absent.
    pub async fn replace(pool: &Pool, id: i64, data: CreatePlant) -> Option<Self> {
        let mut store = pool.write().await;
        let slot = store.plants.iter_mut().find(|p| p.id == id)?;
        let plant = data.into_plant(id, Some(&*slot));
        *slot = plant.clone();
        info!(plant_id = id, "Plant replaced");
        Some(plant)
    }

    /// Reset the watering countdown and mark the soil as fine.
    pub async fn water(pool: &Pool, id: i64, reset_days: i32) -> Option<Self> {
        let mut store = pool.write().await;
        let plant = store.plants.iter_mut().find(|p| p.id == id)?;
        plant.water_days = reset_days;
        plant.soil = SoilStatus::Ok;
        info!(plant_id = id, water_days = reset_days, "Plant watered");
        Some(plant.clone())
    }

    pub async fn delete(pool: &Pool, id: i64) -> bool {
        let mut store = pool.write().await;
        let before = store.plants.len();
        store.plants.retain(|p| p.id != id);
        let removed = store.plants.len() != before;
        if removed {
            info!(plant_id = id, "Plant deleted");
        }
        removed
    }

    pub fn is_due(&self) -> bool {
        self.water_days <= 0
    }
}
