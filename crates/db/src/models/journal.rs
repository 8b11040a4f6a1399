use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use crate::{Pool, store::next_id};

/// Plant journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: i64,
    pub plant_id: i64,
    pub date: String, // YYYY-MM-DD
    pub note: String,
    pub growth: String, // e.g. "New Leaf", "Flowering"
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateJournalEntry {
    pub date: Option<String>,
    pub note: String,
    pub growth: Option<String>,
}

impl JournalEntry {
    /// Entries for one plant, oldest first.
    pub async fn find_by_plant_id(pool: &Pool, plant_id: i64) -> Vec<Self> {
        pool.read()
            .await
            .journal
            .iter()
            .filter(|e| e.plant_id == plant_id)
            .cloned()
            .collect()
    }

    /// Append an entry. Returns `None` when the plant does not exist.
    pub async fn create(pool: &Pool, plant_id: i64, data: CreateJournalEntry) -> Option<Self> {
        let mut store = pool.write().await;
        if !store.plants.iter().any(|p| p.id == plant_id) {
            return None;
        }

        let entry = Self {
            id: next_id(store.journal.iter().map(|e| e.id)),
            plant_id,
            date: data
                .date
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string()),
            note: data.note,
            growth: data.growth.unwrap_or_default(),
        };
        store.journal.push(entry.clone());
        info!(plant_id, entry_id = entry.id, "Journal entry added");
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DBService;

    #[tokio::test]
    async fn entries_keep_insertion_order() {
        let db = DBService::new();
        let added = JournalEntry::create(
            &db.pool,
            1,
            CreateJournalEntry {
                date: Some("2025-10-12".to_string()),
                note: "Moved closer to the window".to_string(),
                growth: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(added.id, 3);

        let ids: Vec<i64> = JournalEntry::find_by_plant_id(&db.pool, 1)
            .await
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(JournalEntry::find_by_plant_id(&db.pool, 4).await.is_empty());
    }

    #[tokio::test]
    async fn create_for_missing_plant_is_rejected() {
        let db = DBService::new();
        let entry = CreateJournalEntry {
            note: "ghost".to_string(),
            ..Default::default()
        };
        assert!(JournalEntry::create(&db.pool, 99, entry).await.is_none());
        assert_eq!(db.pool.read().await.journal.len(), 2);
    }

    #[tokio::test]
    async fn missing_date_defaults_to_today() {
        let db = DBService::new();
        let entry = CreateJournalEntry {
            note: "Repotted".to_string(),
            ..Default::default()
        };
        let created = JournalEntry::create(&db.pool, 2, entry).await.unwrap();
        assert_eq!(created.date.len(), 10);
        assert_eq!(created.growth, "");
    }
}
