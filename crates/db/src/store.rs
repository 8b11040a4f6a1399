use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{
    journal::JournalEntry,
    plant::{LightStatus, Plant, SoilStatus},
    preferences::Preferences,
    task::{Task, TaskType},
    weather::Weather,
};

/// Shared handle to the in-memory collections.
pub type Pool = Arc<RwLock<Store>>;

/// Canonical collections for the process lifetime. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub plants: Vec<Plant>,
    pub tasks: Vec<Task>,
    pub journal: Vec<JournalEntry>,
    pub weather: Weather,
    pub preferences: Preferences,
}

impl Store {
    pub fn new(
        plants: Vec<Plant>,
        tasks: Vec<Task>,
        journal: Vec<JournalEntry>,
        weather: Weather,
    ) -> Self {
        Self {
            plants,
            tasks,
            journal,
            weather,
            preferences: Preferences::default(),
        }
    }

    /// The demo garden the app starts with.
    pub fn seeded() -> Self {
        let plants = vec![
            seed_plant(
                1,
                "Monstera Deliciosa",
                "Monty",
                "https://images.unsplash.com/photo-1628620223412-ad52eef8c4de?w=600&auto=format&fit=crop&q=60",
                "Bedroom",
                &["Low Light", "Indoor"],
                2,
                LightStatus::Ok,
                SoilStatus::Dry,
            ),
            seed_plant(
                2,
                "Snake Plant",
                "Snakey",
                "https://images.unsplash.com/photo-1593482892290-f54927ae1bb6?w=600&auto=format&fit=crop&q=60",
                "Living Room",
                &["Low Maintenance"],
                5,
                LightStatus::Ok,
                SoilStatus::Ok,
            ),
            seed_plant(
                3,
                "Pothos",
                "Patty",
                "https://images.unsplash.com/photo-1595524147656-eb5d0a63e9a9?w=600&auto=format&fit=crop&q=60",
                "Kitchen",
                &["Trailing", "Indoor"],
                1,
                LightStatus::Low,
                SoilStatus::Dry,
            ),
            seed_plant(
                4,
                "Fiddle Leaf Fig",
                "Figgy",
                "https://images.unsplash.com/photo-1545239705-1564e58b9e4a?w=600&auto=format&fit=crop&q=60",
                "Dining Room",
                &["Fussy", "Indoor Tree"],
                4,
                LightStatus::High,
                SoilStatus::Ok,
            ),
        ];

        let tasks = vec![
            seed_task(1, 1, TaskType::Water, "2025-10-09", "09:00"),
            seed_task(2, 2, TaskType::Fertilize, "2025-10-10", "10:00"),
            seed_task(3, 3, TaskType::Water, "2025-10-09", "09:00"),
        ];

        let journal = vec![
            JournalEntry {
                id: 1,
                plant_id: 1,
                date: "2025-10-05".to_string(),
                note: "New leaf sprouting! Looking healthy.".to_string(),
                growth: "+1 leaf".to_string(),
            },
            JournalEntry {
                id: 2,
                plant_id: 2,
                date: "2025-10-01".to_string(),
                note: "Very resilient plant!".to_string(),
                growth: "Stable".to_string(),
            },
        ];

        let weather = Weather {
            temp: 28.0,
            humidity: 65,
            condition: "Partly Cloudy".to_string(),
        };

        Self::new(plants, tasks, journal, weather)
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_plant(
    id: i64,
    name: &str,
    nickname: &str,
    image: &str,
    location: &str,
    tags: &[&str],
    water_days: i32,
    light: LightStatus,
    soil: SoilStatus,
) -> Plant {
    Plant {
        id,
        name: name.to_string(),
        nickname: nickname.to_string(),
        image: image.to_string(),
        location: location.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        water_days,
        light,
        soil,
    }
}

fn seed_task(id: i64, plant_id: i64, task_type: TaskType, date: &str, time: &str) -> Task {
    Task {
        id,
        plant_id,
        task_type,
        date: date.to_string(),
        time: time.to_string(),
    }
}

/// Next id for a collection: one past the largest existing id, never below 1.
pub(crate) fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.fold(0, i64::max) + 1
}

/// Owner of the mock store. Cloning shares the same collections.
#[derive(Debug, Clone)]
pub struct DBService {
    pub pool: Pool,
}

impl DBService {
    /// Store pre-filled with the demo garden.
    pub fn new() -> Self {
        Self::from_store(Store::seeded())
    }

    pub fn empty() -> Self {
        Self::from_store(Store::default())
    }

    pub fn from_store(store: Store) -> Self {
        Self {
            pool: Arc::new(RwLock::new(store)),
        }
    }
}

impl Default for DBService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(next_id(std::iter::empty()), 1);
        assert_eq!(next_id([3, 9, 4].into_iter()), 10);
        assert_eq!(next_id([-5].into_iter()), 1);
    }

    #[tokio::test]
    async fn seeded_store_tasks_reference_existing_plants() {
        let db = DBService::new();
        let store = db.pool.read().await;
        assert_eq!(store.plants.len(), 4);
        assert!(
            store
                .tasks
                .iter()
                .all(|t| store.plants.iter().any(|p| p.id == t.plant_id))
        );
    }

    #[tokio::test]
    async fn clones_share_collections() {
        let db = DBService::empty();
        let other = db.clone();
        other.pool.write().await.weather.condition = "Rainy".to_string();
        assert_eq!(db.pool.read().await.weather.condition, "Rainy");
    }
}
