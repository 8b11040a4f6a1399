//! Data access service over the in-memory plant store.
//!
//! Every call waits out the configured latency before touching the store and
//! resolves to an [`ApiResponse`]. Nothing here returns `Err` or panics; a
//! caller checks `success` before reading `data`.

use db::{
    DBService,
    models::{
        journal::{CreateJournalEntry, JournalEntry},
        plant::{CreatePlant, Plant},
        preferences::{Preferences, UpdatePreferences},
        task::{Task, TaskWithPlant},
        weather::Weather,
    },
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use utils::response::ApiResponse;

use super::config::{Config, Latency};

/// Tag value the garden filter uses for "no filter".
pub const ALL_TAGS: &str = "All";

/// What the app shell needs before it can render anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Dashboard {
    pub plants: ApiResponse<Vec<Plant>>,
    pub tasks: ApiResponse<Vec<Task>>,
    pub weather: ApiResponse<Weather>,
}

#[derive(Debug, Clone)]
pub struct FloraService {
    db: DBService,
    latency: Latency,
    water_reset_days: i32,
}

impl FloraService {
    pub fn new(db: DBService, config: &Config) -> Self {
        Self {
            db,
            latency: config.latency,
            water_reset_days: config.water_reset_days,
        }
    }

    pub async fn get_plants(&self) -> ApiResponse<Vec<Plant>> {
        self.latency.wait().await;
        let plants = Plant::find_all(&self.db.pool).await;
        debug!(count = plants.len(), "Loaded plants");
        ApiResponse::success(plants)
    }

    /// Reset the plant's watering countdown. Fails without data for unknown ids.
    pub async fn water_plant(&self, id: i64) -> ApiResponse<Plant> {
        self.latency.wait().await;
        match Plant::water(&self.db.pool, id, self.water_reset_days).await {
            Some(plant) => ApiResponse::success(plant),
            None => {
                debug!(plant_id = id, "Water requested for unknown plant");
                ApiResponse::failure()
            }
        }
    }

    pub async fn get_tasks(&self) -> ApiResponse<Vec<Task>> {
        self.latency.wait().await;
        ApiResponse::success(Task::find_all(&self.db.pool).await)
    }

    /// Remove the task. Completing an id that is already gone still succeeds.
    pub async fn complete_task(&self, id: i64) -> ApiResponse<()> {
        self.latency.wait().await;
        if !Task::delete(&self.db.pool, id).await {
            debug!(task_id = id, "Task already absent");
        }
        ApiResponse::success(())
    }

    pub async fn get_journal(&self, plant_id: i64) -> ApiResponse<Vec<JournalEntry>> {
        self.latency.wait().await;
        ApiResponse::success(JournalEntry::find_by_plant_id(&self.db.pool, plant_id).await)
    }

    pub async fn get_weather(&self) -> ApiResponse<Weather> {
        self.latency.wait().await;
        ApiResponse::success(Weather::current(&self.db.pool).await)
    }

    /// Run the three initial reads concurrently and wait for all of them.
    pub async fn load_dashboard(&self) -> Dashboard {
        let (plants, tasks, weather) =
            tokio::join!(self.get_plants(), self.get_tasks(), self.get_weather());
        Dashboard {
            plants,
            tasks,
            weather,
        }
    }

    pub async fn add_plant(&self, data: CreatePlant) -> ApiResponse<Plant> {
        self.latency.wait().await;
        if !data.is_complete() {
            return invalid(MISSING_NAMES);
        }
        ApiResponse::success(Plant::create(&self.db.pool, data).await)
    }

    /// Full replace of a plant's editable fields.
    pub async fn update_plant(&self, id: i64, data: CreatePlant) -> ApiResponse<Plant> {
        self.latency.wait().await;
        if !data.is_complete() {
            return invalid(MISSING_NAMES);
        }
        match Plant::replace(&self.db.pool, id, data).await {
            Some(plant) => ApiResponse::success(plant),
            None => plant_not_found(id),
        }
    }

    /// Remove a plant. Its tasks are left in place and the calendar skips them.
    pub async fn delete_plant(&self, id: i64) -> ApiResponse<()> {
        self.latency.wait().await;
        if Plant::delete(&self.db.pool, id).await {
            ApiResponse::success(())
        } else {
            plant_not_found(id)
        }
    }

    /// Garden filter. `"All"` or an empty tag returns every plant.
    pub async fn plants_with_tag(&self, tag: &str) -> ApiResponse<Vec<Plant>> {
        if tag.is_empty() || tag == ALL_TAGS {
            return self.get_plants().await;
        }
        self.latency.wait().await;
        ApiResponse::success(Plant::find_by_tag(&self.db.pool, tag).await)
    }

    pub async fn get_tags(&self) -> ApiResponse<Vec<String>> {
        self.latency.wait().await;
        ApiResponse::success(Plant::all_tags(&self.db.pool).await)
    }

    pub async fn get_calendar(&self) -> ApiResponse<Vec<TaskWithPlant>> {
        self.latency.wait().await;
        ApiResponse::success(Task::find_all_with_plant(&self.db.pool).await)
    }

    pub async fn add_journal_entry(
        &self,
        plant_id: i64,
        data: CreateJournalEntry,
    ) -> ApiResponse<JournalEntry> {
        self.latency.wait().await;
        if data.note.trim().is_empty() {
            return invalid(MISSING_NOTE);
        }
        match JournalEntry::create(&self.db.pool, plant_id, data).await {
            Some(entry) => ApiResponse::success(entry),
            None => plant_not_found(plant_id),
        }
    }

    pub async fn replace_weather(&self, weather: Weather) -> ApiResponse<Weather> {
        self.latency.wait().await;
        ApiResponse::success(Weather::replace(&self.db.pool, weather).await)
    }

    pub async fn get_preferences(&self) -> ApiResponse<Preferences> {
        self.latency.wait().await;
        ApiResponse::success(Preferences::get(&self.db.pool).await)
    }

    pub async fn update_preferences(&self, patch: UpdatePreferences) -> ApiResponse<Preferences> {
        self.latency.wait().await;
        ApiResponse::success(Preferences::update(&self.db.pool, patch).await)
    }
}

pub const MISSING_NAMES: &str = "nickname and name are required";
pub const MISSING_NOTE: &str = "note is required";

fn invalid<T>(message: &str) -> ApiResponse<T> {
    info!(%message, "Request refused");
    ApiResponse::invalid(message)
}

fn plant_not_found<T>(id: i64) -> ApiResponse<T> {
    debug!(plant_id = id, "Plant not found");
    ApiResponse::not_found(format!("plant {id} not found"))
}
