use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::{debug, info};
use ts_rs::TS;

use super::plant::Plant;
use crate::Pool;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskType {
    Water,
    Fertilize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub plant_id: i64, // Not enforced; may dangle after a plant is deleted
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub date: String, // YYYY-MM-DD, display only
    pub time: String, // HH:MM, display only
}

/// A task together with the plant it refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct TaskWithPlant {
    #[serde(flatten)]
    #[ts(flatten)]
    pub task: Task,
    pub plant: Plant,
}

impl std::ops::Deref for TaskWithPlant {
    type Target = Task;
    fn deref(&self) -> &Self::Target {
        &self.task
    }
}

impl Task {
    pub async fn find_all(pool: &Pool) -> Vec<Self> {
        pool.read().await.tasks.clone()
    }

    pub async fn find_by_plant_id(pool: &Pool, plant_id: i64) -> Vec<Self> {
        pool.read()
            .await
            .tasks
            .iter()
            .filter(|t| t.plant_id == plant_id)
            .cloned()
            .collect()
    }

    /// Tasks paired with their plants. Tasks whose plant is gone are skipped.
    pub async fn find_all_with_plant(pool: &Pool) -> Vec<TaskWithPlant> {
        let store = pool.read().await;
        store
            .tasks
            .iter()
            .filter_map(|task| {
                let plant = store.plants.iter().find(|p| p.id == task.plant_id);
                if plant.is_none() {
                    debug!(
                        task_id = task.id,
                        plant_id = task.plant_id,
                        "Skipping task with missing plant"
                    );
                }
                plant.map(|plant| TaskWithPlant {
                    task: task.clone(),
                    plant: plant.clone(),
                })
            })
            .collect()
    }

    /// Remove the task. Returns whether anything was removed.
    pub async fn delete(pool: &Pool, id: i64) -> bool {
        let mut store = pool.write().await;
        let before = store.tasks.len();
        store.tasks.retain(|t| t.id != id);
        let removed = store.tasks.len() != before;
        if removed {
            info!(task_id = id, "Task completed");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DBService, Store, models::weather::Weather};

    #[tokio::test]
    async fn delete_removes_at_most_one() {
        let db = DBService::new();
        assert!(Task::delete(&db.pool, 2).await);
        assert!(!Task::delete(&db.pool, 2).await);
        let ids: Vec<i64> = Task::find_all(&db.pool).await.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn dangling_tasks_are_skipped() {
        let mut store = Store::seeded();
        store.tasks.push(Task {
            id: 9,
            plant_id: 77,
            task_type: TaskType::Fertilize,
            date: "2025-10-11".to_string(),
            time: "08:00".to_string(),
        });
        let db = DBService::from_store(store);

        let calendar = Task::find_all_with_plant(&db.pool).await;

        assert_eq!(calendar.len(), 3);
        assert!(calendar.iter().all(|entry| entry.plant.id == entry.plant_id));
    }

    #[tokio::test]
    async fn find_by_plant_id_filters() {
        let db = DBService::from_store(Store::new(
            vec![],
            Store::seeded().tasks,
            vec![],
            Weather::default(),
        ));
        let tasks = Task::find_by_plant_id(&db.pool, 2).await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task_type, TaskType::Fertilize);
    }

    #[test]
    fn serializes_type_field() {
        let task = Task {
            id: 1,
            plant_id: 1,
            task_type: TaskType::Water,
            date: "2025-10-09".to_string(),
            time: "09:00".to_string(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["type"], "water");
        assert_eq!(json["plantId"], 1);
    }
}
