//! Application shell state.
//!
//! The shell keeps local copies of plants, tasks and weather for rendering.
//! The service stays authoritative: local patches are applied first so the
//! view reacts at once, then replaced by what the service returns or rolled
//! back when the call fails.

use db::models::{
    plant::{CreatePlant, Plant},
    preferences::{Theme, UpdatePreferences},
    task::{Task, TaskWithPlant},
    weather::Weather,
};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::{debug, info, warn};
use ts_rs::TS;
use utils::response::ApiResponse;

use super::{flora::FloraService, garden};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tab {
    #[default]
    Garden,
    Calendar,
    Identify,
    Chat,
    Settings,
}

#[derive(Debug, Clone)]
pub struct AppShell {
    service: FloraService,
    active_tab: Tab,
    plants: Vec<Plant>,
    tasks: Vec<Task>,
    weather: Option<Weather>,
    theme: Theme,
    loading: bool,
}

impl AppShell {
    pub fn new(service: FloraService) -> Self {
        Self {
            service,
            active_tab: Tab::default(),
            plants: Vec::new(),
            tasks: Vec::new(),
            weather: None,
            theme: Theme::default(),
            loading: false,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn weather(&self) -> Option<&Weather> {
        self.weather.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Initial load. Collections whose call failed keep their previous value.
    pub async fn load(&mut self) {
        self.loading = true;
        let dashboard = self.service.load_dashboard().await;

        if let Some(plants) = dashboard.plants.into_data() {
            self.plants = plants;
        }
        if let Some(tasks) = dashboard.tasks.into_data() {
            self.tasks = tasks;
        }
        if let Some(weather) = dashboard.weather.into_data() {
            self.weather = Some(weather);
        }
        if let Some(prefs) = self.service.get_preferences().await.into_data() {
            self.theme = prefs.theme;
        }

        self.loading = false;
        debug!(
            plants = self.plants.len(),
            tasks = self.tasks.len(),
            "Shell loaded"
        );
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Local state only changes when the service returns the watered plant.
    pub async fn water_plant(&mut self, id: i64) -> bool {
        match self.service.water_plant(id).await.into_data() {
            Some(plant) => {
                self.adopt_plant(plant);
                true
            }
            None => {
                debug!(plant_id = id, "Water failed, local state kept");
                false
            }
        }
    }

    /// Drop the task locally, then adopt the service's task list.
    pub async fn complete_task(&mut self, id: i64) -> bool {
        self.tasks.retain(|t| t.id != id);
        let done = self.service.complete_task(id).await.is_success();
        self.refresh_tasks().await;
        done
    }

    pub async fn add_plant(&mut self, data: CreatePlant) -> ApiResponse<Plant> {
        if !data.is_complete() {
            return self.service.add_plant(data).await;
        }

        let local_id = garden::next_local_id(&self.plants);
        self.plants.push(data.clone().into_plant(local_id, None));

        let response = self.service.add_plant(data).await;
        match &response.data {
            Some(plant) if response.success => {
                // The service may have assigned a different id, possibly one a
                // stale local entry still holds.
                self.plants.retain(|p| p.id != local_id && p.id != plant.id);
                self.plants.push(plant.clone());
                info!(plant_id = plant.id, "Plant added");
                self.refresh_plants().await;
            }
            _ => {
                self.plants.retain(|p| p.id != local_id);
                warn!("Add plant failed, rolled back");
            }
        }
        response
    }

    pub async fn update_plant(&mut self, id: i64, data: CreatePlant) -> ApiResponse<Plant> {
        let snapshot = self.plants.iter().find(|p| p.id == id).cloned();
        if let (Some(before), true) = (&snapshot, data.is_complete()) {
            self.adopt_plant(data.clone().into_plant(id, Some(before)));
        }

        let response = self.service.update_plant(id, data).await;
        match (&response.data, snapshot) {
            (Some(plant), _) if response.success => self.adopt_plant(plant.clone()),
            (_, Some(before)) => {
                self.adopt_plant(before);
                debug!(plant_id = id, "Update failed, rolled back");
            }
            _ => {}
        }
        response
    }

    pub async fn delete_plant(&mut self, id: i64) -> ApiResponse<()> {
        let position = self.plants.iter().position(|p| p.id == id);
        let removed = position.map(|i| (i, self.plants.remove(i)));

        let response = self.service.delete_plant(id).await;
        if let (false, Some((index, plant))) = (response.success, removed) {
            self.plants.insert(index.min(self.plants.len()), plant);
            debug!(plant_id = id, "Delete failed, rolled back");
        }
        response
    }

    /// Apply the theme locally, then adopt the stored preference.
    pub async fn set_theme(&mut self, theme: Theme) {
        let previous = self.theme;
        self.theme = theme;
        let patch = UpdatePreferences {
            theme: Some(theme),
            ..Default::default()
        };
        self.theme = match self.service.update_preferences(patch).await.into_data() {
            Some(prefs) => prefs.theme,
            None => previous,
        };
    }

    pub async fn toggle_theme(&mut self) {
        self.set_theme(self.theme.toggled()).await;
    }

    /// Garden cards for the selected filter chip.
    pub fn garden(&self, tag: &str) -> Vec<&Plant> {
        garden::filter_by_tag(&self.plants, tag)
    }

    pub fn tag_chips(&self) -> Vec<String> {
        garden::tag_chips(&self.plants)
    }

    pub fn due_today(&self) -> usize {
        garden::due_count(&self.plants)
    }

    /// Tasks joined with the local plant list. Tasks for deleted plants are skipped.
    pub fn calendar(&self) -> Vec<TaskWithPlant> {
        self.tasks
            .iter()
            .filter_map(|task| {
                self.plants
                    .iter()
                    .find(|p| p.id == task.plant_id)
                    .map(|plant| TaskWithPlant {
                        task: task.clone(),
                        plant: plant.clone(),
                    })
            })
            .collect()
    }

    async fn refresh_plants(&mut self) {
        if let Some(plants) = self.service.get_plants().await.into_data() {
            self.plants = plants;
        }
    }

    async fn refresh_tasks(&mut self) {
        if let Some(tasks) = self.service.get_tasks().await.into_data() {
            self.tasks = tasks;
        }
    }

    fn adopt_plant(&mut self, plant: Plant) {
        match self.plants.iter_mut().find(|p| p.id == plant.id) {
            Some(slot) => *slot = plant,
            None => self.plants.push(plant),
        }
    }
}
