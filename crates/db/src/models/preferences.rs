use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::info;
use ts_rs::TS;

use crate::Pool;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Reminder toggles from the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct NotificationSettings {
    pub water: bool,
    pub fertilize: bool,
    pub updates: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            water: true,
            fertilize: true,
            updates: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct Preferences {
    pub theme: Theme,
    pub notifications: NotificationSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct UpdateNotifications {
    pub water: Option<bool>,
    pub fertilize: Option<bool>,
    pub updates: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct UpdatePreferences {
    pub theme: Option<Theme>,
    pub notifications: Option<UpdateNotifications>,
}

impl Preferences {
    pub async fn get(pool: &Pool) -> Self {
        pool.read().await.preferences
    }

    /// Apply only the fields present in `patch`.
    pub async fn update(pool: &Pool, patch: UpdatePreferences) -> Self {
        let mut store = pool.write().await;
        let prefs = &mut store.preferences;
        if let Some(theme) = patch.theme {
            prefs.theme = theme;
        }
        if let Some(n) = patch.notifications {
            let current = &mut prefs.notifications;
            current.water = n.water.unwrap_or(current.water);
            current.fertilize = n.fertilize.unwrap_or(current.fertilize);
            current.updates = n.updates.unwrap_or(current.updates);
        }
        info!(theme = %prefs.theme, "Preferences updated");
        *prefs
    }
}
