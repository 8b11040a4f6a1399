use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use crate::Pool;

/// Current conditions shown on the garden header. There is no history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct Weather {
    pub temp: f64,     // °C
    pub humidity: u8,  // %
    pub condition: String, // e.g. "Sunny", "Rainy"
}

impl Weather {
    pub async fn current(pool: &Pool) -> Self {
        pool.read().await.weather.clone()
    }

    /// Overwrite the snapshot wholesale.
    pub async fn replace(pool: &Pool, weather: Weather) -> Self {
        let mut store = pool.write().await;
        info!(condition = %weather.condition, temp = weather.temp, "Weather replaced");
        store.weather = weather.clone();
        weather
    }
}
