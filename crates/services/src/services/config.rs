//! Runtime configuration read from the process environment.

use std::{env, time::Duration};

use secrecy::SecretString;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_LATENCY_MS: u64 = 400;
pub const DEFAULT_WATER_RESET_DAYS: i32 = 7;

const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "VITE_GEMINI_API_KEY"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Simulated round-trip delay applied before each data call resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latency {
    None,
    Fixed(Duration),
    /// Uniformly random delay between the two bounds, inclusive.
    Jitter { min: Duration, max: Duration },
}

impl Latency {
    pub fn from_millis(ms: u64) -> Self {
        if ms == 0 {
            Latency::None
        } else {
            Latency::Fixed(Duration::from_millis(ms))
        }
    }

    pub async fn wait(&self) {
        let delay = match *self {
            Latency::None => return,
            Latency::Fixed(d) => d,
            Latency::Jitter { min, max } => {
                use rand::Rng;
                let (lo, hi) = (min.as_millis() as u64, max.as_millis() as u64);
                Duration::from_millis(rand::thread_rng().gen_range(lo.min(hi)..=hi.max(lo)))
            }
        };
        tokio::time::sleep(delay).await;
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` switches the assistant into canned-response mode.
    pub gemini_api_key: Option<SecretString>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub latency: Latency,
    /// Delay before a canned assistant answer, mimicking a model round trip.
    pub canned_latency: Latency,
    pub water_reset_days: i32,
    pub topic_guard: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            latency: Latency::from_millis(DEFAULT_LATENCY_MS),
            canned_latency: Latency::from_millis(500),
            water_reset_days: DEFAULT_WATER_RESET_DAYS,
            topic_guard: false,
        }
    }
}

impl Config {
    /// Configuration with every delay disabled.
    pub fn instant() -> Self {
        Self {
            latency: Latency::None,
            canned_latency: Latency::None,
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.gemini_api_key = API_KEY_VARS
            .iter()
            .find_map(|name| get(name))
            .map(|key| SecretString::from(key.trim().to_string()));

        if let Some(model) = get("GEMINI_MODEL") {
            config.gemini_model = model;
        }
        if let Some(url) = get("GEMINI_BASE_URL") {
            config.gemini_base_url = url.trim_end_matches('/').to_string();
        }

        let latency_ms = parse_var(&get, "FLORA_LATENCY_MS")?.unwrap_or(DEFAULT_LATENCY_MS);
        config.latency = match parse_var::<u64>(&get, "FLORA_LATENCY_JITTER_MS")? {
            Some(max) if max > latency_ms => Latency::Jitter {
                min: Duration::from_millis(latency_ms),
                max: Duration::from_millis(max),
            },
            _ => Latency::from_millis(latency_ms),
        };

        if let Some(days) = parse_var(&get, "FLORA_WATER_RESET_DAYS")? {
            config.water_reset_days = days;
        }
        if let Some(raw) = get("FLORA_TOPIC_GUARD") {
            config.topic_guard = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "FLORA_TOPIC_GUARD",
                        value: raw,
                    });
                }
            };
        }

        Ok(config)
    }

    pub fn has_api_key(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

fn parse_var<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    get(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| ConfigError::Invalid { name, value: raw })
        })
        .transpose()
}
