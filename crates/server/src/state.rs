use db::DBService;
use services::services::{
    assistant::Assistant,
    config::Config,
    flora::FloraService,
    gemini_api::GeminiApiError,
};

/// Shared by every handler. Cloning is cheap; the store sits behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AppState {
    flora: FloraService,
    assistant: Assistant,
}

impl AppState {
    pub fn new(config: &Config, db: DBService) -> Result<Self, GeminiApiError> {
        Ok(Self {
            flora: FloraService::new(db, config),
            assistant: Assistant::from_config(config)?,
        })
    }

    pub fn from_parts(flora: FloraService, assistant: Assistant) -> Self {
        Self { flora, assistant }
    }

    pub fn flora(&self) -> &FloraService {
        &self.flora
    }

    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }
}
