pub mod assistant;
pub mod chat;
pub mod config;
pub mod flora;
pub mod garden;
pub mod gemini_api;
pub mod identify;
pub mod shell;
