pub mod chat;
pub mod journal;
pub mod plant;
pub mod preferences;
pub mod task;
pub mod weather;
