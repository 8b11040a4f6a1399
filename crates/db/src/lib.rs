pub mod models;
mod store;

pub use store::{DBService, Pool, Store};
