pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{Config, RankingConfig};
pub use error::AppError;
pub use handlers::LocatorState;
pub use services::{InventoryRepository, PharmacyRanker, SqliteInventoryRepository};
