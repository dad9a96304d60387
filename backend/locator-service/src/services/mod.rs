pub mod inventory;
pub mod ranking;

pub use inventory::{InventoryRepository, SqliteInventoryRepository};
pub use ranking::PharmacyRanker;
