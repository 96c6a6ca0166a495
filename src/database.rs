pub mod db;
pub mod dto;
pub mod repository;
pub mod store;

pub use store::{SqliteUnitStore, UnitStore};
