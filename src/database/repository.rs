pub mod accounts_repository;
pub mod master_units_repository;
pub mod settings_repository;
pub mod user_units_repository;

/// 批量写入时每条语句的最大行数，避免超出 SQLite 的参数上限
pub(crate) const BATCH_SIZE: usize = 500;
