//! 数据实体模块
//!
//! 包含所有 SeaORM 实体定义。

pub mod prelude;

// === SeaORM 实体（对应数据库表）===
pub mod account;
pub mod master_unit;
pub mod settings;
pub mod user_unit;
