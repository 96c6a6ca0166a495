//! 预导入模块
//!
//! 提供常用类型的快捷导入。

pub use super::account::Entity as Account;
pub use super::master_unit::Entity as MasterUnit;
pub use super::settings::Entity as Settings;
pub use super::user_unit::Entity as UserUnit;
