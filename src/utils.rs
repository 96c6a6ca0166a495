pub mod import;
pub mod logs;
