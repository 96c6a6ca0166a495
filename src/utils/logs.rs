use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

impl From<log::LevelFilter> for LogLevel {
    fn from(level: log::LevelFilter) -> Self {
        match level {
            log::LevelFilter::Error => LogLevel::Error,
            log::LevelFilter::Warn => LogLevel::Warn,
            log::LevelFilter::Info => LogLevel::Info,
            log::LevelFilter::Debug => LogLevel::Debug,
            log::LevelFilter::Trace => LogLevel::Trace,
            log::LevelFilter::Off => LogLevel::Off,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(level: &str) -> Result<Self, Self::Err> {
        match level.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            "off" => Ok(LogLevel::Off),
            other => Err(format!("无效的日志级别: {}", other)),
        }
    }
}

/// 初始化日志输出
///
/// 后端按 Trace 级别注册，实际输出由 `log::max_level` 控制，运行时可通过
/// [`set_log_level`] 调整。重复调用时只调整级别。
pub fn init_logger(level: LogLevel) {
    let installed = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Trace)
        .format_timestamp_secs()
        .try_init();
    if installed.is_err() {
        log::debug!("日志后端已初始化，仅调整级别");
    }
    log::set_max_level(level.into());
}

/// 动态设置日志输出级别（不持久化）
pub fn set_log_level(level: &str) -> Result<(), String> {
    let level: LogLevel = level.parse()?;
    log::set_max_level(level.into());
    Ok(())
}

/// 获取当前日志级别
pub fn get_log_level() -> LogLevel {
    log::max_level().into()
}
