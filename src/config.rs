//! 运行配置
//!
//! 数据库路径优先使用命令行参数 / `SSR_TRACKER_DB` 环境变量，
//! 否则按便携模式或系统数据目录确定。

use std::path::{Path, PathBuf};

use crate::error::{Result, TrackerError};
use crate::utils::logs::LogLevel;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub portable: bool,
    pub log_level: LogLevel,
}

impl AppConfig {
    pub fn resolve(db_override: Option<PathBuf>, log_level: LogLevel) -> Result<Self> {
        let portable = ssr_path::is_portable_mode();
        let db_path = match db_override {
            Some(path) => path,
            None => ssr_path::get_db_path().map_err(TrackerError::Path)?,
        };

        let config = Self {
            db_path,
            portable,
            log_level,
        };
        log::debug!("运行配置: {:?}", config);
        Ok(config)
    }

    /// 默认备份目录：数据库所在目录下的 backups 子目录
    pub fn default_backup_dir(&self) -> PathBuf {
        self.db_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(ssr_path::DB_BACKUP_SUBDIR)
    }

    /// 确定备份目录
    ///
    /// 优先级：显式指定 > 设置表中保存的路径 > 默认目录
    pub fn resolve_backup_dir(&self, explicit: Option<&Path>, configured: &str) -> PathBuf {
        if let Some(dir) = explicit {
            return dir.to_path_buf();
        }
        let configured = configured.trim();
        if !configured.is_empty() {
            return PathBuf::from(configured);
        }
        self.default_backup_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig::resolve(Some(PathBuf::from("/srv/ssr/data/ssr_tracker.db")), LogLevel::Warn)
            .unwrap()
    }

    #[test]
    fn explicit_db_path_wins() {
        assert_eq!(config().db_path, Path::new("/srv/ssr/data/ssr_tracker.db"));
    }

    #[test]
    fn backup_dir_priority() {
        let config = config();
        assert_eq!(
            config.resolve_backup_dir(Some(Path::new("/mnt/backup")), "/configured"),
            Path::new("/mnt/backup")
        );
        assert_eq!(
            config.resolve_backup_dir(None, " /configured "),
            Path::new("/configured")
        );
        assert_eq!(
            config.resolve_backup_dir(None, ""),
            Path::new("/srv/ssr/data/backups")
        );
    }
}
