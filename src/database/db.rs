use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, RuntimeErr};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::{Result, TrackerError};

/// 数据库备份结果
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupResult {
    pub success: bool,
    pub path: Option<String>,
    pub message: String,
}

/// 数据库导入结果
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: bool,
    pub message: String,
    pub backup_path: Option<String>,
}

// ==================== 数据库连接管理 ====================

/// 将文件路径转换为 sqlite 连接 URL
pub fn path_to_sqlite_url(path: &Path) -> std::result::Result<String, DbErr> {
    let db_url = Url::from_file_path(path).map_err(|_| {
        DbErr::Conn(RuntimeErr::Internal(format!(
            "Invalid database path: {}",
            path.display()
        )))
    })?;
    Ok(format!("sqlite:{}?mode=rwc", db_url.path()))
}

/// Establish a SeaORM database connection.
pub async fn open_database(db_path: &Path) -> std::result::Result<DatabaseConnection, DbErr> {
    // 1. 如果数据库不存在，创建目录
    if !db_path.exists() {
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DbErr::Conn(RuntimeErr::Internal(format!("无法创建数据库目录: {}", e)))
            })?;
        }
        log::info!("首次启动，创建数据库: {}", db_path.display());
    } else {
        log::info!("使用数据库: {}", db_path.display());
    }

    // 2. 使用 `url` crate 安全地构建连接字符串
    let connection_string = path_to_sqlite_url(db_path)?;

    connect(connection_string).await
}

/// 打开内存数据库（单连接，连接关闭后数据即丢失）
pub async fn open_in_memory() -> std::result::Result<DatabaseConnection, DbErr> {
    connect("sqlite::memory:".to_string()).await
}

async fn connect(connection_string: String) -> std::result::Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(connection_string);
    // 本地 SQLite 只需一个连接；内存数据库也依赖此设置保证所有查询落在同一个库上
    options
        .max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    log::debug!("Database connection string: {}", options.get_url());

    Database::connect(options).await
}

/// 执行所有未应用的迁移
pub async fn run_migrations(db: &DatabaseConnection) -> std::result::Result<(), DbErr> {
    log::info!("开始执行数据库迁移...");
    Migrator::up(db, None).await?;
    log::info!("数据库迁移完成");
    Ok(())
}

/// 关闭数据库连接
pub async fn close_connection(conn: DatabaseConnection) -> std::result::Result<(), DbErr> {
    conn.close().await?;
    Ok(())
}

// ==================== 数据库备份和导入 ====================

/// 生成带时间戳的备份文件名
fn generate_backup_filename() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    format!("ssr_tracker_{}.db", timestamp)
}

/// 使用 VACUUM INTO 进行数据库热备份
///
/// VACUUM INTO 可以在数据库正在使用时安全地创建一个优化后的副本。
/// 目标目录不存在时会自动创建。
pub async fn backup_database(db: &DatabaseConnection, backup_dir: &Path) -> Result<BackupResult> {
    if !backup_dir.exists() {
        fs::create_dir_all(backup_dir)?;
    }

    let target_path = backup_dir.join(generate_backup_filename());
    if target_path.exists() {
        return Err(TrackerError::Path(format!(
            "备份文件已存在: {}",
            target_path.display()
        )));
    }

    // SQLite 在 Windows 上也支持正斜杠，使用正斜杠可以避免转义问题
    let target_path_str = target_path
        .to_str()
        .ok_or_else(|| TrackerError::Path("备份路径包含无效字符".to_string()))?
        .replace('\\', "/");

    // 只需要转义单引号
    let escaped_path = target_path_str.replace('\'', "''");
    db.execute_unprepared(&format!("VACUUM INTO '{}'", escaped_path))
        .await?;

    log::info!("数据库热备份成功: {}", target_path_str);

    Ok(BackupResult {
        success: true,
        path: Some(target_path_str),
        message: "数据库备份成功".to_string(),
    })
}

/// 导入数据库文件（覆盖现有数据库）
///
/// 调用前必须已关闭指向 `target_db_path` 的连接。
/// 若目标数据库已存在且提供了备份目录，会先做一次冷备份。
pub fn import_database(
    source_path: &Path,
    target_db_path: &Path,
    backup_dir: Option<&Path>,
) -> Result<ImportResult> {
    // 检查源文件是否存在
    if !source_path.exists() {
        return Err(TrackerError::NotFound(format!(
            "源数据库文件不存在: {}",
            source_path.display()
        )));
    }

    // 检查文件扩展名
    if source_path.extension().and_then(|e| e.to_str()) != Some("db") {
        return Err(TrackerError::InvalidInput(
            "无效的数据库文件，请选择 .db 文件".to_string(),
        ));
    }

    // 冷备份（连接已关闭，可以安全复制）
    let backup_path = match backup_dir {
        Some(dir) if target_db_path.exists() => cold_backup(target_db_path, dir),
        Some(_) => None,
        None => {
            log::warn!("无法确定备份目录，跳过备份");
            None
        }
    };

    if let Some(parent) = target_db_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source_path, target_db_path)?;
    log::info!(
        "数据库文件已复制: {} -> {}",
        source_path.display(),
        target_db_path.display()
    );

    Ok(ImportResult {
        success: true,
        message: "数据库导入成功".to_string(),
        backup_path,
    })
}

fn cold_backup(db_path: &Path, dir: &Path) -> Option<String> {
    let backup_file_path: PathBuf = dir.join(generate_backup_filename());

    let copied = fs::create_dir_all(dir).and_then(|_| fs::copy(db_path, &backup_file_path));
    match copied {
        Ok(_) => {
            let path_str = backup_file_path.to_string_lossy().to_string();
            log::info!("导入前冷备份成功: {}", path_str);
            Some(path_str)
        }
        Err(e) => {
            log::warn!("导入前备份失败: {}，继续导入", e);
            None
        }
    }
}
