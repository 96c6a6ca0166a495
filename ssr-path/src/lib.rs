use std::path::{Path, PathBuf};

/// 数据库相关路径常量
pub const DB_DATA_DIR: &str = "data";
pub const DB_FILE_NAME: &str = "ssr_tracker.db";
pub const DB_BACKUP_SUBDIR: &str = "backups";
pub const RESOURCE_DIR: &str = "resources";

/// 判断是否处于便携模式
///
/// 检测逻辑：检查可执行文件同级目录下是否存在 resources/data/ssr_tracker.db
pub fn is_portable_mode() -> bool {
    match exe_dir() {
        Ok(dir) => is_portable_layout(&dir),
        Err(_) => false,
    }
}

/// 检查指定目录是否具有便携模式的目录结构
pub fn is_portable_layout(dir: &Path) -> bool {
    let portable_data_dir = dir.join(RESOURCE_DIR).join(DB_DATA_DIR);
    portable_data_dir.exists() && portable_data_dir.join(DB_FILE_NAME).exists()
}

fn exe_dir() -> Result<PathBuf, String> {
    let exe_path =
        std::env::current_exe().map_err(|e| format!("无法获取可执行文件路径: {}", e))?;
    exe_path
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| "无法获取可执行文件父目录".to_string())
}

/// 获取基础数据目录
pub fn get_base_data_dir() -> Result<PathBuf, String> {
    get_base_data_dir_for_mode(is_portable_mode())
}

/// 获取指定模式的基础数据目录
pub fn get_base_data_dir_for_mode(portable: bool) -> Result<PathBuf, String> {
    if portable {
        // 便携模式：使用可执行文件所在目录的 resources 子目录
        Ok(exe_dir()?.join(RESOURCE_DIR))
    } else {
        // 标准模式：使用系统应用数据目录
        get_system_data_dir()
    }
}

/// 获取系统数据目录（跨平台）
fn get_system_data_dir() -> Result<PathBuf, String> {
    use directories::BaseDirs;

    let base_dirs = BaseDirs::new().ok_or_else(|| "无法获取系统目录信息".to_string())?;

    #[cfg(any(target_os = "windows", target_os = "macos"))]
    {
        Ok(base_dirs.data_dir().join("org.kijitora.ssr"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        Ok(base_dirs.data_dir().join("ssr-tracker"))
    }
}

/// 获取数据库文件路径
pub fn get_db_path() -> Result<PathBuf, String> {
    Ok(db_path_in(&get_base_data_dir()?))
}

/// 基础目录下的数据库文件路径
pub fn db_path_in(base_dir: &Path) -> PathBuf {
    base_dir.join(DB_DATA_DIR).join(DB_FILE_NAME)
}
