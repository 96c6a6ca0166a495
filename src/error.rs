use sea_orm::DbErr;

/// 应用层统一错误
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("数据库错误: {0}")]
    Database(#[from] DbErr),

    #[error("文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("路径错误: {0}")]
    Path(String),

    #[error("无法获取异步运行时: {0}")]
    Runtime(#[from] tokio::runtime::TryCurrentError),

    #[error("未找到: {0}")]
    NotFound(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
