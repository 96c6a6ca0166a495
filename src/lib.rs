mod cli;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod progress;
pub mod utils;
pub mod viewmodel;

use clap::Parser;

use config::AppConfig;
use database::db;

pub use error::{Result, TrackerError};

/// 命令行入口
pub fn run() -> Result<()> {
    let args = cli::Cli::parse();
    utils::logs::init_logger(args.log_level);

    let config = AppConfig::resolve(args.db.clone(), args.log_level)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let conn = db::open_database(&config.db_path).await?;
        log::info!("数据库连接建立成功");

        if let Err(e) = db::run_migrations(&conn).await {
            log::error!("数据库迁移失败: {}", e);
            return Err(e.into());
        }

        cli::execute(args.command, conn, &config).await
    })
}
