//! 命令行界面
//!
//! 相当于应用的展示层：解析命令后通过视图模型读写数据并输出列表。

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::database::db;
use crate::database::dto::{UpdateUserUnitData, UserUnitWithMaster};
use crate::database::repository::{
    accounts_repository::AccountsRepository, settings_repository::SettingsRepository,
};
use crate::database::SqliteUnitStore;
use crate::error::{Result, TrackerError};
use crate::progress::{BREAKTHROUGH_LEVELS, ProgressSummary};
use crate::utils::import::load_master_units;
use crate::utils::logs::LogLevel;
use crate::viewmodel::{
    LoadState, RowStyle, UnitListViewModel, UnitListViewModelFactory, series_header_visible,
};

#[derive(Parser, Debug)]
#[command(name = "ssr-tracker", version, about = "机体收集与养成进度管理")]
pub struct Cli {
    /// 数据库文件路径
    #[arg(long, env = "SSR_TRACKER_DB", global = true)]
    pub db: Option<PathBuf>,

    /// 日志级别（error / warn / info / debug / trace / off）
    #[arg(long, env = "SSR_TRACKER_LOG", default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 账号管理
    #[command(subcommand)]
    Account(AccountCommand),

    /// 显示账号的机体列表
    Units {
        /// 账号 ID，默认使用上次选择的账号
        #[arg(long)]
        account: Option<i32>,
        /// 按机体名或系列名检索
        #[arg(long, default_value = "")]
        search: String,
    },

    /// 修改机体的突破次数或研究技术书数量
    Set {
        unit: String,
        #[arg(long)]
        account: Option<i32>,
        #[arg(long, value_parser = BREAKTHROUGH_LEVELS)]
        breakthrough: Option<String>,
        #[arg(long, value_parser = clap::value_parser!(i32).range(0..=13))]
        manuals: Option<i32>,
    },

    /// 从 JSON 文件导入主数据
    Import {
        file: PathBuf,
        /// 同时为该账号补充缺失的持有记录
        #[arg(long)]
        account: Option<i32>,
    },

    /// 热备份数据库
    Backup {
        #[arg(long)]
        dir: Option<PathBuf>,
        /// 将 --dir 保存为默认备份目录
        #[arg(long, requires = "dir")]
        remember: bool,
    },

    /// 用备份文件覆盖当前数据库
    Restore { file: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    List,
    Add { name: String },
    Delete { id: i32 },
    /// 设为默认账号
    Use { id: i32 },
}

pub async fn execute(command: Command, conn: DatabaseConnection, config: &AppConfig) -> Result<()> {
    let factory = UnitListViewModelFactory::new(Arc::new(SqliteUnitStore::new(conn.clone())));
    let view_model = factory.create()?;

    let outcome = match command {
        Command::Account(command) => account_command(command, &view_model, &conn).await,
        Command::Units { account, search } => {
            let account_id = resolve_account(&conn, account).await?;
            let rows = load_rows(&view_model, account_id, &search).await?;
            print_rows(&rows);
            Ok(())
        }
        Command::Set {
            unit,
            account,
            breakthrough,
            manuals,
        } => {
            let update = UpdateUserUnitData {
                break_through_count: breakthrough,
                technical_manual_count: manuals,
            };
            set_unit(&view_model, &conn, account, &unit, update).await
        }
        Command::Import { file, account } => {
            let units = load_master_units(&file).await?;
            match account {
                Some(account_id) => {
                    ensure_account(&conn, account_id).await?;
                    let added = view_model.update_master_units(units, account_id).await?;
                    println!("主数据已更新，账号 {} 新增 {} 台机体", account_id, added);
                }
                None => {
                    let count = view_model.insert_initial_master_units(units).await?;
                    println!("已写入 {} 条主数据", count);
                }
            }
            Ok(())
        }
        Command::Backup { dir, remember } => {
            if remember {
                if let Some(dir) = &dir {
                    SettingsRepository::set_db_backup_path(&conn, dir.display().to_string())
                        .await?;
                }
            }
            let configured = SettingsRepository::get_db_backup_path(&conn).await?;
            let backup_dir = config.resolve_backup_dir(dir.as_deref(), &configured);
            let result = db::backup_database(&conn, &backup_dir).await?;
            println!("{}: {}", result.message, result.path.unwrap_or_default());
            Ok(())
        }
        Command::Restore { file } => {
            let configured = SettingsRepository::get_db_backup_path(&conn).await?;
            let backup_dir = config.resolve_backup_dir(None, &configured);

            drop(view_model);
            db::close_connection(conn).await?;
            log::info!("数据库连接已关闭，准备备份和导入");

            let result = db::import_database(&file, &config.db_path, Some(backup_dir.as_path()))?;
            println!("{}", result.message);
            if let Some(path) = result.backup_path {
                println!("原数据库已备份到: {}", path);
            }
            return Ok(());
        }
    };

    match db::close_connection(conn).await {
        Ok(_) => log::info!("数据库连接已成功关闭"),
        Err(e) => log::error!("关闭数据库连接时出错: {}", e),
    }
    outcome
}

async fn account_command(
    command: AccountCommand,
    view_model: &UnitListViewModel,
    conn: &DatabaseConnection,
) -> Result<()> {
    match command {
        AccountCommand::List => {
            let current = SettingsRepository::get_last_account_id(conn).await?;
            let accounts = view_model.load_accounts().await?;
            if accounts.is_empty() {
                println!("尚无账号，使用 `account add <name>` 创建");
            }
            for account in accounts {
                let marker = if Some(account.id) == current { "*" } else { " " };
                println!("{} {:>4}  {}", marker, account.id, account.account_name);
            }
        }
        AccountCommand::Add { name } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(TrackerError::InvalidInput("账号名不能为空".to_string()));
            }
            let account_id = view_model.add_account(name.clone()).await?;
            if SettingsRepository::get_last_account_id(conn).await?.is_none() {
                SettingsRepository::set_last_account_id(conn, Some(account_id)).await?;
            }
            println!("已创建账号 {} (ID {})", name, account_id);
        }
        AccountCommand::Delete { id } => {
            if view_model.delete_account(id).await? == 0 {
                return Err(TrackerError::NotFound(format!("账号 {}", id)));
            }
            if SettingsRepository::get_last_account_id(conn).await? == Some(id) {
                SettingsRepository::set_last_account_id(conn, None).await?;
            }
            println!("已删除账号 {}", id);
        }
        AccountCommand::Use { id } => {
            ensure_account(conn, id).await?;
            SettingsRepository::set_last_account_id(conn, Some(id)).await?;
            println!("默认账号已切换为 {}", id);
        }
    }
    Ok(())
}

async fn set_unit(
    view_model: &UnitListViewModel,
    conn: &DatabaseConnection,
    account: Option<i32>,
    unit_name: &str,
    update: UpdateUserUnitData,
) -> Result<()> {
    if update.is_empty() {
        return Err(TrackerError::InvalidInput(
            "请至少指定 --breakthrough 或 --manuals".to_string(),
        ));
    }

    let account_id = resolve_account(conn, account).await?;
    let rows = load_rows(view_model, account_id, "").await?;
    let current = rows
        .iter()
        .find(|row| row.user_unit.unit_name == unit_name)
        .ok_or_else(|| TrackerError::NotFound(format!("机体 {}", unit_name)))?;

    view_model
        .update_user_unit(update.apply(&current.user_unit))
        .await?;

    // 写操作不会更新列表，需要显式刷新
    view_model.refresh_data();
    let rows = view_model.settled().await;
    if let Some(updated) = rows
        .iter()
        .find(|row| row.user_unit.unit_name == unit_name)
    {
        print_row(updated);
    }
    Ok(())
}

async fn load_rows(
    view_model: &UnitListViewModel,
    account_id: i32,
    search: &str,
) -> Result<Vec<UserUnitWithMaster>> {
    view_model.set_current_account(Some(account_id));
    if !search.is_empty() {
        view_model.set_search_text(search);
    }

    let rows = view_model.settled().await;
    if let LoadState::Failed(message) = &*view_model.load_state().borrow() {
        return Err(TrackerError::InvalidInput(format!("加载机体列表失败: {}", message)));
    }
    Ok(rows)
}

async fn resolve_account(conn: &DatabaseConnection, account: Option<i32>) -> Result<i32> {
    let account_id = match account {
        Some(id) => id,
        None => SettingsRepository::get_last_account_id(conn)
            .await?
            .ok_or_else(|| {
                TrackerError::InvalidInput("未选择账号，请使用 --account 或 `account use`".to_string())
            })?,
    };
    ensure_account(conn, account_id).await?;
    Ok(account_id)
}

async fn ensure_account(conn: &DatabaseConnection, account_id: i32) -> Result<()> {
    if AccountsRepository::exists(conn, account_id).await? {
        Ok(())
    } else {
        Err(TrackerError::NotFound(format!("账号 {}", account_id)))
    }
}

fn print_rows(rows: &[UserUnitWithMaster]) {
    for (index, row) in rows.iter().enumerate() {
        if series_header_visible(rows, index) {
            println!("[{}]", row.master_unit.series_name);
        }
        print_row(row);
    }

    let summary = ProgressSummary::from_rows(rows);
    println!("达标 {}/{}", summary.milestones, summary.total);
}

fn print_row(row: &UserUnitWithMaster) {
    let marker = match RowStyle::of(row) {
        RowStyle::Highlighted => "*",
        RowStyle::Plain => " ",
    };
    println!(
        "{} {}  突破 {}  技术书 {:>2}  入手: {}  首通: {}",
        marker,
        row.master_unit.unit_name,
        row.user_unit.break_through_count,
        row.user_unit.technical_manual_count,
        row.master_unit.acquisition_method,
        row.master_unit.first_clear_reward
    );
}
