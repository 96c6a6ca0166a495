#![allow(dead_code)]

use sea_orm::DatabaseConnection;
use ssr_tracker_lib::database::db;
use ssr_tracker_lib::entity::master_unit;

/// 已执行迁移的内存数据库
pub async fn setup_db() -> DatabaseConnection {
    let conn = db::open_in_memory().await.expect("open in-memory database");
    db::run_migrations(&conn).await.expect("run migrations");
    conn
}

pub fn master(series: &str, name: &str) -> master_unit::Model {
    master_unit::Model {
        unit_name: name.to_string(),
        series_name: series.to_string(),
        acquisition_method: format!("{} shop", series),
        first_clear_reward: String::new(),
    }
}

/// 三个系列共四台机体，插入顺序故意打乱
pub fn sample_masters() -> Vec<master_unit::Model> {
    vec![
        master("Zeta", "Hyaku Shiki"),
        master("CCA", "Nu Gundam"),
        master("Zeta", "Hi-Zack"),
        master("SEED", "Strike"),
    ]
}
