mod common;

use common::{master, sample_masters, setup_db};
use ssr_tracker_lib::database::repository::{
    accounts_repository::AccountsRepository, master_units_repository::MasterUnitsRepository,
    settings_repository::SettingsRepository, user_units_repository::UserUnitsRepository,
};
use ssr_tracker_lib::entity::user_unit;

async fn account_with_units(conn: &sea_orm::DatabaseConnection, name: &str) -> i32 {
    let account_id = AccountsRepository::insert(conn, name.to_string())
        .await
        .unwrap();
    let units = MasterUnitsRepository::find_all(conn)
        .await
        .unwrap()
        .into_iter()
        .map(|m| user_unit::Model::initial(account_id, m.unit_name))
        .collect();
    UserUnitsRepository::insert_many_replace(conn, units)
        .await
        .unwrap();
    account_id
}

#[tokio::test]
async fn search_orders_by_series_then_unit_name() {
    let conn = setup_db().await;
    MasterUnitsRepository::insert_many_replace(&conn, sample_masters())
        .await
        .unwrap();
    let account_id = account_with_units(&conn, "main").await;

    let rows = UserUnitsRepository::search_with_master(&conn, account_id, "")
        .await
        .unwrap();
    let names: Vec<&str> = rows
        .iter()
        .map(|row| row.user_unit.unit_name.as_str())
        .collect();

    assert_eq!(names, vec!["Nu Gundam", "Strike", "Hi-Zack", "Hyaku Shiki"]);
    assert!(rows.iter().all(|row| row.user_unit.break_through_count == "0"));
    assert!(rows.iter().all(|row| row.user_unit.technical_manual_count == 0));
}

#[tokio::test]
async fn search_matches_unit_or_series_name() {
    let conn = setup_db().await;
    MasterUnitsRepository::insert_many_replace(&conn, sample_masters())
        .await
        .unwrap();
    let account_id = account_with_units(&conn, "main").await;

    let by_series = UserUnitsRepository::search_with_master(&conn, account_id, "Zeta")
        .await
        .unwrap();
    assert_eq!(by_series.len(), 2);

    let by_name = UserUnitsRepository::search_with_master(&conn, account_id, "strike")
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].master_unit.series_name, "SEED");

    let none = UserUnitsRepository::search_with_master(&conn, account_id, "Wing")
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    let conn = setup_db().await;
    let mut masters = sample_masters();
    masters.push(master("0083", "GP_03"));
    masters.push(master("Test", "Wow!"));
    MasterUnitsRepository::insert_many_replace(&conn, masters)
        .await
        .unwrap();
    let account_id = account_with_units(&conn, "main").await;

    let search = |query: &'static str| {
        let conn = conn.clone();
        async move {
            UserUnitsRepository::search_with_master(&conn, account_id, query)
                .await
                .unwrap()
                .into_iter()
                .map(|row| row.user_unit.unit_name)
                .collect::<Vec<_>>()
        }
    };

    assert!(search("%").await.is_empty());
    assert!(search("a%i").await.is_empty());
    assert_eq!(search("_").await, vec!["GP_03"]);
    assert_eq!(search("P_0").await, vec!["GP_03"]);
    assert!(search("Hi_Zack").await.is_empty());
    assert_eq!(search("!").await, vec!["Wow!"]);
    assert_eq!(search("w!").await, vec!["Wow!"]);
}

#[tokio::test]
async fn search_is_scoped_to_account() {
    let conn = setup_db().await;
    MasterUnitsRepository::insert_many_replace(&conn, sample_masters())
        .await
        .unwrap();
    let first = account_with_units(&conn, "first").await;
    let second = account_with_units(&conn, "second").await;

    let mut unit = user_unit::Model::initial(first, "Strike");
    unit.break_through_count = "3".to_string();
    UserUnitsRepository::upsert(&conn, unit).await.unwrap();

    let other = UserUnitsRepository::find_by_key(&conn, second, "Strike")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(other.break_through_count, "0");
    assert_eq!(
        UserUnitsRepository::count_by_account(&conn, second).await.unwrap(),
        4
    );
}

#[tokio::test]
async fn upsert_updates_existing_row() {
    let conn = setup_db().await;
    MasterUnitsRepository::insert_many_replace(&conn, sample_masters())
        .await
        .unwrap();
    let account_id = account_with_units(&conn, "main").await;

    let mut unit = UserUnitsRepository::find_by_key(&conn, account_id, "Nu Gundam")
        .await
        .unwrap()
        .unwrap();
    unit.technical_manual_count = 7;
    unit.break_through_count = "1".to_string();
    UserUnitsRepository::upsert(&conn, unit).await.unwrap();

    let stored = UserUnitsRepository::find_by_key(&conn, account_id, "Nu Gundam")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.technical_manual_count, 7);
    assert_eq!(stored.break_through_count, "1");
    assert!(stored.updated_at.is_some());
    assert_eq!(
        UserUnitsRepository::count_by_account(&conn, account_id)
            .await
            .unwrap(),
        4
    );
}

#[tokio::test]
async fn ignore_policy_keeps_progress_and_replace_policy_overwrites() {
    let conn = setup_db().await;
    MasterUnitsRepository::insert_many_replace(&conn, sample_masters())
        .await
        .unwrap();
    let account_id = account_with_units(&conn, "main").await;

    let mut progressed = user_unit::Model::initial(account_id, "Strike");
    progressed.technical_manual_count = 5;
    UserUnitsRepository::upsert(&conn, progressed).await.unwrap();

    MasterUnitsRepository::insert_many_replace(&conn, vec![master("Wing", "Wing Zero")])
        .await
        .unwrap();
    let fresh: Vec<user_unit::Model> = MasterUnitsRepository::find_all(&conn)
        .await
        .unwrap()
        .into_iter()
        .map(|m| user_unit::Model::initial(account_id, m.unit_name))
        .collect();

    let added = UserUnitsRepository::insert_many_ignore_conflicts(&conn, fresh.clone())
        .await
        .unwrap();
    assert_eq!(added, 1);
    let kept = UserUnitsRepository::find_by_key(&conn, account_id, "Strike")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.technical_manual_count, 5);

    UserUnitsRepository::insert_many_replace(&conn, fresh)
        .await
        .unwrap();
    let reset = UserUnitsRepository::find_by_key(&conn, account_id, "Strike")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reset.technical_manual_count, 0);
    assert_eq!(
        UserUnitsRepository::count_by_account(&conn, account_id)
            .await
            .unwrap(),
        5
    );
}

#[tokio::test]
async fn master_replace_overwrites_descriptions() {
    let conn = setup_db().await;
    MasterUnitsRepository::insert_many_replace(&conn, sample_masters())
        .await
        .unwrap();

    let mut changed = master("CCA", "Nu Gundam");
    changed.first_clear_reward = "Fin Funnel".to_string();
    MasterUnitsRepository::insert_many_replace(&conn, vec![changed])
        .await
        .unwrap();

    let all = MasterUnitsRepository::find_all(&conn).await.unwrap();
    assert_eq!(MasterUnitsRepository::count(&conn).await.unwrap(), 4);
    let nu = all.iter().find(|m| m.unit_name == "Nu Gundam").unwrap();
    assert_eq!(nu.first_clear_reward, "Fin Funnel");
}

#[tokio::test]
async fn empty_bulk_writes_are_no_ops() {
    let conn = setup_db().await;
    assert_eq!(
        MasterUnitsRepository::insert_many_replace(&conn, Vec::new())
            .await
            .unwrap(),
        0
    );
    assert_eq!(
        UserUnitsRepository::insert_many_ignore_conflicts(&conn, Vec::new())
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn deleting_account_removes_its_units() {
    let conn = setup_db().await;
    MasterUnitsRepository::insert_many_replace(&conn, sample_masters())
        .await
        .unwrap();
    let doomed = account_with_units(&conn, "doomed").await;
    let kept = account_with_units(&conn, "kept").await;

    let result = AccountsRepository::delete(&conn, doomed).await.unwrap();
    assert_eq!(result.rows_affected, 1);

    assert!(!AccountsRepository::exists(&conn, doomed).await.unwrap());
    assert!(AccountsRepository::find_by_id(&conn, doomed)
        .await
        .unwrap()
        .is_none());
    assert!(UserUnitsRepository::search_with_master(&conn, doomed, "")
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        UserUnitsRepository::count_by_account(&conn, kept).await.unwrap(),
        4
    );

    let accounts = AccountsRepository::find_all(&conn).await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].account_name, "kept");
}

#[tokio::test]
async fn settings_default_and_update() {
    let conn = setup_db().await;

    assert_eq!(SettingsRepository::get_last_account_id(&conn).await.unwrap(), None);
    assert_eq!(SettingsRepository::get_db_backup_path(&conn).await.unwrap(), "");

    SettingsRepository::set_last_account_id(&conn, Some(3))
        .await
        .unwrap();
    SettingsRepository::set_db_backup_path(&conn, "/mnt/backup".to_string())
        .await
        .unwrap();
    assert_eq!(
        SettingsRepository::get_last_account_id(&conn).await.unwrap(),
        Some(3)
    );
    assert_eq!(
        SettingsRepository::get_db_backup_path(&conn).await.unwrap(),
        "/mnt/backup"
    );

    SettingsRepository::set_db_backup_path(&conn, "  ".to_string())
        .await
        .unwrap();
    assert_eq!(SettingsRepository::get_db_backup_path(&conn).await.unwrap(), "");
}
