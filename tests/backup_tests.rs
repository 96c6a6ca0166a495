mod common;

use common::{sample_masters, setup_db};
use sea_orm::DatabaseConnection;
use ssr_tracker_lib::database::db;
use ssr_tracker_lib::database::repository::{
    accounts_repository::AccountsRepository, master_units_repository::MasterUnitsRepository,
};
use ssr_tracker_lib::error::TrackerError;

async fn seeded() -> DatabaseConnection {
    let conn = setup_db().await;
    MasterUnitsRepository::insert_many_replace(&conn, sample_masters())
        .await
        .unwrap();
    AccountsRepository::insert(&conn, "main".to_string())
        .await
        .unwrap();
    conn
}

#[tokio::test]
async fn backup_writes_a_readable_copy() {
    let conn = seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let backup_dir = dir.path().join("nested").join("backups");

    let result = db::backup_database(&conn, &backup_dir).await.unwrap();
    assert!(result.success);
    let path = std::path::PathBuf::from(result.path.unwrap());
    assert!(path.exists());
    assert!(path.starts_with(&backup_dir));

    let copy = db::open_database(&path).await.unwrap();
    assert_eq!(MasterUnitsRepository::count(&copy).await.unwrap(), 4);
    assert_eq!(AccountsRepository::find_all(&copy).await.unwrap().len(), 1);
}

#[tokio::test]
async fn file_database_persists_between_connections() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data").join("ssr_tracker.db");

    let conn = db::open_database(&db_path).await.unwrap();
    db::run_migrations(&conn).await.unwrap();
    AccountsRepository::insert(&conn, "main".to_string())
        .await
        .unwrap();
    db::close_connection(conn).await.unwrap();

    let reopened = db::open_database(&db_path).await.unwrap();
    db::run_migrations(&reopened).await.unwrap();
    let accounts = AccountsRepository::find_all(&reopened).await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].account_name, "main");
}

#[tokio::test]
async fn import_replaces_database_and_backs_up_previous() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("data").join("ssr_tracker.db");
    let backups = dir.path().join("backups");

    let conn = db::open_database(&target).await.unwrap();
    db::run_migrations(&conn).await.unwrap();
    db::close_connection(conn).await.unwrap();

    let source_conn = seeded().await;
    let exported = db::backup_database(&source_conn, &dir.path().join("export"))
        .await
        .unwrap();
    let source = std::path::PathBuf::from(exported.path.unwrap());

    let result = db::import_database(&source, &target, Some(backups.as_path())).unwrap();
    assert!(result.success);
    assert!(std::path::Path::new(&result.backup_path.unwrap()).exists());

    let conn = db::open_database(&target).await.unwrap();
    assert_eq!(MasterUnitsRepository::count(&conn).await.unwrap(), 4);
}

#[test]
fn import_rejects_missing_or_foreign_files() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("ssr_tracker.db");

    assert!(matches!(
        db::import_database(&dir.path().join("missing.db"), &target, None),
        Err(TrackerError::NotFound(_))
    ));

    let text = dir.path().join("notes.txt");
    std::fs::write(&text, "not a database").unwrap();
    assert!(matches!(
        db::import_database(&text, &target, None),
        Err(TrackerError::InvalidInput(_))
    ));
}
