pub use sea_orm_migration::prelude::*;

mod m20251001_000001_baseline;
mod m20251012_000002_add_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_baseline::Migration),
            Box::new(m20251012_000002_add_settings::Migration),
        ]
    }
}
