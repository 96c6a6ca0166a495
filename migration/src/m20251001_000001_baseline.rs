//! 基线迁移
//!
//! 创建三张核心表：
//! 1. account：玩家账号
//! 2. master_unit：机体主数据（只读，由外部数据导入）
//! 3. user_unit：每个账号的机体持有记录，(account_id, unit_name) 为复合主键

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Account::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Account::AccountName).text().not_null())
                    .col(ColumnDef::new(Account::CreatedAt).integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MasterUnit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MasterUnit::UnitName)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MasterUnit::SeriesName).text().not_null())
                    .col(
                        ColumnDef::new(MasterUnit::AcquisitionMethod)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(MasterUnit::FirstClearReward)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        // 账号删除时级联删除其持有记录
        manager
            .create_table(
                Table::create()
                    .table(UserUnit::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserUnit::AccountId).integer().not_null())
                    .col(ColumnDef::new(UserUnit::UnitName).text().not_null())
                    .col(
                        ColumnDef::new(UserUnit::BreakThroughCount)
                            .text()
                            .not_null()
                            .default("0"),
                    )
                    .col(
                        ColumnDef::new(UserUnit::TechnicalManualCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(UserUnit::UpdatedAt).integer().null())
                    .primary_key(
                        Index::create()
                            .col(UserUnit::AccountId)
                            .col(UserUnit::UnitName),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_unit_account")
                            .from(UserUnit::Table, UserUnit::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_unit_master_unit")
                            .from(UserUnit::Table, UserUnit::UnitName)
                            .to(MasterUnit::Table, MasterUnit::UnitName),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Err(DbErr::Custom(
            "此迁移无法回滚，请从备份恢复数据库".to_string(),
        ))
    }
}

#[derive(DeriveIden)]
enum Account {
    Table,
    Id,
    AccountName,
    CreatedAt,
}

#[derive(DeriveIden)]
enum MasterUnit {
    Table,
    UnitName,
    SeriesName,
    AcquisitionMethod,
    FirstClearReward,
}

#[derive(DeriveIden)]
enum UserUnit {
    Table,
    AccountId,
    UnitName,
    BreakThroughCount,
    TechnicalManualCount,
    UpdatedAt,
}
