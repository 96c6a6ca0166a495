//! 存储层接口
//!
//! 视图模型只通过 [`UnitStore`] 访问数据库，测试时可以替换为其他实现。

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};

use crate::database::dto::UserUnitWithMaster;
use crate::database::repository::{
    accounts_repository::AccountsRepository, master_units_repository::MasterUnitsRepository,
    user_units_repository::UserUnitsRepository,
};
use crate::entity::{account, master_unit, user_unit};

#[async_trait]
pub trait UnitStore: Send + Sync {
    /// 获取所有账号
    async fn find_all_accounts(&self) -> Result<Vec<account::Model>, DbErr>;

    /// 获取所有主数据
    async fn find_all_master_units(&self) -> Result<Vec<master_unit::Model>, DbErr>;

    /// 检索账号的持有记录，结果按系列名、机体名排序
    async fn search_user_units(
        &self,
        account_id: i32,
        query: &str,
    ) -> Result<Vec<UserUnitWithMaster>, DbErr>;

    /// 创建账号，返回分配的 ID
    async fn insert_account(&self, account_name: String) -> Result<i32, DbErr>;

    /// 删除账号及其所有持有记录，返回删除的账号行数
    async fn delete_account(&self, account_id: i32) -> Result<u64, DbErr>;

    /// 插入或更新单条持有记录
    async fn upsert_user_unit(&self, unit: user_unit::Model) -> Result<(), DbErr>;

    /// 批量写入主数据，机体名冲突时覆盖
    async fn insert_master_units_replace(
        &self,
        units: Vec<master_unit::Model>,
    ) -> Result<u64, DbErr>;

    /// 批量写入持有记录，冲突时覆盖
    async fn insert_user_units_replace(
        &self,
        units: Vec<user_unit::Model>,
    ) -> Result<u64, DbErr>;

    /// 批量写入持有记录，冲突时保留已有记录
    async fn insert_user_units_ignore_conflicts(
        &self,
        units: Vec<user_unit::Model>,
    ) -> Result<u64, DbErr>;
}

/// 基于 SQLite 连接的存储实现
#[derive(Clone)]
pub struct SqliteUnitStore {
    db: DatabaseConnection,
}

impl SqliteUnitStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl UnitStore for SqliteUnitStore {
    async fn find_all_accounts(&self) -> Result<Vec<account::Model>, DbErr> {
        AccountsRepository::find_all(&self.db).await
    }

    async fn find_all_master_units(&self) -> Result<Vec<master_unit::Model>, DbErr> {
        MasterUnitsRepository::find_all(&self.db).await
    }

    async fn search_user_units(
        &self,
        account_id: i32,
        query: &str,
    ) -> Result<Vec<UserUnitWithMaster>, DbErr> {
        UserUnitsRepository::search_with_master(&self.db, account_id, query).await
    }

    async fn insert_account(&self, account_name: String) -> Result<i32, DbErr> {
        AccountsRepository::insert(&self.db, account_name).await
    }

    async fn delete_account(&self, account_id: i32) -> Result<u64, DbErr> {
        AccountsRepository::delete(&self.db, account_id)
            .await
            .map(|result| result.rows_affected)
    }

    async fn upsert_user_unit(&self, unit: user_unit::Model) -> Result<(), DbErr> {
        UserUnitsRepository::upsert(&self.db, unit).await
    }

    async fn insert_master_units_replace(
        &self,
        units: Vec<master_unit::Model>,
    ) -> Result<u64, DbErr> {
        MasterUnitsRepository::insert_many_replace(&self.db, units).await
    }

    async fn insert_user_units_replace(
        &self,
        units: Vec<user_unit::Model>,
    ) -> Result<u64, DbErr> {
        UserUnitsRepository::insert_many_replace(&self.db, units).await
    }

    async fn insert_user_units_ignore_conflicts(
        &self,
        units: Vec<user_unit::Model>,
    ) -> Result<u64, DbErr> {
        UserUnitsRepository::insert_many_ignore_conflicts(&self.db, units).await
    }
}
