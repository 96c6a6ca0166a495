use crate::database::repository::user_units_repository::UserUnitsRepository;
use crate::entity::account;
use crate::entity::prelude::*;
use sea_orm::*;

/// 账号数据仓库
pub struct AccountsRepository;

impl AccountsRepository {
    /// 创建账号，返回自动分配的 ID
    pub async fn insert(db: &DatabaseConnection, account_name: String) -> Result<i32, DbErr> {
        let now = chrono::Utc::now().timestamp() as i32;

        let active = account::ActiveModel {
            id: NotSet,
            account_name: Set(account_name),
            created_at: Set(Some(now)),
        };

        let result = active.insert(db).await?;
        Ok(result.id)
    }

    /// 获取所有账号（按创建顺序）
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<account::Model>, DbErr> {
        Account::find()
            .order_by_asc(account::Column::Id)
            .all(db)
            .await
    }

    /// 根据 ID 查询账号
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<account::Model>, DbErr> {
        Account::find_by_id(id).one(db).await
    }

    /// 检查账号是否存在
    pub async fn exists(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
        Ok(Account::find_by_id(id).count(db).await? > 0)
    }

    /// 删除账号（同一事务内级联删除其持有记录）
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
        let txn = db.begin().await?;

        let removed = UserUnitsRepository::delete_by_account(&txn, id).await?;
        let result = Account::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        log::debug!(
            "删除账号 {}：账号 {} 行，持有记录 {} 行",
            id,
            result.rows_affected,
            removed
        );
        Ok(result)
    }
}
