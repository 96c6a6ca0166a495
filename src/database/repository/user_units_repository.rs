//! 账号持有机体数据仓库
//!
//! 批量写入区分两种冲突策略：
//! - `insert_many_replace`：已存在的 (account_id, unit_name) 会被覆盖
//! - `insert_many_ignore_conflicts`：已存在的记录保持不变，只补充缺失的记录

use crate::database::dto::UserUnitWithMaster;
use crate::database::repository::BATCH_SIZE;
use crate::entity::prelude::*;
use crate::entity::{master_unit, user_unit};
use sea_orm::sea_query::{LikeExpr, OnConflict};
use sea_orm::*;

/// 持有记录冲突时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConflictPolicy {
    Replace,
    Ignore,
}

/// 账号持有机体数据仓库
pub struct UserUnitsRepository;

impl UserUnitsRepository {
    /// 按账号和关键字检索持有记录（附带主数据）
    ///
    /// 关键字按字面匹配机体名或系列名的任意部分（`%`、`_` 不作通配符），
    /// 空字符串表示不过滤。结果按系列名、机体名排序。
    pub async fn search_with_master(
        db: &DatabaseConnection,
        account_id: i32,
        query: &str,
    ) -> Result<Vec<UserUnitWithMaster>, DbErr> {
        let mut select = UserUnit::find()
            .find_also_related(MasterUnit)
            .filter(user_unit::Column::AccountId.eq(account_id));

        if !query.is_empty() {
            select = select.filter(
                Condition::any()
                    .add(master_unit::Column::UnitName.like(Self::contains_pattern(query)))
                    .add(master_unit::Column::SeriesName.like(Self::contains_pattern(query))),
            );
        }

        let rows = select
            .order_by_asc(master_unit::Column::SeriesName)
            .order_by_asc(user_unit::Column::UnitName)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(user_unit, master_unit)| {
                master_unit.map(|master_unit| UserUnitWithMaster {
                    user_unit,
                    master_unit,
                })
            })
            .collect())
    }

    /// 根据主键查询持有记录
    pub async fn find_by_key(
        db: &DatabaseConnection,
        account_id: i32,
        unit_name: &str,
    ) -> Result<Option<user_unit::Model>, DbErr> {
        UserUnit::find_by_id((account_id, unit_name.to_string()))
            .one(db)
            .await
    }

    /// 获取账号的持有记录数
    pub async fn count_by_account(db: &DatabaseConnection, account_id: i32) -> Result<u64, DbErr> {
        UserUnit::find()
            .filter(user_unit::Column::AccountId.eq(account_id))
            .count(db)
            .await
    }

    /// 插入或更新单条持有记录
    pub async fn upsert(db: &DatabaseConnection, unit: user_unit::Model) -> Result<(), DbErr> {
        let now = chrono::Utc::now().timestamp() as i32;

        UserUnit::insert(Self::to_active(unit, now))
            .on_conflict(Self::on_conflict(ConflictPolicy::Replace))
            .exec_without_returning(db)
            .await?;

        Ok(())
    }

    /// 批量写入持有记录，冲突时覆盖
    pub async fn insert_many_replace(
        db: &DatabaseConnection,
        units: Vec<user_unit::Model>,
    ) -> Result<u64, DbErr> {
        Self::insert_many(db, units, ConflictPolicy::Replace).await
    }

    /// 批量写入持有记录，冲突时忽略
    pub async fn insert_many_ignore_conflicts(
        db: &DatabaseConnection,
        units: Vec<user_unit::Model>,
    ) -> Result<u64, DbErr> {
        Self::insert_many(db, units, ConflictPolicy::Ignore).await
    }

    /// 删除账号的所有持有记录
    pub async fn delete_by_account<C>(conn: &C, account_id: i32) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = UserUnit::delete_many()
            .filter(user_unit::Column::AccountId.eq(account_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn insert_many(
        db: &DatabaseConnection,
        units: Vec<user_unit::Model>,
        policy: ConflictPolicy,
    ) -> Result<u64, DbErr> {
        if units.is_empty() {
            return Ok(0);
        }

        let txn = db.begin().await?;
        let now = chrono::Utc::now().timestamp() as i32;
        let mut affected = 0u64;

        for chunk in units.chunks(BATCH_SIZE) {
            let actives = chunk
                .iter()
                .cloned()
                .map(|unit| Self::to_active(unit, now));

            affected += UserUnit::insert_many(actives)
                .on_conflict(Self::on_conflict(policy))
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(affected)
    }

    /// 构造 `%query%` 形式的 LIKE 条件，关键字中的通配符和转义符本身都加上 `!` 转义
    fn contains_pattern(query: &str) -> LikeExpr {
        const ESCAPE: char = '!';

        let mut pattern = String::with_capacity(query.len() + 2);
        pattern.push('%');
        for c in query.chars() {
            if matches!(c, '%' | '_' | ESCAPE) {
                pattern.push(ESCAPE);
            }
            pattern.push(c);
        }
        pattern.push('%');
        LikeExpr::new(pattern).escape(ESCAPE)
    }

    fn to_active(unit: user_unit::Model, now: i32) -> user_unit::ActiveModel {
        user_unit::ActiveModel {
            account_id: Set(unit.account_id),
            unit_name: Set(unit.unit_name),
            break_through_count: Set(unit.break_through_count),
            technical_manual_count: Set(unit.technical_manual_count),
            updated_at: Set(Some(now)),
        }
    }

    fn on_conflict(policy: ConflictPolicy) -> OnConflict {
        let mut on_conflict =
            OnConflict::columns([user_unit::Column::AccountId, user_unit::Column::UnitName]);
        match policy {
            ConflictPolicy::Replace => on_conflict.update_columns([
                user_unit::Column::BreakThroughCount,
                user_unit::Column::TechnicalManualCount,
                user_unit::Column::UpdatedAt,
            ]),
            ConflictPolicy::Ignore => on_conflict.do_nothing(),
        };
        on_conflict
    }
}

