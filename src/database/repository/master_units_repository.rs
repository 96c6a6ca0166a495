use crate::database::repository::BATCH_SIZE;
use crate::entity::master_unit;
use crate::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;

/// 机体主数据仓库
pub struct MasterUnitsRepository;

impl MasterUnitsRepository {
    /// 获取所有主数据（按系列名、机体名排序）
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<master_unit::Model>, DbErr> {
        MasterUnit::find()
            .order_by_asc(master_unit::Column::SeriesName)
            .order_by_asc(master_unit::Column::UnitName)
            .all(db)
            .await
    }

    /// 获取主数据总数
    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        MasterUnit::find().count(db).await
    }

    /// 批量写入主数据
    ///
    /// 冲突策略：替换。机体名已存在时覆盖系列名、入手途径和首通奖励。
    pub async fn insert_many_replace(
        db: &DatabaseConnection,
        units: Vec<master_unit::Model>,
    ) -> Result<u64, DbErr> {
        if units.is_empty() {
            return Ok(0);
        }

        let txn = db.begin().await?;
        let mut affected = 0u64;

        for chunk in units.chunks(BATCH_SIZE) {
            let actives = chunk.iter().cloned().map(|unit| master_unit::ActiveModel {
                unit_name: Set(unit.unit_name),
                series_name: Set(unit.series_name),
                acquisition_method: Set(unit.acquisition_method),
                first_clear_reward: Set(unit.first_clear_reward),
            });

            affected += MasterUnit::insert_many(actives)
                .on_conflict(
                    OnConflict::column(master_unit::Column::UnitName)
                        .update_columns([
                            master_unit::Column::SeriesName,
                            master_unit::Column::AcquisitionMethod,
                            master_unit::Column::FirstClearReward,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(affected)
    }
}
