//! 账号持有机体实体
//!
//! (account_id, unit_name) 为复合主键，每个账号每台机体至多一条记录。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::progress::DEFAULT_BREAKTHROUGH;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_unit")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_id: i32,
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub unit_name: String,

    // === 养成状态 ===
    /// 突破次数（"0".."3"）
    #[sea_orm(column_type = "Text")]
    pub break_through_count: String,
    /// 研究技术书数量
    pub technical_manual_count: i32,

    pub updated_at: Option<i32>,
}

impl Model {
    /// 新账号的初始持有记录
    pub fn initial(account_id: i32, unit_name: impl Into<String>) -> Self {
        Self {
            account_id,
            unit_name: unit_name.into(),
            break_through_count: DEFAULT_BREAKTHROUGH.to_string(),
            technical_manual_count: 0,
            updated_at: None,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Account,
    #[sea_orm(
        belongs_to = "super::master_unit::Entity",
        from = "Column::UnitName",
        to = "super::master_unit::Column::UnitName"
    )]
    MasterUnit,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::master_unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MasterUnit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
