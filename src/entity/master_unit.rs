//! 机体主数据实体
//!
//! 由外部数据源导入，界面侧只读。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "master_unit")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub unit_name: String,
    #[sea_orm(column_type = "Text")]
    pub series_name: String,
    #[sea_orm(column_type = "Text")]
    pub acquisition_method: String,
    #[sea_orm(column_type = "Text")]
    pub first_clear_reward: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_unit::Entity")]
    UserUnit,
}

impl Related<super::user_unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserUnit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
