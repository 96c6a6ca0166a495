//! 账号实体

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub account_name: String,
    pub created_at: Option<i32>,
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
