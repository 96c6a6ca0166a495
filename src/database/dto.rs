//! 数据传输对象 (DTO)
//!
//! 用于界面展示和数据导入的结构定义。

use serde::{Deserialize, Serialize};

use crate::entity::{master_unit, user_unit};
use crate::progress::is_milestone_reached;

/// 持有记录与对应主数据的组合（仅用于展示，不单独持久化）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUnitWithMaster {
    pub user_unit: user_unit::Model,
    pub master_unit: master_unit::Model,
}

impl UserUnitWithMaster {
    /// 是否达到养成目标
    pub fn is_milestone_reached(&self) -> bool {
        is_milestone_reached(
            &self.user_unit.break_through_count,
            self.user_unit.technical_manual_count,
        )
    }

    /// 是否为同一条记录（账号 + 机体名相同），不比较内容
    pub fn same_item(&self, other: &Self) -> bool {
        self.user_unit.account_id == other.user_unit.account_id
            && self.user_unit.unit_name == other.user_unit.unit_name
    }
}

/// 主数据导入格式
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MasterUnitData {
    pub unit_name: String,
    pub series_name: String,
    #[serde(default)]
    pub acquisition_method: String,
    #[serde(default)]
    pub first_clear_reward: String,
}

impl From<MasterUnitData> for master_unit::Model {
    fn from(data: MasterUnitData) -> Self {
        Self {
            unit_name: data.unit_name,
            series_name: data.series_name,
            acquisition_method: data.acquisition_method,
            first_clear_reward: data.first_clear_reward,
        }
    }
}

/// 持有记录的部分更新，未提供的字段保持不变
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateUserUnitData {
    pub break_through_count: Option<String>,
    pub technical_manual_count: Option<i32>,
}

impl UpdateUserUnitData {
    pub fn is_empty(&self) -> bool {
        self.break_through_count.is_none() && self.technical_manual_count.is_none()
    }

    /// 在已有记录的副本上应用更新
    pub fn apply(&self, unit: &user_unit::Model) -> user_unit::Model {
        let mut updated = unit.clone();
        if let Some(level) = &self.break_through_count {
            updated.break_through_count = level.clone();
        }
        if let Some(count) = self.technical_manual_count {
            updated.technical_manual_count = count;
        }
        updated
    }
}
