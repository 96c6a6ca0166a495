//! 列表行的展示规则

use serde::{Deserialize, Serialize};

use crate::database::dto::UserUnitWithMaster;

/// 行的两种显示状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStyle {
    /// 已达到养成目标
    Highlighted,
    Plain,
}

impl RowStyle {
    pub fn of(row: &UserUnitWithMaster) -> Self {
        if row.is_milestone_reached() {
            RowStyle::Highlighted
        } else {
            RowStyle::Plain
        }
    }
}

/// 系列名标题只在每个系列的第一行显示
pub fn series_header_visible(rows: &[UserUnitWithMaster], index: usize) -> bool {
    match index {
        0 => !rows.is_empty(),
        i if i < rows.len() => {
            rows[i - 1].master_unit.series_name != rows[i].master_unit.series_name
        }
        _ => false,
    }
}
