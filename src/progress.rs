//! 养成进度判定
//!
//! 根据突破次数和研究技术书数量判断机体是否已达到养成目标，
//! 界面据此切换高亮显示。

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::database::dto::UserUnitWithMaster;

/// 突破次数的可选值
pub const BREAKTHROUGH_LEVELS: [&str; 4] = ["0", "1", "2", "3"];

/// 新建持有记录时的突破次数
pub const DEFAULT_BREAKTHROUGH: &str = "0";

/// 研究技术书数量的可选范围
pub const TECHNICAL_MANUAL_RANGE: RangeInclusive<i32> = 0..=13;

/// 判断是否达到养成目标
///
/// 按以下顺序判定，命中第一条即返回：
/// 1. 突破 3 次
/// 2. 突破 2 次且技术书 ≥ 3
/// 3. 突破 1 次且技术书 ≥ 6
/// 4. 突破 0 次且技术书 ≥ 9
/// 5. 技术书 ≥ 12（与突破次数无关，也覆盖未知的突破值）
pub fn is_milestone_reached(breakthrough: &str, technical_manual_count: i32) -> bool {
    if breakthrough == "3" {
        true
    } else if breakthrough == "2" && 3 <= technical_manual_count {
        true
    } else if breakthrough == "1" && 6 <= technical_manual_count {
        true
    } else if breakthrough == "0" && 9 <= technical_manual_count {
        true
    } else {
        12 <= technical_manual_count
    }
}

/// 账号的养成进度统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub milestones: usize,
}

impl ProgressSummary {
    pub fn from_rows(rows: &[UserUnitWithMaster]) -> Self {
        Self {
            total: rows.len(),
            milestones: rows.iter().filter(|row| row.is_milestone_reached()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 按突破次数给出达标所需的技术书数量
    fn required_manuals(level: &str) -> i32 {
        match level {
            "3" => 0,
            "2" => 3,
            "1" => 6,
            "0" => 9,
            _ => 12,
        }
    }

    #[test]
    fn matches_rule_table_for_every_option() {
        for level in BREAKTHROUGH_LEVELS {
            for count in TECHNICAL_MANUAL_RANGE {
                let expected = count >= required_manuals(level) || count >= 12;
                assert_eq!(
                    is_milestone_reached(level, count),
                    expected,
                    "level={level} count={count}"
                );
            }
        }
    }

    #[test]
    fn documented_examples() {
        assert!(is_milestone_reached("3", 0));
        assert!(!is_milestone_reached("2", 2));
        assert!(is_milestone_reached("2", 3));
        assert!(is_milestone_reached("0", 11));
        assert!(!is_milestone_reached("1", 5));
    }

    #[test]
    fn unknown_level_falls_back_to_manual_count() {
        assert!(!is_milestone_reached("", 11));
        assert!(!is_milestone_reached("4", 0));
        assert!(is_milestone_reached("4", 12));
        assert!(is_milestone_reached("x", 13));
    }

    #[test]
    fn summary_counts_milestones() {
        use crate::entity::{master_unit, user_unit};

        let row = |name: &str, level: &str, count: i32| UserUnitWithMaster {
            user_unit: user_unit::Model {
                account_id: 1,
                unit_name: name.to_string(),
                break_through_count: level.to_string(),
                technical_manual_count: count,
                updated_at: None,
            },
            master_unit: master_unit::Model {
                unit_name: name.to_string(),
                series_name: "S".to_string(),
                acquisition_method: String::new(),
                first_clear_reward: String::new(),
            },
        };

        let rows = vec![row("a", "3", 0), row("b", "0", 0), row("c", "1", 6)];
        assert_eq!(
            ProgressSummary::from_rows(&rows),
            ProgressSummary {
                total: 3,
                milestones: 2
            }
        );
        assert_eq!(ProgressSummary::from_rows(&[]), ProgressSummary::default());
    }
}
