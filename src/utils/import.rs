//! 主数据导入
//!
//! 从 JSON 文件读取主数据列表，格式为 [`MasterUnitData`] 数组。

use std::collections::HashMap;
use std::path::Path;

use crate::database::dto::MasterUnitData;
use crate::entity::master_unit;
use crate::error::Result;

/// 读取并整理主数据文件
///
/// - 机体名、系列名去除首尾空白
/// - 机体名为空的条目跳过
/// - 机体名重复时保留最后一条，顺序以首次出现为准
pub async fn load_master_units(path: &Path) -> Result<Vec<master_unit::Model>> {
    let content = tokio::fs::read_to_string(path).await?;
    let entries: Vec<MasterUnitData> = serde_json::from_str(&content)?;
    log::info!("读取主数据文件 {}，共 {} 条", path.display(), entries.len());
    Ok(normalize(entries))
}

fn normalize(entries: Vec<MasterUnitData>) -> Vec<master_unit::Model> {
    let mut units: Vec<master_unit::Model> = Vec::with_capacity(entries.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (index, mut entry) in entries.into_iter().enumerate() {
        entry.unit_name = entry.unit_name.trim().to_string();
        entry.series_name = entry.series_name.trim().to_string();

        if entry.unit_name.is_empty() {
            log::warn!("第 {} 条主数据缺少机体名，已跳过", index + 1);
            continue;
        }

        match positions.get(&entry.unit_name) {
            Some(&position) => {
                log::warn!("机体名重复: {}，使用后出现的数据", entry.unit_name);
                units[position] = entry.into();
            }
            None => {
                positions.insert(entry.unit_name.clone(), units.len());
                units.push(entry.into());
            }
        }
    }

    units
}
