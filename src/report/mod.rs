pub mod markdown;
pub mod text;

use crate::aggregate::GroupedResults;
use crate::models::ReviewComment;

/// 原始结果导出为带缩进的 JSON，未分组，和展示无关。
/// 没有结果时导出空数组
pub fn raw_json(results: Option<&[ReviewComment]>) -> String {
    let comments = results.unwrap_or(&[]);
    serde_json::to_string_pretty(comments).unwrap_or_else(|_| "[]".to_string())
}

/// 分组结果的 JSON 视图
pub fn grouped_json(grouped: &GroupedResults) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(grouped)?)
}
