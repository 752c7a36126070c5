use chrono::Utc;

use crate::aggregate::GroupedResults;

/// Markdown 格式化器
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// 渲染分组后的审查结果为 Markdown 报告
    pub fn format(&self, grouped: &GroupedResults, reference: &str) -> String {
        let mut content = String::new();

        content.push_str("# PR Review Report\n\n");
        content.push_str(&format!("- PR: {}\n", reference));
        content.push_str(&format!(
            "- Generated: {}\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));
        content.push_str(&format!(
            "- Files: {} / Findings: {}\n\n",
            grouped.files.len(),
            grouped.total_comments()
        ));

        for file_group in &grouped.files {
            content.push_str(&format!("## `{}`\n\n", file_group.file));

            for line_group in &file_group.lines {
                content.push_str(&format!("### Line {}\n\n", line_group.line));

                for comment in &line_group.comments {
                    content.push_str(&format!(
                        "- **{}** ({}): {}\n",
                        comment.severity.as_deref().unwrap_or("Info"),
                        comment.category_label(),
                        comment.comment
                    ));
                    if let Some(suggestion) = &comment.suggestion {
                        content.push_str(&format!("  - 建议: {}\n", suggestion));
                    }
                }
                content.push('\n');
            }
        }

        content
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}
