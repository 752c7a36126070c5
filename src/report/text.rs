use crate::aggregate::GroupedResults;
use crate::models::Severity;

/// 文本格式化器
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// 创建新的文本格式化器
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// 创建不使用颜色的文本格式化器（写文件时使用）
    pub fn new_no_color() -> Self {
        Self { use_colors: false }
    }

    /// 生成分隔线
    fn separator(&self, length: usize) -> String {
        "=".repeat(length)
    }

    /// 生成子分隔线
    fn sub_separator(&self, length: usize) -> String {
        "-".repeat(length)
    }

    /// 格式化严重程度
    fn format_severity(&self, label: Option<&str>) -> String {
        let severity = Severity::classify(label);
        let severity_str = label.unwrap_or(severity.as_str());
        if self.use_colors {
            match severity {
                Severity::High => format!("\x1b[91m{}\x1b[0m", severity_str), // 红色
                Severity::Warning => format!("\x1b[93m{}\x1b[0m", severity_str), // 黄色
                Severity::Medium => format!("\x1b[33m{}\x1b[0m", severity_str), // 橙黄
                Severity::Minor => format!("\x1b[94m{}\x1b[0m", severity_str), // 蓝色
                Severity::Low => format!("\x1b[92m{}\x1b[0m", severity_str),  // 绿色
                Severity::Info => format!("\x1b[96m{}\x1b[0m", severity_str), // 青色
            }
        } else {
            severity_str.to_string()
        }
    }

    /// 渲染分组后的审查结果
    pub fn format(&self, grouped: &GroupedResults) -> String {
        let mut content = String::new();

        content.push_str(&self.separator(80));
        content.push('\n');
        content.push_str("                              PR REVIEW REPORT\n");
        content.push_str(&self.separator(80));
        content.push('\n');
        content.push_str(&format!(
            "Files: {}    Findings: {}\n",
            grouped.files.len(),
            grouped.total_comments()
        ));
        content.push('\n');

        for file_group in &grouped.files {
            content.push_str(&format!("{}\n", file_group.file));
            content.push_str(&self.sub_separator(file_group.file.len().min(80)));
            content.push('\n');

            for line_group in &file_group.lines {
                content.push_str(&format!("  Line {}\n", line_group.line));

                for comment in &line_group.comments {
                    content.push_str(&format!(
                        "    [{}] ({}) {}\n",
                        self.format_severity(comment.severity.as_deref()),
                        comment.category_label(),
                        comment.comment
                    ));
                    if let Some(suggestion) = &comment.suggestion {
                        content.push_str(&format!("      Suggestion: {}\n", suggestion));
                    }
                }
                content.push('\n');
            }
        }

        content
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}
