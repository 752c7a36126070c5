use serde::{Deserialize, Deserializer, Serialize};

/// 审查意见：远程审查服务针对某文件某行给出的一条发现
///
/// 接收后不可变，聚合阶段只做重组，从不修改字段。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewComment {
    /// 被审查文件路径，分组键
    pub file: String,
    /// 行号，分组键。服务端有时返回数字有时返回字符串，
    /// 反序列化时统一规范化为字符串，只做键比较，不参与运算
    #[serde(deserialize_with = "deserialize_line")]
    pub line: String,
    /// 审查意见正文，去重的主标识
    pub comment: String,
    /// 建议的修复文本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// 严重程度标签，开放集合，展示时归类到固定集合
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// 自由分类标签，缺失时展示为 General
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ReviewComment {
    pub fn new(
        file: impl Into<String>,
        line: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line: line.into(),
            comment: comment.into(),
            suggestion: None,
            severity: None,
            category: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// 展示用分类标签，缺失时回退到 General
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("General")
    }
}

/// 行号兼容数字和字符串两种形态，统一成字符串键
fn deserialize_line<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLine {
        Number(i64),
        Text(String),
    }

    Ok(match RawLine::deserialize(deserializer)? {
        RawLine::Number(n) => n.to_string(),
        RawLine::Text(s) => s,
    })
}

/// 展示用严重程度，固定集合
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
    Warning,
    Minor,
    Info,
}

impl Severity {
    /// 大小写不敏感地归类服务端的严重程度标签，
    /// 未识别或缺失一律归入 Info。总函数，不会失败
    pub fn classify(label: Option<&str>) -> Self {
        match label.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("low") => Severity::Low,
            Some("medium") => Severity::Medium,
            Some("high") => Severity::High,
            Some("warning") => Severity::Warning,
            Some("minor") => Severity::Minor,
            _ => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Warning => "Warning",
            Severity::Minor => "Minor",
            Severity::Info => "Info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_comment_deserialization_full() {
        let json = r#"{
            "file": "src/app.py",
            "line": 42,
            "comment": "Possible SQL injection",
            "suggestion": "Use parameterized queries",
            "severity": "High",
            "category": "Security"
        }"#;

        let comment: ReviewComment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.file, "src/app.py");
        assert_eq!(comment.line, "42");
        assert_eq!(comment.comment, "Possible SQL injection");
        assert_eq!(comment.suggestion.as_deref(), Some("Use parameterized queries"));
        assert_eq!(comment.severity.as_deref(), Some("High"));
        assert_eq!(comment.category.as_deref(), Some("Security"));
    }

    #[test]
    fn test_review_comment_optional_fields_default_to_none() {
        let json = r#"{"file": "a.py", "line": "3", "comment": "x"}"#;
        let comment: ReviewComment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.suggestion, None);
        assert_eq!(comment.severity, None);
        assert_eq!(comment.category, None);
        assert_eq!(comment.category_label(), "General");
    }

    #[test]
    fn test_line_number_and_string_share_canonical_form() {
        let numeric: ReviewComment =
            serde_json::from_str(r#"{"file": "a.py", "line": 3, "comment": "x"}"#).unwrap();
        let textual: ReviewComment =
            serde_json::from_str(r#"{"file": "a.py", "line": "3", "comment": "x"}"#).unwrap();
        assert_eq!(numeric.line, textual.line);
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let json = r#"{"line": 3, "comment": "x"}"#;
        assert!(serde_json::from_str::<ReviewComment>(json).is_err());
    }

    #[test]
    fn test_classify_severity_known_labels() {
        assert_eq!(Severity::classify(Some("low")), Severity::Low);
        assert_eq!(Severity::classify(Some("medium")), Severity::Medium);
        assert_eq!(Severity::classify(Some("high")), Severity::High);
        assert_eq!(Severity::classify(Some("warning")), Severity::Warning);
        assert_eq!(Severity::classify(Some("minor")), Severity::Minor);
        assert_eq!(Severity::classify(Some("info")), Severity::Info);
    }

    #[test]
    fn test_classify_severity_case_insensitive() {
        assert_eq!(Severity::classify(Some("High")), Severity::High);
        assert_eq!(Severity::classify(Some("WARNING")), Severity::Warning);
        assert_eq!(Severity::classify(Some("  Low  ")), Severity::Low);
    }

    #[test]
    fn test_classify_severity_unknown_falls_back_to_info() {
        assert_eq!(Severity::classify(Some("catastrophic")), Severity::Info);
        assert_eq!(Severity::classify(Some("")), Severity::Info);
        assert_eq!(Severity::classify(None), Severity::Info);
    }
}
