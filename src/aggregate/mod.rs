use serde::Serialize;

use crate::models::{ReviewComment, Severity};

/// 按 文件 → 行 → 意见 组织的审查结果
///
/// 文件、行、意见都保持输入中首次出现的顺序，不排序。
/// 用向量而不是映射存桶，插入顺序由结构本身保证。
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct GroupedResults {
    pub files: Vec<FileGroup>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileGroup {
    pub file: String,
    pub lines: Vec<LineGroup>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LineGroup {
    pub line: String,
    pub comments: Vec<ReviewComment>,
}

impl GroupedResults {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// 去重后的意见总数
    pub fn total_comments(&self) -> usize {
        self.files
            .iter()
            .flat_map(|f| &f.lines)
            .map(|l| l.comments.len())
            .sum()
    }

    /// 按分组顺序摊平回一维列表
    pub fn flatten(&self) -> Vec<ReviewComment> {
        self.files
            .iter()
            .flat_map(|f| &f.lines)
            .flat_map(|l| &l.comments)
            .cloned()
            .collect()
    }
}

/// 把扁平的审查意见列表整理成两级分组
///
/// 单趟按序遍历：为每条意见定位或创建文件桶，再定位或创建行桶，
/// 键比较用规范化后的精确相等。同一行桶内
/// (comment, suggestion, severity) 三元组完全相同的意见只保留
/// 第一条，Option 字段按"缺失等于缺失"比较。确定性计算，
/// 去重是桶内线性扫描，规模在几十到几百条意见时足够
pub fn group(comments: &[ReviewComment]) -> GroupedResults {
    let mut grouped = GroupedResults::default();

    for comment in comments {
        let file_idx = match grouped.files.iter().position(|f| f.file == comment.file) {
            Some(idx) => idx,
            None => {
                grouped.files.push(FileGroup {
                    file: comment.file.clone(),
                    lines: Vec::new(),
                });
                grouped.files.len() - 1
            }
        };
        let file_group = &mut grouped.files[file_idx];

        let line_idx = match file_group.lines.iter().position(|l| l.line == comment.line) {
            Some(idx) => idx,
            None => {
                file_group.lines.push(LineGroup {
                    line: comment.line.clone(),
                    comments: Vec::new(),
                });
                file_group.lines.len() - 1
            }
        };
        let line_group = &mut file_group.lines[line_idx];

        let duplicate = line_group.comments.iter().any(|existing| {
            existing.comment == comment.comment
                && existing.suggestion == comment.suggestion
                && existing.severity == comment.severity
        });
        if !duplicate {
            line_group.comments.push(comment.clone());
        }
    }

    grouped
}

/// 严重程度归类，未识别或缺失一律归入 Info
pub fn classify_severity(level: Option<&str>) -> Severity {
    Severity::classify(level)
}
