// ==========================================
// Nesting-Report - 报告命名规则
// ==========================================
// 项目名 / 文件名净化 / 各报告范围的文件名
// ==========================================

use crate::domain::material::MaterialGroupKey;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// 项目名缺失时的时间戳格式
pub const PROJECT_TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H-%M";

// ==========================================
// ReportScope - 报告范围
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReportScope {
    /// 全部板材一份报告
    All,
    /// 按材料与厚度拆分后的单组报告
    Material(MaterialGroupKey),
}

/// 单个范围的输出文件名
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeFileNames {
    pub html: String,
    pub pdf: String,
    pub total_stem: String, // 单独总报告（不含扩展名）
}

impl ReportScope {
    /// 计算输出文件名
    ///
    /// 不同分组净化后可能得到相同主干，taken 记录本次运行已占用的主干，
    /// 重复时追加 _2、_3 ...
    pub fn file_names(&self, project_stem: &str, taken: &mut HashSet<String>) -> ScopeFileNames {
        match self {
            ReportScope::All => ScopeFileNames {
                html: "report.html".to_string(),
                pdf: "report.pdf".to_string(),
                total_stem: "total_report".to_string(),
            },
            ReportScope::Material(key) => {
                let stem = unique_stem(group_file_stem(key), taken);
                ScopeFileNames {
                    html: format!("{}.html", stem),
                    pdf: format!("{}_{}.pdf", stem, project_stem),
                    total_stem: format!("{}_total_report", stem),
                }
            }
        }
    }
}

/// 返回未被占用的主干并登记；比较忽略大小写
pub fn unique_stem(stem: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(stem.to_lowercase()) {
        return stem;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", stem, n);
        if taken.insert(candidate.to_lowercase()) {
            return candidate;
        }
        n += 1;
    }
}

/// 分组文件名主干: <材料>_<厚度>
pub fn group_file_stem(key: &MaterialGroupKey) -> String {
    sanitize_filename(&key.to_string(), "material")
}

/// 净化文件名：保留字母数字（含非 ASCII 字母）、'-'、'_'、'.'，其余替换为 '_'
///
/// 首尾的 '.'、'_'、'-' 会被去掉，结果为空时返回 fallback
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let replaced: String = name
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || ch == '-' || ch == '_' || ch == '.' {
                ch
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = replaced.trim_matches(|c: char| c == '.' || c == '_' || c == '-');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// 确定项目名
///
/// 优先级: 显式项目名 > 板材表文件名 > 时间戳
pub fn resolve_project_name(
    explicit: Option<&str>,
    sheets_file: Option<&Path>,
    now: DateTime<Local>,
) -> String {
    let from_explicit = explicit
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let from_file = || {
        sheets_file
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().trim().to_string())
            .filter(|s| !s.is_empty())
    };

    from_explicit
        .or_else(from_file)
        .unwrap_or_else(|| now.format(PROJECT_TIMESTAMP_FORMAT).to_string())
}

/// 项目名主干（去扩展名并净化），用于目录与 PDF 文件名
pub fn project_stem(project: &str, now: DateTime<Local>) -> String {
    let stem = Path::new(project)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| project.to_string());
    let fallback = now.format(PROJECT_TIMESTAMP_FORMAT).to_string();
    sanitize_filename(&stem, &fallback)
}
