// ==========================================
// Nesting-Report - 运行结果摘要
// ==========================================
// run 命令返回 ReportSummary，stats 命令返回 StatisticsReport
// 均可序列化为 JSON 供 CLI 输出
// ==========================================

use crate::domain::material::MaterialStats;
use crate::domain::sheet::{SheetId, SkippedSheet};
use crate::report::naming::ReportScope;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// 单个范围的统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeStatistics {
    pub scope: ReportScope,
    pub sheets: Vec<SheetId>,
    pub stats: MaterialStats,
}

/// stats 命令结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub scopes: Vec<ScopeStatistics>,
    pub skipped: Vec<SkippedSheet>,
}

/// 单个范围的输出文件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeReport {
    pub scope: ReportScope,
    pub sheets: Vec<SheetId>,
    pub stats: MaterialStats,
    pub html: PathBuf,
    pub pdf: Option<PathBuf>,         // 转换成功后才有值
    pub total_html: Option<PathBuf>,  // 单独总报告
    pub total_pdf: Option<PathBuf>,
}

/// PDF 转换失败记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionFailure {
    pub html: PathBuf,
    pub message: String,
}

/// run 命令结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub run_id: Uuid,
    pub project: String,
    pub folder: PathBuf,
    pub generated_at: DateTime<Local>,
    pub scopes: Vec<ScopeReport>,
    pub skipped: Vec<SkippedSheet>,
    pub conversion_failures: Vec<ConversionFailure>,
}

impl ReportSummary {
    /// 板材报告 PDF
    pub fn sheet_pdfs(&self) -> Vec<PathBuf> {
        self.scopes.iter().filter_map(|s| s.pdf.clone()).collect()
    }

    /// 单独总报告 PDF
    pub fn total_pdfs(&self) -> Vec<PathBuf> {
        self.scopes.iter().filter_map(|s| s.total_pdf.clone()).collect()
    }

    /// 自动打开的 PDF 列表
    ///
    /// open_all 时打开全部；否则只打开总报告，没有总报告时打开板材报告
    pub fn pdfs_to_open(&self, open_all: bool) -> Vec<PathBuf> {
        if open_all {
            let mut all = Vec::new();
            for scope in &self.scopes {
                all.extend(scope.pdf.clone());
                all.extend(scope.total_pdf.clone());
            }
            return all;
        }

        let totals = self.total_pdfs();
        if totals.is_empty() {
            self.sheet_pdfs()
        } else {
            totals
        }
    }

    pub fn is_complete(&self) -> bool {
        self.conversion_failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope_report(name: &str, with_total: bool) -> ScopeReport {
        ScopeReport {
            scope: ReportScope::All,
            sheets: vec![SheetId::new("S1")],
            stats: MaterialStats {
                number_of_sheets: 1,
                total_area: 1.0,
                total_reusable: 50.0,
                total_garbage: 50.0,
                average_reusable: 50.0,
                average_garbage: 50.0,
                total_reusable_material: 0.5,
                total_non_reusable_material: 0.5,
            },
            html: PathBuf::from(format!("{}.html", name)),
            pdf: Some(PathBuf::from(format!("{}.pdf", name))),
            total_html: None,
            total_pdf: with_total.then(|| PathBuf::from(format!("{}_total_report.pdf", name))),
        }
    }

    fn summary(scopes: Vec<ScopeReport>) -> ReportSummary {
        ReportSummary {
            run_id: Uuid::new_v4(),
            project: "job42".to_string(),
            folder: PathBuf::from("/tmp/Report_new/job42"),
            generated_at: Local::now(),
            scopes,
            skipped: vec![],
            conversion_failures: vec![],
        }
    }

    #[test]
    fn test_open_only_totals_by_default() {
        let s = summary(vec![scope_report("a", true), scope_report("b", false)]);
        assert_eq!(s.pdfs_to_open(false), vec![PathBuf::from("a_total_report.pdf")]);
        assert_eq!(s.pdfs_to_open(true).len(), 3);
    }

    #[test]
    fn test_open_sheet_reports_without_totals() {
        let s = summary(vec![scope_report("a", false)]);
        assert_eq!(s.pdfs_to_open(false), vec![PathBuf::from("a.pdf")]);
    }

    #[test]
    fn test_summary_serializes() {
        let json = serde_json::to_string(&summary(vec![scope_report("a", false)])).unwrap();
        assert!(json.contains("\"project\":\"job42\""));
        assert!(json.contains("\"number_of_sheets\":1"));
    }
}
