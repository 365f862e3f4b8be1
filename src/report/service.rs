// ==========================================
// Nesting-Report - 报告编排服务
// ==========================================
// 流程: 项目名 → 属性采集（策略） → 范围划分 → 统计
//       → 输出目录 → 预览图 → HTML → PDF（并发） → 自动打开
// 红线: 配置以 ReportConfig 显式传入，流程内不读取全局状态
// ==========================================

use crate::config::ReportConfig;
use crate::domain::material::MaterialStats;
use crate::domain::sheet::{SheetId, SheetMetrics, SkippedSheet};
use crate::domain::types::PropertyPolicy;
use crate::engine::{collect_sheet_metrics, read_sheet_details, MaterialStatsAggregator, SheetGrouper};
use crate::report::browser::open_pdfs;
use crate::report::error::{ReportError, ReportResult};
use crate::report::folder::{copy_preview, prepare_output_folder, write_file};
use crate::report::html::{
    render_sheet_report, render_total_report, RenderContext, SheetPage, REPORT_DATE_FORMAT,
};
use crate::report::naming::{
    project_stem, resolve_project_name, sanitize_filename, unique_stem, ReportScope,
};
use crate::report::pdf::{convert_all, PdfConverter, PdfJob};
use crate::report::summary::{
    ConversionFailure, ReportSummary, ScopeReport, ScopeStatistics, StatisticsReport,
};
use crate::source::SheetSource;
use chrono::Local;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// 单次运行参数
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub project: Option<String>,
    pub sheets_file: Option<PathBuf>,
    pub convert_pdf: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            project: None,
            sheets_file: None,
            convert_pdf: true,
        }
    }
}

/// 划分后的报告范围（含统计）
struct ScopedSheets {
    scope: ReportScope,
    sheets: Vec<SheetMetrics>,
    stats: MaterialStats,
}

// ==========================================
// 范围划分与统计
// ==========================================

fn build_scopes(
    source: &dyn SheetSource,
    policy: PropertyPolicy,
    divide_material: bool,
) -> ReportResult<(Vec<ScopedSheets>, Vec<SkippedSheet>)> {
    let sheet_ids = source.sheets();
    if sheet_ids.is_empty() {
        return Err(ReportError::NoSheets);
    }

    let aggregator = MaterialStatsAggregator::new();
    let mut scopes = Vec::new();

    let skipped = if divide_material {
        let outcome = SheetGrouper::new().group_sheets(source, &sheet_ids, policy)?;
        for group in outcome.groups {
            let stats = aggregator.aggregate_group(&group)?;
            scopes.push(ScopedSheets {
                scope: ReportScope::Material(group.key),
                sheets: group.sheets,
                stats,
            });
        }
        outcome.skipped
    } else {
        let collected = collect_sheet_metrics(source, &sheet_ids, policy)?;
        if !collected.metrics.is_empty() {
            let stats = aggregator.aggregate(&collected.metrics)?;
            scopes.push(ScopedSheets {
                scope: ReportScope::All,
                sheets: collected.metrics,
                stats,
            });
        }
        collected.skipped
    };

    if scopes.is_empty() {
        return Err(ReportError::NoSheets);
    }
    Ok((scopes, skipped))
}

/// 只计算统计，不写文件
pub fn compute_statistics(
    source: &dyn SheetSource,
    policy: PropertyPolicy,
    divide_material: bool,
) -> ReportResult<StatisticsReport> {
    let (scopes, skipped) = build_scopes(source, policy, divide_material)?;
    Ok(StatisticsReport {
        scopes: scopes
            .into_iter()
            .map(|s| ScopeStatistics {
                scope: s.scope,
                sheets: s.sheets.into_iter().map(|m| m.sheet).collect(),
                stats: s.stats,
            })
            .collect(),
        skipped,
    })
}

// ==========================================
// ReportService
// ==========================================
pub struct ReportService {
    converter: Box<dyn PdfConverter>,
}

impl ReportService {
    pub fn new(converter: Box<dyn PdfConverter>) -> Self {
        Self { converter }
    }

    /// 生成报告
    ///
    /// # 错误
    /// - NoSheets: 数据源为空或全部板材被跳过
    /// - Nesting: Fail 策略下属性不可用
    /// - FolderError / WriteError: 文件系统失败
    ///
    /// PDF 转换失败不返回错误，记录在 ReportSummary::conversion_failures
    pub async fn run(
        &self,
        config: &ReportConfig,
        source: &dyn SheetSource,
        options: &ReportOptions,
    ) -> ReportResult<ReportSummary> {
        let run_id = Uuid::new_v4();
        let span = info_span!("report_run", run_id = %run_id);
        self.run_inner(run_id, config, source, options)
            .instrument(span)
            .await
    }

    async fn run_inner(
        &self,
        run_id: Uuid,
        config: &ReportConfig,
        source: &dyn SheetSource,
        options: &ReportOptions,
    ) -> ReportResult<ReportSummary> {
        let now = Local::now();
        let project = resolve_project_name(
            options.project.as_deref(),
            options.sheets_file.as_deref(),
            now,
        );
        let stem = project_stem(&project, now);
        info!(project = %project, divide_material = config.divide_material, "开始生成报告");

        let (scopes, skipped) =
            build_scopes(source, config.property_policy, config.divide_material)?;

        let folder = prepare_output_folder(config, &stem)?;
        let ctx = RenderContext {
            config,
            project: &project,
            date: now.format(REPORT_DATE_FORMAT).to_string(),
        };

        let mut previews = PreviewFiles::default();
        let mut taken_stems = HashSet::new();
        let mut reports = Vec::with_capacity(scopes.len());
        let mut jobs = Vec::new();

        for scoped in scopes {
            let pages: Vec<SheetPage> = scoped
                .sheets
                .iter()
                .map(|metrics| {
                    let mut details = read_sheet_details(source, &metrics.sheet);
                    details.preview = details
                        .preview
                        .take()
                        .and_then(|p| local_preview(&folder, &metrics.sheet, &p, &mut previews));
                    SheetPage {
                        metrics: metrics.clone(),
                        details,
                    }
                })
                .collect();

            let separate_total = scoped.stats.number_of_sheets > 1 && !config.reports_pdfs_together;
            let appended_total =
                (scoped.stats.number_of_sheets > 1 && config.reports_pdfs_together).then_some(&scoped.stats);

            let names = scoped.scope.file_names(&stem, &mut taken_stems);
            let html_path = folder.join(&names.html);
            write_file(&html_path, &render_sheet_report(&ctx, &pages, appended_total))?;
            let pdf_path = folder.join(&names.pdf);
            jobs.push(PdfJob {
                html: html_path.clone(),
                pdf: pdf_path.clone(),
            });

            let mut total_html = None;
            let mut total_pdf = None;
            if separate_total {
                let total_stem = &names.total_stem;
                let path = folder.join(format!("{}.html", total_stem));
                write_file(&path, &render_total_report(&ctx, &scoped.stats))?;
                let pdf = folder.join(format!("{}.pdf", total_stem));
                jobs.push(PdfJob {
                    html: path.clone(),
                    pdf: pdf.clone(),
                });
                total_html = Some(path);
                total_pdf = Some(pdf);
            }

            info!(
                scope = %html_path.display(),
                sheets = scoped.stats.number_of_sheets,
                "报告 HTML 已写入"
            );

            reports.push(ScopeReport {
                scope: scoped.scope,
                sheets: scoped.sheets.into_iter().map(|m| m.sheet).collect(),
                stats: scoped.stats,
                html: html_path,
                pdf: Some(pdf_path),
                total_html,
                total_pdf,
            });
        }

        let mut conversion_failures = Vec::new();
        if options.convert_pdf {
            let outcomes = convert_all(self.converter.as_ref(), jobs).await;
            for outcome in outcomes {
                if let Err(e) = outcome.result {
                    clear_pdf(&mut reports, &outcome.job.pdf);
                    conversion_failures.push(ConversionFailure {
                        html: outcome.job.html,
                        message: e.to_string(),
                    });
                }
            }
        } else {
            for report in &mut reports {
                report.pdf = None;
                report.total_pdf = None;
            }
        }

        let summary = ReportSummary {
            run_id,
            project,
            folder,
            generated_at: now,
            scopes: reports,
            skipped,
            conversion_failures,
        };

        if config.auto_open {
            match &config.browser_path {
                Some(browser) => {
                    open_pdfs(browser, &summary.pdfs_to_open(config.open_all)).await;
                }
                None => warn!("已启用自动打开，但未配置浏览器路径"),
            }
        }

        info!(
            folder = %summary.folder.display(),
            scopes = summary.scopes.len(),
            skipped = summary.skipped.len(),
            failures = summary.conversion_failures.len(),
            "报告生成完成"
        );

        Ok(summary)
    }
}

/// 本次运行已复制的预览图
///
/// 同一源文件只复制一次；目标文件名取自板材 ID，净化后重名时追加序号
#[derive(Default)]
struct PreviewFiles {
    by_source: HashMap<PathBuf, PathBuf>,
    taken: HashSet<String>,
}

/// 预览图复制到输出目录；失败时去掉预览并记录日志
fn local_preview(
    folder: &Path,
    sheet: &SheetId,
    source: &Path,
    previews: &mut PreviewFiles,
) -> Option<PathBuf> {
    if let Some(rel) = previews.by_source.get(source) {
        return Some(rel.clone());
    }
    let file_stem = unique_stem(sanitize_filename(sheet.as_str(), "preview"), &mut previews.taken);
    match copy_preview(folder, source, &file_stem) {
        Ok(rel) => {
            previews.by_source.insert(source.to_path_buf(), rel.clone());
            Some(rel)
        }
        Err(e) => {
            warn!(sheet = %sheet, error = %e, "预览图不可用");
            None
        }
    }
}

fn clear_pdf(reports: &mut [ScopeReport], pdf: &Path) {
    for report in reports {
        if report.pdf.as_deref() == Some(pdf) {
            report.pdf = None;
        }
        if report.total_pdf.as_deref() == Some(pdf) {
            report.total_pdf = None;
        }
    }
}
