// ==========================================
// Nesting-Report - HTML 报告渲染
// ==========================================
// 板材报告: 页眉（首页） + 每张板材一页（信息/预览/零件/效率）
// 总报告:   组内板材数 > 1 时输出（并入或单独成文）
// 数值在此处统一保留两位小数
// ==========================================

use crate::config::ReportConfig;
use crate::domain::material::MaterialStats;
use crate::domain::sheet::{SheetDetails, SheetMetrics};
use crate::i18n::{t_in, t_in_with_args};
use crate::report::style::stylesheet;
use std::fmt::Write;
use std::path::Path;

/// 报告日期格式
pub const REPORT_DATE_FORMAT: &str = "%d.%m.%Y";

/// 单张板材的渲染数据
#[derive(Debug, Clone)]
pub struct SheetPage {
    pub metrics: SheetMetrics,
    pub details: SheetDetails,
}

/// 渲染上下文
pub struct RenderContext<'a> {
    pub config: &'a ReportConfig,
    pub project: &'a str,
    pub date: String,
}

impl RenderContext<'_> {
    fn t(&self, key: &str) -> String {
        t_in(&self.config.locale, key)
    }
}

/// HTML 转义
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// 两位小数
pub fn fmt_num(value: f64) -> String {
    format!("{:.2}", value)
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(fmt_num).unwrap_or_else(|| "-".to_string())
}

/// 图片地址：相对路径原样使用（相对报告文件），绝对路径转 file:// URL
fn image_src(path: &Path) -> String {
    if path.is_absolute() {
        let normalized = path.display().to_string().replace('\\', "/");
        format!("file:///{}", normalized.trim_start_matches('/'))
    } else {
        path.display().to_string().replace('\\', "/")
    }
}

// ==========================================
// 文档骨架
// ==========================================

fn write_document_head(out: &mut String, ctx: &RenderContext<'_>) {
    let title = t_in_with_args(&ctx.config.locale, "report.title", &[("project", ctx.project)]);
    let lang = ctx.config.locale.split('-').next().unwrap_or("de");

    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}    </style>
</head>
<body>
"#,
        lang = escape_html(lang),
        title = escape_html(&title),
        css = stylesheet(ctx.config),
    );
}

fn write_document_tail(out: &mut String) {
    out.push_str("</body></html>\n");
}

fn write_header(out: &mut String, ctx: &RenderContext<'_>) {
    let project_stem = Path::new(ctx.project)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| ctx.project.to_string());

    out.push_str(r#"<div class="header">"#);
    if let Some(logo) = &ctx.config.logo_path {
        let _ = write!(
            out,
            r#"<img src="{}" alt="{}">"#,
            escape_html(&image_src(logo)),
            escape_html(&ctx.t("report.logo_alt"))
        );
    }
    let _ = write!(
        out,
        "<span>{}: {}</span></div>\n",
        escape_html(&ctx.t("report.project")),
        escape_html(&project_stem)
    );
}

// ==========================================
// 板材页
// ==========================================

fn write_sheet_page(out: &mut String, ctx: &RenderContext<'_>, page: &SheetPage, index: usize) {
    let metrics = &page.metrics;
    let details = &page.details;

    out.push_str(r#"<div class="table-container"><table id="mainTable""#);
    if index > 0 {
        out.push_str(r#" class="page-break""#);
    }
    out.push_str(">\n");

    // 板材名 + 日期
    let _ = write!(
        out,
        r#"<tr><td class="sheet-name" colspan="6">{}</td><td colspan="4" class="right-align">{}</td></tr>
"#,
        escape_html(metrics.sheet.as_str()),
        escape_html(&ctx.date)
    );

    // 宽 / 高 / 厚 / 材料
    let _ = write!(
        out,
        r#"<tr>
    <td align="middle">{}</td><td align="middle">{}</td>
    <td align="middle">{}</td><td align="middle">{}</td>
    <td align="middle">{}</td><td align="middle">{}</td>
    <td align="middle">{}</td><td align="middle">{}</td>
</tr>
"#,
        escape_html(&ctx.t("report.width")),
        fmt_opt(details.width_mm),
        escape_html(&ctx.t("report.height")),
        fmt_opt(details.height_mm),
        escape_html(&ctx.t("report.thickness")),
        fmt_num(metrics.thickness_mm),
        escape_html(&ctx.t("report.material")),
        escape_html(&metrics.material),
    );

    // 预览图
    match &details.preview {
        Some(preview) => {
            let size = if details.is_wide() {
                r#"width="1200pt""#
            } else {
                r#"height="400pt""#
            };
            let rotated = if ctx.config.rotate { r#" class="rotated""# } else { "" };
            let _ = write!(
                out,
                r#"<tr><td colspan="10"><img src="{}" {}{}></td></tr>
"#,
                escape_html(&image_src(preview)),
                size,
                rotated
            );
        }
        None => {
            let _ = write!(
                out,
                r#"<tr><td colspan="10">{}</td></tr>
"#,
                escape_html(&ctx.t("report.no_preview"))
            );
        }
    }

    // 零件清单
    for (idx, piece) in details.pieces.iter().enumerate() {
        let _ = write!(
            out,
            r#"<tr class="adjustable-table">
    <td align="middle">{}</td><td align="middle">{}</td>
    <td align="middle">{}</td><td align="middle">{}</td>
    <td align="middle">{}</td><td align="middle">{}</td>
    <td align="middle">{}</td><td align="middle">{}</td>
</tr>
"#,
            escape_html(&ctx.t("report.number")),
            idx + 1,
            escape_html(&ctx.t("report.label")),
            escape_html(&piece.label),
            escape_html(&ctx.t("report.width")),
            fmt_opt(piece.width_mm),
            escape_html(&ctx.t("report.height")),
            fmt_opt(piece.height_mm),
        );
    }

    out.push_str("</table>\n");
    write_sheet_efficiency(out, ctx, page);
    out.push_str("</div>\n");
}

fn write_sheet_efficiency(out: &mut String, ctx: &RenderContext<'_>, page: &SheetPage) {
    let m = &page.metrics;
    let _ = write!(
        out,
        r#"<br/><br/>
<table class="adjustable-table">
    <tr><th colspan="3" class="center-text">{title}</th></tr>
    <tr><td>{good_parts}</td><th colspan="2" align="left">{parts}</th></tr>
    <tr><td>{sheet_area}</td><th colspan="2" align="left">{area} m²</th></tr>
    <tr>
        <td class="green">{reusable}</td>
        <td class="green">{reusable_pct}% {of_sheet}</td>
        <td class="green">{reusable_m2} m²</td>
    </tr>
    <tr>
        <td class="grey">{non_reusable}</td>
        <td class="grey">{leftover_pct}% {of_sheet}</td>
        <td class="grey">{leftover_m2} m²</td>
    </tr>
</table>
"#,
        title = escape_html(&ctx.t("report.efficiency")),
        good_parts = escape_html(&ctx.t("report.good_parts")),
        parts = page.details.good_parts(),
        sheet_area = escape_html(&ctx.t("report.sheet_area")),
        area = fmt_num(m.area_m2),
        reusable = escape_html(&ctx.t("report.reusable")),
        reusable_pct = fmt_num(m.reusable_pct),
        reusable_m2 = fmt_num(m.reusable_area_m2()),
        non_reusable = escape_html(&ctx.t("report.non_reusable")),
        leftover_pct = fmt_num(m.leftover_pct),
        leftover_m2 = fmt_num(m.leftover_area_m2()),
        of_sheet = escape_html(&ctx.t("report.of_sheet")),
    );
}

// ==========================================
// 总效率表
// ==========================================

fn write_total_efficiency(out: &mut String, ctx: &RenderContext<'_>, stats: &MaterialStats) {
    let _ = write!(
        out,
        r#"<table class="adjustable-table thick-border">
    <tr><th colspan="3" class="center-text">{title}</th></tr>
    <tr><th align="left">{sheet_count}</th><th colspan="2" align="left">{n}</th></tr>
    <tr><td>{total_area_label}</td><th colspan="2" align="left">{total_area} m²</th></tr>
    <tr>
        <td class="green">{total_reusable_label}</td>
        <th colspan="2" align="left" class="green">{total_reusable} m²</th>
    </tr>
    <tr>
        <td class="grey">{total_non_reusable_label}</td>
        <th colspan="2" align="left" class="grey">{total_non_reusable} m²</th>
    </tr>
    <tr>
        <td class="green">{avg_reusable_label}</td>
        <td class="green">{avg_reusable_pct}%</td>
        <td class="green">{avg_reusable_m2} m²</td>
    </tr>
    <tr>
        <td class="grey">{avg_non_reusable_label}</td>
        <td class="grey">{avg_garbage_pct}%</td>
        <td class="grey">{avg_garbage_m2} m²</td>
    </tr>
</table>
"#,
        title = escape_html(&ctx.t("report.total_title")),
        sheet_count = escape_html(&ctx.t("report.sheet_count")),
        n = stats.number_of_sheets,
        total_area_label = escape_html(&ctx.t("report.total_area")),
        total_area = fmt_num(stats.total_area),
        total_reusable_label = escape_html(&ctx.t("report.total_reusable")),
        total_reusable = fmt_num(stats.total_reusable_material),
        total_non_reusable_label = escape_html(&ctx.t("report.total_non_reusable")),
        total_non_reusable = fmt_num(stats.total_non_reusable_material),
        avg_reusable_label = escape_html(&ctx.t("report.avg_reusable")),
        avg_reusable_pct = fmt_num(stats.average_reusable),
        avg_reusable_m2 = fmt_num(stats.average_reusable_material()),
        avg_non_reusable_label = escape_html(&ctx.t("report.avg_non_reusable")),
        avg_garbage_pct = fmt_num(stats.average_garbage),
        avg_garbage_m2 = fmt_num(stats.average_non_reusable_material()),
    );
}

// ==========================================
// 对外渲染接口
// ==========================================

/// 渲染板材报告
///
/// # 参数
/// - pages: 报告范围内的板材（按顺序）
/// - totals: Some 时在末尾追加总效率表
pub fn render_sheet_report(
    ctx: &RenderContext<'_>,
    pages: &[SheetPage],
    totals: Option<&MaterialStats>,
) -> String {
    let mut out = String::new();
    write_document_head(&mut out, ctx);
    write_header(&mut out, ctx);

    for (index, page) in pages.iter().enumerate() {
        write_sheet_page(&mut out, ctx, page, index);
    }

    if let Some(stats) = totals {
        write_total_efficiency(&mut out, ctx, stats);
    }

    write_document_tail(&mut out);
    out
}

/// 渲染单独的总效率报告
pub fn render_total_report(ctx: &RenderContext<'_>, stats: &MaterialStats) -> String {
    let mut out = String::new();
    write_document_head(&mut out, ctx);
    write_total_efficiency(&mut out, ctx, stats);
    write_document_tail(&mut out);
    out
}
