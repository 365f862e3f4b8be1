// ==========================================
// Nesting-Report - 板材属性采集
// ==========================================
// 输入: SheetSource + 板材标识
// 输出: SheetMetrics（统计口径） / SheetDetails（展示信息）
// 红线: 统计属性缺失或非数值时报错，不以 0 代替
// ==========================================

use crate::domain::sheet::{SheetDetails, SheetId, SheetMetrics, SkippedSheet, MM2_PER_M2};
use crate::domain::types::{PropertyPolicy, SheetProperty};
use crate::engine::error::{NestingError, NestingResult, UnavailableReason};
use crate::source::SheetSource;
use tracing::{debug, warn};

/// 采集结果
#[derive(Debug, Clone, Default)]
pub struct CollectedSheets {
    pub metrics: Vec<SheetMetrics>,
    pub skipped: Vec<SkippedSheet>,
}

/// 读取文本属性
pub fn text_property(
    source: &dyn SheetSource,
    sheet: &SheetId,
    property: SheetProperty,
) -> NestingResult<String> {
    source
        .sheet_property(sheet, property)
        .and_then(|v| v.as_text())
        .ok_or_else(|| NestingError::PropertyUnavailable {
            sheet: sheet.clone(),
            property,
            reason: UnavailableReason::Missing,
        })
}

/// 读取数值属性
pub fn numeric_property(
    source: &dyn SheetSource,
    sheet: &SheetId,
    property: SheetProperty,
) -> NestingResult<f64> {
    let value = source
        .sheet_property(sheet, property)
        .ok_or_else(|| NestingError::PropertyUnavailable {
            sheet: sheet.clone(),
            property,
            reason: UnavailableReason::Missing,
        })?;

    value.as_number().ok_or_else(|| NestingError::PropertyUnavailable {
        sheet: sheet.clone(),
        property,
        reason: UnavailableReason::NonNumeric(value.as_text().unwrap_or_default()),
    })
}

/// 读取单张板材的统计口径
pub fn read_sheet_metrics(source: &dyn SheetSource, sheet: &SheetId) -> NestingResult<SheetMetrics> {
    let material = text_property(source, sheet, SheetProperty::Material)?;
    let thickness_mm = numeric_property(source, sheet, SheetProperty::Thickness)?;
    let area_mm2 = numeric_property(source, sheet, SheetProperty::Area)?;
    let reusable_pct = numeric_property(source, sheet, SheetProperty::RateReusable)?;
    let leftover_pct = numeric_property(source, sheet, SheetProperty::RateLeftover)?;

    if reusable_pct + leftover_pct > 100.0 {
        warn!(
            sheet = %sheet,
            reusable_pct,
            leftover_pct,
            "可复用率与废料率之和超过 100%"
        );
    }

    Ok(SheetMetrics {
        sheet: sheet.clone(),
        material,
        thickness_mm,
        area_m2: area_mm2 / MM2_PER_M2,
        reusable_pct,
        leftover_pct,
    })
}

/// 按顺序采集板材统计口径
///
/// # 策略
/// - Fail: 遇到第一个不可用属性即返回错误
/// - Skip: 跳过该板材并记录原因
pub fn collect_sheet_metrics(
    source: &dyn SheetSource,
    sheets: &[SheetId],
    policy: PropertyPolicy,
) -> NestingResult<CollectedSheets> {
    let mut collected = CollectedSheets::default();

    for sheet in sheets {
        match read_sheet_metrics(source, sheet) {
            Ok(metrics) => collected.metrics.push(metrics),
            Err(NestingError::PropertyUnavailable {
                sheet,
                property,
                reason,
            }) if policy == PropertyPolicy::Skip => {
                warn!(sheet = %sheet, property = %property, reason = %reason, "板材属性不可用，已跳过");
                collected.skipped.push(SkippedSheet {
                    sheet,
                    property,
                    reason: reason.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        collected = collected.metrics.len(),
        skipped = collected.skipped.len(),
        "板材属性采集完成"
    );

    Ok(collected)
}

/// 读取展示用信息；缺失值保持 None
pub fn read_sheet_details(source: &dyn SheetSource, sheet: &SheetId) -> SheetDetails {
    let number = |property| {
        source
            .sheet_property(sheet, property)
            .and_then(|v| v.as_number())
    };

    SheetDetails {
        width_mm: number(SheetProperty::Width),
        height_mm: number(SheetProperty::Height),
        pieces_number: number(SheetProperty::PiecesNumber),
        pieces: source.pieces(sheet),
        preview: source.preview_image(sheet),
    }
}
