// ==========================================
// Nesting-Report - 领域类型定义
// ==========================================
// 板材属性枚举 / 属性值 / 缺失属性处理策略
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 板材属性 (Sheet Property)
// ==========================================
// 对应 CAD 系统可查询的板材属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SheetProperty {
    Material,     // 材料
    Thickness,    // 厚度（mm）
    Area,         // 面积（mm²）
    RateReusable, // 可复用余料率（%）
    RateLeftover, // 废料率（%）
    PiecesNumber, // 合格零件数
    Width,        // 宽度（mm）
    Height,       // 高度（mm）
}

impl fmt::Display for SheetProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetProperty::Material => write!(f, "MATERIAL"),
            SheetProperty::Thickness => write!(f, "THICKNESS"),
            SheetProperty::Area => write!(f, "AREA"),
            SheetProperty::RateReusable => write!(f, "RATE_REUSABLE"),
            SheetProperty::RateLeftover => write!(f, "RATE_LEFT_OVER"),
            SheetProperty::PiecesNumber => write!(f, "PIECES_NUMBER"),
            SheetProperty::Width => write!(f, "WIDTH"),
            SheetProperty::Height => write!(f, "HEIGHT"),
        }
    }
}

// ==========================================
// 属性值 (Property Value)
// ==========================================
// 外部系统返回的原始值，数值化由引擎层负责
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
}

impl PropertyValue {
    /// 尝试解析为有限浮点数
    ///
    /// 文本值允许前后空白和小数逗号（如 "3,5"）
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            PropertyValue::Number(v) => *v,
            PropertyValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.replace(',', ".").parse::<f64>().ok()?
            }
        };

        if value.is_finite() {
            Some(value)
        } else {
            None
        }
    }

    /// 转为文本；空文本视为缺失
    pub fn as_text(&self) -> Option<String> {
        match self {
            PropertyValue::Number(v) => Some(v.to_string()),
            PropertyValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Number(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::Text(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::Text(v)
    }
}

// ==========================================
// 缺失属性处理策略 (Missing Property Policy)
// ==========================================
// Fail: 任一板材属性不可用即中止
// Skip: 跳过该板材（记录到汇总中），其余板材照常统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyPolicy {
    #[default]
    Fail,
    Skip,
}

impl fmt::Display for PropertyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyPolicy::Fail => write!(f, "fail"),
            PropertyPolicy::Skip => write!(f, "skip"),
        }
    }
}

impl std::str::FromStr for PropertyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail" | "fail-fast" | "fail_fast" => Ok(PropertyPolicy::Fail),
            "skip" => Ok(PropertyPolicy::Skip),
            other => Err(format!("未知的缺失属性策略: {}", other)),
        }
    }
}
