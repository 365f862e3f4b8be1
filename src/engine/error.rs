// ==========================================
// Nesting-Report - 引擎层错误类型
// ==========================================

use crate::domain::sheet::SheetId;
use crate::domain::types::SheetProperty;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 属性不可用的原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnavailableReason {
    Missing,
    NonNumeric(String),
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::Missing => write!(f, "属性缺失"),
            UnavailableReason::NonNumeric(raw) => write!(f, "非数值: {:?}", raw),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NestingError {
    /// 板材属性缺失或非数值，不以 0 代替
    #[error("板材属性不可用: sheet={sheet}, property={property} ({reason})")]
    PropertyUnavailable {
        sheet: SheetId,
        property: SheetProperty,
        reason: UnavailableReason,
    },

    #[error("材料分组为空，无法计算统计")]
    EmptyGroup,
}

pub type NestingResult<T> = Result<T, NestingError>;
