// ==========================================
// Nesting-Report - 数据源层
// ==========================================
// 职责: 外部 CAD 系统能力边界（板材枚举、属性、零件、预览图）
// 支持: CAD 导出表（Excel, CSV）
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod sheet_source_trait;
pub mod table_source;

// 重导出核心类型
pub use error::{SourceError, SourceResult};
pub use field_mapper::{FieldMapper, PieceRecord, SheetRecord};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, UniversalFileParser};
pub use sheet_source_trait::SheetSource;
pub use table_source::TableSheetSource;
