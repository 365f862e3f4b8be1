// ==========================================
// Nesting-Report - 报告配置值对象
// ==========================================
// 由 ConfigManager 构建后显式传入报告流程，流程内不再读取配置文件
// ==========================================

use crate::domain::types::PropertyPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 默认报告语言
pub const DEFAULT_LOCALE: &str = "de";

/// 默认 HTML→PDF 转换程序（按 PATH 查找）
pub const DEFAULT_CONVERTER: &str = "wkhtmltopdf";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    // ===== 打印设置 =====
    pub nice_design: bool,                // 彩色主题（否则黑白打印主题）
    pub remove_color_fill: bool,          // 去除表格底色（节省墨水）
    pub reports_pdfs_together: bool,      // 总报告并入板材报告
    pub divide_material: bool,            // 按材料与厚度拆分报告
    pub rotate: bool,                     // 预览图竖向显示
    pub delete_folder: bool,              // 覆盖已存在的项目目录
    pub show_warning_delete_folder: bool, // 删除目录时输出警告
    pub property_policy: PropertyPolicy,  // 缺失属性处理策略
    pub locale: String,                   // 报告语言

    // ===== 路径 =====
    pub report_path: PathBuf,
    pub logo_path: Option<PathBuf>,
    pub converter_path: PathBuf,

    // ===== 自动打开 =====
    pub auto_open: bool,
    pub open_all: bool,
    pub browser_path: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            nice_design: false,
            remove_color_fill: false,
            reports_pdfs_together: false,
            divide_material: false,
            rotate: false,
            delete_folder: true,
            show_warning_delete_folder: true,
            property_policy: PropertyPolicy::Fail,
            locale: DEFAULT_LOCALE.to_string(),
            report_path: std::env::temp_dir(),
            logo_path: None,
            converter_path: PathBuf::from(DEFAULT_CONVERTER),
            auto_open: false,
            open_all: false,
            browser_path: None,
        }
    }
}
