// ==========================================
// Nesting-Report - 配置层
// ==========================================
// 职责: 配置文件读取与默认值,构建报告配置值对象
// 存储: JSON 扁平键值文件
// ==========================================

pub mod config_manager;
pub mod error;
pub mod report_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, default_config_path, default_values, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use report_config::ReportConfig;
