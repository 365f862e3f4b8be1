// ==========================================
// Nesting-Report - 配置管理器
// ==========================================
// 职责: 配置加载、查询、默认值、快照
// 存储: JSON 扁平键值文件 ("分区/键": "值")
// ==========================================
// 分区沿用原打印工具的配置分区:
// Druckeinstellungen / Pfad / Automatisch öffnen
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::report_config::{ReportConfig, DEFAULT_CONVERTER, DEFAULT_LOCALE};
use crate::domain::types::PropertyPolicy;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 环境变量: 显式指定配置文件路径
pub const CONFIG_PATH_ENV: &str = "NESTING_REPORT_CONFIG";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: BTreeMap<String, String>,
}

impl ConfigManager {
    /// 从键值表创建
    pub fn from_values(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// 从配置文件加载；文件不存在时报错
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let raw = fs::read_to_string(path)?;
        let parsed: BTreeMap<String, Value> = serde_json::from_str(&raw)?;

        let mut values = BTreeMap::new();
        for (key, value) in parsed {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(ConfigError::ConfigValueError {
                        key,
                        value: other.to_string(),
                        message: "配置值必须为字符串、布尔或数值".to_string(),
                    })
                }
            };
            values.insert(key, text);
        }

        info!(file = %path.display(), keys = values.len(), "配置文件加载完成");
        Ok(Self { values })
    }

    /// 从配置文件加载；文件不存在时使用全部默认值
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            debug!(file = %path.display(), "配置文件不存在，使用默认配置");
            Ok(Self::default())
        }
    }

    /// 写出默认配置文件（已存在则覆盖）
    pub fn write_defaults(path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&default_values())?;
        fs::write(path, json)?;

        info!(file = %path.display(), "默认配置已写出");
        Ok(())
    }

    /// 读取配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_global_config_value(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// 读取布尔配置
    ///
    /// 接受 1/0, true/false, yes/no, on/off, ja/nein（忽略大小写）
    pub fn get_bool(&self, key: &str, default: bool) -> ConfigResult<bool> {
        let Some(value) = self.get_global_config_value(key) else {
            return Ok(default);
        };

        match value.to_lowercase().as_str() {
            "1" | "true" | "yes" | "y" | "on" | "ja" => Ok(true),
            "0" | "false" | "no" | "n" | "off" | "nein" => Ok(false),
            _ => Err(ConfigError::ConfigValueError {
                key: key.to_string(),
                value,
                message: "无法解析为布尔值".to_string(),
            }),
        }
    }

    /// 读取路径配置
    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get_global_config_value(key).map(PathBuf::from)
    }

    /// 获取所有配置的快照（JSON格式，含默认值）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let mut merged = default_values();
        for (key, value) in &self.values {
            merged.insert(key.clone(), value.clone());
        }
        Ok(serde_json::to_string(&merged)?)
    }

    /// 构建报告配置值对象
    pub fn report_config(&self) -> ConfigResult<ReportConfig> {
        let defaults = ReportConfig::default();

        let policy_raw =
            self.get_config_or_default(config_keys::MISSING_PROPERTY_POLICY, "fail");
        let property_policy = policy_raw.parse::<PropertyPolicy>().map_err(|message| {
            ConfigError::ConfigValueError {
                key: config_keys::MISSING_PROPERTY_POLICY.to_string(),
                value: policy_raw.clone(),
                message,
            }
        })?;

        let locale = self.get_config_or_default(config_keys::LOCALE, DEFAULT_LOCALE);
        if !crate::i18n::is_supported_locale(&locale) {
            return Err(ConfigError::ConfigValueError {
                key: config_keys::LOCALE.to_string(),
                value: locale,
                message: format!("不支持的语言，可选: {:?}", crate::i18n::supported_locales()),
            });
        }

        let browser_path = self.get_path(config_keys::BROWSER_PATH);
        let auto_open = self.get_bool(config_keys::AUTO_OPEN, defaults.auto_open)?;
        if auto_open && browser_path.is_none() {
            warn!("已启用自动打开，但未配置浏览器路径");
        }

        Ok(ReportConfig {
            nice_design: self.get_bool(config_keys::NICE_DESIGN, defaults.nice_design)?,
            remove_color_fill: self
                .get_bool(config_keys::REMOVE_COLOR_FILL, defaults.remove_color_fill)?,
            reports_pdfs_together: self.get_bool(
                config_keys::REPORTS_PDFS_TOGETHER,
                defaults.reports_pdfs_together,
            )?,
            divide_material: self
                .get_bool(config_keys::DIVIDE_MATERIAL, defaults.divide_material)?,
            rotate: self.get_bool(config_keys::ROTATE, defaults.rotate)?,
            delete_folder: self.get_bool(config_keys::DELETE_FOLDER, defaults.delete_folder)?,
            show_warning_delete_folder: self.get_bool(
                config_keys::SHOW_WARNING_DELETE_FOLDER,
                defaults.show_warning_delete_folder,
            )?,
            property_policy,
            locale,
            report_path: self
                .get_path(config_keys::REPORT_PATH)
                .unwrap_or(defaults.report_path),
            logo_path: self.get_path(config_keys::LOGO),
            converter_path: self
                .get_path(config_keys::CONVERTER)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONVERTER)),
            auto_open,
            open_all: self.get_bool(config_keys::OPEN_ALL, defaults.open_all)?,
            browser_path,
        })
    }
}

/// 默认配置键值（写出默认文件 / 快照使用）
pub fn default_values() -> BTreeMap<String, String> {
    let defaults = ReportConfig::default();
    let flag = |b: bool| if b { "1" } else { "0" }.to_string();

    BTreeMap::from([
        (config_keys::NICE_DESIGN.to_string(), flag(defaults.nice_design)),
        (config_keys::REMOVE_COLOR_FILL.to_string(), flag(defaults.remove_color_fill)),
        (
            config_keys::REPORTS_PDFS_TOGETHER.to_string(),
            flag(defaults.reports_pdfs_together),
        ),
        (config_keys::DIVIDE_MATERIAL.to_string(), flag(defaults.divide_material)),
        (config_keys::ROTATE.to_string(), flag(defaults.rotate)),
        (config_keys::DELETE_FOLDER.to_string(), flag(defaults.delete_folder)),
        (
            config_keys::SHOW_WARNING_DELETE_FOLDER.to_string(),
            flag(defaults.show_warning_delete_folder),
        ),
        (
            config_keys::MISSING_PROPERTY_POLICY.to_string(),
            defaults.property_policy.to_string(),
        ),
        (config_keys::LOCALE.to_string(), defaults.locale.clone()),
        (
            config_keys::REPORT_PATH.to_string(),
            defaults.report_path.display().to_string(),
        ),
        (config_keys::LOGO.to_string(), String::new()),
        (config_keys::CONVERTER.to_string(), DEFAULT_CONVERTER.to_string()),
        (config_keys::AUTO_OPEN.to_string(), flag(defaults.auto_open)),
        (config_keys::OPEN_ALL.to_string(), flag(defaults.open_all)),
        (config_keys::BROWSER_PATH.to_string(), String::new()),
    ])
}

/// 默认配置文件路径
///
/// 优先级: 环境变量 NESTING_REPORT_CONFIG > 用户配置目录 > 当前目录
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::config_dir() {
        Some(dir) => dir.join("nesting-report").join("config.json"),
        None => PathBuf::from("./nesting_report_config.json"),
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 打印设置
    pub const NICE_DESIGN: &str = "Druckeinstellungen/nice_design";
    pub const REMOVE_COLOR_FILL: &str = "Druckeinstellungen/remove_color_fill";
    pub const REPORTS_PDFS_TOGETHER: &str = "Druckeinstellungen/reports_pdfs_together";
    pub const DIVIDE_MATERIAL: &str = "Druckeinstellungen/divide_material";
    pub const ROTATE: &str = "Druckeinstellungen/rotate";
    pub const DELETE_FOLDER: &str = "Druckeinstellungen/delete_folder";
    pub const SHOW_WARNING_DELETE_FOLDER: &str = "Druckeinstellungen/show_warning_delete_folder";
    pub const MISSING_PROPERTY_POLICY: &str = "Druckeinstellungen/missing_property_policy";
    pub const LOCALE: &str = "Druckeinstellungen/locale";

    // 路径
    pub const REPORT_PATH: &str = "Pfad/report_pfad";
    pub const LOGO: &str = "Pfad/logo";
    pub const CONVERTER: &str = "Pfad/converter";

    // 自动打开
    pub const AUTO_OPEN: &str = "Automatisch öffnen/auto_open";
    pub const OPEN_ALL: &str = "Automatisch öffnen/open_all";
    pub const BROWSER_PATH: &str = "Automatisch öffnen/browser_path";
}
