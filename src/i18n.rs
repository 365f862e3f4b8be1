// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 报告文字支持德语（默认）、英文、中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 报告渲染显式传入语言，不依赖全局语言设置
// ==========================================

/// 可用语言列表
pub fn supported_locales() -> Vec<&'static str> {
    rust_i18n::available_locales!()
}

/// 是否为可用语言
pub fn is_supported_locale(locale: &str) -> bool {
    supported_locales().iter().any(|l| *l == locale)
}

/// 按指定语言翻译
///
/// # 示例
/// ```no_run
/// use nesting_report::i18n::t_in;
/// let label = t_in("de", "report.width");
/// ```
pub fn t_in(locale: &str, key: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 按指定语言翻译（带参数）
///
/// 占位符格式: %{name}
pub fn t_in_with_args(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = t_in(locale, key);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_locales() {
        assert!(is_supported_locale("de"));
        assert!(is_supported_locale("en"));
        assert!(is_supported_locale("zh-CN"));
        assert!(!is_supported_locale("fr"));
    }

    #[test]
    fn test_translate_by_locale() {
        assert_eq!(t_in("de", "report.width"), "Breite");
        assert_eq!(t_in("en", "report.width"), "Width");
        assert_eq!(t_in("zh-CN", "report.width"), "宽度");
    }

    #[test]
    fn test_translate_with_args() {
        let title = t_in_with_args("de", "report.title", &[("project", "Auftrag-7")]);
        assert_eq!(title, "Nesting-Report für Auftrag-7");
    }
}
