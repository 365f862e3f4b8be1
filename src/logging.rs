// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别，可选 JSON 输出
// ==========================================

use std::error::Error;
use tracing_subscriber::{fmt, EnvFilter};

/// 默认日志过滤器
pub const DEFAULT_FILTER: &str = "info";

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=nesting_report=trace
///
/// # 参数
/// - json: 以 JSON 行输出（便于采集）
///
/// # 错误
/// 全局 subscriber 已被设置时返回错误
///
/// # 示例
/// ```no_run
/// use nesting_report::logging;
/// logging::init(false).expect("日志初始化失败");
/// ```
pub fn init(json: bool) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // 日志写入 stderr，stdout 留给 JSON 结果
    if json {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .try_init()
    }
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("nesting_report=debug"))
        .with_test_writer()
        .try_init();
}
