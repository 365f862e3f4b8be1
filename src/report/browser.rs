// ==========================================
// Nesting-Report - 自动打开 PDF
// ==========================================
// 以 browser_path 指定的程序打开生成的 PDF
// 打开失败只记录日志，不影响报告结果
// ==========================================

use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{info, warn};

/// 逐个启动浏览器打开 PDF，返回成功启动的数量
///
/// 只启动不等待，浏览器进程由 tokio 在后台回收
pub async fn open_pdfs(browser: &Path, pdfs: &[PathBuf]) -> usize {
    let mut opened = 0;
    for pdf in pdfs {
        match Command::new(browser).arg(pdf).spawn() {
            Ok(_) => {
                info!(pdf = %pdf.display(), "已打开报告");
                opened += 1;
            }
            Err(e) => {
                warn!(
                    browser = %browser.display(),
                    pdf = %pdf.display(),
                    error = %e,
                    "无法打开报告"
                );
            }
        }
    }
    opened
}
