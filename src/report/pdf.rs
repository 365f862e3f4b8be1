// ==========================================
// Nesting-Report - HTML → PDF 转换
// ==========================================
// 外部转换程序（默认 wkhtmltopdf），每个文档一个子进程
// 多个文档并发转换，单个失败不影响其他文档
// ==========================================

use crate::report::error::{ReportError, ReportResult};
use async_trait::async_trait;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

// ==========================================
// PdfConverter Trait
// ==========================================
#[async_trait]
pub trait PdfConverter: Send + Sync {
    /// 将 html 转换为 pdf
    ///
    /// # 错误
    /// - ConverterSpawn: 程序无法启动
    /// - ConverterExit: 程序返回非零退出码
    async fn convert(&self, html: &Path, pdf: &Path) -> ReportResult<()>;
}

// ==========================================
// WkhtmltopdfConverter
// ==========================================
pub struct WkhtmltopdfConverter {
    executable: PathBuf,
}

impl WkhtmltopdfConverter {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

#[async_trait]
impl PdfConverter for WkhtmltopdfConverter {
    async fn convert(&self, html: &Path, pdf: &Path) -> ReportResult<()> {
        debug!(html = %html.display(), pdf = %pdf.display(), "开始 PDF 转换");

        let status = Command::new(&self.executable)
            .arg("--enable-local-file-access")
            .arg("--quiet")
            .arg(html)
            .arg(pdf)
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ReportError::ConverterSpawn {
                executable: self.executable.display().to_string(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(ReportError::ConverterExit {
                html: html.display().to_string(),
                code: status.code().unwrap_or(-1),
            });
        }
        Ok(())
    }
}

// ==========================================
// 批量转换
// ==========================================

/// 单个转换任务
#[derive(Debug, Clone, PartialEq)]
pub struct PdfJob {
    pub html: PathBuf,
    pub pdf: PathBuf,
}

/// 转换结果
#[derive(Debug)]
pub struct PdfOutcome {
    pub job: PdfJob,
    pub result: ReportResult<()>,
}

impl PdfOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// 并发执行全部转换任务，结果顺序与输入一致
pub async fn convert_all(converter: &dyn PdfConverter, jobs: Vec<PdfJob>) -> Vec<PdfOutcome> {
    let tasks = jobs.into_iter().map(|job| async move {
        let result = converter.convert(&job.html, &job.pdf).await;
        if let Err(e) = &result {
            warn!(html = %job.html.display(), error = %e, "PDF 转换失败");
        }
        PdfOutcome { job, result }
    });
    join_all(tasks).await
}
