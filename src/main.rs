// ==========================================
// Nesting-Report - 命令行入口
// ==========================================
// run:         生成 HTML/PDF 报告
// stats:       只输出分组统计（JSON）
// init-config: 写入默认配置文件
// show-config: 输出生效配置（默认值 + 文件值）
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use nesting_report::config::{default_config_path, ConfigManager};
use nesting_report::report::{compute_statistics, ReportOptions, ReportService, WkhtmltopdfConverter};
use nesting_report::{logging, TableSheetSource};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "nesting-report", version)]
#[command(about = "Material efficiency reports for nested sheets", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the HTML/PDF report for a nesting job
    Run {
        /// Sheet table exported from the CAD system (.csv, .xlsx, .xls)
        #[arg(long)]
        sheets: PathBuf,
        /// Optional piece table (one row per nested piece)
        #[arg(long)]
        pieces: Option<PathBuf>,
        /// Configuration file (default: OS config dir)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Project name (default: sheets file name)
        #[arg(long)]
        project: Option<String>,
        /// One report per material and thickness
        #[arg(long)]
        divide_material: bool,
        /// Write HTML only, skip PDF conversion
        #[arg(long)]
        no_pdf: bool,
        /// Report language (de, en, zh-CN)
        #[arg(long)]
        locale: Option<String>,
    },
    /// Print grouped material statistics as JSON
    Stats {
        /// Sheet table exported from the CAD system
        #[arg(long)]
        sheets: PathBuf,
        /// Configuration file (default: OS config dir)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Group by material and thickness
        #[arg(long)]
        divide_material: bool,
    },
    /// Write the default configuration file
    InitConfig {
        /// Target file (default: OS config dir)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration (defaults merged with the file) as JSON
    ShowConfig {
        /// Configuration file (default: OS config dir)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.json_log).map_err(|e| anyhow!("日志初始化失败: {}", e))?;

    tracing::debug!("{} {}", nesting_report::APP_NAME, nesting_report::VERSION);

    match cli.command {
        Commands::Run {
            sheets,
            pieces,
            config,
            project,
            divide_material,
            no_pdf,
            locale,
        } => {
            run_report(
                &sheets,
                pieces.as_deref(),
                config,
                project,
                divide_material,
                no_pdf,
                locale,
            )
            .await
        }
        Commands::Stats {
            sheets,
            config,
            divide_material,
        } => show_stats(&sheets, config, divide_material),
        Commands::InitConfig { config } => init_config(config),
        Commands::ShowConfig { config } => show_config(config),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<ConfigManager> {
    let path = path.unwrap_or_else(default_config_path);
    ConfigManager::load_or_default(&path)
        .with_context(|| format!("无法加载配置文件 {}", path.display()))
}

async fn run_report(
    sheets: &Path,
    pieces: Option<&Path>,
    config: Option<PathBuf>,
    project: Option<String>,
    divide_material: bool,
    no_pdf: bool,
    locale: Option<String>,
) -> Result<()> {
    let mut report_config = load_config(config)?.report_config()?;
    report_config.divide_material |= divide_material;
    if let Some(locale) = locale {
        if !nesting_report::i18n::is_supported_locale(&locale) {
            bail!("不支持的报告语言: {}", locale);
        }
        report_config.locale = locale;
    }

    let source = TableSheetSource::from_files(sheets, pieces)
        .with_context(|| format!("无法读取板材表 {}", sheets.display()))?;

    let service = ReportService::new(Box::new(WkhtmltopdfConverter::new(
        report_config.converter_path.clone(),
    )));
    let options = ReportOptions {
        project,
        sheets_file: Some(sheets.to_path_buf()),
        convert_pdf: !no_pdf,
    };

    let summary = service.run(&report_config, &source, &options).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if !summary.is_complete() {
        bail!(
            "{} 个文档 PDF 转换失败",
            summary.conversion_failures.len()
        );
    }
    Ok(())
}

fn show_stats(sheets: &Path, config: Option<PathBuf>, divide_material: bool) -> Result<()> {
    let report_config = load_config(config)?.report_config()?;
    let source = TableSheetSource::from_files(sheets, None)
        .with_context(|| format!("无法读取板材表 {}", sheets.display()))?;

    let stats = compute_statistics(
        &source,
        report_config.property_policy,
        divide_material || report_config.divide_material,
    )?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn init_config(config: Option<PathBuf>) -> Result<()> {
    let path = config.unwrap_or_else(default_config_path);
    ConfigManager::write_defaults(&path)
        .with_context(|| format!("无法写入配置文件 {}", path.display()))?;
    tracing::info!(path = %path.display(), "默认配置已写入");
    Ok(())
}

fn show_config(config: Option<PathBuf>) -> Result<()> {
    let manager = load_config(config)?;
    // 先校验，再输出
    manager.report_config()?;
    println!("{}", manager.get_config_snapshot()?);
    Ok(())
}
