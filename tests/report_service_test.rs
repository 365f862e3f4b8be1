// ==========================================
// ReportService 集成测试
// ==========================================
// 测试目标: 目录结构、文件命名、总报告并入/拆分、PDF 转换失败隔离
// ==========================================


use async_trait::async_trait;
use nesting_report::config::ReportConfig;
use nesting_report::domain::{PropertyPolicy, SheetProperty};
use nesting_report::report::{
    PdfConverter, ReportError, ReportOptions, ReportResult, ReportScope, ReportService,
};
use nesting_report::TableSheetSource;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use test_helpers::{write_pieces_csv, write_sheets_csv, MemorySheetSource, SheetRow};

// ==========================================
// 测试用转换器
// ==========================================

/// 写出占位 PDF；文件名包含 fail_marker 时返回失败
struct FakeConverter {
    fail_marker: Option<&'static str>,
}

#[async_trait]
impl PdfConverter for FakeConverter {
    async fn convert(&self, html: &Path, pdf: &Path) -> ReportResult<()> {
        let name = html.file_name().unwrap().to_string_lossy().to_string();
        if let Some(marker) = self.fail_marker {
            if name.contains(marker) {
                return Err(ReportError::ConverterExit {
                    html: html.display().to_string(),
                    code: 1,
                });
            }
        }
        fs::write(pdf, b"%PDF-1.4").unwrap();
        Ok(())
    }
}

fn service() -> ReportService {
    nesting_report::logging::init_test();
    ReportService::new(Box::new(FakeConverter { fail_marker: None }))
}

fn config(dir: &TempDir) -> ReportConfig {
    ReportConfig {
        report_path: dir.path().join("out"),
        ..Default::default()
    }
}

/// 导出目录: 三张板材（Steel 3mm × 2, Alu 2mm × 1）
fn export(dir: &TempDir) -> (TableSheetSource, PathBuf) {
    let export_dir = dir.path().join("export");
    fs::create_dir_all(&export_dir).unwrap();
    fs::write(export_dir.join("S1.jpg"), b"jpg").unwrap();

    let sheets = write_sheets_csv(
        &export_dir,
        "job42.csv",
        &[
            SheetRow::new("S1").area_m2(2.0).rates("80", "20").preview("S1.jpg"),
            SheetRow::new("A1").material("Alu").thickness("2").rates("35", "65"),
            SheetRow::new("S2").area_m2(1.0).rates("60", "40"),
        ],
    );
    let pieces = write_pieces_csv(&export_dir, "pieces.csv", &[("S1", "Flansch", 120.0, 80.0)]);

    let source = TableSheetSource::from_files(&sheets, Some(&pieces)).unwrap();
    (source, sheets)
}

fn options(sheets: &Path) -> ReportOptions {
    ReportOptions {
        project: None,
        sheets_file: Some(sheets.to_path_buf()),
        convert_pdf: true,
    }
}

fn project_folder(dir: &TempDir) -> PathBuf {
    dir.path().join("out").join("Report_new").join("job42")
}

#[tokio::test]
async fn test_single_report_with_separate_total() {
    let dir = TempDir::new().unwrap();
    let (source, sheets) = export(&dir);

    let summary = service()
        .run(&config(&dir), &source, &options(&sheets))
        .await
        .unwrap();

    let folder = project_folder(&dir);
    assert_eq!(summary.project, "job42");
    assert_eq!(summary.folder, folder);
    assert!(summary.is_complete());

    assert_eq!(summary.scopes.len(), 1);
    let scope = &summary.scopes[0];
    assert_eq!(scope.scope, ReportScope::All);
    assert_eq!(scope.stats.number_of_sheets, 3);
    assert_eq!(scope.pdf, Some(folder.join("report.pdf")));
    assert_eq!(scope.total_pdf, Some(folder.join("total_report.pdf")));

    for name in ["report.html", "report.pdf", "total_report.html", "total_report.pdf", "S1.jpg"] {
        assert!(folder.join(name).exists(), "missing {}", name);
    }

    let html = fs::read_to_string(folder.join("report.html")).unwrap();
    assert!(html.contains(r#"src="S1.jpg""#));
    assert!(html.contains("Flansch"));
    assert!(!html.contains("Gesamtwirkungsgradbericht"));

    let total = fs::read_to_string(folder.join("total_report.html")).unwrap();
    assert!(total.contains("Gesamtwirkungsgradbericht"));
}

#[tokio::test]
async fn test_divided_reports_per_material_group() {
    let dir = TempDir::new().unwrap();
    let (source, sheets) = export(&dir);
    let config = ReportConfig {
        divide_material: true,
        ..config(&dir)
    };

    let summary = service().run(&config, &source, &options(&sheets)).await.unwrap();
    let folder = project_folder(&dir);

    let names: Vec<PathBuf> = summary.scopes.iter().map(|s| s.html.clone()).collect();
    assert_eq!(names, vec![folder.join("Steel_3.html"), folder.join("Alu_2.html")]);

    let steel = &summary.scopes[0];
    assert_eq!(steel.stats.number_of_sheets, 2);
    assert!((steel.stats.total_area - 3.0).abs() < 1e-9);
    assert!((steel.stats.average_reusable - 70.0).abs() < 1e-9);
    assert_eq!(steel.pdf, Some(folder.join("Steel_3_job42.pdf")));
    assert_eq!(steel.total_pdf, Some(folder.join("Steel_3_total_report.pdf")));

    // 单张板材的组没有总报告
    let alu = &summary.scopes[1];
    assert_eq!(alu.stats.number_of_sheets, 1);
    assert_eq!(alu.pdf, Some(folder.join("Alu_2_job42.pdf")));
    assert_eq!(alu.total_pdf, None);
    assert!(!folder.join("Alu_2_total_report.html").exists());
    assert!(!folder.join("report.html").exists());

    let steel_html = fs::read_to_string(folder.join("Steel_3.html")).unwrap();
    assert!(steel_html.contains(">S1<"));
    assert!(steel_html.contains(">S2<"));
    assert!(!steel_html.contains(">A1<"));
}

#[tokio::test]
async fn test_total_appended_when_together() {
    let dir = TempDir::new().unwrap();
    let (source, sheets) = export(&dir);
    let config = ReportConfig {
        reports_pdfs_together: true,
        ..config(&dir)
    };

    let summary = service().run(&config, &source, &options(&sheets)).await.unwrap();
    let folder = project_folder(&dir);

    assert_eq!(summary.scopes[0].total_html, None);
    assert!(!folder.join("total_report.html").exists());
    let html = fs::read_to_string(folder.join("report.html")).unwrap();
    assert!(html.contains("Gesamtwirkungsgradbericht"));
}

#[tokio::test]
async fn test_html_only_run() {
    let dir = TempDir::new().unwrap();
    let (source, sheets) = export(&dir);
    let opts = ReportOptions {
        convert_pdf: false,
        ..options(&sheets)
    };

    let summary = service().run(&config(&dir), &source, &opts).await.unwrap();
    let folder = project_folder(&dir);

    assert!(summary.sheet_pdfs().is_empty());
    assert!(summary.total_pdfs().is_empty());
    assert!(folder.join("report.html").exists());
    assert!(!folder.join("report.pdf").exists());
}

#[tokio::test]
async fn test_conversion_failure_does_not_abort_other_documents() {
    let dir = TempDir::new().unwrap();
    let (source, sheets) = export(&dir);
    let service = ReportService::new(Box::new(FakeConverter {
        fail_marker: Some("total_report"),
    }));

    let summary = service.run(&config(&dir), &source, &options(&sheets)).await.unwrap();

    assert!(!summary.is_complete());
    assert_eq!(summary.conversion_failures.len(), 1);
    assert!(summary.conversion_failures[0].html.ends_with("total_report.html"));
    assert_eq!(summary.scopes[0].total_pdf, None);
    assert!(summary.scopes[0].pdf.is_some());
    assert!(project_folder(&dir).join("report.pdf").exists());
}

#[tokio::test]
async fn test_existing_project_folder_is_replaced() {
    let dir = TempDir::new().unwrap();
    let (source, sheets) = export(&dir);
    let folder = project_folder(&dir);
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("stale.html"), "old").unwrap();

    service()
        .run(&config(&dir), &source, &options(&sheets))
        .await
        .unwrap();

    assert!(!folder.join("stale.html").exists());
    assert!(folder.join("report.html").exists());
}

#[tokio::test]
async fn test_explicit_project_name() {
    let dir = TempDir::new().unwrap();
    let (source, sheets) = export(&dir);
    let config = ReportConfig {
        divide_material: true,
        ..config(&dir)
    };
    let opts = ReportOptions {
        project: Some("Auftrag 7.ewd".to_string()),
        ..options(&sheets)
    };

    let summary = service().run(&config, &source, &opts).await.unwrap();

    let folder = dir.path().join("out").join("Report_new").join("Auftrag_7");
    assert_eq!(summary.folder, folder);
    assert_eq!(summary.scopes[0].pdf, Some(folder.join("Steel_3_Auftrag_7.pdf")));
}

#[tokio::test]
async fn test_previews_with_same_file_name_stay_apart() {
    let dir = TempDir::new().unwrap();
    let export_dir = dir.path().join("export");
    for (sub, content) in [("a", "image-a"), ("b", "image-b")] {
        fs::create_dir_all(export_dir.join(sub)).unwrap();
        fs::write(export_dir.join(sub).join("preview.png"), content).unwrap();
    }
    let sheets = write_sheets_csv(
        &export_dir,
        "job42.csv",
        &[
            SheetRow::new("S1").preview("a/preview.png"),
            SheetRow::new("S2").preview("b/preview.png"),
        ],
    );
    let source = TableSheetSource::from_files(&sheets, None).unwrap();

    service()
        .run(&config(&dir), &source, &options(&sheets))
        .await
        .unwrap();

    let folder = project_folder(&dir);
    assert_eq!(fs::read_to_string(folder.join("S1.png")).unwrap(), "image-a");
    assert_eq!(fs::read_to_string(folder.join("S2.png")).unwrap(), "image-b");
    assert!(!folder.join("preview.png").exists());

    let html = fs::read_to_string(folder.join("report.html")).unwrap();
    assert!(html.contains(r#"src="S1.png""#));
    assert!(html.contains(r#"src="S2.png""#));
}

#[tokio::test]
async fn test_groups_with_same_file_stem_do_not_overwrite() {
    let dir = TempDir::new().unwrap();
    let export_dir = dir.path().join("export");
    fs::create_dir_all(&export_dir).unwrap();
    let sheets = write_sheets_csv(
        &export_dir,
        "job42.csv",
        &[
            SheetRow::new("S1").material("S235 JR"),
            SheetRow::new("S2").material("S235 JR"),
            SheetRow::new("S3").material("S235/JR"),
            SheetRow::new("S4").material("S235/JR"),
        ],
    );
    let source = TableSheetSource::from_files(&sheets, None).unwrap();
    let config = ReportConfig {
        divide_material: true,
        ..config(&dir)
    };

    let summary = service().run(&config, &source, &options(&sheets)).await.unwrap();
    let folder = project_folder(&dir);

    assert_eq!(summary.scopes.len(), 2);
    assert_eq!(summary.scopes[0].html, folder.join("S235_JR_3.html"));
    assert_eq!(summary.scopes[1].html, folder.join("S235_JR_3_2.html"));
    assert_eq!(summary.scopes[1].pdf, Some(folder.join("S235_JR_3_2_job42.pdf")));
    assert_eq!(
        summary.scopes[1].total_pdf,
        Some(folder.join("S235_JR_3_2_total_report.pdf"))
    );

    let first = fs::read_to_string(folder.join("S235_JR_3.html")).unwrap();
    assert!(first.contains(">S1<") && !first.contains(">S3<"));
    let second = fs::read_to_string(folder.join("S235_JR_3_2.html")).unwrap();
    assert!(second.contains(">S3<") && !second.contains(">S1<"));
    assert!(folder.join("S235_JR_3_total_report.html").exists());
    assert!(folder.join("S235_JR_3_2_total_report.html").exists());
}

#[tokio::test]
async fn test_missing_property_policies() {
    let dir = TempDir::new().unwrap();
    let source = MemorySheetSource::new()
        .with_sheet("A", "Steel", 3.0, 1.0, 50.0, 50.0)
        .with_sheet("B", "Steel", 3.0, 1.0, 50.0, 50.0)
        .without_property("B", SheetProperty::Thickness);
    let opts = ReportOptions {
        project: Some("job42".to_string()),
        ..Default::default()
    };

    let result = service().run(&config(&dir), &source, &opts).await;
    assert!(matches!(result, Err(ReportError::Nesting(_))));

    let skip = ReportConfig {
        property_policy: PropertyPolicy::Skip,
        ..config(&dir)
    };
    let summary = service().run(&skip, &source, &opts).await.unwrap();
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].property, SheetProperty::Thickness);
    assert_eq!(summary.scopes[0].stats.number_of_sheets, 1);
    assert_eq!(summary.scopes[0].total_pdf, None);
}

#[tokio::test]
async fn test_empty_source_is_error() {
    let dir = TempDir::new().unwrap();
    let result = service()
        .run(&config(&dir), &MemorySheetSource::new(), &ReportOptions::default())
        .await;
    assert!(matches!(result, Err(ReportError::NoSheets)));
}
