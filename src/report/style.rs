// ==========================================
// Nesting-Report - 报告样式
// ==========================================
// 打印主题: 黑白，适合普通打印机
// 彩色主题: nice_design
// remove_color_fill: 去除所有表格底色
// ==========================================

use crate::config::ReportConfig;

const BASE_CSS: &str = r#"
        body {
            font-family: sans-serif;
            margin-left: 15px;
        }

        table {
            border: 1px solid rgb(186, 186, 186);
            margin-bottom: 10px;
        }

        .table-container {
            display: table;
        }

        #mainTable {
            display: inline-block;
            width: fit-content;
        }

        .adjustable-table {
            width: 100%;
        }

        .page-break {
            page-break-before: always;
        }

        th, td {
            border: 1px solid #bababa;
            text-align: left;
            font-weight: normal;
            padding: 3px;
            border-radius: 2px;
        }

        .thick-border {
            border-width: 3px;
        }

        .center-text, .thick-border th.center-text {
            font-size: 22px;
            padding: 3px;
            text-align: center;
            font-weight: 500;
        }

        .thick-border td,
        .thick-border th {
            padding: 5px;
            font-size: 18px;
        }

        .sheet-name {
            font-size: 30px;
        }

        .right-align {
            text-align: right;
            font-size: 20px;
        }

        .header {
            display: inline-block;
            width: 100%;
            text-align: left;
        }

        .header img {
            vertical-align: middle;
            width: 70px;
            height: 70px;
        }

        .header span {
            font-size: 35px;
            margin-left: 20px;
            vertical-align: middle;
        }

        .rotated {
            -webkit-transform: rotate(-90deg);
            transform: rotate(-90deg);
        }
"#;

const PRINT_FILL_CSS: &str = r#"
        th, td {
            background-color: rgba(186, 186, 186, 0.17);
        }

        .green {
            background-color: rgba(120, 120, 120, 0.35);
        }

        .grey {
            background-color: rgba(186, 186, 186, 0.632);
        }
"#;

const NICE_CSS: &str = r#"
        body {
            color: #1f2d3d;
        }

        .header span {
            color: #2a6f97;
        }

        .sheet-name {
            color: #2a6f97;
        }
"#;

const NICE_FILL_CSS: &str = r#"
        th, td {
            background-color: rgba(42, 111, 151, 0.08);
        }

        .center-text, .thick-border th.center-text {
            background-color: #2a6f97;
            color: #ffffff;
        }

        .green {
            background-color: rgba(105, 191, 74, 0.556);
        }

        .grey {
            background-color: rgba(186, 186, 186, 0.632);
        }
"#;

/// 按配置生成 <style> 内容
pub fn stylesheet(config: &ReportConfig) -> String {
    let mut css = String::from(BASE_CSS);

    if config.nice_design {
        css.push_str(NICE_CSS);
        if !config.remove_color_fill {
            css.push_str(NICE_FILL_CSS);
        }
    } else if !config.remove_color_fill {
        css.push_str(PRINT_FILL_CSS);
    }

    css
}
