pub mod excel;
pub mod markdown;

use crate::cli::ReportFormat;
use crate::error::Result;
use crate::report::{MatchReport, REPORT_FILE_STEM};
use std::path::{Path, PathBuf};

fn output_path_for_format(output_dir: &Path, extension: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", REPORT_FILE_STEM, extension))
}

/// レポートを指定形式で書き出す。JSONは `apply` で使うため常に出力する。
pub fn export_report(
    report: &MatchReport,
    format: &ReportFormat,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;
    let mut written = Vec::new();

    let json_path = output_path_for_format(output_dir, "json");
    report.save_json(&json_path)?;
    println!("✔ JSON出力: {}", json_path.display());
    written.push(json_path);

    if matches!(format, ReportFormat::Markdown | ReportFormat::All) {
        let md_path = output_path_for_format(output_dir, "md");
        std::fs::write(&md_path, markdown::render_markdown(report))?;
        println!("✔ Markdown出力: {}", md_path.display());
        written.push(md_path);
    }

    if matches!(format, ReportFormat::Excel | ReportFormat::All) {
        let xlsx_path = output_path_for_format(output_dir, "xlsx");
        println!("- Excelを生成中...");
        excel::generate_excel(report, &xlsx_path)?;
        println!("✔ Excel出力: {}", xlsx_path.display());
        written.push(xlsx_path);
    }

    Ok(written)
}
