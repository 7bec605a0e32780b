//! Excelレポート生成
//!
//! 一致・一致なし画像・画像なしコード・概要の4シートを出力する。

use crate::error::{FabricMatchError, Result};
use crate::report::MatchReport;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::Path;

const ASSIGNMENT_HEADERS: [&str; 5] = ["コード", "ファイル", "候補", "信頼度", "方式"];
const UNMATCHED_HEADERS: [&str; 3] = ["ファイル", "候補", "パス"];

pub fn generate_excel(report: &MatchReport, output_path: &Path) -> Result<()> {
    write_workbook(report, output_path)
        .map_err(|e| FabricMatchError::ExcelGeneration(e.to_string()))
}

fn write_workbook(report: &MatchReport, output_path: &Path) -> std::result::Result<(), XlsxError> {
    let s = &report.summary;
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin);
    let confidence_format = Format::new().set_num_format("0.00");

    // 概要
    let sheet = workbook.add_worksheet();
    sheet.set_name("概要")?;
    sheet.set_column_width(0, 18)?;
    sheet.set_column_width(1, 48)?;
    let rows: [(&str, String); 6] = [
        ("生成日時", report.generated_at.clone()),
        ("画像フォルダ", report.folder.display().to_string()),
        ("カタログ", report.catalog.display().to_string()),
        ("閾値", format!("{:.2}", report.threshold)),
        ("画像数", report.total_images.to_string()),
        (
            "一致",
            format!(
                "{}/{} ({:.1}%)",
                s.assignments.len(),
                report.total_codes,
                s.coverage_percent
            ),
        ),
    ];
    for (row, (label, value)) in rows.iter().enumerate() {
        sheet.write_string_with_format(row as u32, 0, *label, &header_format)?;
        sheet.write_string(row as u32, 1, value)?;
    }

    // 一致
    let sheet = workbook.add_worksheet();
    sheet.set_name("一致")?;
    write_headers(sheet, &ASSIGNMENT_HEADERS, &header_format)?;
    sheet.set_column_width(0, 30)?;
    sheet.set_column_width(1, 40)?;
    sheet.set_column_width(2, 30)?;
    for (i, a) in s.assignments.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &a.code)?;
        sheet.write_string(row, 1, &a.file_name)?;
        sheet.write_string(row, 2, &a.candidate)?;
        sheet.write_number_with_format(row, 3, a.confidence, &confidence_format)?;
        sheet.write_string(row, 4, a.method.to_string())?;
    }

    // 一致なし画像
    let sheet = workbook.add_worksheet();
    sheet.set_name("一致なし")?;
    write_headers(sheet, &UNMATCHED_HEADERS, &header_format)?;
    sheet.set_column_width(0, 40)?;
    sheet.set_column_width(1, 30)?;
    sheet.set_column_width(2, 60)?;
    for (i, u) in s.unmatched.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &u.file_name)?;
        sheet.write_string(row, 1, &u.candidate)?;
        sheet.write_string(row, 2, u.path.display().to_string())?;
    }

    // 画像なしコード
    let sheet = workbook.add_worksheet();
    sheet.set_name("画像なし")?;
    write_headers(sheet, &["コード"], &header_format)?;
    sheet.set_column_width(0, 30)?;
    for (i, code) in s.missing_codes.iter().enumerate() {
        sheet.write_string(i as u32 + 1, 0, code)?;
    }

    workbook.save(output_path)?;
    Ok(())
}

fn write_headers(
    sheet: &mut Worksheet,
    headers: &[&str],
    format: &Format,
) -> std::result::Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, format)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}
