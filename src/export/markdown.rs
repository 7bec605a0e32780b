//! Markdownレポート

use crate::report::MatchReport;

/// 表のセル内で崩れないようにエスケープ
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

pub fn render_markdown(report: &MatchReport) -> String {
    let s = &report.summary;
    let mut out = String::from("# 画像照合レポート\n\n");

    out.push_str(&format!("- 生成日時: {}\n", report.generated_at));
    out.push_str(&format!("- 画像フォルダ: `{}`\n", report.folder.display()));
    out.push_str(&format!("- カタログ: `{}`\n", report.catalog.display()));
    out.push_str(&format!("- 閾値: {:.2}\n", report.threshold));
    out.push_str(&format!("- 画像数: {}\n", report.total_images));
    out.push_str(&format!(
        "- 一致: {}/{} ({:.1}%)\n",
        s.assignments.len(),
        report.total_codes,
        s.coverage_percent
    ));
    out.push_str(&format!("- 手動対応表: {}\n\n", s.manual_count()));

    out.push_str(&format!("## 一致 ({})\n\n", s.assignments.len()));
    if !s.assignments.is_empty() {
        out.push_str("| コード | ファイル | 候補 | 信頼度 | 方式 |\n");
        out.push_str("|---|---|---|---|---|\n");
        for a in &s.assignments {
            out.push_str(&format!(
                "| {} | {} | {} | {:.2} | {} |\n",
                cell(&a.code),
                cell(&a.file_name),
                cell(&a.candidate),
                a.confidence,
                a.method
            ));
        }
        out.push('\n');
    }

    if !s.superseded.is_empty() {
        out.push_str(&format!("## 重複画像 ({})\n\n", s.superseded.len()));
        out.push_str("| コード | ファイル | 信頼度 |\n");
        out.push_str("|---|---|---|\n");
        for a in &s.superseded {
            out.push_str(&format!(
                "| {} | {} | {:.2} |\n",
                cell(&a.code),
                cell(&a.file_name),
                a.confidence
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!("## 一致なし画像 ({})\n\n", s.unmatched.len()));
    for u in &s.unmatched {
        out.push_str(&format!("- {} （候補: `{}`）\n", u.file_name, u.candidate));
    }
    out.push('\n');

    out.push_str(&format!("## 画像なしコード ({})\n\n", s.missing_codes.len()));
    for code in &s.missing_codes {
        out.push_str(&format!("- {}\n", code));
    }

    if !s.duplicate_codes.is_empty() {
        out.push_str("\n## カタログ内の重複コード\n\n");
        for code in &s.duplicate_codes {
            out.push_str(&format!("- {}\n", code));
        }
    }

    out
}
