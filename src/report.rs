//! 照合レポート
//!
//! 集計結果に実行情報を付けたもの。JSONで保存し、`apply` の入力にもなる。

use crate::error::{FabricMatchError, Result};
use crate::matcher::MatchSummary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const REPORT_FILE_STEM: &str = "match-report";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    /// 生成日時（RFC 3339）
    pub generated_at: String,
    pub folder: PathBuf,
    pub catalog: PathBuf,
    pub threshold: f64,
    pub total_images: usize,
    pub total_codes: usize,
    #[serde(flatten)]
    pub summary: MatchSummary,
}

impl MatchReport {
    pub fn new(
        folder: &Path,
        catalog: &Path,
        threshold: f64,
        total_images: usize,
        total_codes: usize,
        summary: MatchSummary,
    ) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            folder: folder.to_path_buf(),
            catalog: catalog.to_path_buf(),
            threshold,
            total_images,
            total_codes,
            summary,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FabricMatchError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// コンソール向けの要約を表示する
    pub fn print_summary(&self) {
        let s = &self.summary;
        println!("📊 照合結果:");
        println!(
            "  ✅ 一致: {}/{} ({:.1}%)",
            s.assignments.len(),
            self.total_codes,
            s.coverage_percent
        );
        println!("  📋 手動対応表: {}", s.manual_count());
        println!("  🔁 重複画像: {}", s.superseded.len());
        println!("  ❌ 一致なし画像: {}", s.unmatched.len());
        println!("  ⚠ 画像なしコード: {}", s.missing_codes.len());
        if !s.duplicate_codes.is_empty() {
            println!("  ⚠ カタログ内の重複コード: {}", s.duplicate_codes.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Assignment;
    use fabric_match_common::MatchMethod;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let summary = MatchSummary {
            assignments: vec![Assignment {
                code: "71022-8".into(),
                file_name: "71022-8.jpg".into(),
                path: dir.path().join("71022-8.jpg"),
                candidate: "71022-8".into(),
                confidence: 1.0,
                method: MatchMethod::Exact,
            }],
            missing_codes: vec!["8059".into()],
            coverage_percent: 50.0,
            ..Default::default()
        };
        let report = MatchReport::new(dir.path(), Path::new("catalog.csv"), 0.6, 1, 2, summary);

        let path = dir.path().join("report.json");
        report.save_json(&path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"missingCodes\""));
        assert!(json.contains("\"method\": \"exact\""));

        let loaded = MatchReport::load(&path).unwrap();
        assert_eq!(loaded, report);
    }

    #[test]
    fn test_load_missing_file() {
        let result = MatchReport::load(Path::new("/nonexistent/report.json"));
        assert!(matches!(result, Err(FabricMatchError::FileNotFound(_))));
    }
}
