use fabric_match_common::{MatchMethod, MatchResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 在庫コードに割り当てた画像
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub code: String,
    pub file_name: String,
    pub path: PathBuf,
    pub candidate: String,
    pub confidence: f64,
    pub method: MatchMethod,
}

/// 一致しなかった画像
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedImage {
    pub file_name: String,
    pub path: PathBuf,
    pub candidate: String,
}

/// 照合済みの1画像
#[derive(Debug, Clone)]
pub struct ImageMatch {
    pub path: PathBuf,
    pub result: MatchResult,
}

/// 照合結果の集計
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    /// コードごとの採用画像（カタログ順）
    pub assignments: Vec<Assignment>,
    /// 一致したが、同じコードにより良い画像があったもの
    pub superseded: Vec<Assignment>,
    pub unmatched: Vec<UnmatchedImage>,
    /// 画像が割り当てられなかったコード
    pub missing_codes: Vec<String>,
    /// カタログ内で重複していたコード
    #[serde(default)]
    pub duplicate_codes: Vec<String>,
    pub coverage_percent: f64,
}

impl MatchSummary {
    pub fn manual_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.method == MatchMethod::Manual)
            .count()
    }
}
