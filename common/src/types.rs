use serde::{Deserialize, Serialize};

/// 照合方式（どのルールで一致したか）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    /// 文字列完全一致
    Exact,
    /// 正規化後の一致
    Normalized,
    /// 部分文字列
    Substring,
    /// トークン重複（Jaccard）
    Token,
    /// 文字重複
    Char,
    /// 手動オーバーライド表
    Manual,
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMethod::Exact => write!(f, "exact"),
            MatchMethod::Normalized => write!(f, "normalized"),
            MatchMethod::Substring => write!(f, "substring"),
            MatchMethod::Token => write!(f, "token"),
            MatchMethod::Char => write!(f, "char"),
            MatchMethod::Manual => write!(f, "manual"),
        }
    }
}

/// スコア（信頼度と方式）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub confidence: f64,
    pub method: MatchMethod,
}

impl Score {
    pub fn new(confidence: f64, method: MatchMethod) -> Self {
        Self { confidence, method }
    }
}

/// 1ファイル分の照合結果
///
/// `code` が `None` の場合は「一致なし」。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub file_name: String,

    /// ファイル名から抽出した候補文字列
    pub candidate: String,

    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub confidence: f64,

    #[serde(default)]
    pub method: Option<MatchMethod>,
}

impl MatchResult {
    /// 一致なしの結果
    pub fn no_match(file_name: &str, candidate: String) -> Self {
        Self {
            file_name: file_name.to_string(),
            candidate,
            code: None,
            confidence: 0.0,
            method: None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.code.is_some()
    }
}
