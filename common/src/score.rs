//! 類似度スコア
//!
//! 候補文字列と在庫コードの一致度を [0, 1] で返す。ルールは厳しい順に評価し、
//! 最初に当たったものを採用する。
//!
//! | 順 | ルール | 信頼度 |
//! |----|--------|--------|
//! | 1 | 完全一致 | 1.0 |
//! | 2 | 正規化後一致 | 0.95 |
//! | 3 | 部分文字列（双方4文字以上） | 0.85 |
//! | 4 | トークンJaccard > 0.5 | 0.7 + (J - 0.5) * 0.3（上限0.85） |
//! | 5 | 文字重複 | 重複率 * 0.6 |

use crate::normalize::{normalize_with, tokens, NormalizeOptions};
use crate::types::{MatchMethod, Score};
use std::collections::HashSet;

pub const EXACT_CONFIDENCE: f64 = 1.0;
pub const NORMALIZED_CONFIDENCE: f64 = 0.95;
pub const SUBSTRING_CONFIDENCE: f64 = 0.85;
/// 部分文字列ルールの最小長（短いコードは何にでも含まれてしまう）
pub const SUBSTRING_MIN_LEN: usize = 4;
pub const TOKEN_JACCARD_FLOOR: f64 = 0.5;
pub const TOKEN_BASE: f64 = 0.7;
pub const TOKEN_SCALE: f64 = 0.3;
pub const CHAR_SCALE: f64 = 0.6;

/// スコア計算器
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    options: NormalizeOptions,
}

impl Scorer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// 候補とコードのスコアを計算する。一致の兆候がなければ `None`（0.0）
    pub fn score(&self, candidate: &str, code: &str) -> Option<Score> {
        if candidate.is_empty() || code.is_empty() {
            return None;
        }

        if candidate == code {
            return Some(Score::new(EXACT_CONFIDENCE, MatchMethod::Exact));
        }

        let norm_candidate = normalize_with(candidate, &self.options);
        let norm_code = normalize_with(code, &self.options);
        self.score_normalized(&norm_candidate, &norm_code)
    }

    /// 正規化済みの2文字列に対してルール2以降を評価する
    pub fn score_normalized(&self, a: &str, b: &str) -> Option<Score> {
        if a.is_empty() || b.is_empty() {
            return None;
        }

        if a == b {
            return Some(Score::new(NORMALIZED_CONFIDENCE, MatchMethod::Normalized));
        }

        let len_a = a.chars().count();
        let len_b = b.chars().count();
        if len_a >= SUBSTRING_MIN_LEN
            && len_b >= SUBSTRING_MIN_LEN
            && (a.contains(b) || b.contains(a))
        {
            return Some(Score::new(SUBSTRING_CONFIDENCE, MatchMethod::Substring));
        }

        if let Some(jaccard) = token_jaccard(a, b) {
            if jaccard > TOKEN_JACCARD_FLOOR {
                let confidence = TOKEN_BASE + (jaccard - TOKEN_JACCARD_FLOOR) * TOKEN_SCALE;
                return Some(Score::new(
                    confidence.min(SUBSTRING_CONFIDENCE),
                    MatchMethod::Token,
                ));
            }
        }

        let overlap = char_overlap(a, b, len_a, len_b);
        if overlap > 0.0 {
            return Some(Score::new(overlap * CHAR_SCALE, MatchMethod::Char));
        }

        None
    }

    /// 信頼度のみ
    pub fn confidence(&self, candidate: &str, code: &str) -> f64 {
        self.score(candidate, code).map_or(0.0, |s| s.confidence)
    }
}

/// トークン集合のJaccard係数
fn token_jaccard(a: &str, b: &str) -> Option<f64> {
    let set_a: HashSet<&str> = tokens(a).collect();
    let set_b: HashSet<&str> = tokens(b).collect();
    if set_a.is_empty() || set_b.is_empty() {
        return None;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    Some(intersection as f64 / union as f64)
}

/// 短い方の文字のうち長い方にも現れるものの数 / 長い方の長さ
fn char_overlap(a: &str, b: &str, len_a: usize, len_b: usize) -> f64 {
    let (shorter, longer, longer_len) = if len_a <= len_b {
        (a, b, len_b)
    } else {
        (b, a, len_a)
    };

    let present: HashSet<char> = longer.chars().collect();
    let common = shorter.chars().filter(|c| present.contains(c)).count();
    common as f64 / longer_len as f64
}
