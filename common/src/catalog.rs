//! 在庫コードカタログ
//!
//! 読み込み順を保持する読み取り専用のコード一覧。重複コードは許容し、
//! 同点の場合は先に現れたものが勝つ。

use crate::normalize::{normalize_with, NormalizeOptions};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    codes: Vec<String>,
}

impl Catalog {
    /// コード一覧から構築する（前後の空白を除き、空のものは捨てる）
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes = codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        Self { codes }
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    /// 重複を除いたコード一覧（初出順）
    pub fn unique_codes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.codes
            .iter()
            .filter(|c| seen.insert(c.as_str()))
            .map(|c| c.as_str())
            .collect()
    }

    /// 2回以上現れるコード（初出順）
    pub fn duplicates(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.codes
            .iter()
            .filter(|c| !seen.insert(c.as_str()) && reported.insert(c.as_str()))
            .map(|c| c.as_str())
            .collect()
    }

    /// 指定コードをカタログ上の実コードへ解決する
    ///
    /// 完全一致を優先し、なければ正規化形が一致する最初のコード。
    pub fn resolve(&self, target: &str, options: &NormalizeOptions) -> Option<&str> {
        if let Some(code) = self.codes.iter().find(|c| *c == target) {
            return Some(code.as_str());
        }

        let normalized = normalize_with(target, options);
        if normalized.is_empty() {
            return None;
        }
        self.codes
            .iter()
            .find(|c| normalize_with(c, options) == normalized)
            .map(|c| c.as_str())
    }
}

impl<S: AsRef<str>> FromIterator<S> for Catalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
