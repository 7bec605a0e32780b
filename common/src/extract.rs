//! 候補抽出
//!
//! ファイル名から拡張子・既知の接頭辞/接尾辞・括弧書き・日付らしき数字列を
//! 取り除き、在庫コード候補を得る。

use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    // 末尾の日付（空白区切りの8桁または6桁）
    static ref TRAILING_DATE_RE: Regex = Regex::new(r"\s+(?:\d{8}|\d{6})\s*$").unwrap();
    // 括弧書き
    static ref PAREN_RE: Regex = Regex::new(r"\s*\([^)]*\)\s*").unwrap();
    static ref SPACES_RE: Regex = Regex::new(r"\s+").unwrap();
    // ハイフン前後の空白
    static ref DASH_RE: Regex = Regex::new(r"\s*-\s*").unwrap();
}

/// デフォルトの接頭辞（取込バッチ・カメラ由来）
pub const DEFAULT_PREFIXES: &[&str] = &[
    "MO RONG VAI_",
    "MỞ RỘNG VẢI_",
    "MORONG_",
    "VAI_",
    "FABRIC_",
    "IMG_",
    "DSC_",
];

/// デフォルトの接尾辞（コピー・連番マーカー）
pub const DEFAULT_SUFFIXES: &[&str] = &[
    " cankhoto",
    " - copy",
    " copy",
    " (1)",
    " (2)",
    " (3)",
];

/// 候補抽出器
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extractor {
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES.iter().map(|s| s.to_string()).collect(),
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Extractor {
    pub fn new(prefixes: Vec<String>, suffixes: Vec<String>) -> Self {
        Self { prefixes, suffixes }
    }

    /// ファイル名から候補文字列を抽出する
    pub fn extract(&self, filename: &str) -> String {
        let mut name = strip_extension(filename).to_string();

        if let Some(rest) = longest_affix(&name, &self.prefixes, strip_prefix_ci) {
            name = rest;
        }
        if let Some(rest) = longest_affix(&name, &self.suffixes, strip_suffix_ci) {
            name = rest;
        }

        name = TRAILING_DATE_RE.replace(&name, "").into_owned();
        name = PAREN_RE.replace_all(&name, " ").into_owned();
        name = SPACES_RE.replace_all(&name, " ").trim().to_string();
        name = DASH_RE.replace_all(&name, "-").into_owned();

        name
    }
}

/// デフォルト設定で候補を抽出する
pub fn extract_candidate(filename: &str) -> String {
    Extractor::default().extract(filename)
}

/// 拡張子を除く
///
/// 最後の `.` 以降が1〜5文字の英数字で、英字を1つ以上含む場合のみ拡張子とみなす。
/// `PIOLA 41801.16` のような数字だけの部分は残す。
fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(pos) if pos > 0 => {
            let ext = &filename[pos + 1..];
            let is_ext = (1..=5).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
                && ext.chars().any(|c| c.is_ascii_alphabetic());
            if is_ext {
                &filename[..pos]
            } else {
                filename
            }
        }
        _ => filename,
    }
}

/// 候補リストのうち最長で一致するものを取り除いた文字列を返す
fn longest_affix(
    name: &str,
    affixes: &[String],
    strip: fn(&str, &str) -> Option<String>,
) -> Option<String> {
    affixes
        .iter()
        .filter(|a| !a.is_empty())
        .filter_map(|a| strip(name, a).map(|rest| (a.chars().count(), rest)))
        .max_by_key(|(len, _)| *len)
        .map(|(_, rest)| rest)
}

fn strip_prefix_ci(name: &str, prefix: &str) -> Option<String> {
    let n = prefix.chars().count();
    let split = name.char_indices().nth(n).map(|(i, _)| i).unwrap_or(name.len());
    if name.chars().count() < n {
        return None;
    }
    let (head, rest) = name.split_at(split);
    if head.to_lowercase() == prefix.to_lowercase() {
        Some(rest.to_string())
    } else {
        None
    }
}

fn strip_suffix_ci(name: &str, suffix: &str) -> Option<String> {
    let n = suffix.chars().count();
    let total = name.chars().count();
    if total < n {
        return None;
    }
    let split = name
        .char_indices()
        .nth(total - n)
        .map(|(i, _)| i)
        .unwrap_or(name.len());
    let (rest, tail) = name.split_at(split);
    if tail.to_lowercase() == suffix.to_lowercase() {
        Some(rest.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_dash_gap() {
        assert_eq!(extract_candidate("07 013D -26.heic"), "07 013D-26");
        assert_eq!(extract_candidate("10 780 - 17.jpg"), "10 780-17");
    }

    #[test]
    fn test_extract_prefix_case_insensitive() {
        assert_eq!(extract_candidate("MO RONG VAI_71022-8.jpg"), "71022-8");
        assert_eq!(extract_candidate("mo rong vai_CAPRI 2796.JPG"), "CAPRI 2796");
        assert_eq!(extract_candidate("MỞ RỘNG VẢI_DUBLIN.png"), "DUBLIN");
        assert_eq!(extract_candidate("IMG_8015-1.jpeg"), "8015-1");
    }

    #[test]
    fn test_extract_longest_suffix_wins() {
        assert_eq!(extract_candidate("BWB-8076 - Copy.jpg"), "BWB-8076");
        assert_eq!(extract_candidate("MORVIS 02 copy.jpg"), "MORVIS 02");
        assert_eq!(extract_candidate("HEIO 3579 cankhoto.jpg"), "HEIO 3579");
    }

    #[test]
    fn test_extract_trailing_date() {
        assert_eq!(extract_candidate("SPARKLE PLAIN 20240115.jpg"), "SPARKLE PLAIN");
        assert_eq!(extract_candidate("DUBLIN 240115.jpg"), "DUBLIN");
        // 日付部分しかない名前は残す
        assert_eq!(extract_candidate("120298.jpg"), "120298");
        // 7桁は日付とみなさない
        assert_eq!(extract_candidate("ABC 1234567.jpg"), "ABC 1234567");
    }

    #[test]
    fn test_extract_parentheses() {
        assert_eq!(extract_candidate("TWILIGHT 24 (old) ROEBUCK.jpg"), "TWILIGHT 24 ROEBUCK");
        assert_eq!(extract_candidate("A9003-5 (4).jpg"), "A9003-5");
    }

    #[test]
    fn test_extract_keeps_numeric_dot() {
        assert_eq!(extract_candidate("PIOLA 41801.16"), "PIOLA 41801.16");
        assert_eq!(extract_candidate("PIOLA 41801.16.jpg"), "PIOLA 41801.16");
    }

    #[test]
    fn test_extract_unchanged_when_nothing_matches() {
        assert_eq!(extract_candidate("DUBLIN"), "DUBLIN");
        assert_eq!(extract_candidate(""), "");
    }

    #[test]
    fn test_custom_affixes() {
        let extractor = Extractor::new(vec!["BATCH7-".into()], vec!["_final".into()]);
        assert_eq!(extractor.extract("batch7-CADIZ FLE SURF 01_FINAL.jpg"), "CADIZ FLE SURF 01");
        // デフォルトの接頭辞は使われない
        assert_eq!(extractor.extract("IMG_1234.jpg"), "IMG_1234");
    }
}
