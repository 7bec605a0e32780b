//! コード正規化
//!
//! 在庫コード・候補文字列を比較用の形に揃える。結果は比較にのみ使い、
//! 表示や保存はしない。
//!
//! 1. 大文字化
//! 2. `R/B` → `RB`, `B/R` → `BR`
//! 3. 空白除去
//! 4. 英数字と `-` 以外を除去
//! 5. 連続 `-` を1つに、前後の `-` を除去
//! 6. （オプション）トークン先頭の数値の先頭ゼロ除去

use serde::{Deserialize, Serialize};

/// 正規化オプション
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// トークン先頭の数値から先頭ゼロを除く（`071` → `71`）
    #[serde(default)]
    pub strip_leading_zeros: bool,
}

/// デフォルトオプションで正規化する
pub fn normalize(s: &str) -> String {
    normalize_with(s, &NormalizeOptions::default())
}

/// 指定オプションで正規化する
pub fn normalize_with(s: &str, options: &NormalizeOptions) -> String {
    if s.is_empty() {
        return String::new();
    }

    let upper = s.to_uppercase().replace("R/B", "RB").replace("B/R", "BR");

    let mut result = String::with_capacity(upper.len());
    for c in upper.chars() {
        if c.is_alphanumeric() {
            result.push(c);
        } else if c == '-' && !result.is_empty() && !result.ends_with('-') {
            result.push('-');
        }
    }
    while result.ends_with('-') {
        result.pop();
    }

    if options.strip_leading_zeros {
        result = strip_leading_zeros(&result);
    }

    result
}

/// トークン先頭（文字列先頭または `-` の直後）の数字列から先頭ゼロを除く
///
/// 数字は最低1桁残す（`00` → `0`）。
fn strip_leading_zeros(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let at_token_start = i == 0 || chars[i - 1] == '-';
        if at_token_start && chars[i] == '0' {
            let mut j = i;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            // ゼロの後に続く数字があれば、その直前までのゼロを捨てる
            let mut k = i;
            while k + 1 < j && chars[k] == '0' {
                k += 1;
            }
            result.extend(&chars[k..j]);
            i = j;
            continue;
        }
        result.push(chars[i]);
        i += 1;
    }

    result
}

/// 正規化済み文字列を英数字トークンに分割する
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}
