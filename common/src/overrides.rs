//! 手動オーバーライド表
//!
//! 抽出に失敗することが分かっている候補文字列を、正しい在庫コードへ
//! 直接対応付ける。キーは正規化して保持する。

use crate::error::{Error, Result};
use crate::normalize::{normalize_with, NormalizeOptions};
use std::collections::{BTreeMap, HashMap};

/// オーバーライド表
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    options: NormalizeOptions,
    /// 正規化キー → 在庫コード
    entries: HashMap<String, String>,
}

impl OverrideTable {
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            entries: HashMap::new(),
        }
    }

    /// (キー, コード) の組から構築する
    pub fn from_pairs<I, K, V>(pairs: I, options: NormalizeOptions) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self::new(options);
        for (key, code) in pairs {
            table.insert(key.as_ref(), code.into())?;
        }
        Ok(table)
    }

    /// JSON (`{"候補": "コード", ...}`) から構築する
    pub fn from_json(json: &str, options: NormalizeOptions) -> Result<Self> {
        let map: BTreeMap<String, String> = serde_json::from_str(json)?;
        Self::from_pairs(map, options)
    }

    /// JSONファイルから構築する
    pub fn from_file(path: &std::path::Path, options: NormalizeOptions) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content, options)
    }

    /// 組み込みプリセットを取得
    ///
    /// 未知の名前は設定エラー。
    pub fn from_preset(name: &str, options: NormalizeOptions) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "fabric" | "vtt9" => Self::from_pairs(fabric_preset(), options),
            _ => Err(Error::Config(format!(
                "不明なプリセット: {} (fabric を指定してください)",
                name
            ))),
        }
    }

    /// エントリを追加する
    ///
    /// 正規化後に同じキーで別のコードを指す場合はエラー。
    pub fn insert(&mut self, key: &str, code: String) -> Result<()> {
        let normalized = normalize_with(key, &self.options);
        if normalized.is_empty() {
            return Err(Error::Config(format!("オーバーライドのキーが空です: {:?}", key)));
        }

        match self.entries.get(&normalized) {
            Some(existing) if *existing != code => Err(Error::Config(format!(
                "オーバーライドのキー「{}」が重複しています（{} / {}）",
                normalized, existing, code
            ))),
            _ => {
                self.entries.insert(normalized, code);
                Ok(())
            }
        }
    }

    /// 設定をマージ（後から追加した設定が優先）
    pub fn merge(&mut self, other: &OverrideTable) {
        for (key, code) in &other.entries {
            self.entries.insert(key.clone(), code.clone());
        }
    }

    /// 候補に対応するコードを引く（候補は内部で正規化する）
    pub fn lookup(&self, candidate: &str) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let normalized = normalize_with(candidate, &self.options);
        self.entries.get(&normalized).map(|s| s.as_str())
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 元データセットで確認済みの対応表
///
/// コード側は正規化形で記述しており、照合時にカタログの実コードへ解決される。
fn fabric_preset() -> Vec<(&'static str, &'static str)> {
    vec![
        ("CAPRI 2796", "CAPRI2769"),
        ("HEIO 3579", "HEIO3579"),
        ("HERMITAGE 27466 31", "HERMITAGE27466-31"),
        ("CADIZ FLE SURF 01", "CADIZFLESURF01"),
        ("Safari AC 1096", "SAFARIIAC1096"),
        ("TWILIGHT 24 ROEBUCK", "TWILIGHT24ROEBUCK"),
        ("Sparkle plain", "SPARKLEPLAIN"),
        ("Southface 23 plaza", "SOUTHFACE23PLAZA"),
        ("PIOLA 41801.16", "PIOLA4180116"),
        ("DUBLIN", "DUBLIN"),
        ("MORVIS 02", "MORVIS02"),
        ("130 479", "130479"),
        ("130 353", "130353"),
        ("120298", "120298"),
        ("BWB-8076", "BWB8076"),
        ("STEP-06 BISCUIT", "STEP06BISCUIT"),
        ("CAMVAL RBYY 210", "CARNIVALRB210"),
        ("carnival r/b purple", "CARNIVALRBPURPLE"),
        ("carnival r/b slate 210", "CARNIVALRBSLATE210"),
        ("CARNIVAL R/B TEAL 210", "CARNIVALRBTEAL210"),
        ("CARNIVAL R/B MULBERRY 210", "CARNIVALRBMULBERRY210"),
        ("carnival r/b hot pink 210", "CARNIVALRBHOTPINK210"),
        ("carnival r/b mauve 210", "CARNIVALRBMAUVE210"),
        ("Voile R/B Cream", "VOILERBCREAM"),
        ("Voile R/B White", "VOILERBWHITE"),
    ]
}
