use crate::error::{FabricMatchError, Result};
use fabric_match_common::{Extractor, MatchConfig, NormalizeOptions, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 対象とする画像拡張子（小文字）
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "heic"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 採用閾値
    pub threshold: f64,
    /// トークン先頭の数値から先頭ゼロを除く
    pub strip_leading_zeros: bool,
    /// 取り除く接頭辞
    pub prefixes: Vec<String>,
    /// 取り除く接尾辞
    pub suffixes: Vec<String>,
    /// 走査する画像拡張子
    pub image_extensions: Vec<String>,
    /// 既定のオーバーライドJSON
    pub override_file: Option<PathBuf>,
    /// カタログのコード列名
    pub code_column: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let extractor = Extractor::default();
        Self {
            threshold: DEFAULT_THRESHOLD,
            strip_leading_zeros: false,
            prefixes: extractor.prefixes,
            suffixes: extractor.suffixes,
            image_extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            override_file: None,
            code_column: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FabricMatchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("fabric-match").join("config.json"))
    }

    pub fn set_threshold(&mut self, threshold: f64) -> Result<()> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(FabricMatchError::Config(format!(
                "閾値は0.0〜1.0で指定してください: {}",
                threshold
            )));
        }
        self.threshold = threshold;
        self.save()
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            strip_leading_zeros: self.strip_leading_zeros,
        }
    }

    /// 照合設定を組み立てる（CLI引数で閾値を上書き可能）
    pub fn match_config(&self, threshold: Option<f64>) -> MatchConfig {
        MatchConfig {
            threshold: threshold.unwrap_or(self.threshold),
            normalize: self.normalize_options(),
            extractor: Extractor::new(self.prefixes.clone(), self.suffixes.clone()),
        }
    }
}
