//! ファイル名 → 在庫コード照合
//!
//! 1. ファイル名から候補を抽出
//! 2. オーバーライド表に正規化一致があれば、カタログ上のコードへ解決して採用（manual, 1.0）
//! 3. なければ全コードをカタログ順にスコアリングし、閾値以上の最高スコアを採用
//!
//! 同点はカタログ順で先のものが勝つ。I/Oは行わない。

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::extract::Extractor;
use crate::normalize::NormalizeOptions;
use crate::overrides::OverrideTable;
use crate::score::Scorer;
use crate::types::{MatchMethod, MatchResult, Score};
use serde::{Deserialize, Serialize};

/// デフォルトの採用閾値
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// 照合設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// この値以上のスコアのみ採用
    pub threshold: f64,
    #[serde(default)]
    pub normalize: NormalizeOptions,
    #[serde(default)]
    pub extractor: Extractor,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            normalize: NormalizeOptions::default(),
            extractor: Extractor::default(),
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::Config(format!(
                "閾値は0.0〜1.0で指定してください: {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// 照合器
#[derive(Debug, Clone)]
pub struct Matcher {
    catalog: Catalog,
    overrides: OverrideTable,
    config: MatchConfig,
    scorer: Scorer,
}

impl Matcher {
    pub fn new(catalog: Catalog, overrides: OverrideTable, config: MatchConfig) -> Result<Self> {
        config.validate()?;
        if !overrides.is_empty() && *overrides.options() != config.normalize {
            return Err(Error::Config(
                "オーバーライド表と照合設定で正規化オプションが異なります".into(),
            ));
        }

        let scorer = Scorer::new(config.normalize);
        Ok(Self {
            catalog,
            overrides,
            config,
            scorer,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// 候補文字列を抽出する
    pub fn extract(&self, filename: &str) -> String {
        self.config.extractor.extract(filename)
    }

    /// オーバーライド表を引き、カタログ上のコードへ解決する
    pub fn lookup_override(&self, candidate: &str) -> Option<&str> {
        let target = self.overrides.lookup(candidate)?;
        self.catalog.resolve(target, &self.config.normalize)
    }

    /// ファイル名を照合する
    pub fn match_filename(&self, filename: &str) -> MatchResult {
        let candidate = self.extract(filename);
        self.match_candidate(filename, candidate)
    }

    /// 抽出済みの候補を照合する
    pub fn match_candidate(&self, filename: &str, candidate: String) -> MatchResult {
        if candidate.is_empty() || self.catalog.is_empty() {
            return MatchResult::no_match(filename, candidate);
        }

        if let Some(code) = self.lookup_override(&candidate) {
            return MatchResult {
                file_name: filename.to_string(),
                code: Some(code.to_string()),
                candidate,
                confidence: 1.0,
                method: Some(MatchMethod::Manual),
            };
        }

        let mut best: Option<(&str, Score)> = None;
        for code in self.catalog.iter() {
            let Some(score) = self.scorer.score(&candidate, code) else {
                continue;
            };
            let best_confidence = best.map_or(0.0, |(_, s)| s.confidence);
            if score.confidence > best_confidence && score.confidence >= self.config.threshold {
                best = Some((code, score));
            }
        }

        match best {
            Some((code, score)) => MatchResult {
                file_name: filename.to_string(),
                code: Some(code.to_string()),
                candidate,
                confidence: score.confidence,
                method: Some(score.method),
            },
            None => MatchResult::no_match(filename, candidate),
        }
    }

    /// 候補に対する上位N件のスコア（閾値は無視、同点はカタログ順）
    pub fn rank(&self, candidate: &str, top: usize) -> Vec<(&str, Score)> {
        let mut scored: Vec<(&str, Score)> = self
            .catalog
            .iter()
            .filter_map(|code| self.scorer.score(candidate, code).map(|s| (code, s)))
            .collect();
        // sort_byは安定ソート
        scored.sort_by(|a, b| b.1.confidence.total_cmp(&a.1.confidence));
        scored.truncate(top);
        scored
    }
}
