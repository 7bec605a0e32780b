//! Fabric Match Common Library
//!
//! ファイル名と在庫コードの照合ロジック。I/Oを持たない純粋な関数群で、
//! CLI側から読み込んだカタログ・オーバーライド表を渡して使う。

pub mod catalog;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod normalize;
pub mod overrides;
pub mod score;
pub mod types;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use extract::{extract_candidate, Extractor};
pub use matcher::{MatchConfig, Matcher, DEFAULT_THRESHOLD};
pub use normalize::{normalize, normalize_with, NormalizeOptions};
pub use overrides::OverrideTable;
pub use score::Scorer;
pub use types::{MatchMethod, MatchResult, Score};
