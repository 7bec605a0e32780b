//! エラー型定義
//!
//! 照合処理そのものはエラーを返さない。ここで扱うのは
//! 設定（閾値・オーバーライド表）の構築時エラーのみ。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
