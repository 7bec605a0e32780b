use thiserror::Error;

#[derive(Error, Debug)]
pub enum FabricMatchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("カタログ読み込みエラー: {0}")]
    Catalog(String),

    #[error("カタログに在庫コードがありません: {0}")]
    EmptyCatalog(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("照合設定エラー: {0}")]
    Matcher(#[from] fabric_match_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力エラー: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, FabricMatchError>;
