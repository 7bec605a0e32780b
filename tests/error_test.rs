//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use fabric_match::catalog;
use fabric_match::config::Config;
use fabric_match::error::FabricMatchError;
use fabric_match::matcher;
use fabric_match::report::MatchReport;
use fabric_match::scanner;
use fabric_match_common::Catalog;
use std::path::Path;
use tempfile::tempdir;

fn default_extensions() -> Vec<String> {
    Config::default().image_extensions
}

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"), &default_extensions(), false);
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, FabricMatchError::FolderNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path(), &default_extensions(), false);

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 画像のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    // テキストファイルのみ作成
    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::scan_folder(dir.path(), &default_extensions(), false);
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 存在しないカタログ
#[test]
fn test_load_missing_catalog() {
    let result = catalog::load_catalog(Path::new("/nonexistent/stock.xlsx"), None);
    assert!(matches!(result, Err(FabricMatchError::FileNotFound(_))));
}

/// コードが1件もないカタログ
#[test]
fn test_load_empty_catalog() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stock.csv");
    std::fs::write(&path, "Ma_hang,Ten\n,\n").unwrap();

    let result = catalog::load_catalog(&path, None);
    assert!(matches!(result, Err(FabricMatchError::EmptyCatalog(_))));
}

/// 指定した列がないカタログ
#[test]
fn test_load_catalog_unknown_column() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stock.csv");
    std::fs::write(&path, "Ma_hang,Ten\n71022-8,Vai\n").unwrap();

    let result = catalog::load_catalog(&path, Some("sku"));
    assert!(matches!(result, Err(FabricMatchError::Catalog(_))));
}

/// 壊れた手動対応表
#[test]
fn test_malformed_override_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("overrides.json");
    std::fs::write(&path, "[\"not\", \"a map\"]").unwrap();

    let result = matcher::build_matcher(
        &Config::default(),
        Catalog::new(["71022-8"]),
        None,
        Some(&path),
        None,
    );
    assert!(matches!(result, Err(FabricMatchError::Matcher(_))));
}

/// 存在しないレポート
#[test]
fn test_load_missing_report() {
    let result = MatchReport::load(Path::new("/nonexistent/match-report.json"));
    assert!(matches!(result, Err(FabricMatchError::FileNotFound(_))));
}

/// FabricMatchErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        FabricMatchError::Config("テスト設定エラー".to_string()),
        FabricMatchError::FileNotFound("stock.xlsx".to_string()),
        FabricMatchError::FolderNotFound("/path/to/folder".to_string()),
        FabricMatchError::Catalog("列が見つかりません".to_string()),
        FabricMatchError::EmptyCatalog("stock.csv".to_string()),
        FabricMatchError::NoImagesFound("フォルダ".to_string()),
        FabricMatchError::ExcelGeneration("Excel生成エラー".to_string()),
        FabricMatchError::Prompt("入力エラー".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = FabricMatchError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: FabricMatchError = io_err.into();

    assert!(matches!(err, FabricMatchError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: FabricMatchError = json_err.into();

    assert!(matches!(err, FabricMatchError::JsonParse(_)));
}

/// common::Errorからの変換
#[test]
fn test_common_error_conversion() {
    let common_err = fabric_match_common::Error::Config("閾値が不正".to_string());
    let err: FabricMatchError = common_err.into();

    assert!(matches!(err, FabricMatchError::Matcher(_)));
    assert!(format!("{}", err).contains("閾値が不正"));
}
