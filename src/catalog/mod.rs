//! カタログ読み込みモジュール
//!
//! 在庫コード一覧を Excel / CSV / JSON / テキストから読み込む。
//! コード列は明示指定がなければヘッダー名から推定し、見つからなければ先頭列を使う。

use crate::error::{FabricMatchError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use fabric_match_common::Catalog;
use std::borrow::Cow;
use std::path::Path;

/// コード列として認識するヘッダー名（小文字・空白は `_`）
const CODE_COLUMN_NAMES: &[&str] = &["ma_hang", "mã_hàng", "mã_hang", "fabric_code", "code", "ma"];

/// カタログファイルを読み込む
pub fn load_catalog(path: &Path, column: Option<&str>) -> Result<Catalog> {
    if !path.exists() {
        return Err(FabricMatchError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let codes = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => read_spreadsheet(path, column)?,
        "csv" => read_csv(&std::fs::read_to_string(path)?, column)?,
        "json" => read_json(&std::fs::read_to_string(path)?, column)?,
        _ => read_lines(&std::fs::read_to_string(path)?),
    };

    let catalog = Catalog::new(codes);
    if catalog.is_empty() {
        return Err(FabricMatchError::EmptyCatalog(path.display().to_string()));
    }
    Ok(catalog)
}

/// ヘッダーからコード列の位置を決める
pub fn detect_code_column(headers: &[String], explicit: Option<&str>) -> Result<usize> {
    if let Some(name) = explicit {
        let wanted = header_key(name);
        return headers
            .iter()
            .position(|h| header_key(h) == wanted)
            .ok_or_else(|| FabricMatchError::Catalog(format!("列「{}」が見つかりません", name)));
    }

    for known in CODE_COLUMN_NAMES {
        if let Some(index) = headers.iter().position(|h| header_key(h) == *known) {
            return Ok(index);
        }
    }
    Ok(0)
}

fn header_key(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn read_spreadsheet(path: &Path, column: Option<&str>) -> Result<Vec<String>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| FabricMatchError::Catalog(format!("{}: {}", path.display(), e)))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| FabricMatchError::Catalog(format!("シートがありません: {}", path.display())))?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| FabricMatchError::Catalog(format!("シート「{}」: {}", sheet, e)))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(cell_to_string).collect(),
        None => return Ok(Vec::new()),
    };
    let index = detect_code_column(&headers, column)?;

    Ok(rows
        .filter_map(|row| row.get(index).map(cell_to_string))
        .collect())
}

/// セルを文字列化（整数値の浮動小数は小数点なしで）
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

fn read_csv(content: &str, column: Option<&str>) -> Result<Vec<String>> {
    let content = content.trim_start_matches('\u{feff}');
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());

    let headers: Vec<String> = match lines.next() {
        Some(line) => parse_csv_line(line).into_iter().map(String::from).collect(),
        None => return Ok(Vec::new()),
    };
    let index = detect_code_column(&headers, column)?;

    Ok(lines
        .filter_map(|line| parse_csv_line(line).get(index).map(|s| s.to_string()))
        .collect())
}

fn read_json(content: &str, column: Option<&str>) -> Result<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let items = value
        .as_array()
        .ok_or_else(|| FabricMatchError::Catalog("JSONカタログは配列である必要があります".into()))?;

    let mut codes = Vec::with_capacity(items.len());
    for item in items {
        match item {
            serde_json::Value::String(s) => codes.push(s.clone()),
            serde_json::Value::Number(n) => codes.push(n.to_string()),
            serde_json::Value::Object(map) => {
                let keys: Vec<String> = map.keys().cloned().collect();
                let key = if column.is_some() {
                    &keys[detect_code_column(&keys, column)?]
                } else {
                    match CODE_COLUMN_NAMES
                        .iter()
                        .find_map(|known| keys.iter().find(|k| header_key(k) == *known))
                    {
                        Some(key) => key,
                        None => {
                            return Err(FabricMatchError::Catalog(
                                "JSONオブジェクトにコード列がありません（--column で指定してください）".into(),
                            ))
                        }
                    }
                };
                match map.get(key) {
                    Some(serde_json::Value::String(s)) => codes.push(s.clone()),
                    Some(serde_json::Value::Number(n)) => codes.push(n.to_string()),
                    _ => {}
                }
            }
            _ => {}
        }
    }
    Ok(codes)
}

fn read_lines(content: &str) -> Vec<String> {
    content.lines().map(|l| l.trim().to_string()).collect()
}

fn parse_csv_line(line: &str) -> Vec<Cow<'_, str>> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut field_start = 0;

    for (i, c) in line.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == ',' && !in_quotes {
            fields.push(trim_quotes(&line[field_start..i]));
            field_start = i + 1;
        }
    }

    // 最後のフィールド
    fields.push(trim_quotes(&line[field_start..]));

    fields
}

/// 引用符を外し、引用符内の `""` を `"` に戻す
fn trim_quotes(s: &str) -> Cow<'_, str> {
    let s = s.trim();
    if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
        let inner = s[1..s.len() - 1].trim();
        if inner.contains("\"\"") {
            Cow::Owned(inner.replace("\"\"", "\""))
        } else {
            Cow::Borrowed(inner)
        }
    } else {
        Cow::Borrowed(s)
    }
}
