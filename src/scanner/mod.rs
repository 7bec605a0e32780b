use crate::error::{FabricMatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

/// フォルダ内の画像ファイルを列挙する
///
/// - 拡張子は大文字小文字を区別しない
/// - `.` で始まる隠しファイルは除外
/// - `recursive` が false の場合は直下のみ
pub fn scan_folder(folder: &Path, extensions: &[String], recursive: bool) -> Result<Vec<ImageInfo>> {
    if !folder.is_dir() {
        return Err(FabricMatchError::FolderNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().to_string();
        if file_name.starts_with('.') {
            continue;
        }

        if is_image_extension(path, extensions) {
            images.push(ImageInfo {
                path: path.to_path_buf(),
                file_name,
            });
        }
    }

    // ファイル名でソート（同名はパス順）
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name).then_with(|| a.path.cmp(&b.path)));

    Ok(images)
}

fn is_image_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            extensions.iter().any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}
