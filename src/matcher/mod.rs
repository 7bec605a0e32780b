mod types;

pub use types::{Assignment, ImageMatch, MatchSummary, UnmatchedImage};

use crate::config::Config;
use crate::error::Result;
use crate::scanner::ImageInfo;
use fabric_match_common::{Catalog, MatchMethod, Matcher, OverrideTable};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// 設定・プリセット・オーバーライドファイルから照合器を組み立てる
///
/// オーバーライドは プリセット → 設定ファイルの既定 → 引数指定 の順にマージし、後勝ち。
pub fn build_matcher(
    config: &Config,
    catalog: Catalog,
    preset: Option<&str>,
    override_file: Option<&Path>,
    threshold: Option<f64>,
) -> Result<Matcher> {
    let match_config = config.match_config(threshold);
    let options = match_config.normalize;
    let mut overrides = OverrideTable::new(options);

    if let Some(preset_name) = preset {
        let preset_table = OverrideTable::from_preset(preset_name, options)?;
        overrides.merge(&preset_table);
    }

    for path in [config.override_file.as_deref(), override_file].into_iter().flatten() {
        let table = OverrideTable::from_file(path, options)?;
        overrides.merge(&table);
    }

    Ok(Matcher::new(catalog, overrides, match_config)?)
}

/// 画像を並列に照合する（結果は入力順）
pub fn match_images(matcher: &Matcher, images: &[ImageInfo], verbose: bool) -> Vec<ImageMatch> {
    let progress = ProgressBar::new(images.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let matches: Vec<ImageMatch> = images
        .par_iter()
        .map(|image| {
            let result = matcher.match_filename(&image.file_name);
            if verbose {
                match (&result.code, result.method) {
                    (Some(code), Some(method)) => progress.println(format!(
                        "  {} → {} ({}, {:.2})",
                        image.file_name, code, method, result.confidence
                    )),
                    _ => progress.println(format!(
                        "  {} → 一致なし（候補: {}）",
                        image.file_name, result.candidate
                    )),
                }
            }
            progress.inc(1);
            ImageMatch {
                path: image.path.clone(),
                result,
            }
        })
        .collect();

    progress.finish_and_clear();
    matches
}

/// 照合結果をコードごとに集計する
///
/// 同じコードに複数の画像が一致した場合、信頼度が高いものを採用し、
/// 同点なら先に走査された画像を残す。
pub fn summarize(matches: &[ImageMatch], catalog: &Catalog) -> MatchSummary {
    let mut best: HashMap<&str, Assignment> = HashMap::new();
    let mut superseded = Vec::new();
    let mut unmatched = Vec::new();

    for m in matches {
        let (Some(code), Some(method)) = (m.result.code.as_deref(), m.result.method) else {
            unmatched.push(UnmatchedImage {
                file_name: m.result.file_name.clone(),
                path: m.path.clone(),
                candidate: m.result.candidate.clone(),
            });
            continue;
        };

        let assignment = to_assignment(m, code, method);
        match best.get(code) {
            Some(current) if current.confidence >= assignment.confidence => {
                superseded.push(assignment);
            }
            _ => {
                if let Some(previous) = best.insert(code, assignment) {
                    superseded.push(previous);
                }
            }
        }
    }

    let unique = catalog.unique_codes();
    let mut assignments = Vec::with_capacity(best.len());
    let mut missing_codes = Vec::new();
    for code in &unique {
        match best.remove(code) {
            Some(a) => assignments.push(a),
            None => missing_codes.push(code.to_string()),
        }
    }

    let coverage_percent = if unique.is_empty() {
        0.0
    } else {
        assignments.len() as f64 / unique.len() as f64 * 100.0
    };

    MatchSummary {
        assignments,
        superseded,
        unmatched,
        missing_codes,
        duplicate_codes: catalog.duplicates().into_iter().map(String::from).collect(),
        coverage_percent,
    }
}

fn to_assignment(m: &ImageMatch, code: &str, method: MatchMethod) -> Assignment {
    Assignment {
        code: code.to_string(),
        file_name: m.result.file_name.clone(),
        path: m.path.clone(),
        candidate: m.result.candidate.clone(),
        confidence: m.result.confidence,
        method,
    }
}
