//! 照合結果の反映
//!
//! 採用画像を `<target>/<コード>.<拡張子>` にコピーする。

use crate::error::{FabricMatchError, Result};
use crate::matcher::Assignment;
use crate::report::MatchReport;
use dialoguer::Confirm;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// ファイル名に使えない文字
const PATH_HOSTILE: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    pub target: PathBuf,
    pub dry_run: bool,
    pub backup: bool,
    pub overwrite: bool,
}

/// コピー1件分
#[derive(Debug, Clone, PartialEq)]
pub struct CopyPlan {
    pub code: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyStats {
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
    pub backup: Option<PathBuf>,
}

/// コードをファイル名として安全な形にする
pub fn sanitize_code(code: &str) -> String {
    let replaced: String = code
        .trim()
        .chars()
        .map(|c| if PATH_HOSTILE.contains(&c) || c.is_control() { '_' } else { c })
        .collect();
    // Windowsは末尾のドット・空白を受け付けない
    let trimmed = replaced.trim_end_matches(['.', ' ']);
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}

fn destination_for(target: &Path, assignment: &Assignment) -> PathBuf {
    let stem = sanitize_code(&assignment.code);
    let ext = assignment
        .path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());
    match ext {
        Some(ext) if !ext.is_empty() => target.join(format!("{}.{}", stem, ext)),
        _ => target.join(stem),
    }
}

/// レポートからコピー計画を作る（カタログ順）
pub fn plan_copies(report: &MatchReport, target: &Path) -> Vec<CopyPlan> {
    report
        .summary
        .assignments
        .iter()
        .map(|a| CopyPlan {
            code: a.code.clone(),
            source: a.path.clone(),
            destination: destination_for(target, a),
        })
        .collect()
}

/// `<target>_backup_<YYYYmmdd_HHMMSS>` に対象フォルダを丸ごとコピーする
///
/// 対象フォルダがまだ無ければ何もしない。`.` などの相対指定は実パスに解決してから
/// 兄弟フォルダとして作る。
pub fn backup_target(target: &Path) -> Result<Option<PathBuf>> {
    if !target.is_dir() {
        return Ok(None);
    }

    let target = std::fs::canonicalize(target)?;
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| {
            FabricMatchError::Config(format!(
                "バックアップできないフォルダです: {}",
                target.display()
            ))
        })?;
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let backup = target.with_file_name(format!("{}_backup_{}", name, stamp));

    // バックアップ先が対象フォルダ内だと自分自身を再帰的にコピーしてしまう
    if backup.starts_with(&target) {
        return Err(FabricMatchError::Config(format!(
            "バックアップ先がコピー元の中にあります: {}",
            backup.display()
        )));
    }

    for entry in WalkDir::new(&target).into_iter().filter_map(|e| e.ok()) {
        let Ok(relative) = entry.path().strip_prefix(&target) else {
            continue;
        };
        let dest = backup.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest)?;
        } else if entry.file_type().is_file() {
            std::fs::copy(entry.path(), &dest)?;
        }
    }

    Ok(Some(backup))
}

/// 実行前の確認
pub fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| FabricMatchError::Prompt(e.to_string()))
}

/// コピーを実行する
///
/// 個々のコピー失敗は数えて続行する。
pub fn apply_report(report: &MatchReport, options: &ApplyOptions, verbose: bool) -> Result<ApplyStats> {
    let plans = plan_copies(report, &options.target);
    let mut stats = ApplyStats::default();

    if options.dry_run {
        for plan in &plans {
            println!("  {} → {}", plan.source.display(), plan.destination.display());
        }
        return Ok(stats);
    }

    if options.backup {
        stats.backup = backup_target(&options.target)?;
        if let Some(backup) = &stats.backup {
            println!("✔ バックアップ: {}", backup.display());
        }
    }

    std::fs::create_dir_all(&options.target)?;

    // コピー前に元画像の実パスを控える。元画像そのものは上書きしない
    let sources: HashSet<PathBuf> = plans
        .iter()
        .filter_map(|p| std::fs::canonicalize(&p.source).ok())
        .collect();

    let mut written: HashSet<PathBuf> = HashSet::new();
    for plan in &plans {
        if written.contains(&plan.destination) {
            eprintln!(
                "⚠ 出力名が重複するためスキップ: {} ({})",
                plan.destination.display(),
                plan.code
            );
            stats.skipped += 1;
            continue;
        }
        if plan.destination.exists() {
            if !options.overwrite {
                if verbose {
                    println!("  スキップ（既存）: {}", plan.destination.display());
                }
                stats.skipped += 1;
                continue;
            }
            let is_source = std::fs::canonicalize(&plan.destination)
                .map(|dest| sources.contains(&dest))
                .unwrap_or(false);
            if is_source {
                if verbose {
                    println!("  スキップ（元画像）: {}", plan.destination.display());
                }
                stats.skipped += 1;
                continue;
            }
        }

        match std::fs::copy(&plan.source, &plan.destination) {
            Ok(_) => {
                if verbose {
                    println!("  {} → {}", plan.source.display(), plan.destination.display());
                }
                written.insert(plan.destination.clone());
                stats.copied += 1;
            }
            Err(e) => {
                eprintln!("⚠ コピー失敗: {} ({})", plan.source.display(), e);
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchSummary;
    use fabric_match_common::MatchMethod;
    use tempfile::tempdir;

    fn assignment(code: &str, path: PathBuf) -> Assignment {
        Assignment {
            code: code.to_string(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            candidate: code.to_string(),
            path,
            confidence: 1.0,
            method: MatchMethod::Exact,
        }
    }

    fn report_with(assignments: Vec<Assignment>) -> MatchReport {
        let summary = MatchSummary {
            assignments,
            ..Default::default()
        };
        MatchReport::new(Path::new("/photos"), Path::new("catalog.csv"), 0.6, 0, 0, summary)
    }

    #[test]
    fn test_sanitize_code() {
        assert_eq!(sanitize_code("CARNIVAL R/B TEAL 210"), "CARNIVAL R_B TEAL 210");
        assert_eq!(sanitize_code("A:B*C?"), "A_B_C_");
        assert_eq!(sanitize_code("  71022-8  "), "71022-8");
        assert_eq!(sanitize_code("CODE."), "CODE");
        assert_eq!(sanitize_code(""), "_");
    }

    #[test]
    fn test_plan_copies_lowercases_extension() {
        let report = report_with(vec![
            assignment("R/B 01", PathBuf::from("/photos/rb01.JPG")),
            assignment("8059", PathBuf::from("/photos/noext")),
        ]);
        let plans = plan_copies(&report, Path::new("/out"));
        assert_eq!(plans[0].destination, PathBuf::from("/out/R_B 01.jpg"));
        assert_eq!(plans[1].destination, PathBuf::from("/out/8059"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.jpg");
        std::fs::write(&src, b"a").unwrap();
        let target = dir.path().join("out");

        let report = report_with(vec![assignment("71022-8", src)]);
        let options = ApplyOptions {
            target: target.clone(),
            dry_run: true,
            ..Default::default()
        };
        let stats = apply_report(&report, &options, false).unwrap();

        assert_eq!(stats, ApplyStats::default());
        assert!(!target.exists());
    }

    #[test]
    fn test_apply_copies_and_skips_existing() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.jpg");
        let b = dir.path().join("b.PNG");
        std::fs::write(&a, b"new-a").unwrap();
        std::fs::write(&b, b"new-b").unwrap();
        let target = dir.path().join("out");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("8059.png"), b"old").unwrap();

        let report = report_with(vec![
            assignment("71022-8", a),
            assignment("8059", b),
            assignment("MISSING", dir.path().join("gone.jpg")),
        ]);
        let options = ApplyOptions {
            target: target.clone(),
            ..Default::default()
        };
        let stats = apply_report(&report, &options, false).unwrap();

        assert_eq!(stats.copied, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(std::fs::read(target.join("71022-8.jpg")).unwrap(), b"new-a");
        assert_eq!(std::fs::read(target.join("8059.png")).unwrap(), b"old");

        // 上書き指定
        let options = ApplyOptions {
            target: target.clone(),
            overwrite: true,
            ..Default::default()
        };
        let stats = apply_report(&report, &options, false).unwrap();
        assert_eq!(stats.copied, 2);
        assert_eq!(std::fs::read(target.join("8059.png")).unwrap(), b"new-b");
    }

    #[test]
    fn test_apply_skips_colliding_names() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.jpg");
        let b = dir.path().join("b.jpg");
        std::fs::write(&a, b"a").unwrap();
        std::fs::write(&b, b"b").unwrap();
        let target = dir.path().join("out");

        let report = report_with(vec![assignment("A/B", a), assignment("A_B", b)]);
        let options = ApplyOptions {
            target: target.clone(),
            overwrite: true,
            ..Default::default()
        };
        let stats = apply_report(&report, &options, false).unwrap();

        assert_eq!(stats.copied, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(std::fs::read(target.join("A_B.jpg")).unwrap(), b"a");
    }

    #[test]
    fn test_backup_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out");
        std::fs::create_dir_all(target.join("sub")).unwrap();
        std::fs::write(target.join("x.jpg"), b"x").unwrap();
        std::fs::write(target.join("sub").join("y.jpg"), b"y").unwrap();

        let backup = backup_target(&target).unwrap().unwrap();
        let name = backup.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("out_backup_"));
        assert_eq!(name.len(), "out_backup_".len() + 15);
        assert_eq!(std::fs::read(backup.join("x.jpg")).unwrap(), b"x");
        assert_eq!(std::fs::read(backup.join("sub").join("y.jpg")).unwrap(), b"y");

        assert_eq!(backup_target(&dir.path().join("none")).unwrap(), None);
    }

    #[test]
    fn test_overwrite_never_truncates_source() {
        let dir = tempdir().unwrap();
        let photo = dir.path().join("8059.jpg");
        std::fs::write(&photo, b"PHOTO-BYTES").unwrap();

        // コピー先 = 元画像のフォルダ
        let report = report_with(vec![assignment("8059", photo.clone())]);
        let options = ApplyOptions {
            target: dir.path().to_path_buf(),
            overwrite: true,
            ..Default::default()
        };
        let stats = apply_report(&report, &options, false).unwrap();

        assert_eq!(stats.copied, 0);
        assert_eq!(stats.skipped, 1);
        assert_eq!(std::fs::read(&photo).unwrap(), b"PHOTO-BYTES");
    }

    #[test]
    fn test_overwrite_keeps_other_source_images() {
        let dir = tempdir().unwrap();
        // DUBLIN.jpg は別コードの元画像でもある
        let dublin = dir.path().join("DUBLIN.jpg");
        let other = dir.path().join("IMG_0001.jpg");
        std::fs::write(&dublin, b"dublin").unwrap();
        std::fs::write(&other, b"other").unwrap();

        let report = report_with(vec![
            assignment("DUBLIN", other.clone()),
            assignment("DUBLIN NAVY", dublin.clone()),
        ]);
        let options = ApplyOptions {
            target: dir.path().to_path_buf(),
            overwrite: true,
            ..Default::default()
        };
        let stats = apply_report(&report, &options, false).unwrap();

        assert_eq!(stats.copied, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(std::fs::read(&dublin).unwrap(), b"dublin");
        assert_eq!(std::fs::read(dir.path().join("DUBLIN NAVY.jpg")).unwrap(), b"dublin");
    }

    #[test]
    fn test_backup_relative_target_is_sibling() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out");
        std::fs::create_dir_all(target.join("sub")).unwrap();
        std::fs::write(target.join("x.jpg"), b"x").unwrap();

        // `out/sub/..` は file_name を持たない
        let backup = backup_target(&target.join("sub").join("..")).unwrap().unwrap();
        let canonical = std::fs::canonicalize(&target).unwrap();
        assert_eq!(backup.parent(), canonical.parent());
        assert!(!backup.starts_with(&canonical));
        assert_eq!(std::fs::read(backup.join("x.jpg")).unwrap(), b"x");

        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(&target).unwrap();
        let result = backup_target(Path::new("."));
        std::env::set_current_dir(original).unwrap();

        let backup = result.unwrap().unwrap();
        assert_eq!(backup.parent(), canonical.parent());
        let mut entries: Vec<String> = std::fs::read_dir(&target)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        entries.sort();
        assert_eq!(entries, vec!["sub", "x.jpg"]);
    }
}
