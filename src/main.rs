use clap::Parser;
use fabric_match::{apply, catalog, cli, config, error, export, inspect, matcher, report, scanner};
use cli::{Cli, Commands};
use config::Config;
use error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Match {
            folder,
            catalog: catalog_path,
            column,
            overrides,
            preset,
            threshold,
            strip_leading_zeros,
            recursive,
            output,
            format,
        } => {
            println!("🧵 fabric-match - 画像照合\n");

            let mut config = config;
            if strip_leading_zeros {
                config.strip_leading_zeros = true;
            }
            let column = column.or_else(|| config.code_column.clone());

            // 1. カタログ読み込み
            println!("[1/4] カタログを読み込み中...");
            let stock = catalog::load_catalog(&catalog_path, column.as_deref())?;
            let duplicates = stock.duplicates().len();
            println!("✔ {}件の在庫コード", stock.len());
            if duplicates > 0 {
                eprintln!("⚠ 重複コード: {}件", duplicates);
            }
            println!();

            // 2. 画像スキャン
            println!("[2/4] 画像をスキャン中...");
            let images = scanner::scan_folder(&folder, &config.image_extensions, recursive)?;
            println!("✔ {}枚の画像を検出\n", images.len());

            if images.is_empty() {
                return Err(error::FabricMatchError::NoImagesFound(
                    folder.display().to_string(),
                ));
            }

            // 3. 照合
            let matcher = matcher::build_matcher(
                &config,
                stock,
                preset.as_deref(),
                overrides.as_deref(),
                threshold,
            )?;
            let threshold = matcher.config().threshold;
            println!("[3/4] 照合中... (閾値 {:.2})", threshold);
            let matches = matcher::match_images(&matcher, &images, cli.verbose);
            let summary = matcher::summarize(&matches, matcher.catalog());
            println!("✔ 照合完了\n");

            // 4. レポート出力
            println!("[4/4] レポートを出力中...");
            let total_codes = matcher.catalog().unique_codes().len();
            let match_report = report::MatchReport::new(
                &folder,
                &catalog_path,
                threshold,
                images.len(),
                total_codes,
                summary,
            );
            let output_dir = output.unwrap_or_else(|| folder.clone());
            export::export_report(&match_report, &format, &output_dir)?;

            println!();
            match_report.print_summary();
            println!("\n✅ 完了");
        }

        Commands::Apply {
            report: report_path,
            target,
            yes,
            dry_run,
            backup,
            overwrite,
        } => {
            println!("📁 fabric-match - 画像の反映\n");

            let match_report = report::MatchReport::load(&report_path)?;
            let count = match_report.summary.assignments.len();
            if count == 0 {
                println!("反映する画像がありません");
                return Ok(());
            }

            let options = apply::ApplyOptions {
                target: target.clone(),
                dry_run,
                backup,
                overwrite,
            };

            if dry_run {
                println!("ドライラン: {}件 → {}", count, target.display());
                apply::apply_report(&match_report, &options, cli.verbose)?;
                println!("\n✅ ドライラン完了（ファイルは変更していません）");
                return Ok(());
            }

            if !yes {
                let prompt = format!("{}件の画像を {} にコピーしますか?", count, target.display());
                if !apply::confirm(&prompt)? {
                    println!("中止しました");
                    return Ok(());
                }
            }

            let stats = apply::apply_report(&match_report, &options, cli.verbose)?;
            println!("\n📊 反映結果:");
            println!("  ✅ コピー: {}", stats.copied);
            println!("  ⏭ スキップ: {}", stats.skipped);
            if stats.failed > 0 {
                println!("  ❌ 失敗: {}", stats.failed);
            }
            println!("\n✅ 完了");
        }

        Commands::Inspect {
            file_name,
            catalog: catalog_path,
            column,
            overrides,
            preset,
            top,
        } => {
            println!("🔍 fabric-match - 照合の内訳\n");

            let column = column.or_else(|| config.code_column.clone());
            let stock = catalog::load_catalog(&catalog_path, column.as_deref())?;
            let matcher = matcher::build_matcher(
                &config,
                stock,
                preset.as_deref(),
                overrides.as_deref(),
                None,
            )?;

            println!("  ファイル: {}", file_name);
            let inspection = inspect::inspect(&matcher, &file_name, top);
            inspection.print(matcher.config().threshold);
        }

        Commands::Config {
            show,
            set_threshold,
            reset,
        } => {
            let mut config = config;

            if reset {
                config = Config::default();
                config.save()?;
                println!("✔ 設定を既定値に戻しました");
            }

            if let Some(threshold) = set_threshold {
                config.set_threshold(threshold)?;
                println!("✔ 閾値を設定しました: {:.2}", threshold);
            }

            if show || (!reset && set_threshold.is_none()) {
                println!("設定: {}", Config::config_path()?.display());
                println!("  閾値: {:.2}", config.threshold);
                println!("  先頭ゼロ除去: {}", if config.strip_leading_zeros { "有効" } else { "無効" });
                println!("  画像拡張子: {}", config.image_extensions.join(", "));
                println!("  接頭辞: {}", config.prefixes.len());
                println!("  接尾辞: {}", config.suffixes.len());
                println!(
                    "  手動対応表: {}",
                    config
                        .override_file
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".to_string())
                );
                if let Some(column) = &config.code_column {
                    println!("  コード列: {}", column);
                }
            }
        }
    }

    Ok(())
}
