use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fabric-match")]
#[command(about = "生地画像ファイル名と在庫コードの照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像フォルダをカタログと照合してレポートを出力
    Match {
        /// 画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 在庫カタログ（xlsx/csv/json/txt）
        #[arg(short, long)]
        catalog: PathBuf,

        /// コード列名（省略時は自動検出）
        #[arg(long)]
        column: Option<String>,

        /// 手動対応表JSONファイル
        #[arg(long)]
        overrides: Option<PathBuf>,

        /// 組み込みの手動対応表 (fabric)
        #[arg(long)]
        preset: Option<String>,

        /// 採用閾値（0.0-1.0、省略時は設定値）
        #[arg(short, long)]
        threshold: Option<f64>,

        /// トークン先頭の数値から先頭ゼロを除く
        #[arg(long)]
        strip_leading_zeros: bool,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 出力ディレクトリ（デフォルト: 画像フォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (json/markdown/excel/all)
        #[arg(short, long, default_value = "all")]
        format: ReportFormat,
    },

    /// 照合レポートに従って画像をコード名でコピー
    Apply {
        /// 照合レポートJSON
        #[arg(required = true)]
        report: PathBuf,

        /// コピー先フォルダ
        #[arg(long)]
        target: PathBuf,

        /// 確認なしで実行
        #[arg(short, long)]
        yes: bool,

        /// ドライラン（コピーせずに一覧表示）
        #[arg(long)]
        dry_run: bool,

        /// 実行前にコピー先をバックアップ
        #[arg(long)]
        backup: bool,

        /// 既存ファイルを上書き
        #[arg(long)]
        overwrite: bool,
    },

    /// 1つのファイル名について照合の内訳を表示
    Inspect {
        /// 画像ファイル名
        #[arg(required = true)]
        file_name: String,

        /// 在庫カタログ
        #[arg(short, long)]
        catalog: PathBuf,

        /// コード列名
        #[arg(long)]
        column: Option<String>,

        /// 手動対応表JSONファイル
        #[arg(long)]
        overrides: Option<PathBuf>,

        /// 組み込みの手動対応表
        #[arg(long)]
        preset: Option<String>,

        /// 表示する上位件数
        #[arg(long, default_value = "5")]
        top: usize,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 採用閾値を設定
        #[arg(long)]
        set_threshold: Option<f64>,

        /// 既定値に戻す
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ReportFormat {
    Json,
    Markdown,
    Excel,
    #[default]
    All,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            "all" => Ok(ReportFormat::All),
            _ => Err(format!(
                "Unknown format: {}. Use json, markdown, excel, or all",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format_from_str() {
        assert_eq!("JSON".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert_eq!("md".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert_eq!("xlsx".parse::<ReportFormat>(), Ok(ReportFormat::Excel));
        assert_eq!("all".parse::<ReportFormat>(), Ok(ReportFormat::All));
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_parse_match_command() {
        let cli = Cli::try_parse_from([
            "fabric-match",
            "-v",
            "match",
            "photos",
            "--catalog",
            "stock.xlsx",
            "--threshold",
            "0.7",
            "-f",
            "md",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Match {
                folder,
                catalog,
                threshold,
                format,
                recursive,
                ..
            } => {
                assert_eq!(folder, PathBuf::from("photos"));
                assert_eq!(catalog, PathBuf::from("stock.xlsx"));
                assert_eq!(threshold, Some(0.7));
                assert_eq!(format, ReportFormat::Markdown);
                assert!(!recursive);
            }
            _ => panic!("match コマンドとして解析されるべき"),
        }
    }
}
