use clap::{Parser, Subcommand};
use skill_sheet_common::Category;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skill-sheet")]
#[command(about = "経歴書スプレッドシートからスキル一覧JSONを生成するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ローカルのシートファイル（CSV/XLSX/JSON）からスキル一覧を生成
    Parse {
        /// 入力ファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 入力形式 (auto/csv/xlsx/json)
        #[arg(short, long, default_value = "auto")]
        format: InputFormat,

        /// 読み込むシート名（xlsxのみ、省略時は「経歴書」→先頭シート）
        #[arg(long)]
        sheet: Option<String>,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// カテゴリ上書きを無効化
        #[arg(long)]
        no_adjust: bool,
    },

    /// Google スプレッドシートから取得してスキル一覧を生成
    Fetch {
        /// 取得元 (auto/api/csv)
        #[arg(short, long, default_value = "auto")]
        source: FetchSource,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// キャッシュを使わずに必ず取得
        #[arg(long)]
        no_cache: bool,

        /// キャッシュディレクトリ
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// カテゴリ上書きを無効化
        #[arg(long)]
        no_adjust: bool,
    },

    /// スキル一覧JSONをカテゴリ別に表示
    Summary {
        /// スキル一覧JSONファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// スキル名のクリーンアップ・正規化・分類結果を表示
    Inspect {
        /// スキル名
        #[arg(required = true)]
        tokens: Vec<String>,

        /// 既定カテゴリ (frontend/backend/devops/mobile/tools)
        #[arg(short, long, default_value = "tools")]
        default_category: Category,
    },

    /// 設定を表示/編集
    Config {
        /// スプレッドシートID（URLも可）を設定
        #[arg(long)]
        set_sheet_id: Option<String>,

        /// CSVエクスポート用のgidを設定
        #[arg(long)]
        set_gid: Option<String>,

        /// アクセストークン取得コマンドを設定
        #[arg(long)]
        set_token_command: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// キャッシュディレクトリ（省略時は既定の場所）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}

/// 入力ファイル形式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// 拡張子から判定
    #[default]
    Auto,
    Csv,
    Xlsx,
    Json,
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "csv" => Ok(InputFormat::Csv),
            "xlsx" | "excel" | "xls" | "ods" => Ok(InputFormat::Xlsx),
            "json" => Ok(InputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use auto, csv, xlsx, or json", s)),
        }
    }
}

/// リモート取得元
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchSource {
    /// API → CSVエクスポートの順に試す
    #[default]
    Auto,
    Api,
    Csv,
}

impl std::str::FromStr for FetchSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(FetchSource::Auto),
            "api" | "sheets" => Ok(FetchSource::Api),
            "csv" | "export" => Ok(FetchSource::Csv),
            _ => Err(format!("Unknown source: {}. Use auto, api, or csv", s)),
        }
    }
}

impl std::fmt::Display for FetchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchSource::Auto => write!(f, "auto"),
            FetchSource::Api => write!(f, "api"),
            FetchSource::Csv => write!(f, "csv"),
        }
    }
}
