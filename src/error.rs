use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillSheetError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("スプレッドシートIDが設定されていません。`skill-sheet config --set-sheet-id ID` または環境変数 GOOGLE_SHEETS_ID で設定してください")]
    MissingSpreadsheetId,

    #[error("アクセストークンを取得できません。環境変数 GOOGLE_ACCESS_TOKEN か `skill-sheet config --set-token-command` を設定してください")]
    MissingAccessToken,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応のファイル形式です: {0}（csv/xlsx/json）")]
    UnsupportedFormat(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    Spreadsheet(String),

    #[error("シートが見つかりません: {0}")]
    SheetNotFound(String),

    #[error("スプレッドシートにデータがありません")]
    EmptySpreadsheet,

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("APIエラー ({status}): {body}")]
    ApiStatus { status: u16, body: String },

    #[error("トークンコマンド実行エラー: {0}")]
    TokenCommand(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] skill_sheet_common::Error),
}

pub type Result<T> = std::result::Result<T, SkillSheetError>;
