//! 共通ライブラリのエラー
//!
//! 集計処理そのものは失敗しない（不正な行・セルは読み飛ばす）。
//! エラーになるのはシートデータの読み込みとカテゴリ上書き設定だけ。

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// 上書き設定ファイルの読み込み失敗
    #[error("ファイル読み込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSONエラー: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV / ValueRange の形式不正
    #[error("シート解析エラー: {0}")]
    Parse(String),

    /// カテゴリ上書き設定の内容不正
    #[error("上書き設定エラー: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
