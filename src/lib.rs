//! skill-sheet
//!
//! 経歴書スプレッドシート（ローカルファイル / Google スプレッドシート）を読み込み、
//! スキル一覧JSONを生成する。集計ロジックは `skill_sheet_common` にある。

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod inspect;
pub mod loader;
pub mod pipeline;
pub mod sheets;
