//! Google スプレッドシート取得モジュール
//!
//! 取得経路:
//! 1. Sheets API v4（メタデータ → シート選択 → `A:AP` の値）
//! 2. CSVエクスポートURL（APIが使えない・失敗した場合のフォールバック）

pub mod client;
pub mod csv_export;
pub mod token;

pub use client::{select_sheet_name, values_range, SheetsClient, SpreadsheetMetadata};
pub use csv_export::{csv_export_url, fetch_csv_export};
pub use token::{AccessToken, TokenHolder, TokenSource};

use crate::cli::FetchSource;
use crate::config::Config;
use crate::error::Result;
use skill_sheet_common::Grid;
use std::time::Duration;

/// 実際に使われた取得経路
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSource {
    Api,
    CsvExport,
}

impl GridSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            GridSource::Api => "api",
            GridSource::CsvExport => "csv",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchedGrid {
    pub grid: Grid,
    pub source: GridSource,
    /// APIで取得した場合のシート名
    pub sheet_name: Option<String>,
}

impl FetchedGrid {
    /// 取得元の表示用ラベル（例: `api: 経歴書`）
    pub fn origin(&self) -> String {
        match &self.sheet_name {
            Some(name) => format!("{}: {}", self.source.as_str(), name),
            None => self.source.as_str().to_string(),
        }
    }
}

async fn fetch_via_api(config: &Config, spreadsheet_id: &str) -> Result<FetchedGrid> {
    let tokens = TokenHolder::new(TokenSource::from_config(config)?);
    let mut client = SheetsClient::new(
        spreadsheet_id,
        tokens,
        Duration::from_secs(config.timeout_seconds),
    )?;
    let (sheet_name, grid) = client.fetch_grid(&config.sheet_name).await?;
    Ok(FetchedGrid {
        grid,
        source: GridSource::Api,
        sheet_name: Some(sheet_name),
    })
}

async fn fetch_via_csv(config: &Config, spreadsheet_id: &str) -> Result<FetchedGrid> {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()?;
    let gid = config.get_sheet_gid();
    let grid = fetch_csv_export(&http, spreadsheet_id, gid.as_deref()).await?;
    Ok(FetchedGrid {
        grid,
        source: GridSource::CsvExport,
        sheet_name: None,
    })
}

/// 指定経路でGridを取得する
///
/// `FetchSource::Auto` ではAPIを試し、失敗したらCSVエクスポートに切り替える。
pub async fn fetch_grid(config: &Config, source: FetchSource) -> Result<FetchedGrid> {
    let spreadsheet_id = config.get_spreadsheet_id()?;

    match source {
        FetchSource::Api => fetch_via_api(config, &spreadsheet_id).await,
        FetchSource::Csv => fetch_via_csv(config, &spreadsheet_id).await,
        FetchSource::Auto => match fetch_via_api(config, &spreadsheet_id).await {
            Ok(fetched) => Ok(fetched),
            Err(e) => {
                tracing::warn!("Sheets APIで取得できません（{}）。CSVエクスポートを試します", e);
                fetch_via_csv(config, &spreadsheet_id).await
            }
        },
    }
}
