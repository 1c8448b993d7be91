use super::token::TokenHolder;
use crate::error::{Result, SkillSheetError};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use skill_sheet_common::{Grid, ValueRange};
use std::time::Duration;

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
/// 取得する列範囲（AP = 42列目）
pub const VALUES_COLUMNS: &str = "A:AP";

/// `spreadsheets.get` のレスポンス（必要なフィールドのみ）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpreadsheetMetadata {
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SheetEntry {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetProperties {
    pub title: String,
    pub sheet_id: i64,
}

/// 読み込むシートを選ぶ（`preferred` があればそれ、なければ先頭）
pub fn select_sheet_name(metadata: &SpreadsheetMetadata, preferred: &str) -> Result<String> {
    let titles: Vec<&str> = metadata
        .sheets
        .iter()
        .map(|s| s.properties.title.as_str())
        .collect();

    titles
        .iter()
        .find(|t| **t == preferred)
        .or_else(|| titles.first())
        .map(|t| t.to_string())
        .ok_or_else(|| SkillSheetError::Spreadsheet("シートがありません".into()))
}

/// A1記法の範囲（シート名はシングルクォートで囲む）
pub fn values_range(sheet_name: &str) -> String {
    format!("'{}'!{}", sheet_name.replace('\'', "''"), VALUES_COLUMNS)
}

/// Google Sheets API v4 クライアント
pub struct SheetsClient {
    http: reqwest::Client,
    spreadsheet_id: String,
    tokens: TokenHolder,
    base_url: String,
}

impl SheetsClient {
    pub fn new(spreadsheet_id: &str, tokens: TokenHolder, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            spreadsheet_id: spreadsheet_id.to_string(),
            tokens,
            base_url: SHEETS_API_BASE.to_string(),
        })
    }

    /// APIのベースURLを差し替える
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// `<base>/<id>/<segments...>` のURLを組み立てる
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SkillSheetError::Config(format!("APIのURLが不正です: {}", e)))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| SkillSheetError::Config(format!("APIのURLが不正です: {}", self.base_url)))?;
            path.pop_if_empty().push(&self.spreadsheet_id);
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&mut self, url: Url, query: &[(&str, &str)]) -> Result<T> {
        let token = self.tokens.token().await?;
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SkillSheetError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }

    pub async fn metadata(&mut self) -> Result<SpreadsheetMetadata> {
        let url = self.endpoint(&[])?;
        self.get_json(url, &[("fields", "sheets.properties")]).await
    }

    pub async fn values(&mut self, range: &str) -> Result<ValueRange> {
        let url = self.endpoint(&["values", range])?;
        self.get_json(url, &[]).await
    }

    /// シートを選んで値を取得する（戻り値: シート名, Grid）
    pub async fn fetch_grid(&mut self, preferred_sheet: &str) -> Result<(String, Grid)> {
        let metadata = self.metadata().await?;
        let sheet_name = select_sheet_name(&metadata, preferred_sheet)?;
        tracing::info!("シート「{}」を取得します", sheet_name);

        let range = self.values(&values_range(&sheet_name)).await?;
        if range.is_empty() {
            return Err(SkillSheetError::EmptySpreadsheet);
        }
        Ok((sheet_name, range.into_grid()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::token::TokenSource;

    fn metadata(json: &str) -> SpreadsheetMetadata {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_select_sheet_prefers_named_sheet() {
        let meta = metadata(
            r#"{"sheets": [
                {"properties": {"title": "表紙", "sheetId": 0}},
                {"properties": {"title": "経歴書", "sheetId": 123}}
            ]}"#,
        );
        assert_eq!(select_sheet_name(&meta, "経歴書").unwrap(), "経歴書");
    }

    #[test]
    fn test_select_sheet_falls_back_to_first() {
        let meta = metadata(r#"{"sheets": [{"properties": {"title": "Sheet1"}}]}"#);
        assert_eq!(select_sheet_name(&meta, "経歴書").unwrap(), "Sheet1");
    }

    #[test]
    fn test_select_sheet_no_sheets() {
        let meta = metadata("{}");
        assert!(matches!(
            select_sheet_name(&meta, "経歴書"),
            Err(SkillSheetError::Spreadsheet(_))
        ));
    }

    #[test]
    fn test_values_range_quotes_sheet_name() {
        assert_eq!(values_range("経歴書"), "'経歴書'!A:AP");
        assert_eq!(values_range("John's"), "'John''s'!A:AP");
    }

    #[test]
    fn test_endpoint_encodes_range() {
        let tokens = TokenHolder::new(TokenSource::Static("t".into()));
        let client = SheetsClient::new("sheet-id", tokens, Duration::from_secs(5))
            .unwrap()
            .with_base_url("https://example.test/v4/spreadsheets/");

        let url = client.endpoint(&["values", "'Sheet 1'!A:AP"]).unwrap();
        assert!(url
            .as_str()
            .starts_with("https://example.test/v4/spreadsheets/sheet-id/values/"));
        assert!(!url.as_str().contains(' '));

        let meta_url = client.endpoint(&[]).unwrap();
        assert_eq!(meta_url.as_str(), "https://example.test/v4/spreadsheets/sheet-id");
    }
}
