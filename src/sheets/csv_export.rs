use crate::error::{Result, SkillSheetError};
use skill_sheet_common::{parse_csv, Grid};

const EXPORT_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// 公開スプレッドシートのCSVエクスポートURL
pub fn csv_export_url(spreadsheet_id: &str, gid: Option<&str>) -> String {
    let mut url = format!("{}/{}/export?format=csv", EXPORT_BASE, spreadsheet_id);
    if let Some(gid) = gid.filter(|g| !g.is_empty()) {
        url.push_str("&gid=");
        url.push_str(gid);
    }
    url
}

/// CSVエクスポートからGridを取得（認証なし）
pub async fn fetch_csv_export(
    http: &reqwest::Client,
    spreadsheet_id: &str,
    gid: Option<&str>,
) -> Result<Grid> {
    let url = csv_export_url(spreadsheet_id, gid);
    tracing::info!("CSVエクスポートから取得: {}", url);

    let response = http.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SkillSheetError::ApiStatus {
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().await?;
    parse_export_body(&text)
}

/// エクスポート本文をパース
///
/// 非公開シートはログインページのHTMLが返るためエラーにする。
pub fn parse_export_body(text: &str) -> Result<Grid> {
    let head: String = text.trim_start().chars().take(15).collect::<String>().to_ascii_lowercase();
    if head.starts_with("<!doctype html") || head.starts_with("<html") {
        return Err(SkillSheetError::Spreadsheet(
            "CSVエクスポートがHTMLを返しました（シートが公開されていない可能性があります）".into(),
        ));
    }

    let grid = parse_csv(text)?;
    if grid.is_empty() {
        return Err(SkillSheetError::EmptySpreadsheet);
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_export_url() {
        assert_eq!(
            csv_export_url("abc", None),
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv"
        );
        assert_eq!(
            csv_export_url("abc", Some("123")),
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv&gid=123"
        );
        assert_eq!(
            csv_export_url("abc", Some("")),
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv"
        );
    }

    #[test]
    fn test_parse_export_body_html() {
        let result = parse_export_body("<!DOCTYPE html><html><body>Sign in</body></html>");
        assert!(matches!(result, Err(SkillSheetError::Spreadsheet(_))));
    }

    #[test]
    fn test_parse_export_body_csv() {
        let grid = parse_export_body("1,,\"PHP\nLaravel\"\n").unwrap();
        assert_eq!(grid[0][2], "PHP\nLaravel");
    }

    #[test]
    fn test_parse_export_body_empty() {
        assert!(matches!(parse_export_body(""), Err(SkillSheetError::EmptySpreadsheet)));
    }
}
