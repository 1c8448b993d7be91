use crate::error::{SkillSheetError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SHEET_NAME: &str = "経歴書";

lazy_static! {
    static ref SHEET_URL_RE: Regex =
        Regex::new(r"/spreadsheets/d/([A-Za-z0-9_-]+)(?:/[^#?]*)?(?:[?#].*?gid=([0-9]+))?").unwrap();
    static ref SHEET_ID_RE: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub spreadsheet_id: Option<String>,
    /// CSVエクスポート時のシートgid
    pub sheet_gid: Option<String>,
    pub sheet_name: String,
    pub access_token: Option<String>,
    /// アクセストークンを標準出力に出すコマンド
    pub token_command: Option<String>,
    pub cache_ttl_seconds: u64,
    pub timeout_seconds: u64,
    /// カテゴリ上書きJSONファイル
    pub category_overrides: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SkillSheetError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("skill-sheet").join("config.json"))
    }

    /// キャッシュの既定ディレクトリ
    pub fn cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("skill-sheet")
    }

    fn default_config() -> Self {
        Self {
            spreadsheet_id: None,
            sheet_gid: None,
            sheet_name: DEFAULT_SHEET_NAME.into(),
            access_token: None,
            token_command: Some("gcloud auth print-access-token".into()),
            cache_ttl_seconds: 300, // 5分
            timeout_seconds: 30,
            category_overrides: None,
        }
    }

    pub fn get_spreadsheet_id(&self) -> Result<String> {
        // 環境変数を優先
        if let Some(id) = env_value("GOOGLE_SHEETS_ID") {
            return Ok(id);
        }

        self.spreadsheet_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or(SkillSheetError::MissingSpreadsheetId)
    }

    pub fn get_sheet_gid(&self) -> Option<String> {
        env_value("GOOGLE_SHEETS_GID").or_else(|| self.sheet_gid.clone())
    }

    pub fn get_access_token(&self) -> Option<String> {
        env_value("GOOGLE_ACCESS_TOKEN").or_else(|| self.access_token.clone())
    }

    /// スプレッドシートIDを設定（URLを渡した場合はIDとgidを取り出す）
    pub fn set_spreadsheet(&mut self, id_or_url: &str) -> Result<()> {
        let (id, gid) = parse_spreadsheet_ref(id_or_url)?;
        self.spreadsheet_id = Some(id);
        if gid.is_some() {
            self.sheet_gid = gid;
        }
        self.save()
    }

    pub fn set_sheet_gid(&mut self, gid: String) -> Result<()> {
        self.sheet_gid = Some(gid);
        self.save()
    }

    pub fn set_token_command(&mut self, command: String) -> Result<()> {
        self.token_command = Some(command).filter(|c| !c.trim().is_empty());
        self.save()
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// スプレッドシートIDまたはURLから (ID, gid) を取り出す
pub fn parse_spreadsheet_ref(id_or_url: &str) -> Result<(String, Option<String>)> {
    let input = id_or_url.trim();

    if let Some(cap) = SHEET_URL_RE.captures(input) {
        let id = cap[1].to_string();
        let gid = cap.get(2).map(|m| m.as_str().to_string());
        return Ok((id, gid));
    }

    if SHEET_ID_RE.is_match(input) {
        return Ok((input.to_string(), None));
    }

    Err(SkillSheetError::Config(format!(
        "スプレッドシートIDまたはURLとして解釈できません: {}",
        id_or_url
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spreadsheet_ref_plain_id() {
        let (id, gid) = parse_spreadsheet_ref("1AbC_def-123").unwrap();
        assert_eq!(id, "1AbC_def-123");
        assert_eq!(gid, None);
    }

    #[test]
    fn test_parse_spreadsheet_ref_url_with_gid() {
        let url = "https://docs.google.com/spreadsheets/d/1AbC_def-123/edit#gid=456789";
        let (id, gid) = parse_spreadsheet_ref(url).unwrap();
        assert_eq!(id, "1AbC_def-123");
        assert_eq!(gid.as_deref(), Some("456789"));
    }

    #[test]
    fn test_parse_spreadsheet_ref_url_without_gid() {
        let url = "https://docs.google.com/spreadsheets/d/1AbC/edit";
        let (id, gid) = parse_spreadsheet_ref(url).unwrap();
        assert_eq!(id, "1AbC");
        assert_eq!(gid, None);
    }

    #[test]
    fn test_parse_spreadsheet_ref_full_width_gid_ignored() {
        let url = "https://docs.google.com/spreadsheets/d/1AbC/edit#gid=１２３";
        let (id, gid) = parse_spreadsheet_ref(url).unwrap();
        assert_eq!(id, "1AbC");
        assert_eq!(gid, None);
    }

    #[test]
    fn test_parse_spreadsheet_ref_invalid() {
        assert!(parse_spreadsheet_ref("not a sheet id").is_err());
        assert!(parse_spreadsheet_ref("").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sheet_name, "経歴書");
        assert_eq!(config.cache_ttl_seconds, 300);
        assert!(config.spreadsheet_id.is_none());
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"spreadsheet_id": "abc"}"#).unwrap();
        assert_eq!(config.spreadsheet_id.as_deref(), Some("abc"));
        assert_eq!(config.sheet_name, "経歴書");
        assert_eq!(config.timeout_seconds, 30);
    }
}
