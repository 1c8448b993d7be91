//! アクセストークン管理
//!
//! 取得したトークンは有効期限の60秒前まで使い回す。
//! トークンコマンド（既定: `gcloud auth print-access-token`）の出力は1時間有効とみなす。

use crate::config::Config;
use crate::error::{Result, SkillSheetError};
use chrono::{DateTime, Duration, Utc};

/// トークンの有効期間（コマンド出力・固定トークン）
pub const TOKEN_LIFETIME_SECONDS: i64 = 3600;
/// 期限切れとみなす余裕
pub const EXPIRY_MARGIN_SECONDS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(value: String, expires_at: DateTime<Utc>) -> Self {
        Self { value, expires_at }
    }

    /// 取得時刻から既定の有効期間でトークンを作る
    pub fn issued_at(value: String, now: DateTime<Utc>) -> Self {
        Self::new(value, now + Duration::seconds(TOKEN_LIFETIME_SECONDS))
    }

    /// `now` 時点で使い回してよいか
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECONDS)
    }
}

/// トークンの取得元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// 環境変数・設定ファイルの固定トークン
    Static(String),
    /// 標準出力にトークンを出すコマンド
    Command(String),
}

impl TokenSource {
    /// 固定トークン → トークンコマンドの順に選ぶ
    pub fn from_config(config: &Config) -> Result<Self> {
        if let Some(token) = config.get_access_token() {
            return Ok(TokenSource::Static(token));
        }
        config
            .token_command
            .as_ref()
            .filter(|c| !c.trim().is_empty())
            .map(|c| TokenSource::Command(c.clone()))
            .ok_or(SkillSheetError::MissingAccessToken)
    }

    async fn acquire(&self) -> Result<AccessToken> {
        let now = Utc::now();
        match self {
            TokenSource::Static(value) => Ok(AccessToken::issued_at(value.clone(), now)),
            TokenSource::Command(command) => {
                let value = run_token_command(command).await?;
                Ok(AccessToken::issued_at(value, now))
            }
        }
    }
}

/// トークンコマンドを実行して標準出力の1行目を返す
pub async fn run_token_command(command: &str) -> Result<String> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| SkillSheetError::TokenCommand("コマンドが空です".into()))?;

    tracing::debug!("トークンコマンド実行: {}", command);
    let output = tokio::process::Command::new(program)
        .args(parts)
        .output()
        .await
        .map_err(|e| SkillSheetError::TokenCommand(format!("{}: {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SkillSheetError::TokenCommand(format!(
            "{} が失敗しました: {}",
            program,
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .ok_or_else(|| SkillSheetError::TokenCommand("トークンが出力されませんでした".into()))
}

/// 取得済みトークンを保持し、期限が近づいたら取り直す
#[derive(Debug)]
pub struct TokenHolder {
    source: TokenSource,
    current: Option<AccessToken>,
}

impl TokenHolder {
    pub fn new(source: TokenSource) -> Self {
        Self { source, current: None }
    }

    /// 既に持っているトークンを登録
    pub fn with_token(mut self, token: AccessToken) -> Self {
        self.current = Some(token);
        self
    }

    pub async fn token(&mut self) -> Result<String> {
        if let Some(token) = &self.current {
            if token.is_usable_at(Utc::now()) {
                return Ok(token.value.clone());
            }
            tracing::debug!("トークンの期限が近いため再取得します");
        }

        let fresh = self.source.acquire().await?;
        let value = fresh.value.clone();
        self.current = Some(fresh);
        Ok(value)
    }
}
