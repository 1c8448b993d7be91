//! スキル一覧キャッシュモジュール
//!
//! 取得したスキル一覧をキャッシュディレクトリに保存し、
//! TTL以内であればスプレッドシートへの再取得をスキップする。
//! 取得に失敗した場合は期限切れのキャッシュでも返せるよう、削除はしない。

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skill_sheet_common::SkillRecord;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = ".skills-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCache {
    /// バージョン（互換性チェック用）
    version: u32,
    /// 取得元スプレッドシートID
    pub spreadsheet_id: String,
    /// 取得元（"api" / "csv"）
    pub source: String,
    /// 取得日時
    pub fetched_at: DateTime<Utc>,
    pub skills: Vec<SkillRecord>,
}

impl SkillCache {
    const CURRENT_VERSION: u32 = 1;

    pub fn new(spreadsheet_id: &str, source: &str, skills: Vec<SkillRecord>) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            spreadsheet_id: spreadsheet_id.to_string(),
            source: source.to_string(),
            fetched_at: Utc::now(),
            skills,
        }
    }

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// キャッシュファイルを読み込み
    ///
    /// 存在しない・壊れている・バージョン不一致の場合は空のキャッシュを返す。
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, SkillCache>(reader) {
            Ok(cache) => {
                if cache.version != Self::CURRENT_VERSION {
                    tracing::warn!("キャッシュバージョン不一致、再生成します");
                    return Self::default();
                }
                cache
            }
            Err(e) => {
                tracing::warn!("キャッシュを読み込めません: {}", e);
                Self::default()
            }
        }
    }

    /// キャッシュファイルを保存
    pub fn save(&self, folder: &Path) -> Result<()> {
        std::fs::create_dir_all(folder)?;
        let file = File::create(Self::cache_path(folder))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// キャッシュファイルを削除（存在しなければ false）
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if cache_path.exists() {
            std::fs::remove_file(cache_path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// 指定スプレッドシートのキャッシュかどうか
    pub fn matches(&self, spreadsheet_id: &str) -> bool {
        !self.is_empty() && self.spreadsheet_id == spreadsheet_id
    }

    /// `now` 時点でTTL以内か
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl_seconds: u64) -> bool {
        if self.is_empty() {
            return false;
        }
        let ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
        now.signed_duration_since(self.fetched_at).num_seconds() < ttl
    }

    /// キャッシュ件数
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl Default for SkillCache {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            spreadsheet_id: String::new(),
            source: String::new(),
            fetched_at: DateTime::<Utc>::default(),
            skills: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use skill_sheet_common::Category;

    fn sample() -> SkillCache {
        SkillCache::new(
            "sheet-1",
            "api",
            vec![SkillRecord {
                name: "PHP".into(),
                level: 12,
                category: Category::Backend,
                experience: "1年0ヶ月".into(),
            }],
        )
    }

    #[test]
    fn test_is_fresh_within_ttl() {
        let cache = sample();
        let now = cache.fetched_at + Duration::seconds(299);
        assert!(cache.is_fresh(now, 300));
    }

    #[test]
    fn test_is_stale_after_ttl() {
        let cache = sample();
        let now = cache.fetched_at + Duration::seconds(300);
        assert!(!cache.is_fresh(now, 300));
    }

    #[test]
    fn test_empty_cache_is_never_fresh() {
        let cache = SkillCache::default();
        assert!(!cache.is_fresh(Utc::now(), u64::MAX));
    }

    #[test]
    fn test_matches_spreadsheet_id() {
        let cache = sample();
        assert!(cache.matches("sheet-1"));
        assert!(!cache.matches("sheet-2"));
        assert!(!SkillCache::default().matches(""));
    }
}
