//! カテゴリ上書きモジュール
//!
//! 集計後のスキルに対して、名前に基づくカテゴリの付け替えを行う。
//! （例: Supabase / Firebase は tools ではなく devops として表示する）

use crate::error::{Error, Result};
use crate::types::{Category, SkillRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// カテゴリ上書き定義
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryOverrides {
    /// スキル名（大文字小文字無視）の完全一致
    #[serde(default)]
    pub exact: BTreeMap<String, Category>,
    /// スキル名に含まれるキーワード（大文字小文字無視）
    #[serde(default)]
    pub contains: BTreeMap<String, Category>,
}

impl CategoryOverrides {
    /// 組み込みプリセットを取得
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "portfolio" | "default" => Some(Self::portfolio_preset()),
            "none" => Some(Self::default()),
            _ => None,
        }
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.contains.keys().any(|k| k.trim().is_empty()) {
            return Err(Error::Config("空のキーワードは指定できません".into()));
        }
        Ok(config)
    }

    /// ポートフォリオ表示用プリセット
    fn portfolio_preset() -> Self {
        let mut config = Self::default();
        config.contains.insert("supabase".into(), Category::Devops);
        config.contains.insert("firebase".into(), Category::Devops);
        config
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.contains.is_empty()
    }

    /// 上書き後のカテゴリ（完全一致を優先し、部分一致は最長キーワード）
    ///
    /// 同じ長さのキーワードが複数一致した場合は辞書順で先のものを採用する。
    pub fn category_for(&self, name: &str) -> Option<Category> {
        let lower = name.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }

        if let Some((_, category)) = self.exact.iter().find(|(k, _)| k.to_lowercase() == lower) {
            return Some(*category);
        }

        let mut best_match: Option<(usize, Category)> = None;
        for (keyword, category) in &self.contains {
            let keyword = keyword.to_lowercase();
            if lower.contains(&keyword) && best_match.map_or(true, |(len, _)| keyword.len() > len) {
                best_match = Some((keyword.len(), *category));
            }
        }

        best_match.map(|(_, category)| category)
    }

    /// スキル1件に上書きを適用
    pub fn apply(&self, skill: &SkillRecord) -> SkillRecord {
        let mut updated = skill.clone();
        if let Some(category) = self.category_for(&skill.name) {
            updated.category = category;
        }
        updated
    }

    /// 設定をマージ（後から追加した設定が優先）
    pub fn merge(&mut self, other: &CategoryOverrides) {
        self.exact.extend(other.exact.clone());
        self.contains.extend(other.contains.clone());
    }
}

/// スキル一覧にカテゴリ上書きを適用
///
/// # Arguments
/// * `skills` - 集計済みスキル
/// * `preset` - 組み込みプリセット名
/// * `custom` - 追加の上書き定義（プリセットより優先）
pub fn apply_overrides(
    skills: &[SkillRecord],
    preset: Option<&str>,
    custom: Option<&CategoryOverrides>,
) -> Vec<SkillRecord> {
    let mut config = CategoryOverrides::default();

    if let Some(preset_name) = preset {
        match CategoryOverrides::from_preset(preset_name) {
            Some(preset_config) => config.merge(&preset_config),
            None => tracing::warn!(preset = preset_name, "unknown category preset (portfolio/none)"),
        }
    }

    if let Some(custom) = custom {
        config.merge(custom);
    }

    skills.iter().map(|s| config.apply(s)).collect()
}
