//! Grid → スキル一覧 の変換（集計 + カテゴリ上書き）

use crate::error::Result;
use skill_sheet_common::{
    apply_overrides, parse_skill_sheet_with_layout, CategoryOverrides, SheetLayout, SkillRecord,
};
use std::path::Path;

/// 既定で適用するカテゴリ上書きプリセット
pub const DEFAULT_OVERRIDE_PRESET: &str = "portfolio";

/// Gridからスキル一覧を生成する
///
/// `adjust` が true の場合、プリセットと `override_file` のカテゴリ上書きを適用する。
pub fn build_skills(
    grid: &[Vec<String>],
    adjust: bool,
    override_file: Option<&Path>,
) -> Result<Vec<SkillRecord>> {
    let (skills, stats) = parse_skill_sheet_with_layout(grid, &SheetLayout::default());
    tracing::info!(
        rows = stats.rows,
        projects = stats.projects,
        tokens = stats.tokens,
        skills = skills.len(),
        "スキルを集計しました"
    );
    if stats.projects_without_period > 0 {
        tracing::warn!("作業期間が見つからない案件: {}件", stats.projects_without_period);
    }

    if !adjust {
        return Ok(skills);
    }
    adjust_skills(&skills, override_file)
}

/// 集計済みスキルにカテゴリ上書き（プリセット + `override_file`）を適用する
pub fn adjust_skills(skills: &[SkillRecord], override_file: Option<&Path>) -> Result<Vec<SkillRecord>> {
    let custom = override_file.map(CategoryOverrides::from_file).transpose()?;
    Ok(apply_overrides(skills, Some(DEFAULT_OVERRIDE_PRESET), custom.as_ref()))
}
