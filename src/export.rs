//! スキル一覧の出力
//!
//! - JSON（`[{name, level, category, experience}]`、整形済み）
//! - カテゴリ別の一覧表示

use crate::error::Result;
use skill_sheet_common::{group_by_category, SkillRecord};
use std::io::Write;
use std::path::Path;

/// スキル一覧をJSONで書き出す（`output` が None なら標準出力）
pub fn write_skills(skills: &[SkillRecord], output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(skills)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, json + "\n")?;
            eprintln!("✔ 結果を保存: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", json)?;
        }
    }
    Ok(())
}

/// スキル一覧JSONを読み込む
pub fn read_skills(path: &Path) -> Result<Vec<SkillRecord>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// カテゴリ別一覧を文字列にする
pub fn format_summary(skills: &[SkillRecord]) -> String {
    let mut out = String::new();

    for (category, members) in group_by_category(skills) {
        out.push_str(&format!("[{}] {}件\n", category, members.len()));
        for skill in members {
            out.push_str(&format!("  {:<24} {:>4}ヶ月  {}\n", skill.name, skill.level, skill.experience));
        }
    }
    out.push_str(&format!("合計: {}件\n", skills.len()));
    out
}
