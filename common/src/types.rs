//! スキルシートの型定義
//!
//! - Grid: スプレッドシートから取得した生のセル配列
//! - Category: スキルの分類
//! - SkillRecord: 最終出力（JSON配列の要素）

use serde::{Deserialize, Serialize};

/// 行優先のセル配列（行ごとに列数が異なってよい）
pub type Grid = Vec<Vec<String>>;

/// 行からセルを取得（欠けているセルは空文字列）
pub fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(String::as_str).unwrap_or("")
}

/// スキルカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Frontend,
    Backend,
    Devops,
    Mobile,
    Tools,
}

impl Category {
    /// 表示順
    pub const ALL: [Category; 5] = [
        Category::Frontend,
        Category::Backend,
        Category::Devops,
        Category::Mobile,
        Category::Tools,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Frontend => "frontend",
            Category::Backend => "backend",
            Category::Devops => "devops",
            Category::Mobile => "mobile",
            Category::Tools => "tools",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "frontend" | "front" => Ok(Category::Frontend),
            "backend" | "back" => Ok(Category::Backend),
            "devops" | "infra" => Ok(Category::Devops),
            "mobile" => Ok(Category::Mobile),
            "tools" | "tool" => Ok(Category::Tools),
            _ => Err(format!(
                "Unknown category: {}. Use frontend, backend, devops, mobile, or tools",
                s
            )),
        }
    }
}

/// 集計済みスキル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    /// 最初に出現した表記
    pub name: String,
    /// 経験月数の合計
    pub level: u32,
    pub category: Category,
    /// 表示用の経験年数（例: "1年6ヶ月"）
    pub experience: String,
}

/// カテゴリ別にスキルをまとめる（カテゴリ順は `Category::ALL`、各グループ内は入力順）
pub fn group_by_category(skills: &[SkillRecord]) -> Vec<(Category, Vec<&SkillRecord>)> {
    Category::ALL
        .iter()
        .map(|category| {
            let members: Vec<&SkillRecord> = skills.iter().filter(|s| s.category == *category).collect();
            (*category, members)
        })
        .filter(|(_, members)| !members.is_empty())
        .collect()
}
