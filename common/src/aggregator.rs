//! 経歴書シートの走査とスキル集計
//!
//! ## 処理フロー
//! 1. 案件行（A列が番号、G列が案件名）を検出
//! 2. 直後の数行から作業期間（「1年6ヶ月」など）を探す
//! 3. 言語・FW・インフラの3セルからスキル名を抽出
//! 4. 正規化キーで重複をまとめ、期間を積み上げる
//! 5. 合計月数の降順に並べて出力

use crate::classifier::classify;
use crate::cleaner::split_cell;
use crate::normalizer::normalize_skill_name;
use crate::period::{format_months, is_duration, total_months};
use crate::types::{cell, Category, SkillRecord};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref PROJECT_NUMBER_RE: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// 技術セルの列とその既定カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillColumn {
    pub index: usize,
    pub default_category: Category,
}

/// シートの列配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    /// これより列数の少ない行は無視する
    pub min_columns: usize,
    /// 案件番号の列（A列）
    pub number_column: usize,
    /// 案件名の列（G列）
    pub name_column: usize,
    /// 作業期間の列（C列）
    pub period_column: usize,
    /// 案件行の後ろで作業期間を探す行数
    pub period_window: usize,
    /// 言語・FW・インフラの列
    pub skill_columns: Vec<SkillColumn>,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            min_columns: 37,
            number_column: 0,
            name_column: 6,
            period_column: 2,
            period_window: 5,
            skill_columns: vec![
                // 言語
                SkillColumn { index: 28, default_category: Category::Backend },
                // フレームワーク・ライブラリ
                SkillColumn { index: 32, default_category: Category::Tools },
                // サーバー・インフラ
                SkillColumn { index: 36, default_category: Category::Devops },
            ],
        }
    }
}

/// 集計中のスキル
#[derive(Debug, Clone)]
struct AggregateEntry {
    display_name: String,
    periods: Vec<String>,
    category: Category,
}

/// 走査の統計情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// 走査した行数
    pub rows: usize,
    /// 検出した案件数
    pub projects: usize,
    /// 作業期間が見つからなかった案件数
    pub projects_without_period: usize,
    /// 抽出したスキル名の数（重複含む）
    pub tokens: usize,
    /// 既存スキルにまとめた数
    pub merged: usize,
}

/// スキル集計器
///
/// 正規化キー → 集計エントリの位置、を持ち、エントリ自体は初出順に並べる。
#[derive(Debug, Default)]
pub struct SkillAggregator {
    index: HashMap<String, usize>,
    entries: Vec<AggregateEntry>,
    stats: ScanStats,
}

impl SkillAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// スキル名1件を取り込む
    ///
    /// 既に同じ正規化キーのスキルがあれば期間を追加するだけで、カテゴリは変えない。
    pub fn add(&mut self, name: &str, period: &str, default_category: Category) {
        let category = classify(name, default_category);
        let key = normalize_skill_name(name);
        self.stats.tokens += 1;

        if let Some(&position) = self.index.get(&key) {
            let entry = &mut self.entries[position];
            tracing::debug!(skill = name, existing = %entry.display_name, "merging skill");
            entry.periods.push(period.to_string());
            self.stats.merged += 1;
        } else {
            tracing::debug!(skill = name, key = %key, %category, "adding skill");
            self.index.insert(key, self.entries.len());
            self.entries.push(AggregateEntry {
                display_name: name.to_string(),
                periods: vec![period.to_string()],
                category,
            });
        }
    }

    /// セルの自由記述からスキルを取り込む
    pub fn add_cell(&mut self, text: &str, period: &str, default_category: Category) {
        if text.is_empty() {
            return;
        }
        for token in split_cell(text) {
            self.add(&token, period, default_category);
        }
    }

    /// 行全体を走査して案件ごとのスキルを取り込む
    pub fn scan(&mut self, rows: &[Vec<String>], layout: &SheetLayout) {
        for (i, row) in rows.iter().enumerate() {
            self.stats.rows += 1;

            if row.len() < layout.min_columns {
                continue;
            }

            let project_number = cell(row, layout.number_column).trim();
            let project_name = cell(row, layout.name_column).trim();

            if !PROJECT_NUMBER_RE.is_match(project_number) || project_name.is_empty() {
                continue;
            }

            let period = find_period(rows, i, layout);
            self.stats.projects += 1;
            if period.is_empty() {
                self.stats.projects_without_period += 1;
            }

            tracing::debug!(
                project = project_number,
                name = project_name,
                period = %period,
                "project row found"
            );

            for column in &layout.skill_columns {
                self.add_cell(cell(row, column.index), &period, column.default_category);
            }
        }
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// 合計月数の降順（同数は初出順）でスキル一覧を返す
    pub fn into_records(self) -> Vec<SkillRecord> {
        let mut records: Vec<SkillRecord> = self
            .entries
            .into_iter()
            .map(|entry| {
                let level = total_months(&entry.periods);
                SkillRecord {
                    name: entry.display_name,
                    level,
                    category: entry.category,
                    experience: format_months(level),
                }
            })
            .collect();

        // sort_by は安定ソート
        records.sort_by(|a, b| b.level.cmp(&a.level));
        records
    }
}

/// 案件行の直後から作業期間のセルを探す（見つからなければ空文字列）
fn find_period(rows: &[Vec<String>], anchor: usize, layout: &SheetLayout) -> String {
    let start = anchor + 1;
    let end = (anchor + 1 + layout.period_window).min(rows.len());
    if start >= end {
        return String::new();
    }

    rows[start..end]
        .iter()
        .map(|row| cell(row, layout.period_column))
        .find(|text| !text.is_empty() && is_duration(text))
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

/// 経歴書の行データからスキル一覧を生成する
///
/// # Arguments
/// * `rows` - シートのセル配列（行優先）
///
/// # Returns
/// 合計経験月数の降順に並んだスキル一覧
pub fn parse_skill_sheet(rows: &[Vec<String>]) -> Vec<SkillRecord> {
    parse_skill_sheet_with_layout(rows, &SheetLayout::default()).0
}

/// 列配置を指定してスキル一覧と統計情報を生成する
pub fn parse_skill_sheet_with_layout(
    rows: &[Vec<String>],
    layout: &SheetLayout,
) -> (Vec<SkillRecord>, ScanStats) {
    let mut aggregator = SkillAggregator::new();
    aggregator.scan(rows, layout);
    let stats = aggregator.stats().clone();
    (aggregator.into_records(), stats)
}
