//! Skill Sheet Common Library
//!
//! 経歴書スプレッドシートからスキル一覧を生成するコア処理。
//! ネットワークには触れず、同じGridからは常に同じ出力を返す。

pub mod types;
pub mod error;
pub mod period;
pub mod cleaner;
pub mod normalizer;
pub mod classifier;
pub mod aggregator;
pub mod alias;
pub mod parser;

pub use types::{cell, group_by_category, Category, Grid, SkillRecord};
pub use error::{Error, Result};
pub use period::{format_months, is_duration, parse_months, total_months};
pub use cleaner::{clean_token, split_cell};
pub use normalizer::normalize_skill_name;
pub use classifier::classify;
pub use aggregator::{
    parse_skill_sheet, parse_skill_sheet_with_layout, ScanStats, SheetLayout, SkillAggregator,
    SkillColumn,
};
pub use alias::{apply_overrides, CategoryOverrides};
pub use parser::{parse_csv, parse_grid_json, ValueRange};
