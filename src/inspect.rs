//! スキル名1件ごとの処理結果（クリーンアップ → 分類 → 正規化）を確認する

use skill_sheet_common::{classify, clean_token, normalize_skill_name, Category};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenReport {
    pub raw: String,
    pub cleaned: String,
    /// 集計対象になるか（クリーンアップ後2文字以上）
    pub kept: bool,
    pub normalized: String,
    pub category: Category,
}

pub fn inspect_token(raw: &str, default_category: Category) -> TokenReport {
    let cleaned = clean_token(raw);
    let kept = cleaned.chars().count() > 1;

    TokenReport {
        raw: raw.to_string(),
        kept,
        normalized: normalize_skill_name(&cleaned),
        category: classify(&cleaned, default_category),
        cleaned,
    }
}

pub fn format_report(reports: &[TokenReport]) -> String {
    let mut out = String::new();
    for report in reports {
        out.push_str(&format!("{:?}\n", report.raw));
        if !report.kept {
            out.push_str(&format!("  除外（短すぎる名前）: {:?}\n", report.cleaned));
            continue;
        }
        out.push_str(&format!("  表示名:   {}\n", report.cleaned));
        out.push_str(&format!("  正規化:   {}\n", report.normalized));
        out.push_str(&format!("  カテゴリ: {}\n", report.category));
    }
    out
}
