//! スキル名のクリーンアップ
//!
//! セルの自由記述（改行区切り）からスキル名を切り出し、
//! 末尾のバージョン番号や先頭の箇条書き記号を取り除く。

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// 末尾のバージョン除去パターン（上から順に試し、最初に一致したものだけ適用）
    static ref TRAILING_VERSION_RES: [Regex; 3] = [
        // "8.1, 8.2" のような2つのバージョン
        Regex::new(r"\s*[0-9]+(\.[0-9]+)*\s*,?\s*[0-9]+(\.[0-9]+)*\s*$").unwrap(),
        // "8.1," のような単一バージョン+カンマ
        Regex::new(r"\s*[0-9]+(\.[0-9]+)*\s*,?\s*$").unwrap(),
        // " 3.9" のような空白区切りのバージョン
        Regex::new(r"\s+[0-9]+(\.[0-9]+)*$").unwrap(),
    ];
    static ref LEADING_MARK_RE: Regex = Regex::new(r"^[\s\-・]+").unwrap();
}

/// 末尾のバージョン表記を1回だけ除去する
pub fn strip_trailing_version(text: &str) -> String {
    for re in TRAILING_VERSION_RES.iter() {
        if re.is_match(text) {
            return re.replace(text, "").into_owned();
        }
    }
    text.to_string()
}

/// スキル名をクリーンアップする
///
/// # Examples
/// ```
/// use skill_sheet_common::clean_token;
///
/// assert_eq!(clean_token("PHP 8.1, 8.2"), "PHP");
/// assert_eq!(clean_token("・Laravel 10"), "Laravel");
/// ```
pub fn clean_token(raw: &str) -> String {
    let stripped = strip_trailing_version(raw.trim());
    LEADING_MARK_RE.replace(&stripped, "").trim().to_string()
}

/// セルのテキストを改行で分割し、クリーンアップ済みのスキル名を返す
///
/// 1文字以下になったものは捨てる。
pub fn split_cell(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(clean_token)
        .filter(|token| token.chars().count() > 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_version_range() {
        assert_eq!(clean_token("PHP 8.1, 8.2"), "PHP");
        assert_eq!(clean_token("Python 3.9,3.10"), "Python");
    }

    #[test]
    fn test_clean_single_version() {
        assert_eq!(clean_token("PHP8.1"), "PHP");
        assert_eq!(clean_token("PHP 8.1,"), "PHP");
        assert_eq!(clean_token("Vue3"), "Vue");
        assert_eq!(clean_token("Node.js 18"), "Node.js");
    }

    #[test]
    fn test_clean_keeps_full_width_version() {
        assert_eq!(clean_token("Vue３"), "Vue３");
        assert_eq!(clean_token("PHP ８.１"), "PHP ８.１");
    }

    #[test]
    fn test_clean_leading_marks() {
        assert_eq!(clean_token("・Docker"), "Docker");
        assert_eq!(clean_token("- Redis"), "Redis");
        assert_eq!(clean_token(" -・ AWS"), "AWS");
    }

    #[test]
    fn test_clean_keeps_plain_names() {
        assert_eq!(clean_token("React Native"), "React Native");
        assert_eq!(clean_token("C#"), "C#");
        assert_eq!(clean_token("Objective-C"), "Objective-C");
    }

    #[test]
    fn test_clean_only_first_rule_applies() {
        // 2つ目の数値範囲だけが除去され、残りの " 1" は残る
        assert_eq!(clean_token("Foo 1 2 3"), "Foo 1");
    }

    #[test]
    fn test_strip_trailing_version_no_match() {
        assert_eq!(strip_trailing_version("Laravel"), "Laravel");
    }

    #[test]
    fn test_split_cell() {
        let cell = "React 18\n TypeScript \n\n・Next.js\nC\n2";
        assert_eq!(split_cell(cell), vec!["React", "TypeScript", "Next.js"]);
    }

    #[test]
    fn test_split_cell_empty() {
        assert!(split_cell("").is_empty());
        assert!(split_cell("\n \n").is_empty());
    }

    #[test]
    fn test_split_cell_crlf() {
        assert_eq!(split_cell("Go\r\nRust\r\n"), vec!["Go", "Rust"]);
    }
}
