//! スキル名の正規化（重複判定キーの生成）
//!
//! "PHP 8.1" と "php8" のように表記が揺れるスキルを同じキーにまとめる。
//! キーは判定専用で、表示には最初に出現した表記を使う。

use crate::cleaner::strip_trailing_version;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// バージョン付きで書かれやすいエコシステム名（文字列全体に一致した場合のみ置換）
    static ref PREFIX_VERSION_RULES: Vec<(Regex, &'static str)> = {
        let mut rules = vec![
            (Regex::new(r"^php\s*[0-9]+(\.[0-9]+)*\s*,?\s*[0-9]+(\.[0-9]+)*\s*$").unwrap(), "php"),
            (Regex::new(r"^php\s*[0-9]+(\.[0-9]+)*\s*,?\s*$").unwrap(), "php"),
        ];
        for name in ["php", "node", "react", "vue", "angular", "typescript", "javascript"] {
            let pattern = format!(r"^{}\s*[0-9]+(\.[0-9]+)*$", name);
            rules.push((Regex::new(&pattern).unwrap(), name));
        }
        rules
    };
    static ref SEPARATOR_RE: Regex = Regex::new(r"[\s\-.,]").unwrap();
}

/// 表記揺れの統一（上から順に部分文字列を置換）
const SPELLING_FOLDS: &[(&str, &str)] = &[
    ("javascript", "js"),
    ("typescript", "ts"),
    ("nodejs", "node"),
    ("nextjs", "next"),
    ("nuxtjs", "nuxt"),
    ("vuejs", "vue"),
    ("angularjs", "angular"),
];

/// スキル名を重複判定用のキーに正規化する
///
/// # Examples
/// ```
/// use skill_sheet_common::normalize_skill_name;
///
/// assert_eq!(normalize_skill_name("PHP 8.1"), "php");
/// assert_eq!(normalize_skill_name("Node.js"), "node");
/// assert_eq!(normalize_skill_name("TypeScript"), "ts");
/// ```
pub fn normalize_skill_name(name: &str) -> String {
    let mut key = name.to_lowercase().trim().to_string();

    for (re, canonical) in PREFIX_VERSION_RULES.iter() {
        if re.is_match(&key) {
            key = (*canonical).to_string();
        }
    }

    key = strip_trailing_version(&key);
    key = SEPARATOR_RE.replace_all(&key, "").into_owned();

    for (from, to) in SPELLING_FOLDS {
        key = key.replace(from, to);
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_php_versions() {
        assert_eq!(normalize_skill_name("PHP8.1"), "php");
        assert_eq!(normalize_skill_name("PHP 8.2"), "php");
        assert_eq!(normalize_skill_name("PHP8"), "php");
        assert_eq!(normalize_skill_name("php 8.1, 8.2"), "php");
        assert_eq!(normalize_skill_name("PHP 7.4,"), "php");
    }

    #[test]
    fn test_ecosystem_versions() {
        assert_eq!(normalize_skill_name("React18"), "react");
        assert_eq!(normalize_skill_name("Vue 3"), "vue");
        assert_eq!(normalize_skill_name("Angular 15.2"), "angular");
        assert_eq!(normalize_skill_name("node 20"), "node");
        assert_eq!(normalize_skill_name("TypeScript 5.0"), "ts");
        assert_eq!(normalize_skill_name("JavaScript ES6"), "jses");
    }

    #[test]
    fn test_full_width_version_not_folded() {
        assert_eq!(normalize_skill_name("PHP８"), "php８");
        assert_ne!(normalize_skill_name("Vue３"), normalize_skill_name("Vue 3"));
    }

    #[test]
    fn test_spelling_folds() {
        assert_eq!(normalize_skill_name("JavaScript"), "js");
        assert_eq!(normalize_skill_name("Node.js"), "node");
        assert_eq!(normalize_skill_name("Next.js"), "next");
        assert_eq!(normalize_skill_name("Nuxt.js"), "nuxt");
        assert_eq!(normalize_skill_name("Vue.js"), "vue");
        assert_eq!(normalize_skill_name("AngularJS"), "angular");
    }

    #[test]
    fn test_separators_removed() {
        assert_eq!(normalize_skill_name("React Native"), "reactnative");
        assert_eq!(normalize_skill_name("GitHub-Actions"), "githubactions");
        assert_eq!(normalize_skill_name(" ASP.NET "), "aspnet");
    }

    #[test]
    fn test_symbols_kept() {
        assert_eq!(normalize_skill_name("C#"), "c#");
        assert_eq!(normalize_skill_name("C++"), "c++");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "PHP 8.1, 8.2",
            "Node.js",
            "React Native",
            "TypeScript 5",
            "Vue.js 3",
            "Amazon Web Services",
            "Python3",
            "ASP.NET Core",
            "C#",
            "Next.js",
            "MySQL 8.0",
        ];
        for sample in samples {
            let once = normalize_skill_name(sample);
            assert_eq!(normalize_skill_name(&once), once, "not idempotent: {}", sample);
        }
    }
}
