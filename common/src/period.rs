//! 経験期間（「1年6ヶ月」形式）の解析と表示

use lazy_static::lazy_static;
use regex::Regex;

// 数字は半角のみ（全角の「６ヶ月」は期間として扱わない）
lazy_static! {
    static ref YEAR_RE: Regex = Regex::new(r"([0-9]+)年").unwrap();
    static ref MONTH_RE: Regex = Regex::new(r"([0-9]+)ヶ月").unwrap();
    static ref DURATION_RE: Regex = Regex::new(r"[0-9]+年[0-9]+ヶ月|[0-9]+ヶ月").unwrap();
}

/// 期間文字列を月数に変換する
///
/// 「年」「ヶ月」の直前の整数をそれぞれ読み取り、`年 * 12 + 月` を返す。
/// 該当しない部分は0として扱うため、どの入力でも失敗しない。
///
/// # Examples
/// ```
/// use skill_sheet_common::parse_months;
///
/// assert_eq!(parse_months("1年6ヶ月"), 18);
/// assert_eq!(parse_months("2年"), 24);
/// assert_eq!(parse_months(""), 0);
/// ```
pub fn parse_months(text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }

    let years = capture_number(&YEAR_RE, text);
    let months = capture_number(&MONTH_RE, text);

    years.saturating_mul(12).saturating_add(months)
}

fn capture_number(re: &Regex, text: &str) -> u32 {
    re.captures(text)
        .and_then(|cap| cap[1].parse::<u32>().ok())
        .unwrap_or(0)
}

/// 月数を表示用文字列に変換する
///
/// - 12ヶ月未満: `"5ヶ月"`
/// - 端数なし: `"2年"`
/// - 端数あり: `"1年2ヶ月"`
pub fn format_months(months: u32) -> String {
    if months < 12 {
        return format!("{}ヶ月", months);
    }

    let years = months / 12;
    let remaining = months % 12;

    if remaining == 0 {
        format!("{}年", years)
    } else {
        format!("{}年{}ヶ月", years, remaining)
    }
}

/// 作業期間のセルとして扱える文字列か判定（「N年Nヶ月」または「Nヶ月」を含む）
pub fn is_duration(text: &str) -> bool {
    DURATION_RE.is_match(text)
}

/// 期間リストの合計月数
pub fn total_months<S: AsRef<str>>(periods: &[S]) -> u32 {
    periods
        .iter()
        .map(|p| parse_months(p.as_ref()))
        .fold(0u32, |total, months| total.saturating_add(months))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_months() {
        assert_eq!(parse_months("1年6ヶ月"), 18);
        assert_eq!(parse_months("6ヶ月"), 6);
        assert_eq!(parse_months(""), 0);
        assert_eq!(parse_months("2年"), 24);
        assert_eq!(parse_months("0年11ヶ月"), 11);
    }

    #[test]
    fn test_parse_months_surrounding_text() {
        assert_eq!(parse_months("期間: 3年2ヶ月（継続中）"), 38);
        assert_eq!(parse_months("未定"), 0);
        assert_eq!(parse_months("6か月"), 0);
    }

    #[test]
    fn test_parse_months_overflow_saturates() {
        assert_eq!(parse_months("99999999999年"), 0);
        assert_eq!(parse_months("400000000年"), u32::MAX);
    }

    #[test]
    fn test_format_months() {
        assert_eq!(format_months(18), "1年6ヶ月");
        assert_eq!(format_months(24), "2年");
        assert_eq!(format_months(6), "6ヶ月");
        assert_eq!(format_months(14), "1年2ヶ月");
        assert_eq!(format_months(0), "0ヶ月");
        assert_eq!(format_months(12), "1年");
    }

    #[test]
    fn test_format_parse_inverse() {
        for months in [0, 1, 11, 12, 13, 25, 120] {
            assert_eq!(parse_months(&format_months(months)), months);
        }
    }

    #[test]
    fn test_is_duration() {
        assert!(is_duration("1年0ヶ月"));
        assert!(is_duration("7ヶ月"));
        assert!(is_duration("約 2年3ヶ月"));
        assert!(!is_duration("2年"));
        assert!(!is_duration("2023/04 - 2024/03"));
        assert!(!is_duration(""));
    }

    #[test]
    fn test_full_width_digits_not_parsed() {
        assert!(!is_duration("６ヶ月"));
        assert!(!is_duration("１年２ヶ月"));
        assert_eq!(parse_months("１年６ヶ月"), 0);
    }

    #[test]
    fn test_total_months() {
        let periods = vec!["1年0ヶ月".to_string(), "6ヶ月".to_string(), String::new()];
        assert_eq!(total_months(&periods), 18);
        let empty: Vec<String> = Vec::new();
        assert_eq!(total_months(&empty), 0);
    }
}
