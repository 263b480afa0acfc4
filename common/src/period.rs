//! 保証期間の計算
//!
//! 施工完了日 + 保証年数 − 1日 を「YYYY年M月D日 〜 YYYY年M月D日」で返す。
//! 日付・年数が読めない場合もエラーにはせず、空欄（全角スペース）または0年として扱う。

use chrono::{Datelike, NaiveDate};

/// 日付が読めないときの表示（レイアウト維持のため空文字にはしない）
pub const BLANK_PERIOD: &str = "\u{3000}";

/// 期間の区切り
pub const PERIOD_SEPARATOR: &str = " 〜 ";

/// 保証期間の表示文字列
pub fn warranty_period(completion_date: &str, warranty_years: &str) -> String {
    let Some(start) = parse_completion_date(completion_date) else {
        return BLANK_PERIOD.to_string();
    };
    let years = parse_years(warranty_years);

    match warranty_end_date(start, years) {
        Some(end) => format!(
            "{}{}{}",
            format_japanese_date(start),
            PERIOD_SEPARATOR,
            format_japanese_date(end)
        ),
        None => BLANK_PERIOD.to_string(),
    }
}

/// 施工完了日をパース
///
/// "2024-03-10" / "2024-3-5" / "2024-03-10 09:30" を受け付ける。
pub fn parse_completion_date(text: &str) -> Option<NaiveDate> {
    let date_part = text
        .trim()
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()?;
    if date_part.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// 保証年数をパース（先頭の整数部分のみ。読めなければ0）
///
/// "5" → 5, "5年" → 5, "-2" → -2, "abc" → 0
pub fn parse_years(text: &str) -> i64 {
    let s = text.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    // 桁あふれは非常に大きな値として扱い、日付計算側で範囲外にする
    digits.parse::<i64>().map(|n| sign * n).unwrap_or(sign * i64::MAX)
}

/// 保証終了日: 開始日の `years` 年後の前日
///
/// 応当日が存在しない場合（2/29 → 平年）は3/1に繰り上げてから1日戻す。
pub fn warranty_end_date(start: NaiveDate, years: i64) -> Option<NaiveDate> {
    let offset = i32::try_from(years).ok()?;
    let year = start.year().checked_add(offset)?;
    let anniversary = NaiveDate::from_ymd_opt(year, start.month(), start.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))?;
    anniversary.pred_opt()
}

/// 和文の日付表記（ゼロ埋めなし）: 2024年3月10日
pub fn format_japanese_date(date: NaiveDate) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_year_period() {
        assert_eq!(
            warranty_period("2024-03-10", "5"),
            "2024年3月10日 〜 2029年3月9日"
        );
    }

    #[test]
    fn test_blank_for_missing_or_invalid_date() {
        assert_eq!(warranty_period("", "5"), BLANK_PERIOD);
        assert_eq!(warranty_period("not-a-date", "3"), BLANK_PERIOD);
        assert_eq!(warranty_period("2024-13-01", "3"), BLANK_PERIOD);
        assert!(!BLANK_PERIOD.is_empty());
    }

    #[test]
    fn test_unparsable_years_is_zero() {
        // 0年 → 終了日は開始日の前日
        assert_eq!(
            warranty_period("2024-01-01", "abc"),
            "2024年1月1日 〜 2023年12月31日"
        );
    }

    #[test]
    fn test_parse_years_leading_integer() {
        assert_eq!(parse_years("5"), 5);
        assert_eq!(parse_years(" 10年"), 10);
        assert_eq!(parse_years("-2"), -2);
        assert_eq!(parse_years("3.9"), 3);
        assert_eq!(parse_years(""), 0);
        assert_eq!(parse_years("年"), 0);
    }

    #[test]
    fn test_parse_completion_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_completion_date("2024-03-05"), expected);
        assert_eq!(parse_completion_date("2024-3-5"), expected);
        assert_eq!(parse_completion_date(" 2024-03-05 09:30 "), expected);
        assert_eq!(parse_completion_date("2024/03/05"), None);
    }

    #[test]
    fn test_leap_day_rolls_forward() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        // 2025-02-29 は存在しないので 2025-03-01 の前日
        assert_eq!(
            warranty_end_date(start, 1),
            NaiveDate::from_ymd_opt(2025, 2, 28)
        );
        assert_eq!(
            warranty_end_date(start, 4),
            NaiveDate::from_ymd_opt(2028, 2, 28)
        );
    }

    #[test]
    fn test_huge_years_is_blank() {
        assert_eq!(warranty_period("2024-01-01", "99999999999999999999"), BLANK_PERIOD);
    }

    #[test]
    fn test_format_without_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2029, 3, 9).unwrap();
        assert_eq!(format_japanese_date(date), "2029年3月9日");
    }
}
