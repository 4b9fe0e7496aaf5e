//! Long-form statement dates ("27 November 2025") and statement periods
//! ("1 November 2025 [GMT] - 30 November 2025 [GMT]").

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{ParseError, Result};
use crate::types::DateRange;

const DATE_PATTERN: &str = r"(\d{1,2})\s+(January|February|March|April|May|June|July|August|September|October|November|December)\s+(\d{4})";

fn month_number(name: &str) -> Option<u32> {
    let month = match name {
        "January" => 1,
        "February" => 2,
        "March" => 3,
        "April" => 4,
        "May" => 5,
        "June" => 6,
        "July" => 7,
        "August" => 8,
        "September" => 9,
        "October" => 10,
        "November" => 11,
        "December" => 12,
        _ => return None,
    };
    Some(month)
}

fn full_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!("^{DATE_PATTERN}$")).expect("full date regex"))
}

// No boundary after the year: run-on layouts glue the next field onto it.
fn leading_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!("^{DATE_PATTERN}")).expect("leading date regex"))
}

fn date_range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<from>.+?)\s*\[[^\]]*\]\s*-\s*(?P<to>.+?)\s*\[[^\]]*\]$")
            .expect("date range regex")
    })
}

fn date_from_captures(caps: &regex::Captures<'_>) -> Option<NaiveDate> {
    let day: u32 = caps[1].parse().ok()?;
    let month = month_number(&caps[2])?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse `D Month YYYY` (full English month name). Surrounding whitespace is ignored.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    full_date_re()
        .captures(s.trim())
        .and_then(|caps| date_from_captures(&caps))
        .ok_or_else(|| ParseError::InvalidDate(s.to_string()))
}

/// Parse `<date> [<tz>] - <date> [<tz>]`. The bracketed annotations are discarded.
///
/// A line without that shape is `InvalidDateRange`; a malformed date inside
/// an otherwise well-shaped range surfaces as `InvalidDate`.
pub fn parse_date_range(s: &str) -> Result<DateRange> {
    let caps = date_range_re()
        .captures(s.trim())
        .ok_or_else(|| ParseError::InvalidDateRange(s.to_string()))?;

    Ok(DateRange {
        from: parse_date(&caps["from"])?,
        to: parse_date(&caps["to"])?,
    })
}

/// Date at the very start of `line`, plus whatever follows it.
///
/// Returns `None` for a missing or non-calendar date.
pub fn leading_date(line: &str) -> Option<(NaiveDate, &str)> {
    let caps = leading_date_re().captures(line)?;
    let date = date_from_captures(&caps)?;
    let end = caps.get(0)?.end();
    Some((date, &line[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_case("27 November 2025" => ymd(2025, 11, 27); "two_digit_day")]
    #[test_case("1 November 2025" => ymd(2025, 11, 1); "single_digit_day")]
    #[test_case("  3 March 2024 \n" => ymd(2024, 3, 3); "surrounding_whitespace")]
    #[test_case("09 January 2026" => ymd(2026, 1, 9); "zero_padded_day")]
    #[test_case("31 December 1999" => ymd(1999, 12, 31); "year_end")]
    fn test_parse_date(input: &str) -> NaiveDate {
        parse_date(input).unwrap()
    }

    #[test_case("2025-11-27"; "iso_input")]
    #[test_case(""; "empty")]
    #[test_case("hello world"; "not_a_date")]
    #[test_case("27 Nov 2025"; "abbreviated_month")]
    #[test_case("27 november 2025"; "lowercase_month")]
    #[test_case("27 Novembre 2025"; "non_english_month")]
    #[test_case("27-November-2025"; "dash_separators")]
    #[test_case("November 2025"; "missing_day")]
    #[test_case("27 November 25"; "short_year")]
    #[test_case("27 November 2025 extra"; "trailing_text")]
    #[test_case("31 February 2025"; "not_a_calendar_day")]
    fn test_parse_date_rejects(input: &str) {
        assert_eq!(parse_date(input), Err(ParseError::InvalidDate(input.to_string())));
    }

    #[test]
    fn test_parse_date_all_months_zero_pad() {
        let names = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        for year in [2024, 2025] {
            for (i, name) in names.iter().enumerate() {
                let month = i as u32 + 1;
                for day in 1..=31 {
                    let input = format!("{day} {name} {year}");
                    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
                        assert_eq!(parse_date(&input), Err(ParseError::InvalidDate(input.clone())));
                        continue;
                    }
                    let iso = parse_date(&input).unwrap().to_string();
                    assert_eq!(iso, format!("{year}-{month:02}-{day:02}"));
                    assert_eq!(parse_date(&format!("  {input}  ")).unwrap().to_string(), iso);
                }
            }
        }
    }

    #[test_case("31 January 2025" => ymd(2025, 1, 31); "january_31")]
    #[test_case("30 April 2025" => ymd(2025, 4, 30); "april_30")]
    #[test_case("29 February 2024" => ymd(2024, 2, 29); "leap_day")]
    #[test_case("31 August 2025" => ymd(2025, 8, 31); "august_31")]
    fn test_parse_date_month_end(input: &str) -> NaiveDate {
        parse_date(input).unwrap()
    }

    #[test_case("31 April 2025"; "april_31")]
    #[test_case("29 February 2025"; "non_leap_february_29")]
    #[test_case("32 January 2025"; "day_32")]
    #[test_case("0 January 2025"; "day_0")]
    fn test_parse_date_rejects_days_outside_month(input: &str) {
        assert_eq!(parse_date(input), Err(ParseError::InvalidDate(input.to_string())));
    }

    #[test]
    fn test_parse_date_range() {
        let expected = DateRange { from: ymd(2025, 11, 1), to: ymd(2025, 11, 30) };
        assert_eq!(
            parse_date_range("1 November 2025 [GMT] - 30 November 2025 [GMT]").unwrap(),
            expected
        );
        assert_eq!(
            parse_date_range("   1 November 2025  [GMT]   -   30 November 2025 [GMT]  ").unwrap(),
            expected
        );
        assert_eq!(
            parse_date_range("1 November 2025 [GMT+01:00] - 30 November 2025 [CET]").unwrap(),
            expected
        );
    }

    #[test_case("1 November 2025 [GMT] 30 November 2025 [GMT]"; "missing_dash")]
    #[test_case("1 November 2025 - 30 November 2025"; "missing_brackets")]
    #[test_case("EUR statement"; "banner")]
    #[test_case(""; "empty")]
    fn test_parse_date_range_rejects_shape(input: &str) {
        assert_eq!(
            parse_date_range(input),
            Err(ParseError::InvalidDateRange(input.to_string()))
        );
    }

    #[test]
    fn test_parse_date_range_bubbles_bad_date() {
        let err = parse_date_range("1 Nov 2025 [GMT] - 30 November 2025 [GMT]").unwrap_err();
        assert_eq!(err, ParseError::InvalidDate("1 Nov 2025".to_string()));
    }

    #[test]
    fn test_leading_date_run_on() {
        let (date, rest) = leading_date("10 January 2026Card ending in 4321").unwrap();
        assert_eq!(date, ymd(2026, 1, 10));
        assert_eq!(rest, "Card ending in 4321");

        let (_, rest) = leading_date("27 November 2025 Card ending in 1234").unwrap();
        assert_eq!(rest, " Card ending in 1234");

        assert!(leading_date("Card ending in 1234 Transaction: CARD-1").is_none());
        assert!(leading_date("31 February 2025 Transaction: X").is_none());
    }
}
