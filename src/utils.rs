//! Useful functions for converting lexemes into values.

use crate::{Date, Decimal};
use std::borrow::Cow;

/// Parses a [`Date`](crate::Date) from a `YYYY-MM-DD` or `YYYY/MM/DD` lexeme.
///
/// The error message names the offending field.
pub fn parse_date(date_str: &str) -> Result<Date, String> {
    let mut fields = date_str.split(|c: char| c == '-' || c == '/');
    let (year, month, day) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(year), Some(month), Some(day), None) if !month.is_empty() && !day.is_empty() => {
            (year, month, day)
        }
        (_, _, _, None) => {
            return Err("incomplete date, expected year, month and day".to_string())
        }
        _ => return Err("expected year, month and day".to_string()),
    };
    let mut separators = date_str.chars().filter(|c| *c == '-' || *c == '/');
    if separators.next() != separators.next() {
        return Err("mixed date separators".to_string());
    }
    if year.len() != 4 {
        return Err("year must have four digits".to_string());
    }
    if month.len() != 2 {
        return Err("month must have two digits".to_string());
    }
    if day.len() != 2 {
        return Err("day must have two digits".to_string());
    }
    let year = year.parse::<i32>().map_err(|e| e.to_string())?;
    let month = month.parse::<u32>().map_err(|e| e.to_string())?;
    let day = day.parse::<u32>().map_err(|e| e.to_string())?;
    if !(1..=12).contains(&month) {
        return Err(format!("month must be in 1..12, got {}", month));
    }
    Date::from_ymd_opt(year, month, day).ok_or_else(|| "day is out of range for month".to_string())
}

/// Parses a [`Decimal`](crate::Decimal) from a number lexeme.
///
/// Accepts an optional sign, an integer part with optional `,` separators in
/// groups of three digits, and at most one `.` followed by the fractional
/// digits. Fails instead of rounding when the value has more digits than a
/// [`Decimal`](crate::Decimal) can hold exactly.
pub fn parse_number(num_str: &str) -> Result<Decimal, String> {
    let (negative, digits) = match num_str.as_bytes().first() {
        Some(b'-') => (true, &num_str[1..]),
        Some(b'+') => (false, &num_str[1..]),
        _ => (false, num_str),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };
    if frac_part.map_or(false, |frac| frac.contains('.')) {
        return Err("more than one decimal point".to_string());
    }
    if int_part.is_empty() {
        return Err("missing integer part".to_string());
    }
    if int_part.contains(',') {
        let mut groups = int_part.split(',');
        let leading_ok = groups.next().map_or(false, |g| (1..=3).contains(&g.len()));
        if !leading_ok || groups.any(|g| g.len() != 3) {
            return Err("digits must be grouped by three".to_string());
        }
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit() || b == b',')
        || !frac_part.map_or(true, |frac| frac.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err("unexpected character".to_string());
    }
    let mut plain: String = int_part.chars().filter(|c| *c != ',').collect();
    if let Some(frac) = frac_part.filter(|frac| !frac.is_empty()) {
        plain.push('.');
        plain.push_str(frac);
    }
    let number = Decimal::from_str_exact(&plain)
        .map_err(|e| format!("cannot be represented exactly: {}", e))?;
    Ok(if negative { -number } else { number })
}

/// Returns the content of a quoted string lexeme.
///
/// `\"` and `\\` are unescaped; every other character, including newlines
/// and other backslash sequences, is kept verbatim.
pub fn unquote(quoted: &str) -> Cow<'_, str> {
    let inner = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(quoted);
    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }
    let mut content = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next @ ('"' | '\\')) => content.push(next),
                Some(next) => {
                    content.push(c);
                    content.push(next);
                }
                None => content.push(c),
            }
        } else {
            content.push(c);
        }
    }
    Cow::Owned(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn dates_with_either_separator() {
        let expected = Date::from_ymd_opt(2014, 1, 2);
        assert_eq!(parse_date("2014-01-02").ok(), expected);
        assert_eq!(parse_date("2014/01/02").ok(), expected);
    }

    #[test]
    fn date_errors_name_the_field() {
        assert_eq!(
            parse_date("2013-12-98").unwrap_err(),
            "day is out of range for month"
        );
        assert_eq!(
            parse_date("2013-13-01").unwrap_err(),
            "month must be in 1..12, got 13"
        );
        assert_eq!(parse_date("2013-02-29").unwrap_err(), "day is out of range for month");
        assert_eq!(parse_date("2013-12-228").unwrap_err(), "day must have two digits");
        assert_eq!(parse_date("2013-12/22").unwrap_err(), "mixed date separators");
        assert!(parse_date("2012-02-29").is_ok());
    }

    #[test]
    fn incomplete_dates() {
        for date in ["2013-12", "2013-", "2013/12/", "1234-56-"] {
            assert_eq!(
                parse_date(date).unwrap_err(),
                "incomplete date, expected year, month and day",
                "{}",
                date
            );
        }
    }

    #[test]
    fn grouped_numbers() {
        assert_eq!(parse_number("1,001"), Ok(Decimal::from(1001)));
        assert_eq!(parse_number("-1,001"), Ok(Decimal::from(-1001)));
        assert_eq!(
            parse_number("+1,002.00").ok(),
            Decimal::from_str("1002.00").ok()
        );
        assert_eq!(parse_number("1,000,000"), Ok(Decimal::from(1_000_000)));
        assert!(parse_number("1,00").is_err());
        assert!(parse_number("1000,000").is_err());
        assert!(parse_number("1,0000").is_err());
    }

    #[test]
    fn number_keeps_scale() {
        let number = parse_number("123.456789").unwrap();
        assert_eq!(number.scale(), 6);
        assert_eq!(number.to_string(), "123.456789");
        assert_eq!(parse_number("-123.456789").unwrap().to_string(), "-123.456789");
        assert_eq!(parse_number("7.").unwrap(), Decimal::from(7));
    }

    #[test]
    fn malformed_numbers() {
        assert_eq!(parse_number("1.234.00").unwrap_err(), "more than one decimal point");
        assert_eq!(parse_number(".2347").unwrap_err(), "missing integer part");
        assert_eq!(parse_number("-.5").unwrap_err(), "missing integer part");
        assert!(parse_number("99999999999999999999999999999999").is_err());
    }

    #[test]
    fn numbers_are_never_rounded() {
        assert!(parse_number("0.00000000000000000000000000001").is_err());
        assert!(parse_number("12345678901234567890123456789.5").is_err());
        assert_eq!(
            parse_number("0.0000000000000000000000000001").unwrap().to_string(),
            "0.0000000000000000000000000001"
        );
    }

    #[test]
    fn unquote_strings() {
        assert_eq!(unquote("\"Nice dinner\""), "Nice dinner");
        assert_eq!(unquote("\"\""), "");
        assert_eq!(unquote("\"a\nb\""), "a\nb");
        assert_eq!(unquote(r#""say \"hi\" \\ \n""#), r#"say "hi" \ \n"#);
        assert!(matches!(unquote("\"plain\""), Cow::Borrowed(_)));
    }
}
