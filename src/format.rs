/// Group the digits of a non-negative integer string with commas.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

/// Accounting-style money: two decimals, thousands separators,
/// negatives in parentheses instead of a minus sign.
pub fn format_currency(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let body = format!("{}.{}", group_digits(whole), frac);

    // -0.001 rounds to 0.00 and must not be parenthesized
    if value < 0.0 && body != "0.00" {
        format!("({body})")
    } else {
        body
    }
}

/// Whole number with thousands separators; keeps the sign.
pub fn format_integer(value: f64) -> String {
    let rounded = value.round();
    let grouped = group_digits(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Two decimals with thousands separators; keeps the sign.
pub fn format_decimal(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let body = format!("{}.{}", group_digits(whole), frac);
    if value < 0.0 && body != "0.00" {
        format!("-{body}")
    } else {
        body
    }
}

/// Machine-readable number for exports: no grouping, no currency styling.
/// Shortest form that parses back to the same value; `-0` is written as `0`.
pub fn format_plain(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_formatting() {
        assert_eq!(format_currency(-1234.5), "(1,234.50)");
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(1000000.0), "1,000,000.00");
        assert_eq!(format_currency(42.1), "42.10");
        assert_eq!(format_currency(-0.001), "0.00");
        assert_eq!(format_currency(999.999), "1,000.00");
    }

    #[test]
    fn test_integer_formatting() {
        assert_eq!(format_integer(1234567.0), "1,234,567");
        assert_eq!(format_integer(-4500.0), "-4,500");
        assert_eq!(format_integer(12.4), "12");
        assert_eq!(format_integer(0.0), "0");
    }

    #[test]
    fn test_decimal_formatting() {
        assert_eq!(format_decimal(2500.5), "2,500.50");
        assert_eq!(format_decimal(-12.0), "-12.00");
    }

    #[test]
    fn test_plain_formatting() {
        assert_eq!(format_plain(1.0), "1");
        assert_eq!(format_plain(-1234.5), "-1234.5");
        assert_eq!(format_plain(10.25), "10.25");
        assert_eq!(format_plain(0.0), "0");
    }

    #[test]
    fn test_plain_keeps_full_precision() {
        assert_eq!(format_plain(48.567), "48.567");
        assert_eq!(format_plain(0.004), "0.004");
        assert_eq!(format_plain(12.3456), "12.3456");
        assert_eq!(format_plain(-0.0), "0");
        assert_eq!(format_plain(-0.001), "-0.001");
    }
}
