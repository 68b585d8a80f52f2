//! Numeric formatting helpers for table cells.

/// Rounds a value to two decimal places.
pub fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a value with two decimals and thousands separators: `1,234.50`.
pub fn thousands(value: f64) -> String {
    let rounded = round_two(value);
    let negative = rounded < 0.0;
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (position, digit) in integer.chars().enumerate() {
        if position > 0 && (integer.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

/// Formats a count without decimals.
pub fn count(value: usize) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_two(116.666_666), 116.67);
        assert_eq!(round_two(50.0), 50.0);
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(thousands(0.0), "0.00");
        assert_eq!(thousands(999.5), "999.50");
        assert_eq!(thousands(1234.5), "1,234.50");
        assert_eq!(thousands(1_234_567.891), "1,234,567.89");
    }

    #[test]
    fn keeps_sign_on_negative_values() {
        assert_eq!(thousands(-1234.5), "-1,234.50");
    }
}
