//! Number formatting for summaries and tables.

/// Format with a fixed number of decimals and comma thousands separators.
///
/// ```rust
/// use takeoff_core::format::grouped;
///
/// assert_eq!(grouped(1285.2, 0), "1,285");
/// assert_eq!(grouped(2721.6, 2), "2,721.60");
/// assert_eq!(grouped(-1234567.891, 1), "-1,234,567.9");
/// ```
pub fn grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3);
    out.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers_unchanged() {
        assert_eq!(grouped(0.0, 2), "0.00");
        assert_eq!(grouped(999.0, 0), "999");
        assert_eq!(grouped(15.14, 1), "15.1");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(grouped(1000.0, 0), "1,000");
        assert_eq!(grouped(123456.0, 2), "123,456.00");
        assert_eq!(grouped(1234567.0, 0), "1,234,567");
    }

    #[test]
    fn test_rounding_carries_into_groups() {
        assert_eq!(grouped(999.96, 1), "1,000.0");
    }

    #[test]
    fn test_negative() {
        assert_eq!(grouped(-2500.5, 1), "-2,500.5");
    }
}
