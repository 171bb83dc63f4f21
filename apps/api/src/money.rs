//! Currency rendering for prompt text.

/// Formats an amount as `$1,234,567.89` — thousands separators, two decimals.
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{amount:.2}");
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some(parts) => parts,
        None => (fixed.as_str(), "00"),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd_groups_thousands() {
        assert_eq!(format_usd(2_500_000.0), "$2,500,000.00");
        assert_eq!(format_usd(1_234_567.5), "$1,234,567.50");
    }

    #[test]
    fn test_format_usd_small_amounts() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(999.99), "$999.99");
        assert_eq!(format_usd(1000.0), "$1,000.00");
    }

    #[test]
    fn test_format_usd_rounds_to_cents() {
        assert_eq!(format_usd(12.345), "$12.35");
    }
}
