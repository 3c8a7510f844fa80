//! Display formatting for monetary values.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a decimal for display: thousands grouped with a space, comma as
/// the decimal separator, and exactly `places` fractional digits rounded
/// half-up. `9000` with 4 places becomes `9 000,0000`.
pub fn format_grouped(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let plain = rounded.abs().to_string();
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (plain.as_str(), ""),
    };

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(digit);
    }
    if places > 0 {
        out.push(',');
        out.push_str(frac_part);
        // Rounding keeps at most `places` digits; pad the rest with zeros.
        for _ in frac_part.len()..places as usize {
            out.push('0');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_groups_thousands_with_spaces() {
        assert_eq!(format_grouped(dec!(9000), 4), "9 000,0000");
        assert_eq!(format_grouped(dec!(1234567.891), 2), "1 234 567,89");
    }

    #[test]
    fn test_small_values_are_not_grouped() {
        assert_eq!(format_grouped(dec!(100), 2), "100,00");
        assert_eq!(format_grouped(dec!(0.5), 2), "0,50");
    }

    #[test]
    fn test_pads_fractional_digits() {
        assert_eq!(format_grouped(dec!(10.8696), 4), "10,8696");
        assert_eq!(format_grouped(dec!(10.8), 4), "10,8000");
    }

    #[test]
    fn test_rounds_half_up_not_to_even() {
        assert_eq!(format_grouped(dec!(0.00005), 4), "0,0001");
        assert_eq!(format_grouped(dec!(2.345), 2), "2,35");
        assert_eq!(format_grouped(dec!(2.355), 2), "2,36");
    }

    #[test]
    fn test_zero_places_drops_separator() {
        assert_eq!(format_grouped(dec!(1234.5), 0), "1 235");
    }

    #[test]
    fn test_negative_values_keep_sign_before_grouping() {
        assert_eq!(format_grouped(dec!(-1234.5), 2), "-1 234,50");
    }
}
