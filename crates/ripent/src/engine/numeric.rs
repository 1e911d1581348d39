//! Number parsing and formatting for the arithmetic and bit actions.

/// Parse a record value or operand as a finite `f64`.
///
/// Surrounding whitespace is ignored.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Render a number at single precision in shortest round-trip form:
/// `110`, `110.6`, never `110.0`.
///
/// Values are narrowed to `f32` first, so `0.2 + 0.1` renders as `0.3`.
/// Anything beyond the `f32` range keeps its `f64` rendering.
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.
        return "0".to_string();
    }
    let single = value as f32;
    if single.is_finite() {
        single.to_string()
    } else {
        value.to_string()
    }
}

/// Bit mask selected by a `b` + six binary digit pattern.
///
/// Digit `i`, counted from the left, selects bit `1 << (5 - i)`. Returns
/// `None` for anything that is not exactly `b` followed by six `0`/`1`.
pub(crate) fn bit_mask(pattern: &str) -> Option<i64> {
    let digits = pattern.strip_prefix('b')?;
    if digits.len() != 6 {
        return None;
    }
    let mut mask = 0;
    for (i, digit) in digits.chars().enumerate() {
        match digit {
            '1' => mask |= 1 << (5 - i),
            '0' => {}
            _ => return None,
        }
    }
    Some(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_drops_trailing_zero() {
        assert_eq!(format_number(110.0), "110");
        assert_eq!(format_number(250.0), "250");
        assert_eq!(format_number(-2.0), "-2");
    }

    #[test]
    fn format_keeps_minimal_fraction() {
        assert_eq!(format_number(100.5 + 10.1), "110.6");
        assert_eq!(format_number(100.5), "100.5");
        assert_eq!(format_number(125.625), "125.625");
    }

    #[test]
    fn format_rounds_to_single_precision() {
        assert_eq!(format_number(0.2 + 0.1), "0.3");
        assert_eq!(format_number(3.0 * 1.1), "3.3");
        assert_eq!(format_number(1.3 - 0.1), "1.2");
        assert_eq!(format_number(16_777_217.0), "16777216");
    }

    #[test]
    fn format_keeps_values_beyond_single_range() {
        assert_eq!(format_number(1e39), "1000000000000000000000000000000000000000");
    }

    #[test]
    fn format_normalizes_negative_zero() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn parse_rejects_non_finite_and_text() {
        assert_eq!(parse_number("100.50"), Some(100.5));
        assert_eq!(parse_number(" 7 "), Some(7.0));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn bit_mask_reads_left_to_right() {
        assert_eq!(bit_mask("b100000"), Some(0x20));
        assert_eq!(bit_mask("b000001"), Some(0x01));
        assert_eq!(bit_mask("b001010"), Some(0x0A));
        assert_eq!(bit_mask("b000000"), Some(0));
        assert_eq!(bit_mask("b111111"), Some(0x3F));
    }

    #[test]
    fn bit_mask_rejects_malformed_patterns() {
        assert_eq!(bit_mask("100000"), None);
        assert_eq!(bit_mask("b10000"), None);
        assert_eq!(bit_mask("b1000000"), None);
        assert_eq!(bit_mask("b10200a"), None);
        assert_eq!(bit_mask("B100000"), None);
    }
}
