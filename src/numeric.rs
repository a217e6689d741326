/// Fractional digits of `value` as an integer with `precision` digits.
///
/// The integer part is discarded and the fraction is scaled by
/// 10^`precision`, then rounded half away from zero. Fractions that round up
/// to the next power of ten carry an extra digit: `fractional_digits(0.995, 2)`
/// is `100`, not a two digit value. Negative inputs give negative results.
/// Results beyond the range of `i64` saturate.
pub fn fractional_digits(value: f64, precision: u32) -> i64 {
    let scale = 10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    (value.fract() * scale).round() as i64
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.95, 2, 95; "Typical discount")]
    #[test_case(0.3333, 3, 333; "Three digits")]
    #[test_case(1.0, 2, 0; "Whole number has no fraction")]
    #[test_case(0.995, 2, 100; "Rounding overflows into an extra digit")]
    #[test_case(0.9, 2, 90; "Trailing zero kept by scaling")]
    #[test_case(0.05, 2, 5; "Leading zero dropped")]
    #[test_case(2.75, 1, 8; "Integer part discarded and half rounds up")]
    #[test_case(0.4, 0, 0; "Zero precision rounds down")]
    #[test_case(0.5, 0, 1; "Zero precision rounds half away from zero")]
    #[test_case(-0.25, 2, -25; "Negative fraction")]
    fn test_fractional_digits(value: f64, precision: u32, expected: i64) {
        assert_eq!(fractional_digits(value, precision), expected);
    }

    #[test_case(0.5, u32::MAX, i64::MAX; "Precision beyond i32 saturates")]
    #[test_case(0.5, 400, i64::MAX; "Scale overflows to infinity")]
    #[test_case(-0.5, u32::MAX, i64::MIN; "Negative fraction saturates low")]
    fn test_huge_precision(value: f64, precision: u32, expected: i64) {
        assert_eq!(fractional_digits(value, precision), expected);
    }
}
