//! Number rendering for results and derivation steps.
//!
//! Rounding here is presentation only; callers keep the unrounded `f64`
//! for any further arithmetic.

/// Magnitudes at or above this switch to exponent notation.
const EXPONENT_UPPER: f64 = 1e21;

/// Every finite `f64` has a terminating expansion within this many decimals.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Fixed-point rendering with exactly `places` decimals, e.g. `1.000000`.
///
/// Rounds half away from zero on the exact binary value, so `0.0078125`
/// becomes `0.007813` while `1.005` (stored just below) stays `1.00`.
pub fn format_fixed(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(fraction.bytes().take(places))
        .collect();
    if fraction.as_bytes().get(places).is_some_and(|d| *d >= b'5') {
        increment(&mut digits);
    }

    let int_len = digits.len() - places;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|d| *d as char));
    if places > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|d| *d as char));
    }
    out
}

// Adds one unit in the last place, growing the integer part on carry-out.
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Rounded to `places` decimals with trailing zeros stripped: `1000`, `0.001`, `37.7778`.
///
/// Non-zero values too small to survive the rounding are written in exponent
/// form instead of collapsing to `0`.
pub fn format_trimmed(value: f64, places: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let abs = value.abs();
    let resolution = 10f64.powi(-(places as i32));
    if abs < resolution || abs >= EXPONENT_UPPER {
        return format!("{:e}", value);
    }

    trim_fraction(&format_fixed(value, places))
}

/// Full-precision rendering of a catalog factor.
pub fn format_factor(factor: f64) -> String {
    let abs = factor.abs();
    if abs != 0.0 && (abs < 1e-6 || abs >= EXPONENT_UPPER) {
        format!("{:e}", factor)
    } else {
        format!("{}", factor)
    }
}

fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed_pads_decimals() {
        assert_eq!(format_fixed(1.0, 6), "1.000000");
        assert_eq!(format_fixed(212.0, 4), "212.0000");
        assert_eq!(format_fixed(0.30480000001, 6), "0.304800");
        assert_eq!(format_fixed(-273.15, 4), "-273.1500");
        assert_eq!(format_fixed(42.0, 0), "42");
    }

    #[test]
    fn test_format_fixed_rounds_exact_ties_away_from_zero() {
        assert_eq!(format_fixed(0.0078125, 6), "0.007813");
        assert_eq!(format_fixed(-0.0078125, 6), "-0.007813");
        assert_eq!(format_fixed(2.5, 0), "3");
        assert_eq!(format_fixed(0.125, 2), "0.13");
        assert_eq!(format_fixed(99.5, 0), "100");
        assert_eq!(format_fixed(9.96875, 1), "10.0");
        // stored as 1.00499999999999989...
        assert_eq!(format_fixed(1.005, 2), "1.00");
        assert_eq!(format_trimmed(0.0078125, 6), "0.007813");
    }

    #[test]
    fn test_format_fixed_non_finite() {
        assert_eq!(format_fixed(f64::INFINITY, 6), "inf");
        assert_eq!(format_fixed(f64::NEG_INFINITY, 4), "-inf");
    }

    #[test]
    fn test_format_trimmed() {
        assert_eq!(format_trimmed(1000.0, 6), "1000");
        assert_eq!(format_trimmed(1.0, 6), "1");
        assert_eq!(format_trimmed(0.001, 6), "0.001");
        assert_eq!(format_trimmed(-40.0, 4), "-40");
        assert_eq!(format_trimmed(100.0 * 5.0 / 9.0, 4), "55.5556");
        assert_eq!(format_trimmed(0.0, 6), "0");
    }

    #[test]
    fn test_format_trimmed_tiny_values_use_exponent() {
        assert_eq!(format_trimmed(1.60218e-19, 6), "1.60218e-19");
        assert_eq!(format_trimmed(4e-7, 6), "4e-7");
    }

    #[test]
    fn test_format_factor() {
        assert_eq!(format_factor(1000.0), "1000");
        assert_eq!(format_factor(0.0254), "0.0254");
        assert_eq!(format_factor(1e-6), "0.000001");
        assert_eq!(format_factor(1.60218e-19), "1.60218e-19");
    }
}
