//! Fixed-point rounding shared by every chart transform.
//!
//! Values are rounded on their exact binary expansion, and exact ties round
//! away from zero. `-0` is normalised to `0` so serialized output never
//! carries a signed zero.

/// Formats `value` with exactly `digits` fractional digits.
pub fn fixed(value: f64, digits: usize) -> String {
    // adding +0.0 turns -0.0 into 0.0 and leaves every other value untouched
    let value = value + 0.0;
    if !value.is_finite() {
        return format!("{value}");
    }

    let magnitude = value.abs();
    let rounded = format!("{:.*}", digits, magnitude);
    let body = if is_exact_tie(magnitude, digits) {
        round_tie_up(magnitude, digits, rounded)
    } else {
        rounded
    };

    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

/// Rounds `value` to `digits` fractional digits.
pub fn round_to(value: f64, digits: usize) -> f64 {
    fixed(value, digits)
        .parse::<f64>()
        .map(|parsed| parsed + 0.0)
        .unwrap_or(value)
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

// A tie needs a terminating expansion of exactly digits + 1 fractional digits
// ending in 5. Binary fractions m / 2^j have exactly j decimal digits, so the
// expansion is short enough iff magnitude * 2^(digits + 1) is integral.
fn is_exact_tie(magnitude: f64, digits: usize) -> bool {
    let Ok(exp) = i32::try_from(digits + 1) else {
        return false;
    };
    let scaled = magnitude * 2f64.powi(exp);
    if !scaled.is_finite() || scaled.fract() != 0.0 {
        return false;
    }
    format!("{:.*}", digits + 1, magnitude).ends_with('5')
}

fn round_tie_up(magnitude: f64, digits: usize, rounded: String) -> String {
    let extended = format!("{:.*}", digits + 1, magnitude);
    let mut truncated = extended[..extended.len() - 1].to_string();
    if digits == 0 {
        truncated.pop();
    }
    if rounded != truncated {
        return rounded;
    }
    increment_last_digit(&truncated)
}

fn increment_last_digit(number: &str) -> String {
    let mut digits: Vec<u8> = number.bytes().collect();
    let mut idx = digits.len();
    while idx > 0 {
        idx -= 1;
        match digits[idx] {
            b'.' => continue,
            b'9' => digits[idx] = b'0',
            d => {
                digits[idx] = d + 1;
                return String::from_utf8(digits).unwrap_or_else(|_| number.to_string());
            }
        }
    }
    let mut carried = String::with_capacity(digits.len() + 1);
    carried.push('1');
    carried.push_str(&String::from_utf8(digits).unwrap_or_else(|_| number.to_string()));
    carried
}

#[cfg(test)]
mod tests {
    use super::{fixed, round1, round2, round_to};

    #[test]
    fn rounds_like_fixed_point_formatting() {
        assert_eq!(round2(-9.090909090909), -9.09);
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round1(33.333333), 33.3);
        assert_eq!(round_to(3.3333333, 2), 3.33);
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(fixed(0.25, 1), "0.3");
        assert_eq!(fixed(-0.25, 1), "-0.3");
        assert_eq!(fixed(0.125, 2), "0.13");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(9.95, 1), "9.9");
        assert_eq!(fixed(9.75, 1), "9.8");
        assert_eq!(fixed(99.95, 1), "100.0");
        assert_eq!(fixed(0.5, 0), "1");
    }

    #[test]
    fn carries_through_nines() {
        assert_eq!(fixed(9.5, 0), "10");
        assert_eq!(fixed(99.875, 2), "99.88");
    }

    #[test]
    fn negative_zero_is_normalised() {
        assert_eq!(fixed(-0.0, 1), "0.0");
        assert_eq!(fixed(-0.04, 1), "-0.0");
        let rounded = round2(-0.001);
        assert_eq!(rounded, 0.0);
        assert!(rounded.is_sign_positive());
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(fixed(f64::NAN, 2), "NaN");
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
    }
}
