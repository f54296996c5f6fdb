/// Rounds `x` to `places` decimals, ties away from zero.
///
/// Negative `places` round to tens, hundreds, ... Splits the power of ten
/// once it exceeds 1e22 so neither factor overflows on its own.
pub fn round(x: f64, places: i32) -> f64 {
    if !x.is_finite() {
        return x;
    }

    let (pow1, pow2) = if places > 22 {
        (10f64.powi(places - 22), 1e22)
    } else {
        (10f64.powi(places), 1.0)
    };

    let y = (x * pow1) * pow2;
    if !y.is_finite() {
        // 位數多到超出 f64 可表示範圍：x 本身已經是最接近的值
        return x;
    }

    (y.round() / pow2) / pow1
}

/// Nearest integer count, used to turn a step size into a number of steps.
pub fn round_to_count(x: f64) -> u64 {
    if x.is_finite() && x > 0.0 {
        x.round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_places() {
        assert_eq!(round(2.71828, 2), 2.72);
        assert_eq!(round(-2.5, 0), -3.0);
        assert!((round(1234.5, -2) - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn leaves_non_finite_values_alone() {
        assert!(round(f64::NAN, 3).is_nan());
        assert_eq!(round(f64::INFINITY, 3), f64::INFINITY);
    }

    #[test]
    fn step_counts() {
        assert_eq!(round_to_count(1.0 / 0.1), 10);
        assert_eq!(round_to_count(1.0 / 0.3), 3);
        assert_eq!(round_to_count(-4.0), 0);
        assert_eq!(round_to_count(f64::NAN), 0);
    }
}
