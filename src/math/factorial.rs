/// Iterative n!. Overflows to `f64::INFINITY` past 170! without complaint.
pub fn factorial(n: u64) -> f64 {
    let mut result = 1.0;
    for i in 2..=n {
        result *= i as f64;
    }
    result
}

/// log10(n!) by summing logarithms, finite for any n.
pub fn log10_factorial(n: u64) -> f64 {
    (2..=n).map(|i| (i as f64).log10()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_factorials() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
        assert_eq!(factorial(5), 120.0);
        assert_eq!(factorial(10), 3_628_800.0);
    }

    #[test]
    fn overflows_to_infinity() {
        assert!(factorial(170).is_finite());
        assert_eq!(factorial(171), f64::INFINITY);
    }

    #[test]
    fn log_factorial_matches_direct_product() {
        assert!((log10_factorial(20) - factorial(20).log10()).abs() < 1e-10);
        assert!(log10_factorial(1000).is_finite());
    }
}
