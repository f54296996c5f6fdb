use std::f64::consts::LN_2;

use crate::series::partialsumcache::PartialSumCache;
use crate::special::zeta::zeta_real;

/// Euler–Mascheroni constant γ.
pub const EULER_MASCHERONI: f64 = 0.577_215_664_901_532_9;

/// Below this many terms the harmonic sum is added up directly.
pub const HARMONIC_DIRECT_LIMIT: u64 = 100;

/// Below this many terms the alternating harmonic sum is added up directly.
pub const ALTERNATING_HARMONIC_DIRECT_LIMIT: u64 = 10_000;

/// Σ_{i=1}^{n} term(i), one term at a time. For series without a closed
/// form for the partial sum.
pub fn slow_partial_sum(term: impl Fn(u64) -> f64, terms: u64) -> f64 {
    (1..=terms).map(term).sum()
}

/// H_n = Σ 1/i, switching to ln n + γ + 1/(2n) − 1/(12n²) for large n.
pub fn harmonic_sum(terms: u64) -> f64 {
    if terms < HARMONIC_DIRECT_LIMIT {
        return slow_partial_sum(|i| 1.0 / i as f64, terms);
    }
    let n = terms as f64;
    n.ln() + EULER_MASCHERONI + 1.0 / (2.0 * n) - 1.0 / (12.0 * n * n)
}

/// Σ (−1)^(i+1)/i, switching to ln 2 ∓ 1/(2n) for large n.
pub fn alternating_harmonic_sum(terms: u64) -> f64 {
    if terms < ALTERNATING_HARMONIC_DIRECT_LIMIT {
        return slow_partial_sum(|i| if i % 2 == 1 { 1.0 / i as f64 } else { -1.0 / i as f64 }, terms);
    }
    let even = (terms - terms % 2) as f64;
    let mut sum = LN_2 - 1.0 / (2.0 * even);
    if terms % 2 == 1 {
        sum += 1.0 / terms as f64;
    }
    sum
}

fn p_series_direct(p: f64, terms: u64) -> f64 {
    let negative_p = -p;
    // exp(ln(i)·(−p)) is cheaper than powf in this loop
    (1..=terms).map(|i| ((i as f64).ln() * negative_p).exp()).sum()
}

/// Σ_{i=1}^{n} 1/i^p, memoized in `cache` when one is given.
pub fn p_series_sum<C>(p: f64, terms: u64, cache: Option<&C>) -> f64
where
    C: PartialSumCache + ?Sized,
{
    match cache {
        Some(cache) => cache.get_or_compute(p, terms, || p_series_direct(p, terms)),
        None => p_series_direct(p, terms),
    }
}

/// Value of the infinite p-series: ζ(p) for p > 1, divergent otherwise.
pub fn p_series_limit(p: f64) -> Option<f64> {
    if p > 1.0 {
        Some(zeta_real(p))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::series::partialsumcache::SingleThreadedCache;

    #[test]
    fn small_harmonic_sums_are_exact() {
        assert_eq!(harmonic_sum(0), 0.0);
        assert_eq!(harmonic_sum(1), 1.0);
        assert!((harmonic_sum(4) - 25.0 / 12.0).abs() < 1e-15);
    }

    #[test]
    fn harmonic_asymptotic_is_continuous() {
        let direct = slow_partial_sum(|i| 1.0 / i as f64, 100);
        assert!((harmonic_sum(100) - direct).abs() < 1e-8);
    }

    #[test]
    fn alternating_harmonic_asymptotic_is_continuous() {
        let term = |i: u64| if i % 2 == 1 { 1.0 / i as f64 } else { -1.0 / i as f64 };
        for n in [10_000u64, 10_001] {
            let direct = slow_partial_sum(term, n);
            assert!((alternating_harmonic_sum(n) - direct).abs() < 1e-8, "n = {}", n);
        }
    }

    #[test]
    fn p_series_with_and_without_cache_agree() {
        let cache = SingleThreadedCache::new();
        let uncached = p_series_sum::<SingleThreadedCache>(2.0, 1000, None);
        let cached = p_series_sum(2.0, 1000, Some(&cache));
        assert_eq!(uncached.to_bits(), cached.to_bits());
        assert_eq!(cache.len(), 1);
        assert!((cached - PI * PI / 6.0).abs() < 1.1e-3);
    }

    #[test]
    fn p_series_limit_needs_p_above_one() {
        assert_eq!(p_series_limit(1.0), None);
        assert_eq!(p_series_limit(0.5), None);
        assert!((p_series_limit(2.0).unwrap() - PI * PI / 6.0).abs() < 1e-10);
    }
}
