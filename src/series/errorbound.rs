use crate::math::scalar::Scalar;
use crate::series::serieskind::SeriesKind;

/// Below this, |actual − approximation| is rounding noise rather than
/// truncation error.
pub const MACHINE_PRECISION_FLOOR: f64 = 1e-15;

/// Observed truncation error of an approximation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApproximationError {
    BelowMachinePrecision,
    Value(f64),
}

impl ApproximationError {
    pub fn between(actual: Scalar, approximation: Scalar) -> ApproximationError {
        let error = (actual - approximation).abs();
        if error < MACHINE_PRECISION_FLOOR {
            ApproximationError::BelowMachinePrecision
        } else {
            ApproximationError::Value(error)
        }
    }

    /// The error itself, or the floor when it is too small to trust.
    pub fn upper_estimate(&self) -> f64 {
        match self {
            ApproximationError::BelowMachinePrecision => MACHINE_PRECISION_FLOOR,
            ApproximationError::Value(error) => *error,
        }
    }
}

/// |a|^n / n! as a running product, so neither factor overflows on its own.
fn power_over_factorial(a: f64, n: u64) -> f64 {
    (1..=n).fold(1.0, |acc, k| acc * a / k as f64)
}

/// Lagrange bound on |f(x) − T_d(x)| for the degree-`degree` expansion.
///
/// Only real `x` inside the domain of the closed form get a bound;
/// complex inputs, ln / reciprocal at x ≤ 0 and the geometric series at
/// x ≥ 1 return `None`.
pub fn lagrange_bound(kind: SeriesKind, x: Scalar, degree: u32) -> Option<f64> {
    let x = x.as_real()?;
    if !x.is_finite() {
        return None;
    }
    let n = degree as u64 + 1;
    let u = (x - kind.center()).abs();

    match kind {
        // |f^(n)| <= 1
        SeriesKind::Sin | SeriesKind::Cos => Some(power_over_factorial(u, n)),
        // |f^(n)(ξ)| <= e^max(x, 0)
        SeriesKind::Exp => Some(x.max(0.0).exp() * power_over_factorial(u, n)),
        // |sinh|, |cosh| <= cosh(|x|)
        SeriesKind::Sinh | SeriesKind::Cosh => Some(x.cosh() * power_over_factorial(u, n)),
        SeriesKind::Ln => {
            if x <= 0.0 {
                return None;
            }
            // |f^(n)(ξ)| / n! = 1 / (n ξ^n), worst at the smaller of x and 1
            let xi = x.min(1.0);
            Some((u / xi).powi(n as i32) / n as f64)
        }
        SeriesKind::Reciprocal => {
            if x <= 0.0 {
                return None;
            }
            let xi = x.min(1.0);
            Some((u / xi).powi(n as i32) / xi)
        }
        SeriesKind::Geometric => {
            if x >= 1.0 {
                return None;
            }
            let gap = 1.0 - x.max(0.0);
            Some((u / gap).powi(n as i32) / gap)
        }
    }
}
