use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

use crate::math::factorial::factorial;
use crate::math::scalar::Scalar;


/// A truncated power series with a closed form to compare against.
///
/// `Ln` and `Reciprocal` are expanded about 1, everything else about 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Sin,
    Cos,
    Exp,
    Ln,
    Sinh,
    Cosh,
    Reciprocal,
    Geometric,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 8] = [
        SeriesKind::Sin,
        SeriesKind::Cos,
        SeriesKind::Exp,
        SeriesKind::Ln,
        SeriesKind::Sinh,
        SeriesKind::Cosh,
        SeriesKind::Reciprocal,
        SeriesKind::Geometric,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SeriesKind::Sin => "sin",
            SeriesKind::Cos => "cos",
            SeriesKind::Exp => "exp",
            SeriesKind::Ln => "ln",
            SeriesKind::Sinh => "sinh",
            SeriesKind::Cosh => "cosh",
            SeriesKind::Reciprocal => "reciprocal",
            SeriesKind::Geometric => "geometric",
        }
    }

    pub fn center(&self) -> f64 {
        match self {
            SeriesKind::Ln | SeriesKind::Reciprocal => 1.0,
            _ => 0.0,
        }
    }

    /// Coefficient of `(x - center)^power`, or `None` when the expansion
    /// has no such term (odd powers of cos, the constant term of ln, ...).
    pub fn coefficient(&self, power: u32) -> Option<f64> {
        let k = power as u64;
        let odd = power % 2 == 1;
        let alternating = |n: u32| if n % 2 == 0 { 1.0 } else { -1.0 };
        match self {
            SeriesKind::Sin if odd => Some(alternating((power - 1) / 2) / factorial(k)),
            SeriesKind::Cos if !odd => Some(alternating(power / 2) / factorial(k)),
            SeriesKind::Exp => Some(1.0 / factorial(k)),
            SeriesKind::Ln if power >= 1 => Some(-alternating(power) / power as f64),
            SeriesKind::Sinh if odd => Some(1.0 / factorial(k)),
            SeriesKind::Cosh if !odd => Some(1.0 / factorial(k)),
            SeriesKind::Reciprocal => Some(alternating(power)),
            SeriesKind::Geometric => Some(1.0),
            _ => None,
        }
    }

    /// The function the series converges to.
    pub fn closed_form(&self, x: Scalar) -> Scalar {
        match self {
            SeriesKind::Sin => x.map(f64::sin, |z| z.sin()),
            SeriesKind::Cos => x.map(f64::cos, |z| z.cos()),
            SeriesKind::Exp => x.map(f64::exp, |z| z.exp()),
            SeriesKind::Ln => x.map(f64::ln, |z| z.ln()),
            SeriesKind::Sinh => x.map(f64::sinh, |z| z.sinh()),
            SeriesKind::Cosh => x.map(f64::cosh, |z| z.cosh()),
            SeriesKind::Reciprocal => x.map(|v| 1.0 / v, |z| Complex64::new(1.0, 0.0) / z),
            SeriesKind::Geometric => x.map(|v| 1.0 / (1.0 - v), |z| Complex64::new(1.0, 0.0) / (Complex64::new(1.0, 0.0) - z)),
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown series '{0}'")]
pub struct ParseSeriesKindError(String);

impl FromStr for SeriesKind {
    type Err = ParseSeriesKindError;

    fn from_str(s: &str) -> Result<SeriesKind, ParseSeriesKindError> {
        SeriesKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSeriesKindError(s.to_owned()))
    }
}
