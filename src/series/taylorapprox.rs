use crate::math::scalar::Scalar;
use crate::series::errorbound::{
    lagrange_bound,
    ApproximationError
};
use crate::series::serieskind::SeriesKind;

/// Sum of the terms of `kind`'s expansion up to and including `degree`.
///
/// Real input gives a real sum, complex input a complex one.
pub fn taylor_approx(x: impl Into<Scalar>, kind: SeriesKind, degree: u32) -> Scalar {
    let x = x.into();
    let u = x - Scalar::Real(kind.center());
    let mut total = if x.is_complex() {
        Scalar::complex(0.0, 0.0)
    } else {
        Scalar::zero()
    };

    for power in 0..=degree {
        if let Some(coefficient) = kind.coefficient(power) {
            total = total + u.powi(power as i32) * coefficient;
        }
    }
    total
}

/// An evaluated truncated series together with what it is compared to.
#[derive(Debug, Clone, PartialEq)]
pub struct TaylorApproximation {
    x: Scalar,
    kind: SeriesKind,
    degree: u32,
    approximation: Scalar,
    actual: Scalar,
    error: ApproximationError,
    lagrange_bound: Option<f64>,
}

impl TaylorApproximation {
    pub fn evaluate(x: impl Into<Scalar>, kind: SeriesKind, degree: u32) -> TaylorApproximation {
        let x = x.into();
        let approximation = taylor_approx(x, kind, degree);
        let actual = kind.closed_form(x);
        TaylorApproximation {
            x,
            kind,
            degree,
            approximation,
            actual,
            error: ApproximationError::between(actual, approximation),
            lagrange_bound: lagrange_bound(kind, x, degree),
        }
    }

    pub fn x(&self) -> Scalar {
        self.x
    }

    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    pub fn degree(&self) -> u32 {
        self.degree
    }

    pub fn approximation(&self) -> Scalar {
        self.approximation
    }

    pub fn actual(&self) -> Scalar {
        self.actual
    }

    pub fn error(&self) -> ApproximationError {
        self.error
    }

    pub fn lagrange_bound(&self) -> Option<f64> {
        self.lagrange_bound
    }
}
