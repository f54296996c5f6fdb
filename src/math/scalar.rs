use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_complex::Complex64;

/// A real or complex value.
///
/// Arithmetic between two `Real`s stays real; anything touching a `Complex`
/// promotes the result to `Complex`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Real(f64),
    Complex(Complex64),
}

impl Scalar {
    pub fn zero() -> Scalar {
        Scalar::Real(0.0)
    }

    pub fn complex(re: f64, im: f64) -> Scalar {
        Scalar::Complex(Complex64::new(re, im))
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Scalar::Complex(_))
    }

    pub fn re(&self) -> f64 {
        match self {
            Scalar::Real(x) => *x,
            Scalar::Complex(z) => z.re,
        }
    }

    pub fn im(&self) -> f64 {
        match self {
            Scalar::Real(_) => 0.0,
            Scalar::Complex(z) => z.im,
        }
    }

    pub fn as_complex(&self) -> Complex64 {
        match self {
            Scalar::Real(x) => Complex64::new(*x, 0.0),
            Scalar::Complex(z) => *z,
        }
    }

    /// The real value, or `None` for a genuinely complex one.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Scalar::Real(x) => Some(*x),
            Scalar::Complex(_) => None,
        }
    }

    /// Modulus for complex values, absolute value for reals.
    pub fn abs(&self) -> f64 {
        match self {
            Scalar::Real(x) => x.abs(),
            Scalar::Complex(z) => z.norm(),
        }
    }

    pub fn powi(&self, n: i32) -> Scalar {
        match self {
            Scalar::Real(x) => Scalar::Real(x.powi(n)),
            Scalar::Complex(z) => Scalar::Complex(z.powi(n)),
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Scalar::Real(x) => x.is_finite(),
            Scalar::Complex(z) => z.re.is_finite() && z.im.is_finite(),
        }
    }

    /// Applies `real` or `complex` depending on the variant.
    pub fn map(&self, real: impl FnOnce(f64) -> f64, complex: impl FnOnce(Complex64) -> Complex64) -> Scalar {
        match self {
            Scalar::Real(x) => Scalar::Real(real(*x)),
            Scalar::Complex(z) => Scalar::Complex(complex(*z)),
        }
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Scalar {
        Scalar::Real(x)
    }
}

impl From<Complex64> for Scalar {
    fn from(z: Complex64) -> Scalar {
        Scalar::Complex(z)
    }
}

impl Add for Scalar {
    type Output = Scalar;

    fn add(self, rhs: Scalar) -> Scalar {
        match (self, rhs) {
            (Scalar::Real(a), Scalar::Real(b)) => Scalar::Real(a + b),
            (a, b) => Scalar::Complex(a.as_complex() + b.as_complex()),
        }
    }
}

impl Sub for Scalar {
    type Output = Scalar;

    fn sub(self, rhs: Scalar) -> Scalar {
        match (self, rhs) {
            (Scalar::Real(a), Scalar::Real(b)) => Scalar::Real(a - b),
            (a, b) => Scalar::Complex(a.as_complex() - b.as_complex()),
        }
    }
}

impl Mul for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Scalar) -> Scalar {
        match (self, rhs) {
            (Scalar::Real(a), Scalar::Real(b)) => Scalar::Real(a * b),
            (a, b) => Scalar::Complex(a.as_complex() * b.as_complex()),
        }
    }
}

impl Mul<f64> for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: f64) -> Scalar {
        match self {
            Scalar::Real(a) => Scalar::Real(a * rhs),
            Scalar::Complex(z) => Scalar::Complex(z * rhs),
        }
    }
}

impl Div<f64> for Scalar {
    type Output = Scalar;

    fn div(self, rhs: f64) -> Scalar {
        match self {
            Scalar::Real(a) => Scalar::Real(a / rhs),
            Scalar::Complex(z) => Scalar::Complex(z / rhs),
        }
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        match self {
            Scalar::Real(a) => Scalar::Real(-a),
            Scalar::Complex(z) => Scalar::Complex(-z),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Real(x) => write!(f, "{}", x),
            Scalar::Complex(z) if z.im < 0.0 => write!(f, "{} - {}i", z.re, -z.im),
            Scalar::Complex(z) => write!(f, "{} + {}i", z.re, z.im),
        }
    }
}
