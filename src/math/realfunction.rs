/// A real-valued function of one variable.
///
/// Any `Fn(f64) -> f64` closure already is one; named integrands can
/// implement it directly.
pub trait RealFunction {
    fn value(&self, x: f64) -> f64;
}

impl<F> RealFunction for F
where
    F: Fn(f64) -> f64,
{
    fn value(&self, x: f64) -> f64 {
        self(x)
    }
}

/// Right-hand side `f(x, y)` of a first-order ODE `dy/dx = f(x, y)`.
pub trait OdeFunction {
    fn slope(&self, x: f64, y: f64) -> f64;
}

impl<F> OdeFunction for F
where
    F: Fn(f64, f64) -> f64,
{
    fn slope(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}
