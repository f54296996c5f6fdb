use serde::Serialize;

use crate::math::realfunction::{
    OdeFunction,
    RealFunction
};

/// Starting point `(x₀, y₀)` of an initial value problem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InitialCondition {
    pub x: f64,
    pub y: f64,
}

impl InitialCondition {
    pub fn new(x: f64, y: f64) -> InitialCondition {
        InitialCondition { x, y }
    }
}

/// One row of an Euler's method trajectory, approximation beside the exact
/// solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EulerStep {
    pub x: f64,
    pub approx_y: f64,
    pub approx_derivative: f64,
    pub true_y: f64,
    pub true_derivative: f64,
    pub absolute_error: f64,
}

impl EulerStep {
    pub fn at<S, D>(x: f64, approx_y: f64, solution: &S, derivative: &D) -> EulerStep
    where
        S: RealFunction + ?Sized,
        D: OdeFunction + ?Sized,
    {
        let true_y = solution.value(x);
        EulerStep {
            x,
            approx_y,
            approx_derivative: derivative.slope(x, approx_y),
            true_y,
            true_derivative: derivative.slope(x, true_y),
            absolute_error: (true_y - approx_y).abs(),
        }
    }
}
