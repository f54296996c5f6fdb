use std::f64::consts::E;

use crate::approxerror::ApproxResult;
use crate::configuration::EulerSettings;
use crate::ode::eulersmethod::{
    eulers_method_with_settings,
    EulerTrajectory
};
use crate::ode::eulerstep::InitialCondition;

/// Initial value problems with closed-form solutions, for comparing
/// Euler's method against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EulerProblem {
    /// dy/dx = y, y(0) = 1, solved by eˣ.
    Exponential,
    /// dy/dx = x + y, y(2) = 6, solved by 9e^(x−2) − x − 1.
    Linear,
}

impl EulerProblem {
    pub fn solution(&self, x: f64) -> f64 {
        match self {
            EulerProblem::Exponential => x.exp(),
            EulerProblem::Linear => 9.0 / (E * E) * x.exp() - x - 1.0,
        }
    }

    pub fn slope(&self, x: f64, y: f64) -> f64 {
        match self {
            EulerProblem::Exponential => y,
            EulerProblem::Linear => x + y,
        }
    }

    pub fn initial_condition(&self) -> InitialCondition {
        match self {
            EulerProblem::Exponential => InitialCondition::new(0.0, 1.0),
            EulerProblem::Linear => InitialCondition::new(2.0, 6.0),
        }
    }

    /// Finest subdivision offered for this problem.
    pub fn max_intervals(&self) -> u64 {
        match self {
            EulerProblem::Exponential => 1000,
            EulerProblem::Linear => 10_000,
        }
    }

    pub fn solve(&self, delta: f64, settings: &EulerSettings) -> ApproxResult<EulerTrajectory> {
        eulers_method_with_settings(
            &|x: f64| self.solution(x),
            &|x: f64, y: f64| self.slope(x, y),
            self.initial_condition(),
            delta,
            settings,
        )
    }
}
