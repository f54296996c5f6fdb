use tracing::debug;

use crate::approxerror::{
    ApproxError,
    ApproxResult
};
use crate::configuration::EulerSettings;
use crate::math::realfunction::{
    OdeFunction,
    RealFunction
};
use crate::math::round::round_to_count;
use crate::ode::eulerstep::{
    EulerStep,
    InitialCondition
};

/// Result of integrating from x₀ to x₀ + 1.
///
/// Every step is executed; only a bounded selection of rows is kept: the
/// start of each tenth of the way (every step when there are few of them)
/// and always the final row.
#[derive(Debug, Clone, PartialEq)]
pub struct EulerTrajectory {
    delta: f64,
    steps: u64,
    rows: Vec<EulerStep>,
}

impl EulerTrajectory {
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Steps actually taken, round(1/δ).
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Kept rows, the final one last.
    pub fn rows(&self) -> &[EulerStep] {
        &self.rows
    }

    pub fn final_step(&self) -> &EulerStep {
        // rows always holds the final row
        &self.rows[self.rows.len() - 1]
    }
}

/// Most steps a single trajectory may take.
pub const MAX_STEPS: u64 = 1_000_000_000;

/// Whether the row at `tick` is kept, for `steps` steps split into
/// `divisions` parts.
fn keeps_row(tick: u64, next_division: u64, steps: u64, divisions: u64) -> bool {
    if steps <= divisions {
        return true;
    }
    if next_division >= divisions {
        return false;
    }
    let target = (steps as u128 * next_division as u128 + divisions as u128 / 2) / divisions as u128;
    tick as u128 == target
}

/// Forward Euler for dy/dx = f(x, y) over one unit of x, compared against
/// the known `solution`.
pub fn eulers_method_with_settings<S, D>(
    solution: &S,
    derivative: &D,
    initial: InitialCondition,
    delta: f64,
    settings: &EulerSettings,
) -> ApproxResult<EulerTrajectory>
where
    S: RealFunction + ?Sized,
    D: OdeFunction + ?Sized,
{
    if !(delta.is_finite() && delta > 0.0) {
        return Err(ApproxError::InvalidStepSize(delta));
    }

    let steps = round_to_count(1.0 / delta);
    if steps > MAX_STEPS {
        return Err(ApproxError::TooManySteps { delta, steps, max: MAX_STEPS });
    }
    let divisions = settings.row_divisions.max(1);
    let mut rows = Vec::with_capacity(steps.min(divisions) as usize + 1);

    let mut x = initial.x;
    let mut y = initial.y;
    let mut next_division = 0;
    for tick in 0..steps {
        if keeps_row(tick, next_division, steps, divisions) {
            rows.push(EulerStep::at(x, y, solution, derivative));
            next_division += 1;
        }
        y += delta * derivative.slope(x, y);
        x += delta;
    }
    rows.push(EulerStep::at(x, y, solution, derivative));

    debug!(delta, steps, rows = rows.len(), "euler's method finished");
    Ok(EulerTrajectory { delta, steps, rows })
}

pub fn eulers_method<S, D>(
    solution: &S,
    derivative: &D,
    initial: InitialCondition,
    delta: f64,
) -> ApproxResult<EulerTrajectory>
where
    S: RealFunction + ?Sized,
    D: OdeFunction + ?Sized,
{
    eulers_method_with_settings(solution, derivative, initial, delta, &EulerSettings::default())
}

#[cfg(test)]
mod tests {
    use std::f64::consts::E;

    use super::*;

    fn exponential(delta: f64) -> EulerTrajectory {
        eulers_method(&f64::exp, &|_x: f64, y: f64| y, InitialCondition::new(0.0, 1.0), delta).unwrap()
    }

    #[test]
    fn tenth_steps_keep_every_row() {
        let trajectory = exponential(0.1);
        assert_eq!(trajectory.steps(), 10);
        assert_eq!(trajectory.rows().len(), 11);
        let last = trajectory.final_step();
        assert!((last.x - 1.0).abs() < 1e-12);
        assert!((last.approx_y - 1.1f64.powi(10)).abs() < 1e-12);
        assert!((last.true_y - E).abs() < 1e-12);
    }

    #[test]
    fn many_steps_keep_eleven_rows() {
        let trajectory = exponential(0.001);
        assert_eq!(trajectory.steps(), 1000);
        assert_eq!(trajectory.rows().len(), 11);
        let xs: Vec<f64> = trajectory.rows().iter().map(|row| row.x).collect();
        for (i, x) in xs.iter().enumerate() {
            assert!((x - i as f64 / 10.0).abs() < 1e-9, "row {} at x = {}", i, x);
        }
    }

    #[test]
    fn first_row_is_the_initial_condition() {
        let trajectory = exponential(0.01);
        let first = trajectory.rows()[0];
        assert_eq!(first.x, 0.0);
        assert_eq!(first.approx_y, 1.0);
        assert_eq!(first.absolute_error, 0.0);
    }

    #[test]
    fn rows_report_both_derivatives() {
        let row = exponential(0.5).rows()[1];
        assert_eq!(row.approx_derivative, row.approx_y);
        assert_eq!(row.true_derivative, row.true_y);
        assert_eq!(row.absolute_error, (row.true_y - row.approx_y).abs());
    }

    #[test]
    fn bad_step_sizes_are_rejected() {
        for delta in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let result = eulers_method(&f64::exp, &|_x: f64, y: f64| y, InitialCondition::new(0.0, 1.0), delta);
            assert!(matches!(result, Err(ApproxError::InvalidStepSize(_))));
        }
    }

    #[test]
    fn step_larger_than_the_range_takes_no_steps() {
        let trajectory = exponential(5.0);
        assert_eq!(trajectory.steps(), 0);
        assert_eq!(trajectory.rows().len(), 1);
        assert_eq!(trajectory.final_step().x, 0.0);
    }

    #[test]
    fn tiny_step_sizes_are_refused() {
        let result = eulers_method(&f64::exp, &|_x: f64, y: f64| y, InitialCondition::new(0.0, 1.0), 1e-300);
        assert!(matches!(result, Err(ApproxError::TooManySteps { steps: u64::MAX, .. })));
        let result = eulers_method(&f64::exp, &|_x: f64, y: f64| y, InitialCondition::new(0.0, 1.0), 1e-10);
        assert!(matches!(result, Err(ApproxError::TooManySteps { max: MAX_STEPS, .. })));
    }

    #[test]
    fn row_selection_near_the_step_limit() {
        assert!(keeps_row(1 << 63, 5, u64::MAX, 10));
        assert!(!keeps_row(u64::MAX - 1, 10, u64::MAX, 10));
    }

    #[test]
    fn row_selection() {
        assert!(keeps_row(3, 3, 7, 10));
        assert!(keeps_row(0, 0, 1000, 10));
        assert!(keeps_row(100, 1, 1000, 10));
        assert!(!keeps_row(101, 2, 1000, 10));
        assert!(!keeps_row(999, 10, 1000, 10));
    }
}
