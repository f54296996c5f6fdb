use serde::{
    Deserialize,
    Serialize
};

use crate::math::realfunction::{
    OdeFunction,
    RealFunction
};
use crate::ode::eulerstep::InitialCondition;

/// Population models with closed-form solutions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum GrowthModel {
    /// dP/dt = rP
    Exponential { initial: f64, rate: f64 },
    /// dP/dt = rP(1 − P/K)
    Logistic { initial: f64, rate: f64, capacity: f64 },
}

impl GrowthModel {
    /// P(t).
    pub fn population(&self, t: f64) -> f64 {
        match *self {
            GrowthModel::Exponential { initial, rate } => initial * (rate * t).exp(),
            GrowthModel::Logistic { initial, rate, capacity } => {
                (initial * capacity) / ((capacity - initial) * (-rate * t).exp() + initial)
            }
        }
    }

    /// dP/dt for a population of `population`.
    pub fn rate_of_change(&self, population: f64) -> f64 {
        match *self {
            GrowthModel::Exponential { rate, .. } => rate * population,
            GrowthModel::Logistic { rate, capacity, .. } => rate * population * (1.0 - population / capacity),
        }
    }

    /// dP/dt at time `t`.
    pub fn growth_rate(&self, t: f64) -> f64 {
        self.rate_of_change(self.population(t))
    }

    pub fn initial_condition(&self) -> InitialCondition {
        match *self {
            GrowthModel::Exponential { initial, .. } | GrowthModel::Logistic { initial, .. } => {
                InitialCondition::new(0.0, initial)
            }
        }
    }
}

impl RealFunction for GrowthModel {
    fn value(&self, t: f64) -> f64 {
        self.population(t)
    }
}

impl OdeFunction for GrowthModel {
    fn slope(&self, _t: f64, population: f64) -> f64 {
        self.rate_of_change(population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ode::eulersmethod::eulers_method;

    const LOGISTIC: GrowthModel = GrowthModel::Logistic { initial: 10.0, rate: 2.0, capacity: 100.0 };

    #[test]
    fn logistic_starts_at_initial_and_levels_off() {
        assert!((LOGISTIC.population(0.0) - 10.0).abs() < 1e-12);
        assert!((LOGISTIC.population(50.0) - 100.0).abs() < 1e-9);
        assert!(LOGISTIC.growth_rate(50.0).abs() < 1e-6);
    }

    #[test]
    fn logistic_grows_fastest_at_half_capacity() {
        assert_eq!(LOGISTIC.rate_of_change(50.0), 50.0);
        assert!(LOGISTIC.rate_of_change(40.0) < 50.0);
        assert!(LOGISTIC.rate_of_change(60.0) < 50.0);
    }

    #[test]
    fn exponential_growth_rate_is_proportional() {
        let model = GrowthModel::Exponential { initial: 3.0, rate: 0.5 };
        assert!((model.growth_rate(2.0) - 0.5 * 3.0 * 1f64.exp()).abs() < 1e-12);
    }

    #[test]
    fn euler_tracks_the_logistic_curve() {
        let trajectory = eulers_method(&LOGISTIC, &LOGISTIC, LOGISTIC.initial_condition(), 1e-4).unwrap();
        let last = trajectory.final_step();
        assert!(last.absolute_error < 1e-2, "error {}", last.absolute_error);
    }

    #[test]
    fn deserializes_tagged() {
        let model: GrowthModel = serde_json::from_str(r#"{ "model": "exponential", "initial": 1.0, "rate": 0.1 }"#).unwrap();
        assert_eq!(model, GrowthModel::Exponential { initial: 1.0, rate: 0.1 });
    }
}
