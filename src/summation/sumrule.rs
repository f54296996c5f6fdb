use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;


/// Quadrature rule for a Riemann sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SumRule {
    Left,
    Right,
    Midpoint,
    Trapezoid,
}

impl SumRule {
    pub const ALL: [SumRule; 4] = [SumRule::Left, SumRule::Right, SumRule::Midpoint, SumRule::Trapezoid];

    /// Where inside a panel the single sample sits, as a fraction of the
    /// panel width. The trapezoid rule samples both edges and has none.
    pub fn sample_offset(&self) -> Option<f64> {
        match self {
            SumRule::Left => Some(0.0),
            SumRule::Right => Some(1.0),
            SumRule::Midpoint => Some(0.5),
            SumRule::Trapezoid => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SumRule::Left => "left",
            SumRule::Right => "right",
            SumRule::Midpoint => "midpoint",
            SumRule::Trapezoid => "trapezoid",
        }
    }
}

impl fmt::Display for SumRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sum rule '{0}' (expected left, right, midpoint or trapezoid)")]
pub struct ParseSumRuleError(String);

impl FromStr for SumRule {
    type Err = ParseSumRuleError;

    fn from_str(s: &str) -> Result<SumRule, ParseSumRuleError> {
        SumRule::ALL
            .into_iter()
            .find(|rule| rule.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSumRuleError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!("midpoint".parse::<SumRule>().unwrap(), SumRule::Midpoint);
        assert_eq!("Trapezoid".parse::<SumRule>().unwrap(), SumRule::Trapezoid);
        assert!("simpson".parse::<SumRule>().is_err());
    }

    #[test]
    fn only_trapezoid_lacks_an_offset() {
        for rule in SumRule::ALL {
            assert_eq!(rule.sample_offset().is_none(), rule == SumRule::Trapezoid);
        }
    }
}
