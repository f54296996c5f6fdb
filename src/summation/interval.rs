use crate::approxerror::{
    ApproxError,
    ApproxResult
};

/// Closed interval `[start, end]` of finite reals.
///
/// `start > end` is allowed; sums over it come out with the opposite sign,
/// the same convention as ∫_a^b = -∫_b^a.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    start: f64,
    end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> ApproxResult<Interval> {
        if !start.is_finite() {
            return Err(ApproxError::NonFiniteBound(start));
        }
        if !end.is_finite() {
            return Err(ApproxError::NonFiniteBound(end));
        }
        Ok(Interval { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Width of each of `panels` equal panels (signed).
    pub fn panel_width(&self, panels: u64) -> ApproxResult<f64> {
        if panels == 0 {
            return Err(ApproxError::EmptyPartition);
        }
        Ok(self.length() / panels as f64)
    }
}
