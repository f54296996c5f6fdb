use std::f64::consts::LOG10_E;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::approxerror::{
    ApproxError,
    ApproxResult
};
use crate::configuration::EDigitsSettings;
use crate::math::factorial::log10_factorial;
use crate::precision::scaleddecimal::ScaledDecimal;
use crate::task::cancellation::CancellationToken;
use crate::task::progress::{self, Progress};

/// The first 500 decimals of e, used to decide which computed digits to trust.
pub const E_REFERENCE: &str = "2.71828182845904523536028747135266249775724709369995957496696762772407\
    6630353547594571382178525166427427466391932003059921817413596629043572\
    9003342952605956307381323286279434907632338298807531952510190115738341\
    8793070215408914993488416750924476146066808226480016847741185374234544\
    2437107539077744992069551702761838606261331384583000752044933826560297\
    6067371132007093287091274437470472306969772093101416928368190255151086\
    5746377211125238978442505695369677078544996996794686445490598793163688\
    923009879312";

pub const MIN_DEGREE: u64 = 1;

/// Largest accepted degree; term divisors are taken as `u32`.
pub const MAX_DEGREE: u64 = u32::MAX as u64 - 1;

/// Extra fraction digits carried beyond the working precision so truncation
/// in the running divisions stays out of the rendered digits.
const GUARD_DIGITS: usize = 9;

// ─────────────────────────────────────────────────────────────────────────────
// PrecisionBudget
// ─────────────────────────────────────────────────────────────────────────────

/// How many digits a degree-`d` partial sum of Σ 1/k! can be trusted for.
///
/// By the Lagrange bound the truncation error is at most e/(d+1)!, so
/// ⌊log10((d+1)!/e)⌋ decimals are certain. Arithmetic runs a couple of
/// digits beyond that, never below 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecisionBudget {
    confident_digits: u64,
    working_digits: u64,
}

impl PrecisionBudget {
    pub fn for_degree(degree: u64) -> PrecisionBudget {
        let confident = (log10_factorial(degree + 1) - LOG10_E).floor().max(0.0) as u64;
        PrecisionBudget {
            confident_digits: confident,
            working_digits: (confident + 2).max(10),
        }
    }

    pub fn confident_digits(&self) -> u64 {
        self.confident_digits
    }

    pub fn working_digits(&self) -> u64 {
        self.working_digits
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EDigits
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct EDigits {
    digits: String,
    degree: u64,
    elapsed: Duration,
}

impl EDigits {
    /// `"2.718..."`, only the digits worth showing.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn degree(&self) -> u64 {
        self.degree
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    /// Number of decimals after "2.".
    pub fn digit_count(&self) -> usize {
        self.digits.len().saturating_sub(2)
    }
}

/// Keeps the prefix of `rendered` that agrees with [`E_REFERENCE`].
///
/// A result longer than the reference cannot be checked digit by digit;
/// its last two digits are dropped instead.
pub fn trusted_digits(rendered: &str) -> String {
    if rendered.len() > E_REFERENCE.len() {
        return rendered[..rendered.len() - 2].to_owned();
    }
    let matched = rendered
        .bytes()
        .zip(E_REFERENCE.bytes())
        .take_while(|(computed, reference)| computed == reference)
        .count();
    rendered[..matched].trim_end_matches('.').to_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// EDigitsComputation
// ─────────────────────────────────────────────────────────────────────────────

/// Σ_{k=0}^{degree} 1/k! in extended precision, a chunk of terms per `next()`.
pub struct EDigitsComputation {
    degree: u64,
    index: u64,
    sum: ScaledDecimal,
    term: ScaledDecimal,
    chunk_size: u64,
    budget: PrecisionBudget,
    token: CancellationToken,
    started: Instant,
    done: bool,
}

impl EDigitsComputation {
    pub fn new(degree: u64, settings: &EDigitsSettings, token: CancellationToken) -> ApproxResult<EDigitsComputation> {
        if degree < MIN_DEGREE {
            return Err(ApproxError::DegreeTooSmall { degree, min: MIN_DEGREE });
        }
        if degree > MAX_DEGREE {
            return Err(ApproxError::DegreeTooLarge { degree, max: MAX_DEGREE });
        }

        let budget = PrecisionBudget::for_degree(degree);
        let scale = budget.working_digits() as usize + GUARD_DIGITS;
        let chunk_size = settings.chunk_size_for(degree);
        debug!(
            degree,
            confident_digits = budget.confident_digits(),
            working_digits = budget.working_digits(),
            chunk_size,
            "starting e digit computation"
        );

        Ok(EDigitsComputation {
            degree,
            index: 0,
            sum: ScaledDecimal::zero(scale),
            term: ScaledDecimal::from_integer(1, scale),
            chunk_size,
            budget,
            token,
            started: Instant::now(),
            done: false,
        })
    }

    pub fn budget(&self) -> PrecisionBudget {
        self.budget
    }

    pub fn degree(&self) -> u64 {
        self.degree
    }

    /// Terms summed so far.
    pub fn summed(&self) -> u64 {
        self.index
    }

    pub fn run(self, on_progress: impl FnMut(u64, u64)) -> ApproxResult<EDigits> {
        progress::drive(self, on_progress).ok_or(ApproxError::Cancelled)
    }

    fn sum_chunk(&mut self) {
        let end = self.index.saturating_add(self.chunk_size).min(self.degree + 1);
        while self.index < end {
            if self.term.is_zero() {
                // every later term is zero at this precision as well
                self.index = self.degree + 1;
                return;
            }
            self.sum.add_assign(&self.term);
            self.term.div_assign((self.index + 1) as u32);
            self.index += 1;
        }
    }

    fn finish(&self) -> EDigits {
        let rendered = self.sum.to_significant_string(self.budget.working_digits() as usize);
        let result = EDigits {
            digits: trusted_digits(&rendered),
            degree: self.degree,
            elapsed: self.started.elapsed(),
        };
        info!(
            degree = self.degree,
            digits = result.digit_count(),
            elapsed_ms = result.elapsed_ms() as u64,
            "e digit computation finished"
        );
        result
    }
}

impl Iterator for EDigitsComputation {
    type Item = Progress<EDigits>;

    fn next(&mut self) -> Option<Progress<EDigits>> {
        if self.done {
            return None;
        }
        if self.token.is_cancelled() {
            debug!(summed = self.index, degree = self.degree, "e digit computation cancelled");
            self.done = true;
            return None;
        }

        self.sum_chunk();
        trace!(summed = self.index, degree = self.degree, "e digit chunk");

        if self.index > self.degree {
            self.done = true;
            Some(Progress::Finished(self.finish()))
        } else {
            Some(Progress::Running { processed: self.index, total: self.degree })
        }
    }
}

/// Digits of e from the degree-`degree` Maclaurin polynomial, computed
/// without yielding.
pub fn compute_e_digits(degree: u64) -> ApproxResult<EDigits> {
    EDigitsComputation::new(degree, &EDigitsSettings::default(), CancellationToken::new())?.run(|_, _| {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::ChunkTier;

    #[test]
    fn reference_is_two_point_five_hundred_decimals() {
        assert_eq!(E_REFERENCE.len(), 502);
        assert!(E_REFERENCE.starts_with("2.718281828459045"));
    }

    #[test]
    fn degree_zero_is_rejected() {
        assert_eq!(compute_e_digits(0), Err(ApproxError::DegreeTooSmall { degree: 0, min: 1 }));
    }

    #[test]
    fn degree_one_gives_only_the_integer_part() {
        let result = compute_e_digits(1).unwrap();
        assert_eq!(result.digits(), "2");
        assert_eq!(result.digit_count(), 0);
    }

    #[test]
    fn budget_grows_with_degree() {
        let small = PrecisionBudget::for_degree(5);
        assert_eq!(small.working_digits(), 10);
        let large = PrecisionBudget::for_degree(100);
        // 101! ≈ 9.4e159
        assert_eq!(large.confident_digits(), 159);
        assert_eq!(large.working_digits(), 161);
    }

    #[test]
    fn degree_fifty() {
        let result = compute_e_digits(50).unwrap();
        assert!(result.digit_count() >= 60, "{}", result.digits());
        assert!(E_REFERENCE.starts_with(result.digits()));
    }

    #[test]
    fn long_results_drop_the_last_two_digits() {
        let rendered = format!("{}123", E_REFERENCE);
        assert_eq!(trusted_digits(&rendered), format!("{}1", E_REFERENCE));
    }

    #[test]
    fn chunked_and_synchronous_runs_agree() {
        let synchronous = compute_e_digits(300).unwrap();
        let settings = EDigitsSettings {
            synchronous_below: 0,
            chunk_tiers: vec![ChunkTier { below_degree: 1000, chunk_size: 7 }],
            fallback_chunk_size: 7,
        };
        let computation = EDigitsComputation::new(300, &settings, CancellationToken::new()).unwrap();
        let mut reports = 0;
        let chunked = computation.run(|summed, degree| {
            assert!(summed <= degree);
            reports += 1;
        }).unwrap();
        assert_eq!(chunked.digits(), synchronous.digits());
        assert!(reports > 10);
    }

    #[test]
    fn cancelled_computation_yields_nothing() {
        let token = CancellationToken::new();
        let settings = EDigitsSettings { synchronous_below: 0, ..EDigitsSettings::default() };
        let mut computation = EDigitsComputation::new(5000, &settings, token.clone()).unwrap();
        assert!(matches!(computation.next(), Some(Progress::Running { .. })));
        token.cancel();
        assert!(computation.next().is_none());
    }
}
