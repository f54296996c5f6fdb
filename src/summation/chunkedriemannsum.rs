use tracing::{debug, trace};

use crate::approxerror::{
    ApproxError,
    ApproxResult
};
use crate::configuration::SummationSettings;
use crate::math::realfunction::RealFunction;
use crate::summation::interval::Interval;
use crate::summation::riemannsum::RiemannAccumulator;
use crate::summation::sumrule::SumRule;
use crate::task::cancellation::CancellationToken;
use crate::task::progress::{self, Progress};

/// A Riemann sum computed one chunk per `next()` call.
///
/// Each call is a yield point: the caller can redraw, poll input, or start
/// another computation in between. Yields `Progress::Running` after every
/// chunk that leaves work outstanding and `Progress::Finished(area)` once.
/// A cancelled token ends the iteration with nothing delivered.
pub struct ChunkedRiemannSum<F> {
    func: F,
    accumulator: RiemannAccumulator,
    chunk_size: u64,
    token: CancellationToken,
    done: bool,
}

impl<F> ChunkedRiemannSum<F>
where
    F: RealFunction,
{
    pub fn new(
        func: F,
        interval: Interval,
        samples: u64,
        rule: SumRule,
        chunk_size: u64,
        token: CancellationToken,
    ) -> ApproxResult<ChunkedRiemannSum<F>> {
        if chunk_size == 0 {
            return Err(ApproxError::EmptyChunk);
        }
        let accumulator = RiemannAccumulator::new(interval, samples, rule)?;
        Ok(ChunkedRiemannSum { func, accumulator, chunk_size, token, done: false })
    }

    /// Chunks only when `samples` reaches the configured threshold; smaller
    /// sums finish on the first `next()`.
    pub fn with_settings(
        func: F,
        interval: Interval,
        samples: u64,
        rule: SumRule,
        settings: &SummationSettings,
        token: CancellationToken,
    ) -> ApproxResult<ChunkedRiemannSum<F>> {
        let chunk_size = if samples >= settings.chunk_threshold {
            settings.chunk_size
        } else {
            samples.max(1)
        };
        ChunkedRiemannSum::new(func, interval, samples, rule, chunk_size, token)
    }

    pub fn processed(&self) -> u64 {
        self.accumulator.processed()
    }

    pub fn total(&self) -> u64 {
        self.accumulator.total()
    }

    /// Runs every remaining chunk, reporting progress between them.
    pub fn run(self, on_progress: impl FnMut(u64, u64)) -> ApproxResult<f64> {
        progress::drive(self, on_progress).ok_or(ApproxError::Cancelled)
    }
}

impl<F> Iterator for ChunkedRiemannSum<F>
where
    F: RealFunction,
{
    type Item = Progress<f64>;

    fn next(&mut self) -> Option<Progress<f64>> {
        if self.done {
            return None;
        }
        if self.token.is_cancelled() {
            debug!(
                processed = self.accumulator.processed(),
                total = self.accumulator.total(),
                "riemann sum cancelled"
            );
            self.done = true;
            return None;
        }

        self.accumulator.advance(&self.func, self.chunk_size);
        trace!(processed = self.accumulator.processed(), total = self.accumulator.total(), "riemann chunk");

        if self.accumulator.is_complete() {
            self.done = true;
            Some(Progress::Finished(self.accumulator.area()))
        } else {
            Some(Progress::Running {
                processed: self.accumulator.processed(),
                total: self.accumulator.total(),
            })
        }
    }
}
