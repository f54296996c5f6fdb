use crate::approxerror::ApproxResult;
use crate::math::realfunction::RealFunction;
use crate::summation::interval::Interval;
use crate::summation::sumrule::SumRule;

// ─────────────────────────────────────────────────────────────────────────────
// RiemannAccumulator
// ─────────────────────────────────────────────────────────────────────────────
//
// 把一次 Riemann sum 拆成可分段推進的狀態：
//
//   area = w · Σ h_i
//
// 取樣點由 panel index 直接算出 (a + (i + offset)·w)，不累加 x，
// 因此分段計算與一次算完的結果逐位元相同。
// Trapezoid 仍保留「右端點值留給下一個 panel 當左端點」的配對求值，
// 跨 chunk 時以 `carry` 傳遞。

/// Resumable state of one Riemann sum.
#[derive(Debug, Clone)]
pub struct RiemannAccumulator {
    rule: SumRule,
    start: f64,
    width: f64,
    total: u64,
    processed: u64,
    total_height: f64,
    carry: Option<f64>,
}

impl RiemannAccumulator {
    pub fn new(interval: Interval, samples: u64, rule: SumRule) -> ApproxResult<RiemannAccumulator> {
        let width = interval.panel_width(samples)?;
        Ok(RiemannAccumulator {
            rule,
            start: interval.start(),
            width,
            total: samples,
            processed: 0,
            total_height: 0.0,
            carry: None,
        })
    }

    pub fn rule(&self) -> SumRule {
        self.rule
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.processed >= self.total
    }

    /// Sum of panel heights times the panel width so far.
    pub fn area(&self) -> f64 {
        self.total_height * self.width
    }

    /// Processes up to `panels` more panels and returns how many were done.
    pub fn advance<F>(&mut self, func: &F, panels: u64) -> u64
    where
        F: RealFunction + ?Sized,
    {
        let end = self.processed.saturating_add(panels).min(self.total);
        let runs = end - self.processed;

        match self.rule.sample_offset() {
            Some(offset) => {
                for i in self.processed..end {
                    let x = self.start + (i as f64 + offset) * self.width;
                    self.total_height += func.value(x);
                }
            }
            None => {
                let mut left = match self.carry {
                    Some(value) => value,
                    None => func.value(self.start + self.processed as f64 * self.width),
                };
                for i in self.processed..end {
                    let right = func.value(self.start + (i + 1) as f64 * self.width);
                    self.total_height += (left + right) / 2.0;
                    left = right;
                }
                self.carry = Some(left);
            }
        }

        self.processed = end;
        runs
    }
}

/// Approximates ∫_a^b f(x) dx with `samples` equal panels.
///
/// Non-finite values of `f` propagate into the result.
pub fn riemann_sum<F>(func: &F, interval: Interval, samples: u64, rule: SumRule) -> ApproxResult<f64>
where
    F: RealFunction + ?Sized,
{
    let mut accumulator = RiemannAccumulator::new(interval, samples, rule)?;
    accumulator.advance(func, samples);
    Ok(accumulator.area())
}
