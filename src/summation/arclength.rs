use crate::approxerror::ApproxResult;
use crate::math::realfunction::RealFunction;
use crate::summation::interval::Interval;

/// Length of the polyline through `segments + 1` equally spaced points of
/// the graph of `f`. Converges to the arc length for smooth `f`.
pub fn arc_length<F>(func: &F, interval: Interval, segments: u64) -> ApproxResult<f64>
where
    F: RealFunction + ?Sized,
{
    let width = interval.panel_width(segments)?;
    let start = interval.start();

    let mut left = func.value(start);
    let mut total_length = 0.0;
    for i in 1..=segments {
        let right = func.value(start + i as f64 * width);
        total_length += width.hypot(right - left);
        left = right;
    }
    Ok(total_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_is_exact() {
        let interval = Interval::new(0.0, 3.0).unwrap();
        let length = arc_length(&|x: f64| 4.0 / 3.0 * x, interval, 7).unwrap();
        assert!((length - 5.0).abs() < 1e-12);
    }

    #[test]
    fn semi_cubical_parabola() {
        // ∫_0^2 sqrt(1 + 9x/4) dx = (22^(3/2) - 8) / 27
        let interval = Interval::new(0.0, 2.0).unwrap();
        let exact = (22f64.powf(1.5) - 8.0) / 27.0;
        let length = arc_length(&|x: f64| x.powf(1.5), interval, 10_000).unwrap();
        assert!((length - exact).abs() < 1e-6);
    }
}
