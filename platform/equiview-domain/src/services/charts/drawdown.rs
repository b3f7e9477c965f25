use crate::services::charts::rounding::round2;
use crate::value_objects::performance_point::PerformancePoint;
use serde::{Deserialize, Serialize};

/// Equity curves are multipliers relative to the start of the run, so the
/// running peak starts at break-even rather than at the first sample.
pub const BASELINE_EQUITY: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownPoint {
    pub timestamp: String,
    /// Percent below the running peak, always `<= 0` for finite input.
    pub drawdown: f64,
    pub equity: f64,
}

/// Annotates every point with its distance below the running peak, in percent
/// rounded to two decimals. Output has the same length and order as `points`.
pub fn compute_drawdown_series(points: &[PerformancePoint]) -> Vec<DrawdownPoint> {
    let mut peak = BASELINE_EQUITY;
    points
        .iter()
        .map(|point| {
            if point.equity > peak {
                peak = point.equity;
            }
            let drawdown = (point.equity - peak) / peak * 100.0;
            DrawdownPoint {
                timestamp: point.timestamp.clone(),
                drawdown: round2(drawdown),
                equity: point.equity,
            }
        })
        .collect()
}
