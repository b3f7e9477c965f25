use crate::services::charts::rounding::{fixed, round1};
use crate::value_objects::signal::Signal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub range: String,
    pub count: usize,
    pub percentage: f64,
}

/// Histogram resolution as a step function of the sample size.
pub fn recommended_bin_count(signal_count: usize) -> usize {
    match signal_count {
        0..=29 => 5,
        30..=100 => 10,
        101..=500 => 15,
        _ => 20,
    }
}

/// Buckets signal returns (in percent) into equal-width bins spanning
/// `[min, max]`. Every signal lands in exactly one bin; percentages are rounded
/// per bin and may not add up to exactly 100.
pub fn compute_returns_distribution(signals: &[Signal]) -> Vec<HistogramBin> {
    if signals.is_empty() {
        return Vec::new();
    }

    let returns: Vec<f64> = signals.iter().map(Signal::return_percent).collect();
    let (min, max) = extremes(&returns);
    let total = signals.len();

    if min == max {
        return vec![HistogramBin {
            range: format!("{}%", fixed(min, 1)),
            count: total,
            percentage: 100.0,
        }];
    }

    let bin_count = recommended_bin_count(total);
    let width = (max - min) / bin_count as f64;

    let mut counts = vec![0usize; bin_count];
    for value in &returns {
        counts[bin_index(*value, min, width, bin_count)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| {
            let start = min + idx as f64 * width;
            let end = min + (idx + 1) as f64 * width;
            HistogramBin {
                range: format!("{}% ~ {}%", fixed(start, 1), fixed(end, 1)),
                count,
                percentage: round1(count as f64 / total as f64 * 100.0),
            }
        })
        .collect()
}

fn bin_index(value: f64, min: f64, width: f64, bin_count: usize) -> usize {
    let raw = ((value - min) / width).floor();
    // NaN offsets go to the first bin; the value equal to max would overflow
    // by one and is clamped into the last
    let idx = if raw.is_nan() || raw < 0.0 {
        0
    } else {
        raw as usize
    };
    idx.min(bin_count - 1)
}

fn extremes(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        if value.is_nan() {
            return (f64::NAN, f64::NAN);
        }
        min = min.min(*value);
        max = max.max(*value);
    }
    (min, max)
}
