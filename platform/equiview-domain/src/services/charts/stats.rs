use crate::services::charts::drawdown::DrawdownPoint;
use crate::services::charts::rounding::{round1, round2};
use crate::value_objects::signal::Signal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawdownSummary {
    pub max_drawdown: f64,
    pub current_drawdown: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSummary {
    pub total_trades: usize,
    pub avg_return: f64,
    pub win_rate: f64,
}

/// Deepest and most recent drawdown of a series, zero when empty.
pub fn drawdown_summary(series: &[DrawdownPoint]) -> DrawdownSummary {
    let Some(last) = series.last() else {
        return DrawdownSummary::default();
    };

    let deepest = series.iter().fold(f64::INFINITY, |acc, point| {
        if acc.is_nan() || point.drawdown.is_nan() {
            f64::NAN
        } else {
            acc.min(point.drawdown)
        }
    });
    let current = if last.drawdown.is_nan() {
        0.0
    } else {
        last.drawdown
    };

    DrawdownSummary {
        max_drawdown: round2(deepest),
        current_drawdown: round2(current),
    }
}

/// Trade count, mean return in percent, and share of strictly positive
/// returns in percent. Break-even trades are not wins.
pub fn signal_summary(signals: &[Signal]) -> SignalSummary {
    if signals.is_empty() {
        return SignalSummary::default();
    }

    let total = signals.len();
    let avg_return = signals.iter().map(Signal::return_percent).sum::<f64>() / total as f64;
    let wins = signals.iter().filter(|s| s.is_win()).count();

    SignalSummary {
        total_trades: total,
        avg_return: round2(avg_return),
        win_rate: round1(wins as f64 / total as f64 * 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::{drawdown_summary, signal_summary};
    use crate::services::charts::drawdown::DrawdownPoint;
    use crate::value_objects::side::Side;
    use crate::value_objects::signal::Signal;

    fn dd(values: &[f64]) -> Vec<DrawdownPoint> {
        values
            .iter()
            .map(|d| DrawdownPoint {
                timestamp: "t".to_string(),
                drawdown: *d,
                equity: 1.0,
            })
            .collect()
    }

    fn signals(returns: &[f64]) -> Vec<Signal> {
        returns
            .iter()
            .map(|ret| Signal {
                symbol: "BTC".to_string(),
                side: Side::Buy,
                timestamp: "2024-01-01".to_string(),
                entry_price: 100.0,
                exit_price: 100.0 * (1.0 + ret),
                return_pct: *ret,
            })
            .collect()
    }

    #[test]
    fn empty_drawdown_series_is_zero() {
        let summary = drawdown_summary(&[]);
        assert_eq!(summary.max_drawdown, 0.0);
        assert_eq!(summary.current_drawdown, 0.0);
    }

    #[test]
    fn picks_deepest_and_last() {
        let summary = drawdown_summary(&dd(&[0.0, -5.5, -10.2, -3.1]));
        assert_eq!(summary.max_drawdown, -10.2);
        assert_eq!(summary.current_drawdown, -3.1);
    }

    #[test]
    fn nan_as_last_value_reports_zero_current() {
        let summary = drawdown_summary(&dd(&[-1.0, f64::NAN]));
        assert_eq!(summary.current_drawdown, 0.0);
        assert!(summary.max_drawdown.is_nan());
    }

    #[test]
    fn nan_before_last_value_propagates_to_max() {
        let summary = drawdown_summary(&dd(&[f64::NAN, -2.0]));
        assert_eq!(summary.current_drawdown, -2.0);
        assert!(summary.max_drawdown.is_nan());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(drawdown_summary(&dd(&[-1.0]))).expect("json");
        assert_eq!(
            json,
            serde_json::json!({"maxDrawdown": -1.0, "currentDrawdown": -1.0})
        );
    }

    #[test]
    fn empty_signals_are_zero() {
        let summary = signal_summary(&[]);
        assert_eq!(summary.total_trades, 0);
        assert_eq!(summary.avg_return, 0.0);
        assert_eq!(summary.win_rate, 0.0);
    }

    #[test]
    fn single_trade() {
        let summary = signal_summary(&signals(&[0.10]));
        assert_eq!(summary.total_trades, 1);
        assert_eq!(summary.avg_return, 10.0);
        assert_eq!(summary.win_rate, 100.0);
    }

    #[test]
    fn break_even_is_not_a_win() {
        let summary = signal_summary(&signals(&[0.05, -0.03, 0.02, 0.0]));
        assert_eq!(summary.total_trades, 4);
        assert_eq!(summary.win_rate, 50.0);
    }

    #[test]
    fn average_return_is_rounded() {
        let summary = signal_summary(&signals(&[0.10, 0.05, -0.05]));
        assert_eq!(summary.avg_return, 3.33);
        assert_eq!(summary.win_rate, 66.7);
    }
}
