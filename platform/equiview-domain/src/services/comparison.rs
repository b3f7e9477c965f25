use crate::services::formatters::round_half_up;
use crate::value_objects::backtest_result::BacktestResult;
use crate::value_objects::symbol_result::SymbolResult;
use serde::{Deserialize, Serialize};

const SHORT_ID_LEN: usize = 8;

/// Side-by-side summary of one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunComparison {
    pub label: String,
    pub run_id: String,
    pub short_id: String,
    pub strategy: String,
    pub total_signals: u64,
    pub symbol_count: usize,
    pub avg_return: f64,
    pub avg_return_rounded: f64,
    pub avg_win_rate: f64,
    pub avg_max_drawdown: f64,
    pub execution_time: f64,
    pub period: String,
}

/// Summaries in input order, labelled `Run 1`, `Run 2`, ...
///
/// Averages are plain means of the backend's per-symbol figures and are zero
/// for a run without symbols.
pub fn compare_runs(results: &[BacktestResult]) -> Vec<RunComparison> {
    results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let avg_return = mean_of(&result.symbols, |s| s.avg_return);
            RunComparison {
                label: format!("Run {}", idx + 1),
                run_id: result.run_id.clone(),
                short_id: result.run_id.chars().take(SHORT_ID_LEN).collect(),
                strategy: result.strategy.clone(),
                total_signals: result.total_signals,
                symbol_count: result.symbols.len(),
                avg_return,
                avg_return_rounded: round_half_up(avg_return * 10_000.0) / 10_000.0,
                avg_win_rate: mean_of(&result.symbols, |s| s.win_rate),
                avg_max_drawdown: mean_of(&result.symbols, |s| s.max_drawdown),
                execution_time: result.execution_time,
                period: format!("{} ~ {}", result.start_date, result.end_date),
            }
        })
        .collect()
}

fn mean_of(symbols: &[SymbolResult], field: impl Fn(&SymbolResult) -> f64) -> f64 {
    if symbols.is_empty() {
        return 0.0;
    }
    symbols.iter().map(field).sum::<f64>() / symbols.len() as f64
}

#[cfg(test)]
mod tests {
    use super::compare_runs;
    use crate::value_objects::backtest_result::BacktestResult;
    use crate::value_objects::symbol_result::SymbolResult;

    fn symbol(name: &str, avg_return: f64, win_rate: f64, max_drawdown: f64) -> SymbolResult {
        let mut s = SymbolResult::new(name);
        s.avg_return = avg_return;
        s.win_rate = win_rate;
        s.max_drawdown = max_drawdown;
        s
    }

    fn run(run_id: &str, symbols: Vec<SymbolResult>) -> BacktestResult {
        BacktestResult {
            run_id: run_id.to_string(),
            strategy: "volume_zscore".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-02-01".to_string(),
            total_signals: 12,
            execution_time: 1.25,
            symbols,
            ..BacktestResult::default()
        }
    }

    #[test]
    fn averages_symbol_metrics() {
        let rows = compare_runs(&[run(
            "0123456789abcdef",
            vec![
                symbol("BTC_KRW", 0.012345, 0.6, -0.1),
                symbol("ETH_KRW", 0.0, 0.4, -0.3),
            ],
        )]);
        let row = &rows[0];
        assert_eq!(row.label, "Run 1");
        assert_eq!(row.short_id, "01234567");
        assert_eq!(row.symbol_count, 2);
        assert!((row.avg_return - 0.0061725).abs() < 1e-12);
        assert_eq!(row.avg_return_rounded, 0.0062);
        assert!((row.avg_win_rate - 0.5).abs() < 1e-12);
        assert!((row.avg_max_drawdown + 0.2).abs() < 1e-12);
        assert_eq!(row.period, "2024-01-01 ~ 2024-02-01");
    }

    #[test]
    fn run_without_symbols_averages_zero() {
        let rows = compare_runs(&[run("a", vec![]), run("b", vec![])]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].label, "Run 2");
        assert_eq!(rows[0].avg_return, 0.0);
        assert_eq!(rows[0].avg_win_rate, 0.0);
        assert_eq!(rows[0].short_id, "a");
    }
}
