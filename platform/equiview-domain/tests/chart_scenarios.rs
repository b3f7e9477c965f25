use equiview_domain::services::charts::{
    compute_drawdown_series, compute_returns_distribution, drawdown_summary, merge_symbol_series,
    signal_summary,
};
use equiview_domain::value_objects::backtest_result::BacktestResult;

const PAYLOAD: &str = r#"{
    "run_id": "scenario",
    "strategy": "volume_zscore",
    "symbols": [
        {
            "symbol": "BTC_KRW",
            "performance_curve": [
                {"timestamp": "2024-01-01", "equity": 1.0},
                {"timestamp": "2024-01-02", "equity": 1.1},
                {"timestamp": "2024-01-03", "equity": 1.0}
            ],
            "signals": [
                {"symbol": "BTC_KRW", "type": "buy", "timestamp": "2024-01-01", "entry_price": 100, "exit_price": 95, "return_pct": -0.05},
                {"symbol": "BTC_KRW", "type": "buy", "timestamp": "2024-01-02", "entry_price": 100, "exit_price": 100, "return_pct": 0.0},
                {"symbol": "BTC_KRW", "type": "sell", "timestamp": "2024-01-03", "entry_price": 100, "exit_price": 105, "return_pct": 0.05}
            ]
        },
        {
            "symbol": "ETH_KRW",
            "performance_curve": [
                {"timestamp": "2024-01-02", "equity": 1.02},
                {"timestamp": "2024-01-04", "equity": 0.25}
            ]
        }
    ]
}"#;

fn result() -> BacktestResult {
    serde_json::from_str(PAYLOAD).expect("scenario payload")
}

#[test]
fn recovery_after_peak() {
    let result = result();
    let btc = result.symbol("BTC_KRW").expect("btc");
    let series = compute_drawdown_series(btc.curve());
    let drawdowns: Vec<f64> = series.iter().map(|p| p.drawdown).collect();
    assert_eq!(drawdowns, vec![0.0, 0.0, -9.09]);

    let summary = drawdown_summary(&series);
    assert_eq!(summary.max_drawdown, -9.09);
    assert_eq!(summary.current_drawdown, -9.09);
}

#[test]
fn deep_loss_from_baseline() {
    let result = result();
    let eth = result.symbol("ETH_KRW").expect("eth");
    let series = compute_drawdown_series(eth.curve());
    assert_eq!(series[0].drawdown, 0.0);
    assert_eq!(series[1].drawdown, -75.49);
}

#[test]
fn symmetric_returns_fill_outer_and_middle_bins() {
    let result = result();
    let btc = result.symbol("BTC_KRW").expect("btc");
    let bins = compute_returns_distribution(btc.signals());
    let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![1, 0, 1, 0, 1]);
    assert_eq!(bins[0].range, "-5.0% ~ -3.0%");
    assert_eq!(bins[4].range, "3.0% ~ 5.0%");

    let summary = signal_summary(btc.signals());
    assert_eq!(summary.total_trades, 3);
    assert_eq!(summary.avg_return, 0.0);
    assert_eq!(summary.win_rate, 33.3);
}

#[test]
fn merged_series_spans_both_symbols() {
    let rows = merge_symbol_series(&result().symbols);
    let json = serde_json::to_value(&rows).expect("json");
    assert_eq!(
        json,
        serde_json::json!([
            {"timestamp": "2024-01-01", "BTC_KRW": 100.0},
            {"timestamp": "2024-01-02", "BTC_KRW": 110.0, "ETH_KRW": 102.0},
            {"timestamp": "2024-01-03", "BTC_KRW": 100.0},
            {"timestamp": "2024-01-04", "ETH_KRW": 25.0}
        ])
    );
}
