use crate::value_objects::nullable::null_as_zero;
use crate::value_objects::symbol_result::SymbolResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BacktestResult {
    pub run_id: String,
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub params: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub symbols: Vec<SymbolResult>,
    #[serde(default)]
    pub total_signals: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub execution_time: f64,
}

impl BacktestResult {
    pub fn symbol(&self, symbol: &str) -> Option<&SymbolResult> {
        self.symbols.iter().find(|s| s.symbol == symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::BacktestResult;
    use crate::value_objects::side::Side;

    #[test]
    fn parses_backend_payload_with_open_signals() {
        let raw = r#"{
            "run_id": "run-1",
            "strategy": "volume_zone_breakout",
            "params": {"volume_window": 10},
            "start_date": "2024-01-01",
            "end_date": "2024-01-31",
            "timeframe": "1d",
            "symbols": [{
                "symbol": "BTC_KRW",
                "signals": [{
                    "symbol": "BTC_KRW",
                    "type": "buy",
                    "timestamp": "2024-01-02T00:00:00Z",
                    "entry_price": 100.0,
                    "exit_price": null,
                    "return_pct": null
                }],
                "win_rate": 0.5,
                "avg_return": 0.01,
                "max_drawdown": -0.05,
                "avg_hold_bars": 3.0,
                "performance_curve": null
            }],
            "total_signals": 1,
            "execution_time": 0.42
        }"#;

        let result: BacktestResult = serde_json::from_str(raw).expect("payload should parse");
        let btc = result.symbol("BTC_KRW").expect("symbol");
        assert!(btc.performance_curve.is_none());
        assert!(!btc.has_curve());
        let signal = &btc.signals()[0];
        assert_eq!(signal.side, Side::Buy);
        assert_eq!(signal.exit_price, 0.0);
        assert_eq!(signal.return_pct, 0.0);
        assert_eq!(result.params["volume_window"], 10);
    }

    #[test]
    fn missing_optional_fields_default() {
        let result: BacktestResult =
            serde_json::from_str(r#"{"run_id":"r","symbols":[{"symbol":"ETH_KRW"}]}"#)
                .expect("minimal payload");
        assert_eq!(result.symbols[0].win_rate, 0.0);
        assert!(result.symbols[0].signals().is_empty());
        assert_eq!(result.total_signals, 0);
    }
}
