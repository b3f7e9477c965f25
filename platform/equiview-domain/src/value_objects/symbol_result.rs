use crate::value_objects::nullable::null_as_zero;
use crate::value_objects::performance_point::PerformancePoint;
use crate::value_objects::signal::Signal;
use serde::{Deserialize, Serialize};

/// One symbol's backtest output. The scalar metrics come from the backend and
/// are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolResult {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_curve: Option<Vec<PerformancePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signals: Option<Vec<Signal>>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub win_rate: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub avg_return: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub max_drawdown: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub avg_hold_bars: f64,
}

impl SymbolResult {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            performance_curve: None,
            signals: None,
            win_rate: 0.0,
            avg_return: 0.0,
            max_drawdown: 0.0,
            avg_hold_bars: 0.0,
        }
    }

    pub fn curve(&self) -> &[PerformancePoint] {
        self.performance_curve.as_deref().unwrap_or(&[])
    }

    pub fn signals(&self) -> &[Signal] {
        self.signals.as_deref().unwrap_or(&[])
    }

    pub fn has_curve(&self) -> bool {
        !self.curve().is_empty()
    }
}
