use serde::{Deserialize, Serialize};

/// One sample of a cumulative-return curve. `equity` is a multiplier where
/// `1.0` is break-even.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub timestamp: String,
    pub equity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawdown: Option<f64>,
}

impl PerformancePoint {
    pub fn new(timestamp: impl Into<String>, equity: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            equity,
            drawdown: None,
        }
    }
}
