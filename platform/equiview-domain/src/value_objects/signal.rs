use crate::value_objects::nullable::null_as_zero;
use crate::value_objects::side::Side;
use serde::{Deserialize, Serialize};

/// A closed trade. `return_pct` is a decimal fraction (`0.03` = +3%) and is
/// taken as given, not recomputed from the prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    #[serde(rename = "type")]
    pub side: Side,
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub entry_price: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub exit_price: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub return_pct: f64,
}

impl Signal {
    pub fn return_percent(&self) -> f64 {
        self.return_pct * 100.0
    }

    pub fn is_win(&self) -> bool {
        self.return_pct > 0.0
    }
}
