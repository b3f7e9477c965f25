use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[serde(alias = "BUY", alias = "Buy")]
    Buy,
    #[serde(alias = "SELL", alias = "Sell")]
    Sell,
}
