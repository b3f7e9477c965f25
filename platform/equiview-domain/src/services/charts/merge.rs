use crate::services::charts::rounding::round2;
use crate::value_objects::symbol_result::SymbolResult;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};

/// One timestamp of the merged multi-symbol chart. Symbols without a sample at
/// this timestamp are absent, never zero-filled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedPoint {
    pub timestamp: String,
    values: Vec<(String, f64)>,
}

impl MergedPoint {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            values: Vec::new(),
        }
    }

    /// Sets `symbol`'s value, keeping the position of an existing key.
    pub fn insert(&mut self, symbol: &str, value: f64) {
        match self.values.iter_mut().find(|(key, _)| key == symbol) {
            Some(slot) => slot.1 = value,
            None => self.values.push((symbol.to_string(), value)),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(key, _)| key == symbol)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn values(&self) -> &[(String, f64)] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// Rows serialize flat: {"timestamp": "...", "BTC_KRW": 105.0, ...}
impl Serialize for MergedPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("timestamp", &self.timestamp)?;
        for (symbol, value) in &self.values {
            map.serialize_entry(symbol, value)?;
        }
        map.end()
    }
}

/// Aligns every symbol's performance curve on the union of their timestamps.
///
/// Timestamps are deduplicated and sorted by string order (UTF-16 code units);
/// inputs need not be sorted. Values are equity in percent (`1.05 -> 105.0`) rounded to two
/// decimals, and when a curve repeats a timestamp its first sample wins.
pub fn merge_symbol_series(symbols: &[SymbolResult]) -> Vec<MergedPoint> {
    if symbols.is_empty() {
        return Vec::new();
    }

    let lookups: Vec<(&str, HashMap<&str, f64>)> = symbols
        .iter()
        .map(|symbol| {
            let mut by_timestamp = HashMap::with_capacity(symbol.curve().len());
            for point in symbol.curve() {
                by_timestamp
                    .entry(point.timestamp.as_str())
                    .or_insert(point.equity);
            }
            (symbol.symbol.as_str(), by_timestamp)
        })
        .collect();

    let mut timestamps: Vec<&str> = symbols
        .iter()
        .flat_map(|symbol| symbol.curve().iter().map(|p| p.timestamp.as_str()))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    // UTF-16 code unit order, which is how the dashboard sorts its timestamp keys
    timestamps.sort_unstable_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));

    timestamps
        .into_iter()
        .map(|timestamp| {
            let mut row = MergedPoint::new(timestamp);
            for (symbol, by_timestamp) in &lookups {
                if let Some(equity) = by_timestamp.get(timestamp) {
                    row.insert(symbol, round2(equity * 100.0));
                }
            }
            row
        })
        .collect()
}
