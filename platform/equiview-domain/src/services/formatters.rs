//! Display formatting for dashboard figures. Missing values render as `N/A`.

use crate::services::charts::rounding::fixed;
use serde::{Deserialize, Serialize};

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueClass {
    Positive,
    Negative,
    Neutral,
}

impl ValueClass {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueClass::Positive => "positive",
            ValueClass::Negative => "negative",
            ValueClass::Neutral => "neutral",
        }
    }
}

/// Renders a decimal fraction as a percentage: `0.05 -> "5.00%"`.
pub fn format_percent(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(value) => format!("{}%", fixed(value * 100.0, digits)),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_decimal(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(value) => fixed(value, digits),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Rounds to an integer (halves toward positive infinity) and groups
/// thousands with `,`.
pub fn format_number(value: Option<f64>) -> String {
    let Some(value) = value else {
        return NOT_AVAILABLE.to_string();
    };
    let rounded = round_half_up(value);
    if !rounded.is_finite() {
        return format!("{rounded}");
    }

    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_thousands(&digits);
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn value_class(value: Option<f64>) -> ValueClass {
    match value {
        None => ValueClass::Neutral,
        Some(v) if v >= 0.0 => ValueClass::Positive,
        Some(_) => ValueClass::Negative,
    }
}

pub(crate) fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    rounded + 0.0
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
