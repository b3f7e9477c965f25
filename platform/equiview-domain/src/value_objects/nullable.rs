use serde::{Deserialize, Deserializer};

/// Backend payloads carry `null` for values not yet known (open signals,
/// unfinished curves). Those numbers read as `0.0`.
pub(crate) fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
