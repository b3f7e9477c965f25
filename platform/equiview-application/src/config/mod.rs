use equiview_domain::repositories::results::ResultQuery;
use equiview_domain::services::stream::ReconnectPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    File,
    Http,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub charts: Option<ChartsConfig>,
    pub stream: Option<StreamConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Result file, or a directory of `<run_id>.json` files.
    pub path: Option<String>,
    pub api_url: Option<String>,
    pub run_id: Option<String>,
    pub timeout_ms: Option<u64>,
    /// Extra attempts after a transport error or 5xx response.
    pub retries: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub out_dir: String,
    pub csv: Option<bool>,
    pub pretty: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ChartsConfig {
    pub symbols: Option<Vec<String>>,
    pub distribution: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct StreamConfig {
    pub max_retries: Option<u32>,
    pub base_delay_ms: Option<u64>,
    pub backoff_factor: Option<f64>,
}

impl SourceConfig {
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)
    }

    pub fn retries(&self) -> u32 {
        self.retries.unwrap_or(0)
    }

    pub fn query(&self) -> ResultQuery {
        match self.run_id.as_deref().map(str::trim) {
            Some(run_id) if !run_id.is_empty() => ResultQuery::Run(run_id.to_string()),
            _ => ResultQuery::Latest,
        }
    }
}

impl OutputConfig {
    pub fn csv_enabled(&self) -> bool {
        self.csv.unwrap_or(true)
    }

    pub fn pretty_enabled(&self) -> bool {
        self.pretty.unwrap_or(true)
    }
}

impl StreamConfig {
    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        let defaults = ReconnectPolicy::default();
        ReconnectPolicy {
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            base_delay: self
                .base_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.base_delay),
            factor: self.backoff_factor.unwrap_or(defaults.factor),
        }
    }
}

impl Config {
    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        self.stream
            .as_ref()
            .map(StreamConfig::reconnect_policy)
            .unwrap_or_default()
    }
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    let (config, _source) = load_config_with_source(path)?;
    Ok(config)
}

pub fn load_config_with_source(path: &Path) -> Result<(Config, String), String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    let config = toml::from_str(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))?;
    Ok((config, contents))
}

pub fn to_toml_pretty(config: &Config) -> Result<String, String> {
    toml::to_string_pretty(config)
        .map_err(|err| format!("failed to serialize config as TOML: {err}"))
}

/// Every problem found in `config`; empty when it is usable as-is.
pub fn validate_config(config: &Config) -> Vec<String> {
    let mut problems = Vec::new();
    let source = &config.source;

    match source.kind {
        SourceKind::File => {
            if source.path.as_deref().map_or(true, |p| p.trim().is_empty()) {
                problems.push("source.path is required when source.kind = \"file\"".to_string());
            }
        }
        SourceKind::Http => match source.api_url.as_deref().map(str::trim) {
            None | Some("") => {
                problems.push("source.api_url is required when source.kind = \"http\"".to_string())
            }
            Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                problems.push(format!(
                    "source.api_url must start with http:// or https:// (got {url})"
                ))
            }
            Some(_) => {}
        },
    }
    if source.timeout_ms == Some(0) {
        problems.push("source.timeout_ms must be > 0".to_string());
    }
    if let Some(run_id) = source.run_id.as_deref() {
        if run_id.trim().is_empty() {
            problems.push("source.run_id must not be blank".to_string());
        }
    }

    if config.output.out_dir.trim().is_empty() {
        problems.push("output.out_dir must not be empty".to_string());
    }

    if let Some(symbols) = config.charts.as_ref().and_then(|c| c.symbols.as_ref()) {
        let mut seen = HashSet::new();
        for symbol in symbols {
            if symbol.trim().is_empty() {
                problems.push("charts.symbols must not contain blank entries".to_string());
            } else if !seen.insert(symbol.as_str()) {
                problems.push(format!("charts.symbols lists {symbol} more than once"));
            }
        }
    }

    if let Some(stream) = &config.stream {
        if stream.base_delay_ms == Some(0) {
            problems.push("stream.base_delay_ms must be > 0".to_string());
        }
        if let Some(factor) = stream.backoff_factor {
            if !factor.is_finite() || factor < 1.0 {
                problems.push(format!("stream.backoff_factor must be >= 1.0 (got {factor})"));
            }
        }
    }

    problems
}
