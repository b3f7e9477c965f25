use clap::ValueEnum;
use std::net::SocketAddr;

pub const LOG_ENV: &str = "EQUIVIEW_LOG";

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Logs always go to stderr: stdout carries the command's JSON result.
pub fn init_tracing(log_level: &str, format: LogFormat) -> Result<(), String> {
    let directives = std::env::var(LOG_ENV)
        .ok()
        .filter(|raw| !raw.trim().is_empty())
        .unwrap_or_else(|| log_level.to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&directives)
        .map_err(|err| format!("invalid log filter {directives:?}: {err}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.map_err(|err| format!("failed to init tracing: {err}"))
}

#[cfg(feature = "prometheus")]
pub fn init_metrics(metrics_addr: Option<&str>) -> Result<Option<SocketAddr>, String> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let Some(addr) = metrics_addr.map(parse_metrics_addr).transpose()? else {
        return Ok(None);
    };

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .add_global_label("engine", "equiview")
        .install()
        .map_err(|err| format!("failed to start prometheus exporter on {addr}: {err}"))?;

    tracing::info!(metrics_addr = %addr, "serving prometheus metrics");
    Ok(Some(addr))
}

#[cfg(not(feature = "prometheus"))]
pub fn init_metrics(metrics_addr: Option<&str>) -> Result<Option<SocketAddr>, String> {
    match metrics_addr {
        Some(_) => Err("--metrics-addr needs equiview built with feature `prometheus`".to_string()),
        None => Ok(None),
    }
}

#[cfg_attr(not(feature = "prometheus"), allow(dead_code))]
fn parse_metrics_addr(raw: &str) -> Result<SocketAddr, String> {
    raw.trim()
        .parse()
        .map_err(|err| format!("invalid --metrics-addr {raw:?} (expected host:port): {err}"))
}
