use equiview_application::config::{load_config_with_source, to_toml_pretty, validate_config};
use equiview_application::meta::{engine_name, engine_version};
use equiview_domain::services::stream::ConnectionLifecycle;
use std::path::Path;

pub fn run_validate(config_path: &Path) -> Result<serde_json::Value, String> {
    let (config, _source) = load_config_with_source(config_path)?;
    let problems = validate_config(&config);
    for problem in &problems {
        tracing::warn!(problem = %problem, "config problem");
    }
    if !problems.is_empty() {
        return Err(format!(
            "{} ({}): {}",
            super::VALIDATION_FAILED,
            config_path.display(),
            problems.join("; ")
        ));
    }

    let lifecycle = match &config.stream {
        Some(_) => ConnectionLifecycle::new(config.reconnect_policy()),
        None => ConnectionLifecycle::disabled(),
    };
    let policy = lifecycle.policy();
    let delays_ms: Vec<u64> = (0..policy.max_retries)
        .filter_map(|retry| policy.delay_for(retry))
        .map(|delay| u64::try_from(delay.as_millis()).unwrap_or(u64::MAX))
        .collect();

    Ok(serde_json::json!({
        "engine": engine_name(),
        "version": engine_version(),
        "mode": "validate",
        "status": "ok",
        "config": config_path.display().to_string(),
        "source": config.source.kind,
        "query": config.source.query().to_string(),
        "out_dir": config.output.out_dir,
        "stream": {
            "status": lifecycle.status(),
            "max_retries": policy.max_retries,
            "reconnect_delays_ms": delays_ms,
        },
        "normalized": to_toml_pretty(&config)?,
    }))
}
