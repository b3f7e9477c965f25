mod compare;
mod report;
mod validate;

use equiview_application::config::{load_config_with_source, validate_config, Config};
use std::path::{Path, PathBuf};

pub const VALIDATION_FAILED: &str = "config validation failed";

pub enum Command {
    Report {
        config: PathBuf,
        run_id: Option<String>,
        out: Option<PathBuf>,
        symbols: Vec<String>,
    },
    Compare {
        config: PathBuf,
        run_ids: Vec<String>,
        out: Option<PathBuf>,
    },
    Validate {
        config: PathBuf,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Report { .. } => "report",
            Command::Compare { .. } => "compare",
            Command::Validate { .. } => "validate",
        }
    }
}

pub fn run(command: Command) -> Result<serde_json::Value, String> {
    metrics::counter!("equiview.cli.commands_total", "command" => command.name()).increment(1);
    match command {
        Command::Report {
            config,
            run_id,
            out,
            symbols,
        } => report::run_report(&load_valid_config(&config)?, run_id, out, symbols),
        Command::Compare {
            config,
            run_ids,
            out,
        } => compare::run_compare(&load_valid_config(&config)?, &run_ids, out),
        Command::Validate { config } => validate::run_validate(&config),
    }
}

fn load_valid_config(path: &Path) -> Result<Config, String> {
    let (config, _source) = load_config_with_source(path)?;
    let problems = validate_config(&config);
    if !problems.is_empty() {
        return Err(format!(
            "{VALIDATION_FAILED} ({}): {}",
            path.display(),
            problems.join("; ")
        ));
    }
    Ok(config)
}
