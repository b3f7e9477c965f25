mod commands;
mod infra;
mod obs;

use clap::{Parser, Subcommand};
use commands::Command;
use obs::LogFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "equiview")]
#[command(about = "Chart datasets from backtest results.", version, arg_required_else_help = true)]
#[command(
    after_help = "Examples:\n  equiview report --config configs/sample.toml\n  equiview report --config configs/sample.toml --run-id <run_id> --symbol BTC_KRW\n  equiview compare --config configs/sample.toml --run-id <a> --run-id <b>\n  equiview validate --config configs/sample.toml\n"
)]
struct Cli {
    /// Log filter used when EQUIVIEW_LOG is unset or empty.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Serve Prometheus metrics on host:port.
    #[arg(long, global = true)]
    metrics_addr: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Build chart datasets for one run and write them under the output dir.
    Report {
        /// Config file path (TOML). If omitted, uses env EQUIVIEW_CONFIG.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Run to chart; defaults to source.run_id, then the latest run.
        #[arg(long)]
        run_id: Option<String>,
        /// Overrides output.out_dir.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Restrict charts to these symbols (repeatable).
        #[arg(long = "symbol")]
        symbols: Vec<String>,
    },
    /// Compare several runs side by side.
    Compare {
        #[arg(long)]
        config: Option<PathBuf>,
        /// Runs to compare (repeatable); `latest` selects the newest run.
        #[arg(long = "run-id", required = true)]
        run_ids: Vec<String>,
        /// Also write comparison.json into this directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Check a config file without loading any results.
    Validate {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn resolve_config_path(config: Option<PathBuf>) -> PathBuf {
    config
        .or_else(|| {
            std::env::var("EQUIVIEW_CONFIG")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| {
            eprintln!("error: missing --config and env EQUIVIEW_CONFIG is not set");
            std::process::exit(1);
        })
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = obs::init_tracing(&cli.log_level, cli.log_format) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
    if let Err(err) = obs::init_metrics(cli.metrics_addr.as_deref()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let command = match cli.command {
        CliCommand::Report {
            config,
            run_id,
            out,
            symbols,
        } => Command::Report {
            config: resolve_config_path(config),
            run_id,
            out,
            symbols,
        },
        CliCommand::Compare {
            config,
            run_ids,
            out,
        } => Command::Compare {
            config: resolve_config_path(config),
            run_ids,
            out,
        },
        CliCommand::Validate { config } => Command::Validate {
            config: resolve_config_path(config),
        },
    };

    match commands::run(command) {
        Ok(json) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json)
                    .unwrap_or_else(|_| "{\"status\":\"error\",\"error\":\"json\"}".to_string())
            );
        }
        Err(err) => {
            let code = if err.contains(commands::VALIDATION_FAILED) {
                2
            } else {
                1
            };
            eprintln!("error: {err}");
            std::process::exit(code);
        }
    }
}
