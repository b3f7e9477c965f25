use crate::infra::build_report_deps;
use equiview_application::charting::{generate_chart_report, ChartOptions};
use equiview_application::config::Config;
use equiview_application::meta::engine_name;
use equiview_domain::repositories::results::ResultQuery;
use std::path::PathBuf;

pub fn run_report(
    config: &Config,
    run_id: Option<String>,
    out: Option<PathBuf>,
    symbols: Vec<String>,
) -> Result<serde_json::Value, String> {
    let query = match run_id {
        Some(run_id) => ResultQuery::Run(run_id),
        None => config.source.query(),
    };
    let out_dir = out.unwrap_or_else(|| PathBuf::from(&config.output.out_dir));

    let mut options = ChartOptions::from_config(config);
    if !symbols.is_empty() {
        options.symbols = Some(symbols);
    }

    let deps = build_report_deps(config)?;
    let result = generate_chart_report(
        &query,
        deps.source.as_ref(),
        deps.writer.as_ref(),
        &out_dir,
        &options,
    )?;

    let symbols: Vec<serde_json::Value> = result
        .report
        .symbols
        .iter()
        .map(|s| {
            serde_json::json!({
                "symbol": s.symbol,
                "color": s.color,
                "max_drawdown": s.drawdown_summary.max_drawdown,
                "current_drawdown": s.drawdown_summary.current_drawdown,
                "trades": s.signal_summary.total_trades,
                "win_rate": s.signal_summary.win_rate,
            })
        })
        .collect();

    Ok(serde_json::json!({
        "engine": engine_name(),
        "mode": "report",
        "status": "ok",
        "run_id": result.run_id,
        "run_dir": result.run_dir.display().to_string(),
        "symbols": symbols,
        "merged_points": result.report.merged.len(),
        "artifacts": result
            .artifacts
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
    }))
}
