use crate::infra::build_report_deps;
use equiview_application::comparison::compare_results;
use equiview_application::config::Config;
use equiview_application::meta::engine_name;
use equiview_domain::repositories::results::ResultQuery;
use equiview_domain::services::formatters::{format_number, format_percent, value_class};
use std::path::PathBuf;

const COMPARISON_FILE: &str = "comparison.json";

fn parse_query(raw: &str) -> ResultQuery {
    if raw.eq_ignore_ascii_case("latest") {
        ResultQuery::Latest
    } else {
        ResultQuery::Run(raw.to_string())
    }
}

pub fn run_compare(
    config: &Config,
    run_ids: &[String],
    out: Option<PathBuf>,
) -> Result<serde_json::Value, String> {
    let queries: Vec<ResultQuery> = run_ids.iter().map(|raw| parse_query(raw)).collect();
    let deps = build_report_deps(config)?;
    let output = compare_results(&queries, deps.source.as_ref())?;

    let written = match out {
        Some(dir) => {
            deps.writer.ensure_dir(&dir)?;
            let path = dir.join(COMPARISON_FILE);
            deps.writer.write_comparison_json(&path, &output.runs)?;
            Some(path.display().to_string())
        }
        None => None,
    };

    let runs: Vec<serde_json::Value> = output
        .runs
        .iter()
        .map(|run| {
            serde_json::json!({
                "label": run.label,
                "run_id": run.run_id,
                "strategy": run.strategy,
                "period": run.period,
                "total_signals": format_number(Some(run.total_signals as f64)),
                "symbols": run.symbol_count,
                "avg_return": format_percent(Some(run.avg_return), 2),
                "avg_return_class": value_class(Some(run.avg_return)),
                "avg_win_rate": format_percent(Some(run.avg_win_rate), 2),
                "avg_max_drawdown": format_percent(Some(run.avg_max_drawdown), 2),
                "execution_time": run.execution_time,
            })
        })
        .collect();

    Ok(serde_json::json!({
        "engine": engine_name(),
        "mode": "compare",
        "status": if output.failures.is_empty() { "ok" } else { "partial" },
        "runs": runs,
        "failures": output.failures,
        "written": written,
    }))
}
