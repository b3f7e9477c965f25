use equiview_domain::repositories::results::{BacktestResultSource, ResultQuery};
use equiview_domain::services::comparison::{compare_runs, RunComparison};
use serde::Serialize;
use std::time::Instant;
use tracing::info_span;

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonFailure {
    pub query: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareResultsOutput {
    pub runs: Vec<RunComparison>,
    pub failures: Vec<ComparisonFailure>,
}

/// Loads every queried run and compares the ones that loaded. A run that
/// fails to load is reported in `failures` rather than aborting the others.
pub fn compare_results(
    queries: &[ResultQuery],
    source: &dyn BacktestResultSource,
) -> Result<CompareResultsOutput, String> {
    if queries.is_empty() {
        return Err("compare requires at least one run".to_string());
    }
    let _span = info_span!("compare_results", runs = queries.len()).entered();

    let stage_start = Instant::now();
    let mut loaded = Vec::with_capacity(queries.len());
    let mut failures = Vec::new();
    for query in queries {
        match source.load_result(query) {
            Ok(result) => loaded.push(result),
            Err(err) => {
                tracing::warn!(query = %query, error = %err, "failed to load run for comparison");
                metrics::counter!("equiview.compare.load_errors_total").increment(1);
                failures.push(ComparisonFailure {
                    query: query.to_string(),
                    error: err,
                });
            }
        }
    }
    metrics::histogram!("equiview.compare.load_ms")
        .record(stage_start.elapsed().as_millis() as f64);

    if loaded.is_empty() {
        let details: Vec<String> = failures
            .iter()
            .map(|f| format!("{}: {}", f.query, f.error))
            .collect();
        return Err(format!("no run could be loaded ({})", details.join("; ")));
    }

    let runs = compare_runs(&loaded);
    metrics::gauge!("equiview.compare.runs").set(runs.len() as f64);
    Ok(CompareResultsOutput { runs, failures })
}
