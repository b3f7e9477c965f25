use crate::reporting;
use equiview_domain::entities::chart_report::ChartReport;
use equiview_domain::repositories::artifacts::ChartArtifactWriter;
use equiview_domain::services::charts::{DrawdownPoint, HistogramBin, MergedPoint};
use equiview_domain::services::comparison::RunComparison;
use std::fs;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct FilesystemChartWriter {
    pretty: bool,
}

impl Default for FilesystemChartWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FilesystemChartWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(pretty: bool) -> Self {
        Self { pretty }
    }
}

fn record_write_metrics(kind: &'static str, start: Instant, result: &Result<(), String>) {
    let result_label = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!(
        "equiview.infra.artifacts.write.calls_total",
        "kind" => kind,
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!(
        "equiview.infra.artifacts.write_ms",
        "kind" => kind,
        "result" => result_label
    )
    .record(start.elapsed().as_millis() as f64);
    if let Err(err) = result {
        tracing::warn!(kind, error = %err, "artifact write failed");
    }
}

impl ChartArtifactWriter for FilesystemChartWriter {
    fn ensure_dir(&self, path: &Path) -> Result<(), String> {
        let start = Instant::now();
        let result = fs::create_dir_all(path)
            .map_err(|err| format!("failed to create dir {}: {}", path.display(), err));
        record_write_metrics("ensure_dir", start, &result);
        result
    }

    fn write_report_json(&self, path: &Path, report: &ChartReport) -> Result<(), String> {
        let start = Instant::now();
        let result = reporting::write_json(path, report, self.pretty);
        record_write_metrics("report_json", start, &result);
        result
    }

    fn write_merged_csv(
        &self,
        path: &Path,
        symbols: &[&str],
        rows: &[MergedPoint],
    ) -> Result<(), String> {
        let start = Instant::now();
        let result = reporting::write_merged_csv(path, symbols, rows);
        record_write_metrics("merged_csv", start, &result);
        result
    }

    fn write_drawdown_csv(&self, path: &Path, points: &[DrawdownPoint]) -> Result<(), String> {
        let start = Instant::now();
        let result = reporting::write_drawdown_csv(path, points);
        record_write_metrics("drawdown_csv", start, &result);
        result
    }

    fn write_distribution_csv(&self, path: &Path, bins: &[HistogramBin]) -> Result<(), String> {
        let start = Instant::now();
        let result = reporting::write_distribution_csv(path, bins);
        record_write_metrics("distribution_csv", start, &result);
        result
    }

    fn write_comparison_json(&self, path: &Path, rows: &[RunComparison]) -> Result<(), String> {
        let start = Instant::now();
        let result = reporting::write_json(path, rows, self.pretty);
        record_write_metrics("comparison_json", start, &result);
        result
    }
}
