use crate::entities::chart_report::ChartReport;
use crate::services::charts::{DrawdownPoint, HistogramBin, MergedPoint};
use crate::services::comparison::RunComparison;
use std::path::Path;

pub trait ChartArtifactWriter {
    fn ensure_dir(&self, path: &Path) -> Result<(), String>;
    fn write_report_json(&self, path: &Path, report: &ChartReport) -> Result<(), String>;
    /// `symbols` fixes the column order; a row without a value leaves its cell
    /// empty.
    fn write_merged_csv(
        &self,
        path: &Path,
        symbols: &[&str],
        rows: &[MergedPoint],
    ) -> Result<(), String>;
    fn write_drawdown_csv(&self, path: &Path, points: &[DrawdownPoint]) -> Result<(), String>;
    fn write_distribution_csv(&self, path: &Path, bins: &[HistogramBin]) -> Result<(), String>;
    fn write_comparison_json(&self, path: &Path, rows: &[RunComparison]) -> Result<(), String>;
}
