use crate::config::Config;
use equiview_domain::entities::chart_report::{ChartReport, SymbolCharts};
use equiview_domain::repositories::artifacts::ChartArtifactWriter;
use equiview_domain::repositories::results::{BacktestResultSource, ResultQuery};
use equiview_domain::services::charts::{
    color_for_series_index, compute_drawdown_series, compute_returns_distribution,
    drawdown_summary, merge_symbol_series, signal_summary,
};
use equiview_domain::value_objects::backtest_result::BacktestResult;
use equiview_domain::value_objects::symbol_result::SymbolResult;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info_span;

pub const REPORT_FILE: &str = "charts.json";
pub const MERGED_FILE: &str = "merged_equity.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Restricts the report to these symbols; `None` keeps every symbol.
    pub symbols: Option<Vec<String>>,
    pub distribution: bool,
    pub csv: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            symbols: None,
            distribution: true,
            csv: true,
        }
    }
}

impl ChartOptions {
    pub fn from_config(config: &Config) -> Self {
        let charts = config.charts.as_ref();
        Self {
            symbols: charts
                .and_then(|c| c.symbols.clone())
                .filter(|symbols| !symbols.is_empty()),
            distribution: charts.and_then(|c| c.distribution).unwrap_or(true),
            csv: config.output.csv_enabled(),
        }
    }

    fn includes(&self, symbol: &str) -> bool {
        match &self.symbols {
            Some(wanted) => wanted.iter().any(|s| s == symbol),
            None => true,
        }
    }
}

pub struct GenerateChartReportResult {
    pub run_id: String,
    pub run_dir: PathBuf,
    pub report: ChartReport,
    pub artifacts: Vec<PathBuf>,
}

/// Builds every chart dataset of `result`. Colors follow the displayed order,
/// so filtering symbols out shifts the remaining colors.
pub fn build_chart_report(result: &BacktestResult, options: &ChartOptions) -> ChartReport {
    if let Some(wanted) = &options.symbols {
        for symbol in wanted {
            if result.symbol(symbol).is_none() {
                tracing::warn!(symbol = %symbol, run_id = %result.run_id, "requested symbol not in result");
            }
        }
    }

    let displayed: Vec<SymbolResult> = result
        .symbols
        .iter()
        .filter(|s| options.includes(&s.symbol))
        .cloned()
        .collect();

    let symbols = displayed
        .iter()
        .enumerate()
        .map(|(idx, symbol)| {
            let drawdown = compute_drawdown_series(symbol.curve());
            let distribution = if options.distribution {
                compute_returns_distribution(symbol.signals())
            } else {
                Vec::new()
            };
            SymbolCharts {
                symbol: symbol.symbol.clone(),
                color: color_for_series_index(idx),
                drawdown_summary: drawdown_summary(&drawdown),
                drawdown,
                distribution,
                signal_summary: signal_summary(symbol.signals()),
            }
        })
        .collect();

    ChartReport {
        run_id: result.run_id.clone(),
        strategy: result.strategy.clone(),
        timeframe: result.timeframe.clone(),
        period: format!("{} ~ {}", result.start_date, result.end_date),
        symbols,
        merged: merge_symbol_series(&displayed),
    }
}

pub fn generate_chart_report(
    query: &ResultQuery,
    source: &dyn BacktestResultSource,
    writer: &dyn ChartArtifactWriter,
    out_dir: &Path,
    options: &ChartOptions,
) -> Result<GenerateChartReportResult, String> {
    let _span = info_span!("generate_chart_report", query = %query, out_dir = %out_dir.display())
        .entered();

    let stage_start = Instant::now();
    let result = source.load_result(query)?;
    metrics::histogram!("equiview.report.load_ms").record(stage_start.elapsed().as_millis() as f64);

    let stage_start = Instant::now();
    let report = build_chart_report(&result, options);
    metrics::histogram!("equiview.report.build_ms")
        .record(stage_start.elapsed().as_millis() as f64);
    metrics::gauge!("equiview.report.symbols").set(report.symbols.len() as f64);
    metrics::gauge!("equiview.report.merged_points").set(report.merged.len() as f64);
    metrics::counter!("equiview.report.signals_total").increment(result.total_signals);

    let run_dir = out_dir.join(path_component(&result.run_id));
    writer.ensure_dir(&run_dir)?;
    let mut artifacts = Vec::new();

    let report_path = run_dir.join(REPORT_FILE);
    writer.write_report_json(&report_path, &report)?;
    artifacts.push(report_path);

    let mut columns = report.symbol_names();
    let mut seen = HashSet::new();
    columns.retain(|symbol| seen.insert(*symbol));
    let merged_path = run_dir.join(MERGED_FILE);
    writer.write_merged_csv(&merged_path, &columns, &report.merged)?;
    artifacts.push(merged_path);

    if options.csv {
        let stems = artifact_stems(&report.symbol_names());
        for (charts, stem) in report.symbols.iter().zip(stems) {
            let drawdown_path = run_dir.join(format!("drawdown_{stem}.csv"));
            writer.write_drawdown_csv(&drawdown_path, &charts.drawdown)?;
            artifacts.push(drawdown_path);

            if options.distribution {
                let distribution_path = run_dir.join(format!("distribution_{stem}.csv"));
                writer.write_distribution_csv(&distribution_path, &charts.distribution)?;
                artifacts.push(distribution_path);
            }
        }
    }

    tracing::info!(
        run_id = %result.run_id,
        symbols = report.symbols.len(),
        artifacts = artifacts.len(),
        "chart report generated"
    );

    Ok(GenerateChartReportResult {
        run_id: result.run_id,
        run_dir,
        report,
        artifacts,
    })
}

/// One file stem per displayed symbol. A stem already taken gets the symbol's
/// displayed index appended, so no artifact overwrites another.
fn artifact_stems(symbols: &[&str]) -> Vec<String> {
    let mut taken = HashSet::new();
    symbols
        .iter()
        .enumerate()
        .map(|(idx, symbol)| {
            let base = path_component(symbol);
            let mut stem = base.clone();
            let mut suffix = idx;
            while !taken.insert(stem.clone()) {
                stem = format!("{base}_{suffix}");
                suffix += 1;
            }
            stem
        })
        .collect()
}

/// Maps an identifier to a single safe path component.
pub fn path_component(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "unknown".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::{artifact_stems, build_chart_report, path_component, ChartOptions};
    use equiview_domain::value_objects::backtest_result::BacktestResult;
    use equiview_domain::value_objects::performance_point::PerformancePoint;
    use equiview_domain::value_objects::symbol_result::SymbolResult;

    fn result() -> BacktestResult {
        let mut btc = SymbolResult::new("BTC_KRW");
        btc.performance_curve = Some(vec![PerformancePoint::new("2024-01-01", 1.05)]);
        let mut eth = SymbolResult::new("ETH_KRW");
        eth.performance_curve = Some(vec![PerformancePoint::new("2024-01-02", 0.9)]);
        BacktestResult {
            run_id: "run-1".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-02".to_string(),
            symbols: vec![btc, eth],
            ..BacktestResult::default()
        }
    }

    #[test]
    fn filter_reassigns_colors_by_displayed_index() {
        let options = ChartOptions {
            symbols: Some(vec!["ETH_KRW".to_string()]),
            ..ChartOptions::default()
        };
        let report = build_chart_report(&result(), &options);
        assert_eq!(report.symbol_names(), vec!["ETH_KRW"]);
        assert_eq!(report.symbols[0].color.to_string(), "#2c3e50");
        assert_eq!(report.merged.len(), 1);
        assert!(report.merged[0].contains("ETH_KRW"));
        assert_eq!(report.symbols[0].drawdown_summary.max_drawdown, -10.0);
    }

    #[test]
    fn distribution_can_be_disabled() {
        let options = ChartOptions {
            distribution: false,
            ..ChartOptions::default()
        };
        let report = build_chart_report(&result(), &options);
        assert_eq!(report.symbols.len(), 2);
        assert_eq!(report.period, "2024-01-01 ~ 2024-01-02");
        assert!(report.symbols.iter().all(|s| s.distribution.is_empty()));
    }

    #[test]
    fn colliding_stems_get_index_suffix() {
        assert_eq!(
            artifact_stems(&["BTC/KRW", "BTC_KRW", "ETH_KRW", "BTC_KRW"]),
            vec!["BTC_KRW", "BTC_KRW_1", "ETH_KRW", "BTC_KRW_3"]
        );
        assert_eq!(
            artifact_stems(&["A_1", "A", "A"]),
            vec!["A_1", "A", "A_2"]
        );
    }

    #[test]
    fn path_component_strips_separators() {
        assert_eq!(path_component("run-1"), "run-1");
        assert_eq!(path_component("../evil/run"), ".._evil_run");
        assert_eq!(path_component(".."), "unknown");
        assert_eq!(path_component("  "), "unknown");
        assert_eq!(path_component("BTC/KRW"), "BTC_KRW");
    }
}
