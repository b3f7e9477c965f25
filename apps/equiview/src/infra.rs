use equiview_application::config::{Config, SourceKind};
use equiview_domain::repositories::artifacts::ChartArtifactWriter;
use equiview_domain::repositories::results::BacktestResultSource;
use equiview_infrastructure::artifacts::FilesystemChartWriter;
use equiview_infrastructure::results::{FilesystemResultSource, HttpResultSource};

pub struct ReportDeps {
    pub source: Box<dyn BacktestResultSource>,
    pub writer: Box<dyn ChartArtifactWriter>,
}

pub fn build_report_deps(config: &Config) -> Result<ReportDeps, String> {
    Ok(ReportDeps {
        source: build_result_source(config)?,
        writer: Box::new(FilesystemChartWriter::with_pretty(
            config.output.pretty_enabled(),
        )),
    })
}

fn build_result_source(config: &Config) -> Result<Box<dyn BacktestResultSource>, String> {
    match config.source.kind {
        SourceKind::File => {
            let path = config
                .source
                .path
                .as_deref()
                .filter(|p| !p.trim().is_empty())
                .ok_or_else(|| "source.path is required for file sources".to_string())?;
            Ok(Box::new(FilesystemResultSource::new(path)))
        }
        SourceKind::Http => {
            let api_url = config
                .source
                .api_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .ok_or_else(|| "source.api_url is required for http sources".to_string())?
                .to_string();
            let source = HttpResultSource::new(
                api_url.clone(),
                config.source.timeout_ms(),
                config.source.retries(),
            )
            .map_err(|err| format!("failed to init backtest api client (url={api_url}): {err}"))?;
            Ok(Box::new(source))
        }
    }
}
