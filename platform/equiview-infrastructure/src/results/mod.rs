pub mod filesystem;
pub mod http;

pub use filesystem::FilesystemResultSource;
pub use http::HttpResultSource;

use std::time::Instant;

fn record_load_metrics<T>(source: &'static str, start: Instant, result: &Result<T, String>) {
    let result_label = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!(
        "equiview.infra.results.load.calls_total",
        "source" => source,
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!(
        "equiview.infra.results.load_ms",
        "source" => source,
        "result" => result_label
    )
    .record(start.elapsed().as_millis() as f64);
}
