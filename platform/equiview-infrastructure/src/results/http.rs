use super::record_load_metrics;
use equiview_domain::repositories::results::{BacktestResultSource, ResultQuery};
use equiview_domain::value_objects::backtest_result::BacktestResult;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::{Duration, Instant};

const API_PREFIX: &str = "/api/backtests";

/// Fetches results from the backtest backend's REST API.
pub struct HttpResultSource {
    pub base_url: String,
    pub timeout_ms: u64,
    pub retries: u32,
    client: Client,
}

impl HttpResultSource {
    pub fn new(base_url: String, timeout_ms: u64, retries: u32) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|err| format!("failed to build http client: {err}"))?;
        Ok(Self {
            base_url,
            timeout_ms,
            retries,
            client,
        })
    }

    pub fn endpoint(&self, query: &ResultQuery) -> String {
        let base = self.base_url.trim_end_matches('/');
        match query {
            ResultQuery::Latest => format!("{base}{API_PREFIX}/latest"),
            ResultQuery::Run(run_id) => format!("{base}{API_PREFIX}/{}", encode_segment(run_id)),
        }
    }

    fn fetch(&self, endpoint: &str) -> Result<BacktestResult, String> {
        let mut attempts = 0u32;
        let mut last_error = String::new();

        while attempts <= self.retries {
            attempts += 1;
            if attempts > 1 {
                metrics::counter!("equiview.infra.results.http.retries_total").increment(1);
                tracing::debug!(attempt = attempts, "retrying backtest api request");
            }

            let attempt_start = Instant::now();
            match self.client.get(endpoint).send() {
                Ok(resp) => {
                    let status = resp.status();
                    metrics::histogram!(
                        "equiview.infra.results.http.attempt_ms",
                        "status" => status.as_u16().to_string()
                    )
                    .record(attempt_start.elapsed().as_millis() as f64);

                    if status == StatusCode::OK {
                        return resp
                            .json::<BacktestResult>()
                            .map_err(|err| format!("failed to decode backtest api response: {err}"));
                    }

                    last_error = match resp.text().ok().as_deref().and_then(error_detail) {
                        Some(detail) => format!(
                            "backtest api http error: status {} ({detail})",
                            status.as_u16()
                        ),
                        None => format!("backtest api http error: status {}", status.as_u16()),
                    };
                    if status.is_server_error() && attempts <= self.retries {
                        continue;
                    }
                    break;
                }
                Err(err) => {
                    metrics::histogram!(
                        "equiview.infra.results.http.attempt_ms",
                        "status" => "err"
                    )
                    .record(attempt_start.elapsed().as_millis() as f64);
                    last_error = format!("backtest api request failed: {err}");
                }
            }
        }

        tracing::warn!(attempts, error = %last_error, "backtest api request failed");
        Err(last_error)
    }
}

// error bodies look like {"detail": "..."}
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}

fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

impl BacktestResultSource for HttpResultSource {
    fn load_result(&self, query: &ResultQuery) -> Result<BacktestResult, String> {
        let endpoint = self.endpoint(query);
        let _span = tracing::info_span!(
            "infra.results.http",
            base_url = %self.base_url,
            endpoint = %endpoint,
            timeout_ms = self.timeout_ms,
            retries = self.retries
        )
        .entered();
        let start = Instant::now();
        let result = self.fetch(&endpoint);
        record_load_metrics("http", start, &result);
        result
    }
}
