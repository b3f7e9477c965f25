use crate::services::charts::{
    DrawdownPoint, DrawdownSummary, HistogramBin, MergedPoint, SeriesColor, SignalSummary,
};
use serde::Serialize;

/// Chart datasets for one symbol of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolCharts {
    pub symbol: String,
    pub color: SeriesColor,
    pub drawdown: Vec<DrawdownPoint>,
    pub drawdown_summary: DrawdownSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub distribution: Vec<HistogramBin>,
    pub signal_summary: SignalSummary,
}

/// Everything the dashboard needs to render one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartReport {
    pub run_id: String,
    pub strategy: String,
    pub timeframe: String,
    pub period: String,
    pub symbols: Vec<SymbolCharts>,
    pub merged: Vec<MergedPoint>,
}

impl ChartReport {
    pub fn symbol(&self, symbol: &str) -> Option<&SymbolCharts> {
        self.symbols.iter().find(|s| s.symbol == symbol)
    }

    pub fn symbol_names(&self) -> Vec<&str> {
        self.symbols.iter().map(|s| s.symbol.as_str()).collect()
    }
}
