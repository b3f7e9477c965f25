//! Chart-data transforms over backtest results.
//!
//! Every function here is pure: input is borrowed read-only, output is freshly
//! allocated, and degenerate input (empty, all-identical, NaN) produces a
//! vacuous or degenerate result instead of an error.

pub mod distribution;
pub mod drawdown;
pub mod merge;
pub mod palette;
pub mod rounding;
pub mod stats;

pub use distribution::{compute_returns_distribution, recommended_bin_count, HistogramBin};
pub use drawdown::{compute_drawdown_series, DrawdownPoint, BASELINE_EQUITY};
pub use merge::{merge_symbol_series, MergedPoint};
pub use palette::{color_for_series_index, SeriesColor, SERIES_PALETTE};
pub use stats::{drawdown_summary, signal_summary, DrawdownSummary, SignalSummary};
