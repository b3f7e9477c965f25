pub mod backtest_result;
pub mod performance_point;
pub mod side;
pub mod signal;
pub mod symbol_result;

mod nullable;
