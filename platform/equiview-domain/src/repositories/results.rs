use crate::value_objects::backtest_result::BacktestResult;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultQuery {
    Latest,
    Run(String),
}

impl fmt::Display for ResultQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultQuery::Latest => f.write_str("latest"),
            ResultQuery::Run(run_id) => write!(f, "run {run_id}"),
        }
    }
}

pub trait BacktestResultSource {
    fn load_result(&self, query: &ResultQuery) -> Result<BacktestResult, String>;
}
