pub mod charts;
pub mod comparison;
pub mod formatters;
pub mod stream;
