pub mod charting;
pub mod comparison;
pub mod config;
pub mod meta;
