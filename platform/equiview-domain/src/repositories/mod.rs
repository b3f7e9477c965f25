pub mod artifacts;
pub mod results;
