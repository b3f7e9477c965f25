pub mod chart_report;
