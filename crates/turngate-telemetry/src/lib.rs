pub mod decision_metrics;

pub use decision_metrics::*;
