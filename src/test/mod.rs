//! Statistical hypothesis testing for clustering evaluation.


pub use anova::f_oneway;
pub use chisquare::chisquare;

use serde::{Deserialize, Serialize};

/// Result of one hypothesis test over a cleaned trait group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// Test that produced this record (`f_oneway` or `chisquare`).
    pub measure: String,
    /// Distinct attribute values after missing-value removal.
    pub trait_count: usize,
    /// Observations after missing-value removal.
    pub sample_count: usize,
    /// Test statistic; NaN when the test is undefined.
    pub statistic: f64,
    /// P-value; NaN when the test is undefined.
    pub p_value: f64,
}

impl TestResult {
    /// Sentinel record for a degenerate group the test cannot evaluate.
    pub(crate) fn undefined(measure: &str, trait_count: usize, sample_count: usize) -> Self {
        Self {
            measure: measure.to_string(),
            trait_count,
            sample_count,
            statistic: f64::NAN,
            p_value: f64::NAN,
        }
    }
}
