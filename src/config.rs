//! Run configuration for the clustering evaluation pipeline.

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters of one evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunParameters {
    /// Phenotype table TSV (header row, sample IDs in the first column).
    pub phenotype_path: PathBuf,
    /// Cluster mapping TSV (no header; sample ID, then cluster label).
    pub cluster_mapping_path: PathBuf,
    /// Uniqueness threshold separating categorical from continuous traits.
    pub threshold: f64,
    /// Directory receiving the timestamped result file.
    pub results_directory: PathBuf,
}

impl RunParameters {
    /// Load from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(EvalError::from)
    }

    /// Save to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(EvalError::from)
    }

    /// Check parameter sanity before running.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(EvalError::InvalidParameter(format!(
                "threshold must be a non-negative finite number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Example parameters for the `example` CLI subcommand.
    pub fn example() -> Self {
        Self {
            phenotype_path: PathBuf::from("phenotype.tsv"),
            cluster_mapping_path: PathBuf::from("clusters.tsv"),
            threshold: 10.0,
            results_directory: PathBuf::from("results"),
        }
    }
}
