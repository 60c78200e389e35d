//! Cluster assignment loading.

use crate::data::phenotype::is_missing_token;
use crate::error::{EvalError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Mapping from sample identifier to an opaque cluster label.
///
/// Cluster identifiers are produced by an external clustering algorithm and
/// treated as discrete labels throughout; no numeric meaning is assumed.
#[derive(Debug, Clone)]
pub struct ClusterMap {
    /// Sample IDs in file order.
    sample_ids: Vec<String>,
    /// Cluster label for each sample.
    labels: HashMap<String, String>,
}

impl ClusterMap {
    /// Load a cluster mapping from a TSV file.
    ///
    /// Expected format: no header, one row per sample, exactly two columns
    /// (sample ID, cluster label). Rows with a missing label are skipped,
    /// which leaves those samples unclustered.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut sample_ids = Vec::new();
        let mut labels = HashMap::new();

        for (line_no, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 2 {
                return Err(EvalError::Schema(format!(
                    "Cluster mapping row {} must have exactly two columns, got {}",
                    line_no + 1,
                    fields.len()
                )));
            }
            let sample_id = fields[0].trim();
            if sample_id.is_empty() {
                return Err(EvalError::Schema(format!(
                    "Cluster mapping row {} has an empty sample identifier",
                    line_no + 1
                )));
            }
            let label = fields[1].trim();
            if is_missing_token(label) {
                continue;
            }
            if labels
                .insert(sample_id.to_string(), label.to_string())
                .is_some()
            {
                return Err(EvalError::Schema(format!(
                    "Cluster mapping has duplicate sample identifier '{}'",
                    sample_id
                )));
            }
            sample_ids.push(sample_id.to_string());
        }

        if sample_ids.is_empty() {
            return Err(EvalError::EmptyData(
                "No samples in cluster mapping".to_string(),
            ));
        }

        Ok(Self { sample_ids, labels })
    }

    /// Sample IDs in order.
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Number of clustered samples.
    pub fn n_samples(&self) -> usize {
        self.sample_ids.len()
    }

    /// Get the cluster label for a sample.
    pub fn get(&self, sample_id: &str) -> Option<&str> {
        self.labels.get(sample_id).map(String::as_str)
    }

    /// Check if a sample has a cluster assignment.
    pub fn has_sample(&self, sample_id: &str) -> bool {
        self.labels.contains_key(sample_id)
    }
}
