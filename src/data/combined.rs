//! Phenotype table with the cluster assignment joined in.

use crate::data::{PhenotypeTable, Variable, VariableType};

/// Join product of a phenotype table and a cluster mapping.
///
/// Conceptually the phenotype table with a `Cluster_ID` column prepended:
/// one row per phenotype sample, with the cluster label present only for
/// samples found in the mapping.
#[derive(Debug, Clone)]
pub struct CombinedTable {
    phenotype: PhenotypeTable,
    /// Cluster label per sample, parallel to `phenotype.sample_ids()`.
    clusters: Vec<Option<String>>,
}

impl CombinedTable {
    pub(crate) fn new(phenotype: PhenotypeTable, clusters: Vec<Option<String>>) -> Self {
        debug_assert_eq!(phenotype.n_samples(), clusters.len());
        Self {
            phenotype,
            clusters,
        }
    }

    /// Number of rows; always equals the phenotype table's row count.
    pub fn n_samples(&self) -> usize {
        self.phenotype.n_samples()
    }

    /// Sample IDs in order.
    pub fn sample_ids(&self) -> &[String] {
        self.phenotype.sample_ids()
    }

    /// Attribute column names (the cluster column excluded).
    pub fn attribute_names(&self) -> &[String] {
        self.phenotype.column_names()
    }

    /// Cluster label for the sample at a row index.
    pub fn cluster(&self, idx: usize) -> Option<&str> {
        self.clusters.get(idx).and_then(|c| c.as_deref())
    }

    /// Cluster label for a sample by identifier.
    pub fn cluster_for(&self, sample_id: &str) -> Option<&str> {
        self.phenotype
            .sample_ids()
            .iter()
            .position(|sid| sid == sample_id)
            .and_then(|idx| self.cluster(idx))
    }

    /// Get an attribute value for a specific sample and column.
    pub fn value(&self, sample_id: &str, column: &str) -> Option<&Variable> {
        self.phenotype.get(sample_id, column)
    }

    /// Inferred type of an attribute column.
    pub fn column_type(&self, column: &str) -> Option<VariableType> {
        self.phenotype.column_type(column)
    }
}
