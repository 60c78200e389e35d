//! Sample alignment between the phenotype table and the cluster mapping.

use crate::data::{ClusterMap, CombinedTable, PhenotypeTable};
use crate::error::{EvalError, Result};
use std::collections::HashSet;

/// Merge a phenotype table with a cluster mapping on shared sample IDs.
///
/// The intersection of the two sample-identifier sets is computed
/// order-insensitively; samples present in both inputs receive the mapping's
/// cluster label, all others are left unclustered. The output row count
/// always equals the phenotype table's row count.
pub fn align(phenotype: &PhenotypeTable, mapping: &ClusterMap) -> Result<CombinedTable> {
    check_unique_index(phenotype.sample_ids(), "phenotype table")?;
    check_unique_index(mapping.sample_ids(), "cluster mapping")?;

    let clusters = phenotype
        .sample_ids()
        .iter()
        .map(|sid| mapping.get(sid).map(String::from))
        .collect();

    Ok(CombinedTable::new(phenotype.clone(), clusters))
}

/// A usable sample-identifier index has non-empty, unique entries.
fn check_unique_index(ids: &[String], what: &str) -> Result<()> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if id.is_empty() {
            return Err(EvalError::Schema(format!(
                "{} has an empty sample identifier",
                what
            )));
        }
        if !seen.insert(id.as_str()) {
            return Err(EvalError::Schema(format!(
                "{} has duplicate sample identifier '{}'",
                what, id
            )));
        }
    }
    Ok(())
}
