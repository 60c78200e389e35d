//! Data structures for clustering evaluation.

mod clusters;
mod combined;
mod phenotype;

pub use clusters::ClusterMap;
pub use combined::CombinedTable;
pub use phenotype::{PhenotypeTable, Variable, VariableType};
