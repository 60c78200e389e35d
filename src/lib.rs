//! Clustering evaluation against known sample phenotypes.
//!
//! This library measures how well a clustering assignment aligns with known
//! per-sample phenotype traits. It joins a phenotype table with a cluster
//! mapping, classifies each trait as continuous or categorical, applies the
//! matching hypothesis test per trait (one-way ANOVA for continuous traits,
//! chi-square test of independence for categorical traits), and reports one
//! summary table of test statistics and p-values.
//!
//! # Overview
//!
//! The pipeline is split into small, focused modules:
//!
//! - **data**: Core data structures (PhenotypeTable, ClusterMap, CombinedTable)
//! - **align**: Sample alignment between the phenotype table and the mapping
//! - **classify**: Continuous/categorical trait classification
//! - **test**: Hypothesis tests (one-way ANOVA, chi-square independence)
//! - **report**: Summary assembly and timestamped TSV output
//! - **config**: Run parameters (YAML)
//!
//! # Example
//!
//! ```no_run
//! use clustering_eval::prelude::*;
//!
//! // Load data
//! let phenotype = PhenotypeTable::from_tsv("phenotype.tsv").unwrap();
//! let clusters = ClusterMap::from_tsv("clusters.tsv").unwrap();
//!
//! // Evaluate every trait against the clustering
//! let summary = evaluate(&phenotype, &clusters, 10.0).unwrap();
//! summary.to_tsv("clustering_evaluation_result.tsv").unwrap();
//! ```

pub mod align;
pub mod classify;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod test;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::align::align;
    pub use crate::classify::{classify, ClassifiedTrait, GroupRow, TraitGroup};
    pub use crate::config::RunParameters;
    pub use crate::data::{ClusterMap, CombinedTable, PhenotypeTable, Variable, VariableType};
    pub use crate::error::{EvalError, Result};
    pub use crate::report::{
        create_timestamped_filename, evaluate, run_evaluation, run_test, SummaryEntry,
        SummaryTable, RESULT_BASE_NAME,
    };
    pub use crate::test::{chisquare, f_oneway, TestResult};
}
