//! Summary assembly and TSV reporting.

use crate::align::align;
use crate::classify::{classify, ClassifiedTrait};
use crate::config::RunParameters;
use crate::data::{ClusterMap, PhenotypeTable};
use crate::error::Result;
use crate::test::{chisquare, f_oneway, TestResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Measure labels of the summary, in output column order.
const SUMMARY_COLUMNS: [&str; 5] = [
    "Measure",
    "Trait_length_after_dropna",
    "Sample_number_after_dropna",
    "chi/fval",
    "pval",
];

/// Base tag of the generated result filename.
pub const RESULT_BASE_NAME: &str = "clustering_evaluation_result";

/// Test result for one attribute, keyed by the attribute's column name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub trait_name: String,
    pub result: TestResult,
}

/// Ordered collection of per-attribute test results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryTable {
    pub entries: Vec<SummaryEntry>,
}

impl SummaryTable {
    /// Number of attributes tested.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the result for a specific attribute.
    pub fn get(&self, trait_name: &str) -> Option<&TestResult> {
        self.entries
            .iter()
            .find(|e| e.trait_name == trait_name)
            .map(|e| &e.result)
    }

    /// Attribute names in emission order.
    pub fn trait_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.trait_name.as_str()).collect()
    }

    /// Write the summary as a tab-separated table, one row per attribute.
    ///
    /// The header carries the five measure labels; undefined statistics and
    /// p-values are rendered as a literal `NA`.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "\t{}", SUMMARY_COLUMNS.join("\t"))?;
        for entry in &self.entries {
            let r = &entry.result;
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}",
                entry.trait_name,
                r.measure,
                r.trait_count,
                r.sample_count,
                format_value(r.statistic),
                format_value(r.p_value)
            )?;
        }

        Ok(())
    }
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NA".to_string()
    } else {
        v.to_string()
    }
}

/// Run the statistical test appropriate for a classified trait.
pub fn run_test(classified: &ClassifiedTrait) -> Result<TestResult> {
    match classified {
        ClassifiedTrait::Continuous(group) => f_oneway(group),
        ClassifiedTrait::Categorical(group) => chisquare(group),
    }
}

/// Evaluate every phenotype attribute against the clustering.
///
/// Aligns the two tables, classifies each attribute, and runs the matching
/// hypothesis test. Categorical attributes are reported first, then
/// continuous ones, each in original column order. Any single test failure
/// aborts the whole evaluation; no partial summary is produced.
pub fn evaluate(
    phenotype: &PhenotypeTable,
    mapping: &ClusterMap,
    threshold: f64,
) -> Result<SummaryTable> {
    let combined = align(phenotype, mapping)?;
    let classified = classify(&combined, threshold)?;

    let mut entries = Vec::with_capacity(classified.len());
    for class in classified.iter().filter(|c| c.is_categorical()) {
        entries.push(SummaryEntry {
            trait_name: class.group().name.clone(),
            result: run_test(class)?,
        });
    }
    for class in classified.iter().filter(|c| c.is_continuous()) {
        entries.push(SummaryEntry {
            trait_name: class.group().name.clone(),
            result: run_test(class)?,
        });
    }

    Ok(SummaryTable { entries })
}

/// Build a result filename carrying a generation timestamp.
pub fn create_timestamped_filename(name_base: &str, extension: &str) -> String {
    let stamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{}_{}.{}", name_base, stamp, extension)
}

/// Load both inputs, evaluate, and write the timestamped summary TSV.
///
/// Returns the path of the written file.
pub fn run_evaluation(params: &RunParameters) -> Result<PathBuf> {
    params.validate()?;

    let phenotype = PhenotypeTable::from_tsv(&params.phenotype_path)?;
    let mapping = ClusterMap::from_tsv(&params.cluster_mapping_path)?;
    let summary = evaluate(&phenotype, &mapping, params.threshold)?;

    let file_name = create_timestamped_filename(RESULT_BASE_NAME, "tsv");
    let path = params.results_directory.join(file_name);
    summary.to_tsv(&path)?;
    Ok(path)
}
