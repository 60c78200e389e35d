//! Sample phenotype table loading.

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A phenotype attribute value that can be categorical, continuous, or missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Variable {
    /// Categorical value with a free-text label.
    Categorical(String),
    /// Continuous numeric value.
    Continuous(f64),
    /// Missing value.
    Missing,
}

impl Variable {
    /// Check if this is a missing value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Variable::Missing)
    }

    /// Try to get as categorical string.
    pub fn as_categorical(&self) -> Option<&str> {
        match self {
            Variable::Categorical(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as continuous f64.
    pub fn as_continuous(&self) -> Option<f64> {
        match self {
            Variable::Continuous(v) => Some(*v),
            _ => None,
        }
    }

    /// Lower-cased string form used for distinct-value comparison.
    ///
    /// Numeric values acquire their string form too, so that distinct
    /// counting operates uniformly on normalized strings.
    pub fn normalized(&self) -> Option<String> {
        match self {
            Variable::Categorical(s) => Some(s.to_lowercase()),
            Variable::Continuous(v) => Some(v.to_string()),
            Variable::Missing => None,
        }
    }
}

/// Inferred type of a phenotype column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableType {
    Categorical,
    Continuous,
}

/// Tokens treated as a missing cell value.
pub(crate) fn is_missing_token(raw: &str) -> bool {
    raw.is_empty() || raw == "NA" || raw == "na"
}

/// Per-sample phenotype attributes, keyed by sample identifier.
#[derive(Debug, Clone)]
pub struct PhenotypeTable {
    /// Sample IDs in file order.
    sample_ids: Vec<String>,
    /// Attribute column names in file order.
    column_names: Vec<String>,
    /// Data stored as sample_id -> column_name -> Variable.
    data: HashMap<String, HashMap<String, Variable>>,
    /// Inferred type for each column.
    column_types: HashMap<String, VariableType>,
}

impl PhenotypeTable {
    /// Load a phenotype table from a TSV file.
    ///
    /// Expected format:
    /// - First row: header with column names (first column is sample ID)
    /// - Subsequent rows: sample ID followed by attribute values
    ///
    /// A column is inferred as continuous if all non-missing values parse as
    /// numbers, otherwise categorical. Missing cells are the empty string,
    /// `NA`, or `na`.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        // Parse header
        let header_line = lines
            .next()
            .ok_or_else(|| EvalError::EmptyData("Empty phenotype file".to_string()))??;
        let header: Vec<&str> = header_line.split('\t').collect();
        if header.is_empty() || header[0].is_empty() {
            return Err(EvalError::Schema(
                "Phenotype table header must start with a sample identifier column".to_string(),
            ));
        }
        let column_names: Vec<String> = header[1..].iter().map(|s| s.to_string()).collect();

        // First pass: collect all values to infer types
        let mut raw_data: Vec<(String, Vec<String>)> = Vec::new();
        for line_result in lines {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.is_empty() {
                continue;
            }
            let sample_id = fields[0].to_string();
            if sample_id.is_empty() {
                return Err(EvalError::Schema(
                    "Phenotype table row has an empty sample identifier".to_string(),
                ));
            }
            let values: Vec<String> = fields[1..].iter().map(|s| s.to_string()).collect();
            raw_data.push((sample_id, values));
        }

        if raw_data.is_empty() {
            return Err(EvalError::EmptyData(
                "No samples in phenotype table".to_string(),
            ));
        }

        // Infer column types
        let mut column_types = HashMap::new();
        for (col_idx, col_name) in column_names.iter().enumerate() {
            let all_numeric = raw_data.iter().all(|(_, values)| {
                if col_idx >= values.len() {
                    return true; // missing, skip
                }
                let v = values[col_idx].trim();
                is_missing_token(v) || v.parse::<f64>().is_ok()
            });
            let var_type = if all_numeric {
                VariableType::Continuous
            } else {
                VariableType::Categorical
            };
            column_types.insert(col_name.clone(), var_type);
        }

        // Build the table
        let mut sample_ids = Vec::new();
        let mut data = HashMap::new();

        for (sample_id, values) in raw_data {
            let mut sample_data = HashMap::new();

            for (col_idx, col_name) in column_names.iter().enumerate() {
                let var = if col_idx >= values.len() {
                    Variable::Missing
                } else {
                    let raw = values[col_idx].trim();
                    if is_missing_token(raw) {
                        Variable::Missing
                    } else {
                        match column_types.get(col_name) {
                            Some(VariableType::Continuous) => match raw.parse::<f64>() {
                                // Tokens parsing to non-finite floats count as missing.
                                Ok(v) if v.is_finite() => Variable::Continuous(v),
                                _ => Variable::Missing,
                            },
                            Some(VariableType::Categorical) | None => {
                                Variable::Categorical(raw.to_string())
                            }
                        }
                    }
                };
                sample_data.insert(col_name.clone(), var);
            }

            if data.insert(sample_id.clone(), sample_data).is_some() {
                return Err(EvalError::Schema(format!(
                    "Phenotype table has duplicate sample identifier '{}'",
                    sample_id
                )));
            }
            sample_ids.push(sample_id);
        }

        Ok(Self {
            sample_ids,
            column_names,
            data,
            column_types,
        })
    }

    /// Sample IDs in order.
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Attribute column names in order.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Number of samples.
    pub fn n_samples(&self) -> usize {
        self.sample_ids.len()
    }

    /// Number of attribute columns.
    pub fn n_columns(&self) -> usize {
        self.column_names.len()
    }

    /// Get an attribute value for a specific sample and column.
    pub fn get(&self, sample_id: &str, column: &str) -> Option<&Variable> {
        self.data.get(sample_id).and_then(|m| m.get(column))
    }

    /// Get the inferred type of a column.
    pub fn column_type(&self, column: &str) -> Option<VariableType> {
        self.column_types.get(column).copied()
    }

    /// Check if a sample exists.
    pub fn has_sample(&self, sample_id: &str) -> bool {
        self.data.contains_key(sample_id)
    }

    /// Check if a column exists.
    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }
}
