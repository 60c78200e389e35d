//! Attribute classification into continuous and categorical trait groups.

use crate::data::{CombinedTable, VariableType};
use crate::error::{EvalError, Result};
use std::collections::HashSet;

/// One cleaned (cluster, attribute value) observation.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRow {
    /// Lower-cased cluster label.
    pub cluster: String,
    /// Lower-cased string form of the attribute value.
    pub label: String,
    /// Numeric value, present when the source column was numeric.
    pub numeric: Option<f64>,
}

/// Cleaned two-column (cluster, attribute) view for one attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitGroup {
    /// Original attribute column name.
    pub name: String,
    /// Rows surviving missing-value removal.
    pub rows: Vec<GroupRow>,
}

impl TraitGroup {
    /// Number of observations after cleaning.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the cleaned group has no observations.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct attribute values after cleaning, counted on the
    /// normalized string form.
    pub fn distinct_values(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.label.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// An attribute group tagged with the statistical test it should receive.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedTrait {
    /// Numeric trait with many distinct values; evaluated via one-way ANOVA.
    Continuous(TraitGroup),
    /// Trait with few distinct values; evaluated via chi-square independence.
    Categorical(TraitGroup),
}

impl ClassifiedTrait {
    /// The cleaned group regardless of classification.
    pub fn group(&self) -> &TraitGroup {
        match self {
            ClassifiedTrait::Continuous(g) | ClassifiedTrait::Categorical(g) => g,
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, ClassifiedTrait::Continuous(_))
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self, ClassifiedTrait::Categorical(_))
    }
}

/// Classify every attribute column of the combined table, in column order.
///
/// Per attribute: rows missing either the cluster label or the value are
/// dropped, both columns are lower-cased, and distinct values are counted on
/// the normalized form. Columns whose distinct count exceeds the threshold
/// are continuous when numeric; free-text columns over the threshold carry
/// too many levels to test and are dropped entirely. Everything else is
/// categorical.
///
/// An all-missing column yields an empty group; it is still classified and
/// forwarded, and the test adapters report it with NaN sentinels.
pub fn classify(combined: &CombinedTable, threshold: f64) -> Result<Vec<ClassifiedTrait>> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(EvalError::InvalidParameter(format!(
            "uniqueness threshold must be a non-negative finite number, got {}",
            threshold
        )));
    }

    let mut classified = Vec::new();
    for name in combined.attribute_names() {
        let mut rows = Vec::new();
        for (idx, sample_id) in combined.sample_ids().iter().enumerate() {
            let Some(cluster) = combined.cluster(idx) else {
                continue;
            };
            let Some(value) = combined.value(sample_id, name) else {
                continue;
            };
            let Some(label) = value.normalized() else {
                continue;
            };
            rows.push(GroupRow {
                cluster: cluster.to_lowercase(),
                label,
                numeric: value.as_continuous(),
            });
        }

        let group = TraitGroup {
            name: name.clone(),
            rows,
        };
        let distinct = group.distinct_values() as f64;
        let is_text = combined.column_type(name) == Some(VariableType::Categorical);

        if is_text && distinct > threshold {
            continue;
        }
        if distinct > threshold {
            classified.push(ClassifiedTrait::Continuous(group));
        } else {
            classified.push(ClassifiedTrait::Categorical(group));
        }
    }
    Ok(classified)
}
