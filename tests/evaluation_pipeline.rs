//! Integration tests for the clustering evaluation pipeline.

use approx::assert_relative_eq;
use clustering_eval::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

/// Write a phenotype TSV and load it.
fn phenotype_table(header: &str, rows: &[&str]) -> (PhenotypeTable, NamedTempFile) {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", header).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    let table = PhenotypeTable::from_tsv(file.path()).unwrap();
    (table, file)
}

/// Write a cluster mapping TSV and load it.
fn cluster_map(rows: &[(&str, &str)]) -> (ClusterMap, NamedTempFile) {
    let mut file = NamedTempFile::new().unwrap();
    for (sid, label) in rows {
        writeln!(file, "{}\t{}", sid, label).unwrap();
    }
    file.flush().unwrap();
    let map = ClusterMap::from_tsv(file.path()).unwrap();
    (map, file)
}

/// The single result file written into a results directory.
fn result_file(dir: &Path) -> PathBuf {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "expected exactly one result file");
    entries.pop().unwrap()
}

#[test]
fn test_summary_shape_and_order() {
    // gender: 2 levels, categorical
    // age: 4 distinct numeric values, continuous at threshold 3
    // note: 4 distinct free-text values, dropped at threshold 3
    // severity: 2 distinct numeric values, categorical
    let (phenotype, _pf) = phenotype_table(
        "sample_id\tgender\tage\tnote\tseverity",
        &[
            "S1\tFemale\t25\talpha\t1",
            "S2\tMale\t30\tbeta\t1",
            "S3\tfemale\t35\tgamma\t2",
            "S4\tMale\t40\tdelta\t2",
        ],
    );
    let (mapping, _cf) = cluster_map(&[("S1", "0"), ("S2", "0"), ("S3", "1"), ("S4", "1")]);

    let summary = evaluate(&phenotype, &mapping, 3.0).unwrap();

    // One column dropped as high-cardinality text.
    assert_eq!(summary.len(), phenotype.n_columns() - 1);
    // Categorical traits first in column order, then continuous.
    assert_eq!(summary.trait_names(), vec!["gender", "severity", "age"]);
    assert_eq!(summary.get("gender").unwrap().measure, "chisquare");
    assert_eq!(summary.get("severity").unwrap().measure, "chisquare");
    assert_eq!(summary.get("age").unwrap().measure, "f_oneway");
}

#[test]
fn test_known_anova_values_through_pipeline() {
    let (phenotype, _pf) = phenotype_table(
        "sample_id\tage",
        &[
            "s1\t6", "s2\t18", "s3\t22", "s4\t6", "s5\t6", "s6\t22", "s7\t18", "s8\t18",
        ],
    );
    let (mapping, _cf) = cluster_map(&[
        ("s1", "0"),
        ("s2", "1"),
        ("s3", "3"),
        ("s4", "2"),
        ("s5", "1"),
        ("s6", "0"),
        ("s7", "1"),
        ("s8", "2"),
    ]);

    let summary = evaluate(&phenotype, &mapping, 2.0).unwrap();
    let result = summary.get("age").unwrap();

    assert_eq!(result.measure, "f_oneway");
    assert_eq!(result.trait_count, 3);
    assert_eq!(result.sample_count, 8);
    assert_relative_eq!(result.statistic, 0.315315, epsilon = 1e-6);
    assert_relative_eq!(result.p_value, 0.814890, epsilon = 1e-6);
}

#[test]
fn test_unmapped_samples_excluded_from_tests() {
    let (phenotype, _pf) = phenotype_table(
        "sample_id\tgender",
        &["S1\tF", "S2\tM", "S3\tF", "S4\tM", "S5\tF"],
    );
    // S5 was never clustered.
    let (mapping, _cf) = cluster_map(&[("S1", "0"), ("S2", "0"), ("S3", "1"), ("S4", "1")]);

    let summary = evaluate(&phenotype, &mapping, 3.0).unwrap();
    assert_eq!(summary.get("gender").unwrap().sample_count, 4);
}

#[test]
fn test_single_cluster_reported_as_na() {
    let (phenotype, _pf) = phenotype_table(
        "sample_id\tage",
        &["S1\t25", "S2\t30", "S3\t35", "S4\t40"],
    );
    let (mapping, _cf) = cluster_map(&[("S1", "0"), ("S2", "0"), ("S3", "0"), ("S4", "0")]);

    let summary = evaluate(&phenotype, &mapping, 3.0).unwrap();
    let result = summary.get("age").unwrap();
    assert_eq!(result.trait_count, 4);
    assert_eq!(result.sample_count, 4);
    assert!(result.statistic.is_nan());
    assert!(result.p_value.is_nan());

    let out = NamedTempFile::new().unwrap();
    summary.to_tsv(out.path()).unwrap();
    let written = std::fs::read_to_string(out.path()).unwrap();
    assert!(written.contains("age\tf_oneway\t4\t4\tNA\tNA"));
}

#[test]
fn test_run_evaluation_writes_timestamped_file() {
    let mut pfile = NamedTempFile::new().unwrap();
    writeln!(pfile, "sample_id\tgender\tage").unwrap();
    writeln!(pfile, "S1\tF\t25").unwrap();
    writeln!(pfile, "S2\tM\t30").unwrap();
    writeln!(pfile, "S3\tF\t35").unwrap();
    writeln!(pfile, "S4\tM\t40").unwrap();
    pfile.flush().unwrap();

    let mut cfile = NamedTempFile::new().unwrap();
    writeln!(cfile, "S1\t0").unwrap();
    writeln!(cfile, "S2\t0").unwrap();
    writeln!(cfile, "S3\t1").unwrap();
    writeln!(cfile, "S4\t1").unwrap();
    cfile.flush().unwrap();

    let results = TempDir::new().unwrap();
    let params = RunParameters {
        phenotype_path: pfile.path().to_path_buf(),
        cluster_mapping_path: cfile.path().to_path_buf(),
        threshold: 3.0,
        results_directory: results.path().to_path_buf(),
    };

    let written_path = run_evaluation(&params).unwrap();
    assert_eq!(written_path, result_file(results.path()));

    let name = written_path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with(RESULT_BASE_NAME));
    assert!(name.ends_with(".tsv"));

    let contents = std::fs::read_to_string(&written_path).unwrap();
    let header = contents.lines().next().unwrap();
    assert_eq!(
        header,
        "\tMeasure\tTrait_length_after_dropna\tSample_number_after_dropna\tchi/fval\tpval"
    );
    assert_eq!(contents.lines().count(), 3);
}

#[test]
fn test_pipeline_is_idempotent() {
    let mut pfile = NamedTempFile::new().unwrap();
    writeln!(pfile, "sample_id\tgender\tage\tseverity").unwrap();
    writeln!(pfile, "S1\tF\t25\t1").unwrap();
    writeln!(pfile, "S2\tM\t30\t2").unwrap();
    writeln!(pfile, "S3\tF\t35\t1").unwrap();
    writeln!(pfile, "S4\tM\t40\t2").unwrap();
    writeln!(pfile, "S5\tF\t28\t1").unwrap();
    writeln!(pfile, "S6\tM\t33\t2").unwrap();
    pfile.flush().unwrap();

    let mut cfile = NamedTempFile::new().unwrap();
    for (sid, label) in [
        ("S1", "0"),
        ("S2", "0"),
        ("S3", "1"),
        ("S4", "1"),
        ("S5", "2"),
        ("S6", "2"),
    ] {
        writeln!(cfile, "{}\t{}", sid, label).unwrap();
    }
    cfile.flush().unwrap();

    let run = |dir: &Path| {
        let params = RunParameters {
            phenotype_path: pfile.path().to_path_buf(),
            cluster_mapping_path: cfile.path().to_path_buf(),
            threshold: 3.0,
            results_directory: dir.to_path_buf(),
        };
        let path = run_evaluation(&params).unwrap();
        std::fs::read_to_string(path).unwrap()
    };

    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    // Only the filename timestamp may differ between runs.
    assert_eq!(run(dir_a.path()), run(dir_b.path()));
}
