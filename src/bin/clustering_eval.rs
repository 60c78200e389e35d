//! clustering-eval - Clustering evaluation CLI
//!
//! Command-line interface for evaluating a clustering assignment against
//! known sample phenotypes.

use clap::{Parser, Subcommand};
use clustering_eval::config::RunParameters;
use clustering_eval::data::{ClusterMap, PhenotypeTable};
use clustering_eval::error::{EvalError, Result};
use clustering_eval::report::{create_timestamped_filename, evaluate, RESULT_BASE_NAME};
use std::path::PathBuf;

/// Clustering evaluation against sample phenotypes
#[derive(Parser)]
#[command(name = "clustering-eval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an evaluation from a YAML configuration and/or explicit flags
    Run {
        /// Path to run-parameters YAML
        #[arg(short = 'C', long)]
        config: Option<PathBuf>,

        /// Path to phenotype table TSV
        #[arg(short, long)]
        phenotype: Option<PathBuf>,

        /// Path to cluster mapping TSV
        #[arg(short, long)]
        clusters: Option<PathBuf>,

        /// Uniqueness threshold separating categorical from continuous traits
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Directory receiving the timestamped result file
        #[arg(short, long)]
        results_dir: Option<PathBuf>,
    },

    /// Generate an example run-parameters configuration
    Example {
        /// Output path for the example YAML
        #[arg(short, long, default_value = "run_parameters.yml")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            phenotype,
            clusters,
            threshold,
            results_dir,
        } => cmd_run(config.as_deref(), phenotype, clusters, threshold, results_dir),

        Commands::Example { output } => cmd_example(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Run the evaluation pipeline
fn cmd_run(
    config_path: Option<&std::path::Path>,
    phenotype: Option<PathBuf>,
    clusters: Option<PathBuf>,
    threshold: Option<f64>,
    results_dir: Option<PathBuf>,
) -> Result<()> {
    let params = match config_path {
        Some(path) => {
            eprintln!("Loading run parameters from {:?}...", path);
            let yaml = std::fs::read_to_string(path)?;
            let mut params = RunParameters::from_yaml(&yaml)?;
            if let Some(v) = phenotype {
                params.phenotype_path = v;
            }
            if let Some(v) = clusters {
                params.cluster_mapping_path = v;
            }
            if let Some(v) = threshold {
                params.threshold = v;
            }
            if let Some(v) = results_dir {
                params.results_directory = v;
            }
            params
        }
        None => {
            let (Some(phenotype_path), Some(cluster_mapping_path), Some(threshold), Some(results_directory)) =
                (phenotype, clusters, threshold, results_dir)
            else {
                return Err(EvalError::InvalidParameter(
                    "without --config, all of --phenotype, --clusters, --threshold and --results-dir are required"
                        .to_string(),
                ));
            };
            RunParameters {
                phenotype_path,
                cluster_mapping_path,
                threshold,
                results_directory,
            }
        }
    };
    params.validate()?;

    eprintln!("Loading data...");
    let phenotype = PhenotypeTable::from_tsv(&params.phenotype_path)?;
    let mapping = ClusterMap::from_tsv(&params.cluster_mapping_path)?;

    eprintln!(
        "Loaded {} samples x {} phenotype traits ({} samples clustered)",
        phenotype.n_samples(),
        phenotype.n_columns(),
        mapping.n_samples()
    );

    eprintln!(
        "Evaluating with uniqueness threshold {}...",
        params.threshold
    );
    let summary = evaluate(&phenotype, &mapping, params.threshold)?;

    let file_name = create_timestamped_filename(RESULT_BASE_NAME, "tsv");
    let output_path = params.results_directory.join(file_name);
    eprintln!("Writing results to {:?}...", output_path);
    summary.to_tsv(&output_path)?;

    eprintln!("Done! {} traits tested", summary.len());
    Ok(())
}

/// Generate example run parameters
fn cmd_example(output_path: &PathBuf) -> Result<()> {
    let params = RunParameters::example();
    let yaml = params.to_yaml()?;

    std::fs::write(output_path, &yaml)?;
    eprintln!("Wrote example run parameters to {:?}", output_path);
    eprintln!();
    eprintln!("Contents:");
    println!("{}", yaml);

    Ok(())
}
