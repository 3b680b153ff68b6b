use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use debias::analysis;
use debias::config::{self, Config};
use debias::debias::batch::neutralize_batch;
use debias::debias::{equalize, BiasAxis, DebiasPlan, EqualizeOptions, ScalePolicy};
use debias::output::terminal;
use debias::pipeline;
use debias::similarity::cosine_similarity;
use debias::vectors::VectorTable;

/// Debias: measure and reduce bias in pre-trained word embeddings.
///
/// Builds a bias axis from a defining word pair, then neutralizes words that
/// should carry no bias and equalizes pairs that should differ only along it.
#[derive(Parser)]
#[command(name = "debias", version, about)]
struct Cli {
    /// Vector file to load (overrides DEBIAS_VECTORS)
    #[arg(long, global = true)]
    vectors: Option<PathBuf>,

    /// Bias axis as positive,negative, e.g. woman,man (overrides DEBIAS_AXIS)
    #[arg(long, global = true)]
    axis: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show table size, dimensionality, and the configured axis
    Info,

    /// Cosine similarity between two words
    Similarity { first: String, second: String },

    /// Cosine similarity between the relations b - a and d - c
    Relation {
        a: String,
        b: String,
        c: String,
        d: String,
    },

    /// Complete the analogy a : b :: c : ?
    Analogy {
        a: String,
        b: String,
        c: String,

        /// Number of candidates to show (default: 5)
        #[arg(long, default_value = "5")]
        top: usize,
    },

    /// Similarity of each word with the bias axis
    AxisReport {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Neutralize words and compare their axis similarity before and after
    Neutralize {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Equalize a word pair and compare before and after
    Equalize {
        first: String,
        second: String,

        /// L2-normalize the pair before equalizing
        #[arg(long)]
        normalize: bool,

        /// Use |1 - x| when the shared component exceeds unit norm
        #[arg(long)]
        reflect_scale: bool,
    },

    /// Apply a debias plan and write the debiased table
    Apply {
        /// JSON plan: {"neutral": [...], "pairs": [[a, b], ...]}
        #[arg(long)]
        plan: PathBuf,

        /// Output vector file (overrides DEBIAS_OUTPUT)
        #[arg(long)]
        output: Option<PathBuf>,

        /// L2-normalize each pair before equalizing
        #[arg(long)]
        normalize: bool,

        /// Use |1 - x| when the shared component exceeds unit norm
        #[arg(long)]
        reflect_scale: bool,

        /// Print a JSON summary instead of the terminal report
        #[arg(long)]
        json: bool,
    },

    /// Write the vectors for the given words to a new file
    Export {
        #[arg(required = true)]
        words: Vec<String>,

        /// Output vector file
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging. Logs go to stderr so stdout carries only
    // command output (`apply --json` must stay parseable).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debias=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(path) = cli.vectors {
        config.vectors_path = path;
    }
    if let Some(spec) = cli.axis.as_deref() {
        let (pos, neg) = config::parse_axis(spec)?;
        config.axis_positive = pos;
        config.axis_negative = neg;
    }

    match cli.command {
        Commands::Info => {
            let table = load_table(&config)?;
            println!("Vectors: {}", config.vectors_path.display());
            println!("Words: {}", table.len());
            println!("Dimensions: {}", table.dim());
            match build_axis(&config, &table) {
                Ok(axis) => println!("Bias axis: {axis}"),
                Err(e) => println!("Bias axis: {} ({e})", "unavailable".yellow()),
            }
        }

        Commands::Similarity { first, second } => {
            let table = load_table(&config)?;
            let sim = cosine_similarity(table.lookup(&first)?, table.lookup(&second)?)?;
            println!("cosine_similarity({first}, {second}) = {sim:.4}");
        }

        Commands::Relation { a, b, c, d } => {
            let table = load_table(&config)?;
            let sim = analysis::relation_similarity(
                &table,
                (a.as_str(), b.as_str()),
                (c.as_str(), d.as_str()),
            )?;
            println!("cosine_similarity({b} - {a}, {d} - {c}) = {sim:.4}");
        }

        Commands::Analogy { a, b, c, top } => {
            let table = load_table(&config)?;
            let candidates = analysis::complete_analogy(&table, &a, &b, &c, top)?;
            terminal::display_analogy(&a, &b, &c, &candidates);
        }

        Commands::AxisReport { words } => {
            let table = load_table(&config)?;
            let axis = build_axis(&config, &table)?;
            let scores = analysis::axis_report(&table, &axis, &words);
            terminal::display_axis_report(&axis, &scores);
        }

        Commands::Neutralize { words } => {
            let table = load_table(&config)?;
            let axis = build_axis(&config, &table)?;

            println!(
                "\n{}",
                format!("=== Neutralized along {} ===", axis.label()).bold()
            );
            for item in neutralize_batch(&table, &words, &axis) {
                let measured = item.result.and_then(|after| {
                    let before = axis.similarity(table.lookup(&item.item)?)?;
                    Ok((before, axis.similarity(&after)?))
                });
                match measured {
                    Ok((before, after)) => {
                        terminal::display_neutralized(&item.item, before, after)
                    }
                    Err(e) => {
                        warn!(word = %item.item, error = %e, "Skipping word");
                        println!(
                            "  {} {:<22} {}",
                            "?".yellow(),
                            item.item,
                            e.to_string().dimmed()
                        );
                    }
                }
            }
        }

        Commands::Equalize {
            first,
            second,
            normalize,
            reflect_scale,
        } => {
            let table = load_table(&config)?;
            let axis = build_axis(&config, &table)?;
            let options = equalize_options(&config, normalize, reflect_scale);

            let before = (
                axis.similarity(table.lookup(&first)?)?,
                axis.similarity(table.lookup(&second)?)?,
            );
            let pair = (first.as_str(), second.as_str());
            let result = equalize(&table, pair, &axis, &options)?;
            let after = (
                axis.similarity(&result.first)?,
                axis.similarity(&result.second)?,
            );
            terminal::display_equalized(&axis, pair, before, after, &result);
        }

        Commands::Apply {
            plan,
            output,
            normalize,
            reflect_scale,
            json,
        } => {
            let table = load_table(&config)?;
            let axis = build_axis(&config, &table)?;
            let options = equalize_options(&config, normalize, reflect_scale);
            let plan = DebiasPlan::load(&plan)
                .with_context(|| format!("Failed to read plan {}", plan.display()))?;
            let output = output.unwrap_or_else(|| config.output_path.clone());

            info!(
                neutral = plan.neutral.len(),
                pairs = plan.pairs.len(),
                axis = axis.label(),
                "Applying debias plan"
            );

            let outcome = pipeline::apply::run(&table, &axis, &plan, &options, !json)?;
            outcome
                .table
                .save(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            if json {
                let summary = outcome.summary(&axis, Some(output.display().to_string()));
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                terminal::display_apply_summary(&outcome);
                println!(
                    "\n{}",
                    format!("Debiased vectors saved to: {}", output.display()).bold()
                );
            }
        }

        Commands::Export { words, output } => {
            let table = load_table(&config)?;
            let (subset, missing) = table.subset(&words);

            for e in &missing {
                warn!(error = %e, "Word not exported");
                println!("  {} {}", "Skipped:".yellow(), e);
            }

            subset
                .save(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!(
                "Exported {} of {} words to {}",
                subset.len(),
                words.len(),
                output.display()
            );
        }
    }

    Ok(())
}

/// Load the vector table named by the configuration.
fn load_table(config: &Config) -> Result<VectorTable> {
    config.require_vectors()?;
    let table = VectorTable::load_path(&config.vectors_path)
        .with_context(|| format!("Failed to load {}", config.vectors_path.display()))?;
    info!(words = table.len(), dim = table.dim(), "Vector table loaded");
    Ok(table)
}

fn build_axis(config: &Config, table: &VectorTable) -> Result<BiasAxis> {
    BiasAxis::build(table, &config.axis_positive, &config.axis_negative).with_context(|| {
        format!(
            "Failed to build bias axis {} - {}",
            config.axis_positive, config.axis_negative
        )
    })
}

/// Command-line flags can only turn options on; the config supplies the rest.
fn equalize_options(config: &Config, normalize: bool, reflect_scale: bool) -> EqualizeOptions {
    EqualizeOptions {
        scale_policy: if reflect_scale {
            ScalePolicy::Reflect
        } else {
            config.equalize.scale_policy
        },
        normalize: normalize || config.equalize.normalize,
    }
}
