//! Command implementations for the bayes-sift CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};
use serde::Deserialize;

use crate::classifier::{AutosavePolicy, AutosaveTask, Classifier};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ClassifierConfig;
use crate::error::Result;

/// One line of a bulk training file.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingRecord {
    pub document: String,
    pub category: String,
    #[serde(default)]
    pub delimited: bool,
}

/// Execute a CLI command.
pub fn execute_command(args: BayesSiftArgs) -> Result<()> {
    let config = ClassifierConfig::from_file(&args.config)?;
    // Every command but reset exports, so an unreadable snapshot must stop it
    // before it is overwritten.
    let classifier = match args.command {
        Command::Reset => Classifier::from_config(&config)?,
        _ => Classifier::open(&config)?,
    };

    match &args.command {
        Command::Train(train_args) => train(&classifier, train_args, false, &args),
        Command::TrainDelimited(train_args) => train(&classifier, train_args, true, &args),
        Command::TrainFile(file_args) => train_file(classifier, &config, file_args, &args),
        Command::Score(score_args) => score(&classifier, score_args, &args),
        Command::Categorize(categorize_args) => categorize(&classifier, categorize_args, &args),
        Command::Categories => list_categories(&classifier, &args),
        Command::Stats => show_stats(&classifier, &args),
        Command::Export => export(&classifier, "Model exported", &args),
        Command::Reset => {
            classifier.reset();
            export(&classifier, "Model reset", &args)
        }
    }
}

/// Train on one document and persist the result.
fn train(
    classifier: &Classifier,
    train_args: &TrainArgs,
    delimited: bool,
    cli_args: &BayesSiftArgs,
) -> Result<()> {
    if delimited {
        classifier.train_delimited(&train_args.text, &train_args.category)?;
    } else {
        classifier.train(&train_args.text, &train_args.category)?;
    }
    classifier.export()?;

    output_result(
        "Document trained",
        &TrainResult {
            category: train_args.category.trim().to_string(),
            delimited,
            documents_in_category: classifier.categories().count(train_args.category.trim()),
        },
        cli_args,
    )
}

/// Train on every record of a JSON lines file, autosaving when configured.
fn train_file(
    classifier: Classifier,
    config: &ClassifierConfig,
    file_args: &TrainFileArgs,
    cli_args: &BayesSiftArgs,
) -> Result<()> {
    let classifier = Arc::new(classifier);
    let mut autosave = AutosavePolicy::from_settings(&config.storage)
        .map(|policy| AutosaveTask::start(Arc::clone(&classifier), policy))
        .transpose()?;

    let start_time = Instant::now();
    let (trained, skipped) = ingest(&classifier, &file_args.file, file_args.progress_every)?;
    let duration = start_time.elapsed();

    let autosave_stats = match autosave.as_mut() {
        Some(task) => {
            task.stop()?;
            Some(task.stats())
        }
        None => None,
    };
    classifier.export()?;

    let seconds = duration.as_secs_f64();
    output_result(
        "Training file ingested",
        &TrainFileResult {
            documents_trained: trained,
            lines_skipped: skipped,
            duration_ms: duration.as_millis() as u64,
            docs_per_second: if seconds > 0.0 {
                trained as f64 / seconds
            } else {
                0.0
            },
            autosave: autosave_stats,
        },
        cli_args,
    )
}

/// Returns the number of trained records and of skipped lines.
fn ingest(classifier: &Classifier, path: &Path, progress_every: usize) -> Result<(usize, usize)> {
    let reader = BufReader::new(File::open(path)?);
    let mut trained = 0;
    let mut skipped = 0;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record = match serde_json::from_str::<TrainingRecord>(&line) {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping line {}: {e}", line_num + 1);
                skipped += 1;
                continue;
            }
        };

        if record.delimited {
            classifier.train_delimited(&record.document, &record.category)?;
        } else {
            classifier.train(&record.document, &record.category)?;
        }
        trained += 1;

        if progress_every > 0 && trained % progress_every == 0 {
            info!("Trained {trained} documents...");
        }
    }

    Ok((trained, skipped))
}

fn score(classifier: &Classifier, score_args: &ScoreArgs, cli_args: &BayesSiftArgs) -> Result<()> {
    let scores = classifier.score_word(&score_args.word, score_args.category.as_deref());
    output_result(
        "Word scores",
        &WordScores {
            word: score_args.word.clone(),
            scores,
        },
        cli_args,
    )
}

fn categorize(
    classifier: &Classifier,
    categorize_args: &CategorizeArgs,
    cli_args: &BayesSiftArgs,
) -> Result<()> {
    let scores = classifier.categorize(&categorize_args.text)?;
    output_result(
        "Categories ranked",
        &Categorization {
            log_space: classifier.settings().log_space,
            scores,
        },
        cli_args,
    )
}

fn list_categories(classifier: &Classifier, cli_args: &BayesSiftArgs) -> Result<()> {
    output_result(
        "Trained categories",
        &CategoryList::from(&classifier.categories()),
        cli_args,
    )
}

fn show_stats(classifier: &Classifier, cli_args: &BayesSiftArgs) -> Result<()> {
    let store = classifier.store();
    output_result(
        "Model statistics",
        &StatsReport {
            model: classifier.stats(),
            snapshot: store.describe(),
            snapshot_exists: store.exists(),
        },
        cli_args,
    )
}

fn export(classifier: &Classifier, message: &str, cli_args: &BayesSiftArgs) -> Result<()> {
    classifier.export()?;
    output_result(
        message,
        &ExportResult {
            snapshot: classifier.store().describe(),
            stats: classifier.stats(),
        },
        cli_args,
    )
}
