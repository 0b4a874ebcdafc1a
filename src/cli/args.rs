//! Command line argument parsing for the bayes-sift CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// bayes-sift - A naive Bayes text classifier
#[derive(Parser, Debug, Clone)]
#[command(name = "bayes-sift")]
#[command(about = "Train and query a naive Bayes text classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct BayesSiftArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Classifier configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "BAYES_SIFT_CONFIG")]
    pub config: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl BayesSiftArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train on one document
    Train(TrainArgs),

    /// Train on one delimiter-separated list of terms
    #[command(name = "train-delimited")]
    TrainDelimited(TrainArgs),

    /// Train on every record of a JSON lines file
    #[command(name = "train-file")]
    TrainFile(TrainFileArgs),

    /// Show the probability of a word per category
    Score(ScoreArgs),

    /// Rank the categories of a document
    Categorize(CategorizeArgs),

    /// List the trained categories and their document counts
    Categories,

    /// Show model statistics
    Stats,

    /// Write the model snapshot
    Export,

    /// Discard everything learned and write an empty snapshot
    Reset,
}

/// Arguments for training on one document
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Category the document belongs to
    #[arg(short = 'C', long)]
    pub category: String,

    /// Document text
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for bulk training
#[derive(Parser, Debug, Clone)]
pub struct TrainFileArgs {
    /// JSON lines file with `document`, `category` and optional `delimited` fields
    #[arg(value_name = "JSONL_FILE")]
    pub file: PathBuf,

    /// Report progress every N records
    #[arg(long, default_value = "1000")]
    pub progress_every: usize,
}

/// Arguments for word scoring
#[derive(Parser, Debug, Clone)]
pub struct ScoreArgs {
    /// Word to score
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Restrict the result to one category
    #[arg(short = 'C', long)]
    pub category: Option<String>,
}

/// Arguments for categorization
#[derive(Parser, Debug, Clone)]
pub struct CategorizeArgs {
    /// Document text
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> BayesSiftArgs {
        BayesSiftArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_train_args() {
        let args = parse(&[
            "bayes-sift",
            "--config",
            "classifier.json",
            "train",
            "--category",
            "spam",
            "buy cheap pills",
        ]);

        assert_eq!(args.config, PathBuf::from("classifier.json"));
        match args.command {
            Command::Train(train) => {
                assert_eq!(train.category, "spam");
                assert_eq!(train.text, "buy cheap pills");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_score_with_optional_category() {
        let args = parse(&["bayes-sift", "-c", "c.json", "score", "cheap"]);
        assert!(matches!(args.command, Command::Score(ScoreArgs { category: None, .. })));

        let args = parse(&["bayes-sift", "-c", "c.json", "score", "cheap", "-C", "spam"]);
        match args.command {
            Command::Score(score) => assert_eq!(score.category.as_deref(), Some("spam")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_output_format() {
        let args = parse(&["bayes-sift", "-c", "c.json", "-f", "json", "--pretty", "stats"]);
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&["bayes-sift", "-c", "c", "stats"]).verbosity(), 1);
        assert_eq!(parse(&["bayes-sift", "-c", "c", "-vvv", "stats"]).verbosity(), 3);
        assert_eq!(parse(&["bayes-sift", "-c", "c", "-q", "-vv", "stats"]).verbosity(), 0);
    }

    #[test]
    fn test_train_file_defaults() {
        let args = parse(&["bayes-sift", "-c", "c", "train-file", "data.jsonl"]);
        match args.command {
            Command::TrainFile(file) => {
                assert_eq!(file.file, PathBuf::from("data.jsonl"));
                assert_eq!(file.progress_every, 1000);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
