//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::classifier::{AutosaveStats, ScoreItem};
use crate::cli::args::{BayesSiftArgs, OutputFormat};
use crate::error::Result;
use crate::model::{CategoryTable, ModelStats};

/// Result structure for a single training call.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResult {
    pub category: String,
    pub delimited: bool,
    pub documents_in_category: f64,
}

/// Result structure for bulk training.
#[derive(Debug, Serialize)]
pub struct TrainFileResult {
    pub documents_trained: usize,
    pub lines_skipped: usize,
    pub duration_ms: u64,
    pub docs_per_second: f64,
    pub autosave: Option<AutosaveStats>,
}

/// Result structure for word scoring.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordScores {
    pub word: String,
    pub scores: Vec<ScoreItem>,
}

/// Result structure for categorization.
#[derive(Debug, Serialize, Deserialize)]
pub struct Categorization {
    pub log_space: bool,
    pub scores: Vec<ScoreItem>,
}

/// One entry of the category listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub documents: f64,
}

/// Result structure for the category listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<CategoryEntry>,
}

impl From<&CategoryTable> for CategoryList {
    fn from(table: &CategoryTable) -> Self {
        CategoryList {
            categories: table
                .names()
                .into_iter()
                .map(|name| CategoryEntry {
                    name: name.to_string(),
                    documents: table.count(name),
                })
                .collect(),
        }
    }
}

/// Model statistics with the snapshot location.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub model: ModelStats,
    pub snapshot: String,
    pub snapshot_exists: bool,
}

/// Result structure for export and reset.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportResult {
    pub snapshot: String,
    pub stats: ModelStats,
}

/// Types with a dedicated human-readable rendering.
pub trait HumanOutput: Serialize {
    /// Print the value for a person to read.
    fn print_human(&self) -> Result<()> {
        output_generic_human(&serde_json::to_value(self)?);
        Ok(())
    }
}

impl HumanOutput for TrainResult {}
impl HumanOutput for TrainFileResult {}
impl HumanOutput for StatsReport {}
impl HumanOutput for ExportResult {}

impl HumanOutput for WordScores {
    fn print_human(&self) -> Result<()> {
        if self.scores.is_empty() {
            println!("'{}' has not been trained", self.word);
            return Ok(());
        }
        print_scores(&self.scores, false);
        Ok(())
    }
}

impl HumanOutput for Categorization {
    fn print_human(&self) -> Result<()> {
        if self.scores.is_empty() {
            println!("No training data");
            return Ok(());
        }
        print_scores(&self.scores, self.log_space);
        Ok(())
    }
}

impl HumanOutput for CategoryList {
    fn print_human(&self) -> Result<()> {
        if self.categories.is_empty() {
            println!("No categories");
            return Ok(());
        }
        let width = self
            .categories
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0);
        for entry in &self.categories {
            println!("{:<width$}  {}", entry.name, entry.documents);
        }
        Ok(())
    }
}

fn print_scores(scores: &[ScoreItem], log_space: bool) {
    let width = scores
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0);
    for (rank, item) in scores.iter().enumerate() {
        if log_space {
            println!("{:>2}. {:<width$}  {:.6}", rank + 1, item.label, item.probability);
        } else {
            println!("{:>2}. {:<width$}  {:.6e}", rank + 1, item.label, item.probability);
        }
    }
}

/// Output a result in the specified format.
pub fn output_result<T: HumanOutput>(message: &str, result: &T, args: &BayesSiftArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human()
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &BayesSiftArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn output_generic_human(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                println!("{key}: {}", format_value(val));
            }
        }
        _ => println!("{}", format_value(value)),
    }
}

fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(obj) => obj
            .iter()
            .map(|(k, v)| format!("{k}={}", format_value(v)))
            .collect::<Vec<_>>()
            .join(", "),
        serde_json::Value::Array(items) => items
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
