//! Command line argument parsing for the Grievance CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Grievance - complaint classification and sentiment analysis
#[derive(Parser, Debug, Clone)]
#[command(name = "grievance")]
#[command(about = "Complaint classification and sentiment analysis engine")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct GrievanceArgs {
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

    /// Directory holding the model artifacts (in-memory when omitted)
    #[arg(long, value_name = "DIR", env = "GRIEVANCE_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Engine configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl GrievanceArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Predict category and priority of a complaint
    Classify(TextArgs),

    /// Analyze sentiment, emotions and urgency of a text
    Analyze(TextArgs),

    /// Retrain the models from a JSON file of labeled examples
    Retrain(RetrainArgs),

    /// Summarize the sentiment of a file with one text per line
    Summarize(SummarizeArgs),

    /// Extract keywords and the urgency score of a text
    Keywords(TextArgs),

    /// Show text statistics and validation results
    Stats(TextArgs),
}

/// Arguments for commands taking a single text
#[derive(Parser, Debug, Clone)]
pub struct TextArgs {
    /// Text to process; several words are joined with spaces
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl TextArgs {
    /// The text as one string.
    pub fn joined(&self) -> String {
        self.text.join(" ")
    }
}

/// Arguments for retraining
#[derive(Parser, Debug, Clone)]
pub struct RetrainArgs {
    /// JSON array of {"text", "category", "priority"} objects
    #[arg(value_name = "EXAMPLES_FILE")]
    pub examples_file: PathBuf,
}

/// Arguments for batch sentiment summaries
#[derive(Parser, Debug, Clone)]
pub struct SummarizeArgs {
    /// Text file, one complaint per line; blank lines are skipped
    #[arg(value_name = "TEXT_FILE")]
    pub text_file: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
