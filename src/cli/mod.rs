//! Command-line parsing for the review sentiment pipeline.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the cleaning/scoring code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{CloudOptions, EpochConfig, TableFormat};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "senti", version, about = "Lexicon-based review sentiment + word clouds")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clean + score a review table, print a summary, optionally export/plot.
    Score(ScoreArgs),
    /// Clean a review table (epoch split + category tag) and export it as CSV.
    Clean(CleanArgs),
    /// Render per-(epoch, category) word clouds from a review table.
    Cloud(CloudArgs),
    /// Generate a synthetic raw review CSV for demo runs.
    Sample(SampleArgs),
}

/// Input table location and format.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Review table (CSV, or XLSX with a sheet named "Sheet1").
    pub input: PathBuf,

    /// Input format; `auto` resolves from the file extension.
    #[arg(long, value_enum, default_value_t = TableFormat::Auto)]
    pub format: TableFormat,

    /// Category tag attached to every row (e.g. hotel, acampamento).
    #[arg(short = 'c', long)]
    pub category: String,
}

/// Epoch split configuration.
#[derive(Debug, Args, Clone)]
pub struct EpochArgs {
    /// Reference year of the split event.
    #[arg(long, default_value_t = 2020)]
    pub reference_year: i32,

    /// Months (spelled as in the data, case-sensitive) still counted as
    /// pre-epoch within the reference year.
    #[arg(long, value_delimiter = ',', default_values_t = ["janeiro".to_string(), "fevereiro".to_string()])]
    pub pre_months: Vec<String>,

    /// Display label for pre-epoch reviews.
    #[arg(long, default_value = "Pre-Covid")]
    pub pre_label: String,

    /// Display label for post-epoch reviews.
    #[arg(long, default_value = "Pos-Covid")]
    pub post_label: String,
}

impl EpochArgs {
    pub fn to_config(&self) -> EpochConfig {
        EpochConfig {
            reference_year: self.reference_year,
            pre_months: self.pre_months.clone(),
            pre_label: self.pre_label.clone(),
            post_label: self.post_label.clone(),
        }
    }
}

/// Word-cloud rendering knobs.
#[derive(Debug, Args, Clone)]
pub struct CloudRenderArgs {
    /// Directory the PNGs are written to (must already exist).
    #[arg(long, default_value = "./figures")]
    pub figures_dir: PathBuf,

    /// Stopword file, one word per line.
    #[arg(long)]
    pub stopwords: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 800)]
    pub cloud_width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 800)]
    pub cloud_height: u32,

    /// Maximum number of words laid out per cloud.
    #[arg(long, default_value_t = 120)]
    pub max_words: usize,
}

impl CloudRenderArgs {
    pub fn to_options(&self) -> CloudOptions {
        CloudOptions {
            width: self.cloud_width,
            height: self.cloud_height,
            max_words: self.max_words,
            ..CloudOptions::default()
        }
    }
}

/// Options for `senti score`.
#[derive(Debug, Parser)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub epoch: EpochArgs,

    /// Polarity lexicon CSV with `word` and `pol` columns.
    #[arg(short = 'l', long)]
    pub lexicon: PathBuf,

    /// Export scored rows to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Also render one word cloud per (epoch, category) group.
    #[arg(long)]
    pub clouds: bool,

    #[command(flatten)]
    pub cloud: CloudRenderArgs,
}

/// Options for `senti clean`.
#[derive(Debug, Parser)]
pub struct CleanArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub epoch: EpochArgs,

    /// Output CSV for the cleaned rows.
    #[arg(short = 'o', long)]
    pub out: PathBuf,
}

/// Options for `senti cloud`.
#[derive(Debug, Parser)]
pub struct CloudArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub epoch: EpochArgs,

    #[command(flatten)]
    pub cloud: CloudRenderArgs,
}

/// Options for `senti sample`.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output CSV for the generated rows.
    #[arg(short = 'o', long)]
    pub out: PathBuf,

    /// Number of reviews to generate.
    #[arg(short = 'n', long, default_value_t = 200)]
    pub count: usize,

    /// Random seed for reproducible samples.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Earliest review year.
    #[arg(long, default_value_t = 2018)]
    pub year_min: i32,

    /// Latest review year.
    #[arg(long, default_value_t = 2022)]
    pub year_max: i32,
}
