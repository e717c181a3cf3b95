//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during cleaning and scoring
//! - exported to CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Input table format for review data.
///
/// `Auto` resolves from the file extension: `.xlsx`/`.xls` → `Xlsx`, else `Csv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    Auto,
    Csv,
    Xlsx,
}

/// Binary epoch split of a review relative to the reference event.
///
/// The display strings (e.g. `"Pre-Covid"` / `"Pos-Covid"`) live in
/// [`EpochConfig`], not here, so the split logic stays locale-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpochLabel {
    Pre,
    Post,
}

impl EpochLabel {
    /// Resolve the display label for this epoch under the given config.
    pub fn display<'a>(self, config: &'a EpochConfig) -> &'a str {
        match self {
            EpochLabel::Pre => &config.pre_label,
            EpochLabel::Post => &config.post_label,
        }
    }
}

/// Configuration of the pre/post epoch split.
///
/// The original dataset carried Portuguese month names and a Covid reference
/// year; both were inline literals. They are a configuration table here so
/// other locales/events can reuse the classifier unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochConfig {
    /// Reference year of the split event.
    pub reference_year: i32,
    /// Month names (case-sensitive, as they appear in the data) that still
    /// count as pre-epoch within the reference year.
    pub pre_months: Vec<String>,
    /// Display label for pre-epoch reviews.
    pub pre_label: String,
    /// Display label for post-epoch reviews.
    pub post_label: String,
}

impl Default for EpochConfig {
    fn default() -> Self {
        Self {
            reference_year: 2020,
            pre_months: vec!["janeiro".to_string(), "fevereiro".to_string()],
            pre_label: "Pre-Covid".to_string(),
            post_label: "Pos-Covid".to_string(),
        }
    }
}

/// A raw review row as read from the input table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub rating: f64,
    /// Raw date string, e.g. `"março de 2021"` (month name is locale-specific).
    pub date: String,
    pub text: String,
}

/// A cleaned review row.
///
/// Exactly the five output columns of the cleaner: rating, normalized date
/// (`"<month> <year>"`), text, resolved epoch label, and the caller-supplied
/// category tag. Row order is preserved from the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanedReview {
    pub rating: f64,
    pub date: String,
    pub text: String,
    pub epoch: String,
    pub category: String,
}

/// Sentiment score for a single text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Sum of polarities over lexicon-matched tokens.
    pub sum: f64,
    /// Number of tokens that matched the lexicon.
    pub matched: usize,
    /// `sum / max(matched, 1)`.
    ///
    /// A zero-match review therefore reports 0.0, indistinguishable from a
    /// genuinely neutral one; check `matched` to tell them apart.
    pub senti_ratio: f64,
}

/// A cleaned review plus its sentiment score (flat for CSV export).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredReview {
    pub rating: f64,
    pub date: String,
    pub text: String,
    pub epoch: String,
    pub category: String,
    pub sum: f64,
    pub matched: usize,
    pub senti_ratio: f64,
}

impl ScoredReview {
    pub fn from_parts(row: CleanedReview, score: SentimentScore) -> Self {
        Self {
            rating: row.rating,
            date: row.date,
            text: row.text,
            epoch: row.epoch,
            category: row.category,
            sum: score.sum,
            matched: score.matched,
            senti_ratio: score.senti_ratio,
        }
    }
}

/// Word-cloud rendering options.
#[derive(Debug, Clone)]
pub struct CloudOptions {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Smallest font size drawn.
    pub min_font: u32,
    /// Largest font size drawn (for the most frequent word).
    pub max_font: u32,
    /// At most this many words are laid out.
    pub max_words: usize,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            min_font: 10,
            max_font: 96,
            max_words: 120,
        }
    }
}

/// A full scoring run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub format: TableFormat,
    /// Caller-supplied category tag attached uniformly to every row
    /// (e.g. "hotel", "acampamento").
    pub category: String,
    pub epoch: EpochConfig,

    pub lexicon_path: PathBuf,
    pub stopwords_path: Option<PathBuf>,

    /// Directory the cloud PNGs are written to. Assumed to pre-exist.
    pub figures_dir: PathBuf,
    pub cloud: CloudOptions,
    pub render_clouds: bool,

    pub export_scored: Option<PathBuf>,
}
