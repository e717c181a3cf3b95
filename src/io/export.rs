//! CSV exports for raw, cleaned, and scored review rows.
//!
//! Exports are meant to be easy to consume in spreadsheets or downstream
//! scripts, so everything stays flat, one row per review.

use std::path::Path;

use serde::Serialize;

use crate::domain::{CleanedReview, Review, ScoredReview};
use crate::error::AppError;

/// Write raw review rows (e.g. a generated sample) to CSV.
pub fn write_reviews_csv(path: &Path, rows: &[Review]) -> Result<(), AppError> {
    write_csv(path, rows, "review")
}

/// Write cleaned rows to CSV.
///
/// Column order matches the cleaner's contract: rating, date, text, epoch,
/// category.
pub fn write_cleaned_csv(path: &Path, rows: &[CleanedReview]) -> Result<(), AppError> {
    write_csv(path, rows, "cleaned review")
}

/// Write scored rows (cleaned columns plus sum/matched/senti_ratio) to CSV.
pub fn write_scored_csv(path: &Path, rows: &[ScoredReview]) -> Result<(), AppError> {
    write_csv(path, rows, "scored review")
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T], what: &str) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::input(format!("Failed to create {what} CSV '{}': {e}", path.display()))
    })?;

    for row in rows {
        writer.serialize(row).map_err(|e| {
            AppError::input(format!("Failed to write {what} CSV row: {e}"))
        })?;
    }

    writer.flush().map_err(|e| {
        AppError::input(format!("Failed to flush {what} CSV '{}': {e}", path.display()))
    })?;
    Ok(())
}
