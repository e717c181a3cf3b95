//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and cleaned review rows (`Review`, `CleanedReview`)
//! - scored outputs (`ScoredReview`, `SentimentScore`)
//! - the epoch split configuration (`EpochConfig`, `EpochLabel`)
//! - resolved run options (`RunConfig`, `CloudOptions`)

pub mod types;

pub use types::*;
