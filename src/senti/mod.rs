//! Lexicon-based sentiment scoring.
//!
//! - polarity lexicon loading (`lexicon`)
//! - per-review scoring and batch scoring (`score`)

pub mod lexicon;
pub mod score;

pub use lexicon::*;
pub use score::*;
