//! Data generation helpers.
//!
//! - seeded synthetic review samples for self-contained demo runs (`sample`)

pub mod sample;

pub use sample::*;
