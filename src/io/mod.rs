//! Input/output helpers.
//!
//! - review table ingest + cleaning (`ingest`)
//! - cleaned/scored CSV exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
