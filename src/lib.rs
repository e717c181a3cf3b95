//! `senti-reviews` library crate.
//!
//! The binary (`senti`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future GUI/daemon, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod cloud;
pub mod data;
pub mod domain;
pub mod epoch;
pub mod error;
pub mod io;
pub mod report;
pub mod senti;
