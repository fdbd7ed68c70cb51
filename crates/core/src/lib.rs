//! Domain rules for the Reelbook production desk and comparison dashboard.
//!
//! This crate has no internal dependencies and performs no network I/O, so
//! the store, the API, and any future CLI can share it.

pub mod attachments;
pub mod comparison;
pub mod departments;
pub mod editing;
pub mod error;
pub mod imaging;
pub mod options;
pub mod preview;
pub mod scheduling;
pub mod scripts;
pub mod sites;
pub mod timestamps;
pub mod types;
pub mod validation;
