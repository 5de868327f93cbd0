//! Deduplication module.
//!
//! An item counts as exported when a file with its base name exists on disk,
//! whatever the extension.

pub mod detector;

pub use detector::exists;
