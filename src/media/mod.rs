//! Media module for classification and naming.

pub mod extension;
pub mod item;

pub use extension::resolve_extension;
pub use item::{classify, select_eligible, MediaItem};
