//! Filesystem module.
//!
//! Provides:
//! - Export root, category and target path derivation
//! - Filename sanitizing and partial-download naming

pub mod naming;
pub mod paths;

pub use naming::{partial_path, sanitize_file_stem, sanitize_path_component, with_appended_extension};
pub use paths::{
    commit_partial, discard_partial, ensure_dir, get_category_dir, get_export_root,
    get_target_base, remove_stale_partials,
};
