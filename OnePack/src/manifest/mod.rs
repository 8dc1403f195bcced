//! The `mod.json` manifest
//!
//! This module provides the in-memory manifest model and its load rules:
//! - Parse and shape-check `mod.json` from a source directory
//! - Reject unsupported `manifestVersion` values
//! - Warn (without failing) on a non-official `schema`
//! - Re-serialize the manifest for embedding in the archive

mod loader;
mod types;

pub use types::{FileGroupKind, FileGroups, ImageDelta, Manifest, Priority};

/// Fixed filename of the manifest at the source root (and inside the archive namespace).
pub const MANIFEST_FILE_NAME: &str = "mod.json";

/// The only `manifestVersion` this packer understands.
pub const SUPPORTED_MANIFEST_VERSION: i64 = 1;

/// The official manifest schema URI.
pub const SCHEMA_URI: &str = "https://rph.space/oneloader.manifestv1.schema.json";
