//! Utility functions

pub mod path;

pub use path::{clean_path, normalize_path, relative_path};
