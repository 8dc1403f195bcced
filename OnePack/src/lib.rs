//! # OnePack
//!
//! Packs a mod project directory into a single distributable zip, driven by its
//! `mod.json` manifest.
//!
//! ## What goes into the archive
//!
//! - `<id>/mod.json` - the manifest, re-serialized with 2-space indentation
//! - every file listed in `files` (plugins, assets, files, maps, text, data)
//! - every `image_deltas[].with` replacement file
//! - every match of the extra include patterns
//!
//! Entry names are `<id>/<path>` with backslashes turned into forward slashes.
//! `.json`, `.jsond`, `.yamld` and `.ymld` files are compacted on the way in.
//! The archive is written next to the source directory as `<id>-<version>.zip`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use onepack::prelude::*;
//!
//! let options = PackOptions::new("mods/demo").with_include_list("textures/*.png");
//! let summary = pack(&options, &TracingReporter)?;
//! println!("{} entries written", summary.written.len());
//! # Ok::<(), onepack::Error>(())
//! ```

pub mod archive;
pub mod config;
pub mod error;
pub mod manifest;
pub mod pack;
pub mod reporter;
pub mod resolver;
pub mod transform;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, ErrorClass, Result};
pub use pack::pack;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::archive::{PackAssembler, destination_path, materialize};
    pub use crate::config::{PackOptions, ProjectConfig};
    pub use crate::error::{Error, ErrorClass, Result};
    pub use crate::manifest::{FileGroupKind, FileGroups, ImageDelta, Manifest, Priority};
    pub use crate::pack::{PackPhase, PackProgress, PackSummary, pack};
    pub use crate::reporter::{RecordingReporter, Reporter, Severity, TracingReporter};
    pub use crate::resolver::{EntrySource, Resolution, ResolvedEntry, parse_include_list, resolve};
    pub use crate::transform::transform;
}
