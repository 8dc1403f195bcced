//! Error types for `OnePack`

use std::path::PathBuf;

use thiserror::Error;

use crate::manifest::{MANIFEST_FILE_NAME, SCHEMA_URI, SUPPORTED_MANIFEST_VERSION};

/// How far an error reaches during a pack run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Stops the run before any packing begins (manifest load failures).
    Fatal,
    /// Aborts the remaining pack steps, but the run still reports and ends cleanly.
    Abort,
    /// Skips one entry or include pattern; packing continues.
    Entry,
    /// Reported as a warning only.
    Advisory,
}

/// The error type for `OnePack` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== Manifest Errors ====================
    /// No manifest file in the source directory.
    #[error("no {} found in {}", MANIFEST_FILE_NAME, dir.display())]
    ManifestNotFound {
        /// The source directory that was searched.
        dir: PathBuf,
    },

    /// The manifest exists but could not be read, parsed, or has the wrong shape.
    #[error("error reading {} in {}: {message}", MANIFEST_FILE_NAME, dir.display())]
    ManifestUnreadable {
        /// The source directory holding the manifest.
        dir: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// `manifestVersion` is not the supported value.
    #[error(
        "unsupported manifest version {found} in {} (supported: {})",
        dir.display(),
        SUPPORTED_MANIFEST_VERSION
    )]
    UnsupportedManifestVersion {
        /// The source directory holding the manifest.
        dir: PathBuf,
        /// The version found in the manifest (0 when absent).
        found: i64,
    },

    /// The manifest names a schema other than the official one.
    #[error("schema {found:?} in {} is not the official schema ({})", dir.display(), SCHEMA_URI)]
    SchemaMismatch {
        /// The source directory holding the manifest.
        dir: PathBuf,
        /// The schema URI found in the manifest.
        found: String,
    },

    /// The manifest could not be encoded for the archive.
    #[error("error encoding manifest: {0}")]
    ManifestEncodeFailed(#[source] serde_json::Error),

    // ==================== Entry Errors ====================
    /// A referenced file could not be opened.
    #[error("error opening {path}: {source}")]
    EntryOpenFailed {
        /// Path relative to the source directory.
        path: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A referenced file was opened but could not be read.
    #[error("error reading {path}: {source}")]
    EntryReadFailed {
        /// Path relative to the source directory.
        path: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A structured-text file is not valid JSON.
    #[error("error compacting {path}: {source}")]
    EntryTransformFailed {
        /// Path relative to the source directory.
        path: String,
        /// The parse error.
        #[source]
        source: serde_json::Error,
    },

    /// An archive entry with the same name was already written.
    #[error("duplicate archive entry {name}, keeping the first copy")]
    DuplicateEntry {
        /// The archive entry name.
        name: String,
    },

    // ==================== Include Pattern Errors ====================
    /// An include pattern is not a valid glob.
    #[error("error globbing {pattern}: {source}")]
    GlobPatternInvalid {
        /// The pattern as given.
        pattern: String,
        /// The glob parse error.
        #[source]
        source: glob::PatternError,
    },

    /// A path matched by an include pattern could not be inspected.
    #[error("error globbing {pattern}: {source}")]
    GlobMatchFailed {
        /// The pattern as given.
        pattern: String,
        /// The error for the offending path.
        #[source]
        source: glob::GlobError,
    },

    /// A path matched by an include pattern is not under the source root.
    #[error("error globbing {pattern}: {} is outside {}", path.display(), root.display())]
    IncludeOutsideRoot {
        /// The pattern as given.
        pattern: String,
        /// The matched path as the glob produced it.
        path: PathBuf,
        /// The source root.
        root: PathBuf,
    },

    /// An include pattern matched a directory; directories are not packed.
    #[error("skipping directory {path} matched by {pattern}")]
    IncludeMatchedDirectory {
        /// The pattern as given.
        pattern: String,
        /// The directory, relative to the source root.
        path: String,
    },

    // ==================== Archive Errors ====================
    /// The zip writer rejected an entry.
    #[error("error writing {name}: {source}")]
    ArchiveWriteFailed {
        /// The archive entry name.
        name: String,
        /// The zip writer error.
        #[source]
        source: zip::result::ZipError,
    },

    /// The zip central directory could not be written.
    #[error("error finishing archive: {0}")]
    ArchiveFinalizeFailed(#[source] zip::result::ZipError),

    /// The destination archive file could not be created.
    #[error("error creating zip file {}: {source}", path.display())]
    DestinationCreateFailed {
        /// The destination path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The destination archive file could not be written.
    #[error("error writing zip file {}: {source}", path.display())]
    DestinationWriteFailed {
        /// The destination path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    // ==================== Configuration Errors ====================
    /// The project config file exists but could not be read or parsed.
    #[error("ignoring {}: {message}", path.display())]
    ConfigUnreadable {
        /// The config file path.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },
}

impl Error {
    /// Classify this error for the pack driver.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::ManifestNotFound { .. }
            | Self::ManifestUnreadable { .. }
            | Self::UnsupportedManifestVersion { .. } => ErrorClass::Fatal,
            Self::ManifestEncodeFailed(_)
            | Self::ArchiveWriteFailed { .. }
            | Self::ArchiveFinalizeFailed(_)
            | Self::DestinationCreateFailed { .. }
            | Self::DestinationWriteFailed { .. } => ErrorClass::Abort,
            Self::EntryOpenFailed { .. }
            | Self::EntryReadFailed { .. }
            | Self::EntryTransformFailed { .. }
            | Self::GlobPatternInvalid { .. }
            | Self::GlobMatchFailed { .. }
            | Self::IncludeOutsideRoot { .. } => ErrorClass::Entry,
            Self::SchemaMismatch { .. }
            | Self::DuplicateEntry { .. }
            | Self::IncludeMatchedDirectory { .. }
            | Self::ConfigUnreadable { .. } => ErrorClass::Advisory,
        }
    }
}

/// A specialized Result type for `OnePack` operations.
pub type Result<T> = std::result::Result<T, Error>;
