//! Types for pack progress tracking and results

use std::path::PathBuf;

/// Progress information during a pack run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackProgress {
    /// Current operation phase
    pub phase: PackPhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Current file being processed (if applicable)
    pub current_file: Option<String>,
}

impl PackProgress {
    /// Create a new progress update
    #[must_use]
    pub fn new(phase: PackPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    /// Create a progress update with a file/item name
    #[must_use]
    pub fn with_file(
        phase: PackPhase,
        current: usize,
        total: usize,
        file: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }
}

/// Phase of a pack run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackPhase {
    /// Reading and validating mod.json
    LoadingManifest,
    /// Collecting the files to pack
    Resolving,
    /// Writing entries into the archive
    Packing,
    /// Writing the archive to disk
    Writing,
    /// Run finished
    Complete,
}

impl PackPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoadingManifest => "Reading mod.json",
            Self::Resolving => "Resolving files",
            Self::Packing => "Packing files",
            Self::Writing => "Writing archive",
            Self::Complete => "Complete",
        }
    }

    /// Step number for `[n/4]` style display (`Complete` has none)
    #[must_use]
    pub fn step(self) -> Option<usize> {
        match self {
            Self::LoadingManifest => Some(1),
            Self::Resolving => Some(2),
            Self::Packing => Some(3),
            Self::Writing => Some(4),
            Self::Complete => None,
        }
    }
}

/// Number of numbered phases in a pack run
pub const PACK_STEPS: usize = 4;

/// Outcome of a pack run that got past manifest loading
#[derive(Debug, Clone, Default)]
pub struct PackSummary {
    /// Manifest `id`
    pub id: String,
    /// Manifest `version`
    pub version: String,
    /// Where the archive was written, if it was
    pub destination: Option<PathBuf>,
    /// Archive entries written, in order (manifest included)
    pub written: Vec<String>,
    /// Entries or patterns that failed and were skipped
    pub failed: usize,
    /// Entries skipped as duplicates
    pub skipped: usize,
    /// Message of the error that aborted the pack, if any
    pub aborted: Option<String>,
    /// Size of the finished archive in bytes
    pub archive_size: Option<usize>,
}

impl PackSummary {
    /// Whether the archive reached the destination
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.destination.is_some() && self.aborted.is_none()
    }
}
