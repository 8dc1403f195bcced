//! File resolution: everything a manifest (plus include patterns) asks to pack
//!
//! Order is fixed so archives are reproducible:
//! 1. `files` groups (plugins, assets, files, maps, text, data), manifest order
//! 2. `image_deltas[].with`, manifest order
//! 3. Include pattern matches, pattern by pattern
//!
//! Nothing is deduplicated here.

use std::path::Path;

use crate::error::Error;
use crate::manifest::{FileGroupKind, Manifest};
use crate::reporter::{Reporter, Severity};
use crate::utils::relative_path;

/// Where a resolved entry came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
    /// Listed in a `files` group
    FileGroup(FileGroupKind),
    /// Replacement file of an image delta
    ImageDelta,
    /// Matched by an include pattern
    Include(String),
}

/// One file to pack, relative to the source root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub path: String,
    pub source: EntrySource,
}

impl ResolvedEntry {
    fn new(path: impl Into<String>, source: EntrySource) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// Split a comma-separated include list, dropping blank items
#[must_use]
pub fn parse_include_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|pattern| !pattern.is_empty())
        .map(str::to_string)
        .collect()
}

/// Entries to pack plus the number of patterns and matches that failed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub entries: Vec<ResolvedEntry>,
    /// Include patterns or matches reported as errors and left out
    pub failed: usize,
}

impl Resolution {
    fn fail(&mut self, err: &Error, reporter: &dyn Reporter) {
        reporter.report(Severity::Error, &err.to_string());
        self.failed += 1;
    }
}

/// Resolve every entry to pack
///
/// Bad patterns and unreadable matches are reported, counted and skipped.
pub fn resolve(
    manifest: &Manifest,
    source_root: &Path,
    include_patterns: &[String],
    reporter: &dyn Reporter,
) -> Resolution {
    let mut resolution = Resolution::default();

    if let Some(files) = &manifest.files {
        for (kind, group) in files.iter() {
            resolution.entries.extend(
                group
                    .iter()
                    .map(|path| ResolvedEntry::new(path.as_str(), EntrySource::FileGroup(kind))),
            );
        }
    }

    resolution.entries.extend(
        manifest
            .image_deltas()
            .iter()
            .map(|delta| ResolvedEntry::new(delta.with.as_str(), EntrySource::ImageDelta)),
    );

    for pattern in include_patterns {
        match expand_pattern(source_root, pattern, reporter) {
            Ok(matches) => {
                resolution.entries.extend(matches.entries);
                resolution.failed += matches.failed;
            }
            Err(err) => resolution.fail(&err, reporter),
        }
    }

    tracing::debug!(
        "Resolved {} entries ({} failed)",
        resolution.entries.len(),
        resolution.failed
    );
    resolution
}

/// Expand one include pattern under the source root
///
/// Directories are not packable; each one is reported as a warning and left out.
///
/// # Errors
/// [`Error::GlobPatternInvalid`] if the pattern does not parse. Matches that fail
/// to read or fall outside the source root are reported and counted in the
/// returned [`Resolution`] instead.
pub fn expand_pattern(
    source_root: &Path,
    pattern: &str,
    reporter: &dyn Reporter,
) -> Result<Resolution, Error> {
    let root = source_root.to_string_lossy();
    let full_pattern = if root.is_empty() {
        pattern.to_string()
    } else {
        format!(
            "{}/{pattern}",
            glob::Pattern::escape(root.trim_end_matches('/'))
        )
    };

    let paths = glob::glob(&full_pattern).map_err(|source| Error::GlobPatternInvalid {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut resolution = Resolution::default();
    for path in paths {
        let path = match path {
            Ok(path) => path,
            Err(source) => {
                let err = Error::GlobMatchFailed {
                    pattern: pattern.to_string(),
                    source,
                };
                resolution.fail(&err, reporter);
                continue;
            }
        };

        // glob drops a leading `.` from what it yields; relative_path accounts for that
        let Some(relative) = relative_path(path.as_path(), source_root) else {
            let err = Error::IncludeOutsideRoot {
                pattern: pattern.to_string(),
                path,
                root: source_root.to_path_buf(),
            };
            resolution.fail(&err, reporter);
            continue;
        };

        if path.is_dir() {
            let warning = Error::IncludeMatchedDirectory {
                pattern: pattern.to_string(),
                path: relative,
            };
            reporter.report(Severity::Warning, &warning.to_string());
            continue;
        }

        resolution
            .entries
            .push(ResolvedEntry::new(relative, EntrySource::Include(pattern.to_string())));
    }

    Ok(resolution)
}
