//! Loading, validating and re-serializing `mod.json`

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};
use crate::reporter::{Reporter, Severity};

use super::{MANIFEST_FILE_NAME, Manifest, SCHEMA_URI, SUPPORTED_MANIFEST_VERSION};

impl Manifest {
    /// Load and validate `mod.json` from a source directory
    ///
    /// A non-official `schema` is reported as a warning and does not fail the load.
    ///
    /// # Errors
    /// - [`Error::ManifestNotFound`] if there is no `mod.json`
    /// - [`Error::ManifestUnreadable`] if it cannot be read or parsed
    /// - [`Error::UnsupportedManifestVersion`] if `manifestVersion` is not 1
    pub fn load(source_root: &Path, reporter: &dyn Reporter) -> Result<Self> {
        let path = source_root.join(MANIFEST_FILE_NAME);
        let bytes = std::fs::read(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::ManifestNotFound {
                    dir: source_root.to_path_buf(),
                }
            } else {
                Error::ManifestUnreadable {
                    dir: source_root.to_path_buf(),
                    message: e.to_string(),
                }
            }
        })?;

        let manifest = Self::parse(&bytes, source_root)?;

        if let Some(warning) = manifest.schema_mismatch(source_root) {
            reporter.report(Severity::Warning, &warning.to_string());
        }

        tracing::debug!(
            "Loaded {} for {} {}",
            path.display(),
            manifest.id,
            manifest.version
        );
        Ok(manifest)
    }

    /// Parse and validate manifest bytes
    ///
    /// `dir` only names the source directory in error messages.
    pub fn parse(bytes: &[u8], dir: &Path) -> Result<Self> {
        let manifest: Manifest =
            serde_json::from_slice(bytes).map_err(|e| Error::ManifestUnreadable {
                dir: dir.to_path_buf(),
                message: e.to_string(),
            })?;

        if manifest.id.trim().is_empty() {
            return Err(Error::ManifestUnreadable {
                dir: dir.to_path_buf(),
                message: "`id` must not be empty".to_string(),
            });
        }

        if manifest.manifest_version != SUPPORTED_MANIFEST_VERSION {
            return Err(Error::UnsupportedManifestVersion {
                dir: dir.to_path_buf(),
                found: manifest.manifest_version,
            });
        }

        Ok(manifest)
    }

    /// The advisory schema check: `Some` when `schema` is set to anything but the official URI
    #[must_use]
    pub fn schema_mismatch(&self, dir: &Path) -> Option<Error> {
        match &self.schema {
            Some(schema) if schema != SCHEMA_URI => Some(Error::SchemaMismatch {
                dir: dir.to_path_buf(),
                found: schema.clone(),
            }),
            _ => None,
        }
    }

    /// Indented JSON for the archive copy of the manifest, with a trailing newline
    pub fn to_pretty_json(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self).map_err(Error::ManifestEncodeFailed)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
