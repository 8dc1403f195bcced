//! Archive assembly
//!
//! [`PackAssembler`] owns the zip writer and its in-memory buffer for one pack
//! run. Entries are written under `<id>/`, then the finished buffer is written
//! to `<source>/../<id>-<version>.zip`.

use std::collections::HashSet;
use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::resolver::ResolvedEntry;
use crate::transform;
use crate::utils::clean_path;

/// Destination of the archive: sibling of the source directory, named `<id>-<version>.zip`
#[must_use]
pub fn destination_path(source_root: &Path, manifest: &Manifest) -> PathBuf {
    clean_path(source_root.join("..")).join(manifest.archive_file_name())
}

/// Write a finished archive buffer to its destination
///
/// # Errors
/// [`Error::DestinationCreateFailed`] or [`Error::DestinationWriteFailed`].
pub fn materialize(buffer: &[u8], destination: &Path) -> Result<()> {
    let mut file = File::create(destination).map_err(|source| Error::DestinationCreateFailed {
        path: destination.to_path_buf(),
        source,
    })?;
    file.write_all(buffer)
        .and_then(|()| file.flush())
        .map_err(|source| Error::DestinationWriteFailed {
            path: destination.to_path_buf(),
            source,
        })?;

    tracing::debug!("Wrote {} ({} bytes)", destination.display(), buffer.len());
    Ok(())
}

/// Builds one archive in memory
pub struct PackAssembler<'a> {
    manifest: &'a Manifest,
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    written: HashSet<String>,
}

impl<'a> PackAssembler<'a> {
    /// Start an empty archive for `manifest`
    #[must_use]
    pub fn begin(manifest: &'a Manifest) -> Self {
        // Fixed timestamp and permissions keep identical inputs byte-identical
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);

        Self {
            manifest,
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options,
            written: HashSet::new(),
        }
    }

    /// Write the re-serialized manifest as `<id>/mod.json`
    ///
    /// # Errors
    /// [`Error::ManifestEncodeFailed`] or [`Error::ArchiveWriteFailed`]; both abort the pack.
    pub fn write_manifest_entry(&mut self) -> Result<String> {
        let bytes = self.manifest.to_pretty_json()?;
        let name = self.manifest.manifest_entry_name();
        self.write_data(&name, &bytes)?;
        Ok(name)
    }

    /// Read, transform and write one resolved entry
    ///
    /// Returns the archive name written.
    ///
    /// # Errors
    /// - [`Error::EntryOpenFailed`], [`Error::EntryReadFailed`],
    ///   [`Error::EntryTransformFailed`]: this entry is skipped
    /// - [`Error::DuplicateEntry`]: the name was already written, this copy is skipped
    /// - [`Error::ArchiveWriteFailed`]: the archive can no longer be trusted
    pub fn write_entry(&mut self, source_root: &Path, entry: &ResolvedEntry) -> Result<String> {
        let raw = read_source(source_root, &entry.path)?;
        let (name, bytes) = transform::transform(&self.manifest.id, &entry.path, raw)?;
        self.write_data(&name, &bytes)?;
        Ok(name)
    }

    /// Whether an archive name has been written already
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.written.contains(name)
    }

    /// Finish the central directory and hand back the archive bytes
    ///
    /// # Errors
    /// [`Error::ArchiveFinalizeFailed`] if the zip writer cannot finish.
    pub fn finalize(self) -> Result<Vec<u8>> {
        let cursor = self.writer.finish().map_err(Error::ArchiveFinalizeFailed)?;
        Ok(cursor.into_inner())
    }

    fn write_data(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        if self.written.contains(name) {
            return Err(Error::DuplicateEntry {
                name: name.to_string(),
            });
        }

        self.writer
            .start_file(name, self.options)
            .and_then(|()| self.writer.write_all(bytes).map_err(Into::into))
            .map_err(|source| Error::ArchiveWriteFailed {
                name: name.to_string(),
                source,
            })?;

        self.written.insert(name.to_string());
        tracing::debug!("Added {name} ({} bytes)", bytes.len());
        Ok(())
    }
}

/// Open and fully read one source file; the handle is closed on return
fn read_source(source_root: &Path, relative_path: &str) -> Result<Vec<u8>> {
    let mut file =
        File::open(source_root.join(relative_path)).map_err(|source| Error::EntryOpenFailed {
            path: relative_path.to_string(),
            source,
        })?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|source| Error::EntryReadFailed {
            path: relative_path.to_string(),
            source,
        })?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::EntrySource;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn manifest(json: &str) -> Manifest {
        Manifest::parse(json.as_bytes(), Path::new(".")).unwrap()
    }

    fn entry(path: &str) -> ResolvedEntry {
        ResolvedEntry {
            path: path.to_string(),
            source: EntrySource::Include("*".to_string()),
        }
    }

    fn read_back(bytes: Vec<u8>) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut content = Vec::new();
                file.read_to_end(&mut content).unwrap();
                (file.name().to_string(), content)
            })
            .collect()
    }

    #[test]
    fn test_destination_path() {
        let manifest = manifest(r#"{"id": "foo", "version": "1.2.3", "manifestVersion": 1}"#);
        assert_eq!(
            destination_path(Path::new("/proj/foo"), &manifest),
            PathBuf::from("/proj/foo-1.2.3.zip")
        );
        assert_eq!(
            destination_path(Path::new("."), &manifest),
            PathBuf::from("../foo-1.2.3.zip")
        );
        assert_eq!(
            destination_path(Path::new("mods/foo/"), &manifest),
            PathBuf::from("mods/foo-1.2.3.zip")
        );
    }

    #[test]
    fn test_writes_namespaced_entries() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("maps")).unwrap();
        fs::write(temp.path().join("maps/start.map"), b"\x00\x01map").unwrap();
        fs::write(temp.path().join("cfg.json"), b"{ \"a\": [1, 2] }").unwrap();

        let manifest = manifest(r#"{"id": "demo", "version": "0.1", "manifestVersion": 1}"#);
        let mut assembler = PackAssembler::begin(&manifest);
        assert_eq!(assembler.write_manifest_entry().unwrap(), "demo/mod.json");
        assert_eq!(
            assembler.write_entry(temp.path(), &entry("maps/start.map")).unwrap(),
            "demo/maps/start.map"
        );
        assert_eq!(
            assembler.write_entry(temp.path(), &entry("cfg.json")).unwrap(),
            "demo/cfg.json"
        );
        assert!(assembler.contains("demo/cfg.json"));

        let entries = read_back(assembler.finalize().unwrap());
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, "demo/mod.json");
        assert_eq!(entries[0].1, manifest.to_pretty_json().unwrap());
        assert_eq!(entries[1], ("demo/maps/start.map".to_string(), b"\x00\x01map".to_vec()));
        assert_eq!(entries[2], ("demo/cfg.json".to_string(), br#"{"a":[1,2]}"#.to_vec()));
    }

    #[test]
    fn test_entry_failures_leave_archive_usable() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bad.json"), b"{ nope").unwrap();
        fs::write(temp.path().join("good.txt"), b"ok").unwrap();
        fs::create_dir(temp.path().join("folder")).unwrap();

        let manifest = manifest(r#"{"id": "demo", "manifestVersion": 1}"#);
        let mut assembler = PackAssembler::begin(&manifest);

        let missing = assembler.write_entry(temp.path(), &entry("missing.png")).unwrap_err();
        assert!(matches!(missing, Error::EntryOpenFailed { .. }));

        let bad = assembler.write_entry(temp.path(), &entry("bad.json")).unwrap_err();
        assert!(matches!(bad, Error::EntryTransformFailed { .. }));

        let folder = assembler.write_entry(temp.path(), &entry("folder")).unwrap_err();
        assert!(matches!(
            folder,
            Error::EntryOpenFailed { .. } | Error::EntryReadFailed { .. }
        ));

        assembler.write_entry(temp.path(), &entry("good.txt")).unwrap();
        let entries = read_back(assembler.finalize().unwrap());
        assert_eq!(entries, vec![("demo/good.txt".to_string(), b"ok".to_vec())]);
    }

    #[test]
    fn test_duplicate_names_keep_first_write() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("mod.json"), b"{}").unwrap();
        fs::write(temp.path().join("a.txt"), b"first").unwrap();

        let manifest = manifest(r#"{"id": "demo", "manifestVersion": 1}"#);
        let mut assembler = PackAssembler::begin(&manifest);
        assembler.write_manifest_entry().unwrap();
        assembler.write_entry(temp.path(), &entry("a.txt")).unwrap();

        let again = assembler.write_entry(temp.path(), &entry("a.txt")).unwrap_err();
        assert!(matches!(again, Error::DuplicateEntry { ref name } if name == "demo/a.txt"));

        let manifest_copy = assembler.write_entry(temp.path(), &entry("mod.json")).unwrap_err();
        assert!(matches!(manifest_copy, Error::DuplicateEntry { .. }));

        let entries = read_back(assembler.finalize().unwrap());
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_identical_inputs_give_identical_archives() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), b"same").unwrap();
        let manifest = manifest(r#"{"id": "demo", "manifestVersion": 1}"#);

        let build = || {
            let mut assembler = PackAssembler::begin(&manifest);
            assembler.write_manifest_entry().unwrap();
            assembler.write_entry(temp.path(), &entry("a.txt")).unwrap();
            assembler.finalize().unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_materialize() {
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("demo-0.1.zip");
        materialize(b"PK\x05\x06", &destination).unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"PK\x05\x06");

        let unreachable = temp.path().join("no-such-dir").join("demo-0.1.zip");
        let err = materialize(b"PK", &unreachable).unwrap_err();
        assert!(matches!(err, Error::DestinationCreateFailed { .. }));
    }
}
