//! The pack run: manifest → resolution → archive → destination
//!
//! Strictly sequential. Manifest load failures end the run with an error;
//! everything after that is reported and folded into a [`PackSummary`]:
//! - per-entry failures skip the entry and packing continues
//! - duplicate archive names keep the first copy
//! - writer and destination failures abort the remaining steps

mod types;

pub use types::{PACK_STEPS, PackPhase, PackProgress, PackSummary};

use crate::archive::{PackAssembler, destination_path, materialize};
use crate::config::{PackOptions, ProjectConfig};
use crate::error::{Error, ErrorClass, Result};
use crate::manifest::{MANIFEST_FILE_NAME, Manifest};
use crate::reporter::{Reporter, Severity};
use crate::resolver::resolve;

/// Pack the mod at `options.source_root`
///
/// # Errors
/// Only manifest load failures ([`Error::ManifestNotFound`],
/// [`Error::ManifestUnreadable`], [`Error::UnsupportedManifestVersion`]) are
/// returned. Every other problem is reported and recorded in the summary.
pub fn pack(options: &PackOptions, reporter: &dyn Reporter) -> Result<PackSummary> {
    let source_root = options.source_root.as_path();

    reporter.progress(&PackProgress::with_file(
        PackPhase::LoadingManifest,
        0,
        1,
        MANIFEST_FILE_NAME,
    ));
    let manifest = Manifest::load(source_root, reporter).inspect_err(|err| {
        reporter.report(Severity::Error, &err.to_string());
    })?;

    let display_name = if manifest.name.is_empty() {
        &manifest.id
    } else {
        &manifest.name
    };
    reporter.report(Severity::Info, &format!("Packing {display_name}"));
    reporter.report(
        Severity::Info,
        &format!("ID: {}, Version: {}", manifest.id, manifest.version),
    );

    let config = ProjectConfig::load(source_root).unwrap_or_else(|err| {
        reporter.report(Severity::Warning, &err.to_string());
        ProjectConfig::default()
    });
    let patterns = config.include_patterns(options);

    reporter.progress(&PackProgress::new(PackPhase::Resolving, 0, patterns.len()));
    let resolution = resolve(&manifest, source_root, &patterns, reporter);
    let entries = resolution.entries;

    let mut summary = PackSummary {
        id: manifest.id.clone(),
        version: manifest.version.clone(),
        failed: resolution.failed,
        ..PackSummary::default()
    };

    let total = entries.len() + 1;
    let mut assembler = PackAssembler::begin(&manifest);

    reporter.progress(&PackProgress::with_file(
        PackPhase::Packing,
        1,
        total,
        MANIFEST_FILE_NAME,
    ));
    match assembler.write_manifest_entry() {
        Ok(name) => added(&mut summary, name, reporter),
        Err(err) => return Ok(abort(summary, &err, reporter)),
    }

    for (index, entry) in entries.iter().enumerate() {
        reporter.progress(&PackProgress::with_file(
            PackPhase::Packing,
            index + 2,
            total,
            entry.path.as_str(),
        ));

        match assembler.write_entry(source_root, entry) {
            Ok(name) => added(&mut summary, name, reporter),
            Err(err) => match err.class() {
                ErrorClass::Entry => {
                    reporter.report(Severity::Error, &err.to_string());
                    summary.failed += 1;
                }
                ErrorClass::Advisory => {
                    reporter.report(Severity::Warning, &err.to_string());
                    summary.skipped += 1;
                }
                ErrorClass::Abort | ErrorClass::Fatal => {
                    return Ok(abort(summary, &err, reporter));
                }
            },
        }
    }

    reporter.progress(&PackProgress::new(PackPhase::Writing, 0, 1));
    let bytes = match assembler.finalize() {
        Ok(bytes) => bytes,
        Err(err) => return Ok(abort(summary, &err, reporter)),
    };

    let destination = destination_path(source_root, &manifest);
    reporter.report(
        Severity::Info,
        &format!("Creating {}", manifest.archive_file_name()),
    );
    if let Err(err) = materialize(&bytes, &destination) {
        return Ok(abort(summary, &err, reporter));
    }

    summary.archive_size = Some(bytes.len());
    summary.destination = Some(destination);
    reporter.report(Severity::Success, "Success!");
    reporter.progress(&PackProgress::new(PackPhase::Complete, 1, 1));
    Ok(summary)
}

fn added(summary: &mut PackSummary, name: String, reporter: &dyn Reporter) {
    reporter.report(Severity::Info, &format!("Added {name}"));
    summary.written.push(name);
}

fn abort(mut summary: PackSummary, err: &Error, reporter: &dyn Reporter) -> PackSummary {
    tracing::debug!("Pack aborted: {err}");
    reporter.report(Severity::Error, &err.to_string());
    summary.aborted = Some(err.to_string());
    reporter.progress(&PackProgress::new(PackPhase::Complete, 0, 1));
    summary
}
