//! Entry transformation: archive naming and structured-text compaction

use serde::de::IgnoredAny;

use crate::error::{Error, Result};
use crate::utils::normalize_path;

/// Suffixes of files that are JSON and get compacted when packed
pub const STRUCTURED_TEXT_SUFFIXES: [&str; 4] = [".json", ".jsond", ".yamld", ".ymld"];

/// Whether a path is structured text (case-sensitive suffix match)
#[must_use]
pub fn is_structured_text(path: &str) -> bool {
    STRUCTURED_TEXT_SUFFIXES
        .iter()
        .any(|suffix| path.ends_with(suffix))
}

/// Archive entry name for a path relative to the source root: `<id>/<path>`
/// with every backslash turned into a forward slash
#[must_use]
pub fn archive_name(id: &str, relative_path: &str) -> String {
    format!("{id}/{}", normalize_path(relative_path))
}

/// Strip insignificant whitespace from a JSON document
///
/// Only whitespace between tokens is removed. Keys, number literals and string
/// contents come out exactly as written, duplicate keys included.
///
/// # Errors
/// The document is checked with a non-materializing parse first, so syntax
/// errors surface as a [`serde_json::Error`].
pub fn compact_json(bytes: &[u8]) -> serde_json::Result<Vec<u8>> {
    serde_json::from_slice::<IgnoredAny>(bytes)?;

    let mut compacted = Vec::with_capacity(bytes.len());
    let mut in_string = false;
    let mut escaped = false;
    for &byte in bytes {
        if in_string {
            compacted.push(byte);
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b' ' | b'\t' | b'\n' | b'\r' => {}
            b'"' => {
                in_string = true;
                compacted.push(byte);
            }
            _ => compacted.push(byte),
        }
    }
    Ok(compacted)
}

/// Produce the archive name and content for one source file
///
/// Structured-text files are compacted; everything else passes through unchanged.
///
/// # Errors
/// [`Error::EntryTransformFailed`] if a structured-text file is not valid JSON.
pub fn transform(id: &str, relative_path: &str, raw: Vec<u8>) -> Result<(String, Vec<u8>)> {
    let name = archive_name(id, relative_path);
    if !is_structured_text(relative_path) {
        return Ok((name, raw));
    }

    let compacted = compact_json(&raw).map_err(|source| Error::EntryTransformFailed {
        path: relative_path.to_string(),
        source,
    })?;
    Ok((name, compacted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_structured_text_suffixes() {
        assert!(is_structured_text("cfg.json"));
        assert!(is_structured_text("data/items.jsond"));
        assert!(is_structured_text("data/items.yamld"));
        assert!(is_structured_text("data\\items.ymld"));
        assert!(!is_structured_text("cfg.JSON"));
        assert!(!is_structured_text("notes.yaml"));
        assert!(!is_structured_text("json"));
    }

    #[test]
    fn test_archive_name() {
        assert_eq!(archive_name("demo", "cfg.json"), "demo/cfg.json");
        assert_eq!(
            archive_name("demo", "maps\\world\\start.map"),
            "demo/maps/world/start.map"
        );
    }

    #[test]
    fn test_compacts_structured_text() {
        let (name, bytes) = transform("demo", "cfg.json", b"{ \"a\": 1 }".to_vec()).unwrap();
        assert_eq!(name, "demo/cfg.json");
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn test_compaction_keeps_key_order_and_strings() {
        let raw = b"{\n  \"zeta\": [1, 2,\n 3],\n  \"alpha\": \"keep  these  spaces\",\n  \"mid\": {\"x\": null}\n}\n";
        let (_, bytes) = transform("demo", "data/order.jsond", raw.to_vec()).unwrap();
        assert_eq!(
            String::from_utf8(bytes.clone()).unwrap(),
            r#"{"zeta":[1,2,3],"alpha":"keep  these  spaces","mid":{"x":null}}"#
        );

        let before: serde_json::Value = serde_json::from_slice(raw).unwrap();
        let after: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_compaction_keeps_literals_as_written() {
        let raw = b"{ \"n\": 12345678901234567890123, \"e\": 1.0e2, \"k\": 1, \"k\": 2 }";
        let (_, bytes) = transform("demo", "a.json", raw.to_vec()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"n":12345678901234567890123,"e":1.0e2,"k":1,"k":2}"#
        );

        let (_, bytes) = transform("demo", "b.json", b"{ \"f\": 1e400 }".to_vec()).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"f":1e400}"#);
    }

    #[test]
    fn test_compaction_leaves_string_contents_alone() {
        let raw = br#"[ "a \" b", "tab\there", "\\", " } { " ]"#;
        let compacted = compact_json(raw).unwrap();
        assert_eq!(
            String::from_utf8(compacted).unwrap(),
            r#"["a \" b","tab\there","\\"," } { "]"#
        );
    }

    #[test]
    fn test_other_files_pass_through() {
        let raw = b"  not { json \r\n".to_vec();
        let (name, bytes) = transform("demo", "readme.txt", raw.clone()).unwrap();
        assert_eq!(name, "demo/readme.txt");
        assert_eq!(bytes, raw);
    }

    #[test]
    fn test_invalid_structured_text_fails() {
        let err = transform("demo", "broken.ymld", b"key: value".to_vec()).unwrap_err();
        assert!(matches!(err, Error::EntryTransformFailed { ref path, .. } if path == "broken.ymld"));
    }
}
