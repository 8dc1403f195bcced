//! Manifest data model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::MANIFEST_FILE_NAME;

/// The `mod.json` manifest.
///
/// Field order here is the key order of the serialized manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Mod identifier: archive root namespace and destination filename stem.
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    /// Absent is read as 0, which is never supported.
    #[serde(rename = "manifestVersion", default)]
    pub manifest_version: i64,
    #[serde(rename = "_flags", default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<String>>,
    #[serde(rename = "image_deltas", default, skip_serializing_if = "Option::is_none")]
    pub image_deltas: Option<Vec<ImageDelta>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<FileGroups>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Keys this packer does not know about, kept in load order.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Manifest {
    /// Archive name of the embedded manifest (`<id>/mod.json`)
    #[must_use]
    pub fn manifest_entry_name(&self) -> String {
        format!("{}/{MANIFEST_FILE_NAME}", self.id)
    }

    /// Destination archive filename (`<id>-<version>.zip`)
    #[must_use]
    pub fn archive_file_name(&self) -> String {
        format!("{}-{}.zip", self.id, self.version)
    }

    /// Image delta records, empty when the manifest has none
    #[must_use]
    pub fn image_deltas(&self) -> &[ImageDelta] {
        self.image_deltas.as_deref().unwrap_or_default()
    }
}

/// One image patch operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDelta {
    /// Patch target identifier (display only).
    #[serde(default)]
    pub patch: String,
    /// Replacement file, relative to the source root. Always packed.
    #[serde(default)]
    pub with: String,
    /// Whether the delta targets a directory.
    #[serde(default)]
    pub dir: bool,
}

/// `priority` is passed through in whichever form it was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Priority {
    Number(serde_json::Number),
    Text(String),
}

/// The six named file lists of `files`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileGroups {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
}

impl FileGroups {
    /// Entries of one group, empty when the group is absent
    #[must_use]
    pub fn get(&self, kind: FileGroupKind) -> &[String] {
        let group = match kind {
            FileGroupKind::Plugins => &self.plugins,
            FileGroupKind::Assets => &self.assets,
            FileGroupKind::Files => &self.files,
            FileGroupKind::Maps => &self.maps,
            FileGroupKind::Text => &self.text,
            FileGroupKind::Data => &self.data,
        };
        group.as_deref().unwrap_or_default()
    }

    /// All groups in packing order
    pub fn iter(&self) -> impl Iterator<Item = (FileGroupKind, &[String])> + '_ {
        FileGroupKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }

    /// Total number of listed files across all groups
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().map(|(_, group)| group.len()).sum()
    }

    /// Whether no group lists any file
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Names a `files` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileGroupKind {
    Plugins,
    Assets,
    Files,
    Maps,
    Text,
    Data,
}

impl FileGroupKind {
    /// Every group, in the order entries are packed
    pub const ALL: [FileGroupKind; 6] = [
        Self::Plugins,
        Self::Assets,
        Self::Files,
        Self::Maps,
        Self::Text,
        Self::Data,
    ];

    /// The group's key in `mod.json`
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plugins => "plugins",
            Self::Assets => "assets",
            Self::Files => "files",
            Self::Maps => "maps",
            Self::Text => "text",
            Self::Data => "data",
        }
    }
}

impl std::fmt::Display for FileGroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
