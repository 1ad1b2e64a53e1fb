use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// A single file entry with its path, content, and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// The full path to the file.
    pub path: PathBuf,
    /// The path relative to the scan root, with forward slashes.
    pub relative_path: String,
    /// The size of the file in bytes.
    pub size: u64,
    /// The content of the file as a string, read lazily by the worker stage.
    ///
    /// `None` until the worker reads it; in search mode content is only read
    /// when keyword matching requires it. If the file was detected as binary
    /// or exceeded the size limit, this holds a placeholder message like
    /// `[Binary file, content omitted]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Whether the file was detected as binary.
    pub is_binary: bool,
}

/// Where a search keyword was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitLocation {
    FileName,
    Path,
    Content {
        /// 1-based line of the first occurrence.
        line: usize,
    },
}

/// The first keyword occurrence found for a file.
///
/// Matching stops at the first hit; inclusion only needs existence, not an
/// enumeration of every occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordHit {
    pub keyword: String,
    pub location: HitLocation,
}

/// Outcome of evaluating one [`FileEntry`] against the selection criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub entry: FileEntry,
    /// Whether the file belongs in the output set.
    pub included: bool,
    /// The keyword hit that caused inclusion, in search mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit: Option<KeywordHit>,
    /// Read failure recorded for this file. A file with an error is excluded
    /// from the artifact but never aborts the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Counters and timing for one completed run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Files that survived pruning and reached the worker stage.
    pub files_discovered: usize,
    /// Files included in the output set.
    pub files_included: usize,
    /// Directories the walker actually entered.
    pub directories_visited: usize,
    /// Per-file read failures (recorded, non-fatal).
    pub errors: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<String>,
    /// Wall-clock time of the run, serialized as milliseconds.
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
}

/// The complete result of a snapshot or search scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// A visual tree representation of the included files, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
    /// Included files, sorted by relative path component sequence.
    pub entries: Vec<FileEntry>,
    pub summary: RunSummary,
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u128(d.as_millis())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(d)?;
        Ok(Duration::from_millis(millis))
    }
}
