//! The snapshot artifact format: collation, token estimate, deconstruction.
//!
//! On-disk contract (stable across releases — old artifacts must stay
//! parseable):
//!
//! ```text
//! Token Count (Characters): 1234        (optional first line)
//!
//! Project File Structure
//! --------------------------------------------------------------------------------
//!
//! <tree lines, any style>
//!
//! --------------------------------------------------------------------------------
//!
//! --------------------------------------------------------------------------------
//! FILE: src/main.rs
//! --------------------------------------------------------------------------------
//!
//! <content>
//! ```
//!
//! A file marker is the three-line sequence separator / `FILE: <path>` /
//! separator. The deconstructor keys only on that sequence, never on the tree
//! style, so any rendered style round-trips.

use crate::error::DirsnapError;
use crate::options::SnapshotOptions;
use crate::types::FileEntry;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const SEPARATOR_CHAR: char = '-';
const SEPARATOR_LEN: usize = 80;
const TREE_HEADER: &str = "Project File Structure";
const FILE_MARKER_PREFIX: &str = "FILE: ";
const STATS_KEY: &str = "Key: [Nf, Md] = files, subdirectories beneath";
const NO_FILES_NOTICE: &str = "No files found matching the specified criteria.";

fn separator() -> String {
    SEPARATOR_CHAR.to_string().repeat(SEPARATOR_LEN)
}

/// Approximate token count: characters, optionally ignoring whitespace.
/// A deliberate heuristic, not a tokenizer.
pub fn count_tokens(text: &str, exclude_whitespace: bool) -> usize {
    if exclude_whitespace {
        text.chars().filter(|c| !c.is_whitespace()).count()
    } else {
        text.chars().count()
    }
}

/// Concatenates the tree block and one section per entry into the final
/// artifact text. Entries must already be filtered and sorted; every path in
/// the tree has exactly one section here.
pub fn collate(
    tree_lines: Option<&[String]>,
    entries: &[FileEntry],
    options: &SnapshotOptions,
) -> String {
    let sep = separator();
    let mut body = String::new();

    if let Some(lines) = tree_lines {
        body.push_str(&format!("{TREE_HEADER}\n{sep}\n\n"));
        if options.show_stats {
            body.push_str(&format!("{STATS_KEY}\n\n"));
        }
        body.push_str(&lines.join("\n"));
        body.push_str(&format!("\n\n{sep}\n\n"));
    }

    for entry in entries {
        body.push_str(&format!(
            "{sep}\n{FILE_MARKER_PREFIX}{}\n{sep}\n\n",
            entry.relative_path
        ));
        let content = entry.content.as_deref().unwrap_or("");
        body.push_str(content);
        if !content.ends_with('\n') {
            body.push('\n');
        }
        body.push('\n');
    }

    if entries.is_empty() && tree_lines.is_none() {
        body.push_str(NO_FILES_NOTICE);
        body.push('\n');
    }

    if options.show_token_count {
        let count = count_tokens(&body, options.exclude_whitespace);
        let unit = if options.exclude_whitespace {
            "Characters, excluding whitespace"
        } else {
            "Characters"
        };
        format!("Token Count ({unit}): {count}\n\n{body}")
    } else {
        body
    }
}

/// Tree lines and file paths recovered from an artifact.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Deconstructed {
    pub tree_lines: Vec<String>,
    pub file_paths: Vec<String>,
}

fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 4 && trimmed.chars().all(|c| c == SEPARATOR_CHAR)
}

/// Parses an artifact back into its tree lines and file path list.
///
/// Works for every tree style because only the separator and marker
/// convention is consulted. Fails with
/// [`DirsnapError::MalformedArtifact`] when the text contains no recognizable
/// structure, or a marker line carries no path.
pub fn deconstruct(artifact: &str) -> Result<Deconstructed, DirsnapError> {
    let lines: Vec<&str> = artifact.lines().collect();

    let mut tree_lines = Vec::new();
    let mut saw_tree_header = false;
    if let Some(header_idx) = lines.iter().position(|l| l.trim() == TREE_HEADER) {
        saw_tree_header = true;
        let mut idx = header_idx + 1;
        while idx < lines.len() {
            let trimmed = lines[idx].trim();
            if is_separator(trimmed) {
                if tree_lines.is_empty() {
                    idx += 1;
                    continue;
                }
                break;
            }
            if trimmed.is_empty() || trimmed.starts_with("Key:") {
                idx += 1;
                continue;
            }
            tree_lines.push(lines[idx].trim_end().to_string());
            idx += 1;
        }
    }

    let mut file_paths = Vec::new();
    for idx in 0..lines.len() {
        if idx + 2 >= lines.len() {
            break;
        }
        if !is_separator(lines[idx]) || !is_separator(lines[idx + 2]) {
            continue;
        }
        let Some(rest) = lines[idx + 1].trim().strip_prefix(FILE_MARKER_PREFIX.trim_end()) else {
            continue;
        };
        let path = rest.trim();
        if path.is_empty() {
            return Err(DirsnapError::MalformedArtifact(format!(
                "marker at line {} has no path",
                idx + 2
            )));
        }
        file_paths.push(path.to_string());
    }

    let saw_notice = lines.iter().any(|l| l.trim() == NO_FILES_NOTICE);
    if file_paths.is_empty() && !saw_tree_header && !saw_notice {
        return Err(DirsnapError::MalformedArtifact(
            "no recognizable marker lines".into(),
        ));
    }

    Ok(Deconstructed {
        tree_lines,
        file_paths,
    })
}

/// Reads an artifact file and deconstructs it.
pub fn deconstruct_snapshot(path: impl AsRef<Path>) -> Result<Deconstructed, DirsnapError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| DirsnapError::io(path, e))?;
    deconstruct(&text)
}

/// Writes the artifact atomically: temp file in the destination directory,
/// then persist. An interrupted run never leaves a partial artifact behind.
pub fn write_artifact(path: &Path, content: &str) -> Result<(), DirsnapError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| DirsnapError::io(dir, e))?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| DirsnapError::io(dir, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| DirsnapError::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| DirsnapError::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SnapshotBuilder;
    use crate::presets::TreeStylePreset;
    use crate::tree::render_tree;

    fn entry(rel: &str, content: &str) -> FileEntry {
        FileEntry {
            path: Path::new("/tmp").join(rel),
            relative_path: rel.to_string(),
            size: content.len() as u64,
            content: Some(content.to_string()),
            is_binary: false,
        }
    }

    #[test]
    fn round_trip_recovers_paths_in_order() {
        let entries = vec![
            entry("src/a.py", "print('a')"),
            entry("src/b.py", "print('b')"),
            entry("tests/test_a.py", "assert True"),
        ];
        let rels: Vec<String> = entries.iter().map(|e| e.relative_path.clone()).collect();
        let tree = render_tree("project", &rels, &TreeStylePreset::Unicode.style(), false);
        let options = SnapshotBuilder::new(".").build();
        let artifact = collate(Some(&tree), &entries, &options);
        let parsed = deconstruct(&artifact).unwrap();
        assert_eq!(parsed.file_paths, rels);
        assert_eq!(parsed.tree_lines.len(), tree.len());
    }

    #[test]
    fn round_trip_works_for_every_style() {
        let entries = vec![entry("a.txt", "alpha"), entry("b/c.txt", "gamma")];
        let rels: Vec<String> = entries.iter().map(|e| e.relative_path.clone()).collect();
        for preset in [
            TreeStylePreset::Unicode,
            TreeStylePreset::Ascii,
            TreeStylePreset::Compact,
        ] {
            let tree = render_tree("r", &rels, &preset.style(), true);
            let options = SnapshotBuilder::new(".").show_stats(true).build();
            let artifact = collate(Some(&tree), &entries, &options);
            let parsed = deconstruct(&artifact).unwrap();
            assert_eq!(parsed.file_paths, rels);
        }
    }

    #[test]
    fn marker_prefix_inside_content_is_not_a_marker() {
        let entries = vec![
            entry("notes.txt", "FILE: decoy.txt\nstill the same file"),
            entry("real.txt", "ok"),
        ];
        let options = SnapshotBuilder::new(".").generate_tree(false).build();
        let artifact = collate(None, &entries, &options);
        let parsed = deconstruct(&artifact).unwrap();
        assert_eq!(parsed.file_paths, vec!["notes.txt", "real.txt"]);
    }

    #[test]
    fn no_markers_is_malformed() {
        let err = deconstruct("just some text\nwith lines\n").unwrap_err();
        assert!(matches!(err, DirsnapError::MalformedArtifact(_)));
    }

    #[test]
    fn empty_marker_path_is_malformed() {
        let sep = "-".repeat(80);
        let text = format!("{sep}\nFILE: \n{sep}\n");
        assert!(matches!(
            deconstruct(&text),
            Err(DirsnapError::MalformedArtifact(_))
        ));
    }

    #[test]
    fn empty_run_still_produces_parseable_artifact() {
        let options = SnapshotBuilder::new(".").generate_tree(false).build();
        let artifact = collate(None, &[], &options);
        let parsed = deconstruct(&artifact).unwrap();
        assert!(parsed.file_paths.is_empty());
        assert!(parsed.tree_lines.is_empty());
    }

    #[test]
    fn token_count_modes() {
        assert_eq!(count_tokens("a b\nc", false), 5);
        assert_eq!(count_tokens("a b\nc", true), 3);
    }

    #[test]
    fn token_count_header_prepended() {
        let entries = vec![entry("a.txt", "hello")];
        let options = SnapshotBuilder::new(".")
            .generate_tree(false)
            .show_token_count(true)
            .build();
        let artifact = collate(None, &entries, &options);
        assert!(artifact.starts_with("Token Count (Characters): "));
        let parsed = deconstruct(&artifact).unwrap();
        assert_eq!(parsed.file_paths, vec!["a.txt"]);
    }
}
