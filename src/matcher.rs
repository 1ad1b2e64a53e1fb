//! Keyword matching over file names, relative paths, and decoded contents.
//!
//! Name and path checks are free of I/O and always run first; the engine only
//! reads content when they miss and content search is enabled. Matching stops
//! at the first hit: inclusion needs existence, not an enumeration of every
//! occurrence.

use crate::filter::SelectionCriteria;
use crate::options::BinaryDetection;
use crate::types::{HitLocation, KeywordHit};

pub(crate) fn sniff_binary(first_chunk: &[u8], method: BinaryDetection) -> bool {
    match method {
        BinaryDetection::Simple => first_chunk.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(first_chunk).is_binary(),
        BinaryDetection::None => false,
    }
}

fn fold(s: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        s.to_string()
    } else {
        s.to_lowercase()
    }
}

/// Matches keywords against the filename and, when configured, the whole
/// relative path.
pub(crate) fn match_name_or_path(
    relative_path: &str,
    criteria: &SelectionCriteria,
) -> Option<KeywordHit> {
    let file_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
    let folded_name = fold(file_name, criteria.case_sensitive);
    let folded_path = fold(relative_path, criteria.case_sensitive);
    for keyword in &criteria.keywords {
        let needle = fold(keyword, criteria.case_sensitive);
        if folded_name.contains(&needle) {
            return Some(KeywordHit {
                keyword: keyword.clone(),
                location: HitLocation::FileName,
            });
        }
        if criteria.match_full_path && folded_path.contains(&needle) {
            return Some(KeywordHit {
                keyword: keyword.clone(),
                location: HitLocation::Path,
            });
        }
    }
    None
}

/// Searches decoded text for the first keyword occurrence, recording the
/// 1-based line.
pub(crate) fn match_content(text: &str, criteria: &SelectionCriteria) -> Option<KeywordHit> {
    let needles: Vec<String> = criteria
        .keywords
        .iter()
        .map(|k| fold(k, criteria.case_sensitive))
        .collect();
    for (line_idx, line) in text.lines().enumerate() {
        let folded = fold(line, criteria.case_sensitive);
        for (keyword, needle) in criteria.keywords.iter().zip(&needles) {
            if folded.contains(needle) {
                return Some(KeywordHit {
                    keyword: keyword.clone(),
                    location: HitLocation::Content { line: line_idx + 1 },
                });
            }
        }
    }
    None
}
