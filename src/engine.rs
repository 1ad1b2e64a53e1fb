use crate::artifact::{collate, write_artifact};
use crate::error::DirsnapError;
use crate::filter::SelectionCriteria;
use crate::matcher;
use crate::options::{BinaryDetection, SnapshotOptions};
use crate::tree::render_tree;
use crate::types::{FileEntry, MatchResult, RunSummary, Snapshot};
use ignore::WalkBuilder;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
#[cfg(feature = "logging")]
use tracing;

/// One discovered file, before predicate evaluation.
struct Candidate {
    path: PathBuf,
    relative_path: String,
    size: u64,
}

struct WalkOutcome {
    candidates: Vec<Candidate>,
    directories_visited: usize,
    warnings: Vec<String>,
}

fn resolve_root(options: &SnapshotOptions) -> Result<PathBuf, DirsnapError> {
    let root = options
        .root
        .canonicalize()
        .map_err(|_| DirsnapError::InvalidRoot(options.root.clone()))?;
    if !root.is_dir() {
        return Err(DirsnapError::InvalidRoot(options.root.clone()));
    }
    Ok(root)
}

fn relative_string(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Single-threaded producer: prunes denied subtrees before descending, so
/// traversal cost is bounded by the non-ignored tree.
fn collect_candidates(
    root: &Path,
    criteria: &Arc<SelectionCriteria>,
    options: &SnapshotOptions,
) -> WalkOutcome {
    let mut builder = WalkBuilder::new(root);
    builder
        .git_ignore(options.respect_gitignore)
        .hidden(!options.include_hidden)
        .max_depth(options.max_depth)
        .follow_links(options.follow_links)
        .ignore(false);

    let prune_criteria = Arc::clone(criteria);
    let prune_root = root.to_path_buf();
    builder.filter_entry(move |entry| {
        if entry.depth() == 0 {
            return true;
        }
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        if !is_dir {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        let rel = entry.path().strip_prefix(&prune_root).unwrap_or(entry.path());
        !prune_criteria.should_prune(&name, rel)
    });

    let mut candidates = Vec::new();
    let mut directories_visited = 0;
    let mut warnings = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                if is_dir {
                    directories_visited += 1;
                    continue;
                }
                let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                candidates.push(Candidate {
                    relative_path: relative_string(entry.path(), root),
                    path: entry.into_path(),
                    size,
                });
            }
            Err(e) => {
                #[cfg(feature = "logging")]
                tracing::warn!("walk error, subtree skipped: {}", e);
                warnings.push(format!("walk error, subtree skipped: {e}"));
            }
        }
    }
    WalkOutcome {
        candidates,
        directories_visited,
        warnings,
    }
}

/// Reads content for collation, with the size limit and binary policy
/// applied. Binary and oversized files get placeholder content instead of
/// bytes; decoding is tolerant (lossy) so mixed encodings never fail a run.
fn read_file_content(
    path: &Path,
    binary_detection: BinaryDetection,
    size_limit: Option<u64>,
    read_binary: bool,
) -> Result<(String, bool), DirsnapError> {
    if let Some(limit) = size_limit {
        let metadata = fs::metadata(path).map_err(|e| DirsnapError::io(path, e))?;
        if metadata.len() > limit {
            #[cfg(feature = "logging")]
            tracing::debug!(
                "File too large ({} > {}), content omitted",
                metadata.len(),
                limit
            );
            return Ok(("[File too large, content omitted]".to_string(), false));
        }
    }
    let file = File::open(path).map_err(|e| DirsnapError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::with_capacity(4096);
    let _ = reader
        .by_ref()
        .take(4096)
        .read_to_end(&mut bytes)
        .map_err(|e| DirsnapError::io(path, e))?;
    let is_binary = matcher::sniff_binary(&bytes, binary_detection);
    if is_binary && !read_binary {
        #[cfg(feature = "logging")]
        tracing::debug!("Binary file detected: {}", path.display());
        return Ok(("[Binary file, content omitted]".to_string(), true));
    }
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| DirsnapError::io(path, e))?;
    Ok((String::from_utf8_lossy(&bytes).into_owned(), is_binary))
}

/// Reads text for content search. `Ok(None)` means the file is excluded
/// silently: binary without `read_binary`, or over the size limit.
fn read_search_text(
    path: &Path,
    binary_detection: BinaryDetection,
    size_limit: Option<u64>,
    read_binary: bool,
) -> Result<Option<(String, bool)>, DirsnapError> {
    if let Some(limit) = size_limit {
        let metadata = fs::metadata(path).map_err(|e| DirsnapError::io(path, e))?;
        if metadata.len() > limit {
            return Ok(None);
        }
    }
    let bytes = fs::read(path).map_err(|e| DirsnapError::io(path, e))?;
    let sniff_len = bytes.len().min(4096);
    let is_binary = matcher::sniff_binary(&bytes[..sniff_len], binary_detection);
    if is_binary && !read_binary {
        #[cfg(feature = "logging")]
        tracing::debug!("Binary file skipped in content search: {}", path.display());
        return Ok(None);
    }
    Ok(Some((String::from_utf8_lossy(&bytes).into_owned(), is_binary)))
}

fn excluded(candidate: &Candidate) -> MatchResult {
    MatchResult {
        entry: FileEntry {
            path: candidate.path.clone(),
            relative_path: candidate.relative_path.clone(),
            size: candidate.size,
            content: None,
            is_binary: false,
        },
        included: false,
        hit: None,
        error: None,
    }
}

/// Worker-stage evaluation of one candidate: predicate, then content read or
/// keyword search as the mode requires. Never fails the run; read errors are
/// recorded on the result.
fn evaluate_candidate(
    candidate: &Candidate,
    criteria: &SelectionCriteria,
    options: &SnapshotOptions,
) -> MatchResult {
    let rel = Path::new(&candidate.relative_path);
    if !criteria.should_include(rel) {
        return excluded(candidate);
    }

    let mut result = excluded(candidate);
    if !criteria.is_search() {
        match read_file_content(
            &candidate.path,
            options.binary_detection,
            options.file_size_limit,
            criteria.read_binary,
        ) {
            Ok((content, is_binary)) => {
                result.included = true;
                result.entry.content = Some(content);
                result.entry.is_binary = is_binary;
            }
            Err(e) => result.error = Some(e.to_string()),
        }
        return result;
    }

    if let Some(hit) = matcher::match_name_or_path(&candidate.relative_path, criteria) {
        match read_file_content(
            &candidate.path,
            options.binary_detection,
            options.file_size_limit,
            criteria.read_binary,
        ) {
            Ok((content, is_binary)) => {
                result.included = true;
                result.hit = Some(hit);
                result.entry.content = Some(content);
                result.entry.is_binary = is_binary;
            }
            Err(e) => result.error = Some(e.to_string()),
        }
        return result;
    }

    if criteria.search_contents {
        match read_search_text(
            &candidate.path,
            options.binary_detection,
            options.file_size_limit,
            criteria.read_binary,
        ) {
            Ok(Some((text, is_binary))) => {
                if let Some(hit) = matcher::match_content(&text, criteria) {
                    result.included = true;
                    result.hit = Some(hit);
                    result.entry.content = Some(text);
                    result.entry.is_binary = is_binary;
                }
            }
            Ok(None) => {}
            Err(e) => result.error = Some(e.to_string()),
        }
    }
    result
}

#[cfg(feature = "parallel")]
fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() + 1)
        .unwrap_or(4)
}

#[cfg(feature = "parallel")]
fn process_candidates(
    candidates: &[Candidate],
    criteria: &Arc<SelectionCriteria>,
    options: &SnapshotOptions,
) -> Result<Vec<MatchResult>, DirsnapError> {
    let workers = options.max_workers.unwrap_or_else(default_workers);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| {
            DirsnapError::InvalidConfiguration(format!("failed to build worker pool: {e}"))
        })?;
    Ok(pool.install(|| {
        candidates
            .par_iter()
            .map(|c| evaluate_candidate(c, criteria, options))
            .collect()
    }))
}

#[cfg(not(feature = "parallel"))]
fn process_candidates(
    candidates: &[Candidate],
    criteria: &Arc<SelectionCriteria>,
    options: &SnapshotOptions,
) -> Result<Vec<MatchResult>, DirsnapError> {
    Ok(candidates
        .iter()
        .map(|c| evaluate_candidate(c, criteria, options))
        .collect())
}

/// Sort key shared by the walker, the tree renderer, and the collator:
/// case-sensitive lexicographic comparison of path-component sequences.
fn compare_relative(a: &str, b: &str) -> Ordering {
    a.split('/').cmp(b.split('/'))
}

/// Walks the tree and evaluates every surviving candidate, returning results
/// sorted by relative path. Concurrent completion order never leaks into the
/// output: the final sort is unconditional.
pub fn walk(options: &SnapshotOptions) -> Result<(Vec<MatchResult>, RunSummary), DirsnapError> {
    let start = Instant::now();
    let root = resolve_root(options)?;
    let (criteria, mut warnings) = SelectionCriteria::compile(options)?;
    let criteria = Arc::new(criteria);
    #[cfg(feature = "logging")]
    tracing::debug!("Starting walk at {}", root.display());

    let outcome = collect_candidates(&root, &criteria, options);
    warnings.extend(outcome.warnings);

    let mut results = process_candidates(&outcome.candidates, &criteria, options)?;
    results.sort_by(|a, b| compare_relative(&a.entry.relative_path, &b.entry.relative_path));

    let files_included = results
        .iter()
        .filter(|r| r.included && r.error.is_none())
        .count();
    let errors = results.iter().filter(|r| r.error.is_some()).count();
    if files_included == 0 {
        warnings.push("no files matched the selection criteria".to_string());
    }

    let summary = RunSummary {
        files_discovered: outcome.candidates.len(),
        files_included,
        directories_visited: outcome.directories_visited,
        errors,
        warnings,
        elapsed: start.elapsed(),
    };
    Ok((results, summary))
}

fn root_label(options: &SnapshotOptions) -> String {
    options
        .root
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| options.root.display().to_string())
}

fn included_entries(results: Vec<MatchResult>) -> Vec<FileEntry> {
    results
        .into_iter()
        .filter(|r| r.included && r.error.is_none())
        .map(|r| r.entry)
        .collect()
}

fn tree_lines_for(entries: &[FileEntry], options: &SnapshotOptions) -> Option<Vec<String>> {
    if !options.generate_tree {
        return None;
    }
    let rels: Vec<String> = entries.iter().map(|e| e.relative_path.clone()).collect();
    Some(render_tree(
        &root_label(options),
        &rels,
        &options.tree_style.style(),
        options.show_stats,
    ))
}

/// Runs a scan and assembles the in-memory snapshot: sorted entries plus the
/// rendered tree, when requested.
pub fn snapshot(options: &SnapshotOptions) -> Result<Snapshot, DirsnapError> {
    let (results, summary) = walk(options)?;
    let entries = included_entries(results);
    let tree = tree_lines_for(&entries, options).map(|lines| lines.join("\n"));
    Ok(Snapshot {
        tree,
        entries,
        summary,
    })
}

/// Runs a scan, collates the artifact, and writes it atomically to
/// `options.output`. A zero-match run still writes a valid artifact.
pub fn write_snapshot(options: &SnapshotOptions) -> Result<RunSummary, DirsnapError> {
    let start = Instant::now();
    let (results, mut summary) = walk(options)?;
    let entries = included_entries(results);
    let tree_lines = tree_lines_for(&entries, options);
    let artifact = collate(tree_lines.as_deref(), &entries, options);
    write_artifact(&options.output, &artifact)?;
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Wrote artifact with {} file sections to {}",
        entries.len(),
        options.output.display()
    );
    summary.elapsed = start.elapsed();
    Ok(summary)
}
