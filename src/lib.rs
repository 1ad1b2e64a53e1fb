//! # Dirsnap
//!
//! `dirsnap` scans a directory tree and produces either a single concatenated
//! text snapshot of the selected files (prefixed by a rendered directory tree)
//! or the set of files matching keyword criteria in their name, path, or
//! content. Selection runs through a compiled predicate pipeline applied
//! concurrently across the tree, with results re-sorted so output is
//! deterministic regardless of completion order. A snapshot artifact can be
//! parsed back into its tree lines and file paths with [`deconstruct`].
//!
//! # Features
//!
//! - `parallel`: Enables parallel per-file processing using Rayon (default).
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use dirsnap::{SnapshotBuilder, LanguagePreset, IgnorePreset, write_snapshot};
//!
//! let options = SnapshotBuilder::new(".")
//!     .output("snapshot.txt")
//!     .language_presets(vec![LanguagePreset::Python])
//!     .ignore_presets(vec![IgnorePreset::VersionControl, IgnorePreset::PythonEnv])
//!     .show_token_count(true)
//!     .build();
//!
//! let summary = write_snapshot(&options).expect("Failed to write snapshot");
//! println!(
//!     "{} of {} files included, {} directories visited",
//!     summary.files_included, summary.files_discovered, summary.directories_visited
//! );
//! ```
//!
//! Search mode is selected by providing keywords:
//!
//! ```no_run
//! use dirsnap::{SnapshotBuilder, snapshot};
//!
//! let options = SnapshotBuilder::new(".")
//!     .keywords(vec!["password".into()])
//!     .search_contents(true)
//!     .build();
//! let result = snapshot(&options).expect("Failed to scan");
//! for entry in result.entries {
//!     println!("match: {}", entry.relative_path);
//! }
//! ```

mod artifact;
mod engine;
mod error;
mod filter;
mod matcher;
mod options;
mod presets;
mod tree;
mod types;

pub use artifact::{Deconstructed, collate, count_tokens, deconstruct, deconstruct_snapshot};
pub use engine::{snapshot, walk, write_snapshot};
pub use error::DirsnapError;
pub use filter::{FILE_RULES, Rule, SelectionCriteria, Verdict};
pub use options::{BinaryDetection, SnapshotBuilder, SnapshotOptions};
pub use presets::{IgnorePreset, LanguagePreset, TreeStylePreset};
pub use tree::{TreeStyle, render_tree};
pub use types::{FileEntry, HitLocation, KeywordHit, MatchResult, RunSummary, Snapshot};
