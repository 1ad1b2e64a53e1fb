use crate::presets::{IgnorePreset, LanguagePreset, TreeStylePreset};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryDetection {
    Simple,
    Accurate,
    None,
}
/// The full configuration for one run. Compiled into immutable
/// [`SelectionCriteria`](crate::SelectionCriteria) before traversal;
/// a non-empty `keywords` list selects search mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotOptions {
    pub root: PathBuf,
    pub output: PathBuf,
    pub language_presets: Vec<LanguagePreset>,
    pub ignore_presets: Vec<IgnorePreset>,
    /// Manual file types: entries starting with `.` are extensions, the rest
    /// exact filenames.
    pub file_types: Vec<String>,
    /// Manual extension deny list; beats any preset inclusion.
    pub ignore_extensions: Vec<String>,
    pub require_name_substrings: Vec<String>,
    pub ignore_name_substrings: Vec<String>,
    pub ignore_path_components: Vec<String>,
    /// Glob patterns excluded from traversal, e.g. `*.log`.
    pub ignore_globs: Vec<String>,
    pub keywords: Vec<String>,
    pub search_contents: bool,
    pub read_binary: bool,
    pub case_sensitive: bool,
    /// Match keywords against the whole relative path, not just the filename.
    pub match_full_path: bool,
    pub generate_tree: bool,
    pub tree_style: TreeStylePreset,
    pub show_stats: bool,
    pub show_token_count: bool,
    pub exclude_whitespace: bool,
    pub max_workers: Option<usize>,
    pub binary_detection: BinaryDetection,
    pub file_size_limit: Option<u64>,
    pub respect_gitignore: bool,
    pub include_hidden: bool,
    pub follow_links: bool,
    pub max_depth: Option<usize>,
}
impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from("snapshot.txt"),
            language_presets: Vec::new(),
            ignore_presets: Vec::new(),
            file_types: Vec::new(),
            ignore_extensions: Vec::new(),
            require_name_substrings: Vec::new(),
            ignore_name_substrings: Vec::new(),
            ignore_path_components: Vec::new(),
            ignore_globs: Vec::new(),
            keywords: Vec::new(),
            search_contents: false,
            read_binary: false,
            case_sensitive: false,
            match_full_path: true,
            generate_tree: true,
            tree_style: TreeStylePreset::Unicode,
            show_stats: false,
            show_token_count: false,
            exclude_whitespace: false,
            max_workers: None,
            binary_detection: BinaryDetection::Simple,
            file_size_limit: None,
            respect_gitignore: true,
            include_hidden: false,
            follow_links: false,
            max_depth: None,
        }
    }
}
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    options: SnapshotOptions,
}
impl SnapshotBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: SnapshotOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output = path.into();
        self
    }
    pub fn language_presets(mut self, presets: Vec<LanguagePreset>) -> Self {
        self.options.language_presets = presets;
        self
    }
    pub fn ignore_presets(mut self, presets: Vec<IgnorePreset>) -> Self {
        self.options.ignore_presets = presets;
        self
    }
    pub fn file_types(mut self, types: Vec<String>) -> Self {
        self.options.file_types = types;
        self
    }
    pub fn ignore_extensions(mut self, exts: Vec<String>) -> Self {
        self.options.ignore_extensions = exts;
        self
    }
    pub fn require_name_substrings(mut self, subs: Vec<String>) -> Self {
        self.options.require_name_substrings = subs;
        self
    }
    pub fn ignore_name_substrings(mut self, subs: Vec<String>) -> Self {
        self.options.ignore_name_substrings = subs;
        self
    }
    pub fn ignore_path_components(mut self, components: Vec<String>) -> Self {
        self.options.ignore_path_components = components;
        self
    }
    pub fn ignore_globs(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_globs = patterns;
        self
    }
    pub fn keywords(mut self, keywords: Vec<String>) -> Self {
        self.options.keywords = keywords;
        self
    }
    pub fn search_contents(mut self, yes: bool) -> Self {
        self.options.search_contents = yes;
        self
    }
    pub fn read_binary(mut self, yes: bool) -> Self {
        self.options.read_binary = yes;
        self
    }
    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.options.case_sensitive = yes;
        self
    }
    pub fn match_full_path(mut self, yes: bool) -> Self {
        self.options.match_full_path = yes;
        self
    }
    pub fn generate_tree(mut self, yes: bool) -> Self {
        self.options.generate_tree = yes;
        self
    }
    pub fn tree_style(mut self, style: TreeStylePreset) -> Self {
        self.options.tree_style = style;
        self
    }
    pub fn show_stats(mut self, yes: bool) -> Self {
        self.options.show_stats = yes;
        self
    }
    pub fn show_token_count(mut self, yes: bool) -> Self {
        self.options.show_token_count = yes;
        self
    }
    pub fn exclude_whitespace(mut self, yes: bool) -> Self {
        self.options.exclude_whitespace = yes;
        self
    }
    pub fn max_workers(mut self, workers: usize) -> Self {
        self.options.max_workers = Some(workers);
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn file_size_limit(mut self, limit: Option<u64>) -> Self {
        self.options.file_size_limit = limit;
        self
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.options.respect_gitignore = yes;
        self
    }
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.options.include_hidden = yes;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }
    pub fn build(self) -> SnapshotOptions {
        self.options
    }
}
