//! Compiles presets and manual lists into immutable selection criteria.
//!
//! Precedence is an explicit ordered rule list ([`FILE_RULES`]) rather than
//! nested conditionals, so each rule is testable in isolation. First rule to
//! return a verdict wins.

use crate::error::DirsnapError;
use crate::options::SnapshotOptions;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::Path;

/// One filtering rule, evaluated in [`FILE_RULES`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// A relative-path component equals a denied entry. Highest priority;
    /// also drives directory pruning.
    DeniedPathComponent,
    /// A user glob pattern matches the relative path.
    IgnoreGlob,
    /// The extension is on the manual deny list, beating preset inclusion.
    DeniedExtension,
    /// The filename contains a denied substring.
    DeniedNameSubstring,
    /// A require set exists and no entry is a substring of the filename.
    RequiredNameSubstring,
    /// The extension or exact filename is allowed, or no allow set exists.
    AllowedExtension,
}

/// Rule order for files. Deny rules come first so they win any conflict.
pub const FILE_RULES: &[Rule] = &[
    Rule::DeniedPathComponent,
    Rule::IgnoreGlob,
    Rule::DeniedExtension,
    Rule::DeniedNameSubstring,
    Rule::RequiredNameSubstring,
    Rule::AllowedExtension,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Include,
    Exclude,
    Pass,
}

/// Compiled, immutable selection policy for one run.
///
/// Built once before traversal and shared read-only across worker threads.
#[derive(Debug)]
pub struct SelectionCriteria {
    allow_extensions: HashSet<String>,
    exact_filenames: HashSet<String>,
    deny_extensions: HashSet<String>,
    require_name_substrings: HashSet<String>,
    deny_name_substrings: HashSet<String>,
    deny_path_components: HashSet<String>,
    ignore_globs: Option<GlobSet>,
    pub keywords: Vec<String>,
    pub search_contents: bool,
    pub read_binary: bool,
    pub case_sensitive: bool,
    pub match_full_path: bool,
}

impl SelectionCriteria {
    /// Normalizes and merges presets plus manual lists. Returns the criteria
    /// and any configuration warnings (e.g. an extension both allowed and
    /// denied, where deny wins).
    pub fn compile(options: &SnapshotOptions) -> Result<(Self, Vec<String>), DirsnapError> {
        let mut warnings = Vec::new();

        let mut raw_types: Vec<String> = options
            .file_types
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        for preset in &options.language_presets {
            raw_types.extend(preset.entries().iter().map(|e| e.to_lowercase()));
        }
        let mut allow_extensions = HashSet::new();
        let mut exact_filenames = HashSet::new();
        for entry in raw_types {
            if entry.starts_with('.') {
                allow_extensions.insert(entry);
            } else {
                exact_filenames.insert(entry);
            }
        }

        let deny_extensions: HashSet<String> = options
            .ignore_extensions
            .iter()
            .map(|e| normalize_extension(e))
            .filter(|e| !e.is_empty())
            .collect();
        for ext in allow_extensions.intersection(&deny_extensions) {
            warnings.push(format!(
                "extension {ext} is both allowed and denied; deny wins"
            ));
        }

        let mut deny_name_substrings: HashSet<String> = options
            .ignore_name_substrings
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        let mut deny_path_components: HashSet<String> = options
            .ignore_path_components
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        for preset in &options.ignore_presets {
            for entry in preset.entries() {
                deny_path_components.insert(entry.to_lowercase());
                deny_name_substrings.insert(entry.to_lowercase());
            }
        }

        let require_name_substrings: HashSet<String> = options
            .require_name_substrings
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let ignore_globs = if options.ignore_globs.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in &options.ignore_globs {
                let glob = Glob::new(pattern).map_err(|e| {
                    DirsnapError::InvalidConfiguration(format!(
                        "invalid glob pattern '{pattern}': {e}"
                    ))
                })?;
                builder.add(glob);
            }
            Some(builder.build().map_err(|e| {
                DirsnapError::InvalidConfiguration(format!("failed to build glob set: {e}"))
            })?)
        };

        let keywords: Vec<String> = options
            .keywords
            .iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if options.search_contents && keywords.is_empty() {
            return Err(DirsnapError::InvalidConfiguration(
                "content search requires at least one keyword".into(),
            ));
        }

        Ok((
            Self {
                allow_extensions,
                exact_filenames,
                deny_extensions,
                require_name_substrings,
                deny_name_substrings,
                deny_path_components,
                ignore_globs,
                keywords,
                search_contents: options.search_contents,
                read_binary: options.read_binary,
                case_sensitive: options.case_sensitive,
                match_full_path: options.match_full_path,
            },
            warnings,
        ))
    }

    pub fn is_search(&self) -> bool {
        !self.keywords.is_empty()
    }

    /// Evaluates one rule against a relative file path.
    pub fn evaluate(&self, rule: Rule, relative_path: &Path) -> Verdict {
        let name = relative_path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match rule {
            Rule::DeniedPathComponent => {
                let denied = relative_path.components().any(|c| {
                    self.deny_path_components
                        .contains(&c.as_os_str().to_string_lossy().to_lowercase())
                });
                if denied { Verdict::Exclude } else { Verdict::Pass }
            }
            Rule::IgnoreGlob => match &self.ignore_globs {
                Some(set) if set.is_match(relative_path) => Verdict::Exclude,
                _ => Verdict::Pass,
            },
            Rule::DeniedExtension => {
                if let Some(ext) = dot_extension(relative_path) {
                    if self.deny_extensions.contains(&ext) {
                        return Verdict::Exclude;
                    }
                }
                Verdict::Pass
            }
            Rule::DeniedNameSubstring => {
                if self.deny_name_substrings.iter().any(|s| name.contains(s)) {
                    Verdict::Exclude
                } else {
                    Verdict::Pass
                }
            }
            Rule::RequiredNameSubstring => {
                if !self.require_name_substrings.is_empty()
                    && !self.require_name_substrings.iter().any(|s| name.contains(s))
                {
                    Verdict::Exclude
                } else {
                    Verdict::Pass
                }
            }
            Rule::AllowedExtension => {
                if self.allow_extensions.is_empty() && self.exact_filenames.is_empty() {
                    return Verdict::Include;
                }
                if self.exact_filenames.contains(&name) {
                    return Verdict::Include;
                }
                match dot_extension(relative_path) {
                    Some(ext) if self.allow_extensions.contains(&ext) => Verdict::Include,
                    _ => Verdict::Exclude,
                }
            }
        }
    }

    /// Combined decision over [`FILE_RULES`], first verdict wins.
    pub fn should_include(&self, relative_path: &Path) -> bool {
        for rule in FILE_RULES {
            match self.evaluate(*rule, relative_path) {
                Verdict::Include => return true,
                Verdict::Exclude => return false,
                Verdict::Pass => {}
            }
        }
        true
    }

    /// Directory pruning, evaluated before descending. Uses the same deny
    /// set as [`Rule::DeniedPathComponent`] so ignored subtrees are never
    /// traversed at all.
    pub fn should_prune(&self, dir_name: &str, relative_path: &Path) -> bool {
        if self
            .deny_path_components
            .contains(&dir_name.to_lowercase())
        {
            return true;
        }
        match &self.ignore_globs {
            Some(set) => set.is_match(relative_path),
            None => false,
        }
    }
}

/// Lowercased extension with its leading dot, `None` when absent.
fn dot_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}

fn normalize_extension(raw: &str) -> String {
    let trimmed = raw.trim().to_lowercase();
    if trimmed.is_empty() || trimmed.starts_with('.') {
        trimmed
    } else {
        format!(".{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SnapshotBuilder;
    use crate::presets::{IgnorePreset, LanguagePreset};

    fn compile(options: &SnapshotOptions) -> SelectionCriteria {
        SelectionCriteria::compile(options).unwrap().0
    }

    #[test]
    fn denied_path_component_beats_allowed_extension() {
        let options = SnapshotBuilder::new(".")
            .file_types(vec![".py".into()])
            .ignore_path_components(vec![".git".into()])
            .build();
        let criteria = compile(&options);
        assert_eq!(
            criteria.evaluate(Rule::DeniedPathComponent, Path::new(".git/hooks.py")),
            Verdict::Exclude
        );
        assert!(!criteria.should_include(Path::new(".git/hooks.py")));
        assert!(criteria.should_include(Path::new("src/hooks.py")));
    }

    #[test]
    fn path_component_match_is_exact_not_substring() {
        let options = SnapshotBuilder::new(".")
            .ignore_path_components(vec![".git".into()])
            .build();
        let criteria = compile(&options);
        assert!(!criteria.should_prune(".github", Path::new(".github")));
        assert!(criteria.should_prune(".git", Path::new(".git")));
        assert!(criteria.should_include(Path::new(".github/workflows.txt")));
    }

    #[test]
    fn manual_deny_extension_overrides_preset() {
        let options = SnapshotBuilder::new(".")
            .language_presets(vec![LanguagePreset::Markup])
            .ignore_extensions(vec!["md".into()])
            .build();
        let criteria = compile(&options);
        assert_eq!(
            criteria.evaluate(Rule::DeniedExtension, Path::new("README.md")),
            Verdict::Exclude
        );
        assert!(!criteria.should_include(Path::new("README.md")));
        assert!(criteria.should_include(Path::new("notes.txt")));
    }

    #[test]
    fn empty_allow_set_includes_everything_not_denied() {
        let options = SnapshotBuilder::new(".").build();
        let criteria = compile(&options);
        assert!(criteria.should_include(Path::new("anything.xyz")));
        assert!(criteria.should_include(Path::new("Makefile")));
    }

    #[test]
    fn allow_set_excludes_files_without_extension() {
        let options = SnapshotBuilder::new(".")
            .file_types(vec![".py".into()])
            .build();
        let criteria = compile(&options);
        assert!(!criteria.should_include(Path::new("Makefile")));
    }

    #[test]
    fn exact_filenames_from_presets_are_included() {
        let options = SnapshotBuilder::new(".")
            .language_presets(vec![LanguagePreset::Python])
            .build();
        let criteria = compile(&options);
        assert!(criteria.should_include(Path::new("requirements.txt")));
        assert!(criteria.should_include(Path::new("src/app.py")));
        assert!(!criteria.should_include(Path::new("index.js")));
    }

    #[test]
    fn require_name_substring_filters() {
        let options = SnapshotBuilder::new(".")
            .require_name_substrings(vec!["handler".into()])
            .build();
        let criteria = compile(&options);
        assert!(criteria.should_include(Path::new("src/event_handler.rs")));
        assert!(!criteria.should_include(Path::new("src/main.rs")));
    }

    #[test]
    fn ignore_preset_entries_prune_and_deny_names() {
        let options = SnapshotBuilder::new(".")
            .ignore_presets(vec![IgnorePreset::NodeModules])
            .build();
        let criteria = compile(&options);
        assert!(criteria.should_prune("node_modules", Path::new("web/node_modules")));
        assert!(!criteria.should_include(Path::new("package-lock.json")));
    }

    #[test]
    fn conflicting_allow_deny_warns() {
        let options = SnapshotBuilder::new(".")
            .file_types(vec![".md".into()])
            .ignore_extensions(vec![".md".into()])
            .build();
        let (criteria, warnings) = SelectionCriteria::compile(&options).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(!criteria.should_include(Path::new("README.md")));
    }

    #[test]
    fn contents_search_without_keywords_is_invalid() {
        let options = SnapshotBuilder::new(".").search_contents(true).build();
        assert!(matches!(
            SelectionCriteria::compile(&options),
            Err(DirsnapError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn glob_ignores_match_relative_paths() {
        let options = SnapshotBuilder::new(".")
            .ignore_globs(vec!["*.log".into()])
            .build();
        let criteria = compile(&options);
        assert!(!criteria.should_include(Path::new("server.log")));
        assert!(criteria.should_include(Path::new("server.txt")));
    }
}
