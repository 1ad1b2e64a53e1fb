//! Static preset tables: named extension sets, ignore sets, and tree styles.
//!
//! These are plain data consumed by the criteria compiler; nothing in the
//! selection engine depends on which presets exist.

use crate::tree::TreeStyle;
use serde::{Deserialize, Serialize};

/// Predefined sets of file extensions and exact filenames for common stacks.
///
/// Entries starting with `.` are extensions; the rest are exact filenames
/// (e.g. `Cargo.toml`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguagePreset {
    Python,
    JavaScript,
    Web,
    Java,
    Rust,
    Markup,
    Configuration,
}

impl LanguagePreset {
    pub fn entries(self) -> &'static [&'static str] {
        match self {
            LanguagePreset::Python => &[
                ".py",
                ".pyw",
                "setup.py",
                "requirements.txt",
                "Pipfile",
                "pyproject.toml",
            ],
            LanguagePreset::JavaScript => &[".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs"],
            LanguagePreset::Web => &[".html", ".css", ".scss", ".less"],
            LanguagePreset::Java => &[".java", ".groovy", ".kt", ".gradle", ".properties"],
            LanguagePreset::Rust => &[".rs", "Cargo.toml", "Cargo.lock", "build.rs"],
            LanguagePreset::Markup => &[".md", ".rst", ".adoc", ".txt"],
            LanguagePreset::Configuration => &[
                ".env", ".ini", ".cfg", ".conf", ".toml", ".yaml", ".yml", ".json",
            ],
        }
    }
}

/// Predefined sets of path components and filename substrings to ignore.
///
/// Each entry is applied both as an exact relative-path component and as a
/// filename substring, so `node_modules` prunes the directory while
/// `package-lock.json` drops the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnorePreset {
    VersionControl,
    NodeModules,
    PythonEnv,
    BuildArtifacts,
    TestFiles,
    IdeMetadata,
}

impl IgnorePreset {
    pub fn entries(self) -> &'static [&'static str] {
        match self {
            IgnorePreset::VersionControl => &[".git", ".svn", ".hg"],
            IgnorePreset::NodeModules => &["node_modules", "package-lock.json", "yarn.lock"],
            IgnorePreset::PythonEnv => &["__pycache__", "venv", ".venv", "env", "lib", "bin"],
            IgnorePreset::BuildArtifacts => &["dist", "build", "target", "out", "temp", "tmp"],
            IgnorePreset::TestFiles => &["test", "spec", "fixture", "example", "mock"],
            IgnorePreset::IdeMetadata => &[".vscode", ".idea", ".fleet"],
        }
    }
}

/// Predefined character sets for directory tree rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeStylePreset {
    #[default]
    Unicode,
    Ascii,
    Compact,
}

impl TreeStylePreset {
    pub fn style(self) -> TreeStyle {
        match self {
            TreeStylePreset::Unicode => TreeStyle::new("├── ", "└── ", "│   ", "    "),
            TreeStylePreset::Ascii => TreeStyle::new("|-- ", "+-- ", "|   ", "    "),
            TreeStylePreset::Compact => TreeStyle::new("|---", "`---", "|   ", "    "),
        }
    }
}
