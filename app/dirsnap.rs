//! Command-line interface for dirsnap.
//!
//! This binary provides access to the dirsnap library functionality:
//! filtered directory snapshots, keyword search, and deconstruction of
//! previously written artifacts.

use clap::{Parser, ValueEnum};
use dirsnap::{
    BinaryDetection, IgnorePreset, LanguagePreset, RunSummary, SnapshotOptions, SnapshotBuilder,
    TreeStylePreset, deconstruct_snapshot, write_snapshot,
};
use std::path::PathBuf;
use std::process::exit;

/// dirsnap — directory snapshot and search tool
#[derive(Parser)]
#[command(name = "dirsnap", version, about, long_about = None)]
struct Cli {
    /// Root directory (default current dir)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Output artifact path
    #[arg(short, long, default_value = "snapshot.txt")]
    output: PathBuf,

    /// File types to include: extensions (".py") or exact names ("Cargo.toml"); can be repeated
    #[arg(short = 't', long = "type")]
    file_types: Vec<String>,

    /// Language presets (can be repeated)
    #[arg(long = "lang", value_parser = parse_language_preset)]
    language_presets: Vec<LanguagePreset>,

    /// Ignore presets (can be repeated)
    #[arg(long = "ignore-preset", value_parser = parse_ignore_preset)]
    ignore_presets: Vec<IgnorePreset>,

    /// Extensions to exclude even when a preset includes them
    #[arg(long = "ignore-ext")]
    ignore_extensions: Vec<String>,

    /// Path components to prune; matching directories are never descended
    #[arg(short = 'I', long = "ignore-dir")]
    ignore_path_components: Vec<String>,

    /// Filename substrings to exclude
    #[arg(long = "ignore-name")]
    ignore_name_substrings: Vec<String>,

    /// Filename substrings required for inclusion
    #[arg(long = "require-name")]
    require_name_substrings: Vec<String>,

    /// Glob patterns to exclude (can be repeated)
    #[arg(long = "glob-ignore")]
    ignore_globs: Vec<String>,

    /// Search keywords; any keyword switches to search mode
    #[arg(short = 'k', long = "find")]
    keywords: Vec<String>,

    /// Search file contents, not just names and paths
    #[arg(long)]
    contents: bool,

    /// Read binary files instead of skipping them
    #[arg(long)]
    read_binary: bool,

    /// Case-sensitive keyword matching
    #[arg(long)]
    case_sensitive: bool,

    /// Omit the rendered tree block
    #[arg(long)]
    no_tree: bool,

    /// Tree style
    #[arg(long, value_enum, default_value_t = Style::Unicode)]
    style: Style,

    /// Annotate directories with included file/subdirectory counts
    #[arg(long)]
    stats: bool,

    /// Prepend an approximate token count to the artifact
    #[arg(long)]
    tokens: bool,

    /// Count tokens excluding whitespace
    #[arg(long)]
    exclude_whitespace: bool,

    /// Worker pool size (default: available parallelism + 1)
    #[arg(long)]
    max_workers: Option<usize>,

    /// Binary detection strategy
    #[arg(long, default_value = "simple", value_parser = parse_binary_detection)]
    binary_detection: BinaryDetection,

    /// File size limit in bytes (larger files have content omitted)
    #[arg(long)]
    file_size_limit: Option<u64>,

    /// Max depth (unlimited if not set)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Include hidden files
    #[arg(long)]
    hidden: bool,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,

    /// Disable .gitignore handling
    #[arg(long)]
    no_gitignore: bool,

    /// Parse an existing artifact instead of scanning
    #[arg(long, value_name = "ARTIFACT")]
    deconstruct: Option<PathBuf>,

    /// Summary format
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    format: SummaryFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Style {
    Unicode,
    Ascii,
    Compact,
}

impl Style {
    fn preset(self) -> TreeStylePreset {
        match self {
            Style::Unicode => TreeStylePreset::Unicode,
            Style::Ascii => TreeStylePreset::Ascii,
            Style::Compact => TreeStylePreset::Compact,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SummaryFormat {
    Text,
    Json,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

fn parse_language_preset(s: &str) -> Result<LanguagePreset, String> {
    match s {
        "python" => Ok(LanguagePreset::Python),
        "javascript" | "js" => Ok(LanguagePreset::JavaScript),
        "web" => Ok(LanguagePreset::Web),
        "java" => Ok(LanguagePreset::Java),
        "rust" => Ok(LanguagePreset::Rust),
        "markup" => Ok(LanguagePreset::Markup),
        "config" | "configuration" => Ok(LanguagePreset::Configuration),
        _ => Err(format!("unknown language preset: {}", s)),
    }
}

fn parse_ignore_preset(s: &str) -> Result<IgnorePreset, String> {
    match s {
        "vcs" | "version-control" => Ok(IgnorePreset::VersionControl),
        "node" | "node-modules" => Ok(IgnorePreset::NodeModules),
        "python-env" => Ok(IgnorePreset::PythonEnv),
        "build" | "build-artifacts" => Ok(IgnorePreset::BuildArtifacts),
        "tests" | "test-files" => Ok(IgnorePreset::TestFiles),
        "ide" | "ide-metadata" => Ok(IgnorePreset::IdeMetadata),
        _ => Err(format!("unknown ignore preset: {}", s)),
    }
}

impl Cli {
    fn into_options(self) -> (SnapshotOptions, SummaryFormat, Option<PathBuf>) {
        let format = self.format;
        let deconstruct = self.deconstruct;
        let mut builder = SnapshotBuilder::new(self.root)
            .output(self.output)
            .file_types(self.file_types)
            .language_presets(self.language_presets)
            .ignore_presets(self.ignore_presets)
            .ignore_extensions(self.ignore_extensions)
            .ignore_path_components(self.ignore_path_components)
            .ignore_name_substrings(self.ignore_name_substrings)
            .require_name_substrings(self.require_name_substrings)
            .ignore_globs(self.ignore_globs)
            .keywords(self.keywords)
            .search_contents(self.contents)
            .read_binary(self.read_binary)
            .case_sensitive(self.case_sensitive)
            .generate_tree(!self.no_tree)
            .tree_style(self.style.preset())
            .show_stats(self.stats)
            .show_token_count(self.tokens)
            .exclude_whitespace(self.exclude_whitespace)
            .binary_detection(self.binary_detection)
            .file_size_limit(self.file_size_limit)
            .respect_gitignore(!self.no_gitignore)
            .include_hidden(self.hidden)
            .follow_links(self.follow_links);

        if let Some(workers) = self.max_workers {
            builder = builder.max_workers(workers);
        }
        if let Some(depth) = self.max_depth {
            builder = builder.max_depth(depth);
        }

        (builder.build(), format, deconstruct)
    }
}

fn main() {
    let cli = Cli::parse();
    let (options, format, deconstruct) = cli.into_options();

    if let Some(artifact) = deconstruct {
        run_deconstruct(&artifact, format);
        return;
    }

    match write_snapshot(&options) {
        Ok(summary) => print_summary(&options, &summary, format),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

fn run_deconstruct(artifact: &PathBuf, format: SummaryFormat) {
    match deconstruct_snapshot(artifact) {
        Ok(parsed) => match format {
            SummaryFormat::Json => {
                let json = serde_json::to_string_pretty(&parsed).unwrap_or_else(|e| {
                    eprintln!("JSON serialization error: {}", e);
                    exit(1);
                });
                println!("{}", json);
            }
            SummaryFormat::Text => {
                for path in &parsed.file_paths {
                    println!("{}", path);
                }
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

fn print_summary(options: &SnapshotOptions, summary: &RunSummary, format: SummaryFormat) {
    match format {
        SummaryFormat::Json => {
            let json = serde_json::to_string_pretty(summary).unwrap_or_else(|e| {
                eprintln!("JSON serialization error: {}", e);
                exit(1);
            });
            println!("{}", json);
        }
        SummaryFormat::Text => {
            println!(
                "Wrote {}: {} of {} files included, {} directories visited in {}ms",
                options.output.display(),
                summary.files_included,
                summary.files_discovered,
                summary.directories_visited,
                summary.elapsed.as_millis()
            );
            for warning in &summary.warnings {
                eprintln!("warning: {}", warning);
            }
            if summary.errors > 0 {
                eprintln!("warning: {} files could not be read", summary.errors);
            }
        }
    }
}
