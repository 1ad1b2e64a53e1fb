//! Builds a textual tree from the filtered, sorted relative path list.
//!
//! The tree is purely a view over paths the engine already selected; nothing
//! here touches the filesystem. Sibling order is lexicographic by name for
//! files and directories alike, matching the engine's path sort so rendering
//! and collation stay consistent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The characters used to draw tree branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStyle {
    /// Connector for a child with following siblings, e.g. `├── `.
    pub tee: String,
    /// Connector for the last child, e.g. `└── `.
    pub elbow: String,
    /// Vertical continuation under a non-last parent, e.g. `│   `.
    pub pipe: String,
    /// Blank continuation under a last parent.
    pub space: String,
}

impl TreeStyle {
    pub fn new(
        tee: impl Into<String>,
        elbow: impl Into<String>,
        pipe: impl Into<String>,
        space: impl Into<String>,
    ) -> Self {
        Self {
            tee: tee.into(),
            elbow: elbow.into(),
            pipe: pipe.into(),
            space: space.into(),
        }
    }
}

#[derive(Default)]
struct TreeNode {
    children: BTreeMap<String, TreeNode>,
    is_file: bool,
    files_below: usize,
    dirs_below: usize,
}

impl TreeNode {
    fn insert(&mut self, components: &[&str]) {
        let Some((first, rest)) = components.split_first() else {
            return;
        };
        let child = self.children.entry((*first).to_string()).or_default();
        if rest.is_empty() {
            child.is_file = true;
        } else {
            child.insert(rest);
        }
    }

    /// Bottom-up subtree totals used for the stats annotation.
    fn aggregate(&mut self) -> (usize, usize) {
        let mut files = 0;
        let mut dirs = 0;
        for child in self.children.values_mut() {
            if child.is_file {
                files += 1;
            } else {
                let (f, d) = child.aggregate();
                files += f;
                dirs += d + 1;
            }
        }
        self.files_below = files;
        self.dirs_below = dirs;
        (files, dirs)
    }
}

/// Renders the tree for a sorted list of relative paths (forward-slash form).
///
/// With `show_stats`, every directory line carries ` [Nf, Md]`: files and
/// subdirectories in its whole subtree, counted over the filtered list only.
/// Output for the same input is byte-identical across calls.
pub fn render_tree(
    root_label: &str,
    relative_paths: &[String],
    style: &TreeStyle,
    show_stats: bool,
) -> Vec<String> {
    let mut root = TreeNode::default();
    for path in relative_paths {
        let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
        root.insert(&components);
    }
    root.aggregate();

    let mut lines = Vec::new();
    lines.push(format_label(root_label, &root, show_stats));
    render_children(&root, style, show_stats, String::new(), &mut lines);
    lines
}

fn format_label(name: &str, node: &TreeNode, show_stats: bool) -> String {
    if show_stats && !node.is_file {
        format!("{name} [{}f, {}d]", node.files_below, node.dirs_below)
    } else {
        name.to_string()
    }
}

fn render_children(
    node: &TreeNode,
    style: &TreeStyle,
    show_stats: bool,
    prefix: String,
    lines: &mut Vec<String>,
) {
    let count = node.children.len();
    for (i, (name, child)) in node.children.iter().enumerate() {
        let is_last = i == count - 1;
        let connector = if is_last { &style.elbow } else { &style.tee };
        lines.push(format!(
            "{prefix}{connector}{}",
            format_label(name, child, show_stats)
        ));
        if !child.children.is_empty() {
            let extension = if is_last { &style.space } else { &style.pipe };
            render_children(child, style, show_stats, format!("{prefix}{extension}"), lines);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::TreeStylePreset;

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unicode_rendering_nests_and_orders() {
        let lines = render_tree(
            "project",
            &paths(&["src/a.py", "src/b.py", "tests/test_a.py"]),
            &TreeStylePreset::Unicode.style(),
            false,
        );
        assert_eq!(
            lines,
            vec![
                "project",
                "├── src",
                "│   ├── a.py",
                "│   └── b.py",
                "└── tests",
                "    └── test_a.py",
            ]
        );
    }

    #[test]
    fn styles_share_nesting_and_order() {
        let input = paths(&["a/b/c.txt", "a/d.txt", "e.txt"]);
        let unicode = render_tree("r", &input, &TreeStylePreset::Unicode.style(), false);
        let ascii = render_tree("r", &input, &TreeStylePreset::Ascii.style(), false);
        assert_eq!(unicode.len(), ascii.len());
        for (u, a) in unicode.iter().zip(&ascii) {
            assert_eq!(
                u.trim_start_matches(['├', '└', '│', '─', ' ']),
                a.trim_start_matches(['|', '+', '-', ' '])
            );
        }
    }

    #[test]
    fn stats_are_subtree_totals() {
        let lines = render_tree(
            "project",
            &paths(&["src/a.py", "src/sub/b.py", "tests/test_a.py"]),
            &TreeStylePreset::Unicode.style(),
            true,
        );
        assert_eq!(lines[0], "project [3f, 3d]");
        assert!(lines.contains(&"├── src [2f, 1d]".to_string()));
        assert!(lines.contains(&"└── tests [1f, 0d]".to_string()));
    }

    #[test]
    fn rendering_is_idempotent() {
        let input = paths(&["x/y.rs", "x/z.rs", "w.rs"]);
        let style = TreeStylePreset::Compact.style();
        let first = render_tree("root", &input, &style, true);
        let second = render_tree("root", &input, &style, true);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_path_list_renders_root_only() {
        let lines = render_tree("root", &[], &TreeStylePreset::Ascii.style(), false);
        assert_eq!(lines, vec!["root"]);
    }
}
