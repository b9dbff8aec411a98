//! Nested directory view of a flat tree listing, rendered as an ASCII tree:
//!
//! ```text
//! ├── a/
//! │   ├── b.py
//! │   └── c.py
//! └── d.md
//! ```
//!
//! Children sort by name at every level, files and directories mixed. There is
//! no root label.

use std::collections::BTreeMap;

use crate::github::{EntryKind, TreeEntry};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const CONTINUATION: &str = "│   ";
const BLANK: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryNode {
    /// Children keyed by name; `BTreeMap` keeps them in render order.
    Directory(BTreeMap<String, DirectoryNode>),
    File(TreeEntry),
}

impl DirectoryNode {
    pub fn empty_directory() -> Self {
        DirectoryNode::Directory(BTreeMap::new())
    }

    pub fn children(&self) -> Option<&BTreeMap<String, DirectoryNode>> {
        match self {
            DirectoryNode::Directory(children) => Some(children),
            DirectoryNode::File(_) => None,
        }
    }

    /// Looks up a node by slash-separated path relative to this one.
    pub fn get(&self, path: &str) -> Option<&DirectoryNode> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| node.children()?.get(segment))
    }
}

/// Builds the hierarchy: every segment but the last becomes (or reuses) a
/// directory, the last binds the entry itself. Submodules are left out.
pub fn build_directory_tree(entries: &[TreeEntry]) -> DirectoryNode {
    let mut root = BTreeMap::new();

    'entries: for entry in entries {
        // Submodule pins are not part of the drawn tree.
        if entry.kind == EntryKind::Submodule {
            continue;
        }
        let segments: Vec<&str> = entry.path.split('/').collect();
        let Some((&leaf, parents)) = segments.split_last() else {
            continue;
        };
        if leaf.is_empty() {
            continue;
        }

        let mut current = &mut root;
        for &segment in parents {
            let node = current
                .entry(segment.to_string())
                .or_insert_with(DirectoryNode::empty_directory);
            current = match node {
                DirectoryNode::Directory(children) => children,
                // A file cannot contain anything; the listing is inconsistent.
                DirectoryNode::File(_) => continue 'entries,
            };
        }

        match entry.kind {
            EntryKind::Directory => {
                current
                    .entry(leaf.to_string())
                    .or_insert_with(DirectoryNode::empty_directory);
            }
            EntryKind::File => {
                current.insert(leaf.to_string(), DirectoryNode::File(entry.clone()));
            }
            EntryKind::Submodule => {}
        }
    }

    DirectoryNode::Directory(root)
}

/// Renders `node`'s children, newline-joined.
pub fn render_directory_tree(node: &DirectoryNode) -> String {
    let mut lines = Vec::new();
    if let Some(children) = node.children() {
        render_children(children, "", &mut lines);
    }
    lines.join("\n")
}

fn render_children(
    children: &BTreeMap<String, DirectoryNode>,
    prefix: &str,
    lines: &mut Vec<String>,
) {
    let last_index = children.len().saturating_sub(1);
    for (index, (name, node)) in children.iter().enumerate() {
        let is_last = index == last_index;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        match node {
            DirectoryNode::Directory(grandchildren) => {
                lines.push(format!("{prefix}{connector}{name}/"));
                let extension = if is_last { BLANK } else { CONTINUATION };
                render_children(grandchildren, &format!("{prefix}{extension}"), lines);
            }
            DirectoryNode::File(_) => lines.push(format!("{prefix}{connector}{name}")),
        }
    }
}

/// Convenience for the common case: listing in, rendered tree out.
pub fn directory_structure(entries: &[TreeEntry]) -> String {
    render_directory_tree(&build_directory_tree(entries))
}
