//! Folder structure model, parser and builder.
//!
//! A structure specification is a JSON array describing a desired directory
//! layout, independent of any physical path. Each element is either an
//! object carrying a name (under one of several accepted key aliases) and
//! an optional child array, or a bare string standing for a leaf folder.
//! The parse validates everything up front — an invalid specification never
//! results in a partially created tree.

use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::outcome::{Outcome, OutcomeKind, ResultSet};
use crate::table::Table;

/// Accepted keys for a node's name, first alias present wins.
const NAME_ALIASES: [&str; 4] = ["name", "nombre", "folder", "carpeta"];

/// Accepted keys for a node's child list, first alias present wins.
const CHILD_ALIASES: [&str; 3] = ["children", "subcarpetas", "hijos"];

/// Errors raised while parsing a structure specification. Fatal,
/// pre-mutation: nothing is created when the parse fails.
#[derive(Debug)]
pub enum StructureError {
    /// The text is not valid JSON.
    Parse(String),
    /// The JSON is valid but not an array of nodes, or a node is neither
    /// an object nor a string, or an object carries no name alias.
    InvalidStructure(String),
    /// A node name is empty after trimming.
    EmptyName,
    /// Two sibling names collide case-insensitively.
    DuplicateName(String),
}

impl std::fmt::Display for StructureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureError::Parse(msg) => write!(f, "cannot parse structure: {}", msg),
            StructureError::InvalidStructure(msg) => write!(f, "invalid structure: {}", msg),
            StructureError::EmptyName => write!(f, "a folder name is empty"),
            StructureError::DuplicateName(name) => {
                write!(f, "duplicate folder name at the same level: '{}'", name)
            }
        }
    }
}

impl std::error::Error for StructureError {}

/// A desired folder with an ordered list of children.
///
/// Immutable once parsed; names are trimmed and guaranteed non-empty and
/// unique (case-insensitively) among siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    /// The folder's name, as written in the specification.
    pub name: String,
    /// Subfolders, in specification order.
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Creates a leaf node.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Parses a JSON structure specification into a list of root nodes.
    pub fn parse_spec(text: &str) -> Result<Vec<FolderNode>, StructureError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| StructureError::Parse(e.to_string()))?;
        let array = value
            .as_array()
            .ok_or_else(|| StructureError::InvalidStructure("expected a top-level array".into()))?;
        Self::parse_level(array)
    }

    fn parse_level(array: &[Value]) -> Result<Vec<FolderNode>, StructureError> {
        let mut names_in_level = std::collections::HashSet::new();
        let mut nodes = Vec::new();

        for element in array {
            let node = match element {
                Value::String(name) => FolderNode::leaf(name.trim()),
                Value::Object(object) => {
                    let name = NAME_ALIASES
                        .iter()
                        .find_map(|alias| object.get(*alias))
                        .and_then(Value::as_str)
                        .ok_or_else(|| {
                            StructureError::InvalidStructure(
                                "node object has no name field".into(),
                            )
                        })?;

                    let children = match CHILD_ALIASES
                        .iter()
                        .find_map(|alias| object.get(*alias))
                    {
                        Some(Value::Array(child_array)) => Self::parse_level(child_array)?,
                        Some(_) => {
                            return Err(StructureError::InvalidStructure(
                                "child list must be an array".into(),
                            ));
                        }
                        None => Vec::new(),
                    };

                    FolderNode {
                        name: name.trim().to_string(),
                        children,
                    }
                }
                _ => {
                    return Err(StructureError::InvalidStructure(
                        "node must be an object or a string".into(),
                    ));
                }
            };

            if node.name.is_empty() {
                return Err(StructureError::EmptyName);
            }
            if !names_in_level.insert(node.name.to_lowercase()) {
                return Err(StructureError::DuplicateName(node.name));
            }
            nodes.push(node);
        }

        Ok(nodes)
    }
}

/// Materializes [`FolderNode`] trees as directories on disk.
///
/// Creation is idempotent (already-existing directories are not an error)
/// and per-node failures never stop siblings or already-reached subtrees.
pub struct StructureBuilder {
    sanitizer: Regex,
}

impl StructureBuilder {
    /// Creates a builder with the forbidden-character sanitizer compiled.
    pub fn new() -> Self {
        Self {
            sanitizer: Regex::new(r#"[<>:"/\\|?*]"#).expect("sanitizer pattern is valid"),
        }
    }

    /// Replaces forbidden characters with `_` and trims whitespace.
    pub fn sanitize(&self, name: &str) -> String {
        self.sanitizer.replace_all(name, "_").trim().to_string()
    }

    /// Creates the directory tree for the given nodes under a root.
    ///
    /// Returns one outcome per node; the root itself must already exist.
    pub fn build(&self, root: &Path, nodes: &[FolderNode]) -> ResultSet {
        let mut results = ResultSet::new();
        self.build_level(root, nodes, &mut results);
        results
    }

    fn build_level(&self, root: &Path, nodes: &[FolderNode], results: &mut ResultSet) {
        for node in nodes {
            let folder = root.join(self.sanitize(&node.name));

            match fs::create_dir_all(&folder) {
                Ok(()) => {
                    results.record(Outcome::new(
                        OutcomeKind::Success,
                        format!("created '{}'", folder.display()),
                    ));
                }
                Err(e) => {
                    results.record(Outcome::new(
                        OutcomeKind::Error,
                        format!("cannot create '{}': {}", folder.display(), e),
                    ));
                }
            }

            if !node.children.is_empty() {
                self.build_level(&folder, &node.children, results);
            }
        }
    }

    /// Creates the same tree once per root name under a target directory.
    ///
    /// Root names are sanitized like any node name and each root is created
    /// before its subtree.
    pub fn build_multi(&self, target: &Path, root_names: &[String], nodes: &[FolderNode]) -> ResultSet {
        let roots: Vec<FolderNode> = root_names
            .iter()
            .map(|name| FolderNode {
                name: name.clone(),
                children: nodes.to_vec(),
            })
            .collect();
        self.build(target, &roots)
    }
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Root names from a numbered pattern: `base_1`, `base_2`, ...
pub fn numbered_roots(base: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{}_{}", base, i)).collect()
}

/// Root names from the first column of a tabular source.
///
/// Values are trimmed; blank names and case-insensitive duplicates are
/// dropped, keeping first occurrences in source order.
pub fn roots_from_table(table: &Table) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut names = Vec::new();
    for row in table.rows() {
        let Some(raw) = row.first() else { continue };
        let name = raw.trim();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.to_lowercase()) {
            names.push(name.to_string());
        }
    }
    names
}
