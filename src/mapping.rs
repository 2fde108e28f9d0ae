//! Old-name to new-name mapping built from a tabular source.
//!
//! The mapping is constructed fresh before each folder-rename pass from two
//! caller-chosen header columns and discarded afterwards. Later rows
//! overwrite earlier ones for the same old name; rows too short to carry
//! both columns are skipped with a warning instead of failing the build.

use std::collections::HashMap;

use crate::table::Table;

/// Errors raised while building a name mapping. Fatal, pre-mutation.
#[derive(Debug)]
pub enum MappingError {
    /// One of the requested header names does not exist in the table.
    ColumnNotFound(String),
}

impl std::fmt::Display for MappingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingError::ColumnNotFound(name) => {
                write!(f, "column '{}' not found in the tabular source", name)
            }
        }
    }
}

impl std::error::Error for MappingError {}

/// A set of (old name, new name) pairs with unique old names.
#[derive(Debug, Clone)]
pub struct NameMapping {
    entries: HashMap<String, String>,
    warnings: Vec<String>,
}

impl NameMapping {
    /// Builds the mapping from two named columns of a table.
    ///
    /// Fields are trimmed. Rows with a blank old name are dropped, and rows
    /// with fewer fields than the required column indices are skipped with a
    /// warning recorded on the mapping. Duplicate old names: last row wins.
    pub fn from_table(
        table: &Table,
        old_column: &str,
        new_column: &str,
    ) -> Result<Self, MappingError> {
        let old_idx = table
            .column_index(old_column)
            .ok_or_else(|| MappingError::ColumnNotFound(old_column.to_string()))?;
        let new_idx = table
            .column_index(new_column)
            .ok_or_else(|| MappingError::ColumnNotFound(new_column.to_string()))?;

        let needed = old_idx.max(new_idx);
        let mut entries = HashMap::new();
        let mut warnings = Vec::new();

        for (row_number, row) in table.rows().iter().enumerate() {
            if row.len() <= needed {
                warnings.push(format!(
                    "row {} has {} field(s), {} required; skipped",
                    row_number + 2,
                    row.len(),
                    needed + 1
                ));
                continue;
            }

            let old = row[old_idx].trim();
            if old.is_empty() {
                continue;
            }
            entries.insert(old.to_string(), row[new_idx].trim().to_string());
        }

        Ok(Self { entries, warnings })
    }

    /// Looks up the new name for an old name.
    pub fn get(&self, old: &str) -> Option<&str> {
        self.entries.get(old).map(String::as_str)
    }

    /// Number of mapped names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no names are mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Warnings collected while building (short rows), in source order.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Entries sorted by old-name length, longest first.
    ///
    /// The folder rename engine must process longer old names before
    /// shorter ones that could be a prefix of them, so an already-applied
    /// rename can never be picked up a second time by a shorter mapping.
    /// Ties break alphabetically to keep the order deterministic.
    pub fn sorted_by_old_len_desc(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(old, new)| (old.as_str(), new.as_str()))
            .collect();
        pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
        pairs
    }
}
