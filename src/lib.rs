//! renombra - batch renaming for project directory trees
//!
//! This library renames folders according to an external name mapping,
//! renames files according to a fixed-priority suffix taxonomy, and
//! materializes folder hierarchies described by nested JSON name trees.
//! Every attempted mutation is classified into an outcome record and
//! collected into a report; per-item failures never abort a batch.

pub mod cli;
pub mod config;
pub mod file_renamer;
pub mod folder_renamer;
pub mod mapping;
pub mod outcome;
pub mod output;
pub mod structure;
pub mod suffix;
pub mod table;

pub use config::{CompiledFilters, ConfigError, RenameConfig};
pub use file_renamer::FileRenamer;
pub use folder_renamer::FolderRenamer;
pub use mapping::{MappingError, NameMapping};
pub use outcome::{Outcome, OutcomeKind, ResultSet};
pub use structure::{FolderNode, StructureBuilder, StructureError};
pub use suffix::SuffixCatalog;
pub use table::{Table, TableError, detect_separator};

pub use cli::{Cli, Command, run};

/// Characters a target name may never contain; structure-node sanitization
/// replaces them with `_`, folder-mapping validation rejects them.
pub const FORBIDDEN_NAME_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
