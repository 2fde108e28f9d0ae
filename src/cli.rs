//! Command-line interface module.
//!
//! Defines the clap command surface and orchestrates the engines:
//! - `rename` runs the two-phase pipeline (all folder renames first, then
//!   all file renames against the final folder names)
//! - `structure` materializes a JSON folder tree, optionally once per
//!   generated root name
//! - `inventory` writes a delimited listing of the root's subfolders as
//!   scaffolding for a future mapping

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::RenameConfig;
use crate::file_renamer::FileRenamer;
use crate::folder_renamer::FolderRenamer;
use crate::mapping::NameMapping;
use crate::outcome::ResultSet;
use crate::output::OutputFormatter;
use crate::structure::{FolderNode, StructureBuilder, numbered_roots, roots_from_table};
use crate::table::Table;

/// Batch renamer for project directory trees.
#[derive(Parser, Debug)]
#[command(name = "renombra", version, about)]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// The operation to perform.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rename mapped folders and/or suffix-tagged files under a root.
    Rename {
        /// Root directory containing the project folders.
        root: PathBuf,

        /// Delimited mapping file with old and new folder names.
        #[arg(long, value_name = "FILE")]
        mapping: Option<PathBuf>,

        /// Header of the column holding the current names.
        #[arg(long, default_value = "nombre_actual")]
        old_column: String,

        /// Header of the column holding the new names.
        #[arg(long, default_value = "nombre_nuevo")]
        new_column: String,

        /// Rename folders from the mapping.
        #[arg(long)]
        folders: bool,

        /// Rename files by suffix under the project folders.
        #[arg(long)]
        files: bool,
    },

    /// Create a folder hierarchy from a JSON structure specification.
    Structure {
        /// Directory the hierarchy is created under.
        target: PathBuf,

        /// JSON structure specification file.
        spec: PathBuf,

        /// Base name for numbered sibling roots (base_1, base_2, ...).
        #[arg(long, requires = "count")]
        base: Option<String>,

        /// How many numbered roots to create.
        #[arg(long, requires = "base")]
        count: Option<usize>,

        /// Tabular file whose first column lists root names.
        #[arg(long, value_name = "FILE", conflicts_with_all = ["base", "count"])]
        names: Option<PathBuf>,
    },

    /// Write a delimited inventory of the root's subfolders.
    Inventory {
        /// Root directory to list.
        root: PathBuf,

        /// Output file name, created inside the root.
        #[arg(long, default_value = "subcarpetas.csv")]
        output: String,
    },
}

/// Runs the parsed command. Returns a user-facing error message on fatal,
/// pre-mutation failures; per-item failures end up in the printed report.
pub fn run(cli: Cli) -> Result<(), String> {
    let config = RenameConfig::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    match cli.command {
        Command::Rename {
            root,
            mapping,
            old_column,
            new_column,
            folders,
            files,
        } => run_rename(&config, &root, mapping.as_deref(), &old_column, &new_column, folders, files),
        Command::Structure {
            target,
            spec,
            base,
            count,
            names,
        } => run_structure(&config, &target, &spec, base.as_deref(), count, names.as_deref()),
        Command::Inventory { root, output } => run_inventory(&root, &output),
    }
}

fn run_rename(
    config: &RenameConfig,
    root: &Path,
    mapping_path: Option<&Path>,
    old_column: &str,
    new_column: &str,
    folders: bool,
    files: bool,
) -> Result<(), String> {
    if !folders && !files {
        return Err("select at least one of --folders or --files".to_string());
    }
    if !root.is_dir() {
        return Err(format!("root directory not found: {}", root.display()));
    }

    let mut results = ResultSet::new();

    // Phase 1: folder renames, so file names derive from final folder names.
    if folders {
        let mapping_path =
            mapping_path.ok_or_else(|| "--mapping is required to rename folders".to_string())?;
        let table = Table::from_path(mapping_path, 2).map_err(|e| e.to_string())?;
        let mapping =
            NameMapping::from_table(&table, old_column, new_column).map_err(|e| e.to_string())?;

        for warning in mapping.warnings() {
            OutputFormatter::warning(warning);
        }
        OutputFormatter::info(&format!(
            "Renaming {} mapped folder(s) under {}",
            mapping.len(),
            root.display()
        ));

        let pb = OutputFormatter::create_progress_bar(mapping.len() as u64);
        for (old, new) in mapping.sorted_by_old_len_desc() {
            results.record(FolderRenamer::rename_one(root, old, new));
            pb.inc(1);
        }
        pb.finish_and_clear();
    }

    // Phase 2: file renames against the now-final folder names.
    if files {
        let catalog = config.suffix_catalog();
        let filters = config.compile_filters().map_err(|e| e.to_string())?;

        OutputFormatter::info(&format!(
            "Renaming suffix-tagged files under {}",
            root.display()
        ));
        let file_results = FileRenamer::new(&catalog, &filters)
            .run(root)
            .map_err(|e| format!("cannot read {}: {}", root.display(), e))?;
        results.merge(file_results);
    }

    finish(config, root, &results);
    Ok(())
}

fn run_structure(
    config: &RenameConfig,
    target: &Path,
    spec_path: &Path,
    base: Option<&str>,
    count: Option<usize>,
    names_path: Option<&Path>,
) -> Result<(), String> {
    if !target.is_dir() {
        return Err(format!("target directory not found: {}", target.display()));
    }

    let spec_text = fs::read_to_string(spec_path)
        .map_err(|e| format!("cannot read {}: {}", spec_path.display(), e))?;
    let nodes = FolderNode::parse_spec(&spec_text).map_err(|e| e.to_string())?;

    let builder = StructureBuilder::new();
    let results = if let (Some(base), Some(count)) = (base, count) {
        builder.build_multi(target, &numbered_roots(base, count), &nodes)
    } else if let Some(names_path) = names_path {
        let table = Table::from_path(names_path, 1).map_err(|e| e.to_string())?;
        let roots = roots_from_table(&table);
        if roots.is_empty() {
            return Err(format!(
                "no usable root names in {}",
                names_path.display()
            ));
        }
        builder.build_multi(target, &roots, &nodes)
    } else {
        builder.build(target, &nodes)
    };

    finish(config, target, &results);
    Ok(())
}

fn run_inventory(root: &Path, output: &str) -> Result<(), String> {
    if !root.is_dir() {
        return Err(format!("root directory not found: {}", root.display()));
    }

    let entries = fs::read_dir(root).map_err(|e| format!("cannot read {}: {}", root.display(), e))?;
    let mut names: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();

    let mut content = String::from("nombre_actual\n");
    for name in &names {
        content.push_str(name);
        content.push('\n');
    }

    let output_path = root.join(output);
    fs::write(&output_path, content)
        .map_err(|e| format!("cannot write {}: {}", output_path.display(), e))?;

    OutputFormatter::success(&format!(
        "inventory of {} folder(s) written to {}",
        names.len(),
        output_path.display()
    ));
    Ok(())
}

/// Prints the report and, when configured, appends it to the run log.
fn finish(config: &RenameConfig, root: &Path, results: &ResultSet) {
    OutputFormatter::print_report(results, config.report.max_entries_per_section);

    if config.report.write_log {
        let report = results.render(config.report.max_entries_per_section);
        if let Err(e) = OutputFormatter::write_run_log(root, &report) {
            OutputFormatter::warning(&format!("could not write run log: {}", e));
        }
    }
}
