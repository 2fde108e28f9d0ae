/// File rename engine.
///
/// Walks every project folder (immediate child directory of the root) and
/// renames each descendant file whose stem ends with a taxonomy suffix to
/// `<projectFolder><suffix><extension>`. The first catalog pattern that
/// matches wins; the catalog's construction order already ranks patterns
/// from most to least specific.
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CompiledFilters;
use crate::outcome::{Outcome, OutcomeKind, ResultSet};
use crate::suffix::SuffixCatalog;

/// Longest file name the engine will produce.
const MAX_FILE_NAME_LEN: usize = 255;

/// Renames files by suffix under the project folders of a root directory.
pub struct FileRenamer<'a> {
    catalog: &'a SuffixCatalog,
    filters: &'a CompiledFilters,
}

impl<'a> FileRenamer<'a> {
    /// Creates an engine over a suffix catalog and compiled file filters.
    pub fn new(catalog: &'a SuffixCatalog, filters: &'a CompiledFilters) -> Self {
        Self { catalog, filters }
    }

    /// Processes every project folder under the root.
    ///
    /// Fails only if the root itself cannot be listed; everything below
    /// that is recovered into outcomes. Project folders and files are
    /// visited in name order so reports are deterministic.
    pub fn run(&self, root: &Path) -> Result<ResultSet, std::io::Error> {
        let mut results = ResultSet::new();

        let mut projects: Vec<PathBuf> = fs::read_dir(root)?
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .map(|entry| entry.path())
            .collect();
        projects.sort();

        for project_path in projects {
            let project_name = project_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            self.visit(&project_name, &project_path, &mut results);
        }

        Ok(results)
    }

    /// Recursively visits one directory, files first, then subdirectories.
    fn visit(&self, project: &str, dir: &Path, results: &mut ResultSet) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                results.record(Outcome::new(
                    OutcomeKind::Error,
                    format!("cannot read directory '{}': {}", dir.display(), e),
                ));
                return;
            }
        };

        let mut files = Vec::new();
        let mut subdirs = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                subdirs.push(path);
            } else if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        subdirs.sort();

        for file in files {
            self.rename_file(project, &file, results);
        }
        for subdir in subdirs {
            self.visit(project, &subdir, results);
        }
    }

    /// Renames one file when its stem carries a recognized suffix.
    fn rename_file(&self, project: &str, path: &Path, results: &mut ResultSet) {
        if !self.filters.should_include(path) {
            return;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let Some(suffix) = self.catalog.match_stem(&stem) else {
            results.record(Outcome::new(
                OutcomeKind::NoSuffixMatched,
                format!("'{}' (no recognized suffix)", file_name),
            ));
            return;
        };

        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let new_name = format!("{}{}{}", project, suffix, extension);

        if new_name.chars().count() > MAX_FILE_NAME_LEN {
            results.record(Outcome::new(
                OutcomeKind::TooLong,
                format!("'{}' -> '{}' (name exceeds {} characters)", file_name, new_name, MAX_FILE_NAME_LEN),
            ));
            return;
        }

        let target = path.with_file_name(&new_name);
        if target.exists() {
            results.record(Outcome::renamed(OutcomeKind::AlreadyExists, &file_name, &new_name));
            return;
        }

        match fs::rename(path, &target) {
            Ok(()) => results.record(Outcome::renamed(OutcomeKind::Success, &file_name, &new_name)),
            Err(e) => results.record(Outcome::new(
                OutcomeKind::Error,
                format!("{} -> {}: {}", file_name, new_name, e),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn engine_parts() -> (SuffixCatalog, CompiledFilters) {
        (SuffixCatalog::new(), CompiledFilters::permissive())
    }

    #[test]
    fn test_renames_file_with_compound_suffix() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let project = root.join("Proyecto1");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("report_A_FAC.pdf"), "content").unwrap();

        let (catalog, filters) = engine_parts();
        let results = FileRenamer::new(&catalog, &filters).run(root).unwrap();

        assert_eq!(results.count(OutcomeKind::Success), 1);
        assert!(!project.join("report_A_FAC.pdf").exists());
        assert!(project.join("Proyecto1_A_FAC.pdf").is_file());
    }

    #[test]
    fn test_unrecognized_suffix_leaves_file_alone() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let project = root.join("Proyecto1");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("notes.txt"), "content").unwrap();

        let (catalog, filters) = engine_parts();
        let results = FileRenamer::new(&catalog, &filters).run(root).unwrap();

        assert_eq!(results.count(OutcomeKind::NoSuffixMatched), 1);
        assert_eq!(results.count(OutcomeKind::Success), 0);
        assert!(project.join("notes.txt").is_file());
    }

    #[test]
    fn test_nested_files_use_project_folder_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let nested = root.join("Proyecto1").join("anexos").join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("scan_CROQUIS.png"), "content").unwrap();

        let (catalog, filters) = engine_parts();
        let results = FileRenamer::new(&catalog, &filters).run(root).unwrap();

        assert_eq!(results.count(OutcomeKind::Success), 1);
        // Renamed in place, named after the project folder, not the parent.
        assert!(nested.join("Proyecto1_CROQUIS.png").is_file());
    }

    #[test]
    fn test_existing_target_is_not_overwritten() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let project = root.join("Proyecto1");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("a_FAC.pdf"), "source").unwrap();
        fs::write(project.join("Proyecto1_FAC.pdf"), "existing").unwrap();

        let (catalog, filters) = engine_parts();
        let results = FileRenamer::new(&catalog, &filters).run(root).unwrap();

        // The source would collide with the existing target; the target
        // itself is already correctly named, so it reports AlreadyExists too.
        assert_eq!(results.count(OutcomeKind::AlreadyExists), 2);
        assert!(project.join("a_FAC.pdf").is_file());
        assert_eq!(
            fs::read_to_string(project.join("Proyecto1_FAC.pdf")).unwrap(),
            "existing"
        );
    }

    #[test]
    fn test_too_long_target_name_is_skipped() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let project = root.join("P".repeat(250));
        fs::create_dir(&project).unwrap();
        fs::write(project.join("x_FAC.pdf"), "content").unwrap();

        let (catalog, filters) = engine_parts();
        let results = FileRenamer::new(&catalog, &filters).run(root).unwrap();

        assert_eq!(results.count(OutcomeKind::TooLong), 1);
        assert!(project.join("x_FAC.pdf").is_file());
    }

    #[test]
    fn test_extension_is_preserved_and_optional() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let project = root.join("Lote3");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("plano_AD"), "no extension").unwrap();

        let (catalog, filters) = engine_parts();
        let results = FileRenamer::new(&catalog, &filters).run(root).unwrap();

        assert_eq!(results.count(OutcomeKind::Success), 1);
        assert!(project.join("Lote3_AD").is_file());
    }

    #[test]
    fn test_files_directly_under_root_are_ignored() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("loose_FAC.pdf"), "content").unwrap();

        let (catalog, filters) = engine_parts();
        let results = FileRenamer::new(&catalog, &filters).run(root).unwrap();

        // Only files under project folders are candidates.
        assert!(results.is_empty());
        assert!(root.join("loose_FAC.pdf").is_file());
    }

    #[test]
    fn test_filtered_files_are_not_visited() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        let project = root.join("Proyecto1");
        fs::create_dir(&project).unwrap();
        fs::write(project.join(".hidden_FAC.pdf"), "content").unwrap();

        let (catalog, filters) = engine_parts();
        let results = FileRenamer::new(&catalog, &filters).run(root).unwrap();

        assert!(results.is_empty());
        assert!(project.join(".hidden_FAC.pdf").is_file());
    }
}
