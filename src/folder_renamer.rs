/// Folder rename engine.
///
/// Applies a [`NameMapping`] to the immediate subfolders of a root
/// directory. Mappings are processed longest old name first so a longer,
/// more specific old name is renamed before a shorter one that could
/// collide with it; each rename is independent and failures never abort
/// the remaining mappings.
use std::fs;
use std::path::Path;

use crate::FORBIDDEN_NAME_CHARS;
use crate::mapping::NameMapping;
use crate::outcome::{Outcome, OutcomeKind, ResultSet};

/// Renames mapped subfolders in place under a root directory.
pub struct FolderRenamer;

impl FolderRenamer {
    /// Applies the whole mapping, longest old name first.
    ///
    /// Returns one outcome per mapping entry; never fails as a whole.
    pub fn run(root: &Path, mapping: &NameMapping) -> ResultSet {
        let mut results = ResultSet::new();
        for (old, new) in mapping.sorted_by_old_len_desc() {
            results.record(Self::rename_one(root, old, new));
        }
        results
    }

    /// Attempts a single old -> new folder rename under the root.
    ///
    /// Safety checks, in order: blank target and root self-protection are
    /// skips, a forbidden character in the target or a missing source is an
    /// error, an existing destination is left untouched. Only then is the
    /// rename performed.
    pub fn rename_one(root: &Path, old: &str, new: &str) -> Outcome {
        if new.is_empty() {
            return Outcome::new(
                OutcomeKind::Skipped,
                format!("'{}' has a blank target name", old),
            );
        }

        let src = root.join(old);
        let dst = root.join(new);

        if Self::targets_root(root, &dst, new) {
            return Outcome::new(
                OutcomeKind::Skipped,
                format!("'{}' -> '{}' would overwrite the root directory", old, new),
            );
        }

        if new.contains(&FORBIDDEN_NAME_CHARS[..]) {
            return Outcome::new(
                OutcomeKind::Error,
                format!("invalid name '{}' (contains forbidden characters)", new),
            );
        }

        if !src.is_dir() {
            return Outcome::new(
                OutcomeKind::Error,
                format!("folder not found: '{}' (mapped to '{}')", old, new),
            );
        }

        if dst.exists() {
            return Outcome::renamed(OutcomeKind::AlreadyExists, old, new);
        }

        match fs::rename(&src, &dst) {
            Ok(()) => Outcome::renamed(OutcomeKind::Success, old, new),
            Err(e) => Outcome::new(OutcomeKind::Error, format!("{} -> {}: {}", old, new, e)),
        }
    }

    /// True when the destination resolves to the root directory itself,
    /// either by canonical path or by carrying the root's own name.
    fn targets_root(root: &Path, dst: &Path, new: &str) -> bool {
        if root.file_name().is_some_and(|n| n.to_string_lossy() == new) {
            return true;
        }
        match (dst.canonicalize(), root.canonicalize()) {
            (Ok(dst_canon), Ok(root_canon)) => dst_canon == root_canon,
            _ => false,
        }
    }
}
