//! TOML configuration for the rename engines.
//!
//! Configuration extends the suffix taxonomy, excludes files from the
//! file-rename walk, and tunes reporting. Everything has a sensible
//! default; a missing configuration file is not an error.
//!
//! # Configuration File Format
//!
//! ```toml
//! [suffixes]
//! extra_letter_stems = ["_PLN"]
//! extra_plain = ["_BORRADOR"]
//!
//! [filters]
//! skip_hidden = true
//!
//! [filters.exclude]
//! filenames = ["Thumbs.db"]
//! patterns = ["*.tmp"]
//! extensions = ["bak"]
//! regex = []
//!
//! [filters.include]
//! patterns = []
//!
//! [report]
//! max_entries_per_section = 50
//! write_log = true
//! ```

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::suffix::SuffixCatalog;

/// Errors that can occur during configuration loading and filter compilation.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the explicitly given path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// Invalid regex pattern provided with the actual error reason.
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenameConfig {
    /// Extensions to the suffix taxonomy.
    #[serde(default)]
    pub suffixes: SuffixRules,

    /// Rules deciding which files the file-rename walk visits.
    #[serde(default)]
    pub filters: FilterRules,

    /// Report rendering and logging options.
    #[serde(default)]
    pub report: ReportRules,
}

/// Additional suffix patterns merged into the built-in taxonomy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuffixRules {
    /// Extra letter-qualified stems; each generates 26 compound patterns.
    #[serde(default)]
    pub extra_letter_stems: Vec<String>,

    /// Extra plain suffixes, merged into the length-sorted plain section.
    #[serde(default)]
    pub extra_plain: Vec<String>,
}

/// Rules deciding which files are considered for renaming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRules {
    /// Whether to skip hidden files (starting with "."). Defaults to true.
    #[serde(default = "default_skip_hidden")]
    pub skip_hidden: bool,

    /// Rules for excluding files.
    #[serde(default)]
    pub exclude: ExcludeRules,

    /// Rules for including files (whitelist, overrides exclude rules).
    #[serde(default)]
    pub include: IncludeRules,
}

fn default_skip_hidden() -> bool {
    true
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            skip_hidden: true,
            exclude: ExcludeRules::default(),
            include: IncludeRules::default(),
        }
    }
}

/// Rules for excluding files from the rename walk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames to exclude (e.g., "Thumbs.db").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns to exclude (e.g., "*.tmp").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// File extensions to exclude (e.g., "bak", "log").
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Regex patterns matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

/// Rules for including files, overriding exclude rules (whitelist).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncludeRules {
    /// Glob patterns that override exclude rules.
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Report rendering and run-log options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRules {
    /// Per-section entry cap in the rendered report; unset lists everything.
    #[serde(default)]
    pub max_entries_per_section: Option<usize>,

    /// Whether to append the report to the run log in the root directory.
    #[serde(default = "default_write_log")]
    pub write_log: bool,
}

fn default_write_log() -> bool {
    true
}

impl Default for ReportRules {
    fn default() -> Self {
        Self {
            max_entries_per_section: None,
            write_log: true,
        }
    }
}

impl RenameConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.renombrarc.toml` in the current directory
    /// 3. Look for `~/.config/renombra/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".renombrarc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("renombra")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Builds the suffix catalog with the configured extras applied.
    pub fn suffix_catalog(&self) -> SuffixCatalog {
        SuffixCatalog::with_extras(&self.suffixes.extra_letter_stems, &self.suffixes.extra_plain)
    }

    /// Compile the filter rules into optimized matching structures.
    ///
    /// # Errors
    ///
    /// Returns an error if any regex or glob patterns are invalid.
    pub fn compile_filters(&self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(self.filters.clone())
    }
}

/// Compiled, optimized filter structures for efficient file matching.
///
/// Glob and regex patterns are parsed once here so per-file matching never
/// reparses them.
#[derive(Debug)]
pub struct CompiledFilters {
    skip_hidden: bool,
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
    include_patterns: Vec<Pattern>,
}

impl CompiledFilters {
    fn new(rules: FilterRules) -> Result<Self, ConfigError> {
        let exclude_patterns = rules
            .exclude
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let include_patterns = rules
            .include
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let exclude_regexes = rules
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            skip_hidden: rules.skip_hidden,
            exclude_filenames: rules.exclude.filenames.into_iter().collect(),
            exclude_extensions: rules
                .exclude
                .extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            exclude_patterns,
            exclude_regexes,
            include_patterns,
        })
    }

    /// Filters with no exclusion rules beyond skipping hidden files.
    pub fn permissive() -> Self {
        Self {
            skip_hidden: true,
            exclude_filenames: HashSet::new(),
            exclude_extensions: HashSet::new(),
            exclude_patterns: Vec::new(),
            exclude_regexes: Vec::new(),
            include_patterns: Vec::new(),
        }
    }

    /// Check if a file should be visited by the rename walk.
    ///
    /// Checks are performed in this order, with early termination:
    /// 1. Include patterns (whitelist) - if matched, always include
    /// 2. Hidden file filter - if hidden and skipping enabled, exclude
    /// 3. Exact filename match - if matched, exclude
    /// 4. File extension match - if matched, exclude
    /// 5. Glob pattern match - if matched, exclude
    /// 6. Regex pattern match - if matched, exclude
    /// 7. Default: include
    pub fn should_include(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self
            .include_patterns
            .iter()
            .any(|pattern| pattern.matches_path(file_path))
        {
            return true;
        }

        if self.skip_hidden && file_name.starts_with('.') {
            return false;
        }

        if self.exclude_filenames.contains(file_name.as_ref()) {
            return false;
        }

        if let Some(ext) = file_path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            if self.exclude_extensions.contains(&ext_lower) {
                return false;
            }
        }

        if self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.matches_path(file_path))
        {
            return false;
        }

        if self
            .exclude_regexes
            .iter()
            .any(|regex| regex.is_match(&file_name))
        {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_skips_hidden_files() {
        let config = RenameConfig::default();
        assert!(config.filters.skip_hidden);
        assert!(config.report.write_log);
        assert!(config.report.max_entries_per_section.is_none());
    }

    #[test]
    fn test_permissive_filters_skip_hidden_only() {
        let filters = CompiledFilters::permissive();
        assert!(filters.should_include(Path::new("report_A_FAC.pdf")));
        assert!(!filters.should_include(Path::new(".DS_Store")));
    }

    #[test]
    fn test_exclude_exact_filename() {
        let config = RenameConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    filenames: vec!["Thumbs.db".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };
        let filters = config.compile_filters().unwrap();

        assert!(!filters.should_include(Path::new("Thumbs.db")));
        assert!(filters.should_include(Path::new("image.jpg")));
    }

    #[test]
    fn test_exclude_extensions_case_insensitive() {
        let config = RenameConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    extensions: vec!["bak".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };
        let filters = config.compile_filters().unwrap();

        assert!(!filters.should_include(Path::new("file.bak")));
        assert!(!filters.should_include(Path::new("file.BAK")));
        assert!(filters.should_include(Path::new("file.txt")));
    }

    #[test]
    fn test_exclude_glob_patterns() {
        let config = RenameConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    patterns: vec!["*.tmp".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };
        let filters = config.compile_filters().unwrap();

        assert!(!filters.should_include(Path::new("draft.tmp")));
        assert!(filters.should_include(Path::new("draft.pdf")));
    }

    #[test]
    fn test_include_overrides_exclude() {
        let config = RenameConfig {
            filters: FilterRules {
                skip_hidden: true,
                exclude: ExcludeRules::default(),
                include: IncludeRules {
                    patterns: vec![".important".to_string()],
                },
            },
            ..Default::default()
        };
        let filters = config.compile_filters().unwrap();

        assert!(filters.should_include(Path::new(".important")));
        assert!(!filters.should_include(Path::new(".other")));
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let config = RenameConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    regex: vec!["[unclosed".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.compile_filters(),
            Err(ConfigError::InvalidRegexPattern { .. })
        ));
    }

    #[test]
    fn test_parse_toml_config() {
        let toml_text = r#"
            [suffixes]
            extra_plain = ["_BORRADOR"]

            [filters]
            skip_hidden = false

            [report]
            max_entries_per_section = 10
        "#;
        let config: RenameConfig = toml::from_str(toml_text).unwrap();

        assert_eq!(config.suffixes.extra_plain, vec!["_BORRADOR"]);
        assert!(!config.filters.skip_hidden);
        assert_eq!(config.report.max_entries_per_section, Some(10));

        let catalog = config.suffix_catalog();
        assert_eq!(catalog.match_stem("x_BORRADOR"), Some("_BORRADOR"));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let result = RenameConfig::load(Some(Path::new("/no/such/config.toml")));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }
}
