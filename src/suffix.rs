/// Suffix taxonomy used by the file rename engine.
///
/// The catalog is a single ordered, deduplicated list of filename-ending
/// patterns. Compound letter-qualified patterns (`_A_FAC`, `_B_FAC`, ...)
/// come first in letter-major order, followed by the plain patterns sorted
/// by descending length. Matching is strictly "first pattern in catalog
/// order that is a suffix of the stem wins" — the order itself encodes
/// precedence, so a stem ending in both `_A_FAC` and `_FAC` resolves to
/// `_A_FAC` without any longest-match machinery.
use std::collections::HashSet;

/// Stems that are qualified with a letter to form compound patterns.
const LETTER_STEMS: [&str; 9] = [
    "_FAC", "_ACA", "_EST", "_COC", "_BAN", "_NC", "_SIN_BAN", "_SIN_COC", "_CER",
];

/// Plain patterns, matched after every compound pattern.
const PLAIN_SUFFIXES: [&str; 19] = [
    "_AD", "_EP", "_SJ", "_DP", "_DI", "_FAC", "_ACA", "_EST", "_COC", "_BAN", "_SIN_BAN",
    "_SIN_COC", "_CER", "_LOTE", "_CROQUIS", "_ANEXO", "_PRI", "_OTRO", "_NC",
];

/// The ordered list of recognized filename suffixes.
///
/// Built once per run and reused; construction is a pure function of the
/// two fixed pattern sets plus any configured extras.
#[derive(Debug, Clone)]
pub struct SuffixCatalog {
    patterns: Vec<String>,
}

impl SuffixCatalog {
    /// Builds the catalog from the built-in pattern sets.
    pub fn new() -> Self {
        Self::with_extras(&[], &[])
    }

    /// Builds the catalog with extra stems and plain patterns merged in.
    ///
    /// Extra letter stems participate in compound generation exactly like
    /// the built-in ones; extra plain patterns join the length-sorted plain
    /// section. Duplicates keep their first position.
    pub fn with_extras(extra_stems: &[String], extra_plain: &[String]) -> Self {
        let stems: Vec<&str> = LETTER_STEMS
            .iter()
            .copied()
            .chain(extra_stems.iter().map(String::as_str))
            .collect();

        let mut patterns = Vec::new();
        for letter in 'A'..='Z' {
            for stem in &stems {
                patterns.push(format!("_{}{}", letter, stem));
            }
        }

        let mut plain: Vec<&str> = PLAIN_SUFFIXES
            .iter()
            .copied()
            .chain(extra_plain.iter().map(String::as_str))
            .collect();
        // Stable sort: longer patterns first, equal lengths keep list order.
        plain.sort_by_key(|p| std::cmp::Reverse(p.len()));
        patterns.extend(plain.into_iter().map(String::from));

        let mut seen = HashSet::new();
        patterns.retain(|p| seen.insert(p.clone()));

        Self { patterns }
    }

    /// Returns the first pattern that is a suffix of the given stem.
    ///
    /// # Examples
    ///
    /// ```
    /// use renombra::suffix::SuffixCatalog;
    ///
    /// let catalog = SuffixCatalog::new();
    /// assert_eq!(catalog.match_stem("report_A_FAC"), Some("_A_FAC"));
    /// assert_eq!(catalog.match_stem("scan_CROQUIS"), Some("_CROQUIS"));
    /// assert_eq!(catalog.match_stem("notes"), None);
    /// ```
    pub fn match_stem(&self, stem: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|pattern| stem.ends_with(pattern.as_str()))
            .map(String::as_str)
    }

    /// All patterns in priority order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Number of patterns in the catalog.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if the catalog holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for SuffixCatalog {
    fn default() -> Self {
        Self::new()
    }
}
