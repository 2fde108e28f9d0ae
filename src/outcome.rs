/// Outcome classification for batch rename and structure-creation runs.
///
/// Every attempted filesystem mutation produces exactly one [`Outcome`],
/// tagged with a kind and a human-readable message carrying the source and
/// target names. Outcomes are accumulated into a [`ResultSet`] and never
/// raised as errors; a batch always runs to completion and always yields a
/// full report.
use std::fmt;

/// Classification of a single attempted mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    /// The rename or directory creation was performed.
    Success,
    /// A file or folder with the target name already exists; nothing was touched.
    AlreadyExists,
    /// The computed target name exceeds the filesystem name limit.
    TooLong,
    /// The operation was deliberately not attempted (blank target, root protection).
    Skipped,
    /// No taxonomy suffix matched the file stem. Informational, not an error.
    NoSuffixMatched,
    /// The operation was attempted and failed, or its input was invalid.
    Error,
}

impl OutcomeKind {
    /// Fixed section order used by report rendering.
    pub const ALL: [OutcomeKind; 6] = [
        OutcomeKind::Success,
        OutcomeKind::AlreadyExists,
        OutcomeKind::TooLong,
        OutcomeKind::Skipped,
        OutcomeKind::NoSuffixMatched,
        OutcomeKind::Error,
    ];

    /// Returns the one-character tag used in report lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use renombra::outcome::OutcomeKind;
    ///
    /// assert_eq!(OutcomeKind::Success.symbol(), "✓");
    /// assert_eq!(OutcomeKind::Error.symbol(), "✗");
    /// ```
    pub fn symbol(&self) -> &'static str {
        match self {
            OutcomeKind::Success => "✓",
            OutcomeKind::AlreadyExists => "↻",
            OutcomeKind::TooLong => "⚠",
            OutcomeKind::Skipped => "↷",
            OutcomeKind::NoSuffixMatched => "·",
            OutcomeKind::Error => "✗",
        }
    }

    /// Returns the section heading used in report rendering.
    pub fn heading(&self) -> &'static str {
        match self {
            OutcomeKind::Success => "Renamed / created",
            OutcomeKind::AlreadyExists => "Already existing (not touched)",
            OutcomeKind::TooLong => "Names too long",
            OutcomeKind::Skipped => "Skipped",
            OutcomeKind::NoSuffixMatched => "No suffix matched",
            OutcomeKind::Error => "Errors",
        }
    }

    /// Returns true for kinds that indicate a real failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, OutcomeKind::Error)
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.heading())
    }
}

/// One record per attempted mutation.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// How the attempt was classified.
    pub kind: OutcomeKind,
    /// Human-readable description carrying the source (and target) names.
    pub message: String,
}

impl Outcome {
    /// Creates an outcome with an arbitrary message.
    pub fn new(kind: OutcomeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an outcome for a source -> target operation.
    pub fn renamed(kind: OutcomeKind, source: &str, target: &str) -> Self {
        Self::new(kind, format!("{} -> {}", source, target))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.symbol(), self.message)
    }
}

/// Accumulated outcomes of one batch, partitioned by kind on demand.
///
/// The set keeps insertion order within each kind so the rendered report is
/// deterministic for a given run.
#[derive(Debug, Default)]
pub struct ResultSet {
    outcomes: Vec<Outcome>,
}

impl ResultSet {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single outcome.
    pub fn record(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    /// Appends all outcomes from another set, preserving their order.
    pub fn merge(&mut self, other: ResultSet) {
        self.outcomes.extend(other.outcomes);
    }

    /// Total number of recorded outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of outcomes of the given kind.
    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.outcomes.iter().filter(|o| o.kind == kind).count()
    }

    /// Iterates over outcomes of the given kind, in insertion order.
    pub fn of_kind(&self, kind: OutcomeKind) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(move |o| o.kind == kind)
    }

    /// Iterates over all outcomes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter()
    }

    /// Returns true if any outcome is a failure.
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.kind.is_failure())
    }

    /// One-line count summary in section order, empty kinds omitted.
    pub fn summary_line(&self) -> String {
        let mut parts = Vec::new();
        for kind in OutcomeKind::ALL {
            let n = self.count(kind);
            if n > 0 {
                parts.push(format!("{} {}", kind.symbol(), n));
            }
        }
        if parts.is_empty() {
            "nothing to do".to_string()
        } else {
            parts.join("  ")
        }
    }

    /// Renders the full plain-text report.
    ///
    /// Sections appear in the fixed [`OutcomeKind::ALL`] order; empty
    /// sections are omitted. When `cap` is given, each section lists at
    /// most that many entries followed by a "... and N more" line.
    pub fn render(&self, cap: Option<usize>) -> String {
        let mut report = String::new();
        report.push_str(&format!("{} operations processed\n", self.len()));

        for kind in OutcomeKind::ALL {
            let total = self.count(kind);
            if total == 0 {
                continue;
            }
            report.push_str(&format!("\n{} {} ({}):\n", kind.symbol(), kind.heading(), total));

            let limit = cap.unwrap_or(usize::MAX);
            for (i, outcome) in self.of_kind(kind).enumerate() {
                if i >= limit {
                    report.push_str(&format!("  ... and {} more\n", total - limit));
                    break;
                }
                report.push_str(&format!("  {} {}\n", kind.symbol(), outcome.message));
            }
        }

        report
    }
}
