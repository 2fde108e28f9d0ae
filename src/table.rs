//! Delimited-text reading for name mappings and root-name lists.
//!
//! The delimiter is inferred from the header line by majority count among
//! `;`, tab and `,`, defaulting to `,` on ties or when none occurs. The
//! first line always carries the (trimmed) column headers; the remaining
//! non-blank lines become data rows, split on the detected delimiter.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Errors raised while reading a tabular source.
///
/// These are fatal, pre-mutation failures: a table that cannot be read
/// aborts the whole operation before anything on disk is touched.
#[derive(Debug)]
pub enum TableError {
    /// The source has no header line at all.
    Empty,
    /// The header has fewer columns than the caller requires.
    TooFewColumns {
        /// Number of columns found in the header.
        found: usize,
        /// Minimum number of columns the caller needs.
        required: usize,
    },
    /// The source file could not be opened or read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::Empty => write!(f, "the tabular source is empty"),
            TableError::TooFewColumns { found, required } => write!(
                f,
                "the tabular source has {} column(s), at least {} required",
                found, required
            ),
            TableError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for TableError {}

/// Detects the field delimiter of a delimited-text line.
///
/// Returns the most frequent of `;`, tab and `,`; comma wins ties and is
/// the default when none of the three occurs.
///
/// # Examples
///
/// ```
/// use renombra::table::detect_separator;
///
/// assert_eq!(detect_separator("a;b,c;d"), ';');
/// assert_eq!(detect_separator("a\tb\tc"), '\t');
/// assert_eq!(detect_separator("plain line"), ',');
/// ```
pub fn detect_separator(line: &str) -> char {
    let semicolons = line.chars().filter(|c| *c == ';').count();
    let commas = line.chars().filter(|c| *c == ',').count();
    let tabs = line.chars().filter(|c| *c == '\t').count();

    if semicolons > commas && semicolons > tabs {
        ';'
    } else if tabs > commas && tabs > semicolons {
        '\t'
    } else {
        ','
    }
}

/// An in-memory header-indexed table read from delimited text.
#[derive(Debug, Clone)]
pub struct Table {
    separator: char,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Reads a table from any buffered source.
    ///
    /// The first line supplies the headers (trimmed); `min_columns` is the
    /// number of header columns the caller needs (2 for a name mapping, 1
    /// for a root-name list). Blank data lines are skipped; short rows are
    /// kept here and dealt with where column indices are known.
    pub fn from_reader<R: BufRead>(reader: R, min_columns: usize) -> Result<Self, TableError> {
        let mut lines = reader.lines();

        let header_line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(source)) => {
                return Err(TableError::Io {
                    path: PathBuf::from("<reader>"),
                    source,
                });
            }
            None => return Err(TableError::Empty),
        };

        let separator = detect_separator(&header_line);
        let headers: Vec<String> = header_line
            .split(separator)
            .map(|h| h.trim().to_string())
            .collect();

        if headers.len() < min_columns {
            return Err(TableError::TooFewColumns {
                found: headers.len(),
                required: min_columns,
            });
        }

        let mut rows = Vec::new();
        for line in lines {
            let line = match line {
                Ok(line) => line,
                Err(source) => {
                    return Err(TableError::Io {
                        path: PathBuf::from("<reader>"),
                        source,
                    });
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            rows.push(line.split(separator).map(String::from).collect());
        }

        Ok(Self {
            separator,
            headers,
            rows,
        })
    }

    /// Reads a table from a file on disk.
    pub fn from_path(path: &Path, min_columns: usize) -> Result<Self, TableError> {
        let file = fs::File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), min_columns)
    }

    /// The delimiter the table was split on.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// The trimmed header names, in column order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The data rows, in source order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Resolves a header name to its column index, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_detect_separator_majority() {
        assert_eq!(detect_separator("a;b,c;d"), ';');
        assert_eq!(detect_separator("a,b,c"), ',');
        assert_eq!(detect_separator("a\tb\tc,d"), '\t');
    }

    #[test]
    fn test_detect_separator_defaults_to_comma() {
        assert_eq!(detect_separator(""), ',');
        assert_eq!(detect_separator("no delimiters here"), ',');
        // Ties go to comma.
        assert_eq!(detect_separator("a;b,c"), ',');
        assert_eq!(detect_separator("a\tb,c"), ',');
    }

    #[test]
    fn test_reads_headers_and_rows() {
        let input = "old;new\nalpha;beta\ngamma;delta\n";
        let table = Table::from_reader(Cursor::new(input), 2).unwrap();

        assert_eq!(table.separator(), ';');
        assert_eq!(table.headers(), ["old", "new"]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[0], vec!["alpha", "beta"]);
    }

    #[test]
    fn test_headers_are_trimmed() {
        let input = " old , new \nalpha,beta\n";
        let table = Table::from_reader(Cursor::new(input), 2).unwrap();
        assert_eq!(table.headers(), ["old", "new"]);
        assert_eq!(table.column_index("new"), Some(1));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let input = "old,new\nalpha,beta\n\n   \ngamma,delta\n";
        let table = Table::from_reader(Cursor::new(input), 2).unwrap();
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn test_empty_source_fails() {
        let err = Table::from_reader(Cursor::new(""), 2).unwrap_err();
        assert!(matches!(err, TableError::Empty));
    }

    #[test]
    fn test_too_few_columns_for_mapping_use() {
        let err = Table::from_reader(Cursor::new("solo\na\nb\n"), 2).unwrap_err();
        assert!(matches!(
            err,
            TableError::TooFewColumns {
                found: 1,
                required: 2
            }
        ));
    }

    #[test]
    fn test_single_column_allowed_for_name_lists() {
        let table = Table::from_reader(Cursor::new("nombre_actual\nProyecto1\n"), 1).unwrap();
        assert_eq!(table.headers(), ["nombre_actual"]);
        assert_eq!(table.rows().len(), 1);
    }

    #[test]
    fn test_column_index_missing_header() {
        let table = Table::from_reader(Cursor::new("old,new\n"), 2).unwrap();
        assert_eq!(table.column_index("missing"), None);
    }
}
