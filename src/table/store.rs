use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::entry::CodeEntry;
use crate::core::types::CodeId;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to read code table: {0}")]
    Io(#[from] std::io::Error),

    #[error("code table is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("invalid row at line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },

    #[error("code table contains no entries")]
    Empty,

    #[error("too many entries: {0} exceeds maximum allowed (200000)")]
    TooManyEntries(usize),
}

/// Maximum number of table rows accepted from one file
pub const MAX_TABLE_ENTRIES: usize = 200_000;

/// Serializable export format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableExport {
    pub created_at: String,
    pub entries: Vec<CodeEntry>,
}

/// The reference code table: entries in file order plus lookup
/// indexes. Immutable once loaded; matching borrows it read-only.
#[derive(Debug, Default)]
pub struct CodeTable {
    /// All entries, in file order
    entries: Vec<CodeEntry>,

    /// Index: code -> index in entries
    code_index: HashMap<CodeId, usize>,

    /// Index: normalized description -> first index in entries,
    /// the exact-match fast path
    description_index: HashMap<String, usize>,
}

impl CodeTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from a delimited file. The delimiter is a tab for
    /// `.tsv` files and a comma otherwise.
    ///
    /// # Errors
    ///
    /// Returns `TableError::Io` if the file cannot be read, or a parse
    /// error if the content is malformed.
    pub fn load_from_file(path: &Path) -> Result<Self, TableError> {
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => '\t',
            _ => ',',
        };
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_delimited_text(&content, delimiter)?;
        debug!(
            entries = table.len(),
            path = %path.display(),
            "loaded code table"
        );
        Ok(table)
    }

    /// Parse a table from delimited text with a header row.
    ///
    /// The header must name a code column and a long-description
    /// column; a short-description column is optional. Header names
    /// are matched case-insensitively. Fields may be double-quoted to
    /// carry the delimiter or doubled quotes.
    ///
    /// # Errors
    ///
    /// Returns `TableError::MissingColumn` when a required column is
    /// absent, `TableError::InvalidRow` for rows with missing fields,
    /// `TableError::Empty` when no data rows remain, or
    /// `TableError::TooManyEntries` past the row cap.
    pub fn from_delimited_text(text: &str, delimiter: char) -> Result<Self, TableError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let header = lines.next().map(|(_, line)| split_record(line, delimiter));
        let header = header.ok_or(TableError::Empty)?;

        let find_column = |names: &[&str]| {
            header.iter().position(|h| {
                let h = h.trim();
                names.iter().any(|n| h.eq_ignore_ascii_case(n))
            })
        };

        let code_col = find_column(&["code"]).ok_or(TableError::MissingColumn("code"))?;
        let desc_col = find_column(&["longdesc", "long_desc", "description", "desc"])
            .ok_or(TableError::MissingColumn("description"))?;
        let short_col = find_column(&["shortdesc", "short_desc", "short"]);

        let mut table = Self::new();
        for (line_num, line) in lines {
            let fields = split_record(line, delimiter);

            let required = code_col.max(desc_col);
            if fields.len() <= required {
                return Err(TableError::InvalidRow {
                    line: line_num,
                    reason: format!("expected at least {} fields", required + 1),
                });
            }

            let code = fields[code_col].trim();
            let description = fields[desc_col].trim();
            if code.is_empty() || description.is_empty() {
                return Err(TableError::InvalidRow {
                    line: line_num,
                    reason: "empty code or description".to_string(),
                });
            }

            if table.len() >= MAX_TABLE_ENTRIES {
                return Err(TableError::TooManyEntries(table.len() + 1));
            }

            let mut entry = CodeEntry::new(code, description);
            if let Some(sc) = short_col {
                if let Some(short) = fields.get(sc) {
                    let short = short.trim();
                    if !short.is_empty() {
                        entry = entry.with_short_description(short);
                    }
                }
            }

            if !table.add_entry(entry) {
                warn!(code, line = line_num, "duplicate code dropped, first occurrence wins");
            }
        }

        if table.is_empty() {
            return Err(TableError::Empty);
        }

        Ok(table)
    }

    /// Add an entry, rebuilding its normalized forms. Returns false
    /// and leaves the table unchanged when the code is already
    /// present.
    pub fn add_entry(&mut self, mut entry: CodeEntry) -> bool {
        if self.code_index.contains_key(&entry.code) {
            return false;
        }
        entry.rebuild_index();

        let index = self.entries.len();
        self.code_index.insert(entry.code.clone(), index);
        // First description wins, consistent with the scan tie-break
        self.description_index
            .entry(entry.normalized.clone())
            .or_insert(index);
        self.entries.push(entry);
        true
    }

    /// Get an entry by code
    #[must_use]
    pub fn get(&self, code: &CodeId) -> Option<&CodeEntry> {
        self.code_index.get(code).map(|&idx| &self.entries[idx])
    }

    /// Find the first entry whose normalized description equals
    /// `normalized` exactly
    #[must_use]
    pub fn find_by_description(&self, normalized: &str) -> Option<&CodeEntry> {
        self.description_index
            .get(normalized)
            .map(|&idx| &self.entries[idx])
    }

    /// All entries, in file order
    #[must_use]
    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    /// Number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the table as CSV with the canonical header
    #[must_use]
    pub fn to_csv_string(&self) -> String {
        let mut out = String::from("Code,ShortDesc,LongDesc\n");
        for entry in &self.entries {
            out.push_str(&csv_escape(&entry.code.0));
            out.push(',');
            out.push_str(&csv_escape(entry.short_description.as_deref().unwrap_or("")));
            out.push(',');
            out.push_str(&csv_escape(&entry.description));
            out.push('\n');
        }
        out
    }

    /// Export the table as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let export = TableExport {
            created_at: chrono::Utc::now().to_rfc3339(),
            entries: self.entries.clone(),
        };
        serde_json::to_string_pretty(&export)
    }
}

/// Quote a CSV field when it contains a comma, quote, or newline.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split one delimited record, honoring double-quoted fields with
/// doubled-quote escapes. Quoted fields may contain the delimiter;
/// embedded newlines are not supported.
fn split_record(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else if ch == '"' && field.is_empty() {
            in_quotes = true;
        } else if ch == delimiter {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(ch);
        }
    }
    fields.push(field);
    fields
}
