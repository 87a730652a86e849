/*!
 * User-supplied terminology glossary.
 *
 * A glossary maps source-language terms to the target-language terms the
 * translation must use. It is built from two-column tabular input (first
 * column = source terms, second column = target terms) and is read-only once
 * handed to a pipeline run.
 *
 * Supported sources:
 * - In-memory rows (`Glossary::from_rows`)
 * - Spreadsheets: xlsx, xlsm, xlsb, xls, ods (first worksheet)
 * - Delimited text: csv, tsv
 *
 * File sources treat their first row as a column header.
 */

use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

use crate::errors::GlossaryError;

/// One source term and the target term it must be rendered as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryEntry {
    /// Term as it appears in the source language
    pub source_term: String,
    /// Required rendering in the target language
    pub target_term: String,
}

/// Ordered source-term -> target-term mapping.
///
/// Keys are unique and case-sensitive. Inserting an existing source term
/// replaces its target in place: the last write wins, the entry keeps the
/// position of its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glossary {
    entries: Vec<GlossaryEntry>,
    index: HashMap<String, usize>,
}

impl Glossary {
    /// Create an empty glossary
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a glossary from data rows; each row is `[source, target, ..]`.
    ///
    /// Rows with a blank source or target cell are skipped; extra cells are ignored.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut glossary = Self::new();
        for (row_number, row) in rows.into_iter().enumerate() {
            let cells = row.as_ref();
            let source = cells.first().map(|c| c.as_ref().trim()).unwrap_or_default();
            let target = cells.get(1).map(|c| c.as_ref().trim()).unwrap_or_default();

            if source.is_empty() || target.is_empty() {
                log::debug!("Skipping incomplete glossary row {}", row_number + 1);
                continue;
            }
            glossary.insert(source, target);
        }
        glossary
    }

    /// Insert or replace a term; returns the previous target term, if any
    pub fn insert(&mut self, source_term: impl Into<String>, target_term: impl Into<String>) -> Option<String> {
        let source_term = source_term.into();
        let target_term = target_term.into();

        match self.index.get(&source_term) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].target_term, target_term)),
            None => {
                self.index.insert(source_term.clone(), self.entries.len());
                self.entries.push(GlossaryEntry { source_term, target_term });
                None
            }
        }
    }

    /// Target term for `source_term`
    pub fn get(&self, source_term: &str) -> Option<&str> {
        self.index.get(source_term).map(|&i| self.entries[i].target_term.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the glossary has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &GlossaryEntry> {
        self.entries.iter()
    }

    /// One `source_term: target_term` line per entry, in insertion order
    pub fn to_prompt_lines(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {}", e.source_term, e.target_term))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Two-column preview table of at most `limit` entries
    pub fn preview(&self, limit: usize) -> String {
        let width = self.entries.iter()
            .take(limit)
            .map(|e| e.source_term.chars().count())
            .max()
            .unwrap_or(0)
            .max("Source".len());

        let mut lines = vec![
            format!("{:<width$} | Target", "Source", width = width),
            format!("{}-+-{}", "-".repeat(width), "-".repeat(6)),
        ];
        for entry in self.entries.iter().take(limit) {
            lines.push(format!("{:<width$} | {}", entry.source_term, entry.target_term, width = width));
        }
        if self.entries.len() > limit {
            lines.push(format!("... and {} more", self.entries.len() - limit));
        }
        lines.join("\n")
    }

    /// Check which applicable glossary terms did not make it into the translation.
    ///
    /// An entry applies when its source term occurs in `source_text` as a whole
    /// word. This never changes the translation; glossary enforcement in the
    /// pipeline is advisory.
    pub fn audit(&self, source_text: &str, translated_text: &str) -> GlossaryAudit {
        let mut audit = GlossaryAudit::default();

        for entry in &self.entries {
            if !contains_term(source_text, &entry.source_term) {
                continue;
            }
            audit.applicable += 1;
            if !translated_text.contains(&entry.target_term) {
                audit.missing.push(entry.clone());
            }
        }

        audit
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Glossary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut glossary = Self::new();
        for (source, target) in iter {
            glossary.insert(source, target);
        }
        glossary
    }
}

/// Result of checking a translation against the glossary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossaryAudit {
    /// Entries whose source term occurs in the source text
    pub applicable: usize,
    /// Applicable entries whose target term is absent from the translation
    pub missing: Vec<GlossaryEntry>,
}

impl GlossaryAudit {
    /// Whether every applicable target term is present
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }
}

fn contains_term(text: &str, term: &str) -> bool {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let mut pattern = regex::escape(term);
    if is_word(term.chars().next()) {
        pattern = format!(r"\b{}", pattern);
    }
    if is_word(term.chars().last()) {
        pattern = format!(r"{}\b", pattern);
    }

    match Regex::new(&pattern) {
        Ok(re) => re.is_match(text),
        Err(_) => text.contains(term),
    }
}

/// Load a glossary file, dispatching on its extension
pub fn load_glossary(path: &Path) -> Result<Glossary, GlossaryError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let rows = match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_spreadsheet_rows(path)?,
        "csv" => read_delimited_rows(path, b',')?,
        "tsv" | "tab" => read_delimited_rows(path, b'\t')?,
        other => return Err(GlossaryError::UnsupportedFormat(other.to_string())),
    };

    let glossary = glossary_from_table(rows)?;
    log::debug!("Loaded {} glossary entries from {}", glossary.len(), path.display());
    Ok(glossary)
}

/// Load a glossary file, degrading to an empty glossary on any error.
///
/// The error is handed back so the caller can surface it as a notice.
pub fn load_glossary_lenient(path: &Path) -> (Glossary, Option<GlossaryError>) {
    match load_glossary(path) {
        Ok(glossary) => (glossary, None),
        Err(e) => {
            log::warn!("Continuing without glossary: {}", e);
            (Glossary::new(), Some(e))
        }
    }
}

/// Header row first, then data rows
fn glossary_from_table(rows: Vec<Vec<String>>) -> Result<Glossary, GlossaryError> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if !rows.is_empty() && width < 2 {
        return Err(GlossaryError::MissingColumns(width));
    }

    Ok(Glossary::from_rows(rows.into_iter().skip(1)))
}

fn read_spreadsheet_rows(path: &Path) -> Result<Vec<Vec<String>>, GlossaryError> {
    use calamine::{open_workbook_auto, Data, Reader};

    let unreadable = |message: String| GlossaryError::Unreadable {
        path: path.display().to_string(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(e.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(GlossaryError::NoWorksheet)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| unreadable(e.to_string()))?;

    let rows = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    Data::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect();

    Ok(rows)
}

fn read_delimited_rows(path: &Path, delimiter: u8) -> Result<Vec<Vec<String>>, GlossaryError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| GlossaryError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| GlossaryError::MalformedRow {
            row: i + 1,
            message: e.to_string(),
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}
