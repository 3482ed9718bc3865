// src/data.rs
//
// In-memory shapes shared by the extractors, the writer and the merger.
//
// - Value:           one cell, numeric or text.
// - Record:          one scraped row; ordered, string-keyed.
// - CategoryDataset: all records of one stat page.
// - Table:           rectangular header + rows form, blanks as `None`.
//                    This is what files are read into and written from.

use std::collections::HashSet;
use std::fmt;

use crate::core::sanitize::decimal_point;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Scraped cell text → value.
    /// `"1,5"` → `Number(1.5)`; `"—"` → `Text("—")` (the trimmed text as seen).
    /// Only text with a digit counts as numeric, so `"nan"`, `"inf"` and
    /// `"Infinity"` stay text even though a float parser would accept them.
    pub fn from_cell(text: &str) -> Self {
        let trimmed = text.trim();
        match parse_number(&decimal_point(trimmed)) {
            Some(n) => Value::Number(n),
            None => Value::Text(s!(trimmed)),
        }
    }

    /// Cell read back from a written file. Blank → `None`.
    pub fn from_stored(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match parse_number(trimmed) {
            Some(n) => Value::Number(n),
            None => Value::Text(s!(raw)),
        })
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Value::Text(t) if t.trim().is_empty())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self { Value::Number(n) => Some(*n), Value::Text(_) => None }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(t) => f.write_str(t),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self { Value::Number(n) }
}

impl From<&str> for Value {
    fn from(t: &str) -> Self { Value::Text(s!(t)) }
}

// Requires a digit so names like "Nan" or "Inf" stay text.
fn parse_number(s: &str) -> Option<f64> {
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok()
}

/// One table row as `column key → value`, in first-insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self { Self::default() }

    /// Insert or overwrite. An overwritten key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize { self.fields.len() }
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }
}

/// Records scraped from one page, tagged with their category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryDataset {
    pub category: String,
    pub records: Vec<Record>,
}

impl CategoryDataset {
    pub fn new(category: impl Into<String>, records: Vec<Record>) -> Self {
        Self { category: category.into(), records }
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Union of record keys, ordered by first appearance.
    pub fn columns(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut cols = Vec::new();
        for rec in &self.records {
            for k in rec.keys() {
                if seen.insert(k) {
                    cols.push(s!(k));
                }
            }
        }
        cols
    }

    /// Rectangular form; keys a record lacks become blanks.
    pub fn to_table(&self) -> Table {
        let headers = self.columns();
        let rows = self
            .records
            .iter()
            .map(|rec| headers.iter().map(|h| rec.get(h).cloned()).collect())
            .collect();
        Table { headers, rows }
    }
}

pub type Row = Vec<Option<Value>>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// No data rows (a header-only file counts as empty).
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    pub fn len(&self) -> usize { self.rows.len() }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let ix = self.column_index(column)?;
        self.rows.get(row)?.get(ix)?.as_ref()
    }
}
