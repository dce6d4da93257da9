//! CSV table reading and writing with raw text cells.
//!
//! Every cell is kept as an uninterpreted `String`. No dtype inference, no
//! numeric or locale coercion: a cell like `007` or `1.10` must survive a
//! read/write round trip byte-for-byte unless the anonymizer itself rewrites
//! it.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::domain::errors::SourceError;

/// A fully materialized CSV file: header row plus raw string rows.
///
/// Ragged rows are padded with empty cells to header width on read, so every
/// row can be indexed by column position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    /// Column names from the header row
    pub headers: Vec<String>,
    /// Data rows, each exactly `headers.len()` cells wide
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Creates a table from a header row and data rows
    ///
    /// Rows narrower than the header are padded with empty cells; rows wider
    /// than the header keep their extra cells (the header is padded instead).
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self { headers, rows };
        table.normalize();
        table
    }

    fn normalize(&mut self) {
        let width = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);
        while self.headers.len() < width {
            self.headers.push(String::new());
        }
        for row in &mut self.rows {
            while row.len() < width {
                row.push(String::new());
            }
        }
    }

    /// Returns the index of the column with this exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Returns the index of the first column whose name contains `needle`
    /// (case-insensitive)
    pub fn find_column_containing(&self, needle: &str) -> Option<usize> {
        let needle = needle.to_lowercase();
        self.headers
            .iter()
            .position(|h| h.to_lowercase().contains(&needle))
    }

    /// Returns the indices of every column whose name contains `needle`
    /// (case-insensitive)
    pub fn columns_containing(&self, needle: &str) -> Vec<usize> {
        let needle = needle.to_lowercase();
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Distinct non-empty values of one column, in first-seen order
    pub fn distinct_values(&self, column: usize) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut values = Vec::new();
        for row in &self.rows {
            let value = &row[column];
            if !value.is_empty() && seen.insert(value.clone()) {
                values.push(value.clone());
            }
        }
        values
    }
}

/// Reads a CSV file into a [`CsvTable`].
///
/// The first record is the header row. A UTF-8 BOM on the first header cell
/// is stripped. Ragged rows are accepted and padded.
pub fn read_table(path: &Path) -> Result<CsvTable, SourceError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SourceError::NotFound(path.to_path_buf())
        } else {
            SourceError::Read {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut headers: Vec<String> = reader
        .headers()
        .map_err(|e| SourceError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .iter()
        .map(str::to_string)
        .collect();

    // Strip the BOM some exports prepend to the first header cell
    if let Some(first) = headers.first_mut() {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_string();
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| SourceError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(CsvTable::new(headers, rows))
}

/// Writes a [`CsvTable`] to a file, creating parent directories on demand.
pub fn write_table(path: &Path, table: &CsvTable) -> Result<(), SourceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SourceError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let file = File::create(path).map_err(|e| SourceError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(BufWriter::new(file));

    writer
        .write_record(&table.headers)
        .map_err(|e| SourceError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    for row in &table.rows {
        writer.write_record(row).map_err(|e| SourceError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    }

    writer.flush().map_err(|e| SourceError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
