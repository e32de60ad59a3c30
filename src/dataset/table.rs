//! In-memory dataset table.
//!
//! Rows are books, keyed by their `id` column. Metadata columns are kept as read,
//! derived columns are typed fields of [Row] that only count as columns of the table once
//! the stage producing them has run (see [DatasetTable::has_column]).
use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fs::File,
    io::{Read, Write},
    path::Path,
};

use itertools::Itertools;
use log::{debug, warn};
use serde::Serialize;

use crate::error::Error;

/// Name of the join key column.
pub const ID_COLUMN: &str = "id";

/// Columns added by the processing stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DerivedColumn {
    WordCount,
    UniqueWordCount,
    LineCount,
    TokenCount,
    TextWordCount,
    TextUniqueWordCount,
    Text,
    Tokens,
    Lemmas,
}

impl DerivedColumn {
    pub const ALL: [DerivedColumn; 9] = [
        DerivedColumn::WordCount,
        DerivedColumn::UniqueWordCount,
        DerivedColumn::LineCount,
        DerivedColumn::TokenCount,
        DerivedColumn::TextWordCount,
        DerivedColumn::TextUniqueWordCount,
        DerivedColumn::Text,
        DerivedColumn::Tokens,
        DerivedColumn::Lemmas,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DerivedColumn::WordCount => "word_count",
            DerivedColumn::UniqueWordCount => "unique_word_count",
            DerivedColumn::LineCount => "line_count",
            DerivedColumn::TokenCount => "token_count",
            DerivedColumn::TextWordCount => "text_word_count",
            DerivedColumn::TextUniqueWordCount => "text_unique_word_count",
            DerivedColumn::Text => "text",
            DerivedColumn::Tokens => "tokens",
            DerivedColumn::Lemmas => "lemmas",
        }
    }
}

/// A single book.
///
/// `index` and `id` are fixed at load time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    index: String,
    id: String,
    metadata: Vec<String>,
    pub word_count: Option<u64>,
    pub unique_word_count: Option<u64>,
    pub line_count: Option<u64>,
    pub token_count: Option<u64>,
    pub text_word_count: Option<u64>,
    pub text_unique_word_count: Option<u64>,
    pub text: Option<String>,
    pub tokens: Option<Vec<String>>,
    pub lemmas: Option<Vec<String>>,
}

impl Row {
    pub fn new(index: String, id: String, metadata: Vec<String>) -> Self {
        Self {
            index,
            id,
            metadata,
            ..Default::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    /// true if the value of `column` is missing for this row.
    ///
    /// Empty token/lemma sequences count as missing.
    pub fn is_absent(&self, column: DerivedColumn) -> bool {
        match column {
            DerivedColumn::WordCount => self.word_count.is_none(),
            DerivedColumn::UniqueWordCount => self.unique_word_count.is_none(),
            DerivedColumn::LineCount => self.line_count.is_none(),
            DerivedColumn::TokenCount => self.token_count.is_none(),
            DerivedColumn::TextWordCount => self.text_word_count.is_none(),
            DerivedColumn::TextUniqueWordCount => self.text_unique_word_count.is_none(),
            DerivedColumn::Text => self.text.is_none(),
            DerivedColumn::Tokens => self.tokens.as_ref().map_or(true, Vec::is_empty),
            DerivedColumn::Lemmas => self.lemmas.as_ref().map_or(true, Vec::is_empty),
        }
    }

    /// Serialized cell value. Absent values are empty cells.
    fn cell(&self, column: DerivedColumn) -> String {
        let count = |c: Option<u64>| c.map(|c| c.to_string()).unwrap_or_default();
        match column {
            DerivedColumn::WordCount => count(self.word_count),
            DerivedColumn::UniqueWordCount => count(self.unique_word_count),
            DerivedColumn::LineCount => count(self.line_count),
            DerivedColumn::TokenCount => count(self.token_count),
            DerivedColumn::TextWordCount => count(self.text_word_count),
            DerivedColumn::TextUniqueWordCount => count(self.text_unique_word_count),
            DerivedColumn::Text => self.text.clone().unwrap_or_default(),
            DerivedColumn::Tokens => self.tokens.iter().flatten().join(" "),
            DerivedColumn::Lemmas => self.lemmas.iter().flatten().join(" "),
        }
    }

    /// Parse a serialized cell back into its field. Empty cells are absent values.
    fn set_cell(&mut self, column: DerivedColumn, value: &str) -> Result<(), Error> {
        let value = Some(value).filter(|v| !v.is_empty());
        let count = |v: Option<&str>| {
            v.map(|v| {
                v.parse::<u64>().map_err(|_| {
                    Error::Custom(format!("invalid {} value {:?}", column.name(), v))
                })
            })
            .transpose()
        };
        let words =
            |v: Option<&str>| v.map(|v| v.split(' ').map(String::from).collect::<Vec<_>>());

        match column {
            DerivedColumn::WordCount => self.word_count = count(value)?,
            DerivedColumn::UniqueWordCount => self.unique_word_count = count(value)?,
            DerivedColumn::LineCount => self.line_count = count(value)?,
            DerivedColumn::TokenCount => self.token_count = count(value)?,
            DerivedColumn::TextWordCount => self.text_word_count = count(value)?,
            DerivedColumn::TextUniqueWordCount => self.text_unique_word_count = count(value)?,
            DerivedColumn::Text => self.text = value.map(String::from),
            DerivedColumn::Tokens => self.tokens = words(value),
            DerivedColumn::Lemmas => self.lemmas = words(value),
        }
        Ok(())
    }
}

/// Per split, the number of rows and of absent values for each computed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    pub absent: BTreeMap<&'static str, usize>,
}

/// Dataset split loaded from a delimited file with a leading index column.
#[derive(Debug, Clone)]
pub struct DatasetTable {
    name: String,
    index_header: String,
    headers: Vec<String>,
    rows: Vec<Row>,
    columns: BTreeSet<DerivedColumn>,
}

impl DatasetTable {
    /// Build a table from already parsed rows.
    ///
    /// Fails if two rows share an id.
    pub fn new(
        name: &str,
        index_header: String,
        headers: Vec<String>,
        rows: Vec<Row>,
    ) -> Result<Self, Error> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            if !seen.insert(row.id()) {
                return Err(Error::DuplicateId(row.id().to_string()));
            }
        }

        Ok(Self {
            name: name.to_string(),
            index_header,
            headers,
            rows,
            columns: BTreeSet::new(),
        })
    }

    /// Table with only an index and an `id` column. Indices are row positions.
    pub fn from_ids(name: &str, ids: &[&str]) -> Result<Self, Error> {
        let rows = ids
            .iter()
            .enumerate()
            .map(|(idx, id)| Row::new(idx.to_string(), id.to_string(), vec![id.to_string()]))
            .collect();
        Self::new(name, String::new(), vec![ID_COLUMN.to_string()], rows)
    }

    pub fn from_path(name: &str, path: &Path) -> Result<Self, Error> {
        debug!("[{}] loading {:?}", name, path);
        let f = File::open(path)?;
        Self::from_reader(name, f)
    }

    /// Read a CSV split. The first column is the index (its header may be empty),
    /// and an `id` column has to be present among the others.
    ///
    /// Columns named after a [DerivedColumn] (e.g. the output of a previous run) are read
    /// into their typed field and registered, so that they are written once and overwritten
    /// by the stage computing them.
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new().from_reader(reader);
        let mut headers = reader.headers()?.iter().map(String::from);

        let index_header = headers
            .next()
            .ok_or_else(|| Error::Custom(format!("[{}] split file has no columns", name)))?;

        // position of each column among the non-index fields
        let mut metadata_pos = Vec::new();
        let mut derived_pos = Vec::new();
        let mut metadata_headers = Vec::new();
        for (pos, header) in headers.enumerate() {
            match DerivedColumn::from_name(&header) {
                Some(column) => derived_pos.push((pos, column)),
                None => {
                    metadata_pos.push(pos);
                    metadata_headers.push(header);
                }
            }
        }

        let id_pos = metadata_headers
            .iter()
            .position(|h| h == ID_COLUMN)
            .ok_or_else(|| Error::MissingColumn(ID_COLUMN.to_string()))?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let index = record.get(0).unwrap_or_default().to_string();
            let field = |pos: usize| record.get(pos + 1).unwrap_or_default();

            let metadata: Vec<String> = metadata_pos
                .iter()
                .map(|pos| field(*pos).to_string())
                .collect();
            let id = metadata.get(id_pos).cloned().unwrap_or_default();
            let mut row = Row::new(index, id, metadata);
            for (pos, column) in &derived_pos {
                row.set_cell(*column, field(*pos))?;
            }
            rows.push(row);
        }

        let mut table = Self::new(name, index_header, metadata_headers, rows)?;
        for (_, column) in derived_pos {
            debug!("[{}] read computed column {}", name, column.name());
            table.add_column(column);
        }
        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Mutable access to rows. Rows can be changed but neither added nor reordered.
    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Keep only rows matching `f`, preserving order.
    pub fn retain<F: FnMut(&Row) -> bool>(&mut self, f: F) {
        self.rows.retain(f);
    }

    /// Metadata column names, excluding the index.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Value of a metadata column for a given row.
    pub fn metadata<'a>(&self, row: &'a Row, column: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|pos| row.metadata.get(pos))
            .map(String::as_str)
    }

    /// Register a derived column as computed.
    pub fn add_column(&mut self, column: DerivedColumn) {
        self.columns.insert(column);
    }

    pub fn has_column(&self, column: DerivedColumn) -> bool {
        self.columns.contains(&column)
    }

    pub fn absent_count(&self, column: DerivedColumn) -> usize {
        self.rows.iter().filter(|r| r.is_absent(column)).count()
    }

    /// Emit a warning for each computed column that is absent for every row.
    ///
    /// Returns the offending columns.
    pub fn warn_null_columns(&self) -> Vec<DerivedColumn> {
        if self.rows.is_empty() {
            return Vec::new();
        }

        let null_columns: Vec<DerivedColumn> = self
            .columns
            .iter()
            .filter(|c| self.absent_count(**c) == self.rows.len())
            .copied()
            .collect();

        for column in &null_columns {
            warn!(
                "[{}] column {} is absent for all {} rows",
                self.name,
                column.name(),
                self.rows.len()
            );
        }

        null_columns
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            rows: self.rows.len(),
            absent: self
                .columns
                .iter()
                .map(|c| (c.name(), self.absent_count(*c)))
                .collect(),
        }
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), Error> {
        let f = File::create(path)?;
        self.write(f)
    }

    /// Write the table as CSV: index, metadata columns, then computed columns.
    pub fn write<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut out = csv::WriterBuilder::new().from_writer(writer);

        let header = std::iter::once(self.index_header.as_str())
            .chain(self.headers.iter().map(String::as_str))
            .chain(self.columns.iter().map(|c| c.name()));
        out.write_record(header)?;

        for row in &self.rows {
            let record = std::iter::once(row.index.clone())
                .chain(row.metadata.iter().cloned())
                .chain(self.columns.iter().map(|c| row.cell(*c)));
            out.write_record(record)?;
        }

        out.flush()?;
        Ok(())
    }
}
