//! Tabular snapshot of a collection
//!
//! A [`Snapshot`] is the in-memory table materialized from a collection:
//! one row per document, one typed column per field seen in any document.
//! Columns keep the order in which their field was first seen, and a field
//! missing from a document is stored as [`Cell::Null`].

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// A single value in the table
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing field, JSON null, or a configured null marker
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text value; nested arrays and objects are kept as compact JSON text
    Text(String),
}

impl Cell {
    /// Converts a JSON value into a cell
    ///
    /// Strings equal to one of `null_markers` become [`Cell::Null`].
    pub fn from_json(value: Value, null_markers: &[String]) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Cell::Int(i)
                } else {
                    // u64 beyond i64::MAX and true floats
                    n.as_f64().map(Cell::Float).unwrap_or(Cell::Null)
                }
            }
            Value::String(s) => {
                if null_markers.iter().any(|marker| marker == &s) {
                    Cell::Null
                } else {
                    Cell::Text(s)
                }
            }
            nested @ (Value::Array(_) | Value::Object(_)) => Cell::Text(nested.to_string()),
        }
    }

    /// Returns true for [`Cell::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    fn kind(&self) -> Option<ColumnType> {
        match self {
            Cell::Null => None,
            Cell::Bool(_) => Some(ColumnType::Boolean),
            Cell::Int(_) => Some(ColumnType::Integer),
            Cell::Float(_) => Some(ColumnType::Float),
            Cell::Text(_) => Some(ColumnType::Text),
        }
    }

    /// Renders the cell as a CSV field for a column of the given type
    ///
    /// Nulls render as an empty field, booleans as `True`/`False`, and
    /// integers stored in a float column are promoted (`3` becomes `3.0`).
    pub fn render(&self, column_type: ColumnType) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Bool(true) => "True".to_string(),
            Cell::Bool(false) => "False".to_string(),
            Cell::Int(i) if column_type == ColumnType::Float => format_float(*i as f64),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => format_float(*f),
            Cell::Text(s) => s.clone(),
        }
    }
}

fn format_float(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{sign}inf")
    } else if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Column type inferred from the non-null cells of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Every cell is null
    Empty,
    /// Only booleans
    Boolean,
    /// Only integers
    Integer,
    /// Floats, possibly mixed with integers
    Float,
    /// Only text
    Text,
    /// Incompatible kinds
    Mixed,
}

impl ColumnType {
    fn combine(self, other: ColumnType) -> ColumnType {
        use ColumnType::*;
        match (self, other) {
            (Empty, t) | (t, Empty) => t,
            (a, b) if a == b => a,
            (Integer, Float) | (Float, Integer) => Float,
            _ => Mixed,
        }
    }

    /// Infers the type of a sequence of cells
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> ColumnType {
        cells
            .into_iter()
            .filter_map(Cell::kind)
            .fold(ColumnType::Empty, ColumnType::combine)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Empty => "empty",
            ColumnType::Boolean => "boolean",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
            ColumnType::Mixed => "mixed",
        };
        write!(f, "{name}")
    }
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    cells: Vec<Cell>,
}

impl Column {
    /// Creates a column, inferring its type from the cells
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        let column_type = ColumnType::infer(&cells);
        Self {
            name: name.into(),
            column_type,
            cells,
        }
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inferred column type
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Cells in row order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of null cells
    pub fn null_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_null()).count()
    }
}

/// Options applied while turning documents into a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotOptions {
    /// Fields dropped from every document (the store's `_id` by default)
    pub drop_columns: Vec<String>,
    /// String values treated as null
    pub null_markers: Vec<String>,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            drop_columns: vec!["_id".to_string()],
            null_markers: vec!["na".to_string()],
        }
    }
}

/// In-memory table built from a collection
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    columns: Vec<Column>,
    row_count: usize,
}

impl Snapshot {
    /// Builds a snapshot from columns
    ///
    /// # Errors
    ///
    /// Returns an error if the columns do not all have the same length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, String> {
        let row_count = columns.first().map(|c| c.cells.len()).unwrap_or(0);
        if let Some(column) = columns.iter().find(|c| c.cells.len() != row_count) {
            return Err(format!(
                "Column '{}' has {} cells, expected {}",
                column.name,
                column.cells.len(),
                row_count
            ));
        }
        Ok(Self { columns, row_count })
    }

    /// Builds a snapshot from schema-less documents
    ///
    /// Every document becomes one row. The column set is the union of all
    /// field names in first-seen order; a field absent from a document is
    /// null in that row.
    ///
    /// # Examples
    ///
    /// ```
    /// use harvest::domain::snapshot::{Cell, Snapshot, SnapshotOptions};
    /// use serde_json::json;
    ///
    /// let docs = vec![
    ///     json!({"_id": "a", "stars": 5}).as_object().unwrap().clone(),
    ///     json!({"_id": "b", "text": "ok"}).as_object().unwrap().clone(),
    /// ];
    /// let snapshot = Snapshot::from_documents(docs, &SnapshotOptions::default());
    ///
    /// assert_eq!(snapshot.row_count(), 2);
    /// assert_eq!(snapshot.column_names(), vec!["stars", "text"]);
    /// assert_eq!(snapshot.row(1), vec![&Cell::Null, &Cell::Text("ok".into())]);
    /// ```
    pub fn from_documents(
        documents: impl IntoIterator<Item = Map<String, Value>>,
        options: &SnapshotOptions,
    ) -> Self {
        let mut cells_by_column: Vec<(String, Vec<Cell>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut row_count = 0;

        for document in documents {
            for (field, value) in document {
                if options.drop_columns.contains(&field) {
                    continue;
                }
                let position = match index.get(&field) {
                    Some(&position) => position,
                    None => {
                        cells_by_column.push((field.clone(), vec![Cell::Null; row_count]));
                        index.insert(field, cells_by_column.len() - 1);
                        cells_by_column.len() - 1
                    }
                };
                cells_by_column[position]
                    .1
                    .push(Cell::from_json(value, &options.null_markers));
            }

            row_count += 1;
            for (_, cells) in cells_by_column.iter_mut() {
                if cells.len() < row_count {
                    cells.push(Cell::Null);
                }
            }
        }

        let columns = cells_by_column
            .into_iter()
            .map(|(name, cells)| Column::new(name, cells))
            .collect();

        Self { columns, row_count }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the snapshot holds no rows
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Looks up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Cells of one row, in column order
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn row(&self, index: usize) -> Vec<&Cell> {
        self.columns.iter().map(|c| &c.cells[index]).collect()
    }

    /// Rows rendered as CSV fields
    pub fn rendered_rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        (0..self.row_count).map(move |row| {
            self.columns
                .iter()
                .map(|c| c.cells[row].render(c.column_type))
                .collect()
        })
    }

    /// Builds a new snapshot from the given rows, in the given order
    ///
    /// Column types are carried over from this snapshot so every subset
    /// renders the same way as the whole.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn take(&self, indices: &[usize]) -> Snapshot {
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                column_type: c.column_type,
                cells: indices.iter().map(|&i| c.cells[i].clone()).collect(),
            })
            .collect();

        Snapshot {
            columns,
            row_count: indices.len(),
        }
    }
}
