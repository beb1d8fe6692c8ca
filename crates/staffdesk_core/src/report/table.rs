//! Uniform tabular result for report queries.
//!
//! # Invariants
//! - `columns` are the names produced by the SQL (aliases preserved).
//! - Every row has exactly `columns.len()` cells.

use rusqlite::types::ValueRef;
use rusqlite::{Connection, Params};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// One cell of a report row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Real(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<ValueRef<'_>> for Cell {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Self::Null,
            ValueRef::Integer(value) => Self::Integer(value),
            ValueRef::Real(value) => Self::Real(value),
            // The schema stores no blobs; keep any stray bytes readable.
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                Self::Text(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Real(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Ordered rows of uniform shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Runs `sql` and collects every row.
    pub(crate) fn query(conn: &Connection, sql: &str, params: impl Params) -> rusqlite::Result<Self> {
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let width = columns.len();

        let mut rows = Vec::new();
        let mut cursor = stmt.query(params)?;
        while let Some(row) = cursor.next()? {
            let mut cells = Vec::with_capacity(width);
            for index in 0..width {
                cells.push(Cell::from(row.get_ref(index)?));
            }
            rows.push(cells);
        }

        Ok(Self { columns, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// All cells of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Renders the table as CSV with a header row.
    ///
    /// Fields containing a comma, quote or line break are quoted; NULL is an
    /// empty field.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        push_csv_line(&mut out, self.columns.iter().map(String::as_str));
        for row in &self.rows {
            let rendered: Vec<String> = row.iter().map(Cell::to_string).collect();
            push_csv_line(&mut out, rendered.iter().map(String::as_str));
        }
        out
    }
}

fn push_csv_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (index, field) in fields.enumerate() {
        if index > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::{Cell, Table};
    use rusqlite::Connection;

    #[test]
    fn query_preserves_aliases_and_value_types() {
        let conn = Connection::open_in_memory().unwrap();
        let table = Table::query(
            &conn,
            "SELECT 1 AS Id, 'Ana' AS Name, 2.5 AS Salary, NULL AS Manager;",
            [],
        )
        .unwrap();

        assert_eq!(table.columns, ["Id", "Name", "Salary", "Manager"]);
        assert_eq!(
            table.rows,
            vec![vec![
                Cell::Integer(1),
                Cell::Text("Ana".to_string()),
                Cell::Real(2.5),
                Cell::Null,
            ]]
        );
    }

    #[test]
    fn csv_quotes_only_fields_that_need_it() {
        let table = Table {
            columns: vec!["Name".to_string(), "Role".to_string()],
            rows: vec![
                vec![Cell::Text("Ana".to_string()), Cell::Text("Lead, Eng".to_string())],
                vec![Cell::Text("Bo \"B\"".to_string()), Cell::Null],
            ],
        };
        assert_eq!(
            table.to_csv(),
            "Name,Role\r\nAna,\"Lead, Eng\"\r\n\"Bo \"\"B\"\"\",\r\n"
        );
    }

    #[test]
    fn cells_serialize_as_plain_json_values() {
        let row = vec![Cell::Integer(3), Cell::Null, Cell::Text("x".to_string())];
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"[3,null,"x"]"#);
    }
}
