//! Conversion of loosely-typed JSON rows into records
//!
//! Collaborators hand the core whatever their loader produced. Rows are
//! converted one at a time and the first malformed row aborts the whole
//! collection; nothing is skipped silently.
//!
//! Identifier fields accept strings or numbers, so `{"docid": 17}` and
//! `{"docid": "17"}` name the same document.

use crate::error::{Error, Result};
use crate::types::{Document, QrelRow, QueryRow};
use serde_json::{Map, Value};

const DOCUMENT: &str = "document";
const QUERY: &str = "query";
const QREL: &str = "qrel";

fn as_object<'a>(row: &'a Value, record: &'static str, index: usize) -> Result<&'a Map<String, Value>> {
    row.as_object().ok_or_else(|| {
        Error::invalid_field(record, index, "<row>", format!("expected an object, got {}", row))
    })
}

/// Read a required string-like field (string or number)
fn required_text(
    obj: &Map<String, Value>,
    record: &'static str,
    index: usize,
    field: &'static str,
) -> Result<String> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(Error::missing_field(record, index, field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(Error::invalid_field(
            record,
            index,
            field,
            format!("expected a string or number, got {}", other),
        )),
    }
}

/// Read the optional integer judgment, defaulting to 0
fn judgment(obj: &Map<String, Value>, index: usize) -> Result<i64> {
    let invalid = |v: &Value| {
        Error::invalid_field(QREL, index, "qrel", format!("expected an integer, got {}", v))
    };
    match obj.get("qrel") {
        None | Some(Value::Null) => Ok(0),
        Some(v @ Value::Number(n)) => n.as_i64().ok_or_else(|| invalid(v)),
        Some(v @ Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid(v)),
        Some(other) => Err(invalid(other)),
    }
}

impl Document {
    /// Convert the `index`-th JSON row of a document collection
    pub fn from_json(row: &Value, index: usize) -> Result<Self> {
        let obj = as_object(row, DOCUMENT, index)?;
        Ok(Document {
            docid: required_text(obj, DOCUMENT, index, "docid")?,
            text: required_text(obj, DOCUMENT, index, "text")?,
        })
    }
}

impl QueryRow {
    /// Convert the `index`-th JSON row of a query collection
    pub fn from_json(row: &Value, index: usize) -> Result<Self> {
        let obj = as_object(row, QUERY, index)?;
        Ok(QueryRow {
            qid: required_text(obj, QUERY, index, "qid")?,
            query: required_text(obj, QUERY, index, "query")?,
        })
    }
}

impl QrelRow {
    /// Convert the `index`-th JSON row of a judgment collection
    pub fn from_json(row: &Value, index: usize) -> Result<Self> {
        let obj = as_object(row, QREL, index)?;
        Ok(QrelRow {
            qid: required_text(obj, QREL, index, "qid")?,
            docid: required_text(obj, QREL, index, "docid")?,
            qrel: judgment(obj, index)?,
        })
    }
}

/// Convert a document collection, failing on the first malformed row
pub fn documents_from_json(rows: &[Value]) -> Result<Vec<Document>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| Document::from_json(row, i))
        .collect()
}

/// Convert a query collection, failing on the first malformed row
pub fn queries_from_json(rows: &[Value]) -> Result<Vec<QueryRow>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| QueryRow::from_json(row, i))
        .collect()
}

/// Convert a judgment collection, failing on the first malformed row
pub fn qrels_from_json(rows: &[Value]) -> Result<Vec<QrelRow>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| QrelRow::from_json(row, i))
        .collect()
}
