//! Tabular query response decoder
//!
//! Responses come wrapped in a JavaScript callback: a fixed 47-byte
//! prefix ending in the opening parenthesis and a trailing `);`. Inside
//! is a JSON document with a `table` of columns and rows. When the
//! request asks for a header row, the endpoint sometimes leaves the
//! column labels empty and puts them in the first data row instead; in
//! that case the labels are promoted and the row dropped.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use orderdesk_domain::{OrderDeskError, Result};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

/// Bytes before the JSON document in a callback-wrapped response.
const CALLBACK_PREFIX_LEN: usize = 47;
/// Bytes after it (`);`).
const CALLBACK_SUFFIX_LEN: usize = 2;

/// `Date(year,month,day[,hour,minute,second])` with a zero-based month.
static DATE_CELL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Date\((\d+),(\d+),(\d+)(?:,(\d+),(\d+),(\d+))?\)$").expect("valid regex")
});

/// A decoded cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// The cell as text; numbers are formatted, empty cells are `""`.
    pub fn as_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{n:.0}")
                } else {
                    n.to_string()
                }
            }
            Self::Bool(b) => b.to_string(),
            Self::DateTime(at) => at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// The cell as a number, accepting comma decimals in text cells.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => {
                let normalized = s.trim().replace(',', ".");
                if normalized.is_empty() { None } else { normalized.parse().ok() }
            }
            _ => None,
        }
    }

    /// The cell as a timestamp, from a date cell or a sheet-format string.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(at) => Some(*at),
            Self::Text(s) => {
                let trimmed = s.trim();
                NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
                    .ok()
                    .or_else(|| {
                        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                            .ok()
                            .and_then(|d| d.and_hms_opt(0, 0, 0))
                    })
            }
            _ => None,
        }
    }

    /// The cell as a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        self.as_datetime().map(|at| at.date())
    }

    /// Whether the cell holds one of the endpoint's truthy flag spellings.
    pub fn is_truthy_flag(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n == 1.0,
            Self::Text(s) => matches!(s.as_str(), "1" | "true" | "TRUE"),
            _ => false,
        }
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(Self::Empty, Self::Number),
            Value::String(s) => match decode_date_cell(s) {
                Some(at) => Self::DateTime(at),
                None => Self::Text(s.clone()),
            },
            other => Self::Text(other.to_string()),
        }
    }
}

fn decode_date_cell(value: &str) -> Option<NaiveDateTime> {
    let caps = DATE_CELL.captures(value)?;
    let part = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    // Month is zero-based on the wire.
    let month = part(2)? + 1;
    let day = part(3)?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    date.and_hms_opt(part(4).unwrap_or(0), part(5).unwrap_or(0), part(6).unwrap_or(0))
}

/// One table row, keyed by promoted column label.
pub type Record = HashMap<String, CellValue>;

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Option<Value>,
    #[serde(default)]
    table: Option<WireTable>,
}

#[derive(Deserialize)]
struct WireTable {
    cols: Vec<WireCol>,
    rows: Vec<WireRow>,
}

#[derive(Deserialize)]
struct WireCol {
    #[serde(default)]
    label: String,
}

#[derive(Deserialize)]
struct WireRow {
    c: Vec<Option<WireCell>>,
}

#[derive(Deserialize)]
struct WireCell {
    #[serde(default)]
    v: Value,
}

fn strip_callback(raw: &str) -> Result<&str> {
    let trimmed = raw.trim_end();
    if trimmed.len() <= CALLBACK_PREFIX_LEN + CALLBACK_SUFFIX_LEN || !trimmed.ends_with(");") {
        return Err(OrderDeskError::Parse("response is not a callback-wrapped table".into()));
    }
    trimmed
        .get(CALLBACK_PREFIX_LEN..trimmed.len() - CALLBACK_SUFFIX_LEN)
        .ok_or_else(|| OrderDeskError::Parse("response is not a callback-wrapped table".into()))
}

/// Decode a raw response body into records keyed by column label.
///
/// An error envelope from the endpoint becomes a `Network` error carrying
/// the reported reason; a body that cannot be decoded at all is a `Parse`
/// error.
pub fn parse_response(raw: &str) -> Result<Vec<Record>> {
    let json = strip_callback(raw)?;
    let wire: WireResponse = serde_json::from_str(json)
        .map_err(|e| OrderDeskError::Parse(format!("invalid table response: {e}")))?;

    if wire.status.as_deref() == Some("error") {
        let reason = wire
            .errors
            .map(|errors| errors.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(OrderDeskError::Network(format!("table query failed: {reason}")));
    }

    let table = wire
        .table
        .ok_or_else(|| OrderDeskError::Parse("table response has no table".into()))?;

    let mut rows = table.rows;
    let labels: Vec<String> = if table.cols.first().is_some_and(|col| col.label.is_empty()) {
        // Labels live in the first data row; promote and drop it.
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let header = rows.remove(0);
        (0..table.cols.len())
            .map(|i| {
                header
                    .c
                    .get(i)
                    .and_then(|cell| cell.as_ref())
                    .map(|cell| CellValue::from_json(&cell.v).as_text())
                    .unwrap_or_default()
            })
            .collect()
    } else {
        table.cols.into_iter().map(|col| col.label).collect()
    };

    let records = rows
        .into_iter()
        .map(|row| {
            labels
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    let value = row
                        .c
                        .get(i)
                        .and_then(|cell| cell.as_ref())
                        .map(|cell| CellValue::from_json(&cell.v))
                        .unwrap_or(CellValue::Empty);
                    (label.clone(), value)
                })
                .collect()
        })
        .collect();

    Ok(records)
}
