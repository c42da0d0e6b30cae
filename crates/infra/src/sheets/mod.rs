//! Spreadsheet tabular-query adapter
//!
//! Read-only access to the order data goes through the spreadsheet's
//! tabular query endpoint. Queries are built as predicate trees and
//! serialized to the query dialect; responses arrive wrapped in a
//! JavaScript callback that has to be stripped before the JSON table
//! inside can be decoded.

mod client;
mod query;
mod response;

pub use client::SheetsClient;
pub use query::{Predicate, Query, Select, columns};
pub use response::{CellValue, Record, parse_response};
