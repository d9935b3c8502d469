//! Listing loader for uploaded CSV bytes

use std::io::Cursor;

use polars::prelude::*;

use super::error::{PipelineError, PipelineResult};

/// Parse raw CSV bytes into a DataFrame.
///
/// The first row is the header. Schema inference scans every row, so a column
/// that mixes "$1,200" and 1200 is read as text instead of failing halfway
/// through the file. Empty fields become nulls.
pub fn read_listings(bytes: &[u8]) -> PipelineResult<DataFrame> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(PipelineError::MalformedInput(
            "the file is empty".to_string(),
        ));
    }

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_rechunk(true)
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .map_err(|e| PipelineError::MalformedInput(e.to_string()))
}

/// First `rows` listings, for display before any cleaning happens.
pub fn preview(df: &DataFrame, rows: usize) -> DataFrame {
    df.head(Some(rows))
}

/// Column names in header order.
pub fn get_column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}
