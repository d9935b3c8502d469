//! CSV serialization of group summaries

use polars::prelude::*;

use super::error::PipelineResult;

/// MIME type of the downloadable artifact.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Decimal places written for floating-point columns.
pub const PRICE_DECIMALS: usize = 2;

/// Render group summaries as UTF-8 CSV with a header row and no index column.
///
/// `Average_Price` is written rounded to two decimals; the frame itself keeps
/// full precision.
pub fn summaries_to_csv(summaries: &DataFrame) -> PipelineResult<Vec<u8>> {
    let mut df = summaries.clone();
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .with_float_precision(Some(PRICE_DECIMALS))
        .finish(&mut df)?;
    Ok(buffer)
}
