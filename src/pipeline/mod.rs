//! Pipeline module - ingest, clean, aggregate and export listings
//!
//! Data flows one way: bytes → DataFrame → cleaned DataFrame → group
//! summaries → CSV bytes. No stage keeps state between runs.

pub mod aggregate;
pub mod cell;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod normalize;
pub mod schema;

pub use aggregate::*;
pub use cell::{Cell, Cleaned};
pub use config::*;
pub use error::*;
pub use export::*;
pub use loader::*;
pub use normalize::*;
pub use schema::{resolve_schema, AggregationMode, ListingSchema};

use polars::prelude::DataFrame;

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// First rows of the upload, as read
    pub preview: DataFrame,
    pub schema: ListingSchema,
    pub normalization: NormalizationReport,
    pub summaries: GroupSummaries,
    /// The downloadable artifact
    pub csv: Vec<u8>,
}

impl Analysis {
    pub fn mode(&self) -> AggregationMode {
        self.schema.mode
    }

    /// Suggested file name for the CSV artifact.
    pub fn file_name(&self) -> &'static str {
        self.schema.mode.download_file_name()
    }
}

/// Run the whole pipeline on uploaded bytes.
///
/// `main.rs` runs the same stages one at a time to report progress.
///
/// Either every stage succeeds or the first error is returned; there is no
/// partial result.
pub fn analyze(bytes: &[u8], config: &AnalysisConfig) -> PipelineResult<Analysis> {
    let raw = read_listings(bytes)?;
    let preview = preview(&raw, config.preview_rows);
    let schema = resolve_schema(&raw, config.mode)?;
    let (cleaned, normalization) = clean_listings(&raw, &schema)?;
    let summaries = summarize_groups(&cleaned, &schema, config.aggregation_settings())?;
    let csv = summaries_to_csv(&summaries.frame)?;

    Ok(Analysis {
        preview,
        schema,
        normalization,
        summaries,
        csv,
    })
}

/// Turn uploaded CSV bytes into the filtered averages CSV, with default settings.
pub fn process(bytes: &[u8]) -> PipelineResult<Vec<u8>> {
    analyze(bytes, &AnalysisConfig::default()).map(|analysis| analysis.csv)
}
