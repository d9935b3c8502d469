//! Error types for the listing pipeline.
//!
//! Every stage returns `PipelineResult`. Only these three variants ever reach
//! the user; per-cell coercion problems are absorbed by the normalizer.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The uploaded bytes could not be parsed as CSV.
    #[error("Could not read the uploaded file as CSV: {0}")]
    MalformedInput(String),

    /// One or more required columns are absent from the header row.
    #[error(
        "The uploaded file is missing required column(s): {}",
        .missing.join(", ")
    )]
    Schema {
        /// Names of the missing columns, in the order they are required
        missing: Vec<String>,
    },

    /// Any other failure while cleaning, aggregating or serializing.
    #[error("An error occurred: {0}")]
    Processing(String),
}

impl PipelineError {
    /// Names of missing columns when this is a schema error.
    pub fn missing_columns(&self) -> &[String] {
        match self {
            PipelineError::Schema { missing } => missing,
            _ => &[],
        }
    }
}

impl From<PolarsError> for PipelineError {
    fn from(err: PolarsError) -> Self {
        PipelineError::Processing(err.to_string())
    }
}

/// Result alias used throughout the pipeline.
pub type PipelineResult<T> = Result<T, PipelineError>;
