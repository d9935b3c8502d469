//! rentavg: Rental Listing Averaging Library
//!
//! Cleans uploaded real-estate listings, groups them by zip code, bedrooms
//! and bathrooms (optionally property type with a square-footage outlier
//! window) and reports average price and listing count per group.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use pipeline::{analyze, process, Analysis, AnalysisConfig, PipelineError};
