//! Column roles and aggregation mode resolution
//!
//! The simple export names its columns `bedrooms`/`bathrooms`, the extended one
//! `beds`/`baths`. Both are accepted; when both are present the short spelling
//! wins.

use polars::prelude::DataFrame;
use serde::Serialize;

use super::config::ModeSelection;
use super::error::{PipelineError, PipelineResult};

pub const PRICE: &str = "price";
pub const ZIPCODE: &str = "zipcode";
pub const SQFT: &str = "sqft";
pub const PROPERTY_TYPE: &str = "property_type";
pub const BEDROOM_ALIASES: [&str; 2] = ["beds", "bedrooms"];
pub const BATHROOM_ALIASES: [&str; 2] = ["baths", "bathrooms"];

/// Which grouping the run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    /// `(zipcode, bedrooms, bathrooms)`
    Simple,
    /// `(property_type, zipcode, bedrooms, bathrooms)` after the sqft window
    OutlierFiltered,
}

impl AggregationMode {
    /// Suggested name for the downloadable CSV.
    pub fn download_file_name(&self) -> &'static str {
        match self {
            AggregationMode::Simple => "filtered_rent_data.csv",
            AggregationMode::OutlierFiltered => "filtered__averages__prices.csv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AggregationMode::Simple => "simple",
            AggregationMode::OutlierFiltered => "outlier-filtered",
        }
    }
}

/// The columns a run works with, resolved against the uploaded header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingSchema {
    pub mode: AggregationMode,
    pub bedrooms: String,
    pub bathrooms: String,
}

impl ListingSchema {
    /// Columns that form the group key, in output order.
    pub fn group_keys(&self) -> Vec<&str> {
        let mut keys = Vec::with_capacity(4);
        if self.mode == AggregationMode::OutlierFiltered {
            keys.push(PROPERTY_TYPE);
        }
        keys.extend([ZIPCODE, self.bedrooms.as_str(), self.bathrooms.as_str()]);
        keys
    }

    /// Columns whose absence in a row removes the row from aggregation.
    pub fn critical_columns(&self) -> Vec<&str> {
        match self.mode {
            AggregationMode::Simple => vec![PRICE, ZIPCODE],
            AggregationMode::OutlierFiltered => vec![PRICE, ZIPCODE, PROPERTY_TYPE, SQFT],
        }
    }
}

fn find_alias(columns: &[&str], aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .find(|alias| columns.contains(*alias))
        .map(|alias| alias.to_string())
}

/// Check the header for required columns and pick the aggregation mode.
///
/// Returns a schema error naming every missing column; nothing is cleaned
/// before this check passes.
pub fn resolve_schema(df: &DataFrame, selection: ModeSelection) -> PipelineResult<ListingSchema> {
    let columns: Vec<&str> = df.get_column_names().into_iter().map(|c| c.as_str()).collect();
    let has = |name: &str| columns.contains(&name);

    let mode = match selection {
        ModeSelection::Simple => AggregationMode::Simple,
        ModeSelection::Outlier => AggregationMode::OutlierFiltered,
        ModeSelection::Auto if has(PROPERTY_TYPE) && has(SQFT) => AggregationMode::OutlierFiltered,
        ModeSelection::Auto => AggregationMode::Simple,
    };

    let bedrooms = find_alias(&columns, &BEDROOM_ALIASES);
    let bathrooms = find_alias(&columns, &BATHROOM_ALIASES);

    let mut missing = Vec::new();
    if mode == AggregationMode::OutlierFiltered && !has(PROPERTY_TYPE) {
        missing.push(PROPERTY_TYPE.to_string());
    }
    if !has(ZIPCODE) {
        missing.push(ZIPCODE.to_string());
    }
    if bedrooms.is_none() {
        missing.push(BEDROOM_ALIASES.join("/"));
    }
    if bathrooms.is_none() {
        missing.push(BATHROOM_ALIASES.join("/"));
    }
    if !has(PRICE) {
        missing.push(PRICE.to_string());
    }
    if mode == AggregationMode::OutlierFiltered && !has(SQFT) {
        missing.push(SQFT.to_string());
    }

    match (bedrooms, bathrooms) {
        (Some(bedrooms), Some(bathrooms)) if missing.is_empty() => Ok(ListingSchema {
            mode,
            bedrooms,
            bathrooms,
        }),
        _ => Err(PipelineError::Schema { missing }),
    }
}
