//! Column normalization and incomplete-row removal

use polars::prelude::*;
use serde::Serialize;

use super::cell::{
    clean_bathrooms, clean_bedrooms, clean_price, clean_property_type, clean_sqft, clean_zipcode,
    Cell, Cleaned,
};
use super::error::PipelineResult;
use super::schema::{ListingSchema, BATHROOM_ALIASES, BEDROOM_ALIASES, PRICE, PROPERTY_TYPE, SQFT, ZIPCODE};

/// Cleaning rule attached to a known column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRule {
    Price,
    Bedrooms,
    Bathrooms,
    Zipcode,
    Sqft,
    PropertyType,
}

impl ColumnRule {
    /// Rule for a column name, if the column is one that gets cleaned.
    pub fn for_column(name: &str) -> Option<Self> {
        match name {
            PRICE => Some(ColumnRule::Price),
            ZIPCODE => Some(ColumnRule::Zipcode),
            SQFT => Some(ColumnRule::Sqft),
            PROPERTY_TYPE => Some(ColumnRule::PropertyType),
            _ if BEDROOM_ALIASES.contains(&name) => Some(ColumnRule::Bedrooms),
            _ if BATHROOM_ALIASES.contains(&name) => Some(ColumnRule::Bathrooms),
            _ => None,
        }
    }
}

/// Per-column count of cells replaced by a sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoercionCount {
    pub column: String,
    pub cells: usize,
}

/// What cleaning did to the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub coerced: Vec<CoercionCount>,
}

impl NormalizationReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_before - self.rows_after
    }

    pub fn total_coerced(&self) -> usize {
        self.coerced.iter().map(|c| c.cells).sum()
    }
}

/// Collect a rule's output, counting coercion failures.
fn collect_cleaned<T>(
    cells: &[Cell],
    rule: impl Fn(&Cell) -> Cleaned<T>,
    failures: &mut usize,
) -> Vec<Option<T>> {
    cells
        .iter()
        .map(|cell| {
            let cleaned = rule(cell);
            if cleaned.is_coercion_failure() {
                *failures += 1;
            }
            cleaned.value()
        })
        .collect()
}

/// Clean one column, returning the typed replacement and its coercion count.
///
/// Price, zip code, square footage and property type fall back to null;
/// bedroom and bathroom counts fall back to zero.
pub fn normalize_column(column: &Column, rule: ColumnRule) -> PipelineResult<(Column, usize)> {
    let name = column.name().clone();
    // Series::iter only walks a single chunk
    let series = column.as_materialized_series().rechunk();
    let cells: Vec<Cell> = series
        .iter()
        .map(|value| Cell::from_any_value(&value))
        .collect();

    let mut failures = 0;
    let cleaned = match rule {
        ColumnRule::Price => Column::new(name, collect_cleaned(&cells, clean_price, &mut failures)),
        ColumnRule::Sqft => Column::new(name, collect_cleaned(&cells, clean_sqft, &mut failures)),
        ColumnRule::Zipcode => {
            Column::new(name, collect_cleaned(&cells, clean_zipcode, &mut failures))
        }
        ColumnRule::Bedrooms | ColumnRule::Bathrooms => {
            let clean: fn(&Cell) -> Cleaned<i64> = if rule == ColumnRule::Bedrooms {
                clean_bedrooms
            } else {
                clean_bathrooms
            };
            let counts: Vec<i64> = collect_cleaned(&cells, clean, &mut failures)
                .into_iter()
                .map(|count| count.unwrap_or(0))
                .collect();
            Column::new(name, counts)
        }
        ColumnRule::PropertyType => {
            Column::new(name, collect_cleaned(&cells, clean_property_type, &mut failures))
        }
    };

    Ok((cleaned, failures))
}

/// Apply every known cleaning rule to the columns present in `df`.
///
/// Columns without a rule pass through untouched. Running this on its own
/// output changes nothing.
pub fn normalize_listings(df: &DataFrame) -> PipelineResult<(DataFrame, Vec<CoercionCount>)> {
    let mut cleaned = df.clone();
    let mut coerced = Vec::new();

    for column in df.get_columns() {
        let Some(rule) = ColumnRule::for_column(column.name().as_str()) else {
            continue;
        };
        let (replacement, failures) = normalize_column(column, rule)?;
        cleaned.with_column(replacement)?;
        if failures > 0 {
            coerced.push(CoercionCount {
                column: column.name().to_string(),
                cells: failures,
            });
        }
    }

    Ok((cleaned, coerced))
}

/// Remove rows that are null in any of `critical` columns.
pub fn drop_incomplete_rows(df: DataFrame, critical: &[&str]) -> PipelineResult<DataFrame> {
    let predicate = critical
        .iter()
        .map(|name| col(*name).is_not_null())
        .reduce(|acc, expr| acc.and(expr));

    match predicate {
        Some(predicate) => Ok(df.lazy().filter(predicate).collect()?),
        None => Ok(df),
    }
}

/// Normalize the listings and drop rows unusable for `schema`'s aggregation.
pub fn clean_listings(
    df: &DataFrame,
    schema: &ListingSchema,
) -> PipelineResult<(DataFrame, NormalizationReport)> {
    let rows_before = df.height();
    let (normalized, coerced) = normalize_listings(df)?;
    let cleaned = drop_incomplete_rows(normalized, &schema.critical_columns())?;

    let report = NormalizationReport {
        rows_before,
        rows_after: cleaned.height(),
        coerced,
    };
    Ok((cleaned, report))
}
