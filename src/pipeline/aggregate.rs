//! Group-wise price averaging with count and square-footage filters

use polars::prelude::*;

use super::error::{PipelineError, PipelineResult};
use super::schema::{AggregationMode, ListingSchema, PRICE, SQFT};

/// Output column holding the mean price of a group.
pub const AVERAGE_PRICE: &str = "Average_Price";
/// Output column holding the number of listings in a group.
pub const COUNT: &str = "Count";

const SQFT_MEDIAN: &str = "__sqft_median";

/// Thresholds applied while aggregating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationSettings {
    pub min_count: u32,
    pub sqft_window: f64,
}

/// Aggregation result plus the counts needed for reporting.
#[derive(Debug, Clone)]
pub struct GroupSummaries {
    /// Key columns, `Average_Price` and `Count`, one row per kept group
    pub frame: DataFrame,
    /// Rows that entered the final group-by (after the sqft window, if any)
    pub rows_aggregated: usize,
    /// Groups formed before the minimum-count filter
    pub groups_formed: usize,
}

impl GroupSummaries {
    pub fn groups_kept(&self) -> usize {
        self.frame.height()
    }
}

fn key_exprs(keys: &[&str]) -> Vec<Expr> {
    keys.iter().map(|key| col(*key)).collect()
}

fn ensure_numeric(df: &DataFrame, name: &str) -> PipelineResult<()> {
    let dtype = df.column(name)?.dtype();
    if dtype.is_float() || dtype.is_integer() {
        Ok(())
    } else {
        Err(PipelineError::Processing(format!(
            "column '{}' is not numeric after cleaning (found {})",
            name, dtype
        )))
    }
}

/// Keep rows whose `sqft` lies within `window` of their group's median.
///
/// The median is taken over each `(property_type, zipcode, bedrooms, bathrooms)`
/// partition before any row is removed; the window is closed on both ends.
pub fn retain_sqft_window(
    df: &DataFrame,
    schema: &ListingSchema,
    window: f64,
) -> PipelineResult<DataFrame> {
    ensure_numeric(df, SQFT)?;
    let columns: Vec<Expr> = df
        .get_column_names()
        .into_iter()
        .map(|name| col(name.clone()))
        .collect();
    let median = col(SQFT).median().over(key_exprs(&schema.group_keys()));

    let retained = df
        .clone()
        .lazy()
        .with_column(median.alias(SQFT_MEDIAN))
        .filter(
            col(SQFT)
                .gt_eq(col(SQFT_MEDIAN) - lit(window))
                .and(col(SQFT).lt_eq(col(SQFT_MEDIAN) + lit(window))),
        )
        .select(columns)
        .collect()?;

    Ok(retained)
}

/// Mean price and listing count per group, in first-appearance order of the keys.
pub fn average_price_by_group(df: &DataFrame, keys: &[&str]) -> PipelineResult<DataFrame> {
    ensure_numeric(df, PRICE)?;
    let grouped = df
        .clone()
        .lazy()
        .group_by_stable(key_exprs(keys))
        .agg([col(PRICE).mean().alias(AVERAGE_PRICE), len().alias(COUNT)])
        .collect()?;
    Ok(grouped)
}

/// Drop groups with fewer than `min_count` listings.
pub fn filter_min_count(groups: DataFrame, min_count: u32) -> PipelineResult<DataFrame> {
    let kept = groups
        .lazy()
        .filter(col(COUNT).gt_eq(lit(min_count)))
        .collect()?;
    Ok(kept)
}

/// Run the aggregation `schema.mode` calls for on cleaned listings.
pub fn summarize_groups(
    cleaned: &DataFrame,
    schema: &ListingSchema,
    settings: AggregationSettings,
) -> PipelineResult<GroupSummaries> {
    let retained = match schema.mode {
        AggregationMode::Simple => cleaned.clone(),
        AggregationMode::OutlierFiltered => {
            retain_sqft_window(cleaned, schema, settings.sqft_window)?
        }
    };

    let groups = average_price_by_group(&retained, &schema.group_keys())?;
    let groups_formed = groups.height();
    let frame = filter_min_count(groups, settings.min_count)?;

    Ok(GroupSummaries {
        frame,
        rows_aggregated: retained.height(),
        groups_formed,
    })
}
