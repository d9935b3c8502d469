//! JSON export of a pipeline run

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use polars::prelude::*;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::pipeline::{
    AggregationMode, Analysis, AnalysisConfig, CoercionCount, ModeSelection, AVERAGE_PRICE, COUNT,
};

/// Metadata about the run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// rentavg version
    pub rentavg_version: String,
    /// Input file path
    pub input_file: String,
    /// Mode requested on the command line
    pub mode_selection: ModeSelection,
    /// Mode actually used
    pub mode: AggregationMode,
    /// Group key columns in output order
    pub group_keys: Vec<String>,
    pub min_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sqft_window: Option<f64>,
}

/// Row and group counts for the run
#[derive(Serialize)]
pub struct RunCounts {
    pub input_rows: usize,
    pub rows_after_cleaning: usize,
    pub rows_aggregated: usize,
    pub groups_formed: usize,
    pub groups_kept: usize,
    pub coerced_cells: Vec<CoercionCount>,
}

/// One reported group
#[derive(Serialize)]
pub struct GroupEntry {
    /// Key column name to value
    pub key: Map<String, Value>,
    pub average_price: f64,
    pub count: u64,
}

/// Complete run report
#[derive(Serialize)]
pub struct RunReport {
    pub metadata: RunMetadata,
    pub counts: RunCounts,
    pub groups: Vec<GroupEntry>,
}

fn json_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        AnyValue::Float64(v) => Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null),
        AnyValue::Float32(v) => Number::from_f64(f64::from(v))
            .map(Value::Number)
            .unwrap_or(Value::Null),
        other => match other.extract::<i64>() {
            Some(v) => Value::from(v),
            None => Value::String(other.to_string()),
        },
    }
}

/// Collect the summary frame into serializable group entries.
pub fn group_entries(summaries: &DataFrame, keys: &[&str]) -> Result<Vec<GroupEntry>> {
    let average = summaries.column(AVERAGE_PRICE)?.cast(&DataType::Float64)?;
    let average = average.f64()?;
    let count = summaries.column(COUNT)?.cast(&DataType::UInt64)?;
    let count = count.u64()?;

    let mut entries = Vec::with_capacity(summaries.height());
    for row in 0..summaries.height() {
        let mut key = Map::new();
        for name in keys {
            let value = summaries.column(name)?.get(row)?;
            key.insert(name.to_string(), json_value(value));
        }
        entries.push(GroupEntry {
            key,
            average_price: average.get(row).unwrap_or(f64::NAN),
            count: count.get(row).unwrap_or(0),
        });
    }
    Ok(entries)
}

/// Build the report for a finished run.
pub fn build_run_report(
    analysis: &Analysis,
    config: &AnalysisConfig,
    input_file: &str,
) -> Result<RunReport> {
    let keys = analysis.schema.group_keys();
    let groups = group_entries(&analysis.summaries.frame, &keys)?;

    Ok(RunReport {
        metadata: RunMetadata {
            timestamp: Utc::now().to_rfc3339(),
            rentavg_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: input_file.to_string(),
            mode_selection: config.mode,
            mode: analysis.mode(),
            group_keys: keys.iter().map(|k| k.to_string()).collect(),
            min_count: config.min_count,
            sqft_window: (analysis.mode() == AggregationMode::OutlierFiltered)
                .then_some(config.sqft_window),
        },
        counts: RunCounts {
            input_rows: analysis.normalization.rows_before,
            rows_after_cleaning: analysis.normalization.rows_after,
            rows_aggregated: analysis.summaries.rows_aggregated,
            groups_formed: analysis.summaries.groups_formed,
            groups_kept: analysis.summaries.groups_kept(),
            coerced_cells: analysis.normalization.coerced.clone(),
        },
        groups,
    })
}

/// Write the run report as pretty-printed JSON.
pub fn export_run_report(report: &RunReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write run report: {}", output_path.display()))?;
    Ok(())
}
