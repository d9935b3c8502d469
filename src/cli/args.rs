//! Command-line argument definitions using clap

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::pipeline::{
    AggregationMode, AnalysisConfig, ModeSelection, DEFAULT_MIN_COUNT, DEFAULT_PREVIEW_ROWS,
    DEFAULT_SQFT_WINDOW,
};

/// rentavg - Average rental listing prices by zip code, bedrooms and bathrooms
#[derive(Parser, Debug)]
#[command(name = "rentavg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV file with listings
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output CSV path.
    /// Defaults to the input directory with the suggested download name
    /// (filtered_rent_data.csv or filtered__averages__prices.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Aggregation mode. "auto" drops square-footage outliers when the file has
    /// property_type and sqft columns.
    #[arg(long, value_enum, default_value_t = ModeSelection::Auto)]
    pub mode: ModeSelection,

    /// Minimum listings a group needs to be reported
    #[arg(long, default_value_t = DEFAULT_MIN_COUNT, value_parser = validate_min_count)]
    pub min_count: u32,

    /// Half-width of the square-footage window around each group's median
    /// (outlier-filtered mode only)
    #[arg(long, default_value_t = DEFAULT_SQFT_WINDOW, value_parser = validate_sqft_window)]
    pub sqft_window: f64,

    /// Number of input rows to show in the data preview
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub preview_rows: usize,

    /// Also write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Overwrite an existing output file without asking
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,
}

impl Cli {
    /// Library settings for this invocation.
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            mode: self.mode,
            min_count: self.min_count,
            sqft_window: self.sqft_window,
            preview_rows: self.preview_rows,
        }
    }

    /// Output path, derived from the input directory and the mode's
    /// download name when not given explicitly.
    pub fn output_path(&self, mode: AggregationMode) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let parent = self.input.parent().unwrap_or_else(|| Path::new("."));
            parent.join(mode.download_file_name())
        })
    }
}

/// Validator for min_count parameter
fn validate_min_count(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;

    if value == 0 {
        Err("min_count must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

/// Validator for sqft_window parameter
fn validate_sqft_window(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !value.is_finite() || value < 0.0 {
        Err(format!(
            "sqft_window must be a non-negative number, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
