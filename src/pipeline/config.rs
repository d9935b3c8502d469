//! Analysis settings shared by the library entry points and the CLI

use clap::ValueEnum;
use serde::Serialize;

use super::aggregate::AggregationSettings;

/// Smallest group size considered statistically meaningful.
pub const DEFAULT_MIN_COUNT: u32 = 3;

/// Half-width of the square-footage window around a group's median.
pub const DEFAULT_SQFT_WINDOW: f64 = 150.0;

/// Rows shown in the data preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// How the aggregation mode is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSelection {
    /// Outlier-filtered when `property_type` and `sqft` are present, simple otherwise
    #[default]
    Auto,
    /// Group by zip code, bedrooms and bathrooms
    Simple,
    /// Group by property type as well and drop square-footage outliers first
    Outlier,
}

impl ModeSelection {
    pub fn label(&self) -> &'static str {
        match self {
            ModeSelection::Auto => "auto",
            ModeSelection::Simple => "simple",
            ModeSelection::Outlier => "outlier",
        }
    }
}

/// Settings for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub mode: ModeSelection,
    pub min_count: u32,
    pub sqft_window: f64,
    pub preview_rows: usize,
}

impl AnalysisConfig {
    /// Thresholds handed to the aggregation stage.
    pub fn aggregation_settings(&self) -> AggregationSettings {
        AggregationSettings {
            min_count: self.min_count,
            sqft_window: self.sqft_window,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: ModeSelection::Auto,
            min_count: DEFAULT_MIN_COUNT,
            sqft_window: DEFAULT_SQFT_WINDOW,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_settings_follow_config() {
        let config = AnalysisConfig {
            min_count: 7,
            sqft_window: 80.0,
            ..AnalysisConfig::default()
        };
        assert_eq!(
            config.aggregation_settings(),
            AggregationSettings {
                min_count: 7,
                sqft_window: 80.0,
            }
        );
    }
}
