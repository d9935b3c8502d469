//! Run summary report generation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{AggregationMode, Analysis};

/// Summary of one pipeline run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub mode: Option<AggregationMode>,
    pub input_rows: usize,
    pub rows_dropped: usize,
    pub coerced_cells: Vec<(String, usize)>,
    pub rows_outside_window: usize,
    pub groups_formed: usize,
    pub groups_kept: usize,
}

impl RunSummary {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let normalization = &analysis.normalization;
        Self {
            mode: Some(analysis.mode()),
            input_rows: normalization.rows_before,
            rows_dropped: normalization.rows_dropped(),
            coerced_cells: normalization
                .coerced
                .iter()
                .map(|c| (c.column.clone(), c.cells))
                .collect(),
            rows_outside_window: normalization
                .rows_after
                .saturating_sub(analysis.summaries.rows_aggregated),
            groups_formed: analysis.summaries.groups_formed,
            groups_kept: analysis.summaries.groups_kept(),
        }
    }

    pub fn groups_dropped(&self) -> usize {
        self.groups_formed - self.groups_kept
    }

    fn count_cell(count: usize) -> Cell {
        Cell::new(count).fg(if count == 0 { Color::White } else { Color::Red })
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        if let Some(mode) = self.mode {
            table.add_row(vec![Cell::new("🧭 Mode"), Cell::new(mode.label())]);
        }
        table.add_row(vec![
            Cell::new("📁 Input Listings"),
            Cell::new(self.input_rows),
        ]);
        table.add_row(vec![
            Cell::new("🗑️  Dropped (Incomplete)"),
            Self::count_cell(self.rows_dropped),
        ]);
        if self.mode == Some(AggregationMode::OutlierFiltered) {
            table.add_row(vec![
                Cell::new("📐 Dropped (Sqft Outliers)"),
                Self::count_cell(self.rows_outside_window),
            ]);
        }
        table.add_row(vec![
            Cell::new("🧮 Groups Formed"),
            Cell::new(self.groups_formed),
        ]);
        table.add_row(vec![
            Cell::new("🔻 Groups Below Minimum"),
            Self::count_cell(self.groups_dropped()),
        ]);
        table.add_row(vec![
            Cell::new("✅ Groups Reported"),
            Cell::new(self.groups_kept)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.coerced_cells.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("UNPARSEABLE CELLS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for (column, cells) in &self.coerced_cells {
                println!(
                    "        {} {} {}",
                    style("•").dim(),
                    column,
                    style(format!("({})", cells)).dim()
                );
            }
        }
    }
}
