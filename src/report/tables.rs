//! Tabular display of DataFrames

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Table};
use console::style;
use polars::prelude::*;

use crate::pipeline::{PipelineResult, PRICE_DECIMALS};

/// Format a single value for display. Floats are shown with `float_decimals`
/// places when given.
pub fn format_value(value: &AnyValue<'_>, float_decimals: Option<usize>) -> String {
    match (value, float_decimals) {
        (AnyValue::Null, _) => String::new(),
        (AnyValue::String(s), _) => s.to_string(),
        (AnyValue::StringOwned(s), _) => s.to_string(),
        (AnyValue::Float64(v), Some(decimals)) => format!("{:.*}", decimals, v),
        (AnyValue::Float32(v), Some(decimals)) => format!("{:.*}", decimals, v),
        (other, _) => other.to_string(),
    }
}

/// Build a table from the first `max_rows` rows of `df`.
pub fn build_table(
    df: &DataFrame,
    max_rows: usize,
    float_decimals: Option<usize>,
) -> PipelineResult<Table> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        df.get_column_names()
            .into_iter()
            .map(|name| Cell::new(name.as_str()).add_attribute(Attribute::Bold)),
    );

    let rows = df.height().min(max_rows);
    for row in 0..rows {
        let mut cells = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            let value = column.get(row)?;
            let cell = Cell::new(format_value(&value, float_decimals));
            let cell = if column.dtype().is_float() || column.dtype().is_integer() {
                cell.set_alignment(CellAlignment::Right)
            } else {
                cell
            };
            cells.push(cell);
        }
        table.add_row(cells);
    }

    Ok(table)
}

fn print_indented(title: &str, table: &Table, total_rows: usize, shown_rows: usize) {
    println!();
    println!("    {} {}", style("▤").cyan(), style(title).white().bold());
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
    if total_rows > shown_rows {
        println!(
            "    {}",
            style(format!("… {} more row(s)", total_rows - shown_rows)).dim()
        );
    }
}

/// Print the uploaded data as read, before cleaning.
pub fn print_preview(preview: &DataFrame) -> PipelineResult<()> {
    let table = build_table(preview, preview.height(), None)?;
    print_indented("Data Preview", &table, preview.height(), preview.height());
    Ok(())
}

/// Print the filtered group summaries with prices rounded for display.
pub fn print_results(summaries: &DataFrame, max_rows: usize) -> PipelineResult<()> {
    let table = build_table(summaries, max_rows, Some(PRICE_DECIMALS))?;
    print_indented(
        "Filtered Results",
        &table,
        summaries.height(),
        summaries.height().min(max_rows),
    );
    Ok(())
}
