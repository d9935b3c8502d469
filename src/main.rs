//! rentavg: Rental Market Analyzer CLI
//!
//! Reads a CSV of listings, cleans price/bedroom/bathroom/zip/sqft columns,
//! and writes the average price and listing count per group.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use indicatif::ProgressBar;

use rentavg::cli::{confirm_overwrite, Cli};
use rentavg::pipeline::{
    clean_listings, preview, read_listings, resolve_schema, summaries_to_csv, summarize_groups,
    AggregationMode, Analysis, PipelineResult, CSV_MIME_TYPE,
};
use rentavg::report::{build_run_report, export_run_report, print_preview, print_results, RunSummary};
use rentavg::utils::{
    create_spinner, finish_with_error, finish_with_success, print_banner,
    print_completion, print_config, print_count, print_info, print_step_header, print_step_time,
    print_success, print_warning, ConfigCard,
};

/// Maximum number of result rows printed to the terminal
const RESULT_DISPLAY_ROWS: usize = 50;

/// Finish a step's spinner according to its outcome.
fn finish_step<T>(spinner: &ProgressBar, message: &str, result: PipelineResult<T>) -> Result<T> {
    match result {
        Ok(value) => {
            finish_with_success(spinner, message);
            Ok(value)
        }
        Err(err) => {
            finish_with_error(spinner, "Step failed");
            Err(err.into())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.analysis_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&ConfigCard {
        input: &cli.input,
        output: cli.output.as_deref(),
        mode: config.mode.label(),
        min_count: config.min_count,
        sqft_window: config.sqft_window,
    });

    // Steps mirror pipeline::analyze, split up for per-step progress

    // Step 1: Load listings
    print_step_header(1, "Load Listings");
    let step_start = Instant::now();
    let bytes = std::fs::read(&cli.input)
        .with_context(|| format!("Failed to read input file: {}", cli.input.display()))?;
    let spinner = create_spinner("Parsing CSV...");
    let raw = finish_step(&spinner, "CSV parsed", read_listings(&bytes))?;

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", raw.height());
    println!("      Columns: {}", raw.width());
    let preview = preview(&raw, config.preview_rows);
    print_preview(&preview)?;
    print_step_time(step_start.elapsed());

    // Step 2: Check required columns
    print_step_header(2, "Check Columns");
    let step_start = Instant::now();
    let schema = resolve_schema(&raw, config.mode)?;
    print_success(&format!(
        "Grouping by ({}) in {} mode",
        schema.group_keys().join(", "),
        schema.mode.label()
    ));
    print_step_time(step_start.elapsed());

    // Step 3: Clean columns
    print_step_header(3, "Clean Listings");
    let step_start = Instant::now();
    let spinner = create_spinner("Normalizing price, bedroom, bathroom, zip and sqft columns...");
    let (cleaned, normalization) =
        finish_step(&spinner, "Columns normalized", clean_listings(&raw, &schema))?;

    if normalization.total_coerced() > 0 {
        print_count(
            "unparseable cell(s)",
            normalization.total_coerced(),
            Some("(replaced with empty or zero)"),
        );
    }
    if normalization.rows_dropped() == 0 {
        print_info("No listings missing critical values");
    } else {
        print_count(
            "listing(s) missing critical values",
            normalization.rows_dropped(),
            Some(&format!("({})", schema.critical_columns().join(", "))),
        );
        print_success("Dropped incomplete listings");
    }
    print_step_time(step_start.elapsed());

    // Step 4: Aggregate
    print_step_header(4, "Average Prices");
    let step_start = Instant::now();
    let spinner = create_spinner("Grouping listings...");
    let summaries = finish_step(
        &spinner,
        "Groups summarized",
        summarize_groups(&cleaned, &schema, config.aggregation_settings()),
    )?;

    if schema.mode == AggregationMode::OutlierFiltered {
        let outside = cleaned.height().saturating_sub(summaries.rows_aggregated);
        print_count(
            "listing(s) outside the sqft window",
            outside,
            Some(&format!("(median ±{})", config.sqft_window)),
        );
    }
    print_count(
        "group(s)",
        summaries.groups_kept(),
        Some(&format!("(≥{} listings)", config.min_count)),
    );
    if summaries.groups_kept() == 0 {
        print_warning("No group has enough listings to report");
    } else {
        print_results(&summaries.frame, RESULT_DISPLAY_ROWS)?;
    }
    print_step_time(step_start.elapsed());

    // Step 5: Save
    print_step_header(5, "Save Results");
    let step_start = Instant::now();
    let csv = summaries_to_csv(&summaries.frame)?;
    let output_path = cli.output_path(schema.mode);

    if output_path.exists() && !cli.no_confirm && !confirm_overwrite(&output_path)? {
        print_warning("Output file left unchanged");
        return Ok(());
    }

    let spinner = create_spinner("Writing output file...");
    if let Err(err) = std::fs::write(&output_path, &csv) {
        finish_with_error(&spinner, "Write failed");
        return Err(err)
            .with_context(|| format!("Failed to write output file: {}", output_path.display()));
    }
    finish_with_success(
        &spinner,
        &format!("Saved to {} ({})", output_path.display(), CSV_MIME_TYPE),
    );

    let analysis = Analysis {
        preview,
        schema,
        normalization,
        summaries,
        csv,
    };

    if let Some(report_path) = &cli.report {
        let report = build_run_report(&analysis, &config, &cli.input.display().to_string())?;
        export_run_report(&report, report_path)?;
        print_success(&format!("Run report written to {}", report_path.display()));
    }
    print_step_time(step_start.elapsed());

    RunSummary::from_analysis(&analysis).display();
    print_completion();

    Ok(())
}
