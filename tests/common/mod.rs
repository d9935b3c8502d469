//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;
use std::path::PathBuf;
use tempfile::TempDir;

pub const SIMPLE_HEADER: &str = "zipcode,bedrooms,bathrooms,price";
pub const EXTENDED_HEADER: &str = "property_type,zipcode,beds,baths,price,sqft";

/// Join a header and rows into CSV bytes
pub fn csv_bytes(header: &str, rows: &[&str]) -> Vec<u8> {
    let mut text = String::from(header);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text.into_bytes()
}

/// Three 2 bd / 1 ba listings in 94107 priced 1000, 1100, 1200, plus two
/// listings in 10001 (too few to report)
pub fn simple_listings_csv() -> Vec<u8> {
    csv_bytes(
        SIMPLE_HEADER,
        &[
            "94107,2,1,1000",
            "94107,2,1,1100",
            "94107,2,1,1200",
            "10001,1,1,2500",
            "10001,1,1,2700",
        ],
    )
}

/// Messy extended export
///
/// - Apartment/94107/2bd/1ba: sqft 1000, 1050, 950, 2400 (median 1025, the
///   2400 unit is an outlier), prices 3000, 3100, 3200, 9000
/// - Condo/10001/studio/1ba: sqft 500, 520, 480, prices 2000, 2100, 2200,
///   plus one listing with no price
/// - House/60601: no sqft, dropped during cleaning
pub fn messy_listings_csv() -> Vec<u8> {
    csv_bytes(
        EXTENDED_HEADER,
        &[
            r#"Apartment,94107.0,2 bd,1 ba,"$3,000","1,000 sqft""#,
            r#"Apartment,94107.0,2 bd,1 ba,"$3,100","1,050 sqft""#,
            r#"Apartment,94107.0,2 bd,1.5 ba,"$3,200",950 sqft"#,
            r#"Apartment,94107.0,2 bd,1 ba,"$9,000","2,400 sqft""#,
            r#"Condo,10001,Studio,1,"$2,000",500 sqft"#,
            r#"Condo,10001,studio,1 ba,"$2,100",520 sqft"#,
            r#"Condo,10001,Studio,1,"$2,200",480 sqft"#,
            r#"Condo,10001,Studio,1,,500 sqft"#,
            r#"House,60601,3,2,"$4,000","#,
        ],
    )
}

/// Format with a comma thousands separator
pub fn with_thousands(value: u32) -> String {
    if value >= 1000 {
        format!("{},{:03}", value / 1000, value % 1000)
    } else {
        value.to_string()
    }
}

/// Synthetic extended listings with a fixed seed
///
/// Values are formatted the way real exports are (currency symbols,
/// thousands separators, unit suffixes, occasional studios).
pub fn random_listings_csv(rows: usize, seed: u64) -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let types = ["Apartment", "Condo", "House"];
    let zips = [94107, 94110, 10001, 60601];

    let mut lines = Vec::with_capacity(rows);
    for _ in 0..rows {
        let property_type = types[rng.gen_range(0..types.len())];
        let zip = zips[rng.gen_range(0..zips.len())];
        let beds = rng.gen_range(0..3);
        let beds = if beds == 0 {
            "Studio".to_string()
        } else {
            format!("{} bd", beds)
        };
        let baths = rng.gen_range(1..3);
        let price: u32 = rng.gen_range(1_000..6_000);
        let sqft: u32 = rng.gen_range(400..1_600);
        lines.push(format!(
            "{},{}.0,{},{} ba,\"${}\",\"{} sqft\"",
            property_type,
            zip,
            beds,
            baths,
            with_thousands(price),
            with_thousands(sqft)
        ));
    }

    let rows: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
    csv_bytes(EXTENDED_HEADER, &rows)
}

/// Write CSV bytes into a temporary directory
pub fn create_temp_csv(bytes: &[u8]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("listings.csv");
    std::fs::write(&csv_path, bytes).unwrap();
    (temp_dir, csv_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// All values of an integer column
pub fn i64_values(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Int64)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect()
}

/// All values of a float column
pub fn f64_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

/// All values of a string column
pub fn str_values(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect()
}
