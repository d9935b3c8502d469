//! Unit tests for listing ingestion and column checks

use rentavg::pipeline::{
    get_column_names, preview, read_listings, resolve_schema, AggregationMode, ModeSelection,
    PipelineError,
};

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_read_simple_listings() {
    let df = read_listings(&simple_listings_csv()).unwrap();

    assert_shape(&df, 5, 4);
    assert_eq!(
        get_column_names(&df),
        vec!["zipcode", "bedrooms", "bathrooms", "price"]
    );
}

#[test]
fn test_read_keeps_every_column() {
    let bytes = csv_bytes(
        "listing_id,zipcode,bedrooms,bathrooms,price,agent",
        &["a1,94107,2,1,1000,Ann", "a2,94107,2,1,1100,Bob"],
    );
    let df = read_listings(&bytes).unwrap();

    assert_shape(&df, 2, 6);
    assert_has_columns(&df, &["listing_id", "agent"]);
}

#[test]
fn test_mixed_columns_fall_back_to_text() {
    // The currency-formatted value comes last, after schema inference would
    // have settled on a numeric type from the first rows alone
    let mut rows: Vec<String> = (0..200).map(|i| format!("94107,2,1,{}", 1000 + i)).collect();
    rows.push(r#"94107,2,1,"$1,500""#.to_string());
    let rows: Vec<&str> = rows.iter().map(|s| s.as_str()).collect();

    let df = read_listings(&csv_bytes(SIMPLE_HEADER, &rows)).unwrap();

    assert_eq!(df.height(), 201);
    assert_eq!(
        str_values(&df, "price").last().cloned().flatten(),
        Some("$1,500".to_string())
    );
}

#[test]
fn test_empty_fields_become_nulls() {
    let bytes = csv_bytes(SIMPLE_HEADER, &["94107,2,1,", ",2,1,1000"]);
    let df = read_listings(&bytes).unwrap();

    assert_eq!(df.column("price").unwrap().null_count(), 1);
    assert_eq!(df.column("zipcode").unwrap().null_count(), 1);
}

#[test]
fn test_empty_input_is_malformed() {
    for bytes in [&b""[..], &b"  \n"[..]] {
        let err = read_listings(bytes).unwrap_err();
        assert!(
            matches!(err, PipelineError::MalformedInput(_)),
            "Expected malformed input, got {:?}",
            err
        );
    }
}

#[test]
fn test_preview_limits_rows() {
    let df = read_listings(&messy_listings_csv()).unwrap();

    assert_shape(&preview(&df, 5), 5, 6);
    assert_shape(&preview(&df, 50), 9, 6);
}

#[test]
fn test_schema_error_names_missing_price() {
    let bytes = csv_bytes("zipcode,bedrooms,bathrooms", &["94107,2,1"]);
    let df = read_listings(&bytes).unwrap();

    let err = resolve_schema(&df, ModeSelection::Auto).unwrap_err();

    assert!(err.missing_columns().contains(&"price".to_string()));
    assert!(err.to_string().contains("price"));
}

#[test]
fn test_schema_resolves_extended_export() {
    let df = read_listings(&messy_listings_csv()).unwrap();
    let schema = resolve_schema(&df, ModeSelection::Auto).unwrap();

    assert_eq!(schema.mode, AggregationMode::OutlierFiltered);
    assert_eq!(schema.bedrooms, "beds");
    assert_eq!(schema.bathrooms, "baths");
}

#[test]
fn test_simple_mode_can_be_forced_on_extended_export() {
    let df = read_listings(&messy_listings_csv()).unwrap();
    let schema = resolve_schema(&df, ModeSelection::Simple).unwrap();

    assert_eq!(schema.mode, AggregationMode::Simple);
    assert_eq!(schema.group_keys(), vec!["zipcode", "beds", "baths"]);
}

#[test]
fn test_large_upload_is_read_into_single_chunks() {
    let rows: Vec<String> = (0..20_000)
        .map(|i| format!("9410{},2 bd,1 ba,\"${}\"", i % 10, with_thousands(1_000 + (i % 1_000))))
        .collect();
    let rows: Vec<&str> = rows.iter().map(|s| s.as_str()).collect();

    let df = read_listings(&csv_bytes(SIMPLE_HEADER, &rows)).unwrap();

    assert_eq!(df.height(), 20_000);
    for column in df.get_columns() {
        assert_eq!(column.as_materialized_series().n_chunks(), 1, "{}", column.name());
    }
}

#[test]
fn test_invalid_utf8_is_malformed() {
    let mut bytes = csv_bytes(SIMPLE_HEADER, &["94107,2,1,1000"]);
    bytes.extend_from_slice(b"94107,2,1,\xff\xfe\xfd\n");

    let err = read_listings(&bytes).unwrap_err();

    assert!(matches!(err, PipelineError::MalformedInput(_)), "got {:?}", err);
}

#[test]
fn test_ragged_row_is_malformed() {
    let bytes = csv_bytes(SIMPLE_HEADER, &["94107,2,1,1000", "94107,2,1,1100,pets ok,extra"]);

    let err = read_listings(&bytes).unwrap_err();

    assert!(matches!(err, PipelineError::MalformedInput(_)), "got {:?}", err);
    assert!(err.to_string().starts_with("Could not read the uploaded file as CSV"));
}
