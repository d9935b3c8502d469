//! Loosely-typed CSV cells and the per-column cleaning rules.
//!
//! A CSV export mixes strings and numbers in the same column ("$1,200" next to
//! 1200.5), so every rule works on a [`Cell`] and renders typed values back to
//! text before applying the same string rules. That keeps the rules identical
//! whether polars inferred a column as numeric or as text, and makes cleaning
//! an already-cleaned column a no-op.

use std::borrow::Cow;

use polars::prelude::AnyValue;

/// A single untyped cell value as read from the CSV.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Build a cell from a polars value.
    pub fn from_any_value(value: &AnyValue<'_>) -> Self {
        match value {
            AnyValue::Null => Cell::Missing,
            AnyValue::String(s) => Cell::Text((*s).to_string()),
            AnyValue::StringOwned(s) => Cell::Text(s.to_string()),
            AnyValue::Boolean(b) => Cell::Text(b.to_string()),
            AnyValue::Int8(v) => Cell::Integer(i64::from(*v)),
            AnyValue::Int16(v) => Cell::Integer(i64::from(*v)),
            AnyValue::Int32(v) => Cell::Integer(i64::from(*v)),
            AnyValue::Int64(v) => Cell::Integer(*v),
            AnyValue::UInt8(v) => Cell::Integer(i64::from(*v)),
            AnyValue::UInt16(v) => Cell::Integer(i64::from(*v)),
            AnyValue::UInt32(v) => Cell::Integer(i64::from(*v)),
            AnyValue::UInt64(v) => match i64::try_from(*v) {
                Ok(v) => Cell::Integer(v),
                Err(_) => Cell::Float(*v as f64),
            },
            AnyValue::Float32(v) => Cell::Float(f64::from(*v)),
            AnyValue::Float64(v) => Cell::Float(*v),
            other => Cell::Text(other.to_string()),
        }
    }

    /// Text form of the cell, `None` when missing.
    ///
    /// Floats use Rust's shortest round-trip formatting, so `94107.0`
    /// renders as `"94107"` and `1200.5` as `"1200.5"`.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Cell::Missing => None,
            Cell::Integer(v) => Some(Cow::Owned(v.to_string())),
            Cell::Float(v) => Some(Cow::Owned(v.to_string())),
            Cell::Text(s) => Some(Cow::Borrowed(s.as_str())),
        }
    }

    /// Non-empty text form of the cell.
    fn non_blank_text(&self) -> Option<Cow<'_, str>> {
        self.as_text().filter(|text| !text.trim().is_empty())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// Outcome of applying a cleaning rule to one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cleaned<T> {
    /// The cell yielded a usable value.
    Value(T),
    /// The cell was empty before cleaning.
    Empty,
    /// The cell had content that could not be coerced (a cell coercion failure).
    Unparseable,
}

impl<T> Cleaned<T> {
    /// The cleaned value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Cleaned::Value(v) => Some(v),
            Cleaned::Empty | Cleaned::Unparseable => None,
        }
    }

    /// The cleaned value, or `sentinel` for empty and unparseable cells.
    pub fn or_sentinel(self, sentinel: T) -> T {
        self.value().unwrap_or(sentinel)
    }

    /// Whether the cell had content that had to be replaced by a sentinel.
    pub fn is_coercion_failure(&self) -> bool {
        matches!(self, Cleaned::Unparseable)
    }

    fn from_parse<E>(parsed: Result<T, E>) -> Self {
        parsed.map(Cleaned::Value).unwrap_or(Cleaned::Unparseable)
    }
}

/// First maximal run of ASCII digits in `text`.
fn first_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Parse a currency value, keeping only digits and decimal points.
///
/// `"$1,200"` becomes `1200.0`; a cell with no digits left is unparseable.
pub fn clean_price(cell: &Cell) -> Cleaned<f64> {
    let Some(text) = cell.non_blank_text() else {
        return Cleaned::Empty;
    };
    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if stripped.is_empty() {
        return Cleaned::Unparseable;
    }
    Cleaned::from_parse(stripped.parse::<f64>())
}

/// Parse a bedroom count. "Studio" (any case) counts as zero bedrooms.
pub fn clean_bedrooms(cell: &Cell) -> Cleaned<i64> {
    let Some(text) = cell.non_blank_text() else {
        return Cleaned::Empty;
    };
    let text = text.to_ascii_lowercase().replace("studio", "0");
    match first_digit_run(&text) {
        Some(digits) => Cleaned::from_parse(digits.parse::<i64>()),
        None => Cleaned::Unparseable,
    }
}

/// Parse a bathroom count from its first run of digits.
///
/// Fractional counts are truncated: `"1.5 ba"` yields `1`.
pub fn clean_bathrooms(cell: &Cell) -> Cleaned<i64> {
    let Some(text) = cell.non_blank_text() else {
        return Cleaned::Empty;
    };
    match first_digit_run(&text) {
        Some(digits) => Cleaned::from_parse(digits.parse::<i64>()),
        None => Cleaned::Unparseable,
    }
}

/// Parse a zip code, discarding anything from the first `.` onwards.
pub fn clean_zipcode(cell: &Cell) -> Cleaned<i64> {
    let Some(text) = cell.non_blank_text() else {
        return Cleaned::Empty;
    };
    let head = text.split('.').next().unwrap_or_default().trim();
    Cleaned::from_parse(head.parse::<i64>())
}

/// Parse a square footage such as `"1,200 sqft"`.
pub fn clean_sqft(cell: &Cell) -> Cleaned<f64> {
    let Some(text) = cell.non_blank_text() else {
        return Cleaned::Empty;
    };
    let text = text.replace(',', "").replace(" sqft", "");
    match first_digit_run(&text) {
        Some(digits) => Cleaned::from_parse(digits.parse::<f64>()),
        None => Cleaned::Unparseable,
    }
}

/// Trim a property category; blank categories are empty.
pub fn clean_property_type(cell: &Cell) -> Cleaned<String> {
    match cell.non_blank_text() {
        Some(text) => Cleaned::Value(text.trim().to_string()),
        None => Cleaned::Empty,
    }
}
