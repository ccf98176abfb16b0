//! Polars AnyValue conversions into panel identifiers and outcomes.

use chrono::NaiveDate;
use panel_model::{DATE_FORMAT, TimeId, UnitId};
use polars::prelude::{AnyValue, Column};

use crate::error::{PanelError, Result};

/// Days from 0001-01-01 (CE day 1) to the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Converts an integer AnyValue to i64, returning None for any other type.
fn any_to_int(value: &AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Int8(v) => Some(i64::from(*v)),
        AnyValue::Int16(v) => Some(i64::from(*v)),
        AnyValue::Int32(v) => Some(i64::from(*v)),
        AnyValue::Int64(v) => Some(*v),
        AnyValue::UInt8(v) => Some(i64::from(*v)),
        AnyValue::UInt16(v) => Some(i64::from(*v)),
        AnyValue::UInt32(v) => Some(i64::from(*v)),
        AnyValue::UInt64(v) => i64::try_from(*v).ok(),
        _ => None,
    }
}

/// Converts a polars Date (days since the Unix epoch) to a calendar date.
pub fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// Converts an AnyValue to a unit identifier.
///
/// Integer values become [`UnitId::Int`]; strings become [`UnitId::Text`]
/// exactly as stored, padding included. Nulls and other types are rejected.
pub fn any_to_unit(value: &AnyValue<'_>) -> Option<UnitId> {
    if let Some(v) = any_to_int(value) {
        return Some(UnitId::Int(v));
    }
    match value {
        AnyValue::String(s) => Some(UnitId::from(*s)),
        AnyValue::StringOwned(s) => Some(UnitId::from(s.as_str())),
        _ => None,
    }
}

/// Converts an AnyValue to a period identifier.
///
/// Integer values become [`TimeId::Int`]; polars dates and ISO `YYYY-MM-DD`
/// strings become [`TimeId::Date`].
pub fn any_to_time(value: &AnyValue<'_>) -> Option<TimeId> {
    if let Some(v) = any_to_int(value) {
        return Some(TimeId::Int(v));
    }
    match value {
        AnyValue::Date(days) => date_from_epoch_days(*days).map(TimeId::Date),
        AnyValue::String(s) => parse_date(s),
        AnyValue::StringOwned(s) => parse_date(s.as_str()),
        _ => None,
    }
}

fn parse_date(value: &str) -> Option<TimeId> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .ok()
        .map(TimeId::Date)
}

/// Converts a numeric AnyValue to f64, returning None for nulls and
/// non-numeric types.
pub fn any_to_f64(value: &AnyValue<'_>) -> Option<f64> {
    if let Some(v) = any_to_int(value) {
        return Some(v as f64);
    }
    match value {
        AnyValue::Float32(v) => Some(f64::from(*v)),
        AnyValue::Float64(v) => Some(*v),
        _ => None,
    }
}

/// Extract every value of `column` through `convert`, failing on the first
/// value the conversion rejects.
pub fn column_values<T>(
    column: &Column,
    convert: impl Fn(&AnyValue<'_>) -> Option<T>,
) -> Result<Vec<T>> {
    let mut values = Vec::with_capacity(column.len());
    for row in 0..column.len() {
        let value = column.get(row)?;
        match convert(&value) {
            Some(converted) => values.push(converted),
            None => {
                return Err(PanelError::UnsupportedValue {
                    column: column.name().to_string(),
                    row,
                    value: value.to_string(),
                });
            }
        }
    }
    Ok(values)
}
