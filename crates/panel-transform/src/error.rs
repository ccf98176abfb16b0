//! Error types for panel construction and queries.

use panel_model::{TimeId, TreatmentPattern, UnitId};
use thiserror::Error;

/// Errors raised while building or querying a balanced panel.
///
/// Every construction error aborts the build; a panel is never returned in a
/// partially valid state.
#[derive(Debug, Error)]
pub enum PanelError {
    // === Configuration Errors ===
    /// A required column name or the treatment specification was not supplied.
    #[error("missing configuration: {what}")]
    Configuration { what: String },

    /// A named column does not exist in the table.
    #[error("column '{column}' not found in table")]
    Schema { column: String },

    // === Treatment Specification Errors ===
    /// A treatment entry references a unit absent from the unit column.
    #[error("unknown unit '{unit}': not present in column '{column}'")]
    UnknownUnit { unit: UnitId, column: String },

    /// A treatment entry references a period absent from the time column.
    #[error("unknown period '{period}': not present in column '{column}'")]
    UnknownPeriod { period: TimeId, column: String },

    /// The specification mixes bounded and unbounded entries.
    #[error("inconsistent treatment specification: {reason}")]
    Shape { reason: String },

    /// A treatment window ends before it starts.
    #[error("treatment window for unit '{unit}' ends at {end} before its start {onset}")]
    InvertedWindow {
        unit: UnitId,
        onset: TimeId,
        end: TimeId,
    },

    // === Balance Errors ===
    /// No source row covers a (unit, period) cell.
    #[error("panel is not balanced: no observation for unit '{unit}' at period '{period}'")]
    MissingObservation { unit: UnitId, period: TimeId },

    /// More than one source row covers a (unit, period) cell.
    #[error("panel is not balanced: duplicate observations for unit '{unit}' at period '{period}'")]
    DuplicateObservation { unit: UnitId, period: TimeId },

    // === Value Errors ===
    /// A cell value cannot serve as a unit, period or outcome.
    #[error("unsupported value {value} in column '{column}' at row {row}")]
    UnsupportedValue {
        column: String,
        row: usize,
        value: String,
    },

    // === Query Errors ===
    /// The accessor is not defined for the panel's treatment pattern.
    #[error("{operation} is not supported for {pattern} panels")]
    UnsupportedPattern {
        operation: &'static str,
        pattern: TreatmentPattern,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for PanelError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for panel operations.
pub type Result<T> = std::result::Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PanelError::UnknownUnit {
            unit: UnitId::from("c"),
            column: "state".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown unit 'c': not present in column 'state'"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let panel_err: PanelError = polars_err.into();
        assert!(matches!(panel_err, PanelError::DataFrame { .. }));
    }
}
