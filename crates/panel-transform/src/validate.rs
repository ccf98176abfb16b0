//! Fail-fast checks run before any matrix is built.

use panel_model::{PanelColumns, TreatmentEntry};
use polars::prelude::DataFrame;

use crate::domain::PanelDomain;
use crate::error::{PanelError, Result};

/// Check that every column name is supplied and present in `df`.
///
/// Blank names are reported before any lookup, so an unset role is a
/// configuration error rather than a schema one.
pub fn validate_columns(df: &DataFrame, columns: &PanelColumns) -> Result<()> {
    for (role, name) in columns.roles() {
        if name.trim().is_empty() {
            return Err(PanelError::Configuration {
                what: format!("{role} column name is required"),
            });
        }
    }
    for (_, name) in columns.roles() {
        if df.get_column_index(name).is_none() {
            return Err(PanelError::Schema {
                column: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Check every entry against the table's unit and period domains.
pub fn validate_entries(
    entries: &[TreatmentEntry],
    domain: &PanelDomain,
    columns: &PanelColumns,
) -> Result<()> {
    for entry in entries {
        if domain.unit_index(&entry.unit).is_none() {
            return Err(PanelError::UnknownUnit {
                unit: entry.unit.clone(),
                column: columns.unit.clone(),
            });
        }
        for period in std::iter::once(entry.onset).chain(entry.end) {
            if domain.time_index(&period).is_none() {
                return Err(PanelError::UnknownPeriod {
                    period,
                    column: columns.time.clone(),
                });
            }
        }
        if let Some(end) = entry.end
            && end < entry.onset
        {
            return Err(PanelError::InvertedWindow {
                unit: entry.unit.clone(),
                onset: entry.onset,
                end,
            });
        }
    }
    Ok(())
}
