//! Unit and period domains of a long-format table.

use std::collections::BTreeSet;

use panel_model::{TimeId, UnitId};
use polars::prelude::DataFrame;

use crate::error::{PanelError, Result};
use crate::values::{any_to_time, any_to_unit, column_values};

/// Per-row (unit, period) keys read from a long table, in table order.
#[derive(Debug, Clone)]
pub struct LongKeys {
    pub units: Vec<UnitId>,
    pub times: Vec<TimeId>,
}

impl LongKeys {
    /// Read the unit and time columns of `df`.
    pub fn read(df: &DataFrame, unit_column: &str, time_column: &str) -> Result<Self> {
        let units = column_values(require_column(df, unit_column)?, any_to_unit)?;
        let times = column_values(require_column(df, time_column)?, any_to_time)?;
        Ok(Self { units, times })
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns true if rows are already ordered by (unit, period).
    pub fn is_sorted(&self) -> bool {
        (1..self.len()).all(|row| {
            (&self.units[row - 1], &self.times[row - 1]) <= (&self.units[row], &self.times[row])
        })
    }
}

fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a polars::prelude::Column> {
    df.column(name).map_err(|_| PanelError::Schema {
        column: name.to_string(),
    })
}

/// Sorted, duplicate-free unit and period identifiers: the row and column
/// labels of every matrix in a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelDomain {
    units: Vec<UnitId>,
    times: Vec<TimeId>,
}

impl PanelDomain {
    pub fn from_keys(keys: &LongKeys) -> Self {
        let units: BTreeSet<&UnitId> = keys.units.iter().collect();
        let times: BTreeSet<&TimeId> = keys.times.iter().collect();
        Self {
            units: units.into_iter().cloned().collect(),
            times: times.into_iter().copied().collect(),
        }
    }

    /// Extract the domain of `df`, failing with a schema error if either
    /// column is absent.
    pub fn extract(df: &DataFrame, unit_column: &str, time_column: &str) -> Result<Self> {
        LongKeys::read(df, unit_column, time_column).map(|keys| Self::from_keys(&keys))
    }

    pub fn units(&self) -> &[UnitId] {
        &self.units
    }

    pub fn times(&self) -> &[TimeId] {
        &self.times
    }

    pub fn into_parts(self) -> (Vec<UnitId>, Vec<TimeId>) {
        (self.units, self.times)
    }

    /// Number of units (N).
    pub fn n(&self) -> usize {
        self.units.len()
    }

    /// Number of periods (T).
    pub fn t(&self) -> usize {
        self.times.len()
    }

    /// Row index of `unit`, if present.
    pub fn unit_index(&self, unit: &UnitId) -> Option<usize> {
        self.units.binary_search(unit).ok()
    }

    /// Column index of `period`, if present.
    pub fn time_index(&self, period: &TimeId) -> Option<usize> {
        self.times.binary_search(period).ok()
    }
}
