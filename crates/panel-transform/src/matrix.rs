//! Treatment and outcome matrix construction.
//!
//! Both matrices are indexed by the same [`PanelDomain`]: row `i` is
//! `domain.units()[i]` and column `t` is `domain.times()[t]`.

use ndarray::{Array2, s};
use panel_model::{PanelColumns, TimeId, TreatmentEntry};
use polars::prelude::DataFrame;
use tracing::debug;

use crate::domain::{LongKeys, PanelDomain};
use crate::error::{PanelError, Result};
use crate::values::{any_to_f64, column_values};

/// Build the N×T treatment matrix from validated entries.
///
/// Unbounded entries switch treatment on from the onset through the last
/// period; bounded entries cover the closed `[onset, end]` interval only.
/// Several entries for one unit are combined with logical OR.
pub fn treatment_matrix(
    entries: &[TreatmentEntry],
    domain: &PanelDomain,
    columns: &PanelColumns,
) -> Result<Array2<bool>> {
    let period_index = |period: TimeId| {
        domain
            .time_index(&period)
            .ok_or_else(|| PanelError::UnknownPeriod {
                period,
                column: columns.time.clone(),
            })
    };
    let mut w = Array2::from_elem((domain.n(), domain.t()), false);
    for entry in entries {
        let row = domain
            .unit_index(&entry.unit)
            .ok_or_else(|| PanelError::UnknownUnit {
                unit: entry.unit.clone(),
                column: columns.unit.clone(),
            })?;
        let start = period_index(entry.onset)?;
        let stop = match entry.end {
            Some(end) => period_index(end)? + 1,
            None => domain.t(),
        };
        if stop <= start {
            return Err(PanelError::InvertedWindow {
                unit: entry.unit.clone(),
                onset: entry.onset,
                end: entry.end.unwrap_or(entry.onset),
            });
        }
        w.slice_mut(s![row, start..stop]).fill(true);
    }
    Ok(w)
}

/// Pivot the outcome column of a long table into an N×T matrix.
///
/// `keys` must be the (unit, period) keys of `df` in row order. Every cell
/// of the result is covered by exactly one source row; the first uncovered
/// cell (row-major) or the first repeated key is reported as an error.
pub fn outcome_matrix(
    df: &DataFrame,
    keys: &LongKeys,
    outcome_column: &str,
    domain: &PanelDomain,
) -> Result<Array2<f64>> {
    let column = df.column(outcome_column).map_err(|_| PanelError::Schema {
        column: outcome_column.to_string(),
    })?;
    let outcomes = column_values(column, any_to_f64)?;

    let mut y = Array2::<f64>::zeros((domain.n(), domain.t()));
    let mut seen = Array2::from_elem((domain.n(), domain.t()), false);
    for (row, outcome) in outcomes.into_iter().enumerate() {
        let unit = &keys.units[row];
        let period = keys.times[row];
        let (Some(i), Some(t)) = (domain.unit_index(unit), domain.time_index(&period)) else {
            // Keys and domain come from the same table.
            continue;
        };
        if seen[[i, t]] {
            return Err(PanelError::DuplicateObservation {
                unit: unit.clone(),
                period,
            });
        }
        seen[[i, t]] = true;
        y[[i, t]] = outcome;
    }

    if let Some(((i, t), _)) = seen.indexed_iter().find(|(_, covered)| !**covered) {
        return Err(PanelError::MissingObservation {
            unit: domain.units()[i].clone(),
            period: domain.times()[t],
        });
    }
    debug!(
        rows = keys.len(),
        units = domain.n(),
        periods = domain.t(),
        "pivoted outcome matrix"
    );
    Ok(y)
}

#[cfg(test)]
mod tests {
    use panel_model::UnitId;

    use super::*;

    fn columns() -> PanelColumns {
        PanelColumns::new("unit", "time", "y")
    }

    fn domain(units: &[&str], times: &[i64]) -> PanelDomain {
        let mut keys = LongKeys {
            units: Vec::new(),
            times: Vec::new(),
        };
        for unit in units {
            for time in times {
                keys.units.push(UnitId::from(*unit));
                keys.times.push(TimeId::Int(*time));
            }
        }
        PanelDomain::from_keys(&keys)
    }

    fn entry(unit: &str, onset: i64, end: Option<i64>) -> TreatmentEntry {
        TreatmentEntry {
            unit: UnitId::from(unit),
            onset: TimeId::Int(onset),
            end: end.map(TimeId::Int),
        }
    }

    #[test]
    fn unbounded_entry_stays_treated() {
        let domain = domain(&["a", "b"], &[1, 2, 3]);
        let w = treatment_matrix(&[entry("b", 2, None)], &domain, &columns()).unwrap();
        assert_eq!(w.row(0).to_vec(), vec![false, false, false]);
        assert_eq!(w.row(1).to_vec(), vec![false, true, true]);
    }

    #[test]
    fn bounded_entries_accumulate() {
        let entries = [entry("a", 1, Some(1)), entry("a", 3, Some(4))];
        let domain = domain(&["a"], &[1, 2, 3, 4, 5]);
        let w = treatment_matrix(&entries, &domain, &columns()).unwrap();
        assert_eq!(w.row(0).to_vec(), vec![true, false, true, true, false]);
    }

    #[test]
    fn inverted_window_is_rejected() {
        let domain = domain(&["a"], &[1, 2, 3]);
        let err = treatment_matrix(&[entry("a", 3, Some(1))], &domain, &columns()).unwrap_err();
        assert!(matches!(err, PanelError::InvertedWindow { .. }));
    }
}
