//! Panel construction entry point.

use panel_model::{PanelColumns, PanelOptions, TreatmentSpec};
use polars::prelude::{DataFrame, SortMultipleOptions};
use tracing::{debug, info, info_span, warn};

use crate::classify::classify;
use crate::domain::{LongKeys, PanelDomain};
use crate::error::Result;
use crate::matrix::{outcome_matrix, treatment_matrix};
use crate::normalize::normalize_treatment;
use crate::panel::BalancedPanel;
use crate::validate::{validate_columns, validate_entries};

/// Build a balanced panel from a long-format table.
///
/// Columns and the treatment specification are validated before any matrix
/// is built. The pivot accepts rows in any order. With
/// `options.sort_in_place` set, an unordered table is also sorted by
/// (unit, time) in place; otherwise the caller's table is left untouched.
///
/// # Errors
///
/// Returns the first [`crate::PanelError`] encountered; no panel is produced
/// from invalid input.
pub fn build_panel(
    table: &mut DataFrame,
    treatment: &TreatmentSpec,
    columns: &PanelColumns,
    options: &PanelOptions,
) -> Result<BalancedPanel> {
    let span = info_span!(
        "build_panel",
        unit = %columns.unit,
        time = %columns.time,
        outcome = %columns.outcome,
    );
    let _guard = span.enter();

    validate_columns(table, columns)?;
    let entries = normalize_treatment(treatment)?;
    let mut keys = LongKeys::read(table, &columns.unit, &columns.time)?;
    let domain = PanelDomain::from_keys(&keys);
    validate_entries(&entries, &domain, columns)?;
    debug!(
        entries = entries.len(),
        units = domain.n(),
        periods = domain.t(),
        "validated treatment entries"
    );

    let pattern = classify(&entries)?;
    let w = treatment_matrix(&entries, &domain, columns)?;

    // Cells are placed by domain lookup, so row order never changes `Y`.
    // Sorting is only done when the caller asks for an ordered table back.
    if options.sort_in_place && !keys.is_sorted() {
        warn!(
            rows = keys.len(),
            "table is not ordered by (unit, time); sorting in place"
        );
        let by = [columns.unit.as_str(), columns.time.as_str()];
        let sort_options = SortMultipleOptions::default().with_maintain_order(true);
        table.sort_in_place(by, sort_options)?;
        keys = LongKeys::read(table, &columns.unit, &columns.time)?;
    }

    let y = outcome_matrix(table, &keys, &columns.outcome, &domain)?;
    info!(
        units = domain.n(),
        periods = domain.t(),
        pattern = %pattern,
        "built balanced panel"
    );
    Ok(BalancedPanel::new(domain, w, y, pattern))
}
