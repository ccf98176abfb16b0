//! Treatment-pattern classification from normalized entries.

use std::collections::BTreeSet;

use panel_model::{Duration, Timing, TreatmentEntry, TreatmentPattern, UnitCount};

use crate::error::{PanelError, Result};

/// Classify a non-empty, shape-homogeneous entry list.
///
/// Works on the entries alone; the matrices are never consulted.
pub fn classify(entries: &[TreatmentEntry]) -> Result<TreatmentPattern> {
    let Some(first) = entries.first() else {
        return Err(PanelError::Configuration {
            what: "treatment specification is empty".to_string(),
        });
    };

    let units: BTreeSet<_> = entries.iter().map(|entry| &entry.unit).collect();
    let unit_count = if units.len() == 1 {
        UnitCount::Single
    } else {
        UnitCount::Multiple
    };

    let timing = match unit_count {
        UnitCount::Single => None,
        UnitCount::Multiple if entries.iter().all(|entry| entry.onset == first.onset) => {
            Some(Timing::Simultaneous)
        }
        UnitCount::Multiple => Some(Timing::Staggered),
    };

    let bounded = entries.iter().filter(|entry| entry.is_bounded()).count();
    let duration = if bounded == 0 {
        Duration::Continuous
    } else if bounded == entries.len() {
        Duration::Discontinuous
    } else {
        return Err(PanelError::Shape {
            reason: format!(
                "{bounded} of {} entries have an end period; mixing bounded and unbounded treatment is not supported",
                entries.len()
            ),
        });
    };

    Ok(TreatmentPattern::from_tags(unit_count, timing, duration))
}
