//! Treatment specification normalization.
//!
//! Every accepted shape folds into one ordered list of [`TreatmentEntry`]
//! values. Dispatch follows a fixed precedence: a single pair with an onset,
//! a single pair with a window, a one-element collection (normalized as its
//! sole pair), then a longer collection whose pairs must all share the same
//! shape.

use panel_model::{TreatmentEntry, TreatmentSpec, TreatmentTiming, UnitId};

use crate::error::{PanelError, Result};

/// Normalize `spec` into a non-empty, input-ordered list of entries.
pub fn normalize_treatment(spec: &TreatmentSpec) -> Result<Vec<TreatmentEntry>> {
    match spec {
        TreatmentSpec::Single(unit, timing) => Ok(vec![normalize_pair(unit, timing)]),
        TreatmentSpec::Many(items) => match items.as_slice() {
            [] => Err(PanelError::Configuration {
                what: "treatment specification is empty".to_string(),
            }),
            [(unit, timing)] => Ok(vec![normalize_pair(unit, timing)]),
            [(_, first), rest @ ..] => {
                let bounded = first.is_bounded();
                if let Some(offset) = rest.iter().position(|(_, t)| t.is_bounded() != bounded) {
                    let (unit, timing) = &rest[offset];
                    return Err(PanelError::Shape {
                        reason: format!(
                            "entry {} ({unit} => {timing}) is {} but entry 0 is {}",
                            offset + 1,
                            shape_name(timing.is_bounded()),
                            shape_name(bounded),
                        ),
                    });
                }
                Ok(items
                    .iter()
                    .map(|(unit, timing)| normalize_pair(unit, timing))
                    .collect())
            }
        },
    }
}

fn normalize_pair(unit: &UnitId, timing: &TreatmentTiming) -> TreatmentEntry {
    TreatmentEntry::new(unit.clone(), *timing)
}

fn shape_name(bounded: bool) -> &'static str {
    if bounded { "bounded" } else { "unbounded" }
}

#[cfg(test)]
mod tests {
    use panel_model::TimeId;

    use super::*;

    #[test]
    fn single_onset_yields_one_unbounded_entry() {
        let entries = normalize_treatment(&("a", 2).into()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].onset, TimeId::Int(2));
        assert_eq!(entries[0].end, None);
    }

    #[test]
    fn single_window_yields_one_bounded_entry() {
        let entries = normalize_treatment(&("a", (2, 3)).into()).unwrap();
        assert_eq!(entries[0].end, Some(TimeId::Int(3)));
    }

    #[test]
    fn singleton_collection_matches_single_pair() {
        let from_vec = normalize_treatment(&vec![("a", (2, 3))].into()).unwrap();
        let from_pair = normalize_treatment(&("a", (2, 3)).into()).unwrap();
        assert_eq!(from_vec, from_pair);
    }

    #[test]
    fn collection_keeps_input_order() {
        let entries = normalize_treatment(&vec![("b", 3), ("a", 2)].into()).unwrap();
        let units: Vec<String> = entries.iter().map(|e| e.unit.to_string()).collect();
        assert_eq!(units, vec!["b", "a"]);
    }

    #[test]
    fn mixed_shapes_are_rejected() {
        let spec = TreatmentSpec::Many(vec![
            (UnitId::from("a"), TreatmentTiming::from(2)),
            (UnitId::from("b"), TreatmentTiming::from((2, 3))),
        ]);
        let err = normalize_treatment(&spec).unwrap_err();
        assert!(matches!(err, PanelError::Shape { .. }));
        assert_eq!(
            err.to_string(),
            "inconsistent treatment specification: entry 1 (b => 2..3) is bounded but entry 0 is unbounded"
        );
    }

    #[test]
    fn empty_collection_is_a_configuration_error() {
        let err = normalize_treatment(&TreatmentSpec::Many(Vec::new())).unwrap_err();
        assert!(matches!(err, PanelError::Configuration { .. }));
    }
}
