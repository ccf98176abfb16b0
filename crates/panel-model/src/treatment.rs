//! Treatment assignment shapes.
//!
//! Callers describe who was treated and when in one of four shapes: a single
//! `(unit, onset)` pair, a single `(unit, (start, end))` pair, or an ordered
//! collection of either. [`TreatmentSpec`] captures exactly those shapes;
//! normalization into [`TreatmentEntry`] values happens in the transform crate.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ModelError, TimeId, UnitId};

/// When a unit enters (and possibly leaves) treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentTiming {
    /// Treated from `onset` through the end of the observed horizon.
    Onset(TimeId),
    /// Treated over the closed interval `[start, end]`.
    Window { start: TimeId, end: TimeId },
}

impl TreatmentTiming {
    pub fn start(&self) -> TimeId {
        match self {
            Self::Onset(onset) => *onset,
            Self::Window { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Option<TimeId> {
        match self {
            Self::Onset(_) => None,
            Self::Window { end, .. } => Some(*end),
        }
    }

    pub fn is_bounded(&self) -> bool {
        matches!(self, Self::Window { .. })
    }
}

impl fmt::Display for TreatmentTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Onset(onset) => write!(f, "{onset}"),
            Self::Window { start, end } => write!(f, "{start}..{end}"),
        }
    }
}

impl From<TimeId> for TreatmentTiming {
    fn from(value: TimeId) -> Self {
        Self::Onset(value)
    }
}

impl From<i64> for TreatmentTiming {
    fn from(value: i64) -> Self {
        Self::Onset(TimeId::Int(value))
    }
}

impl From<i32> for TreatmentTiming {
    fn from(value: i32) -> Self {
        Self::Onset(TimeId::from(value))
    }
}

impl From<NaiveDate> for TreatmentTiming {
    fn from(value: NaiveDate) -> Self {
        Self::Onset(TimeId::Date(value))
    }
}

impl From<(TimeId, TimeId)> for TreatmentTiming {
    fn from((start, end): (TimeId, TimeId)) -> Self {
        Self::Window { start, end }
    }
}

impl From<(i64, i64)> for TreatmentTiming {
    fn from((start, end): (i64, i64)) -> Self {
        Self::from((TimeId::Int(start), TimeId::Int(end)))
    }
}

impl From<(i32, i32)> for TreatmentTiming {
    fn from((start, end): (i32, i32)) -> Self {
        Self::from((TimeId::from(start), TimeId::from(end)))
    }
}

impl From<(NaiveDate, NaiveDate)> for TreatmentTiming {
    fn from((start, end): (NaiveDate, NaiveDate)) -> Self {
        Self::from((TimeId::Date(start), TimeId::Date(end)))
    }
}

/// A raw treatment specification as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentSpec {
    /// One `(unit, timing)` pair.
    Single(UnitId, TreatmentTiming),
    /// An ordered collection of `(unit, timing)` pairs.
    Many(Vec<(UnitId, TreatmentTiming)>),
}

impl TreatmentSpec {
    /// Number of raw assignments in the specification.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(..) => 1,
            Self::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<U, T> From<(U, T)> for TreatmentSpec
where
    U: Into<UnitId>,
    T: Into<TreatmentTiming>,
{
    fn from((unit, timing): (U, T)) -> Self {
        Self::Single(unit.into(), timing.into())
    }
}

impl<U, T> From<Vec<(U, T)>> for TreatmentSpec
where
    U: Into<UnitId>,
    T: Into<TreatmentTiming>,
{
    fn from(items: Vec<(U, T)>) -> Self {
        Self::Many(
            items
                .into_iter()
                .map(|(unit, timing)| (unit.into(), timing.into()))
                .collect(),
        )
    }
}

/// One normalized treatment assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentEntry {
    pub unit: UnitId,
    pub onset: TimeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<TimeId>,
}

impl TreatmentEntry {
    pub fn new(unit: UnitId, timing: TreatmentTiming) -> Self {
        Self {
            unit,
            onset: timing.start(),
            end: timing.end(),
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.end.is_some()
    }
}

/// A textual assignment such as `a=2` or `a=2019-01-01..2019-06-30`.
///
/// The unit stays raw text so the caller can coerce it to the unit column's
/// type; the timing is parsed eagerly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentArg {
    pub unit: String,
    pub timing: TreatmentTiming,
}

impl FromStr for AssignmentArg {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidAssignment(s.to_string());
        let (unit, timing) = s.split_once('=').ok_or_else(invalid)?;
        let unit = unit.trim();
        if unit.is_empty() {
            return Err(invalid());
        }
        let timing = match timing.split_once("..") {
            Some((start, end)) => TreatmentTiming::Window {
                start: start.parse()?,
                end: end.parse()?,
            },
            None => TreatmentTiming::Onset(timing.parse()?),
        };
        Ok(Self {
            unit: unit.to_string(),
            timing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_shapes_convert() {
        let single: TreatmentSpec = ("a", 2).into();
        assert_eq!(
            single,
            TreatmentSpec::Single(UnitId::from("a"), TreatmentTiming::Onset(TimeId::Int(2)))
        );

        let window: TreatmentSpec = ("a", (2, 4)).into();
        assert_eq!(
            window,
            TreatmentSpec::Single(
                UnitId::from("a"),
                TreatmentTiming::Window {
                    start: TimeId::Int(2),
                    end: TimeId::Int(4),
                }
            )
        );

        let many: TreatmentSpec = vec![("a", 2), ("b", 3)].into();
        assert_eq!(many.len(), 2);
    }

    #[test]
    fn parses_assignment_args() {
        let onset: AssignmentArg = "unit 1=2001".parse().unwrap();
        assert_eq!(onset.unit, "unit 1");
        assert_eq!(onset.timing, TreatmentTiming::Onset(TimeId::Int(2001)));

        let window: AssignmentArg = "b=2020-01-01..2020-02-01".parse().unwrap();
        assert!(window.timing.is_bounded());
        assert_eq!(window.timing.to_string(), "2020-01-01..2020-02-01");
    }

    #[test]
    fn rejects_malformed_assignment_args() {
        assert!(matches!(
            "a".parse::<AssignmentArg>(),
            Err(ModelError::InvalidAssignment(_))
        ));
        assert!(matches!(
            "=2".parse::<AssignmentArg>(),
            Err(ModelError::InvalidAssignment(_))
        ));
        assert!(matches!(
            "a=soon".parse::<AssignmentArg>(),
            Err(ModelError::InvalidPeriod(_))
        ));
    }
}
