//! Treatment-pattern classification.
//!
//! Estimators select their behavior by matching on [`TreatmentPattern`], so
//! the classification is a closed set: three orthogonal tags folded into one
//! value that is always fully determined for a constructed panel.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How many distinct units receive treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitCount {
    Single,
    Multiple,
}

/// Whether treated units share one onset period.
///
/// Only meaningful for [`UnitCount::Multiple`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timing {
    Simultaneous,
    Staggered,
}

/// Whether treatment persists to the end of the horizon or has an end period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Duration {
    Continuous,
    Discontinuous,
}

/// Structural classification of a panel's treatment assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentPattern {
    SingleContinuous,
    SingleDiscontinuous,
    MultipleSimultaneousContinuous,
    MultipleSimultaneousDiscontinuous,
    MultipleStaggeredContinuous,
    MultipleStaggeredDiscontinuous,
}

impl TreatmentPattern {
    /// Combine the three tags. `timing` is ignored for single-unit patterns
    /// and treated as simultaneous when absent for multiple-unit ones.
    pub fn from_tags(units: UnitCount, timing: Option<Timing>, duration: Duration) -> Self {
        match (units, timing, duration) {
            (UnitCount::Single, _, Duration::Continuous) => Self::SingleContinuous,
            (UnitCount::Single, _, Duration::Discontinuous) => Self::SingleDiscontinuous,
            (UnitCount::Multiple, Some(Timing::Staggered), Duration::Continuous) => {
                Self::MultipleStaggeredContinuous
            }
            (UnitCount::Multiple, Some(Timing::Staggered), Duration::Discontinuous) => {
                Self::MultipleStaggeredDiscontinuous
            }
            (UnitCount::Multiple, _, Duration::Continuous) => Self::MultipleSimultaneousContinuous,
            (UnitCount::Multiple, _, Duration::Discontinuous) => {
                Self::MultipleSimultaneousDiscontinuous
            }
        }
    }

    pub fn unit_count(&self) -> UnitCount {
        match self {
            Self::SingleContinuous | Self::SingleDiscontinuous => UnitCount::Single,
            _ => UnitCount::Multiple,
        }
    }

    pub fn timing(&self) -> Option<Timing> {
        match self {
            Self::SingleContinuous | Self::SingleDiscontinuous => None,
            Self::MultipleSimultaneousContinuous | Self::MultipleSimultaneousDiscontinuous => {
                Some(Timing::Simultaneous)
            }
            Self::MultipleStaggeredContinuous | Self::MultipleStaggeredDiscontinuous => {
                Some(Timing::Staggered)
            }
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            Self::SingleContinuous
            | Self::MultipleSimultaneousContinuous
            | Self::MultipleStaggeredContinuous => Duration::Continuous,
            Self::SingleDiscontinuous
            | Self::MultipleSimultaneousDiscontinuous
            | Self::MultipleStaggeredDiscontinuous => Duration::Discontinuous,
        }
    }

    pub fn is_single(&self) -> bool {
        self.unit_count() == UnitCount::Single
    }

    pub fn is_continuous(&self) -> bool {
        self.duration() == Duration::Continuous
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleContinuous => "single_continuous",
            Self::SingleDiscontinuous => "single_discontinuous",
            Self::MultipleSimultaneousContinuous => "multiple_simultaneous_continuous",
            Self::MultipleSimultaneousDiscontinuous => "multiple_simultaneous_discontinuous",
            Self::MultipleStaggeredContinuous => "multiple_staggered_continuous",
            Self::MultipleStaggeredDiscontinuous => "multiple_staggered_discontinuous",
        }
    }
}

impl fmt::Display for TreatmentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
