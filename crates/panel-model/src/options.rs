//! Configuration for panel construction.

use serde::{Deserialize, Serialize};

/// Names of the long-format columns a panel is built from.
///
/// All three are required; an empty name is reported as a configuration
/// error before the table is inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelColumns {
    /// Column holding unit identifiers (matrix rows).
    pub unit: String,
    /// Column holding time identifiers (matrix columns).
    pub time: String,
    /// Column holding the numeric outcome.
    pub outcome: String,
}

impl PanelColumns {
    pub fn new(
        unit: impl Into<String>,
        time: impl Into<String>,
        outcome: impl Into<String>,
    ) -> Self {
        Self {
            unit: unit.into(),
            time: time.into(),
            outcome: outcome.into(),
        }
    }

    /// Pairs each role with its configured column name, in validation order.
    pub fn roles(&self) -> [(&'static str, &str); 3] {
        [
            ("unit", self.unit.as_str()),
            ("time", self.time.as_str()),
            ("outcome", self.outcome.as_str()),
        ]
    }
}

/// Options controlling panel construction behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelOptions {
    /// Sort the caller's table in place when it is not ordered by
    /// (unit, time). When false, the table is read as is and never mutated.
    /// Default: false.
    pub sort_in_place: bool,
}

impl PanelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sort_in_place(mut self, enable: bool) -> Self {
        self.sort_in_place = enable;
        self
    }
}
