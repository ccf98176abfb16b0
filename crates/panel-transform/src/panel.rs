//! The immutable balanced panel and its query surface.
//!
//! A [`BalancedPanel`] is built once by [`crate::build_panel`] and never
//! mutated. Every derived quantity (treated rows, onset periods, pre/post
//! lengths, outcome blocks) is recomputed from `W` on demand.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, s};
use panel_model::{Duration, TimeId, Timing, TreatmentPattern, UnitId};

use crate::domain::PanelDomain;
use crate::error::{PanelError, Result};

/// Rectangular unit × period container of outcomes and treatment flags.
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedPanel {
    units: Vec<UnitId>,
    times: Vec<TimeId>,
    w: Array2<bool>,
    y: Array2<f64>,
    pattern: TreatmentPattern,
}

/// The four blocks of `Y` split by treated/control rows and pre/post periods.
///
/// The first digit marks treated (1) or control (0) rows, the second marks
/// pre (0) or post (1) periods.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeBlocks {
    /// Treated unit, pre-treatment periods: shape `(T0,)`.
    pub y10: Array1<f64>,
    /// Treated unit, post-treatment periods: shape `(T - T0,)`.
    pub y11: Array1<f64>,
    /// Control units, pre-treatment periods: shape `(N - 1, T0)`.
    pub y00: Array2<f64>,
    /// Control units, post-treatment periods: shape `(N - 1, T - T0)`.
    pub y01: Array2<f64>,
}

/// Pre/post lengths of one treated row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowBoundary {
    t0: usize,
    t1: usize,
}

impl BalancedPanel {
    pub(crate) fn new(
        domain: PanelDomain,
        w: Array2<bool>,
        y: Array2<f64>,
        pattern: TreatmentPattern,
    ) -> Self {
        debug_assert_eq!(w.dim(), (domain.n(), domain.t()));
        debug_assert_eq!(w.dim(), y.dim());
        let (units, times) = domain.into_parts();
        Self {
            units,
            times,
            w,
            y,
            pattern,
        }
    }

    /// Number of units (N).
    pub fn n(&self) -> usize {
        self.units.len()
    }

    /// Number of periods (T).
    pub fn t(&self) -> usize {
        self.times.len()
    }

    /// Treatment matrix `W` (N×T).
    pub fn w(&self) -> ArrayView2<'_, bool> {
        self.w.view()
    }

    /// Outcome matrix `Y` (N×T), aligned with `W`.
    pub fn y(&self) -> ArrayView2<'_, f64> {
        self.y.view()
    }

    /// Row labels, ascending.
    pub fn units(&self) -> &[UnitId] {
        &self.units
    }

    /// Column labels, ascending.
    pub fn times(&self) -> &[TimeId] {
        &self.times
    }

    pub fn pattern(&self) -> TreatmentPattern {
        self.pattern
    }

    /// Rows with at least one treated period, ascending.
    pub fn treated_ids(&self) -> Vec<usize> {
        self.w
            .outer_iter()
            .enumerate()
            .filter(|(_, row)| row.iter().any(|treated| *treated))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Rows never treated: the complement of [`Self::treated_ids`].
    pub fn control_ids(&self) -> Vec<usize> {
        self.w
            .outer_iter()
            .enumerate()
            .filter(|(_, row)| !row.iter().any(|treated| *treated))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// The treated row of a single-unit panel.
    pub fn treated_id(&self) -> Result<usize> {
        self.require_single("treated_id")?;
        match self.treated_ids().as_slice() {
            [row] => Ok(*row),
            _ => Err(self.unsupported("treated_id")),
        }
    }

    /// Unit labels of the treated rows.
    pub fn treated_labels(&self) -> Vec<&UnitId> {
        self.treated_ids()
            .into_iter()
            .map(|row| &self.units[row])
            .collect()
    }

    /// Columns where treatment starts in the treated row of a single-unit
    /// panel: the first treated column for continuous treatment, every
    /// untreated→treated transition for discontinuous treatment.
    pub fn first_treated_period_ids(&self) -> Result<Vec<usize>> {
        let row = self.treated_id()?;
        Ok(self.onsets_for(row))
    }

    /// Period labels for [`Self::first_treated_period_ids`].
    pub fn first_treated_period_labels(&self) -> Result<Vec<TimeId>> {
        Ok(self
            .first_treated_period_ids()?
            .into_iter()
            .map(|col| self.times[col])
            .collect())
    }

    /// Onset columns for every treated row, in row order. Defined for all
    /// patterns; each row uses its own boundary.
    pub fn first_treated_period_ids_by_unit(&self) -> Vec<(usize, Vec<usize>)> {
        self.treated_ids()
            .into_iter()
            .map(|row| (row, self.onsets_for(row)))
            .collect()
    }

    /// Number of periods before the first onset (T0).
    pub fn length_t0(&self) -> Result<usize> {
        self.shared_boundary("length_t0", |boundary| boundary.t0)
    }

    /// Number of post-onset periods (T1).
    ///
    /// For continuous treatment this runs from the first treated column to
    /// the last period. For discontinuous treatment it is the length of the
    /// last treatment window, so periods after the window's end count toward
    /// neither T0 nor T1.
    pub fn length_t1(&self) -> Result<usize> {
        self.shared_boundary("length_t1", |boundary| boundary.t1)
    }

    /// Split `Y` into treated/control × pre/post blocks.
    ///
    /// Only defined for single-unit continuous panels.
    pub fn decompose_y(&self) -> Result<OutcomeBlocks> {
        if self.pattern != TreatmentPattern::SingleContinuous {
            return Err(self.unsupported("decompose_y"));
        }
        let treated = self.treated_id()?;
        let t0 = self.length_t0()?;
        let controls = self.control_ids();
        let treated_row = self.y.row(treated);
        let control_rows = self.y.select(Axis(0), &controls);
        Ok(OutcomeBlocks {
            y10: treated_row.slice(s![..t0]).to_owned(),
            y11: treated_row.slice(s![t0..]).to_owned(),
            y00: control_rows.slice(s![.., ..t0]).to_owned(),
            y01: control_rows.slice(s![.., t0..]).to_owned(),
        })
    }

    fn onsets_for(&self, row: usize) -> Vec<usize> {
        let treated = self.w.row(row);
        match self.pattern.duration() {
            Duration::Continuous => first_true(treated).into_iter().collect(),
            Duration::Discontinuous => transitions(treated),
        }
    }

    fn row_boundary(&self, row: usize) -> Option<RowBoundary> {
        let treated = self.w.row(row);
        let onsets = transitions(treated);
        let first = *onsets.first()?;
        let last_onset = *onsets.last()?;
        let t1 = match self.pattern.duration() {
            Duration::Continuous => self.t() - first,
            Duration::Discontinuous => {
                let last_treated = treated.iter().rposition(|cell| *cell)?;
                last_treated + 1 - last_onset
            }
        };
        Some(RowBoundary { t0: first, t1 })
    }

    /// A boundary length shared by every treated row. Staggered panels have
    /// no global boundary, and rows that disagree have none either.
    fn shared_boundary(
        &self,
        operation: &'static str,
        pick: impl Fn(RowBoundary) -> usize,
    ) -> Result<usize> {
        if self.pattern.timing() == Some(Timing::Staggered) {
            return Err(self.unsupported(operation));
        }
        let mut lengths = self
            .treated_ids()
            .into_iter()
            .map(|row| self.row_boundary(row).map(&pick));
        let Some(Some(first)) = lengths.next() else {
            return Err(self.unsupported(operation));
        };
        if lengths.all(|length| length == Some(first)) {
            Ok(first)
        } else {
            Err(self.unsupported(operation))
        }
    }

    fn require_single(&self, operation: &'static str) -> Result<()> {
        if self.pattern.is_single() {
            Ok(())
        } else {
            Err(self.unsupported(operation))
        }
    }

    fn unsupported(&self, operation: &'static str) -> PanelError {
        PanelError::UnsupportedPattern {
            operation,
            pattern: self.pattern,
        }
    }
}

fn first_true(row: ArrayView1<'_, bool>) -> Option<usize> {
    row.iter().position(|cell| *cell)
}

/// Columns where the row switches from untreated to treated. A treated
/// first column counts as a transition.
fn transitions(row: ArrayView1<'_, bool>) -> Vec<usize> {
    let mut previous = false;
    let mut onsets = Vec::new();
    for (col, cell) in row.iter().enumerate() {
        if *cell && !previous {
            onsets.push(col);
        }
        previous = *cell;
    }
    onsets
}
