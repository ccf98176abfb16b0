//! JSON export of a built panel.

use std::io::Write;

use panel_model::{TimeId, TreatmentPattern, UnitId};
use panel_transform::BalancedPanel;
use serde::Serialize;

/// Machine-readable view of a [`BalancedPanel`] and its accessor outputs.
///
/// Accessors that are undefined for the panel's pattern are exported as
/// `null`.
#[derive(Debug, Serialize)]
pub struct PanelExport {
    pub pattern: TreatmentPattern,
    pub units: Vec<UnitId>,
    pub times: Vec<TimeId>,
    pub w: Vec<Vec<bool>>,
    pub y: Vec<Vec<f64>>,
    pub treated_ids: Vec<usize>,
    pub control_ids: Vec<usize>,
    pub first_treated_period_ids: Option<Vec<usize>>,
    pub onsets_by_unit: Vec<UnitOnsets>,
    pub length_t0: Option<usize>,
    pub length_t1: Option<usize>,
}

/// Onset columns of one treated row.
#[derive(Debug, Serialize)]
pub struct UnitOnsets {
    pub row: usize,
    pub unit: UnitId,
    pub onsets: Vec<usize>,
}

impl PanelExport {
    pub fn from_panel(panel: &BalancedPanel) -> Self {
        let onsets_by_unit = panel
            .first_treated_period_ids_by_unit()
            .into_iter()
            .map(|(row, onsets)| UnitOnsets {
                row,
                unit: panel.units()[row].clone(),
                onsets,
            })
            .collect();
        Self {
            pattern: panel.pattern(),
            units: panel.units().to_vec(),
            times: panel.times().to_vec(),
            w: panel.w().rows().into_iter().map(|row| row.to_vec()).collect(),
            y: panel.y().rows().into_iter().map(|row| row.to_vec()).collect(),
            treated_ids: panel.treated_ids(),
            control_ids: panel.control_ids(),
            first_treated_period_ids: panel.first_treated_period_ids().ok(),
            onsets_by_unit,
            length_t0: panel.length_t0().ok(),
            length_t1: panel.length_t1().ok(),
        }
    }

    /// Serialize as JSON followed by a newline, then flush `writer`.
    pub fn write_json<W: Write>(&self, mut writer: W, pretty: bool) -> serde_json::Result<()> {
        if pretty {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_json::to_writer(&mut writer, self)?;
        }
        writeln!(writer).map_err(serde_json::Error::io)?;
        writer.flush().map_err(serde_json::Error::io)
    }
}
