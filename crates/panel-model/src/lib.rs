//! Data model for treatment panels.
//!
//! Plain types shared by the transform, ingest and CLI crates:
//!
//! - **ids**: unit and period identifiers
//! - **treatment**: raw treatment specifications and their normalized entries
//! - **pattern**: the treatment-pattern classification used for estimator dispatch
//! - **options**: column names and construction options

pub mod error;
pub mod ids;
pub mod options;
pub mod pattern;
pub mod treatment;

pub use error::{ModelError, Result};
pub use ids::{DATE_FORMAT, TimeId, UnitId};
pub use options::{PanelColumns, PanelOptions};
pub use pattern::{Duration, Timing, TreatmentPattern, UnitCount};
pub use treatment::{AssignmentArg, TreatmentEntry, TreatmentSpec, TreatmentTiming};
