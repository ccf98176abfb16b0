//! Balanced treatment panel construction.
//!
//! This crate turns a long-format (unit × time) polars table plus a
//! treatment specification into a validated [`BalancedPanel`]:
//!
//! - **domain**: sorted unit and period domains of the table
//! - **normalize**: folding the accepted treatment shapes into entries
//! - **validate**: column and referential-integrity checks
//! - **matrix**: treatment (`W`) and outcome (`Y`) matrix construction
//! - **classify**: treatment-pattern classification for estimator dispatch
//! - **panel**: the immutable panel and its accessors
//!
//! # Example
//!
//! ```ignore
//! use panel_model::{PanelColumns, PanelOptions};
//! use panel_transform::build_panel;
//!
//! let columns = PanelColumns::new("state", "year", "cigsale");
//! let panel = build_panel(&mut df, &("California", 1989).into(), &columns, &PanelOptions::default())?;
//! let blocks = panel.decompose_y()?;
//! ```

mod builder;
pub mod classify;
pub mod domain;
mod error;
pub mod matrix;
pub mod normalize;
pub mod panel;
pub mod validate;
pub mod values;

// === Error Types ===
pub use error::{PanelError, Result};

// === Construction ===
pub use builder::build_panel;
pub use classify::classify;
pub use domain::PanelDomain;
pub use normalize::normalize_treatment;

// === Panel ===
pub use panel::{BalancedPanel, OutcomeBlocks};
