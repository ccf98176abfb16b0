//! Library components of the `panel` command-line tool.

pub mod export;
pub mod logging;
pub mod treatment;
