use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid unit identifier: {0:?}")]
    InvalidUnit(String),
    #[error("invalid period identifier: {0:?} (expected an integer or YYYY-MM-DD)")]
    InvalidPeriod(String),
    #[error("invalid treatment assignment: {0:?} (expected UNIT=ONSET or UNIT=START..END)")]
    InvalidAssignment(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
