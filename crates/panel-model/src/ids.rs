#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::ModelError;

/// Format accepted for calendar-date period identifiers.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identifier of a panel unit (one row of the outcome matrix).
///
/// Within one table every unit shares a variant, so the derived ordering is
/// numeric for integer units and lexicographic for text units.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(untagged)]
pub enum UnitId {
    Int(i64),
    Text(String),
}

impl UnitId {
    /// Parses a typed-in token. Surrounding whitespace is dropped, so this
    /// is for user input only; table cells map through `From<&str>` verbatim.
    pub fn text(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidUnit(value));
        }
        Ok(Self::Text(trimmed.to_string()))
    }

    /// Parses a token from an integer-typed unit column.
    pub fn parse_int(value: &str) -> Result<Self, ModelError> {
        value
            .trim()
            .parse::<i64>()
            .map(Self::Int)
            .map_err(|_| ModelError::InvalidUnit(value.to_string()))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Parses a unit token as text. Callers that know the unit column is integer
/// typed should go through [`UnitId::parse_int`] instead.
impl FromStr for UnitId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::text(s)
    }
}

impl From<i64> for UnitId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for UnitId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for UnitId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for UnitId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Identifier of a time period (one column of the outcome matrix).
///
/// Periods are either integers or calendar dates, never mixed within a table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(untagged)]
pub enum TimeId {
    Int(i64),
    Date(NaiveDate),
}

impl TimeId {
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }
}

impl fmt::Display for TimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

/// Parses an integer period, falling back to an ISO `YYYY-MM-DD` date.
impl FromStr for TimeId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Ok(Self::Int(value));
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Self::Date)
            .map_err(|_| ModelError::InvalidPeriod(s.to_string()))
    }
}

impl From<i64> for TimeId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for TimeId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<NaiveDate> for TimeId {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_units_sort_lexicographically() {
        let mut units = vec![UnitId::from("b"), UnitId::from("aa"), UnitId::from("a")];
        units.sort();
        assert_eq!(
            units,
            vec![UnitId::from("a"), UnitId::from("aa"), UnitId::from("b")]
        );
    }

    #[test]
    fn blank_unit_is_rejected() {
        assert!(matches!(
            UnitId::text("   "),
            Err(ModelError::InvalidUnit(_))
        ));
    }

    #[test]
    fn parses_integer_and_date_periods() {
        assert_eq!("2001".parse::<TimeId>().unwrap(), TimeId::Int(2001));
        let date = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        assert_eq!("2020-03-01".parse::<TimeId>().unwrap(), TimeId::Date(date));
        assert_eq!(TimeId::Date(date).to_string(), "2020-03-01");
        assert!("March".parse::<TimeId>().is_err());
    }

    #[test]
    fn parse_int_unit_requires_digits() {
        assert_eq!(UnitId::parse_int(" 7 ").unwrap(), UnitId::Int(7));
        assert!(UnitId::parse_int("seven").is_err());
    }
}
