//! Turning `--treat` arguments into a treatment specification.

use panel_model::{AssignmentArg, ModelError, TreatmentSpec, UnitId};
use polars::prelude::DataType;

/// Build a [`TreatmentSpec`] from parsed `--treat` arguments.
///
/// Unit tokens are coerced to match the unit column: integers when the
/// column has an integer dtype, text otherwise (including when the column is
/// absent, so the builder can report the schema problem). One argument yields
/// a single-entry spec; several yield a list.
pub fn treatment_spec(
    assignments: &[AssignmentArg],
    unit_dtype: Option<&DataType>,
) -> Result<TreatmentSpec, ModelError> {
    let integer_units = unit_dtype.is_some_and(DataType::is_integer);
    let mut entries = assignments
        .iter()
        .map(|assignment| {
            let unit = if integer_units {
                UnitId::parse_int(&assignment.unit)?
            } else {
                UnitId::text(assignment.unit.as_str())?
            };
            Ok((unit, assignment.timing))
        })
        .collect::<Result<Vec<_>, ModelError>>()?;

    if entries.len() == 1
        && let Some((unit, timing)) = entries.pop()
    {
        return Ok(TreatmentSpec::Single(unit, timing));
    }
    Ok(TreatmentSpec::Many(entries))
}

#[cfg(test)]
mod tests {
    use panel_model::{TimeId, TreatmentTiming};

    use super::*;

    fn args(raw: &[&str]) -> Vec<AssignmentArg> {
        raw.iter().map(|arg| arg.parse().unwrap()).collect()
    }

    #[test]
    fn single_argument_is_a_single_spec() {
        let spec = treatment_spec(&args(&["CA=1989"]), Some(&DataType::String)).unwrap();
        assert_eq!(
            spec,
            TreatmentSpec::Single(
                UnitId::from("CA"),
                TreatmentTiming::Onset(TimeId::Int(1989))
            )
        );
    }

    #[test]
    fn integer_unit_columns_coerce_tokens() {
        let spec = treatment_spec(&args(&["3=1..2", "5=1..2"]), Some(&DataType::Int64)).unwrap();
        assert_eq!(
            spec,
            TreatmentSpec::Many(vec![
                (UnitId::Int(3), TreatmentTiming::from((1, 2))),
                (UnitId::Int(5), TreatmentTiming::from((1, 2))),
            ])
        );
    }

    #[test]
    fn non_numeric_token_for_integer_column_fails() {
        let err = treatment_spec(&args(&["CA=1989"]), Some(&DataType::Int32)).unwrap_err();
        assert_eq!(err, ModelError::InvalidUnit("CA".to_string()));
    }

    #[test]
    fn missing_column_falls_back_to_text() {
        let spec = treatment_spec(&args(&["7=2"]), None).unwrap();
        assert_eq!(spec, TreatmentSpec::Single(UnitId::from("7"), 2.into()));
    }
}
