//! Property tests for the treatment and outcome matrices.

use panel_model::{PanelColumns, PanelOptions, TreatmentSpec};
use panel_transform::{BalancedPanel, build_panel};
use polars::prelude::*;
use proptest::prelude::*;

/// Long table over integer units `0..n` and periods `0..t`, rows listed in
/// reverse so every build goes through the sort path.
fn table(n: i64, t: i64) -> DataFrame {
    let mut units = Vec::new();
    let mut times = Vec::new();
    let mut outcomes = Vec::new();
    for unit in (0..n).rev() {
        for period in (0..t).rev() {
            units.push(unit);
            times.push(period);
            outcomes.push((unit * 100 + period) as f64);
        }
    }
    df!("unit" => units, "time" => times, "y" => outcomes).unwrap()
}

fn build(n: i64, t: i64, spec: &TreatmentSpec) -> BalancedPanel {
    let mut table = table(n, t);
    build_panel(
        &mut table,
        spec,
        &PanelColumns::new("unit", "time", "y"),
        &PanelOptions::default(),
    )
    .unwrap()
}

/// (units, periods, treated unit, onset).
fn onset_case() -> impl Strategy<Value = (i64, i64, i64, i64)> {
    (1i64..6, 1i64..9).prop_flat_map(|(n, t)| (Just(n), Just(t), 0..n, 0..t))
}

/// (units, periods, treated unit, window start, window end).
fn window_case() -> impl Strategy<Value = (i64, i64, i64, i64, i64)> {
    (1i64..6, 1i64..9)
        .prop_flat_map(|(n, t)| (Just(n), Just(t), 0..n, 0..t))
        .prop_flat_map(|(n, t, unit, start)| (Just(n), Just(t), Just(unit), Just(start), start..t))
}

proptest! {
    #[test]
    fn matrices_are_n_by_t((n, t, unit, onset) in onset_case()) {
        let panel = build(n, t, &(unit, onset).into());
        let expected = (n as usize, t as usize);
        prop_assert_eq!(panel.w().dim(), expected);
        prop_assert_eq!(panel.y().dim(), expected);
    }

    #[test]
    fn outcome_cells_follow_labels((n, t, unit, onset) in onset_case()) {
        let panel = build(n, t, &(unit, onset).into());
        for row in 0..panel.n() {
            for col in 0..panel.t() {
                prop_assert_eq!(panel.y()[[row, col]], (row * 100 + col) as f64);
            }
        }
    }

    #[test]
    fn continuous_row_is_treated_from_onset((n, t, unit, onset) in onset_case()) {
        let panel = build(n, t, &(unit, onset).into());
        let w = panel.w();
        for row in 0..panel.n() {
            for col in 0..panel.t() {
                let expected = row as i64 == unit && col as i64 >= onset;
                prop_assert_eq!(w[[row, col]], expected);
            }
        }
        prop_assert_eq!(panel.length_t0().unwrap(), onset as usize);
        prop_assert_eq!(panel.length_t1().unwrap(), (t - onset) as usize);
    }

    #[test]
    fn window_row_is_treated_inside_bounds((n, t, unit, start, end) in window_case()) {
        let panel = build(n, t, &(unit, (start, end)).into());
        let w = panel.w();
        for col in 0..panel.t() {
            let col = col as i64;
            prop_assert_eq!(w[[unit as usize, col as usize]], start <= col && col <= end);
        }
        prop_assert_eq!(panel.treated_ids(), vec![unit as usize]);
        prop_assert!(panel.length_t0().unwrap() + panel.length_t1().unwrap() <= panel.t());
    }

    #[test]
    fn rebuilding_yields_identical_panels((n, t, unit, start, end) in window_case()) {
        let spec: TreatmentSpec = (unit, (start, end)).into();
        prop_assert_eq!(build(n, t, &spec), build(n, t, &spec));
    }
}
