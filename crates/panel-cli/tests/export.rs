//! Tests for the JSON panel export.

use std::io::{self, BufWriter, Write};

use panel_cli::export::PanelExport;
use panel_cli::treatment::treatment_spec;
use panel_model::{AssignmentArg, PanelColumns, PanelOptions};
use panel_transform::{BalancedPanel, build_panel};
use polars::prelude::*;

fn build(assignments: &[&str]) -> BalancedPanel {
    let mut table = df!(
        "unit" => ["b", "b", "a", "a"],
        "time" => [1i64, 2, 1, 2],
        "y" => [3.0, 4.0, 1.0, 2.0]
    )
    .unwrap();
    let assignments: Vec<AssignmentArg> = assignments
        .iter()
        .map(|arg| arg.parse().unwrap())
        .collect();
    let unit_dtype = table.column("unit").unwrap().dtype().clone();
    let spec = treatment_spec(&assignments, Some(&unit_dtype)).unwrap();
    build_panel(
        &mut table,
        &spec,
        &PanelColumns::new("unit", "time", "y"),
        &PanelOptions::default(),
    )
    .unwrap()
}

fn export_json(panel: &BalancedPanel) -> String {
    let mut buffer = Vec::new();
    PanelExport::from_panel(panel)
        .write_json(&mut buffer, false)
        .unwrap();
    String::from_utf8(buffer).unwrap().trim_end().to_string()
}

#[test]
fn single_unit_export() {
    let panel = build(&["a=2"]);
    insta::assert_snapshot!(
        export_json(&panel),
        @r#"{"pattern":"single_continuous","units":["a","b"],"times":[1,2],"w":[[false,true],[false,false]],"y":[[1.0,2.0],[3.0,4.0]],"treated_ids":[0],"control_ids":[1],"first_treated_period_ids":[1],"onsets_by_unit":[{"row":0,"unit":"a","onsets":[1]}],"length_t0":1,"length_t1":1}"#
    );
}

#[test]
fn staggered_export_leaves_global_accessors_null() {
    let panel = build(&["a=1", "b=2"]);
    let export = PanelExport::from_panel(&panel);

    assert_eq!(export.first_treated_period_ids, None);
    assert_eq!(export.length_t0, None);
    assert_eq!(export.length_t1, None);
    assert_eq!(export.onsets_by_unit.len(), 2);
    assert!(export_json(&panel).contains(r#""pattern":"multiple_staggered_continuous""#));
}

#[test]
fn pretty_export_ends_with_newline() {
    let panel = build(&["a=1..1"]);
    let mut buffer = Vec::new();
    PanelExport::from_panel(&panel)
        .write_json(&mut buffer, true)
        .unwrap();
    let text = String::from_utf8(buffer).unwrap();

    assert!(text.starts_with("{\n  \"pattern\": \"single_discontinuous\""));
    assert!(text.ends_with("}\n"));
}

/// Accepts nothing: every write and flush fails.
struct FullDisk;

impl Write for FullDisk {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }
}

#[test]
fn buffered_write_failure_is_reported() {
    let panel = build(&["a=2"]);
    let err = PanelExport::from_panel(&panel)
        .write_json(BufWriter::new(FullDisk), false)
        .unwrap_err();

    assert!(err.is_io());
    assert!(err.to_string().contains("disk full"));
}
