use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use panel_ingest::read_panel_csv;
use panel_model::{PanelColumns, PanelOptions};
use panel_transform::build_panel;
use tracing::{info, info_span};

use panel_cli::export::PanelExport;
use panel_cli::treatment::treatment_spec;

use crate::cli::{BuildArgs, ColumnsArgs};

pub fn run_build(args: &BuildArgs) -> Result<()> {
    let span = info_span!("build", input = %args.input.display());
    let _guard = span.enter();

    let mut table = read_panel_csv(&args.input)
        .with_context(|| format!("load {}", args.input.display()))?;
    let unit_dtype = table.schema().get(args.unit.as_str()).cloned();
    let treatment =
        treatment_spec(&args.treat, unit_dtype.as_ref()).context("parse --treat assignments")?;
    let columns = PanelColumns::new(&args.unit, &args.time, &args.outcome);
    let options = PanelOptions::new().with_sort_in_place(args.sort_in_place);

    let panel = build_panel(&mut table, &treatment, &columns, &options).context("build panel")?;
    let export = PanelExport::from_panel(&panel);

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create {}", path.display()))?;
            export
                .write_json(BufWriter::new(file), args.pretty)
                .with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "wrote panel export");
        }
        None => {
            let stdout = io::stdout();
            export
                .write_json(stdout.lock(), args.pretty)
                .context("write panel export")?;
        }
    }
    Ok(())
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let table = read_panel_csv(&args.input)
        .with_context(|| format!("load {}", args.input.display()))?;
    let mut stdout = io::stdout().lock();
    for column in table.get_columns() {
        writeln!(stdout, "{}\t{}", column.name(), column.dtype())?;
    }
    Ok(())
}
