use std::io::{
    self,
    Write,
};

use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use lfm_import_services::{
    export::{
        package,
        write_jsonl,
    },
    load_scrobbles,
};

mod args;
use args::Args;


/// Converts `args.input` into the listens file, then packages it into the archive
///
/// Report lines go to `report`; returns the number of listens written.
fn run<W: Write>(args: &Args, mut report: W) -> Result<usize> {
    let listens = load_scrobbles(&args.input).with_context(|| args.input.display().to_string())?;

    let written = write_jsonl(&args.output, &listens).with_context(|| args.output.display().to_string())?;
    writeln!(report, "Listens written: {written}")?;

    package(&args.output, &args.archive).with_context(|| args.archive.display().to_string())?;
    writeln!(report, "Created: {}", args.archive.display())?;

    Ok(written)
}

fn main() -> Result<()> {
    let args = Args::parse_from(wild::args_os());

    env_logger::Builder::new().filter_level(args.log_level()).init();

    #[cfg(debug_assertions)]
    dbg!(&args);

    run(&args, io::stdout().lock()).map(drop)
}
