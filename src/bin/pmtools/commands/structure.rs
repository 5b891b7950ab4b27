use anyhow::{Context, Result, bail};

use playmol_tools::PrepLibrary;
use playmol_tools::io::{Format, StructureReader, read_prep_library, write_structure_script};

use super::finish_script;
use crate::cli::{IoOptions, PdbArgs, PqrArgs};
use crate::display::{Context as DisplayContext, Progress, print_structure_summary};
use crate::io::{open_input, open_prep, stdin_is_tty, write_script};

pub fn run_pdb(args: PdbArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, if args.prep.is_some() { 3 } else { 2 });

    let templates = match &args.prep {
        Some(path) => {
            progress.step("Loading residue templates");
            let library = read_prep_library(open_prep(path)?)
                .with_context(|| format!("Failed to read prep file: {}", path.display()))?;
            if library.is_empty() {
                log::warn!("prep file {} defines no residues", path.display());
            }
            progress.complete(&[format!("{} residues", library.residue_count())]);
            Some(library)
        }
        None => None,
    };

    convert(&args.io, Format::Pdb, templates.as_ref(), progress, ctx)
}

pub fn run_pqr(args: PqrArgs, ctx: DisplayContext) -> Result<()> {
    let progress = Progress::new(ctx.interactive, 2);
    convert(&args.io, Format::Pqr, None, progress, ctx)
}

fn convert(
    io: &IoOptions,
    format: Format,
    templates: Option<&PrepLibrary>,
    mut progress: Progress,
    ctx: DisplayContext,
) -> Result<()> {
    if io.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: pmtools {} -i <FILE> or pipe data via stdin.",
            format.to_string().to_lowercase()
        );
    }

    let reading = format!("Reading {} structure", format);
    progress.step(&reading);
    let input = open_input(io.input.as_deref())?;
    let structure = StructureReader::new(input, format)
        .read()
        .with_context(|| format!("Failed to read {} file", format))?;
    progress.complete(&[
        format!("{} atoms", structure.atom_count()),
        format!("{} bonds", structure.bond_count()),
    ]);

    if ctx.interactive {
        print_structure_summary(&structure, templates);
    }

    progress.step("Writing Playmol script");
    let mut script = Vec::new();
    write_structure_script(&mut script, &structure, format, templates)
        .context("Failed to render structure script")?;
    finish_script(&mut script)?;
    write_script(io.output.as_deref(), &script)?;
    progress.complete(&[]);

    progress.finish();
    Ok(())
}
