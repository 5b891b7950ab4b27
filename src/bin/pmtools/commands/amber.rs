use anyhow::{Context, Result, bail};

use playmol_tools::io::{AmberReader, write_forcefield_script};

use super::finish_script;
use crate::cli::AmberArgs;
use crate::config::build_script_config;
use crate::display::{Context as DisplayContext, Progress, print_forcefield_summary};
use crate::io::{open_input, stdin_is_tty, write_script};

const TOTAL_STEPS: u8 = 2;

pub fn run_amber(args: AmberArgs, ctx: DisplayContext) -> Result<()> {
    if args.io.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: pmtools amber -i <PARM> or pipe data via stdin."
        );
    }

    let config = build_script_config(&args.script)?;
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading AMBER parameters");
    let input = open_input(args.io.input.as_deref())?;
    let forcefield = AmberReader::new(input)
        .expand_equivalences(config.amber.expand_equivalences)
        .read()
        .context("Failed to read AMBER parameter file")?;
    progress.complete(&[
        format!("{} atom types", forcefield.atom_types.len()),
        format!(
            "{} bonded types ({} commented)",
            forcefield.bonded_count(),
            forcefield.undefined_count()
        ),
    ]);

    if ctx.interactive {
        print_forcefield_summary(&forcefield);
    }

    progress.step("Writing Playmol script");
    let mut script = Vec::new();
    write_forcefield_script(&mut script, &forcefield, &config)
        .context("Failed to render force-field script")?;
    finish_script(&mut script)?;
    write_script(args.io.output.as_deref(), &script)?;
    progress.complete(&[format!(
        "styles: {} / {} / {}",
        config.styles.pair, config.styles.dihedral, config.styles.improper
    )]);

    progress.finish();
    Ok(())
}
