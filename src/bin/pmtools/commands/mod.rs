mod amber;
mod structure;

use amber::run_amber;
use structure::{run_pdb, run_pqr};

use anyhow::Result;
use playmol_tools::io::write_provenance;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Amber(args) => run_amber(args, ctx),
        Command::Pdb(args) => run_pdb(args, ctx),
        Command::Pqr(args) => run_pqr(args, ctx),
    }
}

/// Closes a rendered script with the generator footer.
fn finish_script(script: &mut Vec<u8>) -> Result<()> {
    write_provenance(script, &chrono::Local::now())?;
    Ok(())
}
