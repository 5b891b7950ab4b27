use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pmtools",
    about = "Convert AMBER parameters and PDB/PQR structures into Playmol scripts",
    version,
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert an AMBER parameter file (parm*.dat, frcmod-style blocks)
    #[command(visible_alias = "a")]
    Amber(AmberArgs),

    /// Convert a PDB structure, optionally typed through an AMBER prep file
    Pdb(PdbArgs),

    /// Convert a PQR structure with per-atom charges and radii
    Pqr(PqrArgs),
}

/// I/O options shared by all commands.
#[derive(Args)]
pub struct IoOptions {
    /// Input file (stdin if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output script (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Script style options (amber command only).
#[derive(Args)]
#[command(next_help_heading = "Script Options")]
pub struct ScriptOptions {
    /// Interaction styles and emission options (TOML file)
    #[arg(long, value_name = "FILE")]
    pub styles: Option<PathBuf>,

    /// Lower bound for emitted diameters (overrides the styles file)
    #[arg(long = "min-diameter", value_name = "Å", allow_hyphen_values = true)]
    pub min_diameter: Option<f64>,

    /// Give equivalenced atom types the nonbonded parameters of their group's first type
    #[arg(long = "expand-equivalences")]
    pub expand_equivalences: bool,
}

#[derive(Args)]
pub struct AmberArgs {
    #[command(flatten)]
    pub io: IoOptions,

    #[command(flatten)]
    pub script: ScriptOptions,
}

#[derive(Args)]
pub struct PdbArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// AMBER prep file supplying atom types and charges per residue
    #[arg(short, long, value_name = "PREP")]
    pub prep: Option<PathBuf>,
}

#[derive(Args)]
pub struct PqrArgs {
    #[command(flatten)]
    pub io: IoOptions,
}

pub fn parse() -> Cli {
    Cli::parse()
}
