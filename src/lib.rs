//! Conversion of AMBER force-field parameter files and PDB/PQR structures into scripts for the
//! Playmol molecular builder.
//!
//! # Features
//!
//! - **AMBER parameters**: Fixed-column decoding of the mass, bond, angle, dihedral, improper
//!   and nonbonded blocks of `parm*.dat`-style files, with Lennard-Jones diameters derived from
//!   the AMBER radii
//! - **Structures**: PDB and PQR atom records and `CONECT` connectivity, with repeated atom
//!   names made unique
//! - **Residue templates**: Atom types and partial charges taken from AMBER prep files
//! - **Playmol output**: Complete scripts with configurable interaction styles
//!
//! # Quick Start
//!
//! ```
//! use playmol_tools::io::{AmberReader, write_forcefield_script};
//! use playmol_tools::ScriptConfig;
//! use std::io::Cursor;
//!
//! let parm = "title\nCT 12.01 0.0 carbon\n\n\n\n\n\n\n\n\nMOD4 RE\nCT 1.908 0.1094\n\nEND\n";
//! let forcefield = AmberReader::new(Cursor::new(parm)).read()?;
//! assert_eq!(forcefield.atom_types.len(), 1);
//!
//! let mut script = Vec::new();
//! write_forcefield_script(&mut script, &forcefield, &ScriptConfig::default())?;
//! let script = String::from_utf8(script).unwrap();
//! assert!(script.contains("mass\tCT\t12.01"));
//! # Ok::<(), playmol_tools::IoError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`]: Readers for AMBER, PDB, PQR and prep files; Playmol script writers
//! - [`script`]: Interaction styles and emission options, loaded from TOML
//!
//! # Data Types
//!
//! ## Force Field
//!
//! - [`ForceField`]: Everything decoded from one AMBER parameter file
//! - [`AtomType`]: Mass, note and optional nonbonded parameters of one type
//! - [`BondedType`]: Bond, angle, dihedral or improper type keyed by atom types
//! - [`Coefficient`]: Real, integer, or deferred-ratio coefficient
//!
//! ## Structure
//!
//! - [`Structure`]: Atoms, bonds and packing diameters of a PDB/PQR file
//! - [`StructureAtom`]: One atom record with its disambiguated name
//! - [`PrepLibrary`]: Residue templates loaded from a prep file

mod model;

pub mod io;
pub mod script;

pub use model::forcefield::{
    AtomType, BondedKind, BondedType, Coefficient, ForceField, NonbondedParams, RealDisplay,
    WILDCARD,
};
pub use model::structure::{Bond, NameRule, Structure, StructureAtom};
pub use model::template::{PrepAtom, PrepLibrary, PrepTemplate};

pub use io::error::Error as IoError;
pub use script::{ScriptConfig, StyleSet};
pub use script::Error as ScriptError;
