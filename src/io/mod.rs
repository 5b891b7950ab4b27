//! Readers for AMBER, PDB, PQR and prep files, and the Playmol script writers.
//!
//! Reading goes through small builders that own the input stream and dispatch to the
//! format-specific decoder:
//!
//! - [`AmberReader`] decodes an AMBER parameter file into a [`ForceField`].
//! - [`StructureReader`] decodes a PDB or PQR file into a [`Structure`].
//! - [`read_prep_library`] loads residue templates for the PDB path.
//!
//! Writing is done with [`write_forcefield_script`] and [`write_structure_script`], which
//! render the complete script before touching the output.

use crate::model::forcefield::ForceField;
use crate::model::structure::Structure;
use crate::model::template::PrepLibrary;
use std::fmt;
use std::io::BufRead;

pub mod error;
pub mod util;

mod records;

pub mod amber {
    pub mod layout;
    pub mod reader;
}

pub mod pdb {
    pub mod reader;
}

pub mod pqr {
    pub mod reader;
}

pub mod prep {
    pub mod reader;
}

pub mod playmol {
    pub mod writer;
}

pub use playmol::writer::{write_forcefield_script, write_provenance, write_structure_script};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Amber,
    Pdb,
    Pqr,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Amber => write!(f, "AMBER"),
            Format::Pdb => write!(f, "PDB"),
            Format::Pqr => write!(f, "PQR"),
        }
    }
}

/// Builder for decoding an AMBER parameter file.
pub struct AmberReader<R: BufRead> {
    pub(crate) reader: R,
    pub(crate) expand_equivalences: bool,
}

impl<R: BufRead> AmberReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            expand_equivalences: false,
        }
    }

    /// Lets types of an equivalence group inherit the nonbonded parameters of its first type.
    pub fn expand_equivalences(mut self, enabled: bool) -> Self {
        self.expand_equivalences = enabled;
        self
    }

    pub fn read(self) -> Result<ForceField, error::Error> {
        amber::reader::read(self)
    }
}

/// Builder for decoding a PDB or PQR structure.
pub struct StructureReader<R: BufRead> {
    pub(crate) reader: R,
    pub(crate) format: Format,
}

impl<R: BufRead> StructureReader<R> {
    pub fn new(reader: R, format: Format) -> Self {
        Self { reader, format }
    }

    pub fn read(self) -> Result<Structure, error::Error> {
        match self.format {
            Format::Pdb => pdb::reader::read(self),
            Format::Pqr => pqr::reader::read(self),
            other => Err(error::Error::UnsupportedReadFormat(other)),
        }
    }
}

/// Loads every residue template of a prep file.
pub fn read_prep_library<R: BufRead>(reader: R) -> Result<PrepLibrary, error::Error> {
    prep::reader::read(reader)
}
