//! Core data structures produced by the decoders and consumed by the script emitter.
//!
//! - [`forcefield`]: AMBER atom types, nonbonded parameters and bonded-interaction types.
//! - [`structure`]: Atoms, unique names and connectivity reconstructed from PDB/PQR records.
//! - [`template`]: Residue templates loaded from AMBER prep files.
//!
//! The decoders own the collections they build; nothing in this module performs I/O, so a
//! model can be inspected, tested, or emitted independently of the file it came from.

pub mod forcefield;
pub mod structure;
pub mod template;
