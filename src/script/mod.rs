//! Configuration of the emitted Playmol script.
//!
//! The defaults live in an embedded TOML file; a user file may override any subset of them.

mod config;
mod error;

pub use config::{AmberOptions, ScriptConfig, StyleSet, get_default_config, load_config};
pub use error::Error;
