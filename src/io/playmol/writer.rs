//! Playmol script rendering.
//!
//! Every lookup that can fail (prep templates, bond endpoints) is resolved before the first
//! line is written, so an error never leaves a truncated script behind in `writer`.

use crate::io::{Format, error::Error};
use crate::model::forcefield::{BondedKind, BondedType, ForceField, RealDisplay};
use crate::model::structure::{NameRule, Structure};
use crate::model::template::PrepLibrary;
use crate::script::ScriptConfig;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::io::Write;

const GENERATOR: &str = "pmtools";
const UNDEFINED: &str = "UNDEFINED";
const DEFINE_NAME_WIDTH: usize = 14;

/// Writes the force-field script for a decoded AMBER parameter file.
pub fn write_forcefield_script<W: Write>(
    mut writer: W,
    forcefield: &ForceField,
    config: &ScriptConfig,
) -> Result<(), Error> {
    writeln!(writer, "# {}", forcefield.title)?;

    writeln!(writer, "\n# Model definition:")?;
    for (variable, style) in config.styles.definitions() {
        writeln!(
            writer,
            "define\t{:<width$} as {}",
            variable,
            style,
            width = DEFINE_NAME_WIDTH
        )?;
    }

    writeln!(writer, "\n# Atom types:")?;
    for atom_type in &forcefield.atom_types {
        match atom_type.nonbonded {
            Some(params) => writeln!(
                writer,
                "atom_type\t{}\t$pair_style\t{}\t{}\t# {}",
                atom_type.name,
                RealDisplay(params.epsilon),
                RealDisplay(params.diameter),
                atom_type.note
            )?,
            None => writeln!(
                writer,
                "atom_type\t{}\t$pair_style\t{}\t# {}",
                atom_type.name, UNDEFINED, atom_type.note
            )?,
        }
    }

    writeln!(writer, "\n# Masses:")?;
    for atom_type in &forcefield.atom_types {
        writeln!(writer, "mass\t{}\t{}", atom_type.name, RealDisplay(atom_type.mass))?;
    }

    writeln!(writer, "\n# Diameters:")?;
    for atom_type in &forcefield.atom_types {
        match atom_type.nonbonded {
            Some(params) => writeln!(
                writer,
                "diameter\t{}\t{}",
                atom_type.name,
                RealDisplay(params.diameter.max(config.amber.min_diameter))
            )?,
            None => writeln!(writer, "#diameter\t{}\t{}", atom_type.name, UNDEFINED)?,
        }
    }

    for (kind, heading) in [
        (BondedKind::Bond, "Bond types"),
        (BondedKind::Angle, "Angle types"),
        (BondedKind::Dihedral, "Dihedral types"),
        (BondedKind::Improper, "Improper types"),
    ] {
        writeln!(writer, "\n# {}:", heading)?;
        for record in forcefield.bonded(kind) {
            writeln!(writer, "{}", bonded_line(record))?;
        }
    }

    Ok(())
}

/// One bonded-type directive; records with undeclared atom types are commented out.
fn bonded_line(record: &BondedType) -> String {
    let prefix = if record.defined { "" } else { "#" };
    let separator = match record.kind {
        BondedKind::Bond | BondedKind::Angle => " ",
        BondedKind::Dihedral | BondedKind::Improper => "\t",
    };
    let coefficients: Vec<String> = record.coefficients.iter().map(|c| c.to_string()).collect();

    format!(
        "{}{}\t{}\t${}{}{}",
        prefix,
        record.kind.keyword(),
        record.key(),
        record.kind.style_variable(),
        separator,
        coefficients.join(separator)
    )
}

/// Writes the atom, bond and geometry script of a PDB or PQR structure.
///
/// For PDB input with `templates`, each atom's type and charge come from the prep entry of
/// its residue and raw name; a missing entry is [`Error::MissingTemplate`].
pub fn write_structure_script<W: Write>(
    mut writer: W,
    structure: &Structure,
    format: Format,
    templates: Option<&PrepLibrary>,
) -> Result<(), Error> {
    let rule = match format {
        Format::Pdb => NameRule::RawWhenUnique,
        Format::Pqr => NameRule::UniqueWhenRepeated,
        other => return Err(Error::UnsupportedWriteFormat(other)),
    };
    let templates = match format {
        Format::Pdb => templates,
        _ => None,
    };

    let names: Vec<&str> = structure
        .atoms
        .iter()
        .map(|atom| structure.output_name(atom, rule))
        .collect();

    let mut atom_lines = Vec::with_capacity(structure.atom_count());
    for (atom, name) in structure.atoms.iter().zip(&names) {
        let line = match templates {
            Some(library) => {
                let entry = library
                    .lookup(&atom.residue, &atom.name)
                    .ok_or_else(|| Error::missing_template(&atom.residue, &atom.name))?;
                format!(
                    "atom\t{}\t{}\t{}",
                    name,
                    entry.atom_type().unwrap_or_default(),
                    entry.charge().unwrap_or_default()
                )
            }
            None => match atom.charge {
                Some(charge) => format!("atom\t{}\t{}\t{}", name, atom.atom_type, RealDisplay(charge)),
                None => format!("atom\t{}\t{}", name, atom.atom_type),
            },
        };
        atom_lines.push(line);
    }

    let mut bond_lines = Vec::with_capacity(structure.bond_count());
    for bond in &structure.bonds {
        let endpoint = |index: usize| {
            names.get(index).copied().ok_or_else(|| {
                Error::Conversion(format!(
                    "bond {}-{} references atom {} but only {} atoms were read",
                    bond.i + 1,
                    bond.j + 1,
                    index + 1,
                    names.len()
                ))
            })
        };
        bond_lines.push(format!("bond\t{}\t{}", endpoint(bond.i)?, endpoint(bond.j)?));
    }

    writeln!(writer, "# Atom definitions:")?;
    for line in &atom_lines {
        writeln!(writer, "{}", line)?;
    }

    writeln!(writer, "\n# Bond definitions:")?;
    for line in &bond_lines {
        writeln!(writer, "{}", line)?;
    }

    writeln!(writer, "\n# Molecular structure (xyz):")?;
    writeln!(writer, "\nbuild")?;
    writeln!(writer, "{}", structure.atom_count())?;
    for (atom, name) in structure.atoms.iter().zip(&names) {
        let [x, y, z] = atom.position;
        writeln!(
            writer,
            "{} {} {} {}",
            name,
            RealDisplay(x),
            RealDisplay(y),
            RealDisplay(z)
        )?;
    }

    if format == Format::Pqr {
        writeln!(writer, "\n# Diameters for packing:")?;
        for (atom_type, diameter) in &structure.diameters {
            writeln!(writer, "diameter\t{}\t{}", atom_type, RealDisplay(*diameter))?;
        }
    }

    Ok(())
}

/// Appends the provenance footer closing every generated script.
pub fn write_provenance<W, Tz>(mut writer: W, generated_at: &DateTime<Tz>) -> Result<(), Error>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    writeln!(
        writer,
        "\n# Generated by {} on {}",
        GENERATOR,
        generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    Ok(())
}
