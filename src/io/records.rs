//! Record scanning shared by the PDB and PQR readers.
//!
//! Both formats are read token-wise: `ATOM`/`HETATM` records become [`StructureAtom`]s through
//! a format-specific field extractor, `CONECT` records add undirected bonds, and every other
//! record is ignored.

use super::{Format, error::Error, util};
use crate::model::structure::{Structure, StructureAtom};
use std::io::BufRead;

/// Column index of the first coordinate, accounting for an optional chain identifier.
///
/// Without a chain the residue sequence number sits at index 4 and coordinates start at 5.
/// A chain identifier shifts everything by one; it is recognised by a non-integer token at
/// index 4 that is not followed by a coordinate (coordinates always contain a decimal point).
pub fn coordinate_start(tokens: &[&str]) -> usize {
    let chain_present = tokens.get(4).is_some_and(|t| !util::is_integer(t))
        && tokens.get(5).is_some_and(|t| !t.contains('.'));
    if chain_present { 6 } else { 5 }
}

/// Fields common to both formats: name, residue, coordinates and the trailing type token.
pub fn base_atom(
    format: Format,
    line: usize,
    tokens: &[&str],
    min_trailing: usize,
) -> Result<(StructureAtom, usize), Error> {
    let start = coordinate_start(tokens);
    let required = start + 3 + min_trailing;
    if tokens.len() < required {
        return Err(Error::parse(
            format,
            line,
            format!(
                "{} record has {} fields, expected at least {}",
                tokens[0],
                tokens.len(),
                required
            ),
        ));
    }

    let x = util::parse_real(format, line, tokens[start], "x coordinate")?;
    let y = util::parse_real(format, line, tokens[start + 1], "y coordinate")?;
    let z = util::parse_real(format, line, tokens[start + 2], "z coordinate")?;

    let atom = StructureAtom {
        index: 0,
        name: tokens[2].to_string(),
        unique_name: String::new(),
        residue: tokens[3].to_string(),
        atom_type: tokens[tokens.len() - 1].to_string(),
        position: [x, y, z],
        charge: None,
        radius: None,
    };
    Ok((atom, start))
}

/// Adds the bonds of one `CONECT` record: the first serial to every following one.
pub fn apply_conect(
    format: Format,
    line: usize,
    tokens: &[&str],
    structure: &mut Structure,
) -> Result<(), Error> {
    let Some((origin, partners)) = tokens[1..].split_first() else {
        return Err(Error::parse(format, line, "CONECT record without atom serials"));
    };

    let i = zero_based(format, line, origin)?;
    for partner in partners {
        let j = zero_based(format, line, partner)?;
        structure.add_bond(i, j);
    }
    Ok(())
}

fn zero_based(format: Format, line: usize, token: &str) -> Result<usize, Error> {
    match token.parse::<usize>() {
        Ok(serial) if serial > 0 => Ok(serial - 1),
        _ => Err(Error::parse(
            format,
            line,
            format!("invalid atom serial '{}' in CONECT record", token),
        )),
    }
}

/// Scans all records of a structure file.
pub fn read_structure<R, F>(reader: R, format: Format, mut atom_from: F) -> Result<Structure, Error>
where
    R: BufRead,
    F: FnMut(usize, &[&str]) -> Result<StructureAtom, Error>,
{
    let mut structure = Structure::new();

    for line in util::numbered_lines(reader) {
        let (line_no, text) = line?;
        let tokens: Vec<&str> = text.split_whitespace().collect();
        match tokens.first() {
            Some(&"ATOM") | Some(&"HETATM") => {
                let atom = atom_from(line_no, &tokens)?;
                structure.push_atom(atom);
            }
            Some(&"CONECT") => apply_conect(format, line_no, &tokens, &mut structure)?,
            _ => {}
        }
    }

    log::debug!(
        "read {} atoms and {} bonds from {} input",
        structure.atom_count(),
        structure.bond_count(),
        format
    );
    Ok(structure)
}
