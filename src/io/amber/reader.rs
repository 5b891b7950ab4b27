use super::layout::{self, BlockLayout, LineError};
use crate::io::{AmberReader, Format, error::Error, util};
use crate::model::forcefield::{BondedKind, BondedType, ForceField};
use std::fmt;
use std::io::BufRead;

const END_MARKER: &str = "END";

/// Blocks of an AMBER parameter file, in the order they appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Title,
    Atoms,
    Hydrophilic,
    Bonds,
    Angles,
    Dihedrals,
    Impropers,
    FastList,
    Equivalences,
    TypeHeader,
    Params,
    /// Anything between the nonbonded block and `END`.
    Trailing,
}

impl Block {
    pub fn next(self) -> Self {
        match self {
            Block::Title => Block::Atoms,
            Block::Atoms => Block::Hydrophilic,
            Block::Hydrophilic => Block::Bonds,
            Block::Bonds => Block::Angles,
            Block::Angles => Block::Dihedrals,
            Block::Dihedrals => Block::Impropers,
            Block::Impropers => Block::FastList,
            Block::FastList => Block::Equivalences,
            Block::Equivalences => Block::TypeHeader,
            Block::TypeHeader => Block::Params,
            Block::Params | Block::Trailing => Block::Trailing,
        }
    }

    /// Blocks made of exactly one line, followed directly by the next block.
    pub fn is_single_line(self) -> bool {
        matches!(self, Block::Title | Block::Hydrophilic | Block::TypeHeader)
    }

    pub fn layout(self) -> Option<&'static BlockLayout> {
        match self {
            Block::Bonds => Some(&layout::BOND_LAYOUT),
            Block::Angles => Some(&layout::ANGLE_LAYOUT),
            Block::Dihedrals => Some(&layout::DIHEDRAL_LAYOUT),
            Block::Impropers => Some(&layout::IMPROPER_LAYOUT),
            _ => None,
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Block::Title => "title",
            Block::Atoms => "atom",
            Block::Hydrophilic => "hydrophilic",
            Block::Bonds => "bond",
            Block::Angles => "angle",
            Block::Dihedrals => "dihedral",
            Block::Impropers => "improper",
            Block::FastList => "fast",
            Block::Equivalences => "equivalence",
            Block::TypeHeader => "type",
            Block::Params => "nonbonded",
            Block::Trailing => "trailing",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    End,
}

/// Line-at-a-time decoder for one AMBER parameter file.
#[derive(Debug)]
pub struct Decoder {
    block: Block,
    forcefield: ForceField,
    last_dihedral: Option<Vec<String>>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            block: Block::Title,
            forcefield: ForceField::new(),
            last_dihedral: None,
        }
    }

    pub fn block(&self) -> Block {
        self.block
    }

    /// Consumes one line. A blank line moves to the next block; `END` stops decoding.
    pub fn feed(&mut self, line_no: usize, raw: &str) -> Result<Step, Error> {
        let line = raw.trim_end();
        if line.is_empty() {
            self.block = self.block.next();
            return Ok(Step::Continue);
        }
        if line == END_MARKER {
            return Ok(Step::End);
        }

        let block = self.block;
        self.decode(block, line).map_err(|e| match e {
            LineError::UnsupportedPhase(phase) => Error::UnsupportedImproperPhase {
                line: line_no,
                phase,
            },
            other => Error::parse(Format::Amber, line_no, format!("{} block: {}", block, other)),
        })?;

        if block.is_single_line() {
            self.block = block.next();
        }
        Ok(Step::Continue)
    }

    fn decode(&mut self, block: Block, line: &str) -> Result<(), LineError> {
        let ff = &mut self.forcefield;
        match block {
            Block::Title => ff.title = line.to_string(),
            Block::Atoms => {
                if let Some(atom_type) = layout::mass_line(line)? {
                    ff.upsert_atom_type(atom_type);
                }
            }
            Block::Hydrophilic => ff.hydrophilic = line.trim().to_string(),
            Block::Bonds | Block::Angles | Block::Dihedrals | Block::Impropers => {
                self.decode_bonded(block, line)?;
            }
            Block::FastList => ff.fast.push(line.to_string()),
            Block::Equivalences => {
                let group: Vec<String> = line.split_whitespace().map(str::to_string).collect();
                ff.equivalences.push(group);
            }
            Block::TypeHeader => ff.type_header = line.trim().to_string(),
            Block::Params => {
                let (name, params) = layout::params_line(line)?;
                ff.set_nonbonded(&name, params);
            }
            Block::Trailing => log::debug!("ignoring line after the nonbonded block: {}", line),
        }
        Ok(())
    }

    fn decode_bonded(&mut self, block: Block, line: &str) -> Result<(), LineError> {
        let Some(layout) = block.layout() else {
            return Ok(());
        };
        if layout.is_header(line) {
            return Ok(());
        }

        let record = match layout.kind {
            BondedKind::Bond | BondedKind::Angle => layout::harmonic_line(line, layout)?,
            BondedKind::Dihedral => layout::dihedral_line(line, self.last_dihedral.as_deref())?,
            BondedKind::Improper => layout::improper_line(line)?,
        };
        if layout.kind == BondedKind::Dihedral {
            self.last_dihedral = Some(record.types.clone());
        }

        self.push_bonded(record);
        Ok(())
    }

    fn push_bonded(&mut self, mut record: BondedType) {
        record.defined = self.forcefield.is_fully_defined(&record.types);
        if !record.defined {
            log::debug!(
                "{} type '{}' references undeclared atom types",
                record.kind,
                record.key()
            );
        }
        self.forcefield.bonded_mut(record.kind).push(record);
    }

    pub fn finish(mut self, expand_equivalences: bool) -> ForceField {
        self.forcefield.attach_nonbonded(expand_equivalences);

        let ff = self.forcefield;
        let undefined = ff.undefined_count();
        if undefined > 0 {
            log::warn!(
                "{} of {} bonded types reference undeclared atom types and will be commented out",
                undefined,
                ff.bonded_count()
            );
        }
        let missing: Vec<&str> = ff
            .atom_types
            .iter()
            .filter(|t| t.nonbonded.is_none())
            .map(|t| t.name.as_str())
            .collect();
        if !missing.is_empty() {
            log::warn!("no nonbonded parameters for atom types: {}", missing.join(" "));
        }
        ff
    }
}

pub fn read<R: BufRead>(builder: AmberReader<R>) -> Result<ForceField, Error> {
    let mut decoder = Decoder::new();

    for line in util::numbered_lines(builder.reader) {
        let (line_no, text) = line?;
        if decoder.feed(line_no, &text)? == Step::End {
            break;
        }
    }

    Ok(decoder.finish(builder.expand_equivalences))
}
