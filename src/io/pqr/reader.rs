use crate::io::{Format, StructureReader, error::Error, records, util};
use crate::model::structure::Structure;
use std::io::BufRead;

pub fn read<R: BufRead>(builder: StructureReader<R>) -> Result<Structure, Error> {
    records::read_structure(builder.reader, Format::Pqr, |line, tokens| {
        let (mut atom, start) = records::base_atom(Format::Pqr, line, tokens, 3)?;
        atom.charge = Some(util::parse_real(Format::Pqr, line, tokens[start + 3], "charge")?);
        atom.radius = Some(util::parse_real(
            Format::Pqr,
            line,
            tokens[tokens.len() - 2],
            "radius",
        )?);
        Ok(atom)
    })
}
