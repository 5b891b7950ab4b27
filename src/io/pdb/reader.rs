use crate::io::{Format, StructureReader, error::Error, records};
use crate::model::structure::Structure;
use std::io::BufRead;

pub fn read<R: BufRead>(builder: StructureReader<R>) -> Result<Structure, Error> {
    records::read_structure(builder.reader, Format::Pdb, |line, tokens| {
        let (atom, _) = records::base_atom(Format::Pdb, line, tokens, 1)?;
        Ok(atom)
    })
}

#[cfg(test)]
mod tests {
    use crate::io::{Format, StructureReader, error::Error};
    use crate::model::structure::NameRule;
    use std::io::Cursor;

    const DIPEPTIDE: &str = "\
HEADER    TEST
ATOM      1  N   ALA A   1      11.104  13.207   2.100  1.00  0.00           N
ATOM      2  CA  ALA A   1      12.560  13.207   2.100  1.00  0.00           C
ATOM      3  CA  GLY A   2      13.000  14.100   2.300  1.00  0.00           C
CONECT    2    3
CONECT    3    2
END
";

    #[test]
    fn reads_atoms_with_chain_and_disambiguates_names() {
        let structure = StructureReader::new(Cursor::new(DIPEPTIDE), Format::Pdb)
            .read()
            .unwrap();

        assert_eq!(structure.atom_count(), 3);
        let names: Vec<_> = structure
            .atoms
            .iter()
            .map(|a| structure.output_name(a, NameRule::RawWhenUnique))
            .collect();
        assert_eq!(names, vec!["N", "CA", "CA_2"]);
        assert_eq!(structure.atoms[2].residue, "GLY");
        assert_eq!(structure.atoms[2].atom_type, "C");
        assert_eq!(structure.atoms[0].position, [11.104, 13.207, 2.100]);
        assert!(structure.atoms[0].charge.is_none());
        assert!(structure.diameters.is_empty());
    }

    #[test]
    fn symmetric_conect_records_yield_one_bond() {
        let structure = StructureReader::new(Cursor::new(DIPEPTIDE), Format::Pdb)
            .read()
            .unwrap();

        assert_eq!(structure.bond_count(), 1);
        assert_eq!((structure.bonds[0].i, structure.bonds[0].j), (1, 2));
    }

    #[test]
    fn reads_records_without_chain_identifier() {
        let input = "ATOM      1  OW  HOH     1       0.000   0.000   0.000  1.00  0.00           O\n";
        let structure = StructureReader::new(Cursor::new(input), Format::Pdb)
            .read()
            .unwrap();

        assert_eq!(structure.atoms[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(structure.atoms[0].atom_type, "O");
    }

    const SHADOWED_NAMES: &str = "\
ATOM      1  CA  ALA A   1      11.104  13.207   2.100  1.00  0.00           C
ATOM      2  CA  ALA A   1      12.560  13.207   2.100  1.00  0.00           C
ATOM      3  CA_2 GLY A   2     13.000  14.100   2.300  1.00  0.00           C
END
";

    fn unique_names(input: &str) -> Vec<String> {
        let structure = StructureReader::new(Cursor::new(input), Format::Pdb)
            .read()
            .unwrap();
        structure.atoms.into_iter().map(|a| a.unique_name).collect()
    }

    #[test]
    fn decoding_twice_assigns_identical_unique_names() {
        for input in [DIPEPTIDE, SHADOWED_NAMES] {
            assert_eq!(unique_names(input), unique_names(input));
        }
    }

    #[test]
    fn raw_name_equal_to_a_generated_name_stays_distinct() {
        let structure = StructureReader::new(Cursor::new(SHADOWED_NAMES), Format::Pdb)
            .read()
            .unwrap();

        let written: Vec<_> = structure
            .atoms
            .iter()
            .map(|a| structure.output_name(a, NameRule::RawWhenUnique))
            .collect();
        assert_eq!(written, vec!["CA", "CA_2", "CA_2_2"]);
        assert_eq!(unique_names(SHADOWED_NAMES), vec!["CA", "CA_2", "CA_2_2"]);
    }

    #[test]
    fn malformed_coordinate_is_a_parse_error() {
        let input = "REMARK\nATOM      1  N   ALA A   1      11.104  abc   2.100  1.00  0.00  N\n";
        let err = StructureReader::new(Cursor::new(input), Format::Pdb)
            .read()
            .unwrap_err();

        match err {
            Error::Parse { format, line, details } => {
                assert_eq!(format, Format::Pdb);
                assert_eq!(line, 2);
                assert!(details.contains("abc"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
