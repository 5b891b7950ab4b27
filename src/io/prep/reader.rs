//! Permissive loader for AMBER prep (residue template) files.
//!
//! Only the residue name and the atom lines of each residue section are used. Lines that do
//! not fit the expected shape are skipped, never rejected.

use crate::io::{error::Error, util};
use crate::model::template::{PrepAtom, PrepLibrary};
use std::io::BufRead;

const STOP: &str = "STOP";
const DONE: &str = "DONE";

/// Atom lines with a sequence number up to this value are the dummy atoms of the residue.
const LAST_DUMMY_ATOM: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Waiting,
    InResidue(String),
}

pub fn read<R: BufRead>(reader: R) -> Result<PrepLibrary, Error> {
    let mut library = PrepLibrary::new();
    let mut state = State::Waiting;

    for line in util::numbered_lines(reader) {
        let (line_no, text) = line?;
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let Some(&first) = tokens.first() else {
            continue;
        };

        if first == STOP {
            break;
        }

        state = match state {
            State::Waiting if first.chars().count() == 3 => {
                library.begin_residue(first);
                log::debug!("prep line {}: residue {} opened", line_no, first);
                State::InResidue(first.to_string())
            }
            State::Waiting => State::Waiting,
            State::InResidue(_) if first == DONE => State::Waiting,
            State::InResidue(residue) => {
                match atom_entry(&tokens) {
                    Some((name, entry)) => library.insert_atom(&residue, name, entry),
                    None => log::debug!("prep line {}: skipped '{}'", line_no, text.trim()),
                }
                State::InResidue(residue)
            }
        };
    }

    log::debug!("loaded {} residue templates", library.residue_count());
    Ok(library)
}

fn atom_entry<'a>(tokens: &[&'a str]) -> Option<(&'a str, PrepAtom)> {
    let first = tokens.first()?;
    if first.is_empty() || !first.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let sequence: u32 = first.parse().ok()?;
    if sequence <= LAST_DUMMY_ATOM || tokens.len() < 2 {
        return None;
    }
    let fields = tokens[2..].iter().map(|t| t.to_string()).collect();
    Some((tokens[1], PrepAtom::new(fields)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ALA: &str = "\
    1    1    2
This is a remark line
molecule.res
ALA  INT  0
CORRECT     OMIT DU   BEG
  0.0000
   1  DUMMY  DU    M    0  -1  -2     0.000     0.000     0.000   0.00000
   2  DUMMY  DU    M    1   0  -1     1.449     0.000     0.000   0.00000
   3  DUMMY  DU    M    2   1   0     1.522   111.100     0.000   0.00000
   4  N      N     M    3   2   1     1.335   116.600   180.000  -0.41570
   5  H      H     E    4   3   2     1.010   119.800     0.000   0.27190
   6  CA     CT    M    4   3   2     1.449   121.900   180.000   0.03370

IMPROPER
 -M   CA   N    H

DONE
GLY  INT  0
   4  N      N     M    3   2   1     1.335   116.600   180.000  -0.41570
DONE
STOP
SER  INT  0
   4  N      N     M    3   2   1     1.335   116.600   180.000  -0.41570
DONE
";

    #[test]
    fn loads_atom_entries_per_residue() {
        let library = read(Cursor::new(ALA)).unwrap();

        let n = library.lookup("ALA", "N").unwrap();
        assert_eq!(n.atom_type(), Some("N"));
        assert_eq!(n.charge(), Some("-0.41570"));
        assert_eq!(library.lookup("ALA", "CA").unwrap().atom_type(), Some("CT"));
        assert!(library.lookup("GLY", "N").is_some());
    }

    #[test]
    fn dummy_atoms_and_trailing_sections_are_skipped() {
        let library = read(Cursor::new(ALA)).unwrap();

        assert!(library.lookup("ALA", "DUMMY").is_none());
        assert!(library.lookup("ALA", "-M").is_none());
        assert!(library.lookup("SER", "N").is_none());
        assert_eq!(library.residue_count(), 2);
    }

    #[test]
    fn stop_ends_parsing_inside_a_residue() {
        let input = "ALA  INT  0\n   4  N  N  M  -0.4\nSTOP\n   5  H  H  E  0.27\n";
        let library = read(Cursor::new(input)).unwrap();

        assert!(library.lookup("ALA", "N").is_some());
        assert!(library.lookup("ALA", "H").is_none());
    }

    #[test]
    fn empty_input_gives_empty_library() {
        assert!(read(Cursor::new("")).unwrap().is_empty());
    }
}
