use std::collections::HashMap;

/// Fields of one atom line of a prep residue, after the sequence number and atom name.
///
/// The first field is the AMBER atom type and the last one the partial charge; the fields in
/// between (tree symbol, connectivity, internal coordinates) are carried along untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrepAtom {
    pub fields: Vec<String>,
}

impl PrepAtom {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn atom_type(&self) -> Option<&str> {
        self.fields.first().map(String::as_str)
    }

    pub fn charge(&self) -> Option<&str> {
        self.fields.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Atom name → template fields for one residue.
pub type PrepTemplate = HashMap<String, PrepAtom>;

/// Residue templates loaded from a prep file, read-only once built.
#[derive(Debug, Clone, Default)]
pub struct PrepLibrary {
    residues: HashMap<String, PrepTemplate>,
}

impl PrepLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a (possibly already existing) residue section.
    pub fn begin_residue(&mut self, residue: &str) {
        self.residues.insert(residue.to_string(), PrepTemplate::new());
    }

    pub fn insert_atom(&mut self, residue: &str, atom: &str, entry: PrepAtom) {
        self.residues
            .entry(residue.to_string())
            .or_default()
            .insert(atom.to_string(), entry);
    }

    /// Looks up `(residue, atom)`; empty entries count as missing.
    pub fn lookup(&self, residue: &str, atom: &str) -> Option<&PrepAtom> {
        self.residues
            .get(residue)?
            .get(atom)
            .filter(|entry| !entry.is_empty())
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(items: &[&str]) -> PrepAtom {
        PrepAtom::new(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn lookup_returns_type_and_charge() {
        let mut lib = PrepLibrary::new();
        lib.begin_residue("ALA");
        lib.insert_atom("ALA", "N", fields(&["N", "M", "3", "2", "1", "1.449", "-0.4157"]));

        let entry = lib.lookup("ALA", "N").unwrap();
        assert_eq!(entry.atom_type(), Some("N"));
        assert_eq!(entry.charge(), Some("-0.4157"));
    }

    #[test]
    fn lookup_misses_unknown_residue_atom_and_empty_entry() {
        let mut lib = PrepLibrary::new();
        lib.begin_residue("ALA");
        lib.insert_atom("ALA", "X", PrepAtom::default());

        assert!(lib.lookup("GLY", "N").is_none());
        assert!(lib.lookup("ALA", "CA").is_none());
        assert!(lib.lookup("ALA", "X").is_none());
    }

    #[test]
    fn reopening_a_residue_discards_previous_entries() {
        let mut lib = PrepLibrary::new();
        lib.begin_residue("ALA");
        lib.insert_atom("ALA", "N", fields(&["N", "0.1"]));
        lib.begin_residue("ALA");

        assert!(lib.lookup("ALA", "N").is_none());
        assert_eq!(lib.residue_count(), 1);
    }
}
