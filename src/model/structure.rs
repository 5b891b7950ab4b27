use std::collections::{HashMap, HashSet};

/// One `ATOM`/`HETATM` record.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureAtom {
    /// 1-based position in record order.
    pub index: usize,
    pub name: String,
    /// `name` on first occurrence, `name_<k>` on the k-th occurrence in the structure.
    /// `k` is raised past any name already taken, so unique names never collide.
    pub unique_name: String,
    pub residue: String,
    /// Trailing type/element token of the record.
    pub atom_type: String,
    pub position: [f64; 3],
    pub charge: Option<f64>,
    pub radius: Option<f64>,
}

/// Undirected bond between two 0-based atom indices, stored with `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2 }
        } else {
            Self { i: idx2, j: idx1 }
        }
    }
}

/// How the name written to the script is chosen for an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    /// Raw name when it occurs once in the structure, unique name otherwise (PDB).
    RawWhenUnique,
    /// Unique name substituted only for repeated names (PQR).
    UniqueWhenRepeated,
}

/// Atoms, connectivity and packing diameters reconstructed from a PDB or PQR file.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    pub atoms: Vec<StructureAtom>,
    /// Bonds in discovery order.
    pub bonds: Vec<Bond>,
    /// `2 × radius` per type token, in first-seen order.
    pub diameters: Vec<(String, f64)>,
    name_counts: HashMap<String, usize>,
    taken_names: HashSet<String>,
    bond_set: HashSet<Bond>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an atom, assigning its 1-based index and unique name.
    ///
    /// `index` and `unique_name` of the given atom are overwritten.
    pub fn push_atom(&mut self, mut atom: StructureAtom) -> &StructureAtom {
        let count = self.name_counts.entry(atom.name.clone()).or_insert(0);
        *count += 1;

        let mut suffix = *count;
        let mut unique = if suffix == 1 {
            atom.name.clone()
        } else {
            format!("{}_{}", atom.name, suffix)
        };
        while self.taken_names.contains(&unique) {
            suffix += 1;
            unique = format!("{}_{}", atom.name, suffix);
        }
        self.taken_names.insert(unique.clone());
        atom.unique_name = unique;
        atom.index = self.atoms.len() + 1;

        if let Some(radius) = atom.radius {
            self.set_diameter(&atom.atom_type, 2.0 * radius);
        }

        self.atoms.push(atom);
        &self.atoms[self.atoms.len() - 1]
    }

    /// Adds the bond `i-j` unless it is a self-bond or already present in either orientation.
    ///
    /// Returns `true` when the bond was added.
    pub fn add_bond(&mut self, i: usize, j: usize) -> bool {
        if i == j {
            return false;
        }
        let bond = Bond::new(i, j);
        if !self.bond_set.insert(bond) {
            return false;
        }
        self.bonds.push(Bond { i, j });
        true
    }

    fn set_diameter(&mut self, atom_type: &str, diameter: f64) {
        match self.diameters.iter_mut().find(|(t, _)| t == atom_type) {
            Some((_, existing)) => *existing = diameter,
            None => self.diameters.push((atom_type.to_string(), diameter)),
        }
    }

    /// Number of atoms in the whole structure sharing this raw name.
    pub fn occurrences(&self, name: &str) -> usize {
        self.name_counts.get(name).copied().unwrap_or(0)
    }

    /// Name written to the script for `atom` under the given rule.
    ///
    /// A raw name that was displaced by an earlier generated name is never written raw.
    pub fn output_name<'a>(&self, atom: &'a StructureAtom, rule: NameRule) -> &'a str {
        let repeated = self.occurrences(&atom.name) > 1 || atom.unique_name != atom.name;
        match rule {
            NameRule::RawWhenUnique if !repeated => &atom.name,
            NameRule::RawWhenUnique => &atom.unique_name,
            NameRule::UniqueWhenRepeated if repeated => &atom.unique_name,
            NameRule::UniqueWhenRepeated => &atom.name,
        }
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn residue_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.atoms
            .iter()
            .map(|a| a.residue.as_str())
            .filter(|r| seen.insert(*r))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str, atom_type: &str, radius: Option<f64>) -> StructureAtom {
        StructureAtom {
            index: 0,
            name: name.to_string(),
            unique_name: String::new(),
            residue: "ALA".to_string(),
            atom_type: atom_type.to_string(),
            position: [0.0, 0.0, 0.0],
            charge: None,
            radius,
        }
    }

    #[test]
    fn repeated_names_get_occurrence_suffix() {
        let mut s = Structure::new();
        s.push_atom(atom("CA", "C", None));
        s.push_atom(atom("N", "N", None));
        s.push_atom(atom("CA", "C", None));
        s.push_atom(atom("CA", "C", None));

        let names: Vec<_> = s.atoms.iter().map(|a| a.unique_name.as_str()).collect();
        assert_eq!(names, vec!["CA", "N", "CA_2", "CA_3"]);
        let indices: Vec<_> = s.atoms.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
        assert_eq!(s.occurrences("CA"), 3);
    }

    #[test]
    fn bonds_are_undirected_and_never_self() {
        let mut s = Structure::new();
        assert!(s.add_bond(0, 1));
        assert!(!s.add_bond(1, 0));
        assert!(!s.add_bond(0, 1));
        assert!(!s.add_bond(2, 2));
        assert!(s.add_bond(2, 1));

        assert_eq!(s.bonds, vec![Bond { i: 0, j: 1 }, Bond { i: 2, j: 1 }]);
    }

    #[test]
    fn diameter_table_keeps_first_seen_order_and_last_value() {
        let mut s = Structure::new();
        s.push_atom(atom("O1", "OW", Some(1.5)));
        s.push_atom(atom("H1", "HW", Some(0.6)));
        s.push_atom(atom("O2", "OW", Some(1.6)));

        assert_eq!(
            s.diameters,
            vec![("OW".to_string(), 3.2), ("HW".to_string(), 1.2)]
        );
    }

    #[test]
    fn name_rules_agree_on_unique_and_repeated_names() {
        let mut s = Structure::new();
        s.push_atom(atom("CA", "C", None));
        s.push_atom(atom("CA", "C", None));
        s.push_atom(atom("N", "N", None));

        for rule in [NameRule::RawWhenUnique, NameRule::UniqueWhenRepeated] {
            let names: Vec<_> = s.atoms.iter().map(|a| s.output_name(a, rule)).collect();
            assert_eq!(names, vec!["CA", "CA_2", "N"]);
        }
    }

    #[test]
    fn raw_name_matching_a_generated_name_is_displaced() {
        let mut s = Structure::new();
        s.push_atom(atom("CA", "C", None));
        s.push_atom(atom("CA", "C", None));
        s.push_atom(atom("CA_2", "C", None));
        s.push_atom(atom("CA", "C", None));

        let names: Vec<_> = s.atoms.iter().map(|a| a.unique_name.as_str()).collect();
        assert_eq!(names, vec!["CA", "CA_2", "CA_2_2", "CA_3"]);

        for rule in [NameRule::RawWhenUnique, NameRule::UniqueWhenRepeated] {
            let written: HashSet<_> = s.atoms.iter().map(|a| s.output_name(a, rule)).collect();
            assert_eq!(written.len(), s.atom_count());
        }
    }

    #[test]
    fn generated_suffix_skips_names_taken_by_earlier_raw_names() {
        let mut s = Structure::new();
        s.push_atom(atom("CA_2", "C", None));
        s.push_atom(atom("CA", "C", None));
        s.push_atom(atom("CA", "C", None));

        let names: Vec<_> = s.atoms.iter().map(|a| a.unique_name.as_str()).collect();
        assert_eq!(names, vec!["CA_2", "CA", "CA_3"]);
    }

    #[test]
    fn residue_names_are_distinct_in_order() {
        let mut s = Structure::new();
        let mut a = atom("N", "N", None);
        a.residue = "GLY".into();
        s.push_atom(a);
        s.push_atom(atom("CA", "C", None));
        s.push_atom(atom("CB", "C", None));

        assert_eq!(s.residue_names(), vec!["GLY", "ALA"]);
    }
}
