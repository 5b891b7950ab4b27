use std::collections::HashMap;
use std::fmt;

/// Placeholder token matching any atom type in a bonded-type key.
pub const WILDCARD: &str = "*";

/// Lennard-Jones parameters of one atom type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonbondedParams {
    /// Well depth (kcal/mol).
    pub epsilon: f64,
    /// Diameter derived from the AMBER van der Waals radius, rounded to 5 decimals.
    pub diameter: f64,
}

/// One entry of the AMBER mass block.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomType {
    pub name: String,
    pub mass: f64,
    pub polarizability: Option<f64>,
    pub note: String,
    pub nonbonded: Option<NonbondedParams>,
}

impl AtomType {
    pub fn new(name: impl Into<String>, mass: f64) -> Self {
        Self {
            name: name.into(),
            mass,
            polarizability: None,
            note: String::new(),
            nonbonded: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondedKind {
    Bond,
    Angle,
    Dihedral,
    Improper,
}

impl BondedKind {
    /// Number of atom-type tokens in a key of this kind.
    pub fn arity(self) -> usize {
        match self {
            BondedKind::Bond => 2,
            BondedKind::Angle => 3,
            BondedKind::Dihedral | BondedKind::Improper => 4,
        }
    }

    /// Playmol command introducing a type of this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            BondedKind::Bond => "bond_type",
            BondedKind::Angle => "angle_type",
            BondedKind::Dihedral => "dihedral_type",
            BondedKind::Improper => "improper_type",
        }
    }

    /// Name of the `define` variable holding the style of this kind.
    pub fn style_variable(self) -> &'static str {
        match self {
            BondedKind::Bond => "bond_style",
            BondedKind::Angle => "angle_style",
            BondedKind::Dihedral => "dihedral_style",
            BondedKind::Improper => "improper_style",
        }
    }
}

impl fmt::Display for BondedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondedKind::Bond => write!(f, "bond"),
            BondedKind::Angle => write!(f, "angle"),
            BondedKind::Dihedral => write!(f, "dihedral"),
            BondedKind::Improper => write!(f, "improper"),
        }
    }
}

/// A numeric coefficient of a bonded type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coefficient {
    Real(f64),
    Integer(i64),
    /// Deferred division, evaluated by Playmol when the script is read.
    Ratio { numerator: f64, divisor: f64 },
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Coefficient::Real(v) => write!(f, "{}", RealDisplay(v)),
            Coefficient::Integer(v) => write!(f, "{}", v),
            Coefficient::Ratio { numerator, divisor } => {
                write!(f, "{{{}/{}}}", RealDisplay(numerator), RealDisplay(divisor))
            }
        }
    }
}

/// Shortest round-trip rendering of a real, keeping a `.0` on integral values.
#[derive(Debug, Clone, Copy)]
pub struct RealDisplay(pub f64);

impl fmt::Display for RealDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
            write!(f, "{:.1}", v)
        } else {
            write!(f, "{}", v)
        }
    }
}

/// A bond, angle, dihedral or improper type keyed by atom types.
#[derive(Debug, Clone, PartialEq)]
pub struct BondedType {
    pub kind: BondedKind,
    pub types: Vec<String>,
    pub coefficients: Vec<Coefficient>,
    /// `false` when a non-wildcard type of the key was unknown at decode time.
    pub defined: bool,
}

impl BondedType {
    pub fn new(kind: BondedKind, types: Vec<String>, coefficients: Vec<Coefficient>) -> Self {
        Self {
            kind,
            types,
            coefficients,
            defined: true,
        }
    }

    /// The atom-type key joined with single spaces.
    pub fn key(&self) -> String {
        self.types.join(" ")
    }
}

/// Everything decoded from one AMBER parameter file.
#[derive(Debug, Clone, Default)]
pub struct ForceField {
    pub title: String,
    pub hydrophilic: String,
    pub atom_types: Vec<AtomType>,
    pub bonds: Vec<BondedType>,
    pub angles: Vec<BondedType>,
    pub dihedrals: Vec<BondedType>,
    pub impropers: Vec<BondedType>,
    /// Hydrogen-bond (10-12) lines, kept verbatim.
    pub fast: Vec<String>,
    /// Groups of atom types sharing nonbonded parameters; the first type is the reference.
    pub equivalences: Vec<Vec<String>>,
    /// Label of the nonbonded block, e.g. `MOD4      RE`.
    pub type_header: String,
    /// Nonbonded parameters in file order, including types absent from the mass block.
    pub nonbonded: Vec<(String, NonbondedParams)>,
    index: HashMap<String, usize>,
}

impl ForceField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an atom type, replacing the fields of an existing one in place so the first
    /// insertion position is kept.
    pub fn upsert_atom_type(&mut self, atom_type: AtomType) {
        match self.index.get(&atom_type.name) {
            Some(&pos) => self.atom_types[pos] = atom_type,
            None => {
                self.index
                    .insert(atom_type.name.clone(), self.atom_types.len());
                self.atom_types.push(atom_type);
            }
        }
    }

    pub fn atom_type(&self, name: &str) -> Option<&AtomType> {
        self.index.get(name).map(|&pos| &self.atom_types[pos])
    }

    pub fn has_atom_type(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// `true` when every non-wildcard token names a known atom type.
    pub fn is_fully_defined<S: AsRef<str>>(&self, types: &[S]) -> bool {
        types
            .iter()
            .map(|t| t.as_ref())
            .all(|t| t == WILDCARD || self.has_atom_type(t))
    }

    pub fn bonded(&self, kind: BondedKind) -> &[BondedType] {
        match kind {
            BondedKind::Bond => &self.bonds,
            BondedKind::Angle => &self.angles,
            BondedKind::Dihedral => &self.dihedrals,
            BondedKind::Improper => &self.impropers,
        }
    }

    pub(crate) fn bonded_mut(&mut self, kind: BondedKind) -> &mut Vec<BondedType> {
        match kind {
            BondedKind::Bond => &mut self.bonds,
            BondedKind::Angle => &mut self.angles,
            BondedKind::Dihedral => &mut self.dihedrals,
            BondedKind::Improper => &mut self.impropers,
        }
    }

    /// Stores nonbonded parameters for a type, later entries overriding earlier ones.
    pub fn set_nonbonded(&mut self, name: &str, params: NonbondedParams) {
        match self.nonbonded.iter_mut().find(|(type_name, _)| type_name == name) {
            Some((_, existing)) => *existing = params,
            None => self.nonbonded.push((name.to_string(), params)),
        }
    }

    /// Copies the nonbonded mapping onto the atom types.
    ///
    /// With `expand_equivalences`, a type listed in an equivalence group that has no
    /// parameters of its own receives those of the group's first type.
    pub fn attach_nonbonded(&mut self, expand_equivalences: bool) {
        let mut lookup: HashMap<String, NonbondedParams> = self.nonbonded.iter().cloned().collect();

        if expand_equivalences {
            for group in &self.equivalences {
                let Some((reference, others)) = group.split_first() else {
                    continue;
                };
                let Some(params) = lookup.get(reference).copied() else {
                    continue;
                };
                for other in others {
                    lookup.entry(other.clone()).or_insert(params);
                }
            }
        }

        for atom_type in &mut self.atom_types {
            atom_type.nonbonded = lookup.get(&atom_type.name).copied();
        }
    }

    pub fn bonded_count(&self) -> usize {
        self.bonds.len() + self.angles.len() + self.dihedrals.len() + self.impropers.len()
    }

    pub fn undefined_count(&self) -> usize {
        [&self.bonds, &self.angles, &self.dihedrals, &self.impropers]
            .iter()
            .flat_map(|records| records.iter())
            .filter(|record| !record.defined)
            .count()
    }
}
