//! Column layouts of the AMBER parameter blocks and the per-line decoders built on them.
//!
//! Bonded blocks cannot be split on whitespace: atom types are padded to two characters and
//! joined by hyphens (`C -O `, `X -CT-CT-X `), and numeric fields may abut the type field.
//! Each block is therefore described by a [`BlockLayout`] of fixed column spans. Everything
//! here is a pure function of one line, independent of the block state machine.

use crate::io::util::{Span, round_to};
use crate::model::forcefield::{
    AtomType, BondedKind, BondedType, Coefficient, NonbondedParams, WILDCARD,
};
use thiserror::Error;

/// Converts the AMBER `R*` (half the Lennard-Jones minimum distance) into the Lennard-Jones
/// diameter sigma: `2 / 2^(1/6)`.
pub const RADIUS_TO_DIAMETER: f64 = 1.78179743628;

/// Improper phases within this many degrees of 0 or 180 are accepted.
pub const PHASE_TOLERANCE: f64 = 0.01;

const FILE_WILDCARD: &str = "X";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineError {
    #[error("expected {expected} numeric fields in columns {span}, found {found}")]
    MissingValues {
        span: Span,
        expected: usize,
        found: usize,
    },

    #[error("expected {expected} atom types in columns {span}, found {found}")]
    TypeCount {
        span: Span,
        expected: usize,
        found: usize,
    },

    #[error("columns {span} cut through a non-ASCII character")]
    SplitCharacter { span: Span },

    #[error("invalid {field} '{token}'")]
    InvalidNumber { field: &'static str, token: String },

    #[error("expected at least {expected} fields, found {found}")]
    MissingTokens { expected: usize, found: usize },

    #[error("dihedral continuation line without a preceding dihedral")]
    OrphanContinuation,

    #[error("improper phase {0} is neither 0 nor 180 degrees")]
    UnsupportedPhase(f64),
}

/// Fixed-column description of a bonded-parameter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    pub kind: BondedKind,
    /// Prefix of an optional header line that carries no data.
    pub header: &'static str,
    pub types: Span,
    pub values: Span,
    pub value_names: &'static [&'static str],
    /// Map the file wildcard `X` to [`WILDCARD`].
    pub wildcards: bool,
}

pub const BOND_LAYOUT: BlockLayout = BlockLayout {
    kind: BondedKind::Bond,
    header: "BOND",
    types: Span::new(0, 5),
    values: Span::new(5, 22),
    value_names: &["force constant", "equilibrium length"],
    wildcards: false,
};

pub const ANGLE_LAYOUT: BlockLayout = BlockLayout {
    kind: BondedKind::Angle,
    header: "ANGLE",
    types: Span::new(0, 8),
    values: Span::new(8, 28),
    value_names: &["force constant", "equilibrium angle"],
    wildcards: false,
};

pub const DIHEDRAL_LAYOUT: BlockLayout = BlockLayout {
    kind: BondedKind::Dihedral,
    header: "DIHE",
    types: Span::new(0, 11),
    values: Span::new(11, 54),
    value_names: &["divisor", "force constant", "phase", "periodicity"],
    wildcards: true,
};

pub const IMPROPER_LAYOUT: BlockLayout = BlockLayout {
    kind: BondedKind::Improper,
    header: "IMPROPER",
    types: Span::new(0, 11),
    values: Span::new(11, 54),
    value_names: &["force constant", "phase", "periodicity"],
    wildcards: true,
};

impl BlockLayout {
    pub fn is_header(&self, line: &str) -> bool {
        line.starts_with(self.header)
    }

    /// Atom types of the type field; empty for a blank field.
    pub fn types_of(&self, line: &str) -> Result<Vec<String>, LineError> {
        Ok(split_types(column(self.types, line)?, self.wildcards))
    }

    /// Numeric fields of the value span, in file order.
    pub fn values_of(&self, line: &str) -> Result<Vec<f64>, LineError> {
        let tokens: Vec<&str> = column(self.values, line)?.split_whitespace().collect();
        let expected = self.value_names.len();
        if tokens.len() < expected {
            return Err(LineError::MissingValues {
                span: self.values,
                expected,
                found: tokens.len(),
            });
        }

        tokens
            .iter()
            .zip(self.value_names)
            .map(|(token, field)| parse_number(token, field))
            .collect()
    }

    fn checked_types(&self, types: Vec<String>) -> Result<Vec<String>, LineError> {
        let expected = self.kind.arity();
        if types.len() != expected {
            return Err(LineError::TypeCount {
                span: self.types,
                expected,
                found: types.len(),
            });
        }
        Ok(types)
    }
}

fn column(span: Span, line: &str) -> Result<&str, LineError> {
    span.slice(line).ok_or(LineError::SplitCharacter { span })
}

fn split_types(field: &str, wildcards: bool) -> Vec<String> {
    field
        .replace('-', " ")
        .split_whitespace()
        .map(|t| {
            if wildcards && t == FILE_WILDCARD {
                WILDCARD.to_string()
            } else {
                t.to_string()
            }
        })
        .collect()
}

fn parse_number(token: &str, field: &'static str) -> Result<f64, LineError> {
    token.parse::<f64>().map_err(|_| LineError::InvalidNumber {
        field,
        token: token.to_string(),
    })
}

/// Nearest integer of a periodicity or phase field.
fn rounded(value: f64) -> i64 {
    value.round() as i64
}

/// Decodes a line of the mass block; `None` for the optional `MASS` header.
///
/// Layout: `type mass [polarizability] note...`.
pub fn mass_line(line: &str) -> Result<Option<AtomType>, LineError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.first() {
        None => return Ok(None),
        Some(&"MASS") => return Ok(None),
        Some(_) => {}
    }
    if words.len() < 2 {
        return Err(LineError::MissingTokens {
            expected: 2,
            found: words.len(),
        });
    }

    let mut atom_type = AtomType::new(words[0], parse_number(words[1], "mass")?);
    let note_start = match words.get(2).map(|w| w.parse::<f64>()) {
        Some(Ok(polarizability)) => {
            atom_type.polarizability = Some(polarizability);
            3
        }
        Some(Err(_)) => 2,
        None => words.len(),
    };
    atom_type.note = words[note_start.min(words.len())..].join(" ");

    Ok(Some(atom_type))
}

/// Decodes a bond or angle line: types plus force constant and equilibrium value.
pub fn harmonic_line(line: &str, layout: &BlockLayout) -> Result<BondedType, LineError> {
    let types = layout.checked_types(layout.types_of(line)?)?;
    let values = layout.values_of(line)?;
    Ok(BondedType::new(
        layout.kind,
        types,
        vec![Coefficient::Real(values[0]), Coefficient::Real(values[1])],
    ))
}

/// Decodes a proper dihedral line.
///
/// A blank type field continues the multi-term series of `previous`. The force constant is
/// written as the deferred ratio `force/divisor`, followed by `|periodicity|`, the phase, and
/// a zero weight.
pub fn dihedral_line(line: &str, previous: Option<&[String]>) -> Result<BondedType, LineError> {
    let layout = &DIHEDRAL_LAYOUT;
    let mut types = layout.types_of(line)?;
    if types.is_empty() {
        types = previous.ok_or(LineError::OrphanContinuation)?.to_vec();
    }
    let types = layout.checked_types(types)?;

    let values = layout.values_of(line)?;
    let (divisor, force, phase, periodicity) = (values[0], values[1], values[2], values[3]);

    Ok(BondedType::new(
        BondedKind::Dihedral,
        types,
        vec![
            Coefficient::Ratio {
                numerator: force,
                divisor,
            },
            Coefficient::Integer(rounded(periodicity).abs()),
            Coefficient::Integer(rounded(phase)),
            Coefficient::Integer(0),
        ],
    ))
}

/// Decodes an improper dihedral line.
///
/// The file lists the central atom third; Playmol expects it first, so the key is reordered
/// to (3rd, 1st, 2nd, 4th).
pub fn improper_line(line: &str) -> Result<BondedType, LineError> {
    let layout = &IMPROPER_LAYOUT;
    let types = layout.checked_types(layout.types_of(line)?)?;
    let types = vec![
        types[2].clone(),
        types[0].clone(),
        types[1].clone(),
        types[3].clone(),
    ];

    let values = layout.values_of(line)?;
    let (force, phase, periodicity) = (values[0], values[1], values[2]);
    let sign = improper_sign(phase)?;

    Ok(BondedType::new(
        BondedKind::Improper,
        types,
        vec![
            Coefficient::Real(force),
            Coefficient::Integer(sign),
            Coefficient::Integer(rounded(periodicity).abs()),
        ],
    ))
}

/// `+1` for a phase of 0°, `-1` for 180°; anything else cannot be expressed.
pub fn improper_sign(phase: f64) -> Result<i64, LineError> {
    if phase.abs() < PHASE_TOLERANCE {
        Ok(1)
    } else if (phase - 180.0).abs() < PHASE_TOLERANCE {
        Ok(-1)
    } else {
        Err(LineError::UnsupportedPhase(phase))
    }
}

/// Decodes a line of the nonbonded block: `type radius epsilon ...`.
pub fn params_line(line: &str) -> Result<(String, NonbondedParams), LineError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < 3 {
        return Err(LineError::MissingTokens {
            expected: 3,
            found: words.len(),
        });
    }

    let radius = parse_number(words[1], "radius")?;
    let epsilon = parse_number(words[2], "well depth")?;

    Ok((
        words[0].to_string(),
        NonbondedParams {
            epsilon,
            diameter: amber_diameter(radius),
        },
    ))
}

pub fn amber_diameter(radius: f64) -> f64 {
    round_to(RADIUS_TO_DIAMETER * radius, 5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn mass_line_skips_polarizability() {
        let t = mass_line("CT 12.01         0.878               sp3 aliphatic C")
            .unwrap()
            .unwrap();
        assert_eq!(t.name, "CT");
        assert_eq!(t.mass, 12.01);
        assert_eq!(t.polarizability, Some(0.878));
        assert_eq!(t.note, "sp3 aliphatic C");
    }

    #[test]
    fn mass_line_without_polarizability_keeps_whole_note() {
        let t = mass_line("EP 0.0 lone pair").unwrap().unwrap();
        assert_eq!(t.polarizability, None);
        assert_eq!(t.note, "lone pair");

        let bare = mass_line("IM 35.45").unwrap().unwrap();
        assert_eq!(bare.note, "");
    }

    #[test]
    fn mass_header_and_bad_mass() {
        assert!(mass_line("MASS").unwrap().is_none());
        assert!(matches!(
            mass_line("CT twelve"),
            Err(LineError::InvalidNumber { field: "mass", .. })
        ));
        assert!(matches!(
            mass_line("CT"),
            Err(LineError::MissingTokens { .. })
        ));
    }

    #[test]
    fn bond_line_uses_fixed_columns() {
        let b = harmonic_line("C -O   570.0    1.229       JCC,7,(1986),230", &BOND_LAYOUT).unwrap();
        assert_eq!(b.types, strings(&["C", "O"]));
        assert_eq!(
            b.coefficients,
            vec![Coefficient::Real(570.0), Coefficient::Real(1.229)]
        );
        assert!(b.defined);
    }

    #[test]
    fn bond_values_abutting_the_type_field_still_split() {
        let b = harmonic_line("CT-HC340.0    1.090", &BOND_LAYOUT).unwrap();
        assert_eq!(b.types, strings(&["CT", "HC"]));
        assert_eq!(b.coefficients[0], Coefficient::Real(340.0));
    }

    #[test]
    fn angle_line_has_three_types() {
        let a = harmonic_line("HC-CT-HC    35.0      109.50    changed", &ANGLE_LAYOUT).unwrap();
        assert_eq!(a.kind, BondedKind::Angle);
        assert_eq!(a.types, strings(&["HC", "CT", "HC"]));
        assert_eq!(
            a.coefficients,
            vec![Coefficient::Real(35.0), Coefficient::Real(109.5)]
        );
    }

    #[test]
    fn bond_line_with_missing_value_fails() {
        assert!(matches!(
            harmonic_line("CT-HC  340.0", &BOND_LAYOUT),
            Err(LineError::MissingValues {
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn non_ascii_type_field_is_reported_as_such() {
        let err = harmonic_line("CT-Hé 340.0    1.090", &BOND_LAYOUT).unwrap_err();
        assert_eq!(
            err,
            LineError::SplitCharacter {
                span: BOND_LAYOUT.types
            }
        );
        assert!(err.to_string().contains("columns 1-5"));
    }

    #[test]
    fn dihedral_maps_wildcards_and_builds_ratio() {
        let d = dihedral_line("X -C -CT-X    4    14.50        180.0             2.", None).unwrap();
        assert_eq!(d.types, strings(&["*", "C", "CT", "*"]));
        assert_eq!(
            d.coefficients,
            vec![
                Coefficient::Ratio {
                    numerator: 14.5,
                    divisor: 4.0
                },
                Coefficient::Integer(2),
                Coefficient::Integer(180),
                Coefficient::Integer(0),
            ]
        );
    }

    #[test]
    fn dihedral_periodicity_is_absolute() {
        let d = dihedral_line("CT-CT-OS-CT   1    0.383         0.0            -3.", None).unwrap();
        assert_eq!(d.coefficients[1], Coefficient::Integer(3));
        assert_eq!(d.coefficients[2], Coefficient::Integer(0));
    }

    #[test]
    fn blank_dihedral_types_continue_previous_series() {
        let previous = strings(&["CT", "CT", "OS", "CT"]);
        let d = dihedral_line(
            "              1    0.1           180.0             2.",
            Some(previous.as_slice()),
        )
        .unwrap();
        assert_eq!(d.types, previous);

        assert_eq!(
            dihedral_line("              1    0.1           180.0             2.", None),
            Err(LineError::OrphanContinuation)
        );
    }

    #[test]
    fn improper_reorders_central_atom_first() {
        let i = improper_line("X -X -C -O          10.5         180.          2.").unwrap();
        assert_eq!(i.types, strings(&["C", "*", "*", "O"]));
        assert_eq!(
            i.coefficients,
            vec![
                Coefficient::Real(10.5),
                Coefficient::Integer(-1),
                Coefficient::Integer(2)
            ]
        );
    }

    #[test]
    fn improper_sign_accepts_only_zero_and_half_turn() {
        assert_eq!(improper_sign(0.0), Ok(1));
        assert_eq!(improper_sign(0.009), Ok(1));
        assert_eq!(improper_sign(180.0), Ok(-1));
        assert_eq!(improper_sign(179.995), Ok(-1));
        assert_eq!(improper_sign(90.0), Err(LineError::UnsupportedPhase(90.0)));
        assert_eq!(improper_sign(0.02), Err(LineError::UnsupportedPhase(0.02)));
    }

    #[test]
    fn improper_with_unsupported_phase_is_rejected() {
        assert!(matches!(
            improper_line("X -X -C -O          10.5          90.          2."),
            Err(LineError::UnsupportedPhase(p)) if p == 90.0
        ));
    }

    #[test]
    fn params_line_converts_radius_to_diameter() {
        let (name, params) = params_line("  CT          1.9080  0.1094             Spellmeyer").unwrap();
        assert_eq!(name, "CT");
        assert_eq!(params.epsilon, 0.1094);
        assert_eq!(params.diameter, round_to(RADIUS_TO_DIAMETER * 1.908, 5));
        assert_eq!(params.diameter, 3.39967);
    }

    #[test]
    fn params_line_requires_three_fields() {
        assert!(matches!(
            params_line("CT 1.908"),
            Err(LineError::MissingTokens {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn headers_are_recognized_by_prefix() {
        assert!(BOND_LAYOUT.is_header("BOND"));
        assert!(DIHEDRAL_LAYOUT.is_header("DIHE"));
        assert!(IMPROPER_LAYOUT.is_header("IMPROPER"));
        assert!(!ANGLE_LAYOUT.is_header("CT-CT-CT"));
    }
}
