use std::io::{self, Write};

use playmol_tools::{BondedKind, ForceField, PrepLibrary, Structure};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

pub fn print_forcefield_summary(forcefield: &ForceField) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let with_params = forcefield
        .atom_types
        .iter()
        .filter(|t| t.nonbonded.is_some())
        .count();

    let mut rows = vec![
        ("Title", forcefield.title.clone()),
        (
            "Atom Types",
            format!("{} ({} with LJ)", forcefield.atom_types.len(), with_params),
        ),
    ];
    for (kind, label) in [
        (BondedKind::Bond, "Bond Types"),
        (BondedKind::Angle, "Angle Types"),
        (BondedKind::Dihedral, "Dihedral Types"),
        (BondedKind::Improper, "Improper Types"),
    ] {
        let records = forcefield.bonded(kind);
        let undefined = records.iter().filter(|r| !r.defined).count();
        rows.push((label, count_with_undefined(records.len(), undefined)));
    }
    if !forcefield.equivalences.is_empty() {
        rows.push(("Equivalences", format!("{}", forcefield.equivalences.len())));
    }

    print_kv_table(&mut out, "Force Field Summary", &rows);
}

pub fn print_structure_summary(structure: &Structure, templates: Option<&PrepLibrary>) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let residues = structure.residue_names();
    let renamed = structure
        .atoms
        .iter()
        .filter(|a| a.unique_name != a.name)
        .count();

    let mut rows = vec![
        ("Total Atoms", format!("{}", structure.atom_count())),
        ("Total Bonds", format!("{}", structure.bond_count())),
        ("Residues", residues.join(" ")),
        ("Renamed Atoms", format!("{}", renamed)),
    ];
    if !structure.diameters.is_empty() {
        rows.push(("Packing Types", format!("{}", structure.diameters.len())));
    }
    if let Some(library) = templates {
        rows.push(("Prep Residues", format!("{}", library.residue_count())));
    }

    print_kv_table(&mut out, "Structure Summary", &rows);
}

fn count_with_undefined(total: usize, undefined: usize) -> String {
    if undefined == 0 {
        format!("{}", total)
    } else {
        format!("{} ({} commented)", total, undefined)
    }
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);
    let k_line = "─".repeat(key_w + 2);
    let v_line = "─".repeat(val_w + 2);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{}┌{}┬{}┐", INDENT, k_line, v_line);
    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
            key_w = key_w,
            val_w = val_w
        );
    }
    let _ = writeln!(out, "{}└{}┴{}┘", INDENT, k_line, v_line);
}
