use std::io::{self, Write};

use anyhow::Error;
use playmol_tools::io::Format;
use playmol_tools::{IoError, ScriptError};

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
    }

    let hints = HintCollector::collect(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

#[derive(Default)]
struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn collect(err: &Error) -> Vec<String> {
        let mut collector = Self::default();

        collector.collect_io_hints(err);
        collector.collect_script_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        collector.hints
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn collect_io_hints(&mut self, err: &Error) {
        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };
        self.has_typed_hints = true;

        match io_err {
            IoError::Io { source } => self.collect_std_io_hints(source),

            IoError::Parse { format, line, .. } => {
                self.add(format!("Inspect line {} of the {} input", line, format));
                self.add_format_specific_parse_hints(*format);
            }

            IoError::UnsupportedImproperPhase { line, phase } => {
                self.add(format!(
                    "The improper at line {} has phase {}; Playmol's cvff impropers only express 0 or 180 degrees",
                    line, phase
                ));
                self.add("Edit or remove that improper before converting");
            }

            IoError::MissingTemplate { residue, atom } => {
                self.add(format!(
                    "Add atom '{}' to residue {} in the prep file, or rename it in the PDB",
                    atom, residue
                ));
                self.add("Omit --prep to keep the element types from the PDB records");
            }

            IoError::UnsupportedReadFormat(fmt) | IoError::UnsupportedWriteFormat(fmt) => {
                self.add(format!("The '{}' format cannot be converted here", fmt));
                self.add("Use the amber, pdb or pqr subcommand matching the input");
            }

            IoError::Conversion(msg) => {
                if msg.contains("bond") {
                    self.add("A CONECT record refers to an atom serial that has no ATOM/HETATM record");
                    self.add("Check that atom serials are numbered 1..N without gaps");
                } else {
                    self.add("The decoded structure is inconsistent");
                }
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("Check the path spelling and ensure the file exists");
            }
            ErrorKind::PermissionDenied => {
                self.add("Check file permissions with `ls -la`");
            }
            ErrorKind::InvalidData => {
                self.add("The input is not valid UTF-8 text");
                self.add("Verify the file is not truncated or binary");
            }
            ErrorKind::BrokenPipe => {
                self.add("Output consumer terminated early (e.g. piping to `head`)");
            }
            _ => {
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn add_format_specific_parse_hints(&mut self, format: Format) {
        match format {
            Format::Amber => {
                self.add("AMBER: bonded blocks are column-based; type fields are hyphen-joined and two characters wide");
                self.add("AMBER: each block must be closed by exactly one blank line");
            }
            Format::Pdb => {
                self.add("PDB: ATOM/HETATM records need serial, name, residue, sequence number and x y z");
                self.add("PDB: CONECT serials must be positive integers");
            }
            Format::Pqr => {
                self.add("PQR: records need x y z, then charge, radius and the type token last");
            }
        }
    }

    fn collect_script_hints(&mut self, err: &Error) {
        let Some(script_err) = err.downcast_ref::<ScriptError>() else {
            return;
        };
        self.has_typed_hints = true;

        match script_err {
            ScriptError::StyleParse(_) => {
                self.add("The styles file has invalid TOML syntax");
                self.add("Expected sections: [styles] (pair, bond, angle, dihedral, improper) and [amber]");
            }
            ScriptError::InvalidOption { key, .. } => {
                self.add(format!("Fix the value of '{}' in the styles file", key));
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("stdin") || msg.contains("terminal") {
            self.add("Provide input via -i/--input or pipe data to stdin");
        } else if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
        } else if msg.contains("permission denied") {
            self.add("Check file permissions with `ls -la`");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    err.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
}
