use super::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error(
        "unsupported improper dihedral phase {phase} at line {line}: only 0 and 180 degrees can be converted"
    )]
    UnsupportedImproperPhase { line: usize, phase: f64 },

    #[error("residue {residue} has no atom '{atom}' in the prep file")]
    MissingTemplate { residue: String, atom: String },

    #[error("the '{0}' format is not supported for this read operation")]
    UnsupportedReadFormat(Format),

    #[error("the '{0}' format is not supported for this write operation")]
    UnsupportedWriteFormat(Format),

    #[error("failed to convert data model: {0}")]
    Conversion(String),
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub fn missing_template(residue: impl Into<String>, atom: impl Into<String>) -> Self {
        Self::MissingTemplate {
            residue: residue.into(),
            atom: atom.into(),
        }
    }
}
