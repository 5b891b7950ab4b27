use super::{Format, error::Error};
use std::fmt;
use std::io::BufRead;

/// A half-open, 0-based column range of a fixed-format line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Slices `line`, clamping both ends to its length.
    ///
    /// Returns `None` when a boundary falls inside a multi-byte character.
    pub fn slice<'a>(&self, line: &'a str) -> Option<&'a str> {
        let len = line.len();
        let start = self.start.min(len);
        let end = self.end.min(len).max(start);
        line.get(start..end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start + 1, self.end)
    }
}

/// Iterates lines with their 1-based numbers, converting read failures into [`Error::Io`].
pub fn numbered_lines<R: BufRead>(reader: R) -> impl Iterator<Item = Result<(usize, String), Error>> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|v| (i + 1, v)).map_err(|e| Error::Io { source: e }))
}

pub fn parse_real(format: Format, line: usize, token: &str, what: &str) -> Result<f64, Error> {
    token
        .parse::<f64>()
        .map_err(|_| Error::parse(format, line, format!("invalid {} '{}'", what, token)))
}

pub fn is_integer(token: &str) -> bool {
    token.parse::<i64>().is_ok()
}

/// Rounds half away from zero to `digits` decimals.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}
