use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

/// Returns `true` if stdin is a terminal (interactive).
pub fn stdin_is_tty() -> bool {
    io::stdin().is_terminal()
}

/// The main input file, or locked stdin when no path is given.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) => Ok(Box::new(open_file(p, "input")?)),
        None => Ok(Box::new(io::stdin().lock())),
    }
}

pub fn open_prep(path: &Path) -> Result<BufReader<File>> {
    open_file(path, "prep")
}

fn open_file(path: &Path, role: &str) -> Result<BufReader<File>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", role, path.display()))?;
    Ok(BufReader::new(file))
}

/// Writes a fully rendered script to `path`, or to stdout.
///
/// Callers render the whole script first, so a failed conversion never creates the file.
pub fn write_script(path: Option<&Path>, script: &[u8]) -> Result<()> {
    match path {
        Some(p) => fs::write(p, script)
            .with_context(|| format!("Failed to write Playmol script: {}", p.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(script)
                .and_then(|()| stdout.flush())
                .context("Failed to write Playmol script to stdout")
        }
    }
}
