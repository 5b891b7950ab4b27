use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// How step progress is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Spinner and check marks on stderr.
    Spinner,
    /// `info` log records only.
    Log,
}

struct ActiveStep {
    label: String,
    started: Instant,
    spinner: Option<ProgressBar>,
}

/// Numbered pipeline steps, shown as a spinner on a terminal and logged otherwise.
pub struct Progress {
    mode: Mode,
    total: u8,
    index: u8,
    active: Option<ActiveStep>,
    started: Instant,
}

impl Progress {
    pub fn new(interactive: bool, total: u8) -> Self {
        Self {
            mode: if interactive { Mode::Spinner } else { Mode::Log },
            total,
            index: 0,
            active: None,
            started: Instant::now(),
        }
    }

    /// Starts the next step; an unfinished previous step is dropped silently.
    pub fn step(&mut self, label: &str) {
        self.dismiss();
        self.index += 1;
        let counter = format!("[{}/{}]", self.index, self.total);

        let spinner = match self.mode {
            Mode::Spinner => Some(spinner(&format!("{} {}...", counter, label))),
            Mode::Log => {
                log::info!("{} {}", counter, label);
                None
            }
        };
        self.active = Some(ActiveStep {
            label: label.to_string(),
            started: Instant::now(),
            spinner,
        });
    }

    /// Closes the current step with optional detail lines.
    pub fn complete(&mut self, details: &[String]) {
        let Some(step) = self.active.take() else {
            return;
        };
        if let Some(bar) = &step.spinner {
            bar.finish_and_clear();
        }

        match self.mode {
            Mode::Spinner => {
                let mut stderr = io::stderr().lock();
                let _ = writeln!(
                    stderr,
                    "  \x1b[32m✓\x1b[0m {:<44} {:>5.2}s",
                    step.label,
                    step.started.elapsed().as_secs_f64()
                );
                for detail in details {
                    let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {}", detail);
                }
            }
            Mode::Log => {
                for detail in details {
                    log::info!("  {}", detail);
                }
            }
        }
    }

    pub fn finish(mut self) {
        self.dismiss();
        let total = format!("Total: {:.2}s", self.started.elapsed().as_secs_f64());

        match self.mode {
            Mode::Spinner => {
                let mut stderr = io::stderr().lock();
                let _ = writeln!(stderr);
                let _ = writeln!(stderr, "  \x1b[32m✓\x1b[0m Script written {:>35}", total);
                let _ = writeln!(stderr);
            }
            Mode::Log => log::debug!("script written ({})", total),
        }
    }

    fn dismiss(&mut self) {
        if let Some(bar) = self.active.take().and_then(|step| step.spinner) {
            bar.finish_and_clear();
        }
    }
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    bar.enable_steady_tick(Duration::from_millis(80));
    bar.set_message(message.to_string());
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_steps_count_up_and_close() {
        let mut progress = Progress::new(false, 2);
        progress.step("Reading");
        assert_eq!(progress.index, 1);
        progress.complete(&["3 atoms".to_string()]);
        assert!(progress.active.is_none());

        progress.step("Writing");
        progress.step("Writing again");
        assert_eq!(progress.index, 3);
        assert_eq!(progress.active.as_ref().map(|s| s.label.as_str()), Some("Writing again"));
        progress.finish();
    }

    #[test]
    fn completing_without_a_step_is_a_no_op() {
        let mut progress = Progress::new(false, 1);
        progress.complete(&[]);
        assert_eq!(progress.index, 0);
    }
}
