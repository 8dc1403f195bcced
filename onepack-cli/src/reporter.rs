//! Colored console reporter

use std::cell::RefCell;

use console::style;
use indicatif::ProgressBar;
use onepack::pack::{PackPhase, PackProgress};
use onepack::reporter::{Reporter, Severity};

use crate::progress::{simple_bar, step_line};

/// Prints reports in color and draws step lines plus a bar while packing
#[derive(Default)]
pub struct ConsoleReporter {
    phase: RefCell<Option<PackPhase>>,
    bar: RefCell<Option<ProgressBar>>,
}

impl ConsoleReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn print(&self, line: &str) {
        match self.bar.borrow().as_ref() {
            Some(pb) => pb.println(line),
            None => println!("{line}"),
        }
    }

    fn finish_bar(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

/// One report line, colored by severity
#[must_use]
pub fn format_report(severity: Severity, message: &str) -> String {
    match severity {
        Severity::Info => style(message).blue().to_string(),
        Severity::Success => style(message).green().to_string(),
        Severity::Warning => style(format!("Warning: {message}")).yellow().to_string(),
        Severity::Error => style(message).red().to_string(),
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, severity: Severity, message: &str) {
        self.print(&format_report(severity, message));
    }

    fn progress(&self, progress: &PackProgress) {
        let entered = self.phase.borrow().as_ref() != Some(&progress.phase);
        if entered {
            self.finish_bar();
            *self.phase.borrow_mut() = Some(progress.phase);
            if let Some(line) = step_line(progress.phase) {
                println!("{line}");
            }
            if progress.phase == PackPhase::Packing {
                *self.bar.borrow_mut() = Some(simple_bar(progress.total as u64, ""));
            }
        }

        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.set_position(progress.current as u64);
            if let Some(file) = &progress.current_file {
                pb.set_message(file.clone());
            }
        }
    }
}

impl Drop for ConsoleReporter {
    fn drop(&mut self) {
        self.finish_bar();
    }
}
