use crate::catalog::GIT_PATHS;
use crate::probe::ProbeOutcome;
use crate::reporter::Reporter;
use crate::scanner::ScanReport;
use colored::Colorize;

const DIVIDER_WIDTH: usize = 40;

/// Human-readable console report, one block per catalog path in catalog
/// order.
pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn status_label(&self, outcome: &ProbeOutcome) -> colored::ColoredString {
        match outcome {
            ProbeOutcome::Exposed { .. } => outcome.status().red().bold(),
            ProbeOutcome::NotExposed { .. } => outcome.status().green(),
            ProbeOutcome::Failed { .. } => outcome.status().yellow(),
        }
    }

    fn format_outcome(&self, path: &str, outcome: &ProbeOutcome) -> String {
        let mut block = String::new();
        block.push_str(&format!("Path: {}\n", path.bold()));
        block.push_str(&format!("Status: {}\n", self.status_label(outcome)));

        match outcome {
            ProbeOutcome::Exposed { annotations, .. } => {
                for (key, value) in annotations {
                    block.push_str(&format!("{}: {}\n", capitalize(key), value));
                }
            }
            ProbeOutcome::NotExposed { status_code } => {
                if self.verbose {
                    block.push_str(&format!("Status code: {}\n", status_code));
                }
            }
            ProbeOutcome::Failed { error } => {
                block.push_str(&format!("Error: {}\n", error));
            }
        }

        block.push_str(&format!("{}\n", "-".repeat(DIVIDER_WIDTH)));
        block
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, report: &ScanReport) -> String {
        let mut output = String::new();

        for path in GIT_PATHS {
            let Some(outcome) = report.results.get(path) else {
                continue;
            };
            output.push_str(&self.format_outcome(path, outcome));
        }

        let exposed = report.exposed_count();
        if exposed > 0 {
            output.push_str(&format!(
                "{}\n",
                format!("{} of {} paths exposed", exposed, report.results.len())
                    .red()
                    .bold()
            ));
        } else {
            output.push_str(&format!(
                "{}\n",
                "No exposed Git metadata found".green()
            ));
        }

        output
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
