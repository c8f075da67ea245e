use crate::error::Result;
use crate::reporter::Reporter;
use crate::scanner::ScanReport;

/// Renders the result mapping as an indented JSON document keyed by
/// catalog path.
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    /// Serialization that surfaces failures to the caller, used when
    /// persisting the report to a file.
    pub fn try_report(&self, report: &ScanReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(&report.results)?)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn report(&self, report: &ScanReport) -> String {
        self.try_report(report)
            .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize report: {}"}}"#, e))
    }
}
