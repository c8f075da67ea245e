pub mod json;
pub mod progress;
pub mod terminal;

use crate::scanner::ScanReport;

pub trait Reporter {
    fn report(&self, report: &ScanReport) -> String;
}
