//! Comma-delimited summary report.
//!
//! # Responsibility
//! - Render one header line plus one row per town, in table order.
//! - Apply the shared fixed-point formatting policy at this boundary only.
//!
//! # Invariants
//! - Fields are joined by a single comma with no quoting or escaping; a
//!   town name containing the delimiter corrupts the row. Known format
//!   limitation, kept for compatibility with the existing consumers.

use crate::model::annotation::Annotation;
use crate::reference::ReferenceTable;
use crate::stats::aggregate::{summarize_all, PrevalenceRates};
use std::error::Error;
use std::fmt::{Display, Formatter, Write as _};
use std::path::PathBuf;

/// Fixed file name used when the rendered report is written out.
pub const REPORT_FILE_NAME: &str = "casemap_report.csv";

const REPORT_HEADER: &str = "town,observed,child_population,expected_cases,expected_range";

/// Report transport error.
#[derive(Debug)]
pub enum ReportError {
    Io(std::io::Error),
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to write report: {err}"),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Renders the full report blob.
///
/// Row order follows reference table order; every town gets a row even
/// with zero observed annotations.
pub fn render_report(
    table: &ReferenceTable,
    annotations: &[Annotation],
    rates: PrevalenceRates,
) -> String {
    let summaries = summarize_all(table, annotations, rates);

    let mut out = String::new();
    out.push_str(REPORT_HEADER);
    out.push('\n');

    for (town, summary) in table.towns().iter().zip(&summaries) {
        let _ = writeln!(
            out,
            "{},{},{},{},{}-{}",
            town.name,
            summary.observed_count,
            town.child_population,
            format_expected_report(summary.expected_center),
            format_expected_report(summary.expected_low),
            format_expected_report(summary.expected_high),
        );
    }

    out
}

/// Two-decimal fixed point used by report rows.
pub fn format_expected_report(value: f64) -> String {
    format!("{value:.2}")
}

/// One-decimal fixed point used by interactive display.
pub fn format_expected_display(value: f64) -> String {
    format!("{value:.1}")
}

/// Capability that carries a rendered report blob to its destination.
///
/// The exporter's contract ends at the in-memory blob; transport is an
/// injected collaborator so tests can capture output without touching disk.
pub trait ReportSink {
    fn write_report(&self, file_name: &str, contents: &str) -> Result<(), ReportError>;
}

/// Sink writing reports into a target directory on the local filesystem.
pub struct FsReportSink {
    dir: PathBuf,
}

impl FsReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path a given report file name lands at.
    pub fn target_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl ReportSink for FsReportSink {
    fn write_report(&self, file_name: &str, contents: &str) -> Result<(), ReportError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.target_path(file_name), contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{format_expected_display, format_expected_report};

    #[test]
    fn report_formatting_is_two_decimal_fixed_point() {
        assert_eq!(format_expected_report(180.0), "180.00");
        assert_eq!(format_expected_report(67.5), "67.50");
    }

    #[test]
    fn display_formatting_is_one_decimal_fixed_point() {
        assert_eq!(format_expected_display(180.0), "180.0");
        assert_eq!(format_expected_display(67.55), "67.6");
    }
}
