//! Result output port for writing document reports.

use crate::domain::DocumentReport;

/// Port for outputting document reports.
pub trait ResultOutput: Send + Sync {
    /// Writes a single document report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, report: &DocumentReport) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
