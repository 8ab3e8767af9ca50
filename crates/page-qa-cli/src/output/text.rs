//! Human-readable report output.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Result;
use page_qa_core::{DocumentReport, ResultOutput};

/// Plain-text summary adapter.
///
/// Prints the document score and band, the averaged metrics, and one line
/// per page for multi-page documents.
pub struct TextOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl TextOutput {
    /// Creates a new text output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a new text output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

/// Renders one report.
fn render(report: &DocumentReport) -> String {
    let result = &report.result;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}: {:.1} ({}), {} page(s)",
        report.path, result.overall_score, report.rating, result.page_count
    );
    for metric in &result.average_metrics {
        let _ = writeln!(out, "  {:<16} {:>5.1}", metric.name(), metric.score);
    }
    if result.page_results.len() > 1 {
        for page in &result.page_results {
            let _ = writeln!(
                out,
                "  page {:<4} {:>5.1} ({})",
                page.page_number,
                page.overall_score,
                page.band()
            );
        }
    }

    out
}

impl ResultOutput for TextOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, report: &DocumentReport) -> Result<()> {
        let text = render(report);
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}
