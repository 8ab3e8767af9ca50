//! Progress bar adapter using indicatif.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use page_qa_core::{ProgressEvent, ProgressSink, ScoreBand};

/// Per-document progress adapter for CLI output.
///
/// With a bar, pages advance the bar. Without one, only pages rated
/// [`ScoreBand::Poor`] are reported on stderr.
pub struct ProgressBar {
    document: String,
    bar: Option<IndicatifBar>,
    quiet: bool,
}

impl ProgressBar {
    /// Creates a new progress bar.
    ///
    /// # Arguments
    ///
    /// * `document` - Name shown next to the bar
    /// * `quiet` - If true, suppress all output
    /// * `show_bar` - If true, show progress bar; otherwise show per-page status
    #[must_use]
    pub fn new(document: &str, quiet: bool, show_bar: bool) -> Self {
        let bar = (show_bar && !quiet).then(|| {
            let bar = IndicatifBar::new(0);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} {prefix} [{bar:40.cyan/blue}] page {pos}/{len} {msg}")
            {
                bar.set_style(style.progress_chars("#>-"));
            }
            bar.set_prefix(document.to_owned());
            bar
        });

        Self {
            document: document.to_owned(),
            bar,
            quiet,
        }
    }
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        if self.quiet {
            return;
        }

        match event {
            ProgressEvent::Page {
                current_page,
                total_pages,
            } => {
                if let Some(bar) = &self.bar {
                    bar.set_length(u64::from(total_pages));
                    bar.set_position(u64::from(current_page.saturating_sub(1)));
                }
            }
            ProgressEvent::PageCompleted { result } => {
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                } else if result.band() == ScoreBand::Poor {
                    eprintln!(
                        "{}: page {} scored {:.1} (poor)",
                        self.document, result.page_number, result.overall_score
                    );
                }
            }
            ProgressEvent::Finished {
                overall_score,
                page_count,
            } => {
                if let Some(bar) = &self.bar {
                    bar.finish_with_message(format!(
                        "{overall_score:.1} over {page_count} page(s)"
                    ));
                }
            }
        }
    }
}

impl Drop for ProgressBar {
    fn drop(&mut self) {
        // A failed document never reaches `Finished`.
        if let Some(bar) = &self.bar {
            if !bar.is_finished() {
                bar.abandon();
            }
        }
    }
}
