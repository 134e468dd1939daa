use crate::harvest::FetchOutcome;
use crate::output::lines::{format_result_lines, LineFormat};
use crate::output::stats::FetchStats;
use std::io::{self, Write};

/// Batch-mode consumer writing result lines to an output stream
///
/// Lines end with a single `\n` on every platform. The stream is flushed
/// after each outcome so partial runs leave usable output behind.
pub struct BatchWriter<W: Write> {
    out: W,
    format: LineFormat,
    stats: FetchStats,
    done: bool,
}

impl<W: Write> BatchWriter<W> {
    pub fn new(out: W, format: LineFormat) -> Self {
        Self {
            out,
            format,
            stats: FetchStats::default(),
            done: false,
        }
    }

    /// Logs and records one outcome; failures are logged, not written
    pub fn record(&mut self, outcome: &FetchOutcome) -> io::Result<()> {
        self.stats.record(outcome);

        let items = match &outcome.result {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("[{}] error: {}: {}", outcome.id(), outcome.url(), e);
                return Ok(());
            }
        };

        for line in format_result_lines(items, &self.format) {
            self.out.write_all(line.as_bytes())?;
            self.out.write_all(b"\n")?;
        }
        self.out.flush()?;

        tracing::info!("[{}] pass: {}", outcome.id(), outcome.url());
        Ok(())
    }

    /// Marks the cycle as complete
    pub fn mark_done(&mut self) {
        self.done = true;
        tracing::info!("done! {}", self.stats);
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn stats(&self) -> FetchStats {
        self.stats
    }

    /// Flushes and returns the underlying stream
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
