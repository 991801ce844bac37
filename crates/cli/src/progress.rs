//! Terminal spinner shown while channels are scanned.

use std::io::{self, Write};
use std::time::Duration;

use counter::{ChannelId, MessageCount, ScanProgress};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::fmt::MakeWriter;

const MESSAGE: &str = "Processing conversations...";

/// [`ScanProgress`] backed by an `indicatif` spinner on stderr.
///
/// The spinner draws nothing when stderr is not a terminal, and nothing at all
/// until [`SpinnerProgress::start`] is called.
pub struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    /// Creates the spinner, or a hidden one when `visible` is false.
    pub fn new(visible: bool) -> anyhow::Result<Self> {
        let bar = if visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
        Ok(Self { bar })
    }

    /// Shows the spinner and keeps it ticking until the scan finishes.
    pub fn start(&self) {
        self.bar.set_message(MESSAGE);
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    /// A stderr writer for the log subscriber that clears the spinner while a
    /// line is written and redraws it afterwards.
    pub fn log_writer(&self) -> SuspendingStderr {
        SuspendingStderr {
            bar: self.bar.clone(),
        }
    }
}

impl ScanProgress for SpinnerProgress {
    fn channel_scanned(&self, _channel: &ChannelId, _messages: MessageCount) {
        self.bar.inc(1);
        self.bar.set_message(format!("{MESSAGE} {} channels", self.bar.position()));
    }

    fn finished(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for SpinnerProgress {
    fn drop(&mut self) {
        // A failed scan never reaches `finished`.
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

/// Stderr handle that suspends a spinner around every write.
#[derive(Clone)]
pub struct SuspendingStderr {
    bar: ProgressBar,
}

impl Write for SuspendingStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bar.suspend(|| io::stderr().write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.bar.suspend(|| io::stderr().lock().write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for SuspendingStderr {
    type Writer = SuspendingStderr;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_spinner_counts_channels() {
        let progress = SpinnerProgress::new(false).unwrap();
        progress.start();
        let id = ChannelId::new("c1").unwrap();
        progress.channel_scanned(&id, MessageCount::new(4));
        progress.channel_scanned(&id, MessageCount::new(1));
        assert_eq!(progress.bar.position(), 2);
        progress.finished();
        assert!(progress.bar.is_finished());
    }

    #[test]
    fn log_writer_shares_the_spinner() {
        let progress = SpinnerProgress::new(false).unwrap();
        progress.start();
        let writer = progress.log_writer();
        progress.channel_scanned(&ChannelId::new("c1").unwrap(), MessageCount::new(1));
        assert_eq!(writer.bar.position(), 1);

        let mut line = writer.make_writer();
        line.write_all(b"").unwrap();
        line.flush().unwrap();
        assert!(!progress.bar.is_finished());
    }

    #[test]
    fn log_writer_outlives_a_finished_spinner() {
        let writer = {
            let progress = SpinnerProgress::new(false).unwrap();
            progress.start();
            progress.log_writer()
        };
        assert!(writer.bar.is_finished());
        writer.make_writer().write_all(b"").unwrap();
    }
}
