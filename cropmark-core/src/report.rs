//! Per-file buffered reporting.
//!
//! Every file pipeline writes its user-facing lines into a private buffer it
//! owns and flushes the whole block in one write once the pipeline finishes.
//! Concurrent pipelines therefore never interleave their output, without any
//! locking during the run itself.

use std::io::Write;

/// Owned log buffer for one file's pipeline run.
#[derive(Debug, Default)]
pub struct FileReport {
    lines: Vec<String>,
}

impl FileReport {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            lines: vec![header.into()],
        }
    }

    /// Appends one line to the buffer.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Writes the whole buffer as a single block.
    ///
    /// A single `write_all` on a locked handle keeps blocks from different
    /// files contiguous even under concurrent flushes.
    pub fn flush_to(&self, out: &mut impl Write) -> std::io::Result<()> {
        let mut block = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            block.push_str(line);
            block.push('\n');
        }
        out.write_all(block.as_bytes())
    }

    /// Flushes the buffer to stdout.
    pub fn flush_stdout(&self) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = self.flush_to(&mut handle) {
            log::error!("failed to flush file report: {e}");
        }
    }
}
