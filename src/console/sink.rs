//! Line delivery sinks.
//!
//! The capture engine discovers lines one way; callers consume them in
//! different shapes. [`LineSink`] is the single seam between the two: a
//! streaming closure gets each line in real time, [`Accumulator`] collects
//! the full text for after the run, and [`LogSink`] is the default used when
//! the caller supplies nothing, forwarding lines to the ambient log channel.

/// Receives each reconstructed output line, in stream order.
pub trait LineSink {
    fn line(&mut self, line: &str);
}

/// Any `FnMut(&str)` closure is a streaming sink.
impl<F: FnMut(&str)> LineSink for F {
    fn line(&mut self, line: &str) {
        self(line);
    }
}

/// Collects lines into one newline-joined text.
#[derive(Debug, Default)]
pub struct Accumulator {
    text: String,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the accumulator, returning the collected text.
    ///
    /// Lines are joined with `\n`; a trailing newline is present when at
    /// least one line was delivered.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl LineSink for Accumulator {
    fn line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }
}

/// Default sink: each line goes to the ambient logging channel.
#[derive(Debug)]
pub struct LogSink {
    /// Program name included with every logged line.
    program: String,
}

impl LogSink {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl LineSink for LogSink {
    fn line(&mut self, line: &str) {
        tracing::info!(program = %self.program, "{line}");
    }
}
