//! Console program execution with synchronous output capture.
//!
//! - [`lines`] - Raw-byte line reassembly across fragmented pipe reads
//! - [`sink`] - Line delivery: streaming callback, accumulator, log channel
//! - [`runner`] - Pipe and child lifecycle, blocking read loop, exit code

pub mod lines;
pub mod runner;
pub mod sink;

pub use lines::LineReassembler;
pub use runner::{run, run_captured, run_logged, run_streaming, EXIT_CODE_UNKNOWN};
pub use sink::{Accumulator, LineSink, LogSink};
