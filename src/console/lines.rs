//! Line reassembly over fragmented byte streams.
//!
//! Pipe reads deliver output in arbitrary fragments: a line terminator can
//! land anywhere, including split across two reads (`"A\r"` then `"\nB"`).
//! [`LineReassembler`] turns that stream of raw chunks back into discrete
//! lines, carrying the undelivered fragment and a pending-CR marker across
//! chunk boundaries.
//!
//! Discovery operates on raw bytes, not decoded text: every supported
//! encoding keeps `\r` and `\n` single-byte, so splitting first and decoding
//! each segment afterwards is correct for all of them.

/// Consumed prefix length at which the pending fragment is copied forward.
const COMPACT_THRESHOLD: usize = 4096;

/// Reassembles complete lines from a stream of raw byte chunks.
///
/// Recognizes `\n`, `\r\n`, and bare `\r` terminators. A chunk ending in a
/// bare `\r` terminates its line immediately; if the *next* chunk then opens
/// with `\n`, that byte is the second half of a split `\r\n` and is
/// swallowed rather than emitted as an empty line.
///
/// Emitted segments never include their terminator bytes. A single line may
/// grow without bound: the internal buffer doubles as needed and the pending
/// fragment is preserved byte-for-byte across every growth and compaction.
#[derive(Debug)]
pub struct LineReassembler {
    /// Raw bytes; `buf[start..]` is the pending (undelivered) fragment.
    buf: Vec<u8>,
    /// Offset of the pending fragment within `buf`.
    start: usize,
    /// Previous chunk ended with an unterminated `\r`; a leading `\n` on the
    /// next chunk must be swallowed.
    cr_pending: bool,
}

impl LineReassembler {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(512),
            start: 0,
            cr_pending: false,
        }
    }

    /// Bytes currently held as the pending fragment.
    pub fn pending(&self) -> &[u8] {
        &self.buf[self.start..]
    }

    /// Feed one raw chunk, emitting every line it completes.
    ///
    /// `emit` receives each complete line as a raw byte segment, terminator
    /// stripped, in stream order.
    pub fn push(&mut self, chunk: &[u8], mut emit: impl FnMut(&[u8])) {
        let mut chunk = chunk;
        if self.cr_pending {
            self.cr_pending = false;
            if let [b'\n', rest @ ..] = chunk {
                chunk = rest;
            }
        }

        // Everything before scan_from was scanned by earlier pushes and
        // holds no terminator.
        let scan_from = self.buf.len();
        self.buf.extend_from_slice(chunk);

        let mut i = scan_from;
        while i < self.buf.len() {
            match self.buf[i] {
                b'\n' => {
                    emit(&self.buf[self.start..i]);
                    self.start = i + 1;
                    i += 1;
                }
                b'\r' => {
                    emit(&self.buf[self.start..i]);
                    if i + 1 == self.buf.len() {
                        // Bare CR at the chunk edge: the matching LF, if
                        // any, arrives with the next chunk.
                        self.cr_pending = true;
                        self.start = i + 1;
                        i += 1;
                    } else if self.buf[i + 1] == b'\n' {
                        self.start = i + 2;
                        i += 2;
                    } else {
                        self.start = i + 1;
                        i += 1;
                    }
                }
                _ => i += 1,
            }
        }

        self.compact_if_needed();
    }

    /// Flush the buffered remainder as a final, unterminated line.
    ///
    /// Called once the stream has ended. Emits nothing when no fragment is
    /// pending (the stream ended cleanly at a terminator).
    pub fn finish(&mut self, mut emit: impl FnMut(&[u8])) {
        if self.start < self.buf.len() {
            emit(&self.buf[self.start..]);
        }
        self.buf.clear();
        self.start = 0;
        self.cr_pending = false;
    }

    /// Copy the pending fragment to the front once the consumed prefix gets
    /// large, so long-running captures do not accumulate dead bytes.
    fn compact_if_needed(&mut self) {
        if self.start >= COMPACT_THRESHOLD {
            self.buf.copy_within(self.start.., 0);
            self.buf.truncate(self.buf.len() - self.start);
            self.start = 0;
        }
    }
}

impl Default for LineReassembler {
    fn default() -> Self {
        Self::new()
    }
}
