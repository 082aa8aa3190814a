//! Console output text encodings.
//!
//! Captured console bytes are decoded per line segment, never mid-stream:
//! line discovery happens on raw bytes first (both supported encodings keep
//! `\r` and `\n` single-byte), then each segment is decoded with the
//! encoding configured for the run. When the caller does not pick one, a
//! process-wide default derived from the OS locale is resolved lazily once
//! and reused for every subsequent capture.

use std::sync::OnceLock;

/// Text encoding used to decode captured console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEncoding {
    /// UTF-8, invalid sequences replaced with U+FFFD.
    Utf8,

    /// Latin-1 (ISO 8859-1): every byte maps to the code point of the same
    /// value. Stands in for the legacy single-byte console code pages.
    Latin1,
}

static CONSOLE_DEFAULT: OnceLock<OutputEncoding> = OnceLock::new();

impl OutputEncoding {
    /// Decode a raw byte segment to text.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            OutputEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            OutputEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }

    /// The process-wide default console encoding.
    ///
    /// Resolved from the locale environment on first use and cached for the
    /// life of the process. Redundant concurrent initializations are
    /// harmless: every racer computes the same value and the first write
    /// wins.
    pub fn console_default() -> OutputEncoding {
        *CONSOLE_DEFAULT.get_or_init(detect_console_encoding)
    }

    /// Parse an encoding name as accepted on the CLI.
    pub fn from_name(name: &str) -> Option<OutputEncoding> {
        match name.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Some(OutputEncoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" => Some(OutputEncoding::Latin1),
            _ => None,
        }
    }
}

fn detect_console_encoding() -> OutputEncoding {
    if cfg!(windows) {
        // Modern Windows consoles run UTF-8; querying the legacy OEM code
        // page is not worth a platform dependency here.
        return OutputEncoding::Utf8;
    }

    // POSIX locale precedence: LC_ALL overrides LC_CTYPE overrides LANG.
    for var in ["LC_ALL", "LC_CTYPE", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            if value.is_empty() {
                continue;
            }
            return if value.to_ascii_lowercase().contains("utf") {
                OutputEncoding::Utf8
            } else {
                OutputEncoding::Latin1
            };
        }
    }

    OutputEncoding::Latin1
}
