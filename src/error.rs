//! Error types for the mdprint library.
//!
//! Every failure point of a conversion surfaces as one [`MdPrintError`].
//! Only [`MdPrintError::InputNotFound`] is an expected, user-correctable
//! condition; the CLI reports it as a friendly two-line diagnostic and exits
//! normally. Everything else is propagated with its cause attached.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the mdprint library.
#[derive(Debug, Error)]
pub enum MdPrintError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Markdown file not found: '{}'", path.display())]
    InputNotFound { path: PathBuf },

    /// The input exists but could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input was read but is not valid UTF-8.
    #[error("File '{}' is not valid UTF-8\nRe-save it with UTF-8 encoding and try again.", path.display())]
    InvalidUtf8 { path: PathBuf },

    // ── Rendering errors ──────────────────────────────────────────────────
    /// syntect failed while tokenising a code block or generating theme CSS.
    #[error("Syntax highlighting failed: {0}")]
    Highlight(String),

    /// The MathJax configuration object could not be serialised.
    #[error("Failed to serialise MathJax configuration: {0}")]
    Serialize(#[from] serde_json::Error),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{}': {source}", path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<syntect::Error> for MdPrintError {
    fn from(e: syntect::Error) -> Self {
        MdPrintError::Highlight(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_not_found_display() {
        let e = MdPrintError::InputNotFound {
            path: PathBuf::from("notes/missing.md"),
        };
        let msg = e.to_string();
        assert!(msg.contains("notes/missing.md"), "got: {msg}");
    }

    #[test]
    fn invalid_utf8_display() {
        let e = MdPrintError::InvalidUtf8 {
            path: PathBuf::from("latin1.md"),
        };
        assert!(e.to_string().contains("latin1.md"));
        assert!(e.to_string().contains("UTF-8"));
    }

    #[test]
    fn write_failure_keeps_source() {
        use std::error::Error as _;

        let e = MdPrintError::OutputWriteFailed {
            path: PathBuf::from("/no/such/dir/out.html"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        assert!(e.to_string().contains("out.html"));
        assert!(e.source().is_some());
    }

    #[test]
    fn invalid_config_display() {
        let e = MdPrintError::InvalidConfig("unknown theme 'nope'".into());
        assert!(e.to_string().contains("unknown theme"));
    }
}
