//! Input resolution: existence check and UTF-8 decoding of the Markdown file.

use crate::error::MdPrintError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const UTF8_BOM: char = '\u{feff}';

/// Read the Markdown file at `path` as UTF-8 text.
///
/// The existence check happens first, so a missing file never reaches the
/// read call. A leading byte-order mark is dropped.
pub fn read_markdown(path: &Path) -> Result<String, MdPrintError> {
    if !path.exists() {
        return Err(MdPrintError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => MdPrintError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => MdPrintError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut text = String::from_utf8(bytes).map_err(|_| MdPrintError::InvalidUtf8 {
        path: path.to_path_buf(),
    })?;
    if text.starts_with(UTF8_BOM) {
        text.drain(..UTF8_BOM.len_utf8());
    }

    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Output path used when none is given: the input with a `.html` extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("html")
}
