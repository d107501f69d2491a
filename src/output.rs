//! Output types returned by the conversion entry points.

use serde::Serialize;

/// HTML produced from the Markdown body, before it is placed in the
/// document skeleton.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedFragment {
    /// The body HTML.
    pub html: String,
    /// Plain text of the first level-1 heading, if any.
    pub title: Option<String>,
    /// Number of code blocks (fenced and indented).
    pub code_blocks: usize,
    /// Number of inline formulas (`$…$`, `\(…\)`).
    pub inline_math: usize,
    /// Number of display formulas (`$$…$$`, `\[…\]`).
    pub display_math: usize,
    /// Number of pipe tables.
    pub tables: usize,
}

/// Result of an in-memory conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutput {
    /// The complete, self-contained HTML document.
    pub html: String,
    /// The body fragment embedded in `html`.
    pub fragment: RenderedFragment,
    /// Counters and timings.
    pub stats: ConversionStats,
}

/// Summary of one conversion, printed by `mdprint --json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    /// Size of the Markdown source in bytes.
    pub input_bytes: usize,
    /// Size of the written HTML document in bytes.
    pub output_bytes: usize,
    pub code_blocks: usize,
    pub inline_math: usize,
    pub display_math: usize,
    pub tables: usize,
    /// Wall-clock time spent rendering, in milliseconds.
    pub duration_ms: u64,
}
