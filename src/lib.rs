//! # mdprint
//!
//! Convert a Markdown file into a self-contained, print-friendly HTML
//! document: math left for MathJax to typeset in the browser, code blocks
//! highlighted with syntect, and print-media CSS so "Print → Save as PDF"
//! gives clean pages.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown file
//!  │
//!  ├─ 1. Input      existence check, UTF-8 decode
//!  ├─ 2. Math       \(…\) / \[…\] → $ / $$ outside code
//!  ├─ 3. Markdown   pulldown-cmark: tables, math, nested fences, nl2br
//!  ├─ 4. Highlight  syntect token classes + theme CSS under `.highlight`
//!  ├─ 5. Template   <head> with MathJax config + <style>, <body> fragment
//!  └─ 6. Output     single write to the output path
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdprint::{convert_to_file, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let stats = convert_to_file("notes.md", "notes.html", &config)?;
//!     eprintln!("{} code blocks, {} formulas", stats.code_blocks, stats.inline_math);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `mdprint` binary (clap + anyhow + tracing-subscriber) |
//!
//! ## Trust model
//!
//! Raw HTML inside the Markdown source is copied into the output unescaped.
//! The input is expected to be a local file you wrote yourself; do not feed
//! untrusted Markdown through this crate without sanitising the result.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert_to_file, render_document, render_fragment};
pub use error::MdPrintError;
pub use output::{ConversionOutput, ConversionStats, RenderedFragment};
pub use pipeline::input::default_output_path;

/// Names of the bundled highlighting themes accepted by
/// [`ConversionConfigBuilder::theme`].
pub fn available_themes() -> Vec<&'static str> {
    pipeline::highlight::theme_names()
}
