//! Conversion entry points.
//!
//! [`convert_to_file`] is the whole one-shot procedure: existence check,
//! read, render, write. [`render_document`] and [`render_fragment`] are the
//! same steps without touching the filesystem, for callers that already
//! hold the Markdown text.

use crate::config::ConversionConfig;
use crate::error::MdPrintError;
use crate::output::{ConversionOutput, ConversionStats, RenderedFragment};
use crate::pipeline::{input, markdown, template};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert the Markdown file at `input_path` and write the HTML document to
/// `output_path`.
///
/// The output file is overwritten unconditionally with a single write; its
/// parent directory must already exist.
///
/// # Errors
/// - [`MdPrintError::InputNotFound`] when `input_path` does not exist. Nothing
///   is read and nothing is written.
/// - [`MdPrintError::ReadFailed`] / [`MdPrintError::InvalidUtf8`] when the
///   input cannot be decoded.
/// - [`MdPrintError::OutputWriteFailed`] when the write fails.
pub fn convert_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, MdPrintError> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();
    info!("Converting {}", input_path.display());

    let text = input::read_markdown(input_path)?;
    let output = render_document(&text, config)?;

    std::fs::write(output_path, &output.html).map_err(|e| MdPrintError::OutputWriteFailed {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    info!(
        "Wrote {} bytes to {} in {}ms",
        output.stats.output_bytes,
        output_path.display(),
        output.stats.duration_ms
    );
    Ok(output.stats)
}

/// Render Markdown text into a complete HTML document.
pub fn render_document(
    markdown: &str,
    config: &ConversionConfig,
) -> Result<ConversionOutput, MdPrintError> {
    let start = Instant::now();

    let fragment = render_fragment(markdown, config)?;
    let stylesheet = template::stylesheet(config)?;
    let title = config.resolve_title(fragment.title.as_deref());
    debug!("Document title: {}", title);

    let html = template::assemble_document(&fragment.html, &stylesheet, title, config)?;

    let stats = ConversionStats {
        input_bytes: markdown.len(),
        output_bytes: html.len(),
        code_blocks: fragment.code_blocks,
        inline_math: fragment.inline_math,
        display_math: fragment.display_math,
        tables: fragment.tables,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    Ok(ConversionOutput {
        html,
        fragment,
        stats,
    })
}

/// Render Markdown text into the body fragment only, without the document
/// skeleton or stylesheet.
pub fn render_fragment(
    markdown: &str,
    config: &ConversionConfig,
) -> Result<RenderedFragment, MdPrintError> {
    markdown::render_fragment(markdown, &config.scope_class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_document_embeds_fragment_in_body() {
        let out = render_document("# Hi\n\nText", &ConversionConfig::default()).unwrap();
        let body_start = out.html.find("<body>").unwrap();
        let body_end = out.html.find("</body>").unwrap();
        assert!(out.html[body_start..body_end].contains(&out.fragment.html));
        assert_eq!(out.stats.output_bytes, out.html.len());
        assert_eq!(out.stats.input_bytes, "# Hi\n\nText".len());
    }

    #[test]
    fn title_from_heading_is_escaped() {
        let config = ConversionConfig::builder()
            .title_from_heading(true)
            .build()
            .unwrap();
        let out = render_document("# Fish & Chips\n", &config).unwrap();
        assert!(out.html.contains("<title>Fish &amp; Chips</title>"));
    }

    #[test]
    fn fixed_title_by_default() {
        let out = render_document("# Ignored\n", &ConversionConfig::default()).unwrap();
        assert!(out.html.contains("<title>AI 笔记归档</title>"));
    }

    #[test]
    fn stats_count_constructs() {
        let md = "$a$ and $b$\n\n$$c$$\n\n| x |\n|---|\n| 1 |\n\n```rust\nfn f() {}\n```\n";
        let stats = render_document(md, &ConversionConfig::default())
            .unwrap()
            .stats;
        assert_eq!(stats.inline_math, 2);
        assert_eq!(stats.display_math, 1);
        assert_eq!(stats.tables, 1);
        assert_eq!(stats.code_blocks, 1);
    }
}
