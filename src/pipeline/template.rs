//! Document assembly: stylesheet and HTML skeleton.
//!
//! The skeleton is a `format!` template. Every `{`/`}` that belongs to CSS or
//! JavaScript is doubled in the literal; the fragment, the generated theme CSS
//! and the MathJax object are interpolated as values, so braces inside them
//! are never read as template slots.

use crate::config::ConversionConfig;
use crate::error::MdPrintError;
use crate::pipeline::highlight;
use crate::pipeline::markdown::escape_html;
use serde::Serialize;

/// MathJax 3 global configuration object.
#[derive(Debug, Serialize)]
struct MathJaxConfig {
    tex: TexConfig,
    options: MathJaxOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TexConfig {
    inline_math: [[&'static str; 2]; 2],
    display_math: [[&'static str; 2]; 2],
    process_escapes: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MathJaxOptions {
    ignore_html_class: &'static str,
    process_html_class: &'static str,
}

impl Default for MathJaxConfig {
    fn default() -> Self {
        Self {
            tex: TexConfig {
                inline_math: [["$", "$"], ["\\(", "\\)"]],
                display_math: [["$$", "$$"], ["\\[", "\\]"]],
                process_escapes: true,
            },
            options: MathJaxOptions {
                ignore_html_class: "tex2jax_ignore",
                process_html_class: "tex2jax_process",
            },
        }
    }
}

/// The MathJax configuration as a JavaScript object literal (pretty JSON).
pub fn mathjax_config_js() -> Result<String, MdPrintError> {
    Ok(serde_json::to_string_pretty(&MathJaxConfig::default())?)
}

/// Fixed visual rules: typography, headings, code frames, blockquotes,
/// tables and print overrides. Code-frame rules target `.{scope_class}`.
pub fn base_stylesheet(scope_class: &str) -> String {
    format!(
        r#"body {{
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: #24292e;
    max-width: 850px;
    margin: 0 auto;
    padding: 40px;
    background-color: #fff;
}}

h1, h2, h3 {{ color: #1a73e8; border-bottom: 1px solid #eaecef; padding-bottom: 0.3em; margin-top: 1.5em; }}

.{scope_class} {{
    background: #f6f8fa;
    padding: 12px;
    border-radius: 6px;
    overflow-x: auto;
    margin: 16px 0;
    border: 1px solid #e1e4e8;
}}

mjx-container {{ font-size: 110% !important; }}

blockquote {{
    border-left: 4px solid #dfe2e5;
    color: #6a737d;
    padding-left: 16px;
    margin: 16px 0;
}}

table {{ border-collapse: collapse; width: 100%; margin: 16px 0; }}
th, td {{ border: 1px solid #dfe2e5; padding: 6px 13px; }}
th {{ background-color: #f2f2f2; }}

@media print {{
    body {{ max-width: 100%; padding: 0; }}
    .{scope_class} {{ break-inside: avoid; }}
    h1, h2 {{ page-break-after: avoid; }}
}}
"#
    )
}

/// Base rules followed by the theme CSS, generated fresh on every call.
pub fn stylesheet(config: &ConversionConfig) -> Result<String, MdPrintError> {
    let mut css = base_stylesheet(&config.scope_class);
    css.push('\n');
    css.push_str(&highlight::theme_stylesheet(
        &config.theme,
        &config.scope_class,
    )?);
    Ok(css)
}

/// Interpolate the fragment and stylesheet into the document skeleton.
///
/// `title` is HTML-escaped; `fragment` and `stylesheet` are embedded verbatim.
pub fn assemble_document(
    fragment: &str,
    stylesheet: &str,
    title: &str,
    config: &ConversionConfig,
) -> Result<String, MdPrintError> {
    let mathjax = mathjax_config_js()?;
    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>

    <script>
    MathJax = {mathjax};
    </script>
    <script id="MathJax-script" async src="{mathjax_url}"></script>

    <style>
{stylesheet}
    </style>
</head>
<body>
{fragment}
</body>
</html>
"#,
        lang = escape_html(&config.lang),
        title = escape_html(title),
        mathjax_url = escape_html(&config.mathjax_url),
    ))
}
