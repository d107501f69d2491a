//! Integration tests for mdprint: real files in a scratch directory.

use mdprint::{convert_to_file, render_document, ConversionConfig, MdPrintError};
use pretty_assertions::{assert_eq, assert_ne};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

const SCENARIO: &str = "# Title\n\nSome $x^2$ text.\n\n```python\nprint(\"hi\")\n```\n";

fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

/// Slice between `<body>` and `</body>`.
fn body_of(html: &str) -> &str {
    let start = html.find("<body>").expect("<body> present") + "<body>".len();
    let end = html.rfind("</body>").expect("</body> present");
    &html[start..end]
}

// ── Conversion to file ───────────────────────────────────────────────────────

#[test]
fn scenario_document() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "a.md", SCENARIO);
    let output = dir.path().join("a.html");

    let stats = convert_to_file(&input, &output, &ConversionConfig::default()).unwrap();
    let html = fs::read_to_string(&output).unwrap();

    assert_eq!(html.matches("<html").count(), 1);
    assert!(html.contains("<title>AI 笔记归档</title>"));

    let body = body_of(&html);
    assert!(body.contains("<h1>Title</h1>"), "body: {body}");
    assert!(body.contains(r"\(x^2\)"), "body: {body}");
    assert!(body.contains(r#"<div class="highlight">"#), "body: {body}");
    assert!(body.contains("print"));

    assert_eq!(stats.output_bytes, html.len());
    assert_eq!(stats.code_blocks, 1);
    assert_eq!(stats.inline_math, 1);
}

#[test]
fn fragment_is_embedded_verbatim() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "doc.md", SCENARIO);
    let output = dir.path().join("doc.html");
    let config = ConversionConfig::default();

    convert_to_file(&input, &output, &config).unwrap();
    let html = fs::read_to_string(&output).unwrap();
    let expected = render_document(SCENARIO, &config).unwrap();

    assert!(body_of(&html).contains(&expected.fragment.html));
}

#[test]
fn missing_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("does-not-exist.md");
    let output = dir.path().join("out.html");

    let err = convert_to_file(&input, &output, &ConversionConfig::default()).unwrap_err();

    assert!(matches!(err, MdPrintError::InputNotFound { ref path } if path == &input));
    assert!(!output.exists());
}

#[test]
fn missing_input_leaves_existing_output_alone() {
    let dir = TempDir::new().unwrap();
    let output = write_input(dir.path(), "out.html", "previous");

    let _ = convert_to_file(dir.path().join("gone.md"), &output, &ConversionConfig::default());

    assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
}

#[test]
fn output_is_overwritten() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "n.md", "fresh content");
    let output = write_input(dir.path(), "n.html", "stale content that is long");

    convert_to_file(&input, &output, &ConversionConfig::default()).unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("fresh content"));
    assert!(!html.contains("stale content"));
}

#[test]
fn conversion_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        dir.path(),
        "i.md",
        "# Doc\n\n$$\\sum_i x_i$$\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n```rust\nfn main() {}\n```\n",
    );
    let first = dir.path().join("first.html");
    let second = dir.path().join("second.html");
    let config = ConversionConfig::default();

    convert_to_file(&input, &first, &config).unwrap();
    convert_to_file(&input, &second, &config).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn unicode_directory_and_file_names() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("桌面 notes");
    fs::create_dir(&nested).unwrap();
    let input = write_input(&nested, "1. 核心痛点分析 (Why).md", "# 核心痛点\n\n内容\n");
    let output = nested.join("输出.html");

    convert_to_file(&input, &output, &ConversionConfig::default()).unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("<h1>核心痛点</h1>"));
}

#[test]
fn missing_output_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "x.md", "text");
    let output = dir.path().join("no-such-dir").join("x.html");

    let err = convert_to_file(&input, &output, &ConversionConfig::default()).unwrap_err();

    assert!(matches!(err, MdPrintError::OutputWriteFailed { .. }), "got: {err:?}");
}

#[test]
fn non_utf8_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.md");
    fs::write(&input, [0xff, 0xfe, 0x00, 0x41]).unwrap();
    let output = dir.path().join("bad.html");

    let err = convert_to_file(&input, &output, &ConversionConfig::default()).unwrap_err();

    assert!(matches!(err, MdPrintError::InvalidUtf8 { .. }), "got: {err:?}");
    assert!(!output.exists());
}

// ── Document content ─────────────────────────────────────────────────────────

#[test]
fn math_delimiters_survive_literally() {
    let md = "Inline $a+b$ and display:\n\n$$\nc = d\n$$\n";
    let out = render_document(md, &ConversionConfig::default()).unwrap();
    let body = body_of(&out.html);

    assert!(body.contains(r"\(a+b\)"), "body: {body}");
    assert!(body.contains(r"\[c = d\]"), "body: {body}");
    assert!(!body.contains("<mjx-container"));
}

#[test]
fn tables_and_code_have_expected_structure() {
    let md = "| Name | Score |\n|------|------:|\n| Ann  | 9 |\n\n```js\nconsole.log(1)\n```\n";
    let out = render_document(md, &ConversionConfig::default()).unwrap();
    let body = body_of(&out.html);

    assert!(body.contains("<table>"));
    assert!(body.contains("<th>Name</th>"));
    assert!(body.contains(r#"<div class="highlight"><pre><code class="language-js">"#));
}

#[test]
fn head_contains_mathjax_and_print_styles() {
    let out = render_document("x", &ConversionConfig::default()).unwrap();
    let head_end = out.html.find("</head>").unwrap();
    let head = &out.html[..head_end];

    assert!(head.contains("MathJax = {"));
    assert!(head.contains("\"processEscapes\": true"));
    assert!(head.contains("mathjax@3/es5/tex-chtml.js"));
    assert!(head.contains("@media print"));
    assert!(head.contains("mjx-container"));
    assert!(head.contains("generated by syntect"));
}

#[test]
fn custom_config_reaches_the_document() {
    let config = ConversionConfig::builder()
        .title("Week <3>")
        .lang("en")
        .theme("InspiredGitHub")
        .build()
        .unwrap();
    let out = render_document("plain", &config).unwrap();

    assert!(out.html.contains("<html lang=\"en\">"));
    assert!(out.html.contains("<title>Week &lt;3&gt;</title>"));
    let default_out = render_document("plain", &ConversionConfig::default()).unwrap();
    assert_ne!(out.html, default_out.html);
    assert_eq!(out.fragment.html, default_out.fragment.html);
}

#[test]
fn raw_html_is_not_sanitised() {
    let md = "<script>alert(1)</script>\n\ntext";
    let out = render_document(md, &ConversionConfig::default()).unwrap();
    assert!(body_of(&out.html).contains("<script>alert(1)</script>"));
}
