//! Markdown → HTML fragment with the fixed extension set.
//!
//! The pulldown-cmark event stream is rewritten before it reaches
//! [`pulldown_cmark::html::push_html`]:
//!
//! | Event | Rewritten to |
//! |-------|--------------|
//! | code block | `<div class="{scope}"><pre><code class="language-X">…</code></pre></div>` with syntect token spans |
//! | inline math | `<span class="arithmatex">\(…\)</span>` |
//! | display math | `<div class="arithmatex">\[…\]</div>` (paragraph wrapper dropped when it holds only math) |
//! | soft break | hard break (`<br />`) |
//!
//! Raw HTML in the source is passed through unescaped; input is assumed to
//! be a trusted local file.

use crate::error::MdPrintError;
use crate::output::RenderedFragment;
use crate::pipeline::{highlight, math};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use tracing::debug;

/// Parser options for the fixed extension set: pipe tables and `$` math.
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_MATH
}

/// Render Markdown text into an HTML fragment.
///
/// `scope_class` is the class of the `<div>` wrapping each code block; it
/// must match the scope of the theme stylesheet.
pub fn render_fragment(markdown: &str, scope_class: &str) -> Result<RenderedFragment, MdPrintError> {
    let source = math::normalise_delimiters(markdown);
    let mut fragment = RenderedFragment::default();

    let mut events: Vec<Event<'_>> = Vec::new();
    let mut code: Option<CodeBuffer> = None;
    let mut title: Option<String> = None;
    let mut capturing_title = false;

    for event in Parser::new_ext(&source, parser_options()) {
        if let Some(mut block) = code.take() {
            match event {
                Event::End(TagEnd::CodeBlock) => {
                    events.push(Event::Html(CowStr::from(block.render(scope_class)?)));
                    fragment.code_blocks += 1;
                }
                Event::Text(text) => {
                    block.content.push_str(&text);
                    code = Some(block);
                }
                _ => code = Some(block),
            }
            continue;
        }

        if capturing_title {
            match &event {
                Event::Text(t) | Event::Code(t) | Event::InlineMath(t) => {
                    title.get_or_insert_with(String::new).push_str(t);
                }
                Event::End(TagEnd::Heading(HeadingLevel::H1)) => capturing_title = false,
                _ => {}
            }
        }

        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                code = Some(CodeBuffer::new(&kind));
            }
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) if title.is_none() => {
                capturing_title = true;
                events.push(event);
            }
            Event::Start(Tag::Table(_)) => {
                fragment.tables += 1;
                events.push(event);
            }
            Event::InlineMath(formula) => {
                fragment.inline_math += 1;
                events.push(Event::InlineHtml(CowStr::from(inline_math_html(&formula))));
            }
            Event::DisplayMath(_) => {
                fragment.display_math += 1;
                events.push(event);
            }
            Event::SoftBreak => events.push(Event::HardBreak),
            other => events.push(other),
        }
    }

    let events = unwrap_display_paragraphs(events);
    let mut html = String::with_capacity(source.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, events.into_iter());

    debug!(
        "Rendered fragment: {} bytes, {} code blocks, {} inline / {} display math, {} tables",
        html.len(),
        fragment.code_blocks,
        fragment.inline_math,
        fragment.display_math,
        fragment.tables
    );

    fragment.html = html;
    fragment.title = title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
    Ok(fragment)
}

/// Turn the remaining `DisplayMath` events into block HTML.
///
/// A paragraph whose only content is display math (plus line breaks) loses
/// its `<p>` wrapper so the `<div>` is not nested inside it.
fn unwrap_display_paragraphs(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut iter = events.into_iter();

    while let Some(event) = iter.next() {
        if !matches!(event, Event::Start(Tag::Paragraph)) {
            out.push(display_math_to_html(event));
            continue;
        }

        let mut inner = Vec::new();
        for next in iter.by_ref() {
            if matches!(next, Event::End(TagEnd::Paragraph)) {
                break;
            }
            inner.push(next);
        }

        let math_only = inner.iter().any(|e| matches!(e, Event::DisplayMath(_)))
            && inner.iter().all(|e| match e {
                Event::DisplayMath(_) | Event::HardBreak => true,
                Event::Text(t) => t.trim().is_empty(),
                _ => false,
            });

        if math_only {
            out.extend(
                inner
                    .into_iter()
                    .filter(|e| matches!(e, Event::DisplayMath(_)))
                    .map(|e| match e {
                        Event::DisplayMath(formula) => {
                            Event::Html(CowStr::from(display_math_html(&formula)))
                        }
                        other => other,
                    }),
            );
        } else {
            out.push(Event::Start(Tag::Paragraph));
            out.extend(inner.into_iter().map(display_math_to_html));
            out.push(Event::End(TagEnd::Paragraph));
        }
    }

    out
}

fn display_math_to_html(event: Event<'_>) -> Event<'_> {
    match event {
        Event::DisplayMath(formula) => Event::InlineHtml(CowStr::from(display_math_html(&formula))),
        other => other,
    }
}

fn inline_math_html(formula: &str) -> String {
    format!(r#"<span class="arithmatex">\({}\)</span>"#, escape_html(formula))
}

fn display_math_html(formula: &str) -> String {
    format!(
        r#"<div class="arithmatex">\[{}\]</div>"#,
        escape_html(formula.trim())
    )
}

/// Accumulates the text of one code block until its end tag.
#[derive(Debug)]
struct CodeBuffer {
    lang: Option<String>,
    content: String,
}

impl CodeBuffer {
    fn new(kind: &CodeBlockKind<'_>) -> Self {
        let lang = match kind {
            CodeBlockKind::Fenced(info) => fence_language(info),
            CodeBlockKind::Indented => None,
        };
        Self {
            lang,
            content: String::new(),
        }
    }

    fn render(&self, scope_class: &str) -> Result<String, MdPrintError> {
        let body = highlight::highlight_code(&self.content, self.lang.as_deref())?;
        Ok(match &self.lang {
            Some(lang) => format!(
                r#"<div class="{scope_class}"><pre><code class="language-{}">{body}</code></pre></div>"#,
                escape_html(lang)
            ),
            None => format!(r#"<div class="{scope_class}"><pre><code>{body}</code></pre></div>"#),
        } + "\n")
    }
}

/// First word of a fence info string: "python", "rust,ignore", "js {.x}".
fn fence_language(info: &str) -> Option<String> {
    info.split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Escape the five HTML-significant characters.
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
