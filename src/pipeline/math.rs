//! Math delimiter normalisation.
//!
//! pulldown-cmark recognises `$…$` and `$$…$$` natively, but a backslash
//! before `(` or `[` is an ordinary CommonMark escape, so `\(x\)` would come
//! out as plain `(x)`. This pass rewrites `\(…\)` to `$…$` and `\[…\]` to
//! `$$…$$` before parsing, so both delimiter families reach the renderer as
//! math events.
//!
//! `\[…\]` counts as display math only when `\[` opens a line and `\]`
//! closes one. Mid-line `a\[0\]` is an ordinary bracket escape and is left
//! for the Markdown parser.
//!
//! Code spans, code blocks, raw HTML and existing `$` math are located with
//! a first parse and left byte-for-byte untouched.

use crate::pipeline::markdown::parser_options;
use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;
use tracing::debug;

static RE_DISPLAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?ms)^[ \t]*\\\[(.+?)\\\][ \t]*$").unwrap());

static RE_INLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\\((.+?)\\\)").unwrap());

/// Rewrite backslash math delimiters into dollar delimiters outside code.
///
/// Returns the input unchanged (borrowed) when there is nothing to rewrite.
pub fn normalise_delimiters(markdown: &str) -> Cow<'_, str> {
    if !markdown.contains("\\(") && !markdown.contains("\\[") {
        return Cow::Borrowed(markdown);
    }

    let protected = protected_ranges(markdown);
    let mut edits: Vec<(Range<usize>, String)> = Vec::new();

    collect_edits(markdown, &RE_DISPLAY, "$$", &protected, &mut edits);
    collect_edits(markdown, &RE_INLINE, "$", &protected, &mut edits);

    if edits.is_empty() {
        return Cow::Borrowed(markdown);
    }
    debug!("Normalised {} backslash math delimiter pair(s)", edits.len());

    edits.sort_by_key(|(range, _)| range.start);
    let mut out = String::with_capacity(markdown.len());
    let mut cursor = 0;
    for (range, replacement) in edits {
        out.push_str(&markdown[cursor..range.start]);
        out.push_str(&replacement);
        cursor = range.end;
    }
    out.push_str(&markdown[cursor..]);
    Cow::Owned(out)
}

/// Byte ranges that must never be rewritten.
fn protected_ranges(markdown: &str) -> Vec<Range<usize>> {
    Parser::new_ext(markdown, parser_options())
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(_))
            | Event::Start(Tag::HtmlBlock)
            | Event::Code(_)
            | Event::Html(_)
            | Event::InlineHtml(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => Some(range),
            _ => None,
        })
        .collect()
}

fn collect_edits(
    markdown: &str,
    re: &Regex,
    dollars: &str,
    protected: &[Range<usize>],
    edits: &mut Vec<(Range<usize>, String)>,
) {
    for caps in re.captures_iter(markdown) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let range = whole.range();

        // `\\(` is an escaped backslash followed by a literal paren.
        if markdown[..range.start].ends_with('\\') {
            continue;
        }
        let formula = body.as_str().trim();
        if formula.is_empty() || formula.contains('$') || formula.contains("\n\n") {
            continue;
        }
        if overlaps(&range, protected) || edits.iter().any(|(r, _)| intersects(r, &range)) {
            continue;
        }
        edits.push((range, format!("{dollars}{formula}{dollars}")));
    }
}

fn overlaps(range: &Range<usize>, protected: &[Range<usize>]) -> bool {
    protected.iter().any(|p| intersects(p, range))
}

fn intersects(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}
