//! Syntax highlighting via syntect: token markup for code blocks and the
//! matching theme stylesheet.
//!
//! Highlighting is class-based, not inline-styled. Code blocks carry
//! `hl-`-prefixed token classes, and the colours come from one stylesheet
//! generated per conversion from the selected theme.
//!
//! The bundled syntax and theme sets are parsed from syntect's binary dumps
//! once per process; they are immutable afterwards.

use crate::error::MdPrintError;
use once_cell::sync::Lazy;
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use tracing::debug;

/// Prefix added to every token class emitted into code blocks.
pub const CLASS_PREFIX: &str = "hl-";

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed {
    prefix: CLASS_PREFIX,
};

static SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEMES: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// Names of the bundled themes, sorted.
pub fn theme_names() -> Vec<&'static str> {
    THEMES.themes.keys().map(String::as_str).collect()
}

/// Whether `name` is one of the bundled themes.
pub fn has_theme(name: &str) -> bool {
    THEMES.themes.contains_key(name)
}

/// Tokenise `code` and return it as HTML spans with `hl-` classes.
///
/// `lang` is matched against syntax names and file extensions
/// (`python`, `py`, `rust`, `rs`, …). An unknown or missing language falls
/// back to plain text; the content is still HTML-escaped.
pub fn highlight_code(code: &str, lang: Option<&str>) -> Result<String, MdPrintError> {
    let syntaxes: &SyntaxSet = &SYNTAXES;
    let syntax = match lang {
        Some(token) => syntaxes.find_syntax_by_token(token).unwrap_or_else(|| {
            debug!("No syntax for language '{}', using plain text", token);
            syntaxes.find_syntax_plain_text()
        }),
        None => syntaxes.find_syntax_plain_text(),
    };

    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, syntaxes, CLASS_STYLE);
    for line in LinesWithEndings::from(code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}

/// Generate the CSS for `theme_name` with every rule nested under
/// `.{scope_class}`.
///
/// The theme's root rule (foreground and background of the whole block)
/// is applied to `.{scope_class}` itself.
pub fn theme_stylesheet(theme_name: &str, scope_class: &str) -> Result<String, MdPrintError> {
    let theme = THEMES.themes.get(theme_name).ok_or_else(|| {
        MdPrintError::InvalidConfig(format!("Unknown highlighting theme '{}'", theme_name))
    })?;
    let css = css_for_theme_with_class_style(theme, CLASS_STYLE)?;
    debug!(
        "Generated {} bytes of theme CSS for '{}'",
        css.len(),
        theme_name
    );
    Ok(scope_css(&css, scope_class))
}

/// Rewrite every selector in `css` so it only matches inside `.{scope_class}`.
///
/// Handles the shapes syntect emits: block comments, selector lists that may
/// span several lines, and declaration blocks closed by `}` on their own line.
fn scope_css(css: &str, scope_class: &str) -> String {
    let scope = format!(".{scope_class}");
    let roots = [format!(".{CLASS_PREFIX}code"), ".code".to_string()];

    let mut out = String::with_capacity(css.len() + css.len() / 3);
    let mut pending = String::new();
    let mut in_rule = false;
    let mut in_comment = false;

    for line in css.lines() {
        let trimmed = line.trim();

        if in_comment {
            out.push_str(line);
            out.push('\n');
            in_comment = !trimmed.contains("*/");
            continue;
        }
        if in_rule {
            out.push_str(line);
            out.push('\n');
            in_rule = !trimmed.contains('}');
            continue;
        }
        if pending.is_empty() && trimmed.starts_with("/*") {
            out.push_str(line);
            out.push('\n');
            in_comment = !trimmed.contains("*/");
            continue;
        }
        if pending.is_empty() && trimmed.is_empty() {
            out.push('\n');
            continue;
        }

        if !pending.is_empty() {
            pending.push(' ');
        }
        pending.push_str(trimmed);

        if let Some((selectors, rest)) = pending.split_once('{') {
            let scoped: Vec<String> = selectors
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    if roots.iter().any(|r| r == s) {
                        scope.clone()
                    } else {
                        format!("{scope} {s}")
                    }
                })
                .collect();
            out.push_str(&scoped.join(", "));
            out.push_str(" {");
            out.push_str(rest);
            out.push('\n');
            in_rule = !rest.contains('}');
            pending.clear();
        }
    }

    out
}
