//! Configuration types for Markdown-to-HTML conversion.
//!
//! All document-level knobs live in [`ConversionConfig`], built via its
//! [`ConversionConfigBuilder`]. The Markdown extension set itself is fixed;
//! only the surrounding document (title, language, highlighting theme,
//! MathJax source) can be changed.
//!
//! The defaults produce the classic `AI 笔记归档` zh-CN document.

use crate::error::MdPrintError;
use crate::pipeline::highlight;
use serde::{Deserialize, Serialize};

/// Default `<title>` of the generated document.
pub const DEFAULT_TITLE: &str = "AI 笔记归档";

/// Default `lang` attribute of the `<html>` element.
pub const DEFAULT_LANG: &str = "zh-CN";

/// Default syntect theme used for code block colours.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Default CSS class wrapping every highlighted code block.
pub const DEFAULT_SCOPE_CLASS: &str = "highlight";

/// MathJax 3 CHTML bundle on jsDelivr.
pub const DEFAULT_MATHJAX_URL: &str = "https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-chtml.js";

/// Configuration for a Markdown-to-HTML conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use mdprint::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .title("Lecture notes")
///     .lang("en")
///     .theme("InspiredGitHub")
///     .build()
///     .unwrap();
/// assert_eq!(config.lang, "en");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Text of the `<title>` element. Default: [`DEFAULT_TITLE`].
    pub title: String,

    /// Use the first level-1 heading as the title when the document has one.
    /// Default: false.
    pub title_from_heading: bool,

    /// Value of `<html lang="…">`. Default: [`DEFAULT_LANG`].
    pub lang: String,

    /// Name of a bundled syntect theme. Default: [`DEFAULT_THEME`].
    ///
    /// See [`crate::available_themes`] for the accepted names.
    pub theme: String,

    /// Class of the `<div>` around code blocks; all theme rules are nested
    /// under it. Default: [`DEFAULT_SCOPE_CLASS`].
    pub scope_class: String,

    /// `src` of the MathJax `<script>` tag. Default: [`DEFAULT_MATHJAX_URL`].
    pub mathjax_url: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            title_from_heading: false,
            lang: DEFAULT_LANG.to_string(),
            theme: DEFAULT_THEME.to_string(),
            scope_class: DEFAULT_SCOPE_CLASS.to_string(),
            mathjax_url: DEFAULT_MATHJAX_URL.to_string(),
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Pick the document title: the first H1 when requested and present,
    /// otherwise the configured title.
    pub fn resolve_title<'a>(&'a self, heading: Option<&'a str>) -> &'a str {
        match heading {
            Some(h) if self.title_from_heading && !h.trim().is_empty() => h.trim(),
            _ => &self.title,
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn title_from_heading(mut self, v: bool) -> Self {
        self.config.title_from_heading = v;
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.config.lang = lang.into();
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.config.theme = theme.into();
        self
    }

    pub fn scope_class(mut self, class: impl Into<String>) -> Self {
        self.config.scope_class = class.into();
        self
    }

    pub fn mathjax_url(mut self, url: impl Into<String>) -> Self {
        self.config.mathjax_url = url.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, MdPrintError> {
        let c = &self.config;
        if c.title.trim().is_empty() {
            return Err(MdPrintError::InvalidConfig("Title must not be empty".into()));
        }
        if c.lang.trim().is_empty() {
            return Err(MdPrintError::InvalidConfig(
                "Document language must not be empty".into(),
            ));
        }
        if !is_css_identifier(&c.scope_class) {
            return Err(MdPrintError::InvalidConfig(format!(
                "Scope class '{}' is not a valid CSS class name",
                c.scope_class
            )));
        }
        if !highlight::has_theme(&c.theme) {
            return Err(MdPrintError::InvalidConfig(format!(
                "Unknown highlighting theme '{}'. Available: {}",
                c.theme,
                highlight::theme_names().join(", ")
            )));
        }
        if c.mathjax_url.trim().is_empty() {
            return Err(MdPrintError::InvalidConfig(
                "MathJax URL must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Conservative check: ASCII letter first, then letters, digits, `-` or `_`.
fn is_css_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
