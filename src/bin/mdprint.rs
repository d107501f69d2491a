//! CLI binary for mdprint.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and prints the status lines.

use anyhow::{Context, Result};
use clap::Parser;
use mdprint::{available_themes, convert_to_file, default_output_path, ConversionConfig, MdPrintError};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn paint(code: &str, s: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{code}m{s}\x1b[0m")
    } else {
        s.to_string()
    }
}
fn red(s: &str) -> String {
    paint("31", s)
}
fn bold(s: &str) -> String {
    paint("1", s)
}
fn dim(s: &str) -> String {
    paint("2", s)
}

const AFTER_HELP: &str = r##"EXAMPLES:
  # Convert next to the source (notes.md → notes.html)
  mdprint notes.md

  # Choose the output file and page title
  mdprint notes.md -o printable.html --title "Lecture 3"

  # Use the first "# Heading" as the title, light code theme
  mdprint notes.md --title-from-heading --theme InspiredGitHub

  # Paths with spaces, backslashes or non-ASCII characters must be quoted
  mdprint "C:\Users\me\Desktop\1. 核心痛点分析 (Why).md"

  # List bundled highlighting themes
  mdprint --list-themes

PRINTING:
  Open the generated file in a browser, wait for the formulas to render,
  then use Print → Save as PDF. Code blocks and headings avoid page breaks.

ENVIRONMENT VARIABLES:
  MDPRINT_OUTPUT, MDPRINT_TITLE, MDPRINT_LANG, MDPRINT_THEME,
  MDPRINT_MATHJAX_URL    Defaults for the matching flags
  RUST_LOG               Override the log filter (e.g. mdprint=debug)
"##;

/// Convert Markdown into print-friendly HTML with math and highlighted code.
#[derive(Parser, Debug)]
#[command(
    name = "mdprint",
    version,
    about = "Convert Markdown into self-contained, print-friendly HTML",
    long_about = "Convert a Markdown file into a single HTML document with MathJax math, \
syntax-highlighted code blocks and print-media styling. Open the result in a browser \
and print it to PDF.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown file to convert.
    #[arg(required_unless_present = "list_themes")]
    input: Option<PathBuf>,

    /// Write HTML to this file. Default: the input path with `.html`.
    #[arg(short, long, env = "MDPRINT_OUTPUT")]
    output: Option<PathBuf>,

    /// Document title.
    #[arg(long, env = "MDPRINT_TITLE", default_value = mdprint::config::DEFAULT_TITLE)]
    title: String,

    /// Use the first level-1 heading as the title when present.
    #[arg(long, env = "MDPRINT_TITLE_FROM_HEADING")]
    title_from_heading: bool,

    /// Value of the `lang` attribute on `<html>`.
    #[arg(long, env = "MDPRINT_LANG", default_value = mdprint::config::DEFAULT_LANG)]
    lang: String,

    /// Highlighting theme (see --list-themes).
    #[arg(long, env = "MDPRINT_THEME", default_value = mdprint::config::DEFAULT_THEME)]
    theme: String,

    /// URL of the MathJax 3 script.
    #[arg(long, env = "MDPRINT_MATHJAX_URL", default_value = mdprint::config::DEFAULT_MATHJAX_URL)]
    mathjax_url: String,

    /// Print the bundled highlighting themes and exit.
    #[arg(long)]
    list_themes: bool,

    /// Print conversion statistics as JSON instead of the status lines.
    #[arg(long, env = "MDPRINT_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MDPRINT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MDPRINT_QUIET", conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The status lines are the user-facing output; library logs stay at
    // WARN unless asked for.
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Theme listing ────────────────────────────────────────────────────
    if cli.list_themes {
        for name in available_themes() {
            println!("{name}");
        }
        return Ok(());
    }

    let Some(input) = cli.input.clone() else {
        anyhow::bail!("No input file given");
    };
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&input));

    let config = build_config(&cli)?;

    // ── Run conversion ───────────────────────────────────────────────────
    let stats = match convert_to_file(&input, &output, &config) {
        Ok(stats) => stats,
        Err(MdPrintError::InputNotFound { path }) => {
            report_missing_input(&path);
            return Ok(());
        }
        Err(e) => return Err(e).context("Conversion failed"),
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialise statistics")?
        );
    } else if !cli.quiet {
        let resolved = std::path::absolute(&output).unwrap_or_else(|_| output.clone());
        let [done, hint] = success_lines(&resolved, &bold, &dim);
        println!("{done}");
        println!("{hint}");
    }

    Ok(())
}

/// The guarded failure: say which path is missing and how paths usually go
/// wrong, then let the process exit normally.
fn report_missing_input(path: &Path) {
    let [error, hint] = missing_input_lines(path);
    println!("{}", red(&error));
    println!("{hint}");
}

fn missing_input_lines(path: &Path) -> [String; 2] {
    [
        format!("❌ Error: file not found: {}", path.display()),
        "💡 Hint: check the path for typos, and quote paths that contain spaces, \
backslashes or non-ASCII characters"
            .to_string(),
    ]
}

/// `output` is the resolved output path; the hint names only its file name.
fn success_lines(
    output: &Path,
    emphasise: &dyn Fn(&str) -> String,
    soften: &dyn Fn(&str) -> String,
) -> [String; 2] {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| output.display().to_string());
    [
        format!(
            "✅ Converted successfully: {}",
            emphasise(&output.display().to_string())
        ),
        format!("👉 Open {} in a browser to view and print it", soften(&name)),
    ]
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli) -> Result<ConversionConfig> {
    ConversionConfig::builder()
        .title(&cli.title)
        .title_from_heading(cli.title_from_heading)
        .lang(&cli.lang)
        .theme(&cli.theme)
        .mathjax_url(&cli.mathjax_url)
        .build()
        .context("Invalid configuration")
}
