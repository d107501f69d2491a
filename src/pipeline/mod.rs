//! Pipeline stages for Markdown-to-HTML conversion.
//!
//! Each submodule implements one transformation step and is tested on its
//! own.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ math ──▶ markdown ──▶ highlight ──▶ template
//! (read)   (delims)  (events)     (syntect)     (document)
//! ```
//!
//! 1. [`input`]: existence check and UTF-8 decode of the source file
//! 2. [`math`]: rewrite `\(…\)` / `\[…\]` into `$` form outside code
//! 3. [`markdown`]: pulldown-cmark events → HTML fragment
//! 4. [`highlight`]: syntect token classes and the scoped theme stylesheet
//! 5. [`template`]: interpolate fragment and stylesheet into the skeleton

pub mod highlight;
pub mod input;
pub mod markdown;
pub mod math;
pub mod template;
