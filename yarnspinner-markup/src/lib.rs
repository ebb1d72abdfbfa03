//! # Yarn Spinner dialogue preview markup
//!
//! Renders the body of a Yarn Spinner node as HTML for the node graph and
//! the standalone preview page.
//!
//! ## Features
//! - Bracket tag markup (`[b]`, `[color=#f00]`, `[wave]`, ...) rendered to safe HTML
//! - Speaker labels with configured or automatically assigned colors
//! - Choice lines (`-> Option`) and indentation preserved
//! - Optional hiding of `//` comments and `<<commands>>`
//!
//! Story text is always escaped. A tag that is unknown, disabled, or has an
//! invalid argument is shown as written instead of being dropped.
//!
//! ## Example
//! ```ignore
//! use yarnspinner_markup::{PreviewOptions, PreviewSession};
//!
//! let mut session = PreviewSession::new(PreviewOptions::default());
//! let html = session.render_document("Alice: [b]Hello[/b]\n-> Wave back");
//! ```

pub mod document;
pub mod error;
pub mod escape;
pub mod line;
pub mod options;
pub mod registry;
pub mod sanitize;
pub mod session;
pub mod speaker;
pub mod styles;
pub mod tokenizer;

// --- Core types ---
pub use error::{MarkupError, MarkupResult};
pub use options::PreviewOptions;
pub use registry::{TagCategory, TagRegistry, TagRenderer};
pub use session::PreviewSession;
pub use speaker::SpeakerColors;
pub use tokenizer::{tokenize, Tag, Token, Tokens};

/// Render one line with a throwaway session.
pub fn render_line(line: &str, options: &PreviewOptions) -> String {
    PreviewSession::new(options.clone()).render_line(line)
}

/// Render a node body with a throwaway session.
pub fn render_document(body: &str, options: &PreviewOptions) -> String {
    PreviewSession::new(options.clone()).render_document(body)
}
