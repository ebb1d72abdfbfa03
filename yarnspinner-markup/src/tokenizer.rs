//! Single-pass bracket tag tokenizer.
//!
//! Splits a line into runs of literal text, each optionally followed by a
//! candidate tag such as `[b]`, `[/wave]` or `[color=#f00]`. The tokenizer
//! does no semantic checks; an unknown name is still a [`Tag`] here and is
//! rejected later by the registry.

use regex::Regex;
use std::sync::OnceLock;

/// A bracket tag found by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Tag name as written (compare case-insensitively).
    pub name: &'a str,
    pub is_closing: bool,
    /// Everything between the name and the closing bracket, untrimmed.
    pub raw_args: &'a str,
    /// The full bracket text, e.g. `[color=red]`.
    pub raw: &'a str,
}

impl Tag<'_> {
    /// Lowercased name for registry lookups.
    pub fn key(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}

/// Literal text followed by the tag that ended it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub literal: &'a str,
    pub tag: Option<Tag<'a>>,
}

fn tag_pattern() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(r"\[(/?)([a-zA-Z0-9_-]+)([^\]]*)\]").unwrap())
}

/// Lazy token stream over one line. Cloning restarts from the clone point.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    line: &'a str,
    pos: usize,
}

/// Tokenizes `line`. Concatenating every token's literal and raw tag text
/// reproduces the line exactly.
pub fn tokenize(line: &str) -> Tokens<'_> {
    Tokens { line, pos: 0 }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.pos >= self.line.len() {
            return None;
        }
        let line = self.line;
        match tag_pattern().captures_at(line, self.pos) {
            Some(caps) => {
                // Group 0 always participates in a match.
                let whole = caps.get(0)?;
                let tag = Tag {
                    name: caps.get(2).map_or("", |m| m.as_str()),
                    is_closing: caps.get(1).is_some_and(|m| !m.is_empty()),
                    raw_args: caps.get(3).map_or("", |m| m.as_str()),
                    raw: whole.as_str(),
                };
                let literal = &line[self.pos..whole.start()];
                self.pos = whole.end();
                Some(Token {
                    literal,
                    tag: Some(tag),
                })
            }
            None => {
                let literal = &line[self.pos..];
                self.pos = line.len();
                Some(Token { literal, tag: None })
            }
        }
    }
}
