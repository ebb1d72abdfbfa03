//! Whole-node formatting: line filters, command stripping and joining.

use crate::escape::is_blank_placeholder;
use crate::line::{format_line, is_choice_html};
use crate::options::PreviewOptions;
use crate::registry::TagRegistry;
use crate::speaker::SpeakerColors;
use regex::Regex;
use std::sync::OnceLock;

/// Separator between formatted lines.
pub const LINE_BREAK: &str = "<br/>";

/// Node-body delimiter that never appears in a preview.
pub const BODY_DELIMITER: &str = "===";

fn command_pattern() -> &'static Regex {
    static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();
    COMMAND_REGEX.get_or_init(|| Regex::new(r"<<[^>]+>>").unwrap())
}

fn whitespace_pattern() -> &'static Regex {
    static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Splits on `\n` and `\r\n`. Unlike [`str::lines`] a trailing newline
/// yields a final empty line, which previews as a blank row.
pub fn split_lines(body: &str) -> impl Iterator<Item = &str> {
    body.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

pub fn is_comment(line: &str) -> bool {
    line.trim().starts_with("//")
}

/// Removes `<<command>>` spans and non-formatting tags, then collapses
/// whitespace. Returns `None` when nothing is left.
pub fn strip_commands(line: &str) -> Option<String> {
    let without_tags = TagRegistry::standard().strip_tags(line);
    let without_commands = command_pattern().replace_all(&without_tags, "");
    let collapsed = whitespace_pattern().replace_all(&without_commands, " ");
    let trimmed = collapsed.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Applies the line filters of `options` to a node body, returning the
/// lines that survive in order.
pub fn filter_lines(body: &str, options: &PreviewOptions) -> Vec<String> {
    split_lines(body)
        .filter(|line| !(options.hide_comments && is_comment(line)))
        .filter(|line| *line != BODY_DELIMITER)
        .filter_map(|line| {
            if options.hide_commands {
                strip_commands(line)
            } else {
                Some(line.to_string())
            }
        })
        .collect()
}

/// Formats a whole node body into `<br/>`-joined preview HTML.
pub fn format_document(body: &str, speakers: &mut SpeakerColors, options: &PreviewOptions) -> String {
    let formatted: Vec<String> = filter_lines(body, options)
        .iter()
        .map(|line| format_line(line, speakers, options))
        .collect();
    collapse_choice_gaps(formatted).join(LINE_BREAK)
}

/// Drops a blank placeholder line that directly follows a choice line.
fn collapse_choice_gaps(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        let after_choice = out.last().is_some_and(|prev| is_choice_html(prev));
        if after_choice && is_blank_placeholder(&line) {
            continue;
        }
        out.push(line);
    }
    out
}
