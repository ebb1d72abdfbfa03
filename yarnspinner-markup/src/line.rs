//! Per-line formatting: indentation, choice lines, speaker labels and tags.

use crate::escape::{convert_whitespace, escape_html, NBSP};
use crate::options::PreviewOptions;
use crate::registry::TagRegistry;
use crate::speaker::SpeakerColors;
use crate::tokenizer::tokenize;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

pub const CHOICE_MARKER: &str = "->";
pub const CHOICE_OPEN: &str = "<span class=\"choice-line\">";

/// Renders tagged text to HTML.
///
/// Text outside tags is escaped. A tag that does not resolve is escaped and
/// shown as written. Closers pair with the innermost open tag of the same
/// name: closing a rejected opener is shown as written too, so a rejected
/// `[color=bogus]..[/color]` pair shows up whole. Closers with nothing open
/// are emitted anyway. With `enabled` off the text is escaped as is.
pub fn render_content(text: &str, enabled: bool) -> String {
    if !enabled {
        return escape_html(text);
    }
    let registry = TagRegistry::standard();
    let mut out = String::with_capacity(text.len() + 16);
    // Per tag name, whether each still-open opener was rendered.
    let mut open: HashMap<String, Vec<bool>> = HashMap::new();

    for token in tokenize(text) {
        out.push_str(&escape_html(token.literal));
        let Some(tag) = token.tag else {
            continue;
        };
        let key = tag.key();
        if tag.is_closing {
            let rendered = open.get_mut(&key).and_then(Vec::pop);
            if rendered == Some(false) {
                out.push_str(&escape_html(tag.raw));
                continue;
            }
        }
        let html = registry.resolve(&key, tag.is_closing, tag.raw_args, enabled);
        if !tag.is_closing && registry.lookup(&key).is_some() {
            open.entry(key).or_default().push(html.is_some());
        }
        match html {
            Some(html) => out.push_str(&html),
            None => out.push_str(&escape_html(tag.raw)),
        }
    }
    out
}

fn speaker_pattern() -> &'static Regex {
    static SPEAKER_REGEX: OnceLock<Regex> = OnceLock::new();
    SPEAKER_REGEX.get_or_init(|| Regex::new(r"^([^:]+):\s*").unwrap())
}

/// Formats one story line as HTML. Never returns an empty string.
pub fn format_line(line: &str, speakers: &mut SpeakerColors, options: &PreviewOptions) -> String {
    let render_effects = options.render_text_effects;
    if line.is_empty() {
        return NBSP.to_string();
    }
    let content = line.trim_start();
    let leading = convert_whitespace(&line[..line.len() - content.len()]);

    if content.is_empty() {
        return if leading.is_empty() {
            NBSP.to_string()
        } else {
            leading
        };
    }

    if let Some(choice) = content.strip_prefix(CHOICE_MARKER) {
        let html = render_content(choice.trim(), render_effects);
        let body = if html.is_empty() { NBSP } else { html.as_str() };
        return format!("{}{}{}</span>", leading, CHOICE_OPEN, body);
    }

    if let Some(caps) = speaker_pattern().captures(content) {
        let prefix_len = caps.get(0).map_or(0, |m| m.end());
        let name = caps.get(1).map_or("", |m| m.as_str()).trim();
        let label = speakers.render_label(name);
        let remainder = render_content(&content[prefix_len..], render_effects);
        let spacer = if remainder.is_empty() { "" } else { NBSP };
        return format!("{}{}{}{}", leading, label, spacer, remainder);
    }

    format!("{}{}", leading, render_content(content, render_effects))
}

/// True when `html` is a formatted choice line.
pub fn is_choice_html(html: &str) -> bool {
    let mut rest = html;
    while let Some(r) = rest.strip_prefix(NBSP) {
        rest = r;
    }
    rest.starts_with(CHOICE_OPEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speaker::{palette_index, PALETTE};

    fn line(text: &str) -> String {
        format_line(
            text,
            &mut SpeakerColors::new(HashMap::new(), false),
            &PreviewOptions::default(),
        )
    }

    #[test]
    fn bold_renders_strong() {
        assert_eq!(render_content("[b]Hi[/b]", true), "<strong>Hi</strong>");
    }

    #[test]
    fn rejected_color_stays_literal() {
        assert_eq!(
            render_content("[color=notacolor]text[/color]", true),
            "[color=notacolor]text[/color]"
        );
    }

    #[test]
    fn stray_closer_still_closes() {
        assert_eq!(render_content("a[/b]", true), "a</strong>");
        assert_eq!(
            render_content("[color=bad]x[/color][/color]", true),
            "[color=bad]x[/color]</span>"
        );
    }

    #[test]
    fn closers_pair_with_innermost_opener() {
        assert_eq!(
            render_content("[color=bad]a[color=red]b[/color]c[/color]", true),
            "[color=bad]a<span style=\"color:red;\">b</span>c[/color]"
        );
        assert_eq!(
            render_content("[color=red]a[color=bad]b[/color]c[/color]", true),
            "<span style=\"color:red;\">a[color=bad]b[/color]c</span>"
        );
    }

    #[test]
    fn unknown_tags_are_escaped_text() {
        assert_eq!(render_content("[blink]<hi>[/blink]", true), "[blink]&lt;hi&gt;[/blink]");
    }

    #[test]
    fn disabled_rendering_escapes_everything() {
        assert_eq!(render_content("[b]a & b[/b]", false), "[b]a &amp; b[/b]");
    }

    #[test]
    fn tag_arguments_are_escaped_when_literal() {
        assert_eq!(
            render_content("[color=\"><script>]x", true),
            "[color=&quot;&gt;&lt;script&gt;]x"
        );
    }

    #[test]
    fn choice_lines() {
        assert_eq!(line("-> Go home"), "<span class=\"choice-line\">Go home</span>");
        assert_eq!(
            line("-> [b]Go[/b] home"),
            "<span class=\"choice-line\"><strong>Go</strong> home</span>"
        );
        assert_eq!(line("->"), "<span class=\"choice-line\">&nbsp;</span>");
        assert_eq!(
            line("\t-> Stay"),
            "&nbsp;&nbsp;&nbsp;&nbsp;<span class=\"choice-line\">Stay</span>"
        );
    }

    #[test]
    fn speaker_lines() {
        let options = PreviewOptions::default();
        let mut speakers = SpeakerColors::new(HashMap::new(), true);
        let color = PALETTE[palette_index("bob")];
        assert_eq!(
            format_line("  Bob: [i]Hey[/i]", &mut speakers, &options),
            format!(
                "&nbsp;&nbsp;<span class=\"speaker-label\" style=\"color:{};\">Bob:</span>&nbsp;<em>Hey</em>",
                color
            )
        );
        assert_eq!(
            format_line("Bob:", &mut speakers, &options),
            format!("<span class=\"speaker-label\" style=\"color:{};\">Bob:</span>", color)
        );
    }

    #[test]
    fn plain_and_blank_lines() {
        assert_eq!(line("Just text & more"), "Just text &amp; more");
        assert_eq!(line(""), "&nbsp;");
        assert_eq!(line("  "), "&nbsp;&nbsp;");
    }

    #[test]
    fn unicode_leading_whitespace_is_kept() {
        assert_eq!(line("\u{00A0}\u{00A0}Hi"), "\u{00A0}\u{00A0}Hi");
        assert_eq!(line("\u{3000}Hi"), "\u{3000}Hi");
        assert_eq!(line(" \u{3000}"), "&nbsp;\u{3000}");
    }

    #[test]
    fn detects_choice_html() {
        assert!(is_choice_html(&line("-> a")));
        assert!(is_choice_html(&line("  -> a")));
        assert!(!is_choice_html(&line("a")));
    }
}
