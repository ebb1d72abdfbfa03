//! HTML escaping for story text.
//!
//! Story text is escaped exactly once. An ampersand that already starts a
//! character reference (`&amp;`, `&#39;`, `&#x27;`) is left alone so text
//! that arrives pre-escaped does not come out as `&amp;amp;`.

/// Non-breaking space entity used for indentation and blank-line placeholders.
pub const NBSP: &str = "&nbsp;";

/// Escapes `&`, `<`, `>`, `"` and `'` for use in element content or a quoted attribute.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for (i, ch) in s.char_indices() {
        match ch {
            '&' if entity_len(&s[i + 1..]).is_some() => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Length of a character reference body (`name;`, `#123;`, `#x1F;`) at the
/// start of `rest`, the text following an ampersand.
fn entity_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let (start, accept): (usize, fn(u8) -> bool) = match bytes {
        [b'#', b'x' | b'X', ..] => (2, |b: u8| b.is_ascii_hexdigit()),
        [b'#', ..] => (1, |b: u8| b.is_ascii_digit()),
        [first, ..] if first.is_ascii_alphabetic() => (0, |b: u8| b.is_ascii_alphanumeric()),
        _ => return None,
    };
    let body = bytes[start..]
        .iter()
        .take(32)
        .take_while(|&&b| accept(b))
        .count();
    if body == 0 {
        return None;
    }
    let end = start + body;
    (bytes.get(end) == Some(&b';')).then_some(end + 1)
}

/// Converts a leading whitespace run to non-breaking spaces: a tab becomes
/// four, a space becomes one. Other whitespace is kept as is.
pub fn convert_whitespace(leading: &str) -> String {
    let mut out = String::with_capacity(leading.len() * NBSP.len());
    for ch in leading.chars() {
        match ch {
            '\t' => {
                for _ in 0..4 {
                    out.push_str(NBSP);
                }
            }
            ' ' => out.push_str(NBSP),
            other => out.push(other),
        }
    }
    out
}

/// True when `html` consists only of `&nbsp;` entities (at least one).
pub fn is_blank_placeholder(html: &str) -> bool {
    !html.is_empty() && html.len() % NBSP.len() == 0 && html.split(NBSP).all(str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn leaves_existing_references_alone() {
        assert_eq!(escape_html("&amp;"), "&amp;");
        assert_eq!(escape_html("&#39; &#x27;"), "&#39; &#x27;");
        assert_eq!(escape_html("fish &chips"), "fish &amp;chips");
        assert_eq!(escape_html("&#;"), "&amp;#;");
        assert_eq!(escape_html("a & b;"), "a &amp; b;");
    }

    #[test]
    fn escaping_twice_is_stable() {
        let once = escape_html("<b> & \"q\"");
        assert_eq!(escape_html(&once), once);
    }

    #[test]
    fn handles_multibyte_text() {
        assert_eq!(escape_html("café — ok"), "café — ok");
    }

    #[test]
    fn converts_tabs_and_spaces() {
        assert_eq!(convert_whitespace(" \t"), "&nbsp;".repeat(5));
        assert_eq!(convert_whitespace(""), "");
        assert_eq!(convert_whitespace("\u{3000} "), "\u{3000}&nbsp;");
    }

    #[test]
    fn detects_blank_placeholders() {
        assert!(is_blank_placeholder("&nbsp;"));
        assert!(is_blank_placeholder("&nbsp;&nbsp;"));
        assert!(!is_blank_placeholder(""));
        assert!(!is_blank_placeholder("&nbsp;x"));
    }
}
