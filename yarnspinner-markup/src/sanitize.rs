//! Validation for values interpolated into inline `style` attributes.
//!
//! Only `[color]` and `[size]` arguments and configured speaker colors reach
//! a style attribute, and all of them pass through here first.

use crate::error::{MarkupError, MarkupResult};
use regex::Regex;
use std::sync::OnceLock;

const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "currentcolor", "cyan",
    "darkblue", "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "transparent", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen",
];

/// Quotes are tolerated around values (`[color="red"]`) and dropped.
fn strip_quotes(value: &str) -> String {
    value.trim().chars().filter(|c| *c != '"' && *c != '\'').collect()
}

/// Sanitizes a CSS color: `#RGB`, `#RRGGBB`, `#RRGGBBAA`, a CSS color keyword,
/// or `rgb()`/`rgba()`/`hsl()`/`hsla()` with numeric arguments.
pub fn sanitize_color(value: &str) -> MarkupResult<String> {
    static HEX_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();
    static FUNC_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();
    let hex_regex = HEX_COLOR_REGEX.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap()
    });
    let func_regex = FUNC_COLOR_REGEX.get_or_init(|| {
        Regex::new(r"^(?i:rgb|rgba|hsl|hsla)\([0-9.,% ]+\)$").unwrap()
    });

    let cleaned = strip_quotes(value);
    let keyword = cleaned.to_ascii_lowercase();

    if hex_regex.is_match(&cleaned)
        || NAMED_COLORS.binary_search(&keyword.as_str()).is_ok()
        || func_regex.is_match(&cleaned)
    {
        Ok(cleaned)
    } else {
        Err(MarkupError::InvalidColor {
            value: value.to_string(),
            reason: "must be a hex color (#rgb, #rrggbb, #rrggbbaa), a CSS color name, or rgb()/rgba()/hsl()/hsla()".to_string(),
        })
    }
}

/// Sanitizes a font size: a non-negative decimal with an optional
/// `px`, `em`, `rem` or `%` unit.
pub fn sanitize_size(value: &str) -> MarkupResult<String> {
    static SIZE_REGEX: OnceLock<Regex> = OnceLock::new();
    let size_regex = SIZE_REGEX
        .get_or_init(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?(?:px|em|rem|%)?$").unwrap());

    let cleaned = strip_quotes(value);
    if size_regex.is_match(&cleaned) {
        Ok(cleaned)
    } else {
        Err(MarkupError::InvalidSize {
            value: value.to_string(),
        })
    }
}

/// Extracts the argument of `[color=red]` / `[color red]` style tags: the
/// text after the first `=` if there is one, else the whole trimmed string.
pub fn extract_argument(raw_args: &str) -> Option<&str> {
    let trimmed = raw_args.trim();
    let value = match trimmed.find('=') {
        Some(eq) => trimmed[eq + 1..].trim(),
        None => trimmed,
    };
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_are_sorted() {
        assert!(NAMED_COLORS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sanitize_color() {
        assert_eq!(sanitize_color("#f00").unwrap(), "#f00");
        assert_eq!(sanitize_color("#FF0000").unwrap(), "#FF0000");
        assert_eq!(sanitize_color("#ff000080").unwrap(), "#ff000080");
        assert_eq!(sanitize_color("Red").unwrap(), "Red");
        assert_eq!(sanitize_color("\"teal\"").unwrap(), "teal");
        assert_eq!(sanitize_color("rgb(255, 0, 0)").unwrap(), "rgb(255, 0, 0)");
        assert_eq!(sanitize_color("hsla(120,50%,50%,0.3)").unwrap(), "hsla(120,50%,50%,0.3)");
        assert!(sanitize_color("#ff00").is_err());
        assert!(sanitize_color("notacolor").is_err());
        assert!(sanitize_color("red;background:url(x)").is_err());
        assert!(sanitize_color("rgb(1,2,3);x").is_err());
        assert!(sanitize_color("url(javascript:1)").is_err());
        assert!(matches!(
            sanitize_color("nope"),
            Err(MarkupError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_sanitize_size() {
        assert_eq!(sanitize_size("12").unwrap(), "12");
        assert_eq!(sanitize_size("1.5em").unwrap(), "1.5em");
        assert_eq!(sanitize_size("'150%'").unwrap(), "150%");
        assert_eq!(sanitize_size("2rem").unwrap(), "2rem");
        assert!(sanitize_size("-3px").is_err());
        assert!(sanitize_size("12pt").is_err());
        assert!(sanitize_size(".5em").is_err());
        assert!(sanitize_size("12px;color:red").is_err());
    }

    #[test]
    fn test_extract_argument() {
        assert_eq!(extract_argument("=red"), Some("red"));
        assert_eq!(extract_argument(" = red "), Some("red"));
        assert_eq!(extract_argument(" red"), Some("red"));
        assert_eq!(extract_argument("value=#fff"), Some("#fff"));
        assert_eq!(extract_argument(""), None);
        assert_eq!(extract_argument("= "), None);
    }
}
