//! Tag renderer registry.
//!
//! Maps a bracket tag name to the HTML fragments it opens and closes with.
//! Names fall into two disjoint tables: *formatting* tags, which map to a
//! stable HTML style, and *effect* tags, which map to an animation class.
//! Lookup is case-insensitive and checks formatting first.

use crate::sanitize::{extract_argument, sanitize_color, sanitize_size};
use crate::tokenizer::tokenize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Which table a tag name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCategory {
    Formatting,
    Effect,
}

#[derive(Debug, Clone, Copy)]
enum OpenRule {
    /// Arguments are ignored.
    Fixed(&'static str),
    Color,
    Size,
    /// Effect name, rendered as a `text-effect-{name}` class.
    Effect(&'static str),
}

/// Open and close rule for one tag name.
#[derive(Debug, Clone, Copy)]
pub struct TagRenderer {
    open: OpenRule,
    pub close: &'static str,
}

impl TagRenderer {
    const fn simple(open: &'static str, close: &'static str) -> Self {
        Self {
            open: OpenRule::Fixed(open),
            close,
        }
    }

    const fn span(open: OpenRule) -> Self {
        Self {
            open,
            close: "</span>",
        }
    }

    /// Opening fragment for the given raw arguments, or `None` when the
    /// arguments fail validation and the tag must be shown literally.
    pub fn open(&self, raw_args: &str) -> Option<Cow<'static, str>> {
        match self.open {
            OpenRule::Fixed(html) => Some(Cow::Borrowed(html)),
            OpenRule::Color => {
                let color = sanitize_color(extract_argument(raw_args)?).ok()?;
                Some(Cow::Owned(format!("<span style=\"color:{};\">", color)))
            }
            OpenRule::Size => {
                let size = sanitize_size(extract_argument(raw_args)?).ok()?;
                Some(Cow::Owned(format!("<span style=\"font-size:{};\">", size)))
            }
            OpenRule::Effect(name) => Some(Cow::Owned(format!(
                "<span class=\"text-effect text-effect-{}\">",
                name
            ))),
        }
    }
}

const UNDERLINE_OPEN: &str = "<span style=\"text-decoration:underline;\">";
const STRIKE_OPEN: &str = "<span style=\"text-decoration:line-through;\">";

/// Effect tag names, in the order their stylesheet rules are emitted.
pub const EFFECT_NAMES: &[&str] = &["wave", "bounce", "shake", "rainbow", "glitch"];

/// The two renderer tables.
#[derive(Debug)]
pub struct TagRegistry {
    formatting: HashMap<&'static str, TagRenderer>,
    effects: HashMap<&'static str, TagRenderer>,
}

impl TagRegistry {
    /// The built-in vocabulary.
    pub fn standard() -> &'static TagRegistry {
        static REGISTRY: OnceLock<TagRegistry> = OnceLock::new();
        REGISTRY.get_or_init(TagRegistry::build)
    }

    fn build() -> Self {
        let mut formatting = HashMap::new();
        for name in ["b", "bold", "strong"] {
            formatting.insert(name, TagRenderer::simple("<strong>", "</strong>"));
        }
        for name in ["i", "em", "italic"] {
            formatting.insert(name, TagRenderer::simple("<em>", "</em>"));
        }
        for name in ["u", "underline"] {
            formatting.insert(name, TagRenderer::simple(UNDERLINE_OPEN, "</span>"));
        }
        for name in ["s", "strike", "strikethrough"] {
            formatting.insert(name, TagRenderer::simple(STRIKE_OPEN, "</span>"));
        }
        formatting.insert("code", TagRenderer::simple("<code>", "</code>"));
        formatting.insert("sup", TagRenderer::simple("<sup>", "</sup>"));
        formatting.insert("sub", TagRenderer::simple("<sub>", "</sub>"));
        formatting.insert("color", TagRenderer::span(OpenRule::Color));
        formatting.insert("size", TagRenderer::span(OpenRule::Size));

        let effects = EFFECT_NAMES
            .iter()
            .map(|&name| (name, TagRenderer::span(OpenRule::Effect(name))))
            .collect();

        Self {
            formatting,
            effects,
        }
    }

    /// Finds the renderer for `name` (any case), formatting table first.
    pub fn lookup(&self, name: &str) -> Option<(TagCategory, &TagRenderer)> {
        let key = name.to_ascii_lowercase();
        self.formatting
            .get(key.as_str())
            .map(|r| (TagCategory::Formatting, r))
            .or_else(|| {
                self.effects
                    .get(key.as_str())
                    .map(|r| (TagCategory::Effect, r))
            })
    }

    pub fn category(&self, name: &str) -> Option<TagCategory> {
        self.lookup(name).map(|(category, _)| category)
    }

    /// Resolves one tag to its HTML fragment.
    ///
    /// Returns `None` when the name is unknown, or when an opening tag is
    /// disabled or has invalid arguments. The caller then emits the bracket
    /// text literally. Closing tags of known names always resolve.
    pub fn resolve(
        &self,
        name: &str,
        is_closing: bool,
        raw_args: &str,
        enabled: bool,
    ) -> Option<Cow<'static, str>> {
        let (_, renderer) = self.lookup(name)?;
        if is_closing {
            return Some(Cow::Borrowed(renderer.close));
        }
        if !enabled {
            return None;
        }
        renderer.open(raw_args)
    }

    /// Removes every recognized non-formatting tag from `line`, brackets and
    /// arguments included. Formatting tags are kept verbatim, and bracket
    /// text the tokenizer does not match is left alone.
    pub fn strip_tags(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        for token in tokenize(line) {
            out.push_str(token.literal);
            if let Some(tag) = token.tag {
                if self.category(tag.name) == Some(TagCategory::Formatting) {
                    out.push_str(tag.raw);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(name: &str, closing: bool, args: &str) -> Option<String> {
        TagRegistry::standard()
            .resolve(name, closing, args, true)
            .map(Cow::into_owned)
    }

    #[test]
    fn simple_tags_map_to_semantic_html() {
        assert_eq!(resolve("b", false, "").as_deref(), Some("<strong>"));
        assert_eq!(resolve("STRONG", false, "").as_deref(), Some("<strong>"));
        assert_eq!(resolve("italic", true, "").as_deref(), Some("</em>"));
        assert_eq!(resolve("u", false, "").as_deref(), Some(UNDERLINE_OPEN));
        assert_eq!(resolve("strikethrough", false, "").as_deref(), Some(STRIKE_OPEN));
        assert_eq!(resolve("sup", false, "ignored").as_deref(), Some("<sup>"));
    }

    #[test]
    fn color_and_size_take_arguments() {
        assert_eq!(
            resolve("color", false, "=#ff0000").as_deref(),
            Some("<span style=\"color:#ff0000;\">")
        );
        assert_eq!(
            resolve("Color", false, " red").as_deref(),
            Some("<span style=\"color:red;\">")
        );
        assert_eq!(
            resolve("size", false, "=14px").as_deref(),
            Some("<span style=\"font-size:14px;\">")
        );
        assert_eq!(resolve("color", false, "=notacolor"), None);
        assert_eq!(resolve("color", false, ""), None);
        assert_eq!(resolve("size", false, "=big"), None);
    }

    #[test]
    fn effects_render_classes() {
        assert_eq!(
            resolve("wave", false, "").as_deref(),
            Some("<span class=\"text-effect text-effect-wave\">")
        );
        assert_eq!(resolve("glitch", true, "").as_deref(), Some("</span>"));
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert_eq!(resolve("blink", false, ""), None);
        assert_eq!(resolve("blink", true, ""), None);
    }

    #[test]
    fn disabled_suppresses_openers_only() {
        let registry = TagRegistry::standard();
        assert!(registry.resolve("b", false, "", false).is_none());
        assert!(registry.resolve("wave", false, "", false).is_none());
        assert_eq!(registry.resolve("b", true, "", false).as_deref(), Some("</strong>"));
    }

    #[test]
    fn categories_are_disjoint() {
        let registry = TagRegistry::standard();
        assert_eq!(registry.category("Bold"), Some(TagCategory::Formatting));
        assert_eq!(registry.category("color"), Some(TagCategory::Formatting));
        assert_eq!(registry.category("rainbow"), Some(TagCategory::Effect));
        assert_eq!(registry.category("pause"), None);
        for name in EFFECT_NAMES {
            assert!(!registry.formatting.contains_key(name));
        }
    }

    #[test]
    fn strip_keeps_formatting_tags() {
        let registry = TagRegistry::standard();
        assert_eq!(
            registry.strip_tags("[b]Hi[/b] [wave]there[/wave] [pause=500/]now [ not a tag]"),
            "[b]Hi[/b] there now [ not a tag]"
        );
    }
}
