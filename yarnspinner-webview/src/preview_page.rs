//! Line enhancement for the standalone dialogue preview page.

use std::collections::HashSet;
use yarnspinner_markup::escape::NBSP;
use yarnspinner_markup::{PreviewOptions, PreviewSession};

/// One `.preview-line` element on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineElement {
    pub id: String,
    /// Raw line text as written by the host.
    pub text: String,
    /// Rendered markup once enhanced.
    pub html: Option<String>,
}

impl LineElement {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            html: None,
        }
    }
}

pub struct LineEnhancer {
    session: PreviewSession,
    enhanced: HashSet<String>,
}

impl LineEnhancer {
    pub fn new(options: PreviewOptions) -> Self {
        Self {
            session: PreviewSession::new(options),
            enhanced: HashSet::new(),
        }
    }

    pub fn is_enhanced(&self, id: &str) -> bool {
        self.enhanced.contains(id)
    }

    /// Renders the element unless it was already enhanced. Returns whether
    /// anything changed.
    pub fn enhance(&mut self, element: &mut LineElement) -> bool {
        if !self.enhanced.insert(element.id.clone()) {
            return false;
        }
        let html = self.session.render_line(&element.text);
        element.html = Some(if html.is_empty() { NBSP.to_string() } else { html });
        true
    }

    /// Enhances every line present when the page loads.
    pub fn enhance_existing(&mut self, elements: &mut [LineElement]) -> usize {
        let count = self.enhance_all(elements);
        log::debug!("enhanced {} preview lines", count);
        count
    }

    /// Enhances lines inserted after load.
    pub fn on_added(&mut self, elements: &mut [LineElement]) -> usize {
        self.enhance_all(elements)
    }

    fn enhance_all(&mut self, elements: &mut [LineElement]) -> usize {
        let mut count = 0;
        for element in elements.iter_mut() {
            if self.enhance(element) {
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enhances_each_line_once() {
        let mut enhancer = LineEnhancer::new(PreviewOptions::default());
        let mut line = LineElement::new("l1", "[b]Hi[/b]");

        assert!(enhancer.enhance(&mut line));
        assert_eq!(line.html.as_deref(), Some("<strong>Hi</strong>"));

        line.text = "changed".to_string();
        assert!(!enhancer.enhance(&mut line));
        assert_eq!(line.html.as_deref(), Some("<strong>Hi</strong>"));
        assert!(enhancer.is_enhanced("l1"));
    }

    #[test]
    fn empty_lines_get_placeholder() {
        let mut enhancer = LineEnhancer::new(PreviewOptions::default());
        let mut line = LineElement::new("blank", "");
        enhancer.enhance(&mut line);
        assert_eq!(line.html.as_deref(), Some("&nbsp;"));
    }

    #[test]
    fn existing_then_added() {
        let mut enhancer = LineEnhancer::new(PreviewOptions::default());
        let mut existing = vec![LineElement::new("a", "one"), LineElement::new("b", "two")];
        assert_eq!(enhancer.enhance_existing(&mut existing), 2);

        let mut added = vec![LineElement::new("b", "two"), LineElement::new("c", "-> three")];
        assert_eq!(enhancer.on_added(&mut added), 1);
        assert_eq!(added[0].html, None);
        assert_eq!(
            added[1].html.as_deref(),
            Some("<span class=\"choice-line\">three</span>")
        );
    }
}
