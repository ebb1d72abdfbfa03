//! Node descriptors sent by the host, and the preprocessing applied before
//! they reach the canvas.

use serde::{Deserialize, Serialize};
use yarnspinner_markup::PreviewSession;

/// Header key holding a node's `x,y` canvas position.
pub const POSITION_HEADER: &str = "position";

/// Step between successive default positions on the diagonal.
pub const NEW_NODE_OFFSET: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Parses an `x,y` header value.
    pub fn parse(value: &str) -> Option<Self> {
        let (x, y) = value.split_once(',')?;
        let x: f64 = x.trim().parse().ok()?;
        let y: f64 = y.trim().parse().ok()?;
        (x.is_finite() && y.is_finite()).then_some(Self { x, y })
    }

    /// Formats as an `x,y` header value.
    pub fn to_header_value(&self) -> String {
        format!("{},{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeHeader {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeJump {
    pub destination_title: String,
}

/// One node as described by the host document model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source_title: Option<String>,
    #[serde(default)]
    pub unique_title: Option<String>,
    #[serde(default)]
    pub headers: Vec<NodeHeader>,
    #[serde(default)]
    pub jumps: Vec<NodeJump>,
    #[serde(default)]
    pub preview_text: String,
}

impl NodeInfo {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.key == key)
            .map(|h| h.value.as_str())
    }

    /// Canvas position from the `position` header, if present and well formed.
    pub fn position(&self) -> Option<Position> {
        let value = self.header(POSITION_HEADER)?;
        let position = Position::parse(value);
        if position.is_none() {
            log::warn!("node '{}' has malformed position '{}'", self.title, value);
        }
        position
    }

    /// Name used to address the node in host messages.
    pub fn id(&self) -> &str {
        self.unique_title.as_deref().unwrap_or(&self.title)
    }
}

/// Default position for the `index`-th node that has none.
pub fn default_position(index: usize) -> Position {
    let offset = NEW_NODE_OFFSET * index as f64;
    Position::new(offset, offset)
}

/// Copies the host's nodes for display: preview text is rendered to HTML
/// and nodes without a position get one on the diagonal, recorded as a
/// `position` header.
pub fn prepare_nodes(nodes: &[NodeInfo], session: &mut PreviewSession) -> Vec<NodeInfo> {
    let mut nodes_with_default_position = 0;
    nodes
        .iter()
        .map(|node| {
            let mut copy = node.clone();
            copy.preview_text = session.render_document(&node.preview_text);
            if copy.position().is_none() {
                let position = default_position(nodes_with_default_position);
                copy.headers.push(NodeHeader {
                    key: POSITION_HEADER.to_string(),
                    value: position.to_header_value(),
                });
                nodes_with_default_position += 1;
            }
            copy
        })
        .collect()
}

/// Entry in the "Jump to Node" dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpOption {
    /// Value sent back when selected.
    pub value: String,
    pub label: String,
}

pub const JUMP_PLACEHOLDER: &str = "Jump to Node";

/// Dropdown entries for every node that has both a unique and a source title.
pub fn jump_options(nodes: &[NodeInfo]) -> Vec<JumpOption> {
    nodes
        .iter()
        .filter_map(|node| {
            let value = node.unique_title.as_deref().filter(|t| !t.is_empty())?;
            let label = node.source_title.as_deref().filter(|t| !t.is_empty())?;
            Some(JumpOption {
                value: value.to_string(),
                label: label.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(title: &str, position: Option<&str>) -> NodeInfo {
        NodeInfo {
            title: title.to_string(),
            source_title: Some(title.to_string()),
            unique_title: Some(title.to_string()),
            headers: position
                .map(|p| {
                    vec![NodeHeader {
                        key: POSITION_HEADER.to_string(),
                        value: p.to_string(),
                    }]
                })
                .unwrap_or_default(),
            jumps: vec![],
            preview_text: String::new(),
        }
    }

    #[test]
    fn parses_positions() {
        assert_eq!(Position::parse("10,-20.5"), Some(Position::new(10.0, -20.5)));
        assert_eq!(Position::parse(" 3 , 4 "), Some(Position::new(3.0, 4.0)));
        assert_eq!(Position::parse("3"), None);
        assert_eq!(Position::parse("a,b"), None);
        assert_eq!(Position::new(1.5, 20.0).to_header_value(), "1.5,20");
    }

    #[test]
    fn assigns_default_positions_along_diagonal() {
        let nodes = vec![
            node("Start", None),
            node("Placed", Some("100,200")),
            node("Next", None),
            node("Broken", Some("nope")),
        ];
        let mut session = PreviewSession::default();
        let prepared = prepare_nodes(&nodes, &mut session);

        assert_eq!(prepared[0].position(), Some(Position::new(0.0, 0.0)));
        assert_eq!(prepared[1].position(), Some(Position::new(100.0, 200.0)));
        assert_eq!(prepared[1].headers.len(), 1);
        assert_eq!(prepared[2].position(), Some(Position::new(10.0, 10.0)));
        // The malformed header stays; the appended one comes after it.
        assert_eq!(prepared[3].headers.len(), 2);
        assert_eq!(prepared[3].headers[1].value, "20,20");
        // The host's copy is untouched.
        assert!(nodes[0].headers.is_empty());
    }

    #[test]
    fn renders_preview_text() {
        let mut start = node("Start", Some("0,0"));
        start.preview_text = "[b]Hi[/b]\n===".to_string();
        let prepared = prepare_nodes(&[start], &mut PreviewSession::default());
        assert_eq!(prepared[0].preview_text, "<strong>Hi</strong>");
    }

    #[test]
    fn jump_options_skip_untitled_nodes() {
        let mut untitled = node("x", None);
        untitled.unique_title = None;
        let options = jump_options(&[node("A", None), untitled]);
        assert_eq!(
            options,
            vec![JumpOption {
                value: "A".to_string(),
                label: "A".to_string()
            }]
        );
    }

    #[test]
    fn deserializes_host_shape() {
        let json = r#"{
            "title": "Start",
            "sourceTitle": "Start",
            "uniqueTitle": "Start#1",
            "headers": [{"key": "position", "value": "5,6"}],
            "jumps": [{"destinationTitle": "End"}],
            "previewText": "Hi"
        }"#;
        let node: NodeInfo = serde_json::from_str(json).unwrap();
        assert_eq!(node.id(), "Start#1");
        assert_eq!(node.jumps[0].destination_title, "End");
        assert_eq!(node.position(), Some(Position::new(5.0, 6.0)));
    }
}
