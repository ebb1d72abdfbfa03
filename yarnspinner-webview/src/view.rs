//! Node-graph view controller.
//!
//! Routes host messages to the canvas, keeps the last node update so the
//! whole graph can be re-rendered when preview options change, and turns
//! toolbar and canvas interactions into outbound intents.

use crate::error::{WebviewError, WebviewResult};
use crate::nodes::{jump_options, prepare_nodes, JumpOption, NodeInfo, Position, JUMP_PLACEHOLDER};
use crate::protocol::{InboundMessage, OutboundMessage};
use std::collections::{BTreeMap, BTreeSet};
use yarnspinner_markup::{PreviewOptions, PreviewSession};

/// Elements the view cannot start without.
pub const REQUIRED_ANCHORS: [&str; 3] = ["node-jump", "nodes-header", "add-node"];

/// Header key and value that mark a node as a sticky note.
pub const NOTE_STYLE_HEADER: (&str, &str) = ("style", "note");

/// Sends intents to the extension host.
pub trait HostChannel {
    fn post(&mut self, message: OutboundMessage);
}

/// The drawing surface holding node cards.
pub trait GraphCanvas {
    fn has_anchor(&self, anchor: &str) -> bool;
    fn set_nodes(&mut self, nodes: &[NodeInfo]);
    fn has_node(&self, id: &str) -> bool;
    fn focus_node(&mut self, id: &str);
    /// Where a newly added node should go, usually the view center.
    fn position_for_new_node(&self) -> Position;
    /// Replaces the jump dropdown entries and selects `selected`.
    fn set_jump_options(&mut self, options: &[JumpOption], selected: usize);
    fn set_alignment_enabled(&mut self, enabled: bool);
    fn set_interaction_locked(&mut self, locked: bool);
}

pub struct NodeGraphView<C: GraphCanvas, H: HostChannel> {
    canvas: C,
    host: H,
    session: PreviewSession,
    last_update: Option<Vec<NodeInfo>>,
    jumps: Vec<JumpOption>,
    selection: BTreeSet<String>,
    locked: bool,
}

impl<C: GraphCanvas, H: HostChannel> NodeGraphView<C, H> {
    pub fn new(canvas: C, host: H) -> WebviewResult<Self> {
        Self::with_options(canvas, host, PreviewOptions::default())
    }

    pub fn with_options(canvas: C, host: H, options: PreviewOptions) -> WebviewResult<Self> {
        for anchor in REQUIRED_ANCHORS {
            if !canvas.has_anchor(anchor) {
                return Err(WebviewError::MissingAnchor {
                    anchor: anchor.to_string(),
                });
            }
        }

        let mut view = Self {
            canvas,
            host,
            session: PreviewSession::new(options),
            last_update: None,
            jumps: Vec::new(),
            selection: BTreeSet::new(),
            locked: false,
        };
        view.refresh_jump_list(&[]);
        view.canvas.set_alignment_enabled(false);
        Ok(view)
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn session(&self) -> &PreviewSession {
        &self.session
    }

    /// Decodes and routes one raw message from the host.
    pub fn handle_message(&mut self, json: &str) -> WebviewResult<()> {
        let message = InboundMessage::from_json(json)?;
        self.dispatch(message);
        Ok(())
    }

    pub fn dispatch(&mut self, message: InboundMessage) {
        match message {
            InboundMessage::Update { nodes } => {
                log::debug!("received {} nodes", nodes.len());
                self.render_nodes(&nodes);
                self.last_update = Some(nodes);
            }
            InboundMessage::ShowNode { node } => {
                if self.canvas.has_node(&node) {
                    self.canvas.focus_node(&node);
                } else {
                    log::info!("show-node for unknown node '{}'", node);
                }
            }
            InboundMessage::SetPreviewOptions { .. } => {
                if let Some(options) = message.preview_options() {
                    self.apply_options(options);
                }
            }
        }
    }

    fn apply_options(&mut self, options: PreviewOptions) {
        self.session.set_options(options);
        // Every node is recomputed from the raw update, not the rendered copy.
        if let Some(nodes) = self.last_update.take() {
            self.render_nodes(&nodes);
            self.last_update = Some(nodes);
        }
    }

    fn render_nodes(&mut self, nodes: &[NodeInfo]) {
        let prepared = prepare_nodes(nodes, &mut self.session);
        self.canvas.set_nodes(&prepared);
        self.refresh_jump_list(nodes);

        let before = self.selection.len();
        self.selection
            .retain(|id| nodes.iter().any(|node| node.id() == id.as_str()));
        if self.selection.len() != before {
            self.update_alignment();
        }
    }

    fn refresh_jump_list(&mut self, nodes: &[NodeInfo]) {
        self.jumps = std::iter::once(JumpOption {
            value: String::new(),
            label: JUMP_PLACEHOLDER.to_string(),
        })
        .chain(jump_options(nodes))
        .collect();
        self.canvas.set_jump_options(&self.jumps, 0);
    }

    pub fn jump_entries(&self) -> &[JumpOption] {
        &self.jumps
    }

    /// Handles a dropdown selection. Index 0 is the placeholder.
    pub fn select_jump(&mut self, index: usize) {
        if index == 0 {
            return;
        }
        let Some(entry) = self.jumps.get(index) else {
            log::info!("jump index {} out of range", index);
            return;
        };
        let target = entry.value.clone();
        self.canvas.focus_node(&target);
        self.canvas.set_jump_options(&self.jumps, 0);
    }

    pub fn delete_node(&mut self, id: &str) {
        self.host.post(OutboundMessage::Delete { id: id.to_string() });
    }

    pub fn open_node(&mut self, id: &str) {
        self.host.post(OutboundMessage::Open { id: id.to_string() });
    }

    pub fn nodes_moved(&mut self, positions: BTreeMap<String, Position>) {
        if positions.is_empty() {
            return;
        }
        self.host.post(OutboundMessage::Move { positions });
    }

    pub fn update_header(&mut self, node_name: &str, key: &str, value: &str) {
        self.host.post(OutboundMessage::UpdateHeader {
            node_name: node_name.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    pub fn add_node(&mut self) {
        let position = self.canvas.position_for_new_node();
        self.host.post(OutboundMessage::Add {
            position,
            headers: None,
        });
    }

    pub fn add_sticky_note(&mut self) {
        let position = self.canvas.position_for_new_node();
        let (key, value) = NOTE_STYLE_HEADER;
        let headers = BTreeMap::from([(key.to_string(), value.to_string())]);
        self.host.post(OutboundMessage::Add {
            position,
            headers: Some(headers),
        });
    }

    /// Replaces the selected node set.
    pub fn set_selection<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = ids.into_iter().map(Into::into).collect();
        self.update_alignment();
    }

    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selection
    }

    /// Alignment only makes sense for more than one node.
    pub fn alignment_enabled(&self) -> bool {
        self.selection.len() > 1
    }

    fn update_alignment(&mut self) {
        let enabled = self.alignment_enabled();
        self.canvas.set_alignment_enabled(enabled);
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Flips the interaction lock and returns the new state.
    pub fn toggle_lock(&mut self) -> bool {
        self.locked = !self.locked;
        self.canvas.set_interaction_locked(self.locked);
        self.locked
    }
}
