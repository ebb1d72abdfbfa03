//! Messages exchanged with the extension host.

use crate::error::WebviewResult;
use crate::nodes::{NodeInfo, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use yarnspinner_markup::PreviewOptions;

/// Messages the host posts to the webview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundMessage {
    /// Replaces the whole node set.
    Update { nodes: Vec<NodeInfo> },
    /// Asks the view to focus a node.
    ShowNode { node: String },
    /// Missing or null fields fall back to `PreviewOptions::default()`.
    #[serde(rename_all = "camelCase")]
    SetPreviewOptions {
        #[serde(default)]
        hide_comments: Option<bool>,
        #[serde(default)]
        hide_commands: Option<bool>,
        #[serde(default)]
        render_text_effects: Option<bool>,
        #[serde(default)]
        preview_font_size: Option<f64>,
        #[serde(default)]
        speaker_colors: Option<String>,
        #[serde(default)]
        auto_speaker_colors: Option<bool>,
    },
}

impl InboundMessage {
    pub fn from_json(json: &str) -> WebviewResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The preview options carried by a `set-preview-options` message.
    pub fn preview_options(&self) -> Option<PreviewOptions> {
        match self {
            InboundMessage::SetPreviewOptions {
                hide_comments,
                hide_commands,
                render_text_effects,
                preview_font_size,
                speaker_colors,
                auto_speaker_colors,
            } => {
                let defaults = PreviewOptions::default();
                Some(PreviewOptions {
                    hide_comments: hide_comments.unwrap_or(defaults.hide_comments),
                    hide_commands: hide_commands.unwrap_or(defaults.hide_commands),
                    render_text_effects: render_text_effects
                        .unwrap_or(defaults.render_text_effects),
                    font_size: preview_font_size.unwrap_or(defaults.font_size),
                    speaker_colors_raw: speaker_colors
                        .clone()
                        .unwrap_or(defaults.speaker_colors_raw),
                    auto_speaker_colors_enabled: auto_speaker_colors
                        .unwrap_or(defaults.auto_speaker_colors_enabled),
                })
            }
            _ => None,
        }
    }
}

/// Intents the webview posts back to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundMessage {
    Delete { id: String },
    /// Open the node in the text editor.
    Open { id: String },
    /// New positions keyed by node name.
    Move { positions: BTreeMap<String, Position> },
    #[serde(rename_all = "camelCase")]
    UpdateHeader {
        node_name: String,
        key: String,
        value: String,
    },
    Add {
        position: Position,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        headers: Option<BTreeMap<String, String>>,
    },
}

impl OutboundMessage {
    pub fn to_json(&self) -> WebviewResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
