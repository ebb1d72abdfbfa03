use crate::error::{MarkupError, MarkupResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_FONT_SIZE: f64 = 12.0;

fn default_true() -> bool {
    true
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

/// Preview rendering switches, as configured in the editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewOptions {
    /// Drop `//` comment lines.
    #[serde(default)]
    pub hide_comments: bool,
    /// Remove `<<commands>>` and non-formatting tags.
    #[serde(default)]
    pub hide_commands: bool,
    /// Render bracket tags as HTML; when off every tag shows literally.
    #[serde(default = "default_true")]
    pub render_text_effects: bool,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// JSON object mapping speaker names (or `*`) to colors.
    #[serde(default, rename = "speakerColors")]
    pub speaker_colors_raw: String,
    #[serde(default = "default_true", rename = "autoSpeakerColors")]
    pub auto_speaker_colors_enabled: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            hide_comments: false,
            hide_commands: false,
            render_text_effects: true,
            font_size: DEFAULT_FONT_SIZE,
            speaker_colors_raw: String::new(),
            auto_speaker_colors_enabled: true,
        }
    }
}

impl PreviewOptions {
    /// Parses options from YAML. Missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> MarkupResult<Self> {
        let options: PreviewOptions = serde_yaml::from_str(yaml)?;
        options.validate()?;
        Ok(options)
    }

    /// Reads and parses an options file.
    pub fn load(path: &Path) -> MarkupResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| MarkupError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&content)
    }

    fn validate(&self) -> MarkupResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(MarkupError::Options(format!(
                "fontSize must be a positive number, got {}",
                self.font_size
            )));
        }
        Ok(())
    }

    /// Font size as a CSS length. Non-positive sizes fall back to the default.
    pub fn font_size_css(&self) -> String {
        let size = if self.font_size.is_finite() && self.font_size > 0.0 {
            self.font_size
        } else {
            DEFAULT_FONT_SIZE
        };
        format!("{}px", size)
    }
}
