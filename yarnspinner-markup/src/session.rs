//! Rendering session: the options in force plus the speaker colors assigned
//! so far. Each preview surface owns its own session.

use crate::document::format_document;
use crate::escape::NBSP;
use crate::line::format_line;
use crate::options::PreviewOptions;
use crate::speaker::{parse_speaker_colors, SpeakerColors};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct PreviewSession {
    options: PreviewOptions,
    speakers: SpeakerColors,
}

impl Default for PreviewSession {
    fn default() -> Self {
        Self::new(PreviewOptions::default())
    }
}

impl PreviewSession {
    pub fn new(options: PreviewOptions) -> Self {
        let speakers = SpeakerColors::from_json(
            &options.speaker_colors_raw,
            options.auto_speaker_colors_enabled,
        );
        Self { options, speakers }
    }

    pub fn options(&self) -> &PreviewOptions {
        &self.options
    }

    pub fn speakers(&self) -> &SpeakerColors {
        &self.speakers
    }

    /// Applies new options. Auto speaker colors are kept unless the speaker
    /// table or the auto-color switch changed.
    pub fn set_options(&mut self, options: PreviewOptions) {
        if options.speaker_colors_raw != self.options.speaker_colors_raw
            || options.auto_speaker_colors_enabled != self.options.auto_speaker_colors_enabled
        {
            let explicit = parse_speaker_colors(&options.speaker_colors_raw).unwrap_or_else(|e| {
                log::warn!("{}; falling back to automatic speaker colors", e);
                HashMap::new()
            });
            self.speakers
                .reconfigure(explicit, options.auto_speaker_colors_enabled);
        }
        log::debug!("preview options changed: {:?}", options);
        self.options = options;
    }

    /// Forgets auto-assigned speaker colors.
    pub fn reset(&mut self) {
        self.speakers.reset();
    }

    pub fn render_line(&mut self, line: &str) -> String {
        format_line(line, &mut self.speakers, &self.options)
    }

    /// Formats a node body as `<br/>`-joined HTML.
    pub fn render_document(&mut self, body: &str) -> String {
        format_document(body, &mut self.speakers, &self.options)
    }

    /// Formats a node body wrapped in a block carrying the preview font size.
    pub fn render_preview_block(&mut self, body: &str) -> String {
        let html = self.render_document(body);
        format!(
            "<div class=\"preview-text\" style=\"font-size:{};\">{}</div>",
            self.options.font_size_css(),
            if html.is_empty() { NBSP } else { html.as_str() }
        )
    }
}
