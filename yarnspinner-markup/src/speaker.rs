//! Speaker label colors.
//!
//! A line such as `Alice: Hello` gets a colored `Alice:` label. Colors come
//! from the configured table (per name, then the `*` wildcard), and failing
//! that from a palette slot picked by hashing the lowercased name.

use crate::error::{MarkupError, MarkupResult};
use crate::escape::escape_html;
use crate::sanitize::sanitize_color;
use std::collections::HashMap;

/// Auto-assigned speaker colors, indexed by [`palette_index`].
pub const PALETTE: [&str; 8] = [
    "#ff7043", "#29b6f6", "#ab47bc", "#9ccc65", "#ffa726", "#ec407a", "#26a69a", "#7e57c2",
];

/// Explicit-table key that applies to every speaker.
pub const WILDCARD: &str = "*";

/// 32-bit signed rolling hash (`h = h * 31 + unit`) over UTF-16 code units.
///
/// Must stay bit-compatible with the editor extension's own preview so both
/// pick the same palette slot for a name.
pub fn hash_name(value: &str) -> i32 {
    value
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Palette slot for a speaker name, in `0..PALETTE.len()`.
pub fn palette_index(name: &str) -> usize {
    let magnitude = hash_name(&name.to_lowercase()).unsigned_abs();
    (magnitude % PALETTE.len() as u32) as usize
}

/// Parses the configured speaker color table, a JSON object of
/// `name -> color`. Keys are lowercased; entries whose value is not a string
/// or not a valid color are skipped. Blank input is an empty table.
pub fn parse_speaker_colors(raw: &str) -> MarkupResult<HashMap<String, String>> {
    if raw.trim().is_empty() {
        return Ok(HashMap::new());
    }
    let parsed: serde_json::Value = serde_json::from_str(raw)?;
    let serde_json::Value::Object(entries) = parsed else {
        return Err(MarkupError::SpeakerColors(
            "expected a JSON object mapping speaker names to colors".to_string(),
        ));
    };

    let mut table = HashMap::with_capacity(entries.len());
    for (name, value) in entries {
        let Some(color) = value.as_str() else {
            log::warn!("speaker color for '{}' is not a string; ignoring", name);
            continue;
        };
        match sanitize_color(color) {
            Ok(color) => {
                table.insert(name.to_lowercase(), color);
            }
            Err(e) => log::warn!("speaker color for '{}' ignored: {}", name, e),
        }
    }
    Ok(table)
}

/// Color state for one rendering session.
#[derive(Debug, Clone, Default)]
pub struct SpeakerColors {
    explicit: HashMap<String, String>,
    auto: HashMap<String, String>,
    auto_enabled: bool,
}

impl SpeakerColors {
    pub fn new(explicit: HashMap<String, String>, auto_enabled: bool) -> Self {
        Self {
            explicit,
            auto: HashMap::new(),
            auto_enabled,
        }
    }

    /// Builds the table from the raw JSON option. Malformed JSON is logged and
    /// treated as an empty table so auto coloring still applies.
    pub fn from_json(raw: &str, auto_enabled: bool) -> Self {
        let explicit = parse_speaker_colors(raw).unwrap_or_else(|e| {
            log::warn!("{}; falling back to automatic speaker colors", e);
            HashMap::new()
        });
        Self::new(explicit, auto_enabled)
    }

    /// Replaces the configuration. Auto-assigned colors are forgotten when
    /// either the explicit table or the auto flag changed.
    pub fn reconfigure(&mut self, explicit: HashMap<String, String>, auto_enabled: bool) {
        if explicit != self.explicit || auto_enabled != self.auto_enabled {
            self.explicit = explicit;
            self.auto_enabled = auto_enabled;
            self.reset();
        }
    }

    /// Forgets every auto-assigned color.
    pub fn reset(&mut self) {
        self.auto.clear();
    }

    pub fn auto_enabled(&self) -> bool {
        self.auto_enabled
    }

    /// Number of speakers that have been given an automatic color.
    pub fn auto_assigned(&self) -> usize {
        self.auto.len()
    }

    /// Resolves the label color for `name`, assigning a palette color the
    /// first time an unconfigured speaker is seen.
    pub fn resolve(&mut self, name: &str) -> Option<&str> {
        let key = name.to_lowercase();
        if let Some(color) = self
            .explicit
            .get(&key)
            .or_else(|| self.explicit.get(WILDCARD))
        {
            return Some(color.as_str());
        }
        if !self.auto.contains_key(&key) {
            if !self.auto_enabled {
                return None;
            }
            let color = PALETTE[palette_index(&key)];
            log::debug!("assigned speaker color {} to '{}'", color, key);
            self.auto.insert(key.clone(), color.to_string());
        }
        self.auto.get(&key).map(String::as_str)
    }

    /// Renders `Name:` as a label span, colored when a color resolves.
    pub fn render_label(&mut self, name: &str) -> String {
        let style = match self.resolve(name) {
            Some(color) => format!(" style=\"color:{};\"", escape_html(color)),
            None => String::new(),
        };
        format!(
            "<span class=\"speaker-label\"{}>{}:</span>",
            style,
            escape_html(name)
        )
    }
}
