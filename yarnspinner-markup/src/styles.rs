//! Stylesheet for rendered previews. Injected once per page by the view.

/// Element id the stylesheet is registered under, so it is injected once.
pub const PREVIEW_STYLE_ID: &str = "dialogue-preview-enhancer";

/// Preview line, choice, speaker and text-effect styles.
pub const PREVIEW_STYLES: &str = ".preview-line{white-space:pre-wrap;}\
.preview-text{line-height:1.4;overflow:hidden;}\
.choice-line{display:inline-block;text-decoration:underline;font-weight:600;margin:2px 0;}\
.speaker-label{font-weight:600;margin-right:4px;display:inline-block;}\
.text-effect{display:inline-block;}\
.text-effect-wave{animation:text-effect-wave 1.2s ease-in-out infinite;}\
.text-effect-bounce{animation:text-effect-bounce 0.8s ease-in-out infinite;}\
.text-effect-shake{animation:text-effect-shake 0.3s linear infinite;}\
.text-effect-rainbow{animation:text-effect-rainbow 2s linear infinite;}\
.text-effect-glitch{animation:text-effect-glitch 0.6s steps(2) infinite;}\
@keyframes text-effect-wave{0%,100%{transform:translateY(0);}50%{transform:translateY(-2px);}}\
@keyframes text-effect-bounce{0%,100%{transform:translateY(0);}30%{transform:translateY(-4px);}}\
@keyframes text-effect-shake{0%{transform:translate(0,0);}25%{transform:translate(1px,-1px);}50%{transform:translate(-1px,1px);}75%{transform:translate(1px,1px);}}\
@keyframes text-effect-rainbow{0%{color:#ff7043;}25%{color:#ffa726;}50%{color:#9ccc65;}75%{color:#29b6f6;}100%{color:#ab47bc;}}\
@keyframes text-effect-glitch{0%{opacity:1;transform:skewX(0);}50%{opacity:0.7;transform:skewX(8deg);}}";

/// The stylesheet as a `<style>` element.
pub fn style_element() -> String {
    format!("<style id=\"{}\">{}</style>", PREVIEW_STYLE_ID, PREVIEW_STYLES)
}
