//! # Yarn Spinner node graph webview
//!
//! Controller logic for the dialogue graph webview: decodes host messages,
//! prepares node cards with rendered preview text, and reports user intents
//! back to the host. Drawing is left to a [`GraphCanvas`] implementation and
//! message transport to a [`HostChannel`].

pub mod error;
pub mod nodes;
pub mod preview_page;
pub mod protocol;
pub mod view;

pub use error::{WebviewError, WebviewResult};
pub use nodes::{NodeHeader, NodeInfo, NodeJump, Position};
pub use preview_page::{LineElement, LineEnhancer};
pub use protocol::{InboundMessage, OutboundMessage};
pub use view::{GraphCanvas, HostChannel, NodeGraphView};
