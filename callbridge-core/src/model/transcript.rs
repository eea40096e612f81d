use serde::{Deserialize, Serialize};

/// Label used when neither the fragment nor the connection carries a name.
pub const PEER_FALLBACK_LABEL: &str = "Peer";

/// A piece of live speech-to-text output relayed to the other party of a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptFragment {
    pub sender: Option<String>,
    pub text: String,
}

impl TranscriptFragment {
    pub fn new(text: impl Into<String>, sender: Option<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }

    /// Name to tag the fragment with: the declared sender, then `display_name`,
    /// then [`PEER_FALLBACK_LABEL`]. Blank names count as absent.
    pub fn sender_label(&self, display_name: Option<&str>) -> String {
        [self.sender.as_deref(), display_name]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|name| !name.is_empty())
            .unwrap_or(PEER_FALLBACK_LABEL)
            .to_string()
    }
}
