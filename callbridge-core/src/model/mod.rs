mod connection;
mod signaling;
mod transcript;

pub use connection::ConnectionId;
pub use signaling::{ClientMessage, EnvelopeKind, ServerMessage, SignalEnvelope};
pub use transcript::{PEER_FALLBACK_LABEL, TranscriptFragment};
