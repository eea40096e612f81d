use callbridge_core::ConnectionId;
use thiserror::Error;

/// Failures contained inside the switchboard.
///
/// None of these travel back over the wire: the switchboard logs them and
/// drops the offending command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SwitchboardError {
    #[error("connection {0} is not connected")]
    NotConnected(ConnectionId),

    #[error("connection {0} tried to call itself")]
    SelfCall(ConnectionId),

    #[error("connection {0} is already part of a call")]
    AlreadyPaired(ConnectionId),

    #[error("no pending call from {caller} to {callee}")]
    StaleAcceptance {
        caller: ConnectionId,
        callee: ConnectionId,
    },

    #[error("connection {0} has no call partner")]
    NoPeer(ConnectionId),
}

pub type SwitchboardResult<T> = Result<T, SwitchboardError>;
