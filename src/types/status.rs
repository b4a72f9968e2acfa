//! Session status snapshot published over the watch channel.

use serde::{Deserialize, Serialize};

use super::PowerMode;

/// Point-in-time view of the streaming session.
///
/// Published by the session task whenever connection state, mode, or the
/// streaming gate changes. `mode` and `streaming` are separate fields because
/// they genuinely diverge right after connection establishment: the mode is
/// `Streaming` (fast interval for link negotiation) while the gate stays shut
/// until an explicit begin command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    /// Whether a peer is connected.
    pub connected: bool,

    /// Active operating mode.
    pub mode: PowerMode,

    /// Whether frames are being transmitted on each tick.
    pub streaming: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_disconnected_idle() {
        let status = SessionStatus::default();
        assert!(!status.connected);
        assert_eq!(status.mode, PowerMode::Idle);
        assert!(!status.streaming);
    }
}
