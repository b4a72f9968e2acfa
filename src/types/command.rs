//! Single-byte control commands received over the link.

use serde::{Deserialize, Serialize};

use super::PowerMode;

/// A recognized control command.
///
/// The wire protocol is a single ASCII byte per command. Bytes that do not
/// match a command are ignored by the session — deliberate permissiveness so
/// a host can probe the control channel without tripping the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// `b` — wake up and start streaming at the fast interval.
    Begin,

    /// `s` — stop streaming and drop to the medium interval.
    Stop,

    /// `d` — stop streaming and drop to the slow heartbeat interval.
    DeepSleep,
}

impl Command {
    /// Parse a received byte. Returns `None` for unrecognized bytes, which
    /// callers must treat as a no-op, not an error.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'b' => Some(Command::Begin),
            b's' => Some(Command::Stop),
            b'd' => Some(Command::DeepSleep),
            _ => None,
        }
    }

    /// The wire byte for this command.
    pub const fn byte(self) -> u8 {
        match self {
            Command::Begin => b'b',
            Command::Stop => b's',
            Command::DeepSleep => b'd',
        }
    }

    /// The operating mode this command selects.
    pub fn mode(self) -> PowerMode {
        match self {
            Command::Begin => PowerMode::Streaming,
            Command::Stop => PowerMode::Idle,
            Command::DeepSleep => PowerMode::Sleep,
        }
    }
}
