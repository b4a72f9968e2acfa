//! Operating modes and their link timing parameters.

use serde::{Deserialize, Serialize};

/// Connection interval requested while streaming, in 1.25 ms link units
/// (6 ≈ 7.5 ms exchanges).
pub const FAST_INTERVAL_UNITS: u16 = 6;

/// Connection interval requested while idle (80 ≈ 100 ms). Slow enough to
/// save power, fast enough for responsive command turnaround.
pub const MEDIUM_INTERVAL_UNITS: u16 = 80;

/// Connection interval requested while asleep (800 ≈ 1 s heartbeat). Commands
/// still arrive, with up to a couple of seconds of latency.
pub const SLOW_INTERVAL_UNITS: u16 = 800;

/// Operating mode of the streaming session.
///
/// Exactly one mode is active at any time. Each mode is bound 1:1 to a target
/// connection interval; the session requests the new interval from the link on
/// every mode change and on connection establishment. A larger interval means
/// lower power and lower responsiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerMode {
    /// Fast connection interval, frames flowing.
    Streaming,

    /// Medium connection interval, no frames. The baseline mode after a
    /// disconnect.
    #[default]
    Idle,

    /// Slow connection interval, no frames. The connection stays up so a
    /// single command can wake the device without re-pairing.
    Sleep,
}

impl PowerMode {
    /// Target connection interval for this mode, in 1.25 ms link units.
    pub fn interval_units(self) -> u16 {
        match self {
            PowerMode::Streaming => FAST_INTERVAL_UNITS,
            PowerMode::Idle => MEDIUM_INTERVAL_UNITS,
            PowerMode::Sleep => SLOW_INTERVAL_UNITS,
        }
    }

    /// Whether the streaming gate is conventionally open in this mode.
    ///
    /// This is the coordination rule between mode and gate: entering
    /// `Streaming` by command opens the gate, entering `Idle`/`Sleep` closes
    /// it. The one deliberate exception is connection establishment, which
    /// forces `Streaming` for control-channel responsiveness but leaves the
    /// gate shut until an explicit begin command — which is why the session
    /// stores the gate separately instead of deriving it from the mode.
    pub fn streams(self) -> bool {
        matches!(self, PowerMode::Streaming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_mapping_is_one_to_one() {
        assert_eq!(PowerMode::Streaming.interval_units(), 6);
        assert_eq!(PowerMode::Idle.interval_units(), 80);
        assert_eq!(PowerMode::Sleep.interval_units(), 800);
    }

    #[test]
    fn only_streaming_opens_the_gate() {
        assert!(PowerMode::Streaming.streams());
        assert!(!PowerMode::Idle.streams());
        assert!(!PowerMode::Sleep.streams());
    }

    #[test]
    fn disconnect_baseline_is_idle() {
        assert_eq!(PowerMode::default(), PowerMode::Idle);
    }
}
