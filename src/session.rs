//! Session state machine: connection state, power mode, streaming gate.
//!
//! [`LinkSession`] owns every piece of mutable streaming state — mode, gate,
//! connection flag, tick counter, sequence counter — in one struct with no
//! interior mutability. The driver task is its single writer: events and
//! ticks are serialized through one `select!` loop, so no update here is ever
//! split across a suspension point. The session itself performs no I/O; it
//! returns what the driver should do (a timing request to issue, a frame to
//! transmit), which keeps every transition synchronously testable.

use tracing::debug;

use crate::link::LinkEvent;
use crate::signal::SquareWave;
use crate::types::{Command, PowerMode, SessionStatus};
use crate::wire::{FRAME_LEN, FrameEncoder};

/// The command-driven power/connection state machine plus the sample and
/// frame pipeline it gates.
#[derive(Debug, Default)]
pub struct LinkSession {
    connected: bool,
    mode: PowerMode,
    streaming: bool,
    signal: SquareWave,
    encoder: FrameEncoder,
}

impl LinkSession {
    /// A fresh session: disconnected, idle baseline, gate shut.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one link event.
    ///
    /// Returns the connection interval (in 1.25 ms link units) the driver
    /// should request from the link, or `None` when no request is due. A
    /// request is due on connection establishment and on every command that
    /// actually changes the mode; a command selecting the mode that is
    /// already active still drives the gate but renegotiates nothing.
    /// Unknown command bytes leave all state untouched, disconnection has no
    /// link to request against, and commands that somehow arrive while
    /// disconnected change local state but must not reach the link.
    pub fn handle_event(&mut self, event: LinkEvent) -> Option<u16> {
        match event {
            LinkEvent::Connected => {
                self.connected = true;
                // Fast interval for link negotiation and command turnaround,
                // but no data until an explicit begin command.
                self.mode = PowerMode::Streaming;
                self.streaming = false;
                Some(self.mode.interval_units())
            }
            LinkEvent::Disconnected => {
                self.connected = false;
                self.streaming = false;
                self.mode = PowerMode::default();
                None
            }
            LinkEvent::ByteReceived(byte) => {
                let Some(command) = Command::from_byte(byte) else {
                    debug!(byte, "Ignoring unrecognized command byte");
                    return None;
                };
                let mode_changed = command.mode() != self.mode;
                self.mode = command.mode();
                self.streaming = self.mode.streams();
                // Guard, not an error: a timing request while disconnected
                // must be a no-op all the way down.
                (self.connected && mode_changed).then(|| self.mode.interval_units())
            }
        }
    }

    /// Run one dispatch tick.
    ///
    /// Produces the next wire frame when connected with the gate open,
    /// advancing the tick and sequence counters; otherwise does nothing at
    /// all, so the counters freeze while gated off and the waveform resumes
    /// exactly where it paused.
    pub fn next_frame(&mut self) -> Option<[u8; FRAME_LEN]> {
        if !self.connected || !self.streaming {
            return None;
        }
        Some(self.encoder.encode(&self.signal.next_block()))
    }

    /// Snapshot for the status watch channel.
    pub fn status(&self) -> SessionStatus {
        SessionStatus { connected: self.connected, mode: self.mode, streaming: self.streaming }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn mode(&self) -> PowerMode {
        self.mode
    }

    /// Whether the streaming gate is open.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Ticks generated so far. Frozen while the gate is shut.
    pub fn ticks(&self) -> u32 {
        self.signal.ticks()
    }
}
