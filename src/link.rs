//! Link abstraction over the short-range wireless transport.

use crate::error::Result;
use crate::wire::FRAME_LEN;

/// Events delivered by the link layer to the streaming core.
///
/// These are the only inputs the session reacts to besides the periodic
/// dispatch tick. They are pushed into the driver's event channel by whatever
/// glue sits on the radio stack's callbacks, which keeps the core itself
/// callback-free and single-writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// A peer connected. Resets the session to fast-interval `Streaming`
    /// mode with the gate shut.
    Connected,

    /// The peer disconnected. Forces the gate shut and resets the mode to
    /// its idle baseline.
    Disconnected,

    /// One byte arrived on the inbound control channel.
    ByteReceived(u8),
}

/// Capability set consumed from the wireless link.
///
/// A link abstracts over a radio stack (or a test double). Implementations
/// handle their own fragmentation of transmitted frames across the
/// transport's maximum-payload limit; the core always hands over whole
/// frames.
///
/// Both outbound calls are fire-and-forget from the core's perspective: the
/// physical renegotiation behind `request_timing` may complete long after the
/// call returns, and a `transmit` failure is logged and dropped, never
/// retried.
#[async_trait::async_trait]
pub trait Link: Send + 'static {
    /// Whether a peer is currently connected.
    fn is_connected(&self) -> bool;

    /// Request a new connection interval, in 1.25 ms link units. Best-effort:
    /// implementations must treat this as a no-op while disconnected, never
    /// a fault.
    async fn request_timing(&mut self, interval_units: u16);

    /// Transmit one wire frame. Non-blocking; a full transmit buffer is an
    /// error the caller is free to drop.
    async fn transmit(&mut self, frame: &[u8; FRAME_LEN]) -> Result<()>;
}
