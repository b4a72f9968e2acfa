//! Command-controlled bio-signal streaming core.
//!
//! Biolink generates a synthetic multi-channel bio-signal, packs it into
//! fixed 52-byte wire frames, and transmits it over a short-range wireless
//! link whose throughput/power trade-off is driven by a single-byte command
//! protocol.
//!
//! # Architecture
//!
//! - **Wire format**: start marker, sequence number, 2 ticks × 8 channels of
//!   24-bit big-endian samples, mod-256 checksum, end marker ([`wire`])
//! - **Power modes**: `Streaming`/`Idle`/`Sleep`, each bound 1:1 to a link
//!   connection interval; `b`/`s`/`d` command bytes switch between them
//! - **Single-writer core**: one spawned task owns the [`Link`] and all
//!   session state, fed by an event channel and an 8 ms dispatch tick
//!
//! Failure handling is "drop and continue" throughout: a rejected frame is
//! abandoned and the next tick transmits fresh data.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use biolink::{Link, LinkEvent, Result, Streamer, wire::FRAME_LEN};
//!
//! struct RadioLink { /* radio stack handle */ }
//!
//! #[async_trait::async_trait]
//! impl Link for RadioLink {
//!     fn is_connected(&self) -> bool { true }
//!     async fn request_timing(&mut self, _interval_units: u16) {}
//!     async fn transmit(&mut self, _frame: &[u8; FRAME_LEN]) -> Result<()> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let streamer = Streamer::spawn(RadioLink {});
//!
//!     // Glue the radio stack's callbacks to the event channel
//!     streamer.notify(LinkEvent::Connected).await?;
//!     streamer.notify(LinkEvent::ByteReceived(b'b')).await?;
//!     // ... frames now flow every 8 ms until 's', 'd', or disconnect
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
pub mod types;

// Streaming session architecture
pub mod driver;
pub mod link;
pub mod session;

// Signal synthesis and wire format
pub mod signal;
pub mod wire;

// Core exports
pub use error::*;
pub use types::*;

pub use driver::{Driver, DriverChannels, FRAME_PERIOD};
pub use link::{Link, LinkEvent};
pub use session::LinkSession;
pub use signal::SquareWave;
pub use wire::{DecodedFrame, Deframer, FrameEncoder, LossTracker};

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

/// Handle to a running streaming session.
///
/// Spawning a `Streamer` starts the session task that owns the [`Link`] and
/// all mutable state. The handle is the outside world's way in: push link
/// events, observe status, shut down. Dropping the handle cancels the task.
pub struct Streamer {
    channels: DriverChannels,
}

impl Streamer {
    /// Spawn the session task for the given link.
    pub fn spawn<L>(link: L) -> Self
    where
        L: Link,
    {
        Self { channels: Driver::spawn(link) }
    }

    /// Sender half of the link event channel, for wiring radio-stack
    /// callbacks that outlive this handle.
    pub fn events(&self) -> mpsc::Sender<LinkEvent> {
        self.channels.events.clone()
    }

    /// Push one link event into the session task.
    pub async fn notify(&self, event: LinkEvent) -> Result<()> {
        self.channels
            .events
            .send(event)
            .await
            .map_err(|_| StreamError::channel_closed("session task"))
    }

    /// Current session status snapshot.
    pub fn status(&self) -> SessionStatus {
        *self.channels.status.borrow()
    }

    /// Session status changes as a stream.
    ///
    /// Yields the current status immediately, then every subsequent change —
    /// watch-channel semantics, no manual dedup needed.
    pub fn status_updates(&self) -> impl Stream<Item = SessionStatus> + 'static {
        WatchStream::new(self.channels.status.clone())
    }

    /// Stop the session task.
    pub fn shutdown(&self) {
        self.channels.cancel.cancel();
    }
}

impl Drop for Streamer {
    fn drop(&mut self) {
        debug!("Dropping streamer handle");
        // Cancel the session task on drop for clean shutdown
        self.channels.cancel.cancel();
    }
}
