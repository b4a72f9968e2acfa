//! Driver spawns and manages the session task.

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::link::{Link, LinkEvent};
use crate::session::LinkSession;
use crate::types::SessionStatus;

/// Dispatch tick period: one frame (two ticks of samples) every 8 ms, a
/// nominal 125 Hz frame rate while streaming.
pub const FRAME_PERIOD: Duration = Duration::from_millis(8);

/// Bound of the link event channel. Events are tiny and handled in
/// microseconds; a shallow queue keeps a stalled task from hoarding stale
/// connection state.
pub const EVENT_QUEUE_DEPTH: usize = 32;

/// Result of spawning the session task
pub struct DriverChannels {
    /// Sender for link events (connect, disconnect, received bytes)
    pub events: mpsc::Sender<LinkEvent>,
    /// Receiver for session status snapshots
    pub status: watch::Receiver<SessionStatus>,
    /// Cancellation token for graceful shutdown
    pub cancel: CancellationToken,
}

/// Driver spawns and manages the session task
///
/// Spawns a single task that owns the [`Link`] and the [`LinkSession`].
/// Link events and the periodic dispatch tick are serialized through one
/// `select!` loop, which is what makes the session's lock-free single-writer
/// model sound.
pub struct Driver;

impl Driver {
    /// Spawn the session task for the given link
    ///
    /// Returns the event sender, a status watch receiver, and a cancellation
    /// token for graceful shutdown.
    pub fn spawn<L>(link: L) -> DriverChannels
    where
        L: Link,
    {
        let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let (status_tx, status_rx) = watch::channel(SessionStatus::default());

        let cancel = CancellationToken::new();
        let cancel_task = cancel.clone();

        tokio::spawn(async move {
            Self::session_task(link, event_rx, status_tx, cancel_task).await;
        });

        DriverChannels { events: event_tx, status: status_rx, cancel }
    }

    /// Session task - applies link events and runs the dispatch tick
    async fn session_task<L>(
        mut link: L,
        mut events: mpsc::Receiver<LinkEvent>,
        status_tx: watch::Sender<SessionStatus>,
        cancel: CancellationToken,
    ) where
        L: Link,
    {
        info!("Session task started");
        let mut session = LinkSession::new();
        let mut frame_count = 0u64;
        let mut dropped_count = 0u64;

        let mut ticker = tokio::time::interval(FRAME_PERIOD);
        // A late tick must not burst: the tick is the retry unit, and each
        // tick transmits fresh data
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Session task cancelled");
                    break;
                }
                event = events.recv() => {
                    match event {
                        Some(event) => {
                            trace!(?event, "Link event");
                            if let Some(interval_units) = session.handle_event(event) {
                                info!(
                                    mode = ?session.mode(),
                                    streaming = session.is_streaming(),
                                    interval_units,
                                    "Mode change, requesting connection timing"
                                );
                                link.request_timing(interval_units).await;
                            }
                            let status = session.status();
                            status_tx.send_if_modified(|current| {
                                if *current != status {
                                    *current = status;
                                    true
                                } else {
                                    false
                                }
                            });
                        }
                        None => {
                            debug!("Event sender dropped, shutting down");
                            break;
                        }
                    }
                }
                _ = ticker.tick() => {
                    // Gated off: no work, no counter advance
                    let Some(frame) = session.next_frame() else { continue };

                    match link.transmit(&frame).await {
                        Ok(()) => {
                            frame_count += 1;
                            trace!(frame_count, seq = frame[1], "Frame transmitted");
                        }
                        Err(e) => {
                            // Dropped, not retried: the next tick carries
                            // fresh samples
                            dropped_count += 1;
                            debug!(dropped_count, "Frame dropped: {e}");
                        }
                    }
                }
            }
        }

        info!("Session task ended ({frame_count} frames sent, {dropped_count} dropped)");
    }
}
