//! Error types for the streaming core.
//!
//! All failure handling in this crate is "drop and continue": a frame that
//! cannot be transmitted is abandoned and the next tick produces a fresh one,
//! and a frame that fails receiver-side validation is discarded. Errors exist
//! to carry context for logging and diagnostics, not to drive a retry loop.
//!
//! ## Error Categories
//!
//! - **Transmit Errors**: The link rejected a frame (buffer full, stack busy)
//! - **Frame Errors**: Receiver-side validation failures (length, markers, checksum)
//! - **Channel Errors**: The session task or its event channel has shut down
//!
//! Invalid command bytes and timing requests made while disconnected are *not*
//! errors anywhere in this crate; both are specified as silent no-ops.

use thiserror::Error;

/// Result type alias for streaming operations.
pub type Result<T, E = StreamError> = std::result::Result<T, E>;

/// Main error type for streaming operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StreamError {
    #[error("Transmit failed: {reason}")]
    Transmit {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Frame truncated: {len} bytes (frame is {expected} bytes)")]
    FrameLength { len: usize, expected: usize },

    #[error("Bad frame marker at offset {offset}: expected {expected:#04x}, found {found:#04x}")]
    FrameMarker { offset: usize, expected: u8, found: u8 },

    #[error("Checksum mismatch: computed {computed:#04x}, frame carries {carried:#04x}")]
    Checksum { computed: u8, carried: u8 },

    #[error("Channel closed: {context}")]
    ChannelClosed { context: String },
}

impl StreamError {
    /// Returns whether the failed item can simply be dropped and the
    /// stream allowed to continue.
    ///
    /// Transmit and frame-validation failures are droppable by design: the
    /// periodic tick is the retry unit and the receiver tolerates loss. A
    /// closed channel means the session task is gone, which nothing
    /// downstream can recover from.
    pub fn is_droppable(&self) -> bool {
        match self {
            StreamError::Transmit { .. } => true,
            StreamError::FrameLength { .. } => true,
            StreamError::FrameMarker { .. } => true,
            StreamError::Checksum { .. } => true,
            StreamError::ChannelClosed { .. } => false,
        }
    }

    /// Helper constructor for transmit failures.
    pub fn transmit_failed(reason: impl Into<String>) -> Self {
        StreamError::Transmit { reason: reason.into(), source: None }
    }

    /// Helper constructor for transmit failures with an underlying cause.
    pub fn transmit_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        StreamError::Transmit { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for closed-channel errors.
    pub fn channel_closed(context: impl Into<String>) -> Self {
        StreamError::ChannelClosed { context: context.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn error_messages_contain_their_context(
                reason in ".*",
                computed in any::<u8>(),
                carried in any::<u8>(),
                len in 0usize..52usize
            ) {
                let transmit = StreamError::transmit_failed(reason.clone());
                prop_assert!(transmit.to_string().contains(&reason));

                let checksum = StreamError::Checksum { computed, carried };
                let msg = checksum.to_string();
                let computed_hex = format!("{computed:#04x}");
                let carried_hex = format!("{carried:#04x}");
                prop_assert!(msg.contains(&computed_hex));
                prop_assert!(msg.contains(&carried_hex));

                let length = StreamError::FrameLength { len, expected: 52 };
                prop_assert!(length.to_string().contains(&len.to_string()));
            }

            #[test]
            fn transmit_source_chain_is_traversable(base in ".*") {
                let source: Box<dyn std::error::Error + Send + Sync> =
                    Box::new(std::io::Error::other(base.clone()));
                let error = StreamError::transmit_failed_with_source("link buffer full", source);

                let chained = std::error::Error::source(&error)
                    .expect("source should be preserved");
                prop_assert_eq!(chained.to_string(), base);
            }
        }
    }

    #[test]
    fn error_traits_validation() {
        // Compile-time check: StreamError must be Send + Sync + 'static
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<StreamError>();

        let error = StreamError::transmit_failed("test");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn droppable_classification() {
        assert!(StreamError::transmit_failed("full").is_droppable());
        assert!(StreamError::Checksum { computed: 1, carried: 2 }.is_droppable());
        assert!(StreamError::FrameLength { len: 10, expected: 52 }.is_droppable());
        assert!(
            StreamError::FrameMarker { offset: 0, expected: 0xA0, found: 0x00 }.is_droppable()
        );
        assert!(!StreamError::channel_closed("session task").is_droppable());
    }
}
