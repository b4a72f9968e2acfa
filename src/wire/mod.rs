//! Wire format for data frames.
//!
//! Every frame on the data channel is exactly [`FRAME_LEN`] (52) bytes:
//!
//! ```text
//! ┌──────────┬─────────┬──────────────────────────────┬─────────┬─────────┐
//! │ Start(1) │ Seq(1)  │ Payload (48)                 │ Csum(1) │ End(1)  │
//! │  0xA0    │ mod 256 │ 2 ticks × 8 ch × 3 bytes     │ mod 256 │  0xC0   │
//! └──────────┴─────────┴──────────────────────────────┴─────────┴─────────┘
//! ```
//!
//! Samples are 24-bit two's complement, big-endian, channel-major within each
//! tick. The checksum is the sum of the 48 payload bytes modulo 256 — no
//! error-correcting property, intentionally, because the stream tolerates
//! loss and the receiver just drops what fails to validate. Upgrading it
//! would be a wire-format break.
//!
//! The link transport may refragment frames across its own maximum-payload
//! boundary; [`Deframer`] on the receiver side reassembles and resynchronizes
//! on the start marker.

mod deframer;
mod encoder;

pub use deframer::{DecodedFrame, Deframer, LossTracker};
pub use encoder::FrameEncoder;

use crate::types::{CHANNEL_COUNT, TICKS_PER_FRAME};

/// Total frame length in bytes. Invariant: every encoded frame is exactly
/// this long and the deframer only yields buffers of this length.
pub const FRAME_LEN: usize = 52;

/// First byte of every frame.
pub const START_MARKER: u8 = 0xA0;

/// Last byte of every frame.
pub const END_MARKER: u8 = 0xC0;

/// Bytes per sample on the wire.
pub const SAMPLE_BYTES: usize = 3;

/// Payload length: 2 ticks x 8 channels x 3 bytes.
pub const PAYLOAD_LEN: usize = TICKS_PER_FRAME * CHANNEL_COUNT * SAMPLE_BYTES;

/// Byte offset of the sequence number.
pub const SEQ_OFFSET: usize = 1;

/// Byte offset of the first payload byte.
pub const PAYLOAD_OFFSET: usize = 2;

/// Byte offset of the checksum.
pub const CHECKSUM_OFFSET: usize = PAYLOAD_OFFSET + PAYLOAD_LEN;

/// Byte offset of the end marker.
pub const END_OFFSET: usize = CHECKSUM_OFFSET + 1;
