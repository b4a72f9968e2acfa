//! Core types for the streaming session.
//!
//! This module provides the small, copyable value types the rest of the crate
//! is built from:
//!
//! - [`PowerMode`] maps the three operating modes onto link timing parameters
//! - [`Command`] is the single-byte control protocol received over the link
//! - [`Sample`] / [`SampleBlock`] describe the 24-bit, 8-channel payload unit
//! - [`SessionStatus`] is the snapshot published over the status watch channel
//!
//! All of these are plain data: no I/O, no interior state, no async. The
//! state that ties them together lives in [`crate::session::LinkSession`].

mod command;
mod power_mode;
mod sample;
mod status;

pub use command::Command;
pub use power_mode::PowerMode;
pub use sample::{
    CHANNEL_COUNT, SAMPLE_MAX, SAMPLE_MIN, Sample, SampleBlock, TICKS_PER_FRAME, in_wire_range,
};
pub use status::SessionStatus;
