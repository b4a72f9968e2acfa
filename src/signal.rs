//! Synthetic bio-signal source.
//!
//! A fixed-frequency two-level square wave standing in for a real analog
//! front end. With the 8 ms frame period and two ticks per frame, the
//! effective per-channel rate is 250 Hz; flipping level every
//! [`HALF_PERIOD_TICKS`] ticks gives a 100 ms half-period that is easy to
//! eyeball on a host-side plot.

use crate::types::{CHANNEL_COUNT, Sample, SampleBlock, TICKS_PER_FRAME};

/// Waveform amplitude. Near the 24-bit maximum but with enough headroom that
/// negation can never overflow the wire width.
pub const AMPLITUDE: Sample = 4_000_000;

/// Ticks between level flips (100 ms at 250 Hz per channel).
pub const HALF_PERIOD_TICKS: u32 = 25;

/// Square-wave sample generator.
///
/// Stateless beyond a monotonically increasing tick counter. Channels 0-3
/// carry `+value` and channels 4-7 carry `-value` on every tick, so the two
/// channel groups are exact mirrors — a receiver can verify polarity without
/// knowing the phase.
///
/// The counter only advances when a block is produced. The dispatch path
/// never asks for a block while the streaming gate is shut, so the waveform
/// resumes exactly where it paused rather than tracking wall-clock phase.
/// Counter wrap is harmless: only `(tick / 25) % 2` is observed.
#[derive(Debug, Default)]
pub struct SquareWave {
    tick: u32,
}

impl SquareWave {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks generated so far.
    pub fn ticks(&self) -> u32 {
        self.tick
    }

    /// Produce the next two ticks of samples, advancing the counter by two.
    pub fn next_block(&mut self) -> SampleBlock {
        let mut block: SampleBlock = [[0; CHANNEL_COUNT]; TICKS_PER_FRAME];
        for row in &mut block {
            self.tick = self.tick.wrapping_add(1);
            let value = if (self.tick / HALF_PERIOD_TICKS) % 2 == 0 {
                AMPLITUDE
            } else {
                -AMPLITUDE
            };
            for (channel, sample) in row.iter_mut().enumerate() {
                *sample = if channel < CHANNEL_COUNT / 2 { value } else { -value };
            }
        }
        block
    }
}
