//! Sample payload unit: two ticks of 8-channel, 24-bit data.

/// One scalar sample, per channel per tick.
///
/// Carried as `i32` but range-constrained to the signed 24-bit range by every
/// producer in this crate; the wire encoder truncates anything wider.
pub type Sample = i32;

/// Number of signal channels per tick.
pub const CHANNEL_COUNT: usize = 8;

/// Number of consecutive ticks batched into one frame.
pub const TICKS_PER_FRAME: usize = 2;

/// Largest value representable in 24-bit two's complement.
pub const SAMPLE_MAX: Sample = 8_388_607;

/// Smallest value representable in 24-bit two's complement.
pub const SAMPLE_MIN: Sample = -8_388_608;

/// The payload of one frame: `TICKS_PER_FRAME` rows of `CHANNEL_COUNT`
/// samples. Produced by the generator, consumed immediately by the encoder,
/// never mutated in between.
pub type SampleBlock = [[Sample; CHANNEL_COUNT]; TICKS_PER_FRAME];

/// Whether a sample fits the 24-bit wire width without truncation.
pub fn in_wire_range(sample: Sample) -> bool {
    (SAMPLE_MIN..=SAMPLE_MAX).contains(&sample)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_range_bounds() {
        assert!(in_wire_range(SAMPLE_MAX));
        assert!(in_wire_range(SAMPLE_MIN));
        assert!(in_wire_range(0));
        assert!(!in_wire_range(SAMPLE_MAX + 1));
        assert!(!in_wire_range(SAMPLE_MIN - 1));
    }
}
