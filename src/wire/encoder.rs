//! Device-side frame encoder.

use crate::types::SampleBlock;

use super::{
    CHECKSUM_OFFSET, END_MARKER, END_OFFSET, FRAME_LEN, PAYLOAD_OFFSET, SEQ_OFFSET, START_MARKER,
};

/// Packs sample blocks into fixed-size wire frames.
///
/// The encoder's only state is the sequence counter, which increments by
/// exactly one per encoded frame and wraps modulo 256. A receiver observing a
/// sequence gap is seeing link-level packet loss, never an encoder skip —
/// there is no code path that consumes a sequence number without producing a
/// frame.
///
/// Encoding is deterministic, allocation-free, and has no error path:
/// out-of-range samples are bit-truncated to 24 bits (not saturated) so that
/// output stays bit-exact against golden frames.
#[derive(Debug, Default)]
pub struct FrameEncoder {
    seq: u8,
}

impl FrameEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number the next encoded frame will carry.
    pub fn next_sequence(&self) -> u8 {
        self.seq
    }

    /// Encode one sample block into a complete wire frame.
    pub fn encode(&mut self, block: &SampleBlock) -> [u8; FRAME_LEN] {
        let mut frame = [0u8; FRAME_LEN];
        frame[0] = START_MARKER;
        frame[SEQ_OFFSET] = self.seq;
        self.seq = self.seq.wrapping_add(1);

        let mut idx = PAYLOAD_OFFSET;
        let mut checksum = 0u8;
        for tick in block {
            for &sample in tick {
                // 24-bit big-endian two's complement; wider input wraps.
                let raw = (sample as u32) & 0x00FF_FFFF;
                for byte in [(raw >> 16) as u8, (raw >> 8) as u8, raw as u8] {
                    frame[idx] = byte;
                    idx += 1;
                    checksum = checksum.wrapping_add(byte);
                }
            }
        }
        debug_assert_eq!(idx, CHECKSUM_OFFSET);

        frame[CHECKSUM_OFFSET] = checksum;
        frame[END_OFFSET] = END_MARKER;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CHANNEL_COUNT, SAMPLE_MAX, SAMPLE_MIN, TICKS_PER_FRAME};
    use proptest::prelude::*;

    fn block_of(value: i32) -> SampleBlock {
        [[value; CHANNEL_COUNT]; TICKS_PER_FRAME]
    }

    #[test]
    fn golden_frame_matches_firmware_layout() {
        // One tick of +4_000_000 on channels 0-3 and -4_000_000 on 4-7,
        // repeated for both ticks: the generator's high phase.
        let mut block = [[4_000_000; CHANNEL_COUNT]; TICKS_PER_FRAME];
        for tick in &mut block {
            for sample in tick.iter_mut().skip(CHANNEL_COUNT / 2) {
                *sample = -4_000_000;
            }
        }

        let frame = FrameEncoder::new().encode(&block);

        assert_eq!(frame[0], 0xA0);
        assert_eq!(frame[1], 0); // first frame from a fresh encoder
        // +4_000_000 = 0x3D0900
        assert_eq!(&frame[2..5], &[0x3D, 0x09, 0x00]);
        // -4_000_000 = 0xC2F700 in 24-bit two's complement
        assert_eq!(&frame[14..17], &[0xC2, 0xF7, 0x00]);
        // second tick repeats the first
        assert_eq!(&frame[2..26], &frame[26..50]);

        let expected: u8 =
            frame[2..50].iter().fold(0u8, |sum, &byte| sum.wrapping_add(byte));
        assert_eq!(frame[50], expected);
        assert_eq!(frame[51], 0xC0);
    }

    #[test]
    fn sequence_increments_and_wraps() {
        let mut encoder = FrameEncoder::new();
        let block = block_of(0);

        for expected in 0u16..=300 {
            let frame = encoder.encode(&block);
            assert_eq!(frame[SEQ_OFFSET], (expected % 256) as u8);
        }
        // 255 -> 0 wrap happened inside the loop; confirm continuity after it
        assert_eq!(encoder.next_sequence(), 45);
    }

    #[test]
    fn out_of_range_samples_truncate_not_saturate() {
        let mut encoder = FrameEncoder::new();

        // SAMPLE_MAX + 1 overflows into the 24-bit sign bit: 0x800000
        let frame = encoder.encode(&block_of(SAMPLE_MAX + 1));
        assert_eq!(&frame[2..5], &[0x80, 0x00, 0x00]);

        // SAMPLE_MIN - 1 wraps to 0x7FFFFF
        let frame = encoder.encode(&block_of(SAMPLE_MIN - 1));
        assert_eq!(&frame[2..5], &[0x7F, 0xFF, 0xFF]);
    }

    proptest! {
        #[test]
        fn frames_are_always_well_formed(
            samples in prop::array::uniform2(prop::array::uniform8(any::<i32>()))
        ) {
            let mut encoder = FrameEncoder::new();
            let frame = encoder.encode(&samples);

            prop_assert_eq!(frame.len(), FRAME_LEN);
            prop_assert_eq!(frame[0], START_MARKER);
            prop_assert_eq!(frame[END_OFFSET], END_MARKER);

            let sum: u8 = frame[PAYLOAD_OFFSET..CHECKSUM_OFFSET]
                .iter()
                .fold(0u8, |acc, &byte| acc.wrapping_add(byte));
            prop_assert_eq!(frame[CHECKSUM_OFFSET], sum);
        }
    }
}
