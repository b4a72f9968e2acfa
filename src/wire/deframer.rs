//! Receiver-side frame reassembly, validation, and loss accounting.
//!
//! The link transport is free to refragment transmitted frames, so the
//! receiver sees arbitrary byte chunks. [`Deframer`] buffers those chunks and
//! resynchronizes on the start marker; [`DecodedFrame`] validates and unpacks
//! one frame; [`LossTracker`] turns sequence-number gaps into a loss ratio.
//! A gap signals link-level packet loss, not an encoder defect.

use tracing::trace;

use crate::error::{Result, StreamError};
use crate::types::{CHANNEL_COUNT, SampleBlock, TICKS_PER_FRAME};

use super::{
    CHECKSUM_OFFSET, END_MARKER, END_OFFSET, FRAME_LEN, PAYLOAD_OFFSET, SAMPLE_BYTES, SEQ_OFFSET,
    START_MARKER,
};

/// A validated, unpacked data frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    /// Sequence number carried by the frame.
    pub sequence: u8,

    /// Unpacked samples, sign-extended from 24 to 32 bits.
    pub samples: SampleBlock,
}

impl DecodedFrame {
    /// Validate and unpack one wire frame.
    ///
    /// Checks length, both markers, and the payload checksum before touching
    /// the samples. Callers are expected to drop frames that fail here and
    /// keep consuming the stream.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != FRAME_LEN {
            return Err(StreamError::FrameLength { len: bytes.len(), expected: FRAME_LEN });
        }
        if bytes[0] != START_MARKER {
            return Err(StreamError::FrameMarker {
                offset: 0,
                expected: START_MARKER,
                found: bytes[0],
            });
        }
        if bytes[END_OFFSET] != END_MARKER {
            return Err(StreamError::FrameMarker {
                offset: END_OFFSET,
                expected: END_MARKER,
                found: bytes[END_OFFSET],
            });
        }

        let computed: u8 = bytes[PAYLOAD_OFFSET..CHECKSUM_OFFSET]
            .iter()
            .fold(0u8, |sum, &byte| sum.wrapping_add(byte));
        if computed != bytes[CHECKSUM_OFFSET] {
            return Err(StreamError::Checksum { computed, carried: bytes[CHECKSUM_OFFSET] });
        }

        let mut samples: SampleBlock = [[0; CHANNEL_COUNT]; TICKS_PER_FRAME];
        for (tick, row) in samples.iter_mut().enumerate() {
            for (channel, sample) in row.iter_mut().enumerate() {
                let idx = PAYLOAD_OFFSET + (tick * CHANNEL_COUNT + channel) * SAMPLE_BYTES;
                let raw = (u32::from(bytes[idx]) << 16)
                    | (u32::from(bytes[idx + 1]) << 8)
                    | u32::from(bytes[idx + 2]);
                // Sign-extend 24 -> 32 bits
                *sample = if raw & 0x0080_0000 != 0 {
                    (raw | 0xFF00_0000) as i32
                } else {
                    raw as i32
                };
            }
        }

        Ok(Self { sequence: bytes[SEQ_OFFSET], samples })
    }
}

/// Reassembles fixed-size frames from an arbitrarily chunked byte stream.
///
/// Bytes that precede a start marker are discarded one at a time until a
/// marker leads the buffer, so the deframer recovers alignment after a
/// partial frame (mid-stream connect, dropped fragment). Marker resync is
/// positional only; content validation belongs to [`DecodedFrame::parse`].
#[derive(Debug, Default)]
pub struct Deframer {
    buffer: Vec<u8>,
}

impl Deframer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one transport chunk.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Pop the next aligned frame, if a complete one is buffered.
    pub fn next_frame(&mut self) -> Option<[u8; FRAME_LEN]> {
        // Resync: drop leading bytes until a start marker heads the buffer
        match self.buffer.iter().position(|&byte| byte == START_MARKER) {
            Some(0) => {}
            Some(skip) => {
                trace!(skipped = skip, "Resynchronized on start marker");
                self.buffer.drain(..skip);
            }
            None => {
                let discarded = self.buffer.len();
                if discarded > 0 {
                    trace!(discarded, "No start marker in buffer");
                }
                self.buffer.clear();
                return None;
            }
        }

        if self.buffer.len() < FRAME_LEN {
            return None;
        }

        let mut frame = [0u8; FRAME_LEN];
        frame.copy_from_slice(&self.buffer[..FRAME_LEN]);
        self.buffer.drain(..FRAME_LEN);
        Some(frame)
    }

    /// Bytes currently buffered awaiting a complete frame.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

/// Sequence-gap loss accounting.
///
/// Mirrors what a receiver can observe: each frame's sequence number is
/// compared with the previous one, and the wrapped difference counts how many
/// frames the sender must have produced in between. The first frame only
/// seeds the tracker.
#[derive(Debug, Default)]
pub struct LossTracker {
    last_seq: Option<u8>,
    expected: u64,
    received: u64,
}

impl LossTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one received frame's sequence number.
    pub fn record(&mut self, sequence: u8) {
        if let Some(last) = self.last_seq {
            self.expected += u64::from(sequence.wrapping_sub(last));
            self.received += 1;
        }
        self.last_seq = Some(sequence);
    }

    /// Frames received since the tracker was seeded.
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Frames the sender produced since the tracker was seeded, inferred
    /// from sequence numbers.
    pub fn expected(&self) -> u64 {
        self.expected
    }

    /// Fraction of frames lost, in `[0.0, 1.0]`. Zero before any gap can be
    /// observed.
    pub fn loss_ratio(&self) -> f64 {
        if self.expected == 0 {
            return 0.0;
        }
        (self.expected - self.received) as f64 / self.expected as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::FrameEncoder;

    fn frame_with(value: i32) -> [u8; FRAME_LEN] {
        FrameEncoder::new().encode(&[[value; CHANNEL_COUNT]; TICKS_PER_FRAME])
    }

    #[test]
    fn parse_round_trips_sign_extension() {
        for value in [0, 1, -1, 4_000_000, -4_000_000, 8_388_607, -8_388_608] {
            let decoded = DecodedFrame::parse(&frame_with(value)).unwrap();
            assert_eq!(decoded.sequence, 0);
            for row in decoded.samples {
                assert_eq!(row, [value; CHANNEL_COUNT]);
            }
        }
    }

    #[test]
    fn parse_rejects_bad_length() {
        let err = DecodedFrame::parse(&[0u8; 10]).unwrap_err();
        assert!(matches!(err, StreamError::FrameLength { len: 10, .. }));
    }

    #[test]
    fn parse_rejects_bad_markers() {
        let mut frame = frame_with(42);
        frame[0] = 0x00;
        assert!(matches!(
            DecodedFrame::parse(&frame).unwrap_err(),
            StreamError::FrameMarker { offset: 0, .. }
        ));

        let mut frame = frame_with(42);
        frame[END_OFFSET] = 0x00;
        assert!(matches!(
            DecodedFrame::parse(&frame).unwrap_err(),
            StreamError::FrameMarker { offset: END_OFFSET, .. }
        ));
    }

    #[test]
    fn parse_rejects_corrupt_payload() {
        let mut frame = frame_with(42);
        frame[PAYLOAD_OFFSET] ^= 0xFF;
        assert!(matches!(
            DecodedFrame::parse(&frame).unwrap_err(),
            StreamError::Checksum { .. }
        ));
    }

    #[test]
    fn deframer_reassembles_across_fragment_boundaries() {
        let mut encoder = FrameEncoder::new();
        let mut stream = Vec::new();
        for value in [100, -200, 300] {
            stream.extend_from_slice(&encoder.encode(&[[value; CHANNEL_COUNT]; TICKS_PER_FRAME]));
        }

        // Feed in chunks that never align with frame boundaries
        let mut deframer = Deframer::new();
        let mut frames = Vec::new();
        for chunk in stream.chunks(7) {
            deframer.push(chunk);
            while let Some(frame) = deframer.next_frame() {
                frames.push(DecodedFrame::parse(&frame).unwrap());
            }
        }

        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].samples[0][0], 100);
        assert_eq!(frames[1].samples[0][0], -200);
        assert_eq!(frames[2].samples[0][0], 300);
        assert_eq!(
            frames.iter().map(|f| f.sequence).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn deframer_resyncs_past_garbage() {
        let mut deframer = Deframer::new();
        deframer.push(&[0x00, 0x11, 0x22]); // leading noise, no marker
        assert_eq!(deframer.next_frame(), None);
        assert_eq!(deframer.pending(), 0);

        deframer.push(&[0x55]); // more noise ahead of a real frame
        deframer.push(&frame_with(7));
        let frame = deframer.next_frame().expect("frame after resync");
        assert_eq!(DecodedFrame::parse(&frame).unwrap().samples[0][0], 7);
    }

    #[test]
    fn loss_tracker_counts_gaps_and_wraps() {
        let mut tracker = LossTracker::new();
        tracker.record(250); // seed only
        assert_eq!(tracker.expected(), 0);

        tracker.record(251);
        tracker.record(252);
        // 253 and 254 lost; 255 wraps into 0
        tracker.record(0);

        assert_eq!(tracker.received(), 3);
        assert_eq!(tracker.expected(), 6);
        assert!((tracker.loss_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn loss_tracker_sees_no_loss_in_contiguous_stream() {
        let mut tracker = LossTracker::new();
        for seq in 0u16..512 {
            tracker.record((seq % 256) as u8);
        }
        assert_eq!(tracker.loss_ratio(), 0.0);
        assert_eq!(tracker.received(), 511);
        assert_eq!(tracker.expected(), 511);
    }
}
