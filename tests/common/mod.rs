//! Common test utilities for ancstar integration tests.
//!
//! Provides shared fixture builders and wire-manipulation helpers used
//! across the payload, header, and integrity test suites.

#![allow(dead_code)] // Not every suite uses every helper

use ancstar::{AncillaryMessage, AncillaryPacket, Did, InterlaceField, RtpPacketHeader, Sdid};

/// Builds a message with a deterministic patterned payload of `len` octets.
pub fn patterned_message(did: u16, sdid: u16, len: usize) -> AncillaryMessage {
    let payload = (0..len).map(|i| (i * 7 + 3) as u8).collect();
    AncillaryMessage::new(Did::new(did), Sdid::new(sdid), payload)
}

/// Wraps a single message in a payload envelope.
pub fn single_message_packet(message: AncillaryMessage) -> AncillaryPacket {
    AncillaryPacket {
        field: InterlaceField::Unspecified,
        messages: vec![message],
    }
}

/// Builds an RTP header with the fields integration tests care about.
pub fn test_rtp_header(sequence_number: u16, timestamp: u32, marker: bool) -> RtpPacketHeader {
    RtpPacketHeader {
        payload_type: 97,
        sequence_number,
        timestamp,
        marker,
        ssrc: 0x2110_0040,
        ..Default::default()
    }
}

/// Flips one bit of a wire buffer, MSB-first addressing to match the codec.
pub fn flip_bit(wire: &mut [u8], bit: usize) {
    wire[bit / 8] ^= 1 << (7 - (bit % 8));
}
