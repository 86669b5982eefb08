//! ANC-over-RTP wire records.
//!
//! This module defines the value types produced by decoding and consumed by
//! encoding: the RTP header, the ANC payload envelope, and the individual
//! ANC data packet. All are plain owned records with no identity beyond
//! their position in the containing sequence; a decode call and its caller
//! share nothing mutable.

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

use crate::constants::{
    ANC_PAYLOAD_HEADER_LENGTH_BYTES, RTP_HEADER_LENGTH_BYTES, RTP_VERSION,
};
use crate::st291::{self, ChecksumAccumulator};
use crate::types::{Did, HorizontalOffset, LineNumber, Sdid};

/// Interlace field indicator signaled by the F bits of the payload header.
///
/// Relates the RTP timestamp to a field of an interlaced SDI raster. The
/// value `0b01` is not valid; receivers are expected to skip a payload
/// carrying it, but the codec preserves it losslessly and leaves that
/// decision to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum InterlaceField {
    /// Progressive video, or no field specified.
    #[default]
    Unspecified = 0b00,
    /// Invalid indicator value.
    Invalid = 0b01,
    /// Timestamp refers to the first field of an interlaced signal.
    FirstField = 0b10,
    /// Timestamp refers to the second field of an interlaced signal.
    SecondField = 0b11,
}

impl From<u8> for InterlaceField {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0b00 => InterlaceField::Unspecified,
            0b01 => InterlaceField::Invalid,
            0b10 => InterlaceField::FirstField,
            _ => InterlaceField::SecondField,
        }
    }
}

impl From<InterlaceField> for u8 {
    fn from(field: InterlaceField) -> Self {
        field as u8
    }
}

/// RTP header of an ANC data packet, as extended by RFC 8331.
///
/// Covers the 12 fixed RTP octets plus the extended sequence number and
/// payload length words, 16 bytes on the wire. All fields are fixed width
/// with no dependencies; the record is constructed fresh per packet and
/// immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtpPacketHeader {
    /// RTP Version (V): Typically 2.
    pub version: u8,
    /// RTP Padding (P) bit.
    pub padding: bool,
    /// RTP Extension (X) bit.
    pub extension: bool,
    /// RTP CSRC Count (CC): Number of contributing source identifiers.
    pub csrc_count: u8,
    /// RTP Marker (M) bit. Set on the last ANC data RTP packet of a frame
    /// (progressive scan) or of a field (interlaced).
    pub marker: bool,
    /// RTP Payload Type (PT). ANC data uses a dynamically assigned type.
    pub payload_type: u8,
    /// RTP Sequence Number (SN).
    pub sequence_number: u16,
    /// RTP Timestamp.
    pub timestamp: u32,
    /// RTP Synchronization Source (SSRC) identifier.
    pub ssrc: u32,
    /// High-order bits of the extended 32-bit sequence number, as in
    /// RFC 4175.
    pub extended_sequence_number: u16,
    /// Octet count of the ANC message region, beginning with the C bit of
    /// the first message. The 4-byte ANC_Count / F / reserved header is not
    /// included; every message's word_align padding is.
    pub payload_length: u16,
}

impl Default for RtpPacketHeader {
    fn default() -> Self {
        Self {
            version: RTP_VERSION,
            padding: false,
            extension: false,
            csrc_count: 0,
            marker: false,
            payload_type: 0, // Assigned dynamically per RFC 8331
            sequence_number: 0,
            timestamp: 0,
            ssrc: 0, // Should be a unique random value
            extended_sequence_number: 0,
            payload_length: 0, // Computed when serializing a whole packet
        }
    }
}

/// ANC-over-RTP payload envelope: the interlace indicator plus an ordered
/// message sequence.
///
/// `ANC_Count` is not stored; it is derived from `messages.len()` on encode
/// and bounds the decode loop. An empty message sequence encodes to exactly
/// the 4-byte payload header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AncillaryPacket {
    /// F bits: which interlace field the RTP timestamp refers to.
    pub field: InterlaceField,
    /// The ANC data packets carried by this payload, in wire order.
    pub messages: Vec<AncillaryMessage>,
}

impl AncillaryPacket {
    /// Number of messages, the value of the wire ANC_Count field.
    ///
    /// Exceeding 255 is representable in memory but rejected by the encoder.
    pub fn anc_count(&self) -> usize {
        self.messages.len()
    }

    /// Total payload length in bytes once encoded, header included.
    pub fn wire_length_bytes(&self) -> usize {
        ANC_PAYLOAD_HEADER_LENGTH_BYTES
            + self
                .messages
                .iter()
                .map(|message| message.wire_bits() / 8)
                .sum::<usize>()
    }

    /// Value for the RTP header's length field: the message region only,
    /// excluding the 4-byte payload header.
    pub fn message_region_bytes(&self) -> usize {
        self.wire_length_bytes() - ANC_PAYLOAD_HEADER_LENGTH_BYTES
    }

    /// Total RTP packet length in bytes once encoded behind its header.
    pub fn rtp_packet_length_bytes(&self) -> usize {
        RTP_HEADER_LENGTH_BYTES + self.wire_length_bytes()
    }
}

/// One ANC data packet (SMPTE ST 291-1), the variable-length unit of the
/// payload.
///
/// `Data_Count`, its parity pair, and the word_align padding are not stored:
/// they are derived from `user_data` during encoding. `checksum` holds the
/// wire checksum word as decoded; encoders recompute it, so a record built
/// by hand should use [`AncillaryMessage::new`] or copy
/// [`checksum_word`](AncillaryMessage::checksum_word) to round-trip equal.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncillaryMessage {
    /// C flag: set when the ANC data corresponds to the color-difference
    /// channel; clear for luma, SD, or channel-less sources.
    pub c: bool,
    /// Digital interface line number, or a generic-region sentinel.
    pub line_number: LineNumber,
    /// Horizontal offset from SAV in 10-bit words, or a sentinel.
    pub horizontal_offset: HorizontalOffset,
    /// S flag: whether `stream_num` identifies the source data stream.
    pub data_stream_flag: bool,
    /// Source data stream number minus one; meaningful only when
    /// `data_stream_flag` is set. For unnumbered interfaces, 0 is link A /
    /// left eye and 1 is link B / right eye.
    pub stream_num: u8,
    /// Data identification word, full 10 bits.
    pub did: Did,
    /// Secondary data identification word (Type 2) or data block number
    /// (Type 1).
    pub sdid: Sdid,
    /// User data payload octets. Each widens to a 10-bit word on the wire.
    #[serde_as(as = "Hex")]
    pub user_data: Vec<u8>,
    /// Checksum word as carried on the wire.
    pub checksum: u16,
}

impl Default for AncillaryMessage {
    fn default() -> Self {
        Self {
            c: false,
            line_number: LineNumber::UNSPECIFIED, // No raster location claimed
            horizontal_offset: HorizontalOffset::UNSPECIFIED,
            data_stream_flag: false,
            stream_num: 0,
            did: Did::new(0),
            sdid: Sdid::new(0),
            user_data: Vec::new(),
            checksum: 0,
        }
    }
}

impl AncillaryMessage {
    /// Creates a message with the given identification words and payload,
    /// location left unspecified and the checksum word pre-computed.
    pub fn new(did: Did, sdid: Sdid, user_data: Vec<u8>) -> Self {
        let mut message = Self {
            did,
            sdid,
            user_data,
            ..Self::default()
        };
        message.checksum = message.checksum_word();
        message
    }

    /// Number of user data words, the value of the wire Data_Count field.
    ///
    /// Exceeding 255 is representable in memory but rejected by the encoder.
    pub fn data_count(&self) -> usize {
        self.user_data.len()
    }

    /// Computes the checksum word over this record's fields, deriving the
    /// canonical parity bits for the Data_Count and user data words.
    ///
    /// Only the low 8 bits of the payload length contribute to the
    /// Data_Count word, matching what the encoder can represent.
    pub fn checksum_word(&self) -> u16 {
        let mut checksum = ChecksumAccumulator::new();
        checksum.add_word(self.did.value());
        checksum.add_word(self.sdid.value());
        checksum.add_word(st291::with_parity(self.user_data.len() as u8));
        for &octet in &self.user_data {
            checksum.add_word(st291::with_parity(octet));
        }
        checksum.value()
    }

    /// Whether the stored checksum word matches the computed one.
    ///
    /// Freshly encoded messages always verify. A decoded message whose
    /// user data words carried stale parity may fail here even if the wire
    /// sum was internally consistent; those cases are already surfaced as
    /// parity warnings during decode.
    pub fn verify_checksum(&self) -> bool {
        self.checksum == self.checksum_word()
    }

    /// Total wire bits of this message including word_align padding; always
    /// a multiple of 32.
    pub fn wire_bits(&self) -> usize {
        st291::message_wire_bits(self.user_data.len())
    }
}
