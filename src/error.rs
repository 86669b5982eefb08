//! ANC codec error types and advisory warnings.
//!
//! This module defines the error types used throughout the ancstar library.
//! It distinguishes between parsing errors (fatal for the decode call that
//! raised them), building errors (fatal for the encode call), and advisory
//! integrity warnings that accompany a successful decode. The `thiserror`
//! crate is used for ergonomic error definitions.

use std::fmt;

use thiserror::Error;

/// Wire structure being processed when a parsing error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseContext {
    /// The 16-byte RTP header, including extended sequence number and length.
    RtpHeader,
    /// The 4-byte ANC_Count / F / reserved payload header.
    PayloadHeader,
    /// The fixed fields of an ANC message, C through Data_Count.
    MessageHeader,
    /// The packed 10-bit user data words of an ANC message.
    UserDataWords,
    /// The 10-bit checksum word trailing the user data.
    ChecksumWord,
    /// The zero padding aligning a message to a 32-bit boundary.
    WordAlign,
    /// The ANC payload region addressed by the RTP header's length field.
    PayloadRegion,
}

impl fmt::Display for ParseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseContext::RtpHeader => "RTP header",
            ParseContext::PayloadHeader => "ANC payload header",
            ParseContext::MessageHeader => "ANC message header",
            ParseContext::UserDataWords => "user data words",
            ParseContext::ChecksumWord => "checksum word",
            ParseContext::WordAlign => "word-alignment padding",
            ParseContext::PayloadRegion => "ANC payload region",
        };
        f.write_str(name)
    }
}

/// Wire field being written when a building error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Version,
    PaddingFlag,
    ExtensionFlag,
    CsrcCount,
    Marker,
    PayloadType,
    SequenceNumber,
    Timestamp,
    Ssrc,
    ExtendedSequenceNumber,
    PayloadLength,
    AncCount,
    InterlaceField,
    Reserved,
    C,
    LineNumber,
    HorizontalOffset,
    DataStreamFlag,
    StreamNum,
    Did,
    Sdid,
    DataCountParity,
    DataCount,
    UserDataWord,
    Checksum,
    WordAlign,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Version => "Version",
            Field::PaddingFlag => "Padding flag",
            Field::ExtensionFlag => "Extension flag",
            Field::CsrcCount => "CSRC count",
            Field::Marker => "Marker",
            Field::PayloadType => "Payload type",
            Field::SequenceNumber => "Sequence number",
            Field::Timestamp => "Timestamp",
            Field::Ssrc => "SSRC",
            Field::ExtendedSequenceNumber => "Extended sequence number",
            Field::PayloadLength => "Payload length",
            Field::AncCount => "ANC_Count",
            Field::InterlaceField => "F (interlace field)",
            Field::Reserved => "Reserved bits",
            Field::C => "C (channel flag)",
            Field::LineNumber => "Line_Number",
            Field::HorizontalOffset => "Horizontal_Offset",
            Field::DataStreamFlag => "S (data stream flag)",
            Field::StreamNum => "StreamNum",
            Field::Did => "DID",
            Field::Sdid => "SDID",
            Field::DataCountParity => "Data_Count parity",
            Field::DataCount => "Data_Count",
            Field::UserDataWord => "User_Data_Word",
            Field::Checksum => "Checksum_Word",
            Field::WordAlign => "word_align",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while decoding ANC wire data.
///
/// All variants are fatal for the decode call that raised them; a failed
/// decode never yields partial output and never corrupts other in-flight
/// decodes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AncParsingError {
    /// Buffer ended before a field or record was complete.
    #[error("Truncated input: needed {needed} bits, had {got} in {context}")]
    TruncatedInput {
        needed: usize,
        got: usize,
        context: ParseContext,
    },

    /// A read was requested at an unsupported bit width.
    #[error("Invalid bit width {width}: reads support 1 through 32 bits")]
    InvalidWidth { width: usize },

    /// A seek targeted a bit position beyond the end of the buffer.
    #[error("Seek out of bounds: target bit {target}, buffer holds {limit} bits")]
    SeekOutOfBounds { target: usize, limit: usize },
}

/// Errors that can occur while encoding ANC records to wire data.
///
/// These indicate caller input that cannot be represented on the wire; the
/// encode call returns no output when it fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AncBuildingError {
    /// A value does not fit the declared width of its wire field.
    #[error("Field overflow: value 0x{value:X} does not fit in {width} bits for {field}")]
    FieldOverflow {
        field: Field,
        value: u32,
        width: usize,
    },

    /// A write was requested at an unsupported bit width.
    #[error("Invalid bit width {width}: writes support 1 through 32 bits")]
    InvalidWidth { width: usize },
}

/// Main error type for ancstar operations.
///
/// Consolidates parsing and building failures for callers that drive both
/// directions of the codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AncError {
    /// Error during wire data decoding.
    #[error("Parsing error: {0}")]
    Parsing(#[from] AncParsingError),

    /// Error during wire data encoding.
    #[error("Building error: {0}")]
    Building(#[from] AncBuildingError),
}

/// Non-fatal integrity findings surfaced by a successful decode.
///
/// Some deployed gateways emit stale parity or checksum words, so these are
/// advisory only: the decoded record is still returned and the caller decides
/// whether to discard it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// The Data_Count parity pair does not match the decoded Data_Count.
    #[error(
        "Data_Count parity mismatch in message {message_index}: expected 0b{expected:02b}, got 0b{got:02b}"
    )]
    DataCountParityMismatch {
        message_index: usize,
        expected: u8,
        got: u8,
    },

    /// A user data word's parity pair does not match its payload octet.
    #[error(
        "User data parity mismatch in message {message_index}, word {word_index}: expected 0b{expected:02b}, got 0b{got:02b}"
    )]
    UserDataParityMismatch {
        message_index: usize,
        word_index: usize,
        expected: u8,
        got: u8,
    },

    /// The checksum word does not match the sum of the received words.
    #[error(
        "Checksum mismatch in message {message_index}: received 0x{received:03X}, calculated 0x{calculated:03X}"
    )]
    ChecksumMismatch {
        message_index: usize,
        received: u16,
        calculated: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_input_error_display() {
        let err = AncParsingError::TruncatedInput {
            needed: 10,
            got: 4,
            context: ParseContext::ChecksumWord,
        };
        assert_eq!(
            format!("{}", err),
            "Truncated input: needed 10 bits, had 4 in checksum word"
        );
    }

    #[test]
    fn field_overflow_error_display() {
        let err = AncBuildingError::FieldOverflow {
            field: Field::LineNumber,
            value: 0x800,
            width: 11,
        };
        assert_eq!(
            format!("{}", err),
            "Field overflow: value 0x800 does not fit in 11 bits for Line_Number"
        );
    }

    #[test]
    fn checksum_mismatch_warning_display() {
        let warning = IntegrityWarning::ChecksumMismatch {
            message_index: 2,
            received: 0x155,
            calculated: 0x2AA,
        };
        assert_eq!(
            format!("{}", warning),
            "Checksum mismatch in message 2: received 0x155, calculated 0x2AA"
        );
    }

    #[test]
    fn anc_error_from_parsing_error() {
        let parsing_err = AncParsingError::SeekOutOfBounds {
            target: 99,
            limit: 64,
        };
        let err = AncError::from(parsing_err.clone());
        match err {
            AncError::Parsing(inner) => assert_eq!(inner, parsing_err),
            _ => panic!("Incorrect AncError variant"),
        }
    }

    #[test]
    fn anc_error_from_building_error() {
        let building_err = AncBuildingError::InvalidWidth { width: 33 };
        let err = AncError::from(building_err.clone());
        match err {
            AncError::Building(inner) => assert_eq!(inner, building_err),
            _ => panic!("Incorrect AncError variant"),
        }
    }
}
