//! SMPTE ST 2110-40 (RFC 8331) and SMPTE ST 291-1 protocol constants.
//!
//! Defines the bit widths of every wire field together with payload-level
//! length constants. Sentinel values for raster coordinates live on their
//! newtypes in `crate::types`.

/// Media type identifier for ANC data payloads (RFC 8331, Section 4).
///
/// Metadata tag only (e.g., SDP declarations); never appears in the bitstream.
pub const ANC_MIMETYPE: &str = "video/smpte291";

// --- RTP Header Constants (RFC 3550 / RFC 8331) ---

/// RTP version number (typically 2).
pub const RTP_VERSION: u8 = 2;
/// Length of the ANC RTP header in bytes, including the extended sequence
/// number and payload length words that RFC 8331 prepends to the payload.
pub const RTP_HEADER_LENGTH_BYTES: usize = 16;
/// Maximum number of CSRC identifiers in an RTP header.
pub const RTP_MAX_CSRC_COUNT: u8 = 15;
/// Maximum value for an RTP payload type (ANC uses a dynamic assignment).
pub const RTP_PAYLOAD_TYPE_MAX: u8 = 127;

// --- ANC Payload Header (RFC 8331, Section 2.1) ---

/// Length of the ANC_Count / F / reserved payload header in bytes.
pub const ANC_PAYLOAD_HEADER_LENGTH_BYTES: usize = 4;
/// Width of the ANC_Count field. A payload carries at most 255 messages.
pub const ANC_COUNT_BITS: usize = 8;
/// Width of the F (interlace field) indicator.
pub const INTERLACE_FIELD_BITS: usize = 2;
/// Width of the reserved zero bits padding the payload header to 32 bits.
pub const RESERVED_BITS: usize = 22;

// --- ANC Data Packet Fields (SMPTE ST 291-1 via RFC 8331) ---

/// Width of the C (color-difference channel) flag.
pub const C_FLAG_BITS: usize = 1;
/// Width of the Line_Number field.
pub const LINE_NUMBER_BITS: usize = 11;
/// Width of the Horizontal_Offset field.
pub const HORIZONTAL_OFFSET_BITS: usize = 12;
/// Width of the S (data stream) flag.
pub const DATA_STREAM_FLAG_BITS: usize = 1;
/// Width of the StreamNum field.
pub const STREAM_NUM_BITS: usize = 7;
/// Width of the DID word (8 data bits plus 2 parity bits).
pub const DID_BITS: usize = 10;
/// Width of the SDID (or DBN, for Type 1 packets) word.
pub const SDID_BITS: usize = 10;
/// Width of the two parity bits of the Data_Count word.
pub const DATA_COUNT_PARITY_BITS: usize = 2;
/// Width of the Data_Count value itself.
pub const DATA_COUNT_BITS: usize = 8;
/// Width of one User_Data_Word: an 8-bit octet plus 2 parity bits.
pub const USER_DATA_WORD_BITS: usize = 10;
/// Width of the Checksum_Word.
pub const CHECKSUM_BITS: usize = 10;

/// Bits of an ANC message before the user data words begin.
pub const MESSAGE_HEADER_BITS: usize = C_FLAG_BITS
    + LINE_NUMBER_BITS
    + HORIZONTAL_OFFSET_BITS
    + DATA_STREAM_FLAG_BITS
    + STREAM_NUM_BITS
    + DID_BITS
    + SDID_BITS
    + DATA_COUNT_PARITY_BITS
    + DATA_COUNT_BITS;
/// Fixed bits of an ANC message: header fields plus the checksum word.
pub const MESSAGE_OVERHEAD_BITS: usize = MESSAGE_HEADER_BITS + CHECKSUM_BITS;

/// Mask keeping the nine least significant bits summed by the checksum.
pub const CHECKSUM_SUM_MASK: u16 = 0x1FF;
