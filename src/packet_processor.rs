//! ANC packet serialization and deserialization.
//!
//! Each wire structure is a fixed, ordered field layout applied against a
//! shared bit cursor: decoding walks the RTP header, then the payload
//! header, then `ANC_Count` messages back to back, each message consuming a
//! variable number of bits depending on its own Data_Count. Encoding mirrors
//! the same order, resolving derived fields (counts, parity, checksum,
//! alignment) through `crate::st291` before or after the fields they depend
//! on as bit order requires.

use bytes::Bytes;

use crate::bitstream::{BitReader, BitWriter};
use crate::constants::{
    ANC_COUNT_BITS, ANC_PAYLOAD_HEADER_LENGTH_BYTES, CHECKSUM_BITS, DATA_COUNT_BITS,
    DATA_COUNT_PARITY_BITS, DID_BITS, HORIZONTAL_OFFSET_BITS, INTERLACE_FIELD_BITS,
    LINE_NUMBER_BITS, RESERVED_BITS, RTP_HEADER_LENGTH_BYTES, SDID_BITS, STREAM_NUM_BITS,
};
use crate::error::{AncBuildingError, AncParsingError, Field, IntegrityWarning, ParseContext};
use crate::protocol_types::{AncillaryMessage, AncillaryPacket, InterlaceField, RtpPacketHeader};
use crate::st291::{self, ChecksumAccumulator};
use crate::types::{Did, HorizontalOffset, LineNumber, Sdid};
use crate::user_data;

/// Outcome of a successful ANC payload decode: the reconstructed packet
/// plus any advisory integrity findings.
///
/// Warnings never abort a decode; the caller decides whether a packet with
/// stale parity or a failed checksum is worth keeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncPayloadParse {
    /// The decoded payload envelope and its messages.
    pub packet: AncillaryPacket,
    /// Parity and checksum findings, in wire order.
    pub warnings: Vec<IntegrityWarning>,
}

/// Outcome of decoding a whole RTP packet carrying ANC data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpPacketParse {
    /// The 16-byte RTP header.
    pub header: RtpPacketHeader,
    /// The payload decode, scoped to the region the header's length field
    /// addresses.
    pub payload: AncPayloadParse,
}

/// Deserializes the 16-byte RTP header of an ANC data packet.
///
/// No field is semantically validated; the header is a fixed layout and
/// this is a bit-exact codec, not a stream policy layer.
///
/// # Errors
/// - [`AncParsingError::TruncatedInput`] - Fewer than 16 bytes of input
pub fn deserialize_rtp_header(data: &[u8]) -> Result<RtpPacketHeader, AncParsingError> {
    let mut reader = BitReader::new(data);
    let context = ParseContext::RtpHeader;

    Ok(RtpPacketHeader {
        version: reader.read_bits(2, context)? as u8,
        padding: reader.read_flag(context)?,
        extension: reader.read_flag(context)?,
        csrc_count: reader.read_bits(4, context)? as u8,
        marker: reader.read_flag(context)?,
        payload_type: reader.read_bits(7, context)? as u8,
        sequence_number: reader.read_bits(16, context)? as u16,
        timestamp: reader.read_bits(32, context)?,
        ssrc: reader.read_bits(32, context)?,
        extended_sequence_number: reader.read_bits(16, context)? as u16,
        payload_length: reader.read_bits(16, context)? as u16,
    })
}

/// Serializes an RTP header to its 16 wire bytes.
///
/// # Errors
/// - [`AncBuildingError::FieldOverflow`] - A field value exceeds its width
///   (e.g., `version` > 3, `csrc_count` > 15, `payload_type` > 127)
pub fn serialize_rtp_header(header: &RtpPacketHeader) -> Result<Bytes, AncBuildingError> {
    let mut writer = BitWriter::with_capacity(RTP_HEADER_LENGTH_BYTES);

    writer.write_bits(header.version as u32, 2, Field::Version)?;
    writer.write_flag(header.padding, Field::PaddingFlag)?;
    writer.write_flag(header.extension, Field::ExtensionFlag)?;
    writer.write_bits(header.csrc_count as u32, 4, Field::CsrcCount)?;
    writer.write_flag(header.marker, Field::Marker)?;
    writer.write_bits(header.payload_type as u32, 7, Field::PayloadType)?;
    writer.write_bits(header.sequence_number as u32, 16, Field::SequenceNumber)?;
    writer.write_bits(header.timestamp, 32, Field::Timestamp)?;
    writer.write_bits(header.ssrc, 32, Field::Ssrc)?;
    writer.write_bits(
        header.extended_sequence_number as u32,
        16,
        Field::ExtendedSequenceNumber,
    )?;
    writer.write_bits(header.payload_length as u32, 16, Field::PayloadLength)?;

    Ok(writer.into_bytes())
}

/// Deserializes an ANC payload: the 4-byte payload header followed by
/// `ANC_Count` variable-length messages.
///
/// The reserved bits are skipped without validation. Trailing bytes beyond
/// the last message are tolerated (RTP-level padding is the header's
/// concern), but a buffer that ends inside a message fails.
///
/// # Errors
/// - [`AncParsingError::TruncatedInput`] - Buffer ends inside the payload
///   header or any message
pub fn deserialize_anc_payload(data: &[u8]) -> Result<AncPayloadParse, AncParsingError> {
    let mut reader = BitReader::new(data);
    let mut warnings = Vec::new();

    let anc_count = reader.read_bits(ANC_COUNT_BITS, ParseContext::PayloadHeader)? as usize;
    let field = InterlaceField::from(
        reader.read_bits(INTERLACE_FIELD_BITS, ParseContext::PayloadHeader)? as u8,
    );
    reader.skip_bits(RESERVED_BITS, ParseContext::PayloadHeader)?;

    let mut messages = Vec::with_capacity(anc_count);
    for message_index in 0..anc_count {
        messages.push(deserialize_anc_message(
            &mut reader,
            message_index,
            &mut warnings,
        )?);
    }

    Ok(AncPayloadParse {
        packet: AncillaryPacket { field, messages },
        warnings,
    })
}

/// Serializes an ANC payload to wire bytes.
///
/// `ANC_Count` is derived from the message sequence length. Output is
/// always a whole number of 32-bit words.
///
/// # Errors
/// - [`AncBuildingError::FieldOverflow`] - More than 255 messages, more
///   than 255 user data octets in one message, or a field value exceeding
///   its width
pub fn serialize_anc_payload(packet: &AncillaryPacket) -> Result<Bytes, AncBuildingError> {
    let anc_count = packet.messages.len();
    if anc_count > u8::MAX as usize {
        return Err(AncBuildingError::FieldOverflow {
            field: Field::AncCount,
            value: anc_count as u32,
            width: ANC_COUNT_BITS,
        });
    }

    let mut writer = BitWriter::with_capacity(packet.wire_length_bytes());
    writer.write_bits(anc_count as u32, ANC_COUNT_BITS, Field::AncCount)?;
    writer.write_bits(
        u8::from(packet.field) as u32,
        INTERLACE_FIELD_BITS,
        Field::InterlaceField,
    )?;
    writer.write_bits(0, RESERVED_BITS, Field::Reserved)?;

    for message in &packet.messages {
        serialize_anc_message(&mut writer, message)?;
    }

    Ok(writer.into_bytes())
}

/// Deserializes a whole RTP packet: header plus the payload region its
/// length field addresses.
///
/// # Errors
/// - [`AncParsingError::TruncatedInput`] - Buffer shorter than the header
///   plus the addressed payload region
pub fn deserialize_rtp_packet(data: &[u8]) -> Result<RtpPacketParse, AncParsingError> {
    let header = deserialize_rtp_header(data)?;

    let payload_bytes = ANC_PAYLOAD_HEADER_LENGTH_BYTES + header.payload_length as usize;
    let available = data.len() - RTP_HEADER_LENGTH_BYTES;
    if available < payload_bytes {
        return Err(AncParsingError::TruncatedInput {
            needed: payload_bytes * 8,
            got: available * 8,
            context: ParseContext::PayloadRegion,
        });
    }

    let payload_region = &data[RTP_HEADER_LENGTH_BYTES..RTP_HEADER_LENGTH_BYTES + payload_bytes];
    let payload = deserialize_anc_payload(payload_region)?;

    Ok(RtpPacketParse { header, payload })
}

/// Serializes a whole RTP packet, computing the header's length field from
/// the payload.
///
/// The caller's `payload_length` is ignored; the encoded value is the
/// message region's octet count, excluding the 4-byte payload header.
///
/// # Errors
/// - [`AncBuildingError::FieldOverflow`] - The message region exceeds the
///   16-bit length field, or any payload field overflows
pub fn serialize_rtp_packet(
    header: &RtpPacketHeader,
    packet: &AncillaryPacket,
) -> Result<Bytes, AncBuildingError> {
    let payload = serialize_anc_payload(packet)?;

    let message_region = payload.len() - ANC_PAYLOAD_HEADER_LENGTH_BYTES;
    if message_region > u16::MAX as usize {
        return Err(AncBuildingError::FieldOverflow {
            field: Field::PayloadLength,
            value: message_region as u32,
            width: 16,
        });
    }

    let mut sized_header = header.clone();
    sized_header.payload_length = message_region as u16;
    let header_bytes = serialize_rtp_header(&sized_header)?;

    let mut out = bytes::BytesMut::with_capacity(header_bytes.len() + payload.len());
    out.extend_from_slice(&header_bytes);
    out.extend_from_slice(&payload);
    Ok(out.freeze())
}

/// Decodes one ANC message from the cursor's current position.
///
/// Field order: fixed header fields, then `Data_Count` user data words,
/// then the checksum word, then the computed-width alignment padding. The
/// parity pair is validated against the decoded Data_Count and the checksum
/// word against the received words; both disagreements are advisory.
fn deserialize_anc_message(
    reader: &mut BitReader<'_>,
    message_index: usize,
    warnings: &mut Vec<IntegrityWarning>,
) -> Result<AncillaryMessage, AncParsingError> {
    let context = ParseContext::MessageHeader;

    let c = reader.read_flag(context)?;
    let line_number = LineNumber::new(reader.read_bits(LINE_NUMBER_BITS, context)? as u16);
    let horizontal_offset =
        HorizontalOffset::new(reader.read_bits(HORIZONTAL_OFFSET_BITS, context)? as u16);
    let data_stream_flag = reader.read_flag(context)?;
    let stream_num = reader.read_bits(STREAM_NUM_BITS, context)? as u8;
    let did = Did::new(reader.read_bits(DID_BITS, context)? as u16);
    let sdid = Sdid::new(reader.read_bits(SDID_BITS, context)? as u16);

    let parity = reader.read_bits(DATA_COUNT_PARITY_BITS, context)? as u8;
    let data_count = reader.read_bits(DATA_COUNT_BITS, context)? as u8;
    let expected = st291::parity_pair(data_count);
    if parity != expected {
        warnings.push(IntegrityWarning::DataCountParityMismatch {
            message_index,
            expected,
            got: parity,
        });
    }

    // The checksum covers the words as received, parity bits included.
    let mut checksum = ChecksumAccumulator::new();
    checksum.add_word(did.value());
    checksum.add_word(sdid.value());
    checksum.add_word(((parity as u16) << 8) | data_count as u16);

    let user_data = user_data::read_words(
        reader,
        data_count as usize,
        message_index,
        &mut checksum,
        warnings,
    )?;

    let wire_checksum = reader.read_bits(CHECKSUM_BITS, ParseContext::ChecksumWord)? as u16;
    let calculated = checksum.value();
    if wire_checksum != calculated {
        warnings.push(IntegrityWarning::ChecksumMismatch {
            message_index,
            received: wire_checksum,
            calculated,
        });
    }

    // Legacy producers do not always zero the padding; skip, never validate.
    reader.skip_bits(
        st291::word_align_bits(data_count as usize),
        ParseContext::WordAlign,
    )?;

    Ok(AncillaryMessage {
        c,
        line_number,
        horizontal_offset,
        data_stream_flag,
        stream_num,
        did,
        sdid,
        user_data,
        checksum: wire_checksum,
    })
}

/// Encodes one ANC message at the writer's current position.
///
/// Derived fields are resolved in wire order: the parity pair before
/// Data_Count, the checksum after the last user data word, the alignment
/// padding last. The record's stored `checksum` is ignored; the encoder
/// always emits the computed word.
fn serialize_anc_message(
    writer: &mut BitWriter,
    message: &AncillaryMessage,
) -> Result<(), AncBuildingError> {
    let data_count = message.user_data.len();
    if data_count > u8::MAX as usize {
        return Err(AncBuildingError::FieldOverflow {
            field: Field::DataCount,
            value: data_count as u32,
            width: DATA_COUNT_BITS,
        });
    }
    let data_count = data_count as u8;

    writer.write_flag(message.c, Field::C)?;
    writer.write_bits(
        message.line_number.value() as u32,
        LINE_NUMBER_BITS,
        Field::LineNumber,
    )?;
    writer.write_bits(
        message.horizontal_offset.value() as u32,
        HORIZONTAL_OFFSET_BITS,
        Field::HorizontalOffset,
    )?;
    writer.write_flag(message.data_stream_flag, Field::DataStreamFlag)?;
    writer.write_bits(message.stream_num as u32, STREAM_NUM_BITS, Field::StreamNum)?;
    writer.write_bits(message.did.value() as u32, DID_BITS, Field::Did)?;
    writer.write_bits(message.sdid.value() as u32, SDID_BITS, Field::Sdid)?;
    writer.write_bits(
        st291::parity_pair(data_count) as u32,
        DATA_COUNT_PARITY_BITS,
        Field::DataCountParity,
    )?;
    writer.write_bits(data_count as u32, DATA_COUNT_BITS, Field::DataCount)?;

    let mut checksum = ChecksumAccumulator::new();
    checksum.add_word(message.did.value());
    checksum.add_word(message.sdid.value());
    checksum.add_word(st291::with_parity(data_count));

    user_data::write_words(writer, &message.user_data, &mut checksum)?;

    writer.write_bits(checksum.value() as u32, CHECKSUM_BITS, Field::Checksum)?;
    writer.write_bits(
        0,
        st291::word_align_bits(data_count as usize),
        Field::WordAlign,
    )?;

    Ok(())
}
