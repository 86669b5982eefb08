//! `ancstar`: a bit-exact SMPTE ST 2110-40 (RFC 8331) ancillary data codec in Rust.
//!
//! This library encodes and decodes RTP packets whose payload carries SMPTE
//! ST 291-1 ancillary data (captions, timecode, and other non-video
//! metadata), for broadcast infrastructure that must interoperate
//! bit-for-bit with SDI-to-IP gateways. Every field width, bit ordering,
//! and computed value (parity, checksum, word alignment) matches the wire
//! format exactly.
//!
//! ## Core Concepts
//!
//! - **Records**: [`RtpPacketHeader`], [`AncillaryPacket`], and
//!   [`AncillaryMessage`] are plain owned value types mirroring the wire
//!   structures.
//! - **Codec functions**: the `packet_processor` module exposes
//!   (de)serializers for each structure; derived fields (counts, parity,
//!   checksum, alignment) are computed by the codec, never by callers.
//! - **Advisory integrity**: stale parity or checksum words surface as
//!   [`IntegrityWarning`] values alongside a successful decode; only
//!   truncation and field overflow are hard errors.
//!
//! Transport I/O, SDI frame handling, and interpretation of the user data
//! octets belong to external collaborators: this crate maps between byte
//! buffers and records, nothing more.
//!
//! ## Quick Start
//!
//! ```rust
//! use ancstar::packet_processor::{deserialize_anc_payload, serialize_anc_payload};
//! use ancstar::{AncillaryMessage, AncillaryPacket, InterlaceField};
//!
//! fn main() -> Result<(), ancstar::AncError> {
//!     // One caption-style message: DID/SDID as registered 10-bit words.
//!     let message = AncillaryMessage::new(
//!         0x161.into(),
//!         0x101.into(),
//!         vec![0x96, 0x69, 0x55],
//!     );
//!     let packet = AncillaryPacket {
//!         field: InterlaceField::Unspecified,
//!         messages: vec![message],
//!     };
//!
//!     let wire = serialize_anc_payload(&packet)?;
//!     assert_eq!(wire.len() % 4, 0); // always whole 32-bit words
//!
//!     let parsed = deserialize_anc_payload(&wire)?;
//!     assert_eq!(parsed.packet, packet);
//!     assert!(parsed.warnings.is_empty());
//!     assert!(parsed.packet.messages[0].verify_checksum());
//!     Ok(())
//! }
//! ```
//!
//! Decoding and encoding are pure, synchronous transformations over
//! independent buffers; callers may run them concurrently across packets
//! without any locking.

pub mod bitstream;
pub mod constants;
pub mod error;
pub mod packet_processor;
pub mod protocol_types;
pub mod st291;
pub mod types;
pub mod user_data;

pub use constants::ANC_MIMETYPE;
pub use error::{AncBuildingError, AncError, AncParsingError, IntegrityWarning};
pub use packet_processor::{
    AncPayloadParse, RtpPacketParse, deserialize_anc_payload, deserialize_rtp_header,
    deserialize_rtp_packet, serialize_anc_payload, serialize_rtp_header, serialize_rtp_packet,
};
pub use protocol_types::{AncillaryMessage, AncillaryPacket, InterlaceField, RtpPacketHeader};
pub use types::{Did, HorizontalOffset, LineNumber, Sdid};
