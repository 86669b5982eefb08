//! Integration tests for ANC payload encoding and decoding.

mod common;

use ancstar::packet_processor::{deserialize_anc_payload, serialize_anc_payload};
use ancstar::{
    AncBuildingError, AncParsingError, AncillaryMessage, AncillaryPacket, Did, HorizontalOffset,
    InterlaceField, LineNumber, Sdid,
};
use rand::prelude::*;
use rand::rngs::StdRng;

use common::{patterned_message, single_message_packet};

#[test]
fn empty_payload_encodes_to_exactly_four_bytes() {
    let packet = AncillaryPacket::default();
    let wire = serialize_anc_payload(&packet).unwrap();
    assert_eq!(wire.len(), 4);

    let parsed = deserialize_anc_payload(&wire).unwrap();
    assert!(parsed.packet.messages.is_empty());
    assert!(parsed.warnings.is_empty());
}

#[test]
fn data_count_zero_message_spans_three_words() {
    let message = AncillaryMessage::new(Did::new(0x145), Sdid::new(0x104), Vec::new());
    assert_eq!(message.wire_bits(), 96);

    let wire = serialize_anc_payload(&single_message_packet(message)).unwrap();
    // 4-byte payload header plus a 12-byte message.
    assert_eq!(wire.len(), 16);
}

#[test]
fn single_message_round_trip_preserves_every_field() {
    let mut message = patterned_message(0x161, 0x101, 33);
    message.c = true;
    message.line_number = LineNumber::new(9);
    message.horizontal_offset = HorizontalOffset::new(0x020);
    message.data_stream_flag = true;
    message.stream_num = 3;

    let packet = AncillaryPacket {
        field: InterlaceField::SecondField,
        messages: vec![message],
    };
    let wire = serialize_anc_payload(&packet).unwrap();
    let parsed = deserialize_anc_payload(&wire).unwrap();

    assert_eq!(parsed.packet, packet);
    assert!(parsed.warnings.is_empty());
}

#[test]
fn sentinel_locations_round_trip_unchanged() {
    let mut message = patterned_message(0x141, 0x107, 5);
    message.line_number = LineNumber::UNSPECIFIED;
    message.horizontal_offset = HorizontalOffset::UNSPECIFIED;

    let wire = serialize_anc_payload(&single_message_packet(message.clone())).unwrap();
    let parsed = deserialize_anc_payload(&wire).unwrap();

    let decoded = &parsed.packet.messages[0];
    assert_eq!(decoded.line_number, LineNumber::UNSPECIFIED);
    assert_eq!(decoded.horizontal_offset, HorizontalOffset::UNSPECIFIED);
    assert_eq!(*decoded, message);
}

#[test]
fn all_interlace_field_values_round_trip() {
    for field in [
        InterlaceField::Unspecified,
        InterlaceField::Invalid,
        InterlaceField::FirstField,
        InterlaceField::SecondField,
    ] {
        let packet = AncillaryPacket {
            field,
            messages: Vec::new(),
        };
        let wire = serialize_anc_payload(&packet).unwrap();
        let parsed = deserialize_anc_payload(&wire).unwrap();
        assert_eq!(parsed.packet.field, field);
    }
}

#[test]
fn variable_stride_messages_round_trip() {
    let packet = AncillaryPacket {
        field: InterlaceField::FirstField,
        messages: vec![
            patterned_message(0x141, 0x107, 46),
            patterned_message(0x161, 0x102, 0),
            patterned_message(0x260, 0x260, 255),
            patterned_message(0x145, 0x104, 1),
        ],
    };
    let wire = serialize_anc_payload(&packet).unwrap();
    assert_eq!(wire.len(), packet.wire_length_bytes());

    let parsed = deserialize_anc_payload(&wire).unwrap();
    assert_eq!(parsed.packet, packet);
    assert!(parsed.warnings.is_empty());
}

#[test]
fn every_data_count_encodes_32_bit_aligned() {
    for data_count in 0..=255usize {
        let message = patterned_message(0x161, 0x101, data_count);
        let wire = serialize_anc_payload(&single_message_packet(message)).unwrap();
        assert_eq!(wire.len() % 4, 0, "data_count {data_count}");
        // Padding always spans 1..=32 bits, so an aligned message still
        // grows by one full word.
        assert_eq!(
            wire.len(),
            4 + 8 + ((data_count * 10 + 8) / 32 + 1) * 4,
            "data_count {data_count}"
        );
    }
}

#[test]
fn message_count_above_255_is_rejected() {
    let packet = AncillaryPacket {
        field: InterlaceField::Unspecified,
        messages: vec![AncillaryMessage::default(); 300],
    };
    assert!(matches!(
        serialize_anc_payload(&packet).unwrap_err(),
        AncBuildingError::FieldOverflow { value: 300, .. }
    ));
}

#[test]
fn full_255_message_payload_round_trips() {
    let messages: Vec<AncillaryMessage> = (0..255)
        .map(|i| patterned_message(0x161, 0x101, i % 16))
        .collect();
    let packet = AncillaryPacket {
        field: InterlaceField::Unspecified,
        messages,
    };
    let wire = serialize_anc_payload(&packet).unwrap();
    let parsed = deserialize_anc_payload(&wire).unwrap();
    assert_eq!(parsed.packet.anc_count(), 255);
    assert_eq!(parsed.packet, packet);
}

#[test]
fn out_of_range_line_number_is_rejected() {
    let mut message = patterned_message(0x161, 0x101, 2);
    message.line_number = LineNumber::new(0x800);
    let err = serialize_anc_payload(&single_message_packet(message)).unwrap_err();
    assert!(matches!(
        err,
        AncBuildingError::FieldOverflow {
            value: 0x800,
            width: 11,
            ..
        }
    ));
}

#[test]
fn truncation_at_every_byte_boundary_fails_cleanly() {
    let wire = serialize_anc_payload(&single_message_packet(patterned_message(0x161, 0x101, 7)))
        .unwrap();
    for cut in 0..wire.len() {
        let err = deserialize_anc_payload(&wire[..cut]).unwrap_err();
        assert!(
            matches!(err, AncParsingError::TruncatedInput { .. }),
            "cut at {cut}"
        );
    }
}

#[test]
fn seeded_random_round_trip_sweep() {
    let mut rng = StdRng::seed_from_u64(0x2110_0040);
    for _ in 0..200 {
        let data_count = rng.random_range(0..=255usize);
        let payload: Vec<u8> = (0..data_count).map(|_| rng.random()).collect();

        let mut message = AncillaryMessage::new(
            Did::new(rng.random_range(0..=0x3FF)),
            Sdid::new(rng.random_range(0..=0x3FF)),
            payload,
        );
        message.c = rng.random();
        message.line_number = LineNumber::new(rng.random_range(0..=0x7FF));
        message.horizontal_offset = HorizontalOffset::new(rng.random_range(0..=0xFFF));
        message.data_stream_flag = rng.random();
        message.stream_num = rng.random_range(0..=0x7F);

        let packet = AncillaryPacket {
            field: InterlaceField::from(rng.random_range(0..=3u8)),
            messages: vec![message],
        };
        let wire = serialize_anc_payload(&packet).unwrap();
        let parsed = deserialize_anc_payload(&wire).unwrap();
        assert_eq!(parsed.packet, packet);
        assert!(parsed.warnings.is_empty());
        assert!(parsed.packet.messages[0].verify_checksum());
    }
}

#[test]
fn decoded_packet_survives_serde_fixture_round_trip() {
    let packet = AncillaryPacket {
        field: InterlaceField::FirstField,
        messages: vec![patterned_message(0x161, 0x101, 12)],
    };
    let wire = serialize_anc_payload(&packet).unwrap();
    let parsed = deserialize_anc_payload(&wire).unwrap();

    let json = serde_json::to_string_pretty(&parsed.packet).unwrap();
    let restored: AncillaryPacket = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, parsed.packet);

    // The restored record re-encodes to identical wire bytes.
    let rewire = serialize_anc_payload(&restored).unwrap();
    assert_eq!(rewire, wire);
}
