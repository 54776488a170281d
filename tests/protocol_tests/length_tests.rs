//! Length Codec Tests
//!
//! Tests for the variable-width word length prefix.

use std::io::Cursor;

use roslink::protocol::{decode_length, encode_length};
use roslink::RosError;

fn roundtrip(length: u32) -> u32 {
    let encoded = encode_length(length);
    let mut cursor = Cursor::new(encoded.clone());
    let decoded = decode_length(&mut cursor).unwrap();
    assert_eq!(
        cursor.position() as usize,
        encoded.len(),
        "decoder must consume the whole prefix for {:#x}",
        length
    );
    decoded
}

// =============================================================================
// Boundary Tests
// =============================================================================

#[test]
fn test_boundaries_survive_encode_decode() {
    let lengths = [
        0u32, 0x7F, 0x80, 0x3FFF, 0x4000, 0x1F_FFFF, 0x20_0000, 0x0FFF_FFFF, 0x1000_0000,
    ];
    for length in lengths {
        assert_eq!(roundtrip(length), length, "length {:#x}", length);
    }
}

#[test]
fn test_prefix_widths() {
    assert_eq!(encode_length(0).len(), 1);
    assert_eq!(encode_length(0x7F).len(), 1);
    assert_eq!(encode_length(0x80).len(), 2);
    assert_eq!(encode_length(0x3FFF).len(), 2);
    assert_eq!(encode_length(0x4000).len(), 3);
    assert_eq!(encode_length(0x1F_FFFF).len(), 3);
    assert_eq!(encode_length(0x20_0000).len(), 4);
    assert_eq!(encode_length(0x0FFF_FFFF).len(), 4);
    assert_eq!(encode_length(0x1000_0000).len(), 5);
    assert_eq!(encode_length(u32::MAX).len(), 5);
}

#[test]
fn test_tag_bits() {
    assert_eq!(encode_length(0x80)[0] & 0xC0, 0x80);
    assert_eq!(encode_length(0x4000)[0] & 0xE0, 0xC0);
    assert_eq!(encode_length(0x20_0000)[0] & 0xF0, 0xE0);
    assert_eq!(encode_length(0x1000_0000)[0], 0xF0);
}

#[test]
fn test_five_byte_form_is_big_endian() {
    assert_eq!(
        encode_length(0x1234_5678),
        vec![0xF0, 0x12, 0x34, 0x56, 0x78]
    );
    assert_eq!(roundtrip(u32::MAX), u32::MAX);
}

#[test]
fn test_decode_known_bytes() {
    let mut cursor = Cursor::new(vec![0x81, 0x00]);
    assert_eq!(decode_length(&mut cursor).unwrap(), 0x100);

    let mut cursor = Cursor::new(vec![0xC1, 0x00, 0x00]);
    assert_eq!(decode_length(&mut cursor).unwrap(), 0x10000);

    let mut cursor = Cursor::new(vec![0xE1, 0x00, 0x00, 0x00]);
    assert_eq!(decode_length(&mut cursor).unwrap(), 0x0100_0000);
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_decode_empty_source() {
    let mut cursor = Cursor::new(Vec::<u8>::new());
    assert!(matches!(
        decode_length(&mut cursor),
        Err(RosError::UnexpectedEof)
    ));
}

#[test]
fn test_decode_truncated_prefix() {
    // 3-byte form with only one continuation byte
    let mut cursor = Cursor::new(vec![0xC0, 0x40]);
    assert!(matches!(
        decode_length(&mut cursor),
        Err(RosError::UnexpectedEof)
    ));

    let mut cursor = Cursor::new(vec![0xF0, 0x00, 0x00]);
    assert!(matches!(
        decode_length(&mut cursor),
        Err(RosError::UnexpectedEof)
    ));
}

#[test]
fn test_decode_invalid_prefix() {
    for byte in [0xF1u8, 0xF8, 0xFF] {
        let mut cursor = Cursor::new(vec![byte, 0, 0, 0, 0]);
        assert!(matches!(
            decode_length(&mut cursor),
            Err(RosError::Protocol(_))
        ));
    }
}
