//! Word length codec
//!
//! Every word on the wire is preceded by its byte length in a
//! self-describing variable-width encoding. The high bits of the first
//! byte tell how many bytes follow; the remaining bits of the first byte
//! are the most significant bits of the length.
//!
//! ```text
//! length < 0x80          0xxxxxxx
//! length < 0x4000        10xxxxxx xxxxxxxx
//! length < 0x200000      110xxxxx xxxxxxxx xxxxxxxx
//! length < 0x10000000    1110xxxx xxxxxxxx xxxxxxxx xxxxxxxx
//! otherwise              11110000 xxxxxxxx xxxxxxxx xxxxxxxx xxxxxxxx
//! ```

use std::io::Read;

use bytes::{BufMut, BytesMut};

use crate::error::{Result, RosError};

/// Largest length encodable in the 4-byte form
pub const MAX_COMPACT_LENGTH: u32 = 0x0FFF_FFFF;

/// Largest encoded length prefix in bytes
pub const MAX_PREFIX_SIZE: usize = 5;

/// Append the encoded length prefix to `buf`
pub fn put_length<B: BufMut>(buf: &mut B, length: u32) {
    if length < 0x80 {
        buf.put_u8(length as u8);
    } else if length < 0x4000 {
        buf.put_u16(length as u16 | 0x8000);
    } else if length < 0x20_0000 {
        let tagged = length | 0x00C0_0000;
        buf.put_u8((tagged >> 16) as u8);
        buf.put_u16(tagged as u16);
    } else if length < 0x1000_0000 {
        buf.put_u32(length | 0xE000_0000);
    } else {
        buf.put_u8(0xF0);
        buf.put_u32(length);
    }
}

/// Encode a length prefix into a fresh buffer
pub fn encode_length(length: u32) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(MAX_PREFIX_SIZE);
    put_length(&mut buf, length);
    buf.to_vec()
}

/// Number of bytes the prefix for `length` occupies
pub fn encoded_len(length: u32) -> usize {
    match length {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1F_FFFF => 3,
        0x20_0000..=MAX_COMPACT_LENGTH => 4,
        _ => 5,
    }
}

/// Decode one length prefix from a byte source
///
/// Fails with [`RosError::UnexpectedEof`] if the source ends before the
/// prefix is complete, and with [`RosError::Protocol`] on a first byte
/// that does not start a valid prefix (`0xF1..=0xFF`).
pub fn decode_length<R: Read>(reader: &mut R) -> Result<u32> {
    let first = read_u8(reader)?;

    if first & 0x80 == 0x00 {
        return Ok(u32::from(first));
    }

    if first & 0xC0 == 0x80 {
        let rest = read_array::<_, 1>(reader)?;
        return Ok((u32::from(first & 0x3F) << 8) | u32::from(rest[0]));
    }

    if first & 0xE0 == 0xC0 {
        let rest = read_array::<_, 2>(reader)?;
        return Ok((u32::from(first & 0x1F) << 16)
            | (u32::from(rest[0]) << 8)
            | u32::from(rest[1]));
    }

    if first & 0xF0 == 0xE0 {
        let rest = read_array::<_, 3>(reader)?;
        return Ok((u32::from(first & 0x0F) << 24)
            | (u32::from(rest[0]) << 16)
            | (u32::from(rest[1]) << 8)
            | u32::from(rest[2]));
    }

    if first == 0xF0 {
        let rest = read_array::<_, 4>(reader)?;
        return Ok(u32::from_be_bytes(rest));
    }

    Err(RosError::Protocol(format!(
        "Invalid length prefix byte: 0x{:02x}",
        first
    )))
}

fn read_u8<R: Read>(reader: &mut R) -> Result<u8> {
    let [byte] = read_array::<_, 1>(reader)?;
    Ok(byte)
}

fn read_array<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}
