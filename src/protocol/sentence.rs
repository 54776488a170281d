//! Sentence codec
//!
//! A sentence is a run of length-prefixed words closed by a zero-length
//! word. Requests and replies share the same framing.
//!
//! ```text
//! ┌─────┬──────────────┬─────┬──────────────┬─────┐
//! │ len │ word 1 bytes │ len │ word 2 bytes │ 0x00│
//! └─────┴──────────────┴─────┴──────────────┴─────┘
//! ```

use std::io::{Read, Write};

use bytes::{BufMut, BytesMut};

use super::length::{decode_length, encoded_len, put_length};
use crate::error::{Result, RosError};

/// Upper bound accepted for a single incoming word (16 MB)
///
/// Larger prefixes are treated as a corrupt stream rather than allocated.
pub const MAX_READ_WORD_SIZE: u32 = 16 * 1024 * 1024;

// =============================================================================
// Encoding
// =============================================================================

/// Encode a whole sentence, terminator included
///
/// An empty word would end the sentence early, so it is rejected.
pub fn encode_sentence<S: AsRef<str>>(words: &[S]) -> Result<BytesMut> {
    let capacity = words
        .iter()
        .map(|w| w.as_ref().len() + encoded_len(w.as_ref().len() as u32))
        .sum::<usize>()
        + 1;
    let mut buf = BytesMut::with_capacity(capacity);

    for word in words {
        let word = word.as_ref();
        if word.is_empty() {
            return Err(RosError::Protocol(
                "Empty word inside a sentence".to_string(),
            ));
        }
        let length = u32::try_from(word.len()).map_err(|_| {
            RosError::Protocol(format!("Word too long: {} bytes", word.len()))
        })?;
        put_length(&mut buf, length);
        buf.put_slice(word.as_bytes());
    }

    // Zero-length terminator
    put_length(&mut buf, 0);
    Ok(buf)
}

/// Write a sentence to a stream and flush it
pub fn write_sentence<W: Write, S: AsRef<str>>(writer: &mut W, words: &[S]) -> Result<()> {
    let bytes = encode_sentence(words)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Decoding
// =============================================================================

/// Read one word; an empty vector is the sentence terminator
pub fn read_word<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let length = decode_length(reader)?;
    if length > MAX_READ_WORD_SIZE {
        return Err(RosError::Protocol(format!(
            "Word too large: {} bytes (max {})",
            length, MAX_READ_WORD_SIZE
        )));
    }

    let mut word = vec![0u8; length as usize];
    if length > 0 {
        // read_exact loops over short reads and reports a mid-word close as
        // UnexpectedEof
        reader.read_exact(&mut word)?;
    }
    Ok(word)
}

/// Read one sentence, terminator excluded
///
/// Words are decoded as UTF-8; invalid sequences are replaced rather than
/// failing the whole reply, since routers store free-text fields in
/// whatever encoding the user typed them in.
pub fn read_sentence<R: Read>(reader: &mut R) -> Result<Vec<String>> {
    let mut words = Vec::new();
    loop {
        let word = read_word(reader)?;
        if word.is_empty() {
            return Ok(words);
        }
        let word = match String::from_utf8(word) {
            Ok(text) => text,
            Err(e) => {
                tracing::trace!("Replacing invalid UTF-8 in reply word");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        words.push(word);
    }
}
