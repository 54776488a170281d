//! Protocol Module
//!
//! Wire format of the RouterOS API.
//!
//! ## Framing
//! ```text
//! word     = length-prefix  bytes
//! sentence = word*  0x00
//! ```
//!
//! ### Length prefix
//! - `< 0x80`:       1 byte
//! - `< 0x4000`:     2 bytes, first byte `10xxxxxx`
//! - `< 0x200000`:   3 bytes, first byte `110xxxxx`
//! - `< 0x10000000`: 4 bytes, first byte `1110xxxx`
//! - otherwise:      `0xF0` + 4 bytes big-endian
//!
//! ### Requests
//! - command path (`/system/identity/print`)
//! - `=key=value` attributes, `?key=value` queries
//!
//! ### Replies
//! - `!re` / `!done` / `!trap` / `!fatal`, each followed by `=key=value` words

mod length;
mod params;
mod reply;
mod sentence;

pub use length::{decode_length, encode_length, encoded_len, put_length, MAX_COMPACT_LENGTH};
pub use params::{command_words, normalize_param};
pub use reply::{CommandResult, Outcome, ParserState, Record, ReplyParser, DONE, FATAL, RE, TRAP};
pub use sentence::{encode_sentence, read_sentence, read_word, write_sentence, MAX_READ_WORD_SIZE};
