//! Reply parsing
//!
//! Folds the reply sentences of one command into a [`CommandResult`].
//!
//! ## Reply words
//! - `!re`    - opens a new record; following `=key=value` words fill it
//! - `!done`  - command finished
//! - `!trap`  - command failed; `=message=` carries the reason
//! - `!fatal` - router is closing the session; the next word is the reason
//!
//! ## Parser states
//! ```text
//!            !re                 !re
//!   Idle ──────────► InRecord ◄─────┐
//!    │                  │  └────────┘
//!    │ !done/!trap      │ !done/!trap/!fatal
//!    ▼                  ▼
//!   Done | Trapped | Fatal   (terminal)
//! ```

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::error::{Result, RosError};

/// Reply word markers
pub const RE: &str = "!re";
pub const DONE: &str = "!done";
pub const TRAP: &str = "!trap";
pub const FATAL: &str = "!fatal";

// =============================================================================
// Record
// =============================================================================

/// One `!re` block: attribute name to value, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing an earlier value in place
    ///
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The router object id (`.id`), when the reply carries one
    pub fn id(&self) -> Option<&str> {
        self.get(".id")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// =============================================================================
// CommandResult
// =============================================================================

/// Final outcome of a command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Success,
    Error,
}

/// Everything a command produced
///
/// Serializes to the stable field set `success`, `error`, `message`,
/// `records`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub outcome: Outcome,

    /// Trap or fatal reason
    pub message: Option<String>,

    /// One entry per `!re` block, in order
    pub records: Vec<Record>,

    /// `=key=value` words seen outside any `!re` block (e.g. `ret`)
    pub attributes: Record,
}

impl CommandResult {
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    pub fn is_error(&self) -> bool {
        self.outcome == Outcome::Error
    }

    /// Top-level attribute lookup
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// Turn a trapped result into [`RosError::Trap`]
    pub fn into_result(self) -> Result<Self> {
        match self.outcome {
            Outcome::Success => Ok(self),
            Outcome::Error => Err(RosError::Trap(
                self.message.unwrap_or_else(|| "command failed".to_string()),
            )),
        }
    }
}

impl Serialize for CommandResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CommandResult", 4)?;
        state.serialize_field("success", &self.is_success())?;
        state.serialize_field("error", &self.is_error())?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("records", &self.records)?;
        state.end()
    }
}

// =============================================================================
// Parser
// =============================================================================

/// Where the parser is within a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserState {
    /// No record open
    Idle,
    /// Accumulating attributes of the current `!re` block
    InRecord(Record),
    /// `!done` seen
    Done,
    /// `!trap` seen
    Trapped,
    /// `!fatal` seen; the session is over
    Fatal,
}

impl ParserState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ParserState::Done | ParserState::Trapped | ParserState::Fatal
        )
    }
}

/// Incremental reply parser, fed one sentence at a time
#[derive(Debug)]
pub struct ReplyParser {
    state: ParserState,
    result: CommandResult,
}

impl Default for ReplyParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::Idle,
            result: CommandResult::default(),
        }
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Consume one reply sentence
    ///
    /// Returns `true` once a terminal marker has been seen. Attribute words
    /// after the terminal marker in the same sentence are still recorded, so
    /// `!trap =message=...` and `!done =ret=...` keep their payload.
    /// Sentences fed after that are ignored.
    pub fn feed<S: AsRef<str>>(&mut self, sentence: &[S]) -> bool {
        if self.is_terminal() {
            tracing::warn!(
                "Ignoring reply sentence received after the reply ended ({} words)",
                sentence.len()
            );
            return true;
        }

        for word in sentence {
            self.apply(word.as_ref());
        }
        self.is_terminal()
    }

    /// Close any open record and hand back the result
    pub fn finish(mut self) -> CommandResult {
        self.close_record();
        self.result
    }

    fn apply(&mut self, word: &str) {
        if word.starts_with('!') && self.is_terminal() {
            tracing::warn!("Ignoring marker {} after end of reply", word);
            return;
        }

        match word {
            RE => {
                self.close_record();
                self.state = ParserState::InRecord(Record::new());
            }
            DONE => {
                self.close_record();
                self.state = ParserState::Done;
            }
            TRAP => {
                self.close_record();
                self.result.outcome = Outcome::Error;
                self.state = ParserState::Trapped;
            }
            FATAL => {
                self.close_record();
                self.result.outcome = Outcome::Error;
                self.state = ParserState::Fatal;
            }
            _ if word.starts_with('=') => self.apply_attribute(word),
            _ if self.state == ParserState::Fatal && self.result.message.is_none() => {
                self.result.message = Some(word.to_string());
            }
            _ => tracing::trace!("Skipping reply word {:?}", word),
        }
    }

    /// `=key=value`, split at the first `=` after the leading one
    fn apply_attribute(&mut self, word: &str) {
        let body = &word[1..];
        let Some((key, value)) = body.split_once('=') else {
            tracing::trace!("Skipping attribute word without value: {:?}", word);
            return;
        };
        if key.is_empty() {
            tracing::trace!("Skipping attribute word with empty name: {:?}", word);
            return;
        }

        match &mut self.state {
            ParserState::InRecord(record) => {
                record.insert(key, value);
            }
            ParserState::Trapped | ParserState::Fatal => {
                if key == "message" {
                    self.result.message = Some(value.to_string());
                }
                self.result.attributes.insert(key, value);
            }
            ParserState::Idle | ParserState::Done => {
                self.result.attributes.insert(key, value);
            }
        }
    }

    fn close_record(&mut self) {
        if let ParserState::InRecord(_) = self.state {
            if let ParserState::InRecord(record) =
                std::mem::replace(&mut self.state, ParserState::Idle)
            {
                self.result.records.push(record);
            }
        }
    }
}
