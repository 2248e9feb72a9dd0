//! States splitting a byte stream into sentence fields.

use thiserror::Error;
use tinyvec::ArrayVec;

use super::check::{Checksum, parse_transmitted};
use crate::fmt::trace;

/// Number of bytes kept from a single field. Longer fields are truncated.
pub const FIELD_CAPACITY: usize = 15;

/// Raw text of one field, truncated to [`FIELD_CAPACITY`] bytes.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FieldText(ArrayVec<[u8; FIELD_CAPACITY]>);

impl FieldText {
    pub fn new() -> Self {
        Self(ArrayVec::new())
    }

    /// Copy text into a new field, truncating it to capacity.
    pub fn from_bytes(r: &[u8]) -> Self {
        let mut text = Self::new();
        r.iter().for_each(|b| text.push(*b));
        text
    }

    /// Append a byte, dropping it if the field is full.
    pub fn push(&mut self, b: u8) {
        if self.0.len() < FIELD_CAPACITY {
            self.0.push(b);
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// The field as a string, if it holds valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.0.as_slice()).ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FieldText {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=[u8]:a}", self.0.as_slice())
    }
}

/// A sentence ended without a matching checksum.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("Calculated ({calculated:#04x}) and found ({found:?}) checksums do not match.")]
pub struct ChecksumError {
    /// XOR of the bytes received between `$` and `*`.
    pub calculated: u8,
    /// The transmitted value, if a `*` and two hex digits were received.
    pub found: Option<u8>,
}

/// Output of the tokenizer for a single byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Token {
    /// A field was terminated by `,` or `*`. Field 0 is the talker tag, without
    /// its leading `$`.
    Field { index: u8, text: FieldText },
    /// A sentence was terminated by `\r` or `\n`.
    End(Result<(), ChecksumError>),
}

// States are named for the portion of the sentence currently being received
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Field,
    Checksum,
}

/// Byte-driven sentence tokenizer.
///
/// Feed bytes with [`Tokenizer::advance`]. A `$` always starts a fresh
/// sentence, silently abandoning an unfinished one; bytes outside a sentence
/// are ignored.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    state: State,
    index: u8,
    text: FieldText,
    checksum: Checksum,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            index: 0,
            text: FieldText::new(),
            checksum: Checksum::new(),
        }
    }

    /// Index of the field currently being received.
    pub fn field_index(&self) -> u8 {
        self.index
    }

    /// Whether a sentence has started and not yet ended.
    pub fn in_sentence(&self) -> bool {
        self.state != State::Idle
    }

    /// Transition on a single byte, returning a token at field and sentence
    /// boundaries.
    pub fn advance(&mut self, b: u8) -> Option<Token> {
        if b == b'$' {
            if self.state != State::Idle {
                trace!("sentence abandoned at field {}", self.index);
            }
            self.start();
            return None;
        }

        match self.state {
            State::Idle => None,
            State::Field => match b {
                b',' => {
                    self.checksum = self.checksum.next(b);
                    Some(self.finish_field())
                }
                b'*' => {
                    let token = self.finish_field();
                    self.state = State::Checksum;
                    Some(token)
                }
                b'\r' | b'\n' => {
                    self.state = State::Idle;
                    Some(Token::End(Err(ChecksumError {
                        calculated: self.checksum.0,
                        found: None,
                    })))
                }
                _ => {
                    self.checksum = self.checksum.next(b);
                    self.text.push(b);
                    None
                }
            },
            State::Checksum => match b {
                b'\r' | b'\n' => {
                    self.state = State::Idle;
                    let found = parse_transmitted(self.text.as_bytes());
                    let result = if found.is_some_and(|f| self.checksum == f) {
                        Ok(())
                    } else {
                        Err(ChecksumError {
                            calculated: self.checksum.0,
                            found,
                        })
                    };
                    Some(Token::End(result))
                }
                _ => {
                    self.text.push(b);
                    None
                }
            },
        }
    }

    fn start(&mut self) {
        self.state = State::Field;
        self.index = 0;
        self.text.clear();
        self.checksum = Checksum::new();
    }

    fn finish_field(&mut self) -> Token {
        let token = Token::Field {
            index: self.index,
            text: self.text,
        };
        self.index = self.index.saturating_add(1);
        self.text.clear();
        token
    }
}
