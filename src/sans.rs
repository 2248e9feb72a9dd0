//! Internal finite-state machine and field decoders.
//!
//! This module is intended for applications that need finer control than the
//! [`crate::avec::Parser`] offers, for example to handle sentences the parser
//! does not decode.
//!
//! # Architecture
//!
//! A [`Tokenizer`] is advanced one byte at a time. It never allocates and
//! performs a bounded amount of work per byte. At each field boundary it yields
//! a [`tokenizer::Token::Field`] holding the field's index and (possibly
//! truncated) text; at the end of each sentence it yields a
//! [`tokenizer::Token::End`] reporting whether the transmitted checksum
//! matched.
//!
//! The tokenizer has no knowledge of sentence contents. Field text is turned
//! into values by the functions in [`decode`], which scan digits into integers
//! and count fractional digits rather than parsing floating point.
//!
//! Some areas of the decoding process are left to the implementation:
//!
//! - Deciding what to do with fields of a sentence whose checksum later fails.
//! A token for every field is emitted before the sentence's checksum can be
//! checked.
//!
//! - Tracking which sentences make up a complete reporting cycle.

pub mod check;
pub mod decode;
pub mod tokenizer;

pub use tokenizer::Tokenizer;
