//! Convenience parser assembling fixes from a byte stream.
//!
//! A [`Parser`] is fed one byte at a time, typically while draining a serial
//! receive buffer. Each call to [`Parser::update`] reports whether a complete
//! fix became available with that byte:
//!
//! ```
//! let mut parser = Parser::new(Config::default());
//!
//! for b in uart.drain() {
//!     if parser.update(b) == Status::NewData {
//!         let fix = parser.fix();
//!         display(fix.position());
//!     }
//! }
//! ```
//!
//! A fix is complete once every field of every enabled sentence group has been
//! received in sentences with valid checksums, along with the field of every
//! custom subscription. Receivers emit a cycle's sentences back to back, so the
//! fields of a single fix may arrive in any order across several sentences.
//!
//! To decode chunks of bytes, see the [`slice`] and [`reader`] modules.

#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::{decode as decode_slice, fixes};

mod custom;
mod dispatch;
mod fix;
mod mask;

pub use custom::{Custom, Handle, MAX_CUSTOM, RegisterError};
pub use dispatch::SentenceKind;
pub use fix::{Date, Fix, MAX_SATELLITE_IDS, MAX_SATELLITES, Position, Satellite, Time};

use custom::Registry;
use dispatch::{GsvState, dispatch};
use mask::{FieldKind, FieldMask};

use crate::{
    fmt::{debug, trace},
    sans::{
        Tokenizer,
        tokenizer::{ChecksumError, FieldText, Token},
    },
};

/// Sentence groups which must be received to complete a fix.
///
/// All groups are enabled by default. Disable those the receiver is not
/// configured to emit, or no fix will ever complete.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Time, position, quality, satellites used, HDOP and altitude.
    pub gga: bool,
    /// Time, validity, position, speed, course and date.
    pub rmc: bool,
    /// Fix mode, satellite IDs and dilutions of precision.
    pub gsa: bool,
    /// Satellites in view and their descriptors.
    pub gsv: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gga: true,
            rmc: true,
            gsa: true,
            gsv: true,
        }
    }
}

/// The state of the parser's fix after a poll.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// No fix has been completed yet.
    FirstDataWaiting,
    /// A fix exists, but nothing new was completed since the last poll.
    OldData,
    /// A fix was completed since the last poll.
    NewData,
}

/// Streaming NMEA-0183 parser.
#[derive(Debug, Clone)]
pub struct Parser {
    config: Config,
    tokenizer: Tokenizer,

    kind: SentenceKind,
    talker: FieldText,
    gsv: GsvState,

    staging: Fix,
    fix: Fix,

    customs: Registry,

    required: FieldMask,
    observed: FieldMask,
    // Fields received in the current sentence, held until its checksum passes.
    pending: FieldMask,

    committed: bool,
    fresh: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Parser {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tokenizer: Tokenizer::new(),
            kind: SentenceKind::Unknown,
            talker: FieldText::new(),
            gsv: GsvState::default(),
            staging: Fix::default(),
            fix: Fix::default(),
            customs: Registry::default(),
            required: FieldMask::required(&config, 0),
            observed: FieldMask::empty(),
            pending: FieldMask::empty(),
            committed: false,
            fresh: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The most recently completed fix.
    ///
    /// Holds default values until the first [`Status::NewData`].
    pub fn fix(&self) -> &Fix {
        &self.fix
    }

    /// Feed the parser a single byte, and poll the state of its fix.
    ///
    /// Fields only count towards a fix once their sentence's checksum has
    /// been verified, so [`Status::NewData`] is reported on the `\r` or `\n`
    /// ending the sentence that completes the cycle, not on its last required
    /// field.
    pub fn update(&mut self, b: u8) -> Status {
        match self.tokenizer.advance(b) {
            Some(Token::Field { index: 0, text }) => self.start_sentence(text),
            Some(Token::Field { index, text }) => self.receive_field(index, &text),
            Some(Token::End(result)) => self.end_sentence(result),
            None => {}
        }

        let status = self.status();
        self.fresh = false;
        status
    }

    /// The state of the parser's fix, without consuming a pending
    /// [`Status::NewData`].
    pub fn status(&self) -> Status {
        if self.fresh {
            Status::NewData
        } else if self.committed {
            Status::OldData
        } else {
            Status::FirstDataWaiting
        }
    }

    /// Watch a field of a sentence type, identified by its talker tag
    /// (including the leading `$`, such as `"$GPRMC"`).
    ///
    /// The field becomes required to complete every later fix, so it must be
    /// transmitted once per reporting cycle.
    pub fn add_custom(&mut self, talker: &str, field: u8) -> Result<Handle, RegisterError> {
        let handle = self.customs.register(talker, field)?;
        self.required = FieldMask::required(&self.config, self.customs.len());

        debug!("registered subscription {} for field {}", handle, field);

        Ok(handle)
    }

    /// Look up a custom subscription.
    ///
    /// Handles are slot indices and only meaningful to the parser that issued
    /// them. Returns `None` if the slot is not registered with this parser.
    pub fn custom(&self, handle: Handle) -> Option<&Custom> {
        self.customs.get(handle)
    }

    fn start_sentence(&mut self, talker: FieldText) {
        self.kind = SentenceKind::from_talker(talker.as_bytes());
        self.talker = talker;
        self.pending = FieldMask::empty();
        self.gsv.start_sentence();

        if self.kind == SentenceKind::Unknown {
            trace!("unrecognised sentence {}", talker);
        }
    }

    fn receive_field(&mut self, index: u8, text: &FieldText) {
        // The first field after a commit or a reset begins a new cycle.
        if self.observed.is_empty() && self.pending.is_empty() {
            self.customs.clear_updated();
        }

        let slots = self.customs.receive(self.talker.as_bytes(), index, text);
        self.pending.insert_customs(slots);

        if let Some(kind) = dispatch(
            self.kind,
            index,
            text.as_bytes(),
            &mut self.staging,
            &mut self.gsv,
        ) {
            self.pending.insert(kind);
        }
    }

    fn end_sentence(&mut self, result: Result<(), ChecksumError>) {
        let pending = core::mem::replace(&mut self.pending, FieldMask::empty());
        let kind = core::mem::take(&mut self.kind);

        if let Err(err) = result {
            debug!(
                "discarding cycle: calculated checksum {} but found {}",
                err.calculated, err.found
            );
            self.observed = FieldMask::empty();
            self.gsv.reset();
            return;
        }

        let mut observed = self.observed.union(&pending);
        if kind == SentenceKind::Gsv && self.gsv.finish_statement() {
            observed.insert(FieldKind::GsvDescriptors);
        }
        self.observed = observed.intersection(&self.required);

        if !self.required.is_empty() && self.observed.bits() == self.required.bits() {
            self.commit();
        }
    }

    fn commit(&mut self) {
        self.fix = self.staging;
        self.observed = FieldMask::empty();
        self.gsv.reset();
        self.committed = true;
        self.fresh = true;

        debug!("fix committed at {}", self.fix.time);
    }
}
