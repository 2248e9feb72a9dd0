//! Caller-registered watches on arbitrary sentence fields.

use thiserror::Error;
use tinyvec::ArrayVec;

use crate::sans::tokenizer::FieldText;

/// Number of subscriptions a parser can hold.
pub const MAX_CUSTOM: usize = 10;

/// Length of a talker tag, including its leading `$`.
const TALKER_LEN: usize = 6;

/// An error registering a custom subscription.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// Every subscription slot is in use.
    #[error("All {max} subscription slots are in use.", max = MAX_CUSTOM)]
    CapacityExceeded,
    /// The talker tag is not `$` followed by five alphanumeric characters.
    #[error("Talker tags must be `$` followed by five alphanumeric characters.")]
    InvalidTalker,
    /// Field 0 holds the talker tag itself and cannot be watched.
    #[error("Field 0 holds the talker tag and cannot be watched.")]
    InvalidField,
}

/// Refers to a subscription registered with a [`super::Parser`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Handle(pub(super) usize);

/// A watch on one field of one sentence type.
///
/// The field's raw text is copied here whenever a matching sentence arrives;
/// it is never interpreted numerically.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Custom {
    talker: [u8; TALKER_LEN],
    field: u8,
    value: FieldText,
    updated: bool,
}

impl Custom {
    /// The talker tag, including its leading `$`.
    pub fn talker(&self) -> &str {
        // Only ASCII tags are accepted when registering.
        core::str::from_utf8(&self.talker).unwrap_or_default()
    }

    pub fn field(&self) -> u8 {
        self.field
    }

    /// The most recently received text, if it is valid UTF-8.
    pub fn value(&self) -> Option<&str> {
        self.value.as_str()
    }

    pub fn raw(&self) -> &[u8] {
        self.value.as_bytes()
    }

    /// Whether the field was received during the current (or just completed)
    /// cycle.
    pub fn is_updated(&self) -> bool {
        self.updated
    }

    fn matches(&self, talker: &[u8], field: u8) -> bool {
        self.field == field && &self.talker[1..] == talker
    }
}

/// Fixed-capacity table of subscriptions. Slots are never released.
#[derive(Debug, Default, Clone)]
pub(super) struct Registry(ArrayVec<[Custom; MAX_CUSTOM]>);

impl Registry {
    pub fn register(&mut self, talker: &str, field: u8) -> Result<Handle, RegisterError> {
        let tag: [u8; TALKER_LEN] = talker
            .as_bytes()
            .try_into()
            .map_err(|_| RegisterError::InvalidTalker)?;

        if tag[0] != b'$' || !tag[1..].iter().all(u8::is_ascii_alphanumeric) {
            Err(RegisterError::InvalidTalker)?;
        }

        if field == 0 {
            Err(RegisterError::InvalidField)?;
        }

        let custom = Custom {
            talker: tag,
            field,
            ..Default::default()
        };

        if self.0.try_push(custom).is_some() {
            Err(RegisterError::CapacityExceeded)?;
        }

        Ok(Handle(self.0.len() - 1))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, handle: Handle) -> Option<&Custom> {
        self.0.get(handle.0)
    }

    /// Copy a field into every matching subscription, returning the slots
    /// updated as a bit set.
    pub fn receive(&mut self, talker: &[u8], field: u8, text: &FieldText) -> u16 {
        let mut slots = 0;

        for (slot, custom) in self.0.iter_mut().enumerate() {
            if custom.matches(talker, field) {
                custom.value = *text;
                custom.updated = true;
                slots |= 1 << slot;
            }
        }

        slots
    }

    pub fn clear_updated(&mut self) {
        self.0.iter_mut().for_each(|c| c.updated = false);
    }
}
