//! Bookkeeping of the fields making up a reporting cycle.

use tartan_bitfield::bitfield;

use super::Config;

/// A field decoded from one of the built-in sentences.
///
/// Fields carried by several sentences (such as the time in both GGA and RMC)
/// are distinct kinds, so that a cycle requires every enabled sentence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FieldKind {
    GgaTime,
    GgaLatitude,
    GgaLongitude,
    GgaQuality,
    GgaSatellites,
    GgaHdop,
    GgaAltitude,

    RmcTime,
    RmcValidity,
    RmcLatitude,
    RmcLongitude,
    RmcSpeed,
    RmcCourse,
    RmcDate,

    GsaMode,
    GsaSatelliteIds,
    GsaPdop,
    GsaHdop,
    GsaVdop,

    GsvSatellitesInView,
    GsvDescriptors,
}

use FieldKind::*;

const GGA: &[FieldKind] = &[
    GgaTime,
    GgaLatitude,
    GgaLongitude,
    GgaQuality,
    GgaSatellites,
    GgaHdop,
    GgaAltitude,
];

const RMC: &[FieldKind] = &[
    RmcTime,
    RmcValidity,
    RmcLatitude,
    RmcLongitude,
    RmcSpeed,
    RmcCourse,
    RmcDate,
];

const GSA: &[FieldKind] = &[GsaMode, GsaSatelliteIds, GsaPdop, GsaHdop, GsaVdop];

const GSV: &[FieldKind] = &[GsvSatellitesInView, GsvDescriptors];

// A set of built-in field kinds and custom subscription slots.
bitfield! {
    pub struct FieldMask(u32) {
        [0..22] builtin: u32,
        [22..32] custom: u16,
    }
}

impl FieldMask {
    pub fn empty() -> Self {
        Self(0)
    }

    /// The fields needed to complete a cycle with the enabled sentence groups
    /// and `customs` registered subscriptions.
    pub fn required(config: &Config, customs: usize) -> Self {
        let mut mask = Self::empty();

        [
            (config.gga, GGA),
            (config.rmc, RMC),
            (config.gsa, GSA),
            (config.gsv, GSV),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .flat_map(|(_, kinds)| kinds.iter())
        .for_each(|kind| mask.insert(*kind));

        mask.set_custom(((1_u32 << customs) - 1) as u16);
        mask
    }

    pub fn insert(&mut self, kind: FieldKind) {
        self.set_builtin(self.builtin() | 1 << kind as u32);
    }

    /// Add custom subscription slots, given as a bit set.
    pub fn insert_customs(&mut self, slots: u16) {
        self.set_custom(self.custom() | slots);
    }

    /// Bits set in both masks.
    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Bits set in either mask.
    pub fn union(&self, other: &Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn bits(&self) -> u32 {
        self.0
    }
}
