//! Decoding of built-in sentence fields into a staged fix.

use crate::sans::decode::{
    coordinate, date, integer, is_negative_hemisphere, real, signed, time,
};

use super::{
    fix::{Fix, MAX_SATELLITE_IDS, MAX_SATELLITES},
    mask::FieldKind::{self, *},
};

/// Satellites described by each GSV sentence.
const SATELLITES_PER_GSV: usize = 4;

/// The built-in sentence a field belongs to.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SentenceKind {
    Gga,
    Rmc,
    Gsa,
    Gsv,
    #[default]
    Unknown,
}

impl SentenceKind {
    /// Identify a sentence from its talker tag, without the leading `$`.
    pub fn from_talker(r: &[u8]) -> Self {
        match r {
            b"GPGGA" => Self::Gga,
            b"GPRMC" => Self::Rmc,
            b"GPGSA" => Self::Gsa,
            b"GPGSV" => Self::Gsv,
            _ => Self::Unknown,
        }
    }
}

/// Progress through a group of GSV sentences.
#[derive(Debug, Default, Copy, Clone)]
pub(super) struct GsvState {
    /// Sentences announced for this group.
    expected: u8,
    /// 1-based index of the sentence being received.
    index: u8,
    /// Verified sentences of this group, bit `n - 1` for sentence `n`.
    received: u8,
}

impl GsvState {
    /// Forget the statement index, so a sentence without one cannot reuse
    /// the previous sentence's.
    pub fn start_sentence(&mut self) {
        self.index = 0;
    }

    /// Forget every statement received so far. A group must then be received
    /// again from statement 1.
    pub fn reset(&mut self) {
        self.index = 0;
        self.received = 0;
    }

    /// Record the sentence being received as verified, returning whether every
    /// sentence of the group has now arrived.
    pub fn finish_statement(&mut self) -> bool {
        if !(1..=u8::BITS as u8).contains(&self.index) {
            return false;
        }
        self.received |= 1 << (self.index - 1);

        let expected = self.expected as u32;
        (1..=u8::BITS).contains(&expected) && self.received as u32 == (1 << expected) - 1
    }
}

/// Decode one field of a built-in sentence into the staged fix.
///
/// Returns the kind of field completed, if any. Some values span two fields
/// (a coordinate and its hemisphere) and are completed by the second.
pub(super) fn dispatch(
    kind: SentenceKind,
    index: u8,
    r: &[u8],
    fix: &mut Fix,
    gsv: &mut GsvState,
) -> Option<FieldKind> {
    match kind {
        SentenceKind::Gga => match index {
            1 => {
                fix.time = time(r);
                Some(GgaTime)
            }
            2 => {
                fix.latitude = coordinate(r);
                None
            }
            3 => {
                fix.latitude = hemisphere(fix.latitude, r);
                Some(GgaLatitude)
            }
            4 => {
                fix.longitude = coordinate(r);
                None
            }
            5 => {
                fix.longitude = hemisphere(fix.longitude, r);
                Some(GgaLongitude)
            }
            6 => {
                fix.quality = small(r);
                Some(GgaQuality)
            }
            7 => {
                fix.satellites = small(r);
                Some(GgaSatellites)
            }
            8 => {
                fix.hdop = real(r);
                Some(GgaHdop)
            }
            9 => {
                fix.altitude = signed(r);
                Some(GgaAltitude)
            }
            _ => None,
        },
        SentenceKind::Rmc => match index {
            1 => {
                fix.time = time(r);
                Some(RmcTime)
            }
            2 => {
                fix.valid = r.first() == Some(&b'A');
                Some(RmcValidity)
            }
            3 => {
                fix.latitude = coordinate(r);
                None
            }
            4 => {
                fix.latitude = hemisphere(fix.latitude, r);
                Some(RmcLatitude)
            }
            5 => {
                fix.longitude = coordinate(r);
                None
            }
            6 => {
                fix.longitude = hemisphere(fix.longitude, r);
                Some(RmcLongitude)
            }
            7 => {
                fix.speed = real(r);
                Some(RmcSpeed)
            }
            8 => {
                fix.course = real(r);
                Some(RmcCourse)
            }
            9 => {
                fix.date = date(r);
                Some(RmcDate)
            }
            _ => None,
        },
        SentenceKind::Gsa => match index {
            2 => {
                fix.mode = small(r);
                Some(GsaMode)
            }
            3..=14 => {
                let slot = (index - 3) as usize;
                fix.satellite_ids[slot] = small(r);
                (slot == MAX_SATELLITE_IDS - 1).then_some(GsaSatelliteIds)
            }
            15 => {
                fix.pdop = real(r);
                Some(GsaPdop)
            }
            16 => {
                fix.hdop = real(r);
                Some(GsaHdop)
            }
            17 => {
                fix.vdop = real(r);
                Some(GsaVdop)
            }
            _ => None,
        },
        SentenceKind::Gsv => match index {
            1 => {
                gsv.expected = small(r);
                None
            }
            2 => {
                gsv.index = small(r);
                if gsv.index == 1 {
                    gsv.received = 0;
                }
                None
            }
            3 => {
                fix.in_view = small(r);
                Some(GsvSatellitesInView)
            }
            4.. => {
                let field = (index - 4) as usize;
                let slot = (gsv.index as usize)
                    .checked_sub(1)
                    .map(|i| i * SATELLITES_PER_GSV + field / SATELLITES_PER_GSV);

                // Descriptors past capacity are dropped.
                if let Some(slot) = slot.filter(|s| *s < MAX_SATELLITES) {
                    let satellite = &mut fix.satellites_in_view[slot];
                    match field % SATELLITES_PER_GSV {
                        0 => satellite.id = small(r),
                        1 => satellite.elevation = small(r),
                        2 => satellite.azimuth = integer(r).try_into().unwrap_or(u16::MAX),
                        _ => satellite.snr = small(r),
                    }
                }
                None
            }
            _ => None,
        },
        SentenceKind::Unknown => None,
    }
}

/// Apply a hemisphere field to an unsigned coordinate.
fn hemisphere(value: f32, r: &[u8]) -> f32 {
    if is_negative_hemisphere(r) { -value } else { value }
}

/// Decode an unsigned integer expected to fit in a byte, saturating.
fn small(r: &[u8]) -> u8 {
    integer(r).try_into().unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement(gsv: &mut GsvState, fix: &mut Fix, expected: &[u8], index: &[u8]) -> bool {
        dispatch(SentenceKind::Gsv, 1, expected, fix, gsv);
        dispatch(SentenceKind::Gsv, 2, index, fix, gsv);
        gsv.finish_statement()
    }

    #[test]
    fn gsv_group_in_order() {
        let (mut gsv, mut fix) = (GsvState::default(), Fix::default());

        assert!(!statement(&mut gsv, &mut fix, b"2", b"1"));
        assert!(statement(&mut gsv, &mut fix, b"2", b"2"));

        // Statement 1 starts the group over.
        assert!(!statement(&mut gsv, &mut fix, b"2", b"1"));
        assert!(!statement(&mut gsv, &mut fix, b"2", b"1"));
    }

    #[test]
    fn gsv_index_out_of_range() {
        let (mut gsv, mut fix) = (GsvState::default(), Fix::default());

        assert!(!statement(&mut gsv, &mut fix, b"0", b"0"));
        assert!(!statement(&mut gsv, &mut fix, b"9", b"9"));
    }

    #[test]
    fn gsv_reset_forgets_statements() {
        let (mut gsv, mut fix) = (GsvState::default(), Fix::default());

        assert!(!statement(&mut gsv, &mut fix, b"2", b"1"));
        gsv.reset();
        assert!(!statement(&mut gsv, &mut fix, b"2", b"2"));
    }

    #[test]
    fn gsv_index_is_per_sentence() {
        let (mut gsv, mut fix) = (GsvState::default(), Fix::default());

        assert!(!statement(&mut gsv, &mut fix, b"2", b"1"));
        gsv.start_sentence();
        dispatch(SentenceKind::Gsv, 1, b"2", &mut fix, &mut gsv);
        assert!(!gsv.finish_statement());
    }

    #[test]
    fn gsa_ids_complete_on_last_slot() {
        let (mut gsv, mut fix) = (GsvState::default(), Fix::default());

        assert_eq!(dispatch(SentenceKind::Gsa, 3, b"04", &mut fix, &mut gsv), None);
        assert_eq!(
            dispatch(SentenceKind::Gsa, 14, b"", &mut fix, &mut gsv),
            Some(GsaSatelliteIds)
        );
        assert_eq!(fix.satellite_ids().next(), Some(4));
    }

    #[test]
    fn from_talker() {
        assert_eq!(SentenceKind::from_talker(b"GPGSV"), SentenceKind::Gsv);
        assert_eq!(SentenceKind::from_talker(b"GNGGA"), SentenceKind::Unknown);
    }
}
