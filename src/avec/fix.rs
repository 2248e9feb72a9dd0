//! The snapshot assembled from one reporting cycle.

pub use crate::sans::decode::{Date, Time};

/// Number of satellites-in-view descriptors kept from a GSV group.
pub const MAX_SATELLITES: usize = 16;

/// Number of satellite ID slots in a GSA sentence.
pub const MAX_SATELLITE_IDS: usize = 12;

/// A position in signed decimal degrees. South and west are negative.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    pub lat: f32,
    pub lon: f32,
}

/// A satellite-in-view descriptor from a GSV sentence.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Satellite {
    pub id: u8,
    /// Elevation in degrees.
    pub elevation: u8,
    /// Azimuth in degrees from true north.
    pub azimuth: u16,
    /// Signal-to-noise ratio in dB-Hz. Zero when not tracking.
    pub snr: u8,
}

/// A complete, internally consistent fix.
///
/// Fields belonging to a sentence group that is not enabled keep their
/// default values.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fix {
    pub latitude: f32,
    pub longitude: f32,
    /// Altitude above mean sea level, in metres.
    pub altitude: f32,
    /// Satellites used in the solution (GGA).
    pub satellites: u8,
    /// Fix quality indicator (GGA): 0 invalid, 1 GPS, 2 DGPS, ...
    pub quality: u8,
    pub time: Time,
    pub date: Date,
    /// Speed over ground, in knots.
    pub speed: f32,
    /// Course over ground, in degrees from true north.
    pub course: f32,
    pub hdop: f32,
    pub vdop: f32,
    pub pdop: f32,
    /// Fix mode (GSA): 1 none, 2 2D, 3 3D.
    pub mode: u8,
    /// IDs of satellites used in the solution (GSA). Unused slots are zero.
    pub satellite_ids: [u8; MAX_SATELLITE_IDS],
    /// Number of satellites in view, as announced by GSV.
    pub in_view: u8,
    pub satellites_in_view: [Satellite; MAX_SATELLITES],
    /// RMC status is `A` (active).
    pub valid: bool,
}

impl Fix {
    pub fn position(&self) -> Position {
        Position {
            lat: self.latitude,
            lon: self.longitude,
        }
    }

    /// The descriptors of satellites in view, limited to those announced.
    pub fn satellites_in_view(&self) -> &[Satellite] {
        let n = (self.in_view as usize).min(MAX_SATELLITES);
        &self.satellites_in_view[..n]
    }

    /// IDs of satellites used in the solution, skipping empty slots.
    pub fn satellite_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.satellite_ids.iter().copied().filter(|id| *id != 0)
    }
}
