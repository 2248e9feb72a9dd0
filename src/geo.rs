//! Great-circle helpers on a spherical Earth.
//!
//! _Requires Cargo feature `std`._

use crate::avec::Position;

extern crate std;

/// Mean radius of the Earth, in metres.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Distance between two positions in metres, by the spherical law of cosines.
pub fn distance(a: Position, b: Position) -> f64 {
    let (lat1, lat2) = (radians(a.lat), radians(b.lat));
    let delta = radians(b.lon) - radians(a.lon);

    let cos = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * delta.cos();

    // Rounding can push nearly coincident points just past the domain of acos.
    EARTH_RADIUS * cos.clamp(-1.0, 1.0).acos()
}

/// Initial course from `a` towards `b`, in degrees from true north in the
/// range `[0, 360)`.
pub fn bearing(a: Position, b: Position) -> f64 {
    let (lat1, lat2) = (radians(a.lat), radians(b.lat));
    let delta = radians(b.lon) - radians(a.lon);

    let y = delta.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

fn radians(degrees: f32) -> f64 {
    f64::from(degrees).to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: Position = Position {
        lat: 51.5074,
        lon: -0.1278,
    };
    const PARIS: Position = Position {
        lat: 48.8566,
        lon: 2.3522,
    };

    #[test]
    fn london_to_paris() {
        let d = distance(LONDON, PARIS);
        assert!((d - 343_560.0).abs() < 1_000.0, "{d}");

        let b = bearing(LONDON, PARIS);
        assert!((b - 148.1).abs() < 0.5, "{b}");
    }

    #[test]
    fn coincident() {
        assert!(distance(PARIS, PARIS) < 1.0);
    }

    #[test]
    fn due_west_wraps() {
        let a = Position { lat: 0.0, lon: 10.0 };
        let b = Position { lat: 0.0, lon: 9.0 };
        assert!((bearing(a, b) - 270.0).abs() < 1e-6);
    }
}
