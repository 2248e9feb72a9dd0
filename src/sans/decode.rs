//! Fixed-point decoders for field text.
//!
//! Every decoder scans left to right and stops at the first byte it does not
//! expect, keeping whatever was accumulated so far. An empty field decodes to
//! zero.

/// Fractional digits beyond this count are ignored.
const MAX_FRACTION_DIGITS: u8 = 9;

const POWERS_OF_TEN: [u32; MAX_FRACTION_DIGITS as usize + 1] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// A decimal number split into its integer and fractional digits.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Decimal {
    /// Digits before the decimal point.
    pub whole: u32,
    /// Digits after the decimal point, as an integer.
    pub fraction: u32,
    /// Number of digits in `fraction`.
    pub digits: u8,
}

impl Decimal {
    /// The fractional part as a real number in `[0, 1)`.
    pub fn fraction(&self) -> f32 {
        self.fraction as f32 / POWERS_OF_TEN[self.digits as usize] as f32
    }

    pub fn value(&self) -> f32 {
        self.whole as f32 + self.fraction()
    }
}

/// Decode an unsigned decimal number such as `"022.4"`.
pub fn decimal(r: &[u8]) -> Decimal {
    let mut d = Decimal::default();
    let mut bytes = r.iter();

    for &b in bytes.by_ref() {
        match b {
            b'0'..=b'9' => d.whole = d.whole.saturating_mul(10).saturating_add((b - b'0') as u32),
            b'.' => break,
            _ => return d,
        }
    }

    for &b in bytes {
        match b {
            b'0'..=b'9' if d.digits < MAX_FRACTION_DIGITS => {
                d.fraction = d.fraction * 10 + (b - b'0') as u32;
                d.digits += 1;
            }
            _ => break,
        }
    }

    d
}

/// Decode an unsigned integer, ignoring any fractional part.
pub fn integer(r: &[u8]) -> u32 {
    decimal(r).whole
}

/// Decode an unsigned real number.
pub fn real(r: &[u8]) -> f32 {
    decimal(r).value()
}

/// Decode a real number with an optional leading `-`.
pub fn signed(r: &[u8]) -> f32 {
    match r.split_first() {
        Some((b'-', rest)) => -real(rest),
        _ => real(r),
    }
}

/// Decode an unsigned coordinate in `DDMM.mmmm` or `DDDMM.mmmm` form to
/// decimal degrees.
pub fn coordinate(r: &[u8]) -> f32 {
    let d = decimal(r);
    let degrees = d.whole / 100;
    let minutes = (d.whole % 100) as f32 + d.fraction();
    degrees as f32 + minutes / 60.0
}

/// Whether a hemisphere field (`N`, `S`, `E`, `W`) denotes a negative
/// coordinate.
pub fn is_negative_hemisphere(r: &[u8]) -> bool {
    matches!(r.first(), Some(b'S' | b'W'))
}

/// UTC time of day.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Time {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub hundredths: u8,
}

/// Decode a time in `HHMMSS.hh` form.
pub fn time(r: &[u8]) -> Time {
    let d = decimal(r);
    let v = d.whole;

    // Rescale the fraction to exactly two digits.
    let hundredths = match d.digits {
        0 => 0,
        1 => d.fraction * 10,
        n => d.fraction / POWERS_OF_TEN[n as usize - 2],
    };

    Time {
        hours: ((v / 10_000) % 100) as u8,
        minutes: ((v / 100) % 100) as u8,
        seconds: (v % 100) as u8,
        hundredths: hundredths as u8,
    }
}

/// UTC calendar date, with a two-digit year.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Date {
    pub day: u8,
    pub month: u8,
    pub year: u8,
}

/// Decode a date in `DDMMYY` form.
pub fn date(r: &[u8]) -> Date {
    let v = integer(r);

    Date {
        day: ((v / 10_000) % 100) as u8,
        month: ((v / 100) % 100) as u8,
        year: (v % 100) as u8,
    }
}
