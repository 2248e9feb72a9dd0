//! Helper for computing sentence checksums.

/// Running XOR of the bytes between a sentence's `$` and `*` delimiters.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Checksum(pub u8);

impl Checksum {
    pub fn new() -> Self {
        Self(0)
    }

    /// Accumulate a single byte into the checksum.
    pub fn next(self, b: u8) -> Self {
        Self(self.0 ^ b)
    }
}

impl PartialEq<u8> for Checksum {
    fn eq(&self, other: &u8) -> bool {
        self.0 == *other
    }
}

/// Accumulate a slice of bytes into a checksum value.
pub fn compute_checksum(init: Checksum, r: &[u8]) -> Checksum {
    r.iter().fold(init, |acc, b| acc.next(*b))
}

/// Decode the two transmitted hex digits following a sentence's `*`.
///
/// Either case is accepted. Returns `None` unless exactly two hex digits are
/// present.
pub fn parse_transmitted(r: &[u8]) -> Option<u8> {
    match r {
        [hi, lo] => Some(hex_digit(*hi)? << 4 | hex_digit(*lo)?),
        _ => None,
    }
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_covers_commas() {
        // GPGLL example sentence from the NMEA reference manual.
        let body = b"GPGLL,4916.45,N,12311.12,W,225444,A";
        assert_eq!(compute_checksum(Checksum::new(), body), 0x31);
    }

    #[test]
    fn transmitted_digits() {
        assert_eq!(parse_transmitted(b"4F"), Some(0x4f));
        assert_eq!(parse_transmitted(b"4f"), Some(0x4f));
        assert_eq!(parse_transmitted(b"4"), None);
        assert_eq!(parse_transmitted(b"4G"), None);
        assert_eq!(parse_transmitted(b"4F0"), None);
    }
}
