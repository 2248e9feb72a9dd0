//! Slice-based decoder implementation.

use super::{Fix, Parser, Status};

/// Feed bytes from a slice to a parser, stopping after the byte that completes
/// a fix.
///
/// Returns the number of bytes consumed, and the status after the last of
/// them. When a slice holds more than one cycle, call again with the remaining
/// bytes to receive each fix in turn.
pub fn decode(r: &[u8], p: &mut Parser) -> (usize, Status) {
    let mut status = p.status();

    for (i, b) in r.iter().enumerate() {
        status = p.update(*b);

        if status == Status::NewData {
            return (i + 1, status);
        }
    }

    (r.len(), status)
}

/// Iterate over every fix completed by the bytes of a slice.
///
/// This method is also re-exported as `sextant::avec::fixes`.
pub fn fixes<'a>(r: &'a [u8], p: &'a mut Parser) -> Fixes<'a> {
    Fixes { r, p }
}

/// Iterator returned by [`fixes`].
#[derive(Debug)]
pub struct Fixes<'a> {
    r: &'a [u8],
    p: &'a mut Parser,
}

impl Iterator for Fixes<'_> {
    type Item = Fix;

    fn next(&mut self) -> Option<Fix> {
        while !self.r.is_empty() {
            let (n, status) = decode(self.r, self.p);
            self.r = &self.r[n..];

            if status == Status::NewData {
                return Some(*self.p.fix());
            }
        }

        None
    }
}
