//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::io::Read;

use thiserror::Error;

use super::{Fix, Parser, Status};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Feed bytes from a reader to a parser until a fix is completed.
///
/// Returns `None` once the reader is exhausted without completing a fix. The
/// reader is consumed a byte at a time, so wrap unbuffered sources (such as a
/// serial port) in a [`std::io::BufReader`].
///
/// This method is also re-exported as `sextant::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, p: &mut Parser) -> Result<Option<Fix>, Error> {
    for b in r.bytes() {
        if p.update(b?) == Status::NewData {
            return Ok(Some(*p.fix()));
        }
    }

    Ok(None)
}
