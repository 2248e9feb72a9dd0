#![no_std]

//! A streaming, allocation-free parser assembling GPS fixes from NMEA-0183
//! sentences.
//!
//! Sextant consumes the output of a GPS receiver one byte at a time, checks
//! each sentence's checksum, and reports when the GGA, RMC, GSA and GSV
//! sentences of a reporting cycle have together produced a complete fix. It
//! performs no I/O, never blocks, and holds all of its state in fixed-size
//! buffers, so it can be driven directly from a serial receive loop on an
//! embedded target.
//!
//! Most users should begin with the [`avec::Parser`]. Applications needing to
//! handle sentences themselves can use the tokenizer and field decoders in the
//! [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable the reader-based decoder and the [`geo`] helpers (default).
//! - `defmt`: derive `defmt::Format` for public types, and log parser events.

mod fmt;

pub mod avec;
#[cfg(feature = "std")]
pub mod geo;
pub mod sans;
