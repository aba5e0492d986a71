//! §7 error taxonomy.
//!
//! `CoreError` covers the fatal, "corrupt upstream data" class (§9: "model as
//! a distinct error enum with at least `CorruptSuffix`, `CorruptNormalize`,
//! `CorruptSort`"). Everything else in §7 (`NoTransition`, `InvalidCivilTime`)
//! is a first-class `None` return, not an error variant — see
//! [`crate::facade::QueryFacade`].
//!
//! Shape follows `zoneinfo_rs::parser::ZoneInfoParseError`: a plain
//! `#[derive(Debug)]` enum with a hand-written `Display`, no `thiserror`.

use core::fmt;

/// Fatal conditions that indicate corrupt upstream zone data rather than a
/// normal query outcome. A caller encountering one of these should treat it
/// as a programming/data error, not retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// `DateTuple::expand` was asked to expand an unrecognized suffix, or a
    /// suffix-expansion input was otherwise malformed.
    CorruptSuffix,
    /// `DateTuple::normalize` produced a year outside the representable
    /// range, or overflowed while combining day count and seconds.
    CorruptNormalize,
    /// The candidate list was not sorted by raw `transition_time` after
    /// suffix expansion (§4.5 pass 2's sort-verification step).
    CorruptSort,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::CorruptSuffix => write!(f, "unknown or unhandled time-base suffix"),
            CoreError::CorruptNormalize => {
                write!(f, "date-tuple normalization produced an unrepresentable date")
            }
            CoreError::CorruptSort => {
                write!(f, "transition candidates were not sorted after suffix expansion")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}

/// Raised by [`crate::registry::ZoneRegistry`] when a requested zone name
/// (or link alias) has no entry — the façade-factory-level error named in
/// §7, distinct from the in-pipeline [`CoreError`] variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneUnknown {
    pub name: alloc::string::String,
}

impl fmt::Display for ZoneUnknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown zone: {}", self.name)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ZoneUnknown {}
