//! Sentinel year values shared across the pipeline.
//!
//! Mirrors `acetime.common`: `MIN_YEAR`/`MAX_UNTIL_YEAR`/`MAX_TO_YEAR` bound
//! the representable range, `INVALID_YEAR` flags "no such year" in the
//! most-recent-prior-year computation (§4.5).

/// Smallest representable year; also the sentinel year of [`crate::date_tuple::DateTuple::MIN`].
pub const MIN_YEAR: i32 = -32767;

/// The terminal era of every zone carries this as its `until_year`.
pub const MAX_UNTIL_YEAR: i32 = 32767;

/// `to_year` value denoting "open-ended" (rule never stops applying).
pub const MAX_TO_YEAR: i32 = MAX_UNTIL_YEAR - 1;

/// Sentinel meaning "not a valid year" (distinct from any in-range year).
pub const INVALID_YEAR: i32 = -32768;

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;
