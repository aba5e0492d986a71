//! Internal epoch and unix-seconds conversion.
//!
//! Grounded on `acetime.common`: `EPOCH_YEAR` moved from 2000 to 2050 in the
//! original library "to be more compatible with AceTime v2, mostly for
//! debugging purposes." `tzresolve` resolves the §9 open question the same
//! way and pins `EPOCH_YEAR` to 2050.
use crate::calendar::epoch_days_for_civil;
use crate::constants::SECONDS_PER_DAY;

/// The year the internal epoch is anchored to.
pub const EPOCH_YEAR: i32 = 2050;

/// Seconds from the Unix epoch (1970-01-01T00:00:00Z) to `EPOCH_YEAR`-01-01T00:00:00Z.
///
/// Every absolute-seconds value the core touches is expressed relative to
/// this constant; a host façade holding unix seconds must subtract this
/// value before calling [`crate::facade::QueryFacade`] methods.
pub const EPOCH_OFFSET_FROM_UNIX: i64 = epoch_days_for_civil(EPOCH_YEAR, 1, 1) * SECONDS_PER_DAY;

/// Unix seconds -> internal epoch seconds.
pub const fn to_epoch_seconds(unix_seconds: i64) -> i64 {
    unix_seconds - EPOCH_OFFSET_FROM_UNIX
}

/// Internal epoch seconds -> unix seconds.
pub const fn to_unix_seconds(epoch_seconds: i64) -> i64 {
    epoch_seconds + EPOCH_OFFSET_FROM_UNIX
}
