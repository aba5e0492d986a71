//! §4.2 `DateTuple` and its algebra: `normalize`, `subtract`, `expand`.
//!
//! Grounded on `original_source/src/acetime/date_tuple.py` (`DateTuple`,
//! `subtract_date_tuple`, `normalize_date_tuple`) and
//! `zone_processor.py::_expand_date_tuple`.

use crate::calendar::epoch_days_for_civil;
use crate::constants::{MIN_YEAR, SECONDS_PER_DAY};
use crate::error::CoreError;

/// Which time base a [`DateTuple`]'s `seconds_in_day` is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suffix {
    /// Wall clock time, including any DST delta.
    Wall,
    /// Standard time: wall time minus the DST delta.
    Standard,
    /// UTC (absolute) time.
    Utc,
}

/// A `(year, month, day, seconds_in_day, suffix)` tuple — a date-time that
/// can legally carry an out-of-range `seconds_in_day` (e.g. 24:00) until
/// [`DateTuple::normalize`] is called, and that distinguishes the wall/
/// standard/UTC time bases explicitly instead of attaching a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTuple {
    pub y: i32,
    pub m: u8,
    pub d: u8,
    pub seconds_in_day: i32,
    pub suffix: Suffix,
}

impl DateTuple {
    /// The sentinel "negative infinity" date, used as the effective start of
    /// the very first era in a zone (§4.4).
    pub const MIN: DateTuple = DateTuple {
        y: MIN_YEAR,
        m: 1,
        d: 1,
        seconds_in_day: 0,
        suffix: Suffix::Wall,
    };

    pub const fn new(y: i32, m: u8, d: u8, seconds_in_day: i32, suffix: Suffix) -> Self {
        Self {
            y,
            m,
            d,
            seconds_in_day,
            suffix,
        }
    }

    fn with_suffix(self, suffix: Suffix) -> Self {
        Self { suffix, ..self }
    }

    /// Day-ordinal comparison ignoring `seconds_in_day` and `suffix` —
    /// used by the tie-break rules in §4.4.
    pub fn cmp_ymd(&self, other: &DateTuple) -> core::cmp::Ordering {
        (self.y, self.m, self.d).cmp(&(other.y, other.m, other.d))
    }

    /// Re-derives a legal calendar date from a tuple whose `seconds_in_day`
    /// may be negative or `>= 86_400` (e.g. the raw `24:00` wall time emitted
    /// by a rule). The sentinel [`DateTuple::MIN`] passes through unchanged.
    pub fn normalize(self) -> Result<DateTuple, CoreError> {
        if self.y == MIN_YEAR {
            return Ok(DateTuple::MIN.with_suffix(self.suffix));
        }
        let epoch_days = epoch_days_for_civil(self.y, self.m, self.d);
        let total_seconds = epoch_days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|s| s.checked_add(self.seconds_in_day as i64))
            .ok_or(CoreError::CorruptNormalize)?;
        let day_count = total_seconds.div_euclid(SECONDS_PER_DAY);
        let seconds_in_day = total_seconds.rem_euclid(SECONDS_PER_DAY) as i32;
        let (y, m, d) = civil_from_epoch_days(day_count).ok_or(CoreError::CorruptNormalize)?;
        Ok(DateTuple::new(y, m, d, seconds_in_day, self.suffix))
    }

    /// `self - other`, in seconds, ignoring `suffix`. `self` and `other` are
    /// assumed already normalized.
    pub fn subtract(&self, other: &DateTuple) -> i64 {
        let a_days = epoch_days_for_civil(self.y, self.m, self.d);
        let b_days = epoch_days_for_civil(other.y, other.m, other.d);
        (a_days - b_days) * SECONDS_PER_DAY + (self.seconds_in_day - other.seconds_in_day) as i64
    }

    /// Expands one suffix form into the other two, given the era's standard
    /// offset and the transition's DST delta (both in seconds). Returns
    /// `(wall, standard, utc)`, each normalized.
    pub fn expand(self, std_offset: i32, dst_delta: i32) -> Result<(DateTuple, DateTuple, DateTuple), CoreError> {
        let (w_secs, s_secs, u_secs) = match self.suffix {
            Suffix::Wall => (
                self.seconds_in_day,
                self.seconds_in_day - dst_delta,
                self.seconds_in_day - dst_delta - std_offset,
            ),
            Suffix::Standard => (
                self.seconds_in_day + dst_delta,
                self.seconds_in_day,
                self.seconds_in_day - std_offset,
            ),
            Suffix::Utc => (
                self.seconds_in_day + dst_delta + std_offset,
                self.seconds_in_day + std_offset,
                self.seconds_in_day,
            ),
        };
        let w = DateTuple::new(self.y, self.m, self.d, w_secs, Suffix::Wall).normalize()?;
        let s = DateTuple::new(self.y, self.m, self.d, s_secs, Suffix::Standard).normalize()?;
        let u = DateTuple::new(self.y, self.m, self.d, u_secs, Suffix::Utc).normalize()?;
        Ok((w, s, u))
    }
}

impl PartialOrd for DateTuple {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateTuple {
    /// Total order by `(y, m, d, seconds_in_day)`, ignoring `suffix` — used
    /// wherever the pipeline needs "raw `transition_time` order" (§4.5 pass
    /// 1/2), which is defined independent of which time base a candidate
    /// happens to be expressed in before suffix expansion.
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        (self.y, self.m, self.d, self.seconds_in_day).cmp(&(
            other.y,
            other.m,
            other.d,
            other.seconds_in_day,
        ))
    }
}

/// Inverse of [`crate::calendar::epoch_days_for_civil`]. `None` only for
/// inputs so large they overflow `i32` year arithmetic.
pub(crate) fn civil_from_epoch_days(z: i64) -> Option<(i32, u8, u8)> {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let y = if m <= 2 { y + 1 } else { y };
    i32::try_from(y).ok().map(|y| (y, m, d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rolls_24_00_into_next_day() {
        let dt = DateTuple::new(2000, 4, 1, 24 * 3600, Suffix::Wall);
        let n = dt.normalize().unwrap();
        assert_eq!((n.y, n.m, n.d, n.seconds_in_day), (2000, 4, 2, 0));
    }

    #[test]
    fn normalize_min_sentinel_passes_through() {
        let n = DateTuple::MIN.normalize().unwrap();
        assert_eq!(n, DateTuple::MIN);
    }

    #[test]
    fn subtract_ignores_suffix() {
        let a = DateTuple::new(2000, 1, 2, 0, Suffix::Wall);
        let b = DateTuple::new(2000, 1, 1, 0, Suffix::Utc);
        assert_eq!(a.subtract(&b), 86_400);
    }

    #[test]
    fn expand_round_trips_wall_to_utc_and_back() {
        let w = DateTuple::new(2000, 4, 2, 3 * 3600, Suffix::Wall);
        let (w2, s, u) = w.expand(-8 * 3600, 3600).unwrap();
        assert_eq!(w2, w);
        assert_eq!(s.seconds_in_day, 2 * 3600);
        // u = w - dst - std = 3h - 1h - (-8h) = 10h
        assert_eq!(u.seconds_in_day, 10 * 3600);
        let (w3, s3, u3) = u.expand(-8 * 3600, 3600).unwrap();
        assert_eq!(w3, w);
        assert_eq!(s3, s);
        assert_eq!(u3, u);
    }
}
