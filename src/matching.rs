//! §4.4 Matching-era selection.
//!
//! Grounded on `zone_processor.py::_find_matches`, `_era_overlaps_interval`,
//! `_compare_era_to_year_month`, and `_create_match`.
//!
//! Arena+index addressing (§9 design note): a [`MatchingEra`] references its
//! predecessor by `prev: Option<usize>` into the same `Vec<MatchingEra>`
//! rather than a back-pointer, since the `prev` relationship is intrinsically
//! linear.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::date_tuple::DateTuple;
use crate::model::ZoneEra;

/// A `(year, month)` pair used for day-less window-boundary comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u8,
}

impl YearMonth {
    pub const fn new(year: i32, month: u8) -> Self {
        Self { year, month }
    }

    /// `DateTuple` for the first instant of this year-month, used to clamp
    /// a `MatchingEra`'s start/until into the window.
    fn as_date_tuple(self, suffix: crate::date_tuple::Suffix) -> DateTuple {
        DateTuple::new(self.year, self.month, 1, 0, suffix)
    }
}

/// An era that overlaps the `[start_ym, until_ym)` window for one query
/// year, with its start/until truncated to the window boundary.
#[derive(Debug, Clone)]
pub struct MatchingEra {
    pub start: DateTuple,
    pub until: DateTuple,
    /// Index of the originating era within the zone's era list.
    pub era_index: usize,
    /// Index of the previous `MatchingEra` in the same output `Vec`, or
    /// `None` for the first.
    pub prev: Option<usize>,
    /// Back-filled by the transition generator (§4.5) once this era's
    /// transitions are known: index into the transition arena.
    pub last_transition: Option<usize>,
}

/// `era.until` is strictly less than `(y, m)`, ignoring day/seconds.
fn until_lt_year_month(era: &ZoneEra, y: i32, m: u8) -> bool {
    era.until_year < y || (era.until_year == y && era.until_month < m)
}

/// `era.until` is strictly greater than `(y, m)`, per §4.4's tie semantics
/// (this direction *does* look at `until_day`/`until_seconds`).
fn until_gt_year_month(era: &ZoneEra, y: i32, m: u8) -> bool {
    era.until_year > y
        || (era.until_year == y
            && (era.until_month > m || era.until_day > 1 || era.until_seconds > 0))
}

/// Compares `era.until` against `(y, m)`, day-less. Used by callers that
/// need the three-way result rather than the `<`/`>` boolean helpers above.
pub fn compare_era_to_year_month(era: &ZoneEra, y: i32, m: u8) -> Ordering {
    if until_lt_year_month(era, y, m) {
        Ordering::Less
    } else if until_gt_year_month(era, y, m) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

fn era_until_date_tuple(era: &ZoneEra) -> DateTuple {
    DateTuple::new(
        era.until_year,
        era.until_month,
        era.until_day,
        era.until_seconds,
        era.until_suffix,
    )
}

/// Produces the ordered `MatchingEra` sequence for `eras` overlapping
/// `[start_ym, until_ym)`.
pub fn find_matches(eras: &[ZoneEra], start_ym: YearMonth, until_ym: YearMonth) -> Vec<MatchingEra> {
    let start_date = start_ym.as_date_tuple(crate::date_tuple::Suffix::Wall);
    let until_date = until_ym.as_date_tuple(crate::date_tuple::Suffix::Wall);

    let mut matches = Vec::new();
    for (i, era) in eras.iter().enumerate() {
        let prev_before_until = if i == 0 {
            true // the effective start of the first era is -infinity
        } else {
            until_lt_year_month(&eras[i - 1], until_ym.year, until_ym.month)
        };
        let this_after_start = until_gt_year_month(era, start_ym.year, start_ym.month);

        if !(prev_before_until && this_after_start) {
            continue;
        }

        let raw_start = if i == 0 {
            DateTuple::MIN
        } else {
            era_until_date_tuple(&eras[i - 1])
        };
        let raw_until = era_until_date_tuple(era);

        let start = if i == 0 || raw_start.cmp_ymd(&start_date) == Ordering::Less {
            start_date
        } else {
            raw_start
        };
        let until = if raw_until.cmp_ymd(&until_date) == Ordering::Greater {
            until_date
        } else {
            raw_until
        };

        matches.push(MatchingEra {
            start,
            until,
            era_index: i,
            prev: matches.len().checked_sub(1),
            last_transition: None,
        });
    }
    matches
}
