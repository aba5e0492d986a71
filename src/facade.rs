//! §4.7 Query façade, §4.8 terminal-year predicate, §4.11 from-UTC inverse.
//!
//! Grounded on `original_source/src/acetime/zone_processor.py::ZoneProcessor`
//! (`init_for_year`, `get_timezone_info_for_seconds`,
//! `get_timezone_info_for_datetime`) and `acetz.fromutc` for §4.11.

use alloc::string::String;
use alloc::vec::Vec;

use crate::constants::{MAX_TO_YEAR, SECONDS_PER_DAY};
use crate::date_tuple::{civil_from_epoch_days, DateTuple, Suffix};
use crate::epoch::{to_epoch_seconds, to_unix_seconds};
use crate::error::CoreError;
use crate::matching::{find_matches, MatchingEra, YearMonth};
use crate::model::{Policy, ZoneEra};
use crate::postpass::apply_post_pass;
use crate::storage::TransitionStorage;
use crate::transition::{generate_transitions, Transition};

/// The result of an offset lookup (§6 Core API: `OffsetInfo`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetInfo {
    pub total_offset_s: i32,
    pub std_offset_s: i32,
    pub dst_offset_s: i32,
    pub abbrev: String,
    pub fold: u8,
}

/// A civil (year, month, day, seconds-in-day) input to [`QueryFacade::info_by_civil`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilInput {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub seconds_in_day: i32,
    pub fold: u8,
}

/// A reconstructed local civil time, returned by [`QueryFacade::from_utc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilInstant {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub seconds_in_day: i32,
    pub fold: u8,
}

/// One zone's immutable era table plus the single-year cache of derived
/// transitions (§5: "a Query Façade instance holds mutable cached derived
/// state... must not be shared across threads without an external mutex").
pub struct QueryFacade {
    name: String,
    eras: Vec<ZoneEra>,
    storage: TransitionStorage,
    cached_year: Option<i32>,
    matches: Vec<MatchingEra>,
    transitions: Vec<Transition>,
}

impl QueryFacade {
    pub fn build(name: String, eras: Vec<ZoneEra>) -> Self {
        Self {
            name,
            eras,
            storage: TransitionStorage::new(),
            cached_year: None,
            matches: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub fn zone_name(&self) -> &str {
        &self.name
    }

    /// Runs §4.4-§4.6 for the 14-month window centered on `y`, unless the
    /// cache already holds `y`.
    pub fn init_for_year(&mut self, y: i32) -> Result<(), CoreError> {
        if self.cached_year == Some(y) {
            return Ok(());
        }
        self.storage.clear();
        let start_ym = YearMonth::new(y - 1, 12);
        let until_ym = YearMonth::new(y + 1, 2);
        let mut matches = find_matches(&self.eras, start_ym, until_ym);
        let mut transitions = generate_transitions(&self.eras, &mut matches, &mut self.storage)?;
        apply_post_pass(&mut transitions, &self.eras, &matches)?;

        #[cfg(feature = "std")]
        log::trace!(
            "{}: rebuilt {} transitions for year {} (buffer peak {})",
            self.name,
            transitions.len(),
            y,
            self.storage.peak(),
        );

        self.matches = matches;
        self.transitions = transitions;
        self.cached_year = Some(y);
        Ok(())
    }

    /// The peak transition-buffer occupancy observed by the most recent
    /// [`QueryFacade::init_for_year`] call.
    pub fn buffer_peak(&self) -> usize {
        self.storage.peak()
    }

    /// §4.7 `lookup_by_seconds`.
    pub fn info_by_absolute(&mut self, s: i64) -> Result<Option<OffsetInfo>, CoreError> {
        let unix = to_unix_seconds(s);
        let year = year_of_unix_seconds(unix);
        self.init_for_year(year)?;

        let mut found = None;
        for (i, t) in self.transitions.iter().enumerate() {
            if t.start_epoch_second <= s {
                found = Some(i);
            } else {
                break;
            }
        }
        let i = match found {
            Some(i) => i,
            None => return Ok(None),
        };

        let fold = if i >= 1 {
            let overlap = self.transitions[i - 1].until.subtract(&self.transitions[i].start);
            if overlap > 0 && (s - self.transitions[i].start_epoch_second) < overlap {
                1
            } else {
                0
            }
        } else {
            0
        };

        Ok(Some(self.offset_info(i, fold)))
    }

    /// §4.7 `lookup_by_civil`.
    pub fn info_by_civil(&mut self, dt: CivilInput) -> Result<Option<OffsetInfo>, CoreError> {
        self.init_for_year(dt.year)?;
        let probe = DateTuple::new(dt.year, dt.month, dt.day, dt.seconds_in_day, Suffix::Wall);

        let mut prev_exact: Option<usize> = None;
        let mut prev_transition: Option<usize> = None;

        for i in 0..self.transitions.len() {
            let t = &self.transitions[i];
            if t.start <= probe && probe < t.until {
                if dt.fold == 0 {
                    return Ok(Some(self.offset_info(i, 0)));
                }
                prev_exact = Some(i);
            } else if t.start > probe {
                if let Some(e) = prev_exact {
                    return Ok(Some(self.offset_info(e, 1)));
                }
                return Ok(if dt.fold == 0 {
                    prev_transition.map(|p| self.offset_info(p, 0))
                } else {
                    Some(self.offset_info(i, 1))
                });
            }
            prev_transition = Some(i);
        }

        Ok(if let Some(e) = prev_exact {
            Some(self.offset_info(e, 1))
        } else {
            prev_transition.map(|p| self.offset_info(p, dt.fold))
        })
    }

    fn offset_info(&self, i: usize, fold: u8) -> OffsetInfo {
        let t = &self.transitions[i];
        OffsetInfo {
            total_offset_s: t.offset_seconds + t.delta_seconds,
            std_offset_s: t.offset_seconds,
            dst_offset_s: t.delta_seconds,
            abbrev: t.abbrev.clone(),
            fold,
        }
    }

    /// §4.8: whether no year after `y` can further change the active buffer
    /// shape for this zone.
    pub fn is_terminal_year(&self, y: i32) -> bool {
        let last = match self.eras.last() {
            Some(e) => e,
            None => return true,
        };
        if y > last.until_year {
            return true;
        }
        let begins_year = if self.eras.len() >= 2 {
            self.eras[self.eras.len() - 2].until_year
        } else {
            crate::constants::MIN_YEAR
        };
        if y < begins_year {
            return false;
        }
        match &last.policy {
            Policy::NoDst | Policy::FixedDelta(_) => true,
            Policy::Named(policy) => {
                if policy.rules.iter().any(|r| r.from_year > y) {
                    return false;
                }
                let finite_covers_y = policy
                    .rules
                    .iter()
                    .any(|r| r.to_year != MAX_TO_YEAR && r.from_year <= y && y <= r.to_year);
                !finite_covers_y
            }
        }
    }

    /// §4.11 `from_utc`: the inverse "from UTC" conversion, preserving the
    /// fold bit reported by [`QueryFacade::info_by_absolute`].
    pub fn from_utc(&mut self, instant_seconds: i64) -> Result<Option<CivilInstant>, CoreError> {
        let info = match self.info_by_absolute(instant_seconds)? {
            Some(info) => info,
            None => return Ok(None),
        };
        let unix = to_unix_seconds(instant_seconds) + info.total_offset_s as i64;
        let days = unix.div_euclid(SECONDS_PER_DAY);
        let seconds_in_day = unix.rem_euclid(SECONDS_PER_DAY) as i32;
        let (year, month, day) =
            civil_from_epoch_days(days).ok_or(CoreError::CorruptNormalize)?;
        Ok(Some(CivilInstant {
            year,
            month,
            day,
            seconds_in_day,
            fold: info.fold,
        }))
    }
}

fn year_of_unix_seconds(unix: i64) -> i32 {
    let days = unix.div_euclid(SECONDS_PER_DAY);
    civil_from_epoch_days(days).map(|(y, _, _)| y).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Format, ZoneRule};

    fn la_eras() -> Vec<ZoneEra> {
        alloc::vec![ZoneEra {
            offset_seconds: -8 * 3600,
            policy: Policy::Named(crate::model::ZonePolicy {
                name: String::from("US"),
                rules: alloc::vec![
                    ZoneRule {
                        from_year: 1987,
                        to_year: MAX_TO_YEAR,
                        in_month: 4,
                        on_day_of_week: 7,
                        on_day_of_month: 1,
                        at_seconds: 2 * 3600,
                        at_suffix: Suffix::Wall,
                        delta_seconds: 3600,
                        letter: Some(String::from("D")),
                    },
                    ZoneRule {
                        from_year: 1987,
                        to_year: MAX_TO_YEAR,
                        in_month: 10,
                        on_day_of_week: 7,
                        on_day_of_month: 0,
                        at_seconds: 2 * 3600,
                        at_suffix: Suffix::Wall,
                        delta_seconds: 0,
                        letter: None,
                    },
                ],
            }),
            format: Format::StdDst {
                standard: String::from("PST"),
                dst: String::from("PDT"),
            },
            until_year: crate::constants::MAX_UNTIL_YEAR,
            until_month: 1,
            until_day: 1,
            until_seconds: 0,
            until_suffix: Suffix::Wall,
        }]
    }

    #[test]
    fn spring_gap_civil_lookup_resolves_via_fold() {
        let mut facade = QueryFacade::build(String::from("America/Los_Angeles"), la_eras());
        // 2000-04-02 02:30 local doesn't exist (clocks jump 02:00 -> 03:00).
        let gap = CivilInput {
            year: 2000,
            month: 4,
            day: 2,
            seconds_in_day: 2 * 3600 + 1800,
            fold: 0,
        };
        let info = facade.info_by_civil(gap).unwrap().expect("some offset returned");
        assert_eq!(info.std_offset_s, -8 * 3600);
    }

    #[test]
    fn is_terminal_year_true_for_single_simple_era() {
        let facade = QueryFacade::build(
            String::from("Etc/UTC"),
            alloc::vec![ZoneEra {
                offset_seconds: 0,
                policy: Policy::NoDst,
                format: Format::Literal(String::from("UTC")),
                until_year: crate::constants::MAX_UNTIL_YEAR,
                until_month: 1,
                until_day: 1,
                until_seconds: 0,
                until_suffix: Suffix::Wall,
            }],
        );
        assert!(facade.is_terminal_year(2030));
    }

    #[test]
    fn from_utc_round_trips_a_known_instant() {
        let mut facade = QueryFacade::build(String::from("America/Los_Angeles"), la_eras());
        let unix = 950_000_000_i64; // 2000-02-08T~, well before DST starts
        let epoch_seconds = to_epoch_seconds(unix);
        let civil = facade.from_utc(epoch_seconds).unwrap().expect("resolves");
        assert_eq!(civil.fold, 0);
    }
}
