//! `Transition`, the 5-state `MatchStatus`, and the §4.5 transition generator.
//!
//! Grounded on `original_source/src/acetime/transition.py::Transition` (field
//! set; the 5-state `match_status` is the one named authoritative by the §9
//! open question, over the legacy boolean `is_active` in the older
//! `zone_processor.py` variant) and
//! `zone_processor.py::_create_transitions_from_named_match`,
//! `_find_candidate_transitions`, `_compare_transition_to_match[_fuzzy]`,
//! `_add_transition_sorted`, `_select_prior_transition`.

use alloc::vec::Vec;

use crate::calendar::day_of_month;
use crate::constants::INVALID_YEAR;
use crate::date_tuple::DateTuple;
use crate::error::CoreError;
use crate::matching::MatchingEra;
use crate::model::{Policy, ZoneEra, ZoneRule};
use crate::storage::TransitionStorage;

/// A transition's position relative to its enclosing [`MatchingEra`] (§4.5).
/// The 5-state encoding named authoritative by the §9 open question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// The single most recent transition strictly before the era begins.
    Prior,
    /// Coincides exactly with the era's start.
    Exact,
    /// Strictly interior to the era.
    Within,
    /// At or beyond the era's end; not retained.
    FarFuture,
    /// Was a Prior/Exact candidate, displaced by a later one; not retained.
    FarPast,
}

impl MatchStatus {
    /// Whether a transition with this status is retained in the active list
    /// (§4.5 pass 4).
    fn is_active(self) -> bool {
        matches!(self, MatchStatus::Prior | MatchStatus::Exact | MatchStatus::Within)
    }
}

/// A potential or confirmed change in UTC offset or DST delta.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Index into the `Vec<MatchingEra>` this transition belongs to.
    pub matching_era: usize,
    /// Raw transition instant, in its originating suffix (rule's `at_suffix`
    /// for named eras, `Suffix::Wall` for a simple era's anchor).
    pub transition_time: DateTuple,
    pub transition_time_w: DateTuple,
    pub transition_time_s: DateTuple,
    pub transition_time_u: DateTuple,
    /// Preserves the unclamped transition time when a prior transition's
    /// `transition_time` is clamped to the era's start (pass 3).
    pub original_transition_time: DateTuple,
    pub start: DateTuple,
    pub until: DateTuple,
    pub start_epoch_second: i64,
    pub abbrev: alloc::string::String,
    pub rule: Option<ZoneRule>,
    pub match_status: MatchStatus,
    pub offset_seconds: i32,
    pub delta_seconds: i32,
}

impl Transition {
    fn placeholder(matching_era: usize, offset_seconds: i32, delta_seconds: i32) -> Self {
        Transition {
            matching_era,
            transition_time: DateTuple::MIN,
            transition_time_w: DateTuple::MIN,
            transition_time_s: DateTuple::MIN,
            transition_time_u: DateTuple::MIN,
            original_transition_time: DateTuple::MIN,
            start: DateTuple::MIN,
            until: DateTuple::MIN,
            start_epoch_second: 0,
            abbrev: alloc::string::String::new(),
            rule: None,
            match_status: MatchStatus::FarFuture,
            offset_seconds,
            delta_seconds,
        }
    }
}

/// Runs §4.5 for every [`MatchingEra`] in `matches`, appending active
/// transitions to a single combined list in era order and back-filling
/// `matches[i].last_transition`. `eras` is the zone's full era list (matching
/// eras reference it by `era_index`).
pub fn generate_transitions(
    eras: &[ZoneEra],
    matches: &mut [MatchingEra],
    storage: &mut TransitionStorage,
) -> Result<Vec<Transition>, CoreError> {
    let mut active = Vec::new();
    for i in 0..matches.len() {
        let era = &eras[matches[i].era_index];
        let last = match &era.policy {
            Policy::Named(policy) => {
                let mut candidates = build_candidates(era, &policy.rules, &matches[i], storage)?;
                expand_suffixes(&mut candidates, era)?;
                classify_boundaries(&mut candidates, &matches[i])?;
                candidates.retain(|t| t.match_status.is_active());
                // Defaults to the era's own end; overwritten for every
                // transition but the window's last one once postpass walks
                // the merged list and rewrites `prev.until`.
                for t in &mut candidates {
                    t.until = matches[i].until;
                }
                let last_index = active.len() + candidates.len() - 1;
                active.extend(candidates);
                last_index
            }
            Policy::NoDst | Policy::FixedDelta(_) => {
                let mut t = Transition::placeholder(i, era.offset_seconds, era.era_delta_seconds());
                t.transition_time = matches[i].start;
                let (w, s, u) = matches[i].start.expand(era.offset_seconds, era.era_delta_seconds())?;
                t.transition_time_w = w;
                t.transition_time_s = s;
                t.transition_time_u = u;
                t.until = matches[i].until;
                t.match_status = MatchStatus::Exact;
                active.push(t);
                active.len() - 1
            }
        };
        matches[i].last_transition = Some(last);
    }
    Ok(active)
}

/// Pass 1: candidate expansion with the fuzzy, month-granularity filter.
fn build_candidates(
    era: &ZoneEra,
    rules: &[ZoneRule],
    m: &MatchingEra,
    storage: &mut TransitionStorage,
) -> Result<Vec<Transition>, CoreError> {
    let start_y = m.start.y;
    let mut end_y = m.until.y;
    if m.until.m == 1 && m.until.d == 1 && m.until.seconds_in_day == 0 {
        end_y -= 1;
    }

    let start_code = 12i64 * m.start.y as i64 + m.start.m as i64;
    let until_code = 12i64 * m.until.y as i64 + m.until.m as i64;

    storage.push(1); // reserve the "most recent prior" slot
    let mut prior: Option<Transition> = None;
    let mut candidates: Vec<Transition> = Vec::new();

    for rule in rules {
        let lo = start_y.max(rule.from_year);
        let hi = end_y.min(rule.to_year);
        let mut year = lo;
        while year <= hi {
            storage.push(1); // free agent under examination
            let t = build_transition_for_year(era, rule, year);
            let code = 12i64 * t.transition_time.y as i64 + t.transition_time.m as i64;
            if code < start_code - 1 {
                prior = select_prior(prior, t);
                storage.pop(1);
            } else if code >= until_code + 2 {
                storage.pop(1);
            } else {
                insertion_sort_insert(&mut candidates, t);
            }
            year += 1;
        }

        if rule.from_year < start_y {
            let mr_year = (rule.to_year).min(start_y - 1);
            if mr_year != INVALID_YEAR {
                storage.push(1);
                let t = build_transition_for_year(era, rule, mr_year);
                prior = select_prior(prior, t);
                storage.pop(1);
            }
        }
    }

    if let Some(p) = prior {
        insertion_sort_insert(&mut candidates, p);
    } else {
        storage.pop(1); // release the unused reserved slot
    }

    Ok(candidates)
}

fn build_transition_for_year(era: &ZoneEra, rule: &ZoneRule, year: i32) -> Transition {
    let (m, d) = day_of_month(year, rule.in_month, rule.on_day_of_week, rule.on_day_of_month);
    let (year, month) = roll_year_month(year, m);
    let mut t = Transition::placeholder(usize::MAX, era.offset_seconds, rule.delta_seconds);
    t.transition_time = DateTuple::new(year, month, d, rule.at_seconds, rule.at_suffix);
    t.rule = Some(rule.clone());
    t
}

fn roll_year_month(year: i32, month: i8) -> (i32, u8) {
    if month == 0 {
        (year - 1, 12)
    } else if month == 13 {
        (year + 1, 1)
    } else {
        (year, month as u8)
    }
}

/// Keeps the later (by raw `transition_time`) of two prior candidates.
fn select_prior(current: Option<Transition>, candidate: Transition) -> Option<Transition> {
    match current {
        None => Some(candidate),
        Some(c) => {
            if candidate.transition_time > c.transition_time {
                Some(candidate)
            } else {
                Some(c)
            }
        }
    }
}

/// Insertion sort by raw `transition_time` (§9: retained deliberately, not
/// replaced with a library sort, to keep push/pop accounting — and here,
/// insertion order — deterministic).
fn insertion_sort_insert(list: &mut Vec<Transition>, t: Transition) {
    let pos = list
        .iter()
        .position(|existing| existing.transition_time > t.transition_time)
        .unwrap_or(list.len());
    list.insert(pos, t);
}

/// Pass 2: suffix expansion, using the *previous* candidate's offset/delta
/// (itself for the first element).
fn expand_suffixes(candidates: &mut [Transition], _era: &ZoneEra) -> Result<(), CoreError> {
    let mut prev_offset = None;
    for i in 0..candidates.len() {
        let (offset, delta) = prev_offset.unwrap_or((candidates[i].offset_seconds, candidates[i].delta_seconds));
        let (w, s, u) = candidates[i].transition_time.expand(offset, delta)?;
        candidates[i].transition_time_w = w;
        candidates[i].transition_time_s = s;
        candidates[i].transition_time_u = u;
        prev_offset = Some((candidates[i].offset_seconds, candidates[i].delta_seconds));
    }
    if !is_sorted_by_raw_time(candidates) {
        return Err(CoreError::CorruptSort);
    }
    Ok(())
}

fn is_sorted_by_raw_time(candidates: &[Transition]) -> bool {
    candidates
        .windows(2)
        .all(|w| w[0].transition_time <= w[1].transition_time)
}

/// The transition's own expanded time in the same suffix as `suffix`, so it
/// can be compared directly against a `MatchingEra` boundary carrying that
/// suffix — no re-expansion of the boundary itself is ever needed.
fn transition_time_for_suffix(t: &Transition, suffix: crate::date_tuple::Suffix) -> DateTuple {
    match suffix {
        crate::date_tuple::Suffix::Wall => t.transition_time_w,
        crate::date_tuple::Suffix::Standard => t.transition_time_s,
        crate::date_tuple::Suffix::Utc => t.transition_time_u,
    }
}

/// Pass 3: boundary classification against `m`'s start/until, following
/// `_compare_transition_to_match` exactly: pick the one pre-expanded
/// transition-time form matching the boundary's own suffix and compare
/// directly, rather than re-expanding the boundary under a guessed delta.
fn classify_boundaries(candidates: &mut [Transition], m: &MatchingEra) -> Result<(), CoreError> {
    let mut prior_index: Option<usize> = None;

    for i in 0..candidates.len() {
        let start_form = transition_time_for_suffix(&candidates[i], m.start.suffix);

        if start_form < m.start {
            if let Some(p) = prior_index {
                if candidates[i].transition_time > candidates[p].transition_time {
                    candidates[p].match_status = MatchStatus::FarPast;
                    candidates[i].match_status = MatchStatus::Prior;
                    prior_index = Some(i);
                } else {
                    candidates[i].match_status = MatchStatus::FarPast;
                }
            } else {
                candidates[i].match_status = MatchStatus::Prior;
                prior_index = Some(i);
            }
            continue;
        }

        if start_form == m.start {
            if let Some(p) = prior_index {
                candidates[p].match_status = MatchStatus::FarPast;
            }
            candidates[i].match_status = MatchStatus::Exact;
            prior_index = Some(i);
            continue;
        }

        let until_form = transition_time_for_suffix(&candidates[i], m.until.suffix);
        if m.until <= until_form {
            candidates[i].match_status = MatchStatus::FarFuture;
        } else {
            candidates[i].match_status = MatchStatus::Within;
        }
    }

    if let Some(p) = prior_index {
        if candidates[p].transition_time < m.start {
            candidates[p].original_transition_time = candidates[p].transition_time;
            candidates[p].transition_time = m.start;
        }
    }

    Ok(())
}
