//! §4.6 Wall-bound / epoch / abbreviation post-pass.
//!
//! Grounded on `zone_processor.py::_generate_start_until_times` and
//! `_calc_abbrev`. Runs once over the whole merged active list for a query
//! window, after [`crate::transition::generate_transitions`] has produced it.

use alloc::string::String;

use crate::calendar::epoch_days_for_civil;
use crate::constants::SECONDS_PER_DAY;
use crate::date_tuple::{DateTuple, Suffix};
use crate::epoch::to_epoch_seconds;
use crate::error::CoreError;
use crate::matching::MatchingEra;
use crate::model::{Format, ZoneEra};
use crate::transition::Transition;

/// Fills in `start`, `until`, `start_epoch_second`, and `abbrev` on every
/// transition in `transitions`, given the zone's full era list and the
/// matching eras produced alongside them (so each transition's `format` can
/// be looked up via its `matching_era` index).
pub fn apply_post_pass(
    transitions: &mut [Transition],
    eras: &[ZoneEra],
    matches: &[MatchingEra],
) -> Result<(), CoreError> {
    for i in 0..transitions.len() {
        let start = if i == 0 {
            transitions[i].transition_time_w.normalize()?
        } else {
            let prev_offset = transitions[i - 1].offset_seconds;
            let prev_delta = transitions[i - 1].delta_seconds;
            let this_offset = transitions[i].offset_seconds;
            let this_delta = transitions[i].delta_seconds;
            let w = transitions[i].transition_time_w;
            let shifted = w.seconds_in_day - prev_offset - prev_delta + this_offset + this_delta;
            transitions[i - 1].until = w;
            DateTuple::new(w.y, w.m, w.d, shifted, Suffix::Wall).normalize()?
        };
        transitions[i].start = start;
        transitions[i].start_epoch_second = epoch_seconds_of(
            start,
            transitions[i].offset_seconds + transitions[i].delta_seconds,
        );

        let era = &eras[matches[transitions[i].matching_era].era_index];
        let letter = transitions[i].rule.as_ref().and_then(|r| r.letter.as_deref());
        transitions[i].abbrev = render_abbrev(&era.format, transitions[i].delta_seconds, letter);
    }

    if let Some(last) = transitions.last_mut() {
        let (w, _s, _u) = last.until.expand(last.offset_seconds, last.delta_seconds)?;
        last.until = w;
    }

    Ok(())
}

fn epoch_seconds_of(wall: DateTuple, total_offset: i32) -> i64 {
    let unix_seconds =
        epoch_days_for_civil(wall.y, wall.m, wall.d) * SECONDS_PER_DAY + wall.seconds_in_day as i64
            - total_offset as i64;
    to_epoch_seconds(unix_seconds)
}

fn render_abbrev(format: &Format, dst_delta: i32, letter: Option<&str>) -> String {
    format.render(dst_delta, letter)
}
