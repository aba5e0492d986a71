//! §3 data model: the immutable, provided zone tables.
//!
//! Field sets are grounded on `original_source/zone_info_types.py`
//! (`ZoneRule`, `ZonePolicy`, `ZoneEra`, `ZoneInfo` `TypedDict`s). The §9
//! design note calls for replacing the source's sentinel-string-vs-object
//! punning on `ZoneEra.policy` (`'-'`/`':'`/`ZonePolicy`) with a tagged
//! union; `zoneinfo_rs::types::zone::RuleIdentifier` and
//! `AbbreviationFormat` are the teacher's own examples of that idiom, so
//! `Policy` and `Format` below follow the same three/four-variant shape.

use alloc::string::String;
use alloc::vec::Vec;

use crate::date_tuple::Suffix;

/// A single recurrence rule within a [`ZonePolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRule {
    pub from_year: i32,
    pub to_year: i32,
    pub in_month: u8,
    /// 0 means "exact day" (see [`crate::calendar::day_of_month`]); 1..=7 is
    /// an ISO weekday (Monday = 1 .. Sunday = 7).
    pub on_day_of_week: u8,
    /// Negative means "on or before `|on_day_of_month|`"; with
    /// `on_day_of_week != 0` a value of `0` means "last such weekday".
    pub on_day_of_month: i8,
    pub at_seconds: i32,
    pub at_suffix: Suffix,
    pub delta_seconds: i32,
    /// The DST letter substituted into `"%s"` format templates (§4.6);
    /// `None` is the source's `"-"` sentinel (substitutes as empty).
    pub letter: Option<String>,
}

/// A named, ordered set of [`ZoneRule`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonePolicy {
    pub name: String,
    pub rules: Vec<ZoneRule>,
}

/// How a [`ZoneEra`] determines its DST delta.
///
/// Replaces the source's `zone_policy ∈ {'-', ':', ZonePolicy}` sentinel
/// punning (§9) with a tagged union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    /// Source's `'-'`: no DST ever applies in this era.
    NoDst,
    /// Source's `':'`: a fixed DST delta with no named rule policy.
    FixedDelta(i32),
    /// Source's `ZonePolicy` object: look up transitions via this policy.
    Named(ZonePolicy),
}

/// How a [`ZoneEra`]'s abbreviation `FORMAT` template is rendered (§4.6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    /// No placeholder; used literally.
    Literal(String),
    /// `"STD/DST"`; `Format::render` picks a side by whether `delta == 0`.
    StdDst { standard: String, dst: String },
    /// Contains `"%s"`, substituted with the active rule's `letter`.
    Templated(String),
}

impl Format {
    /// Renders this format given the transition's current DST delta and
    /// (if named) rule letter. `letter = "-"` renders as empty, matching
    /// `zone_processor.py::_calc_abbrev`.
    pub fn render(&self, dst_delta: i32, letter: Option<&str>) -> String {
        match self {
            Format::Literal(s) => s.clone(),
            Format::StdDst { standard, dst } => {
                if dst_delta == 0 {
                    standard.clone()
                } else {
                    dst.clone()
                }
            }
            Format::Templated(template) => {
                let letter = match letter {
                    Some("-") | None => "",
                    Some(l) => l,
                };
                template.replace("%s", letter)
            }
        }
    }
}

/// A half-open interval `[prev_until, this.until)` during which a zone has a
/// constant standard offset and one recurrence policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneEra {
    pub offset_seconds: i32,
    pub policy: Policy,
    pub format: Format,
    pub until_year: i32,
    pub until_month: u8,
    pub until_day: u8,
    pub until_seconds: i32,
    pub until_suffix: Suffix,
}

impl ZoneEra {
    /// The DST delta contributed directly by this era (used when
    /// `policy ∈ {NoDst, FixedDelta}`; ignored for `Named`, where each
    /// active [`ZoneRule`] supplies its own `delta_seconds`).
    pub fn era_delta_seconds(&self) -> i32 {
        match &self.policy {
            Policy::NoDst => 0,
            Policy::FixedDelta(d) => *d,
            Policy::Named(_) => 0,
        }
    }
}

/// Either a zone's own era list, or a link to another zone's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneInfoKind {
    Zone(Vec<ZoneEra>),
    Link { target: String },
}

/// A named, immutable zone definition (§3). Links retain their own `name`
/// but delegate era lookups to their resolved target — see
/// [`crate::registry::ZoneRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneInfo {
    pub name: String,
    pub kind: ZoneInfoKind,
}

impl ZoneInfo {
    pub fn zone(name: impl Into<String>, eras: Vec<ZoneEra>) -> Self {
        Self {
            name: name.into(),
            kind: ZoneInfoKind::Zone(eras),
        }
    }

    pub fn link(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ZoneInfoKind::Link {
                target: target.into(),
            },
        }
    }
}
