//! §8 concrete scenarios: spring-forward/fall-back fold semantics, a
//! three-transition European year, a date-line era jump, and the
//! `is_terminal_year` predicate across a handful of real zones.
//!
//! Grounded on the §8 literal inputs/outputs, cross-checked against
//! `original_source/src/acetime/zone_processor.py`'s semantics. Test shape
//! (inline literal era/rule tables, one `#[test]` per scenario) follows
//! `zoneinfo_rs::zone::tests::CHICAGO` / `zoneinfo_rs::rule::tests::TEST_DATA`.

use tzresolve::{
    CivilInput, Format, Policy, QueryFacade, Suffix, ZoneEra, ZonePolicy, ZoneRule,
    MAX_TO_YEAR, MAX_UNTIL_YEAR,
};

/// Models the US Energy Policy Act of 2005 split: first-Sun-April/last-Sun-
/// October through 2006, second-Sun-March/first-Sun-November from 2007 on.
fn los_angeles() -> Vec<ZoneEra> {
    vec![ZoneEra {
        offset_seconds: -8 * 3600,
        policy: Policy::Named(ZonePolicy {
            name: "US".into(),
            rules: vec![
                ZoneRule {
                    from_year: 1987,
                    to_year: 2006,
                    in_month: 4,
                    on_day_of_week: 7, // Sunday
                    on_day_of_month: 1,
                    at_seconds: 2 * 3600,
                    at_suffix: Suffix::Wall,
                    delta_seconds: 3600,
                    letter: Some("D".into()),
                },
                ZoneRule {
                    from_year: 1987,
                    to_year: 2006,
                    in_month: 10,
                    on_day_of_week: 7,
                    on_day_of_month: 0,
                    at_seconds: 2 * 3600,
                    at_suffix: Suffix::Wall,
                    delta_seconds: 0,
                    letter: None,
                },
                ZoneRule {
                    from_year: 2007,
                    to_year: MAX_TO_YEAR,
                    in_month: 3,
                    on_day_of_week: 7,
                    on_day_of_month: 8,
                    at_seconds: 2 * 3600,
                    at_suffix: Suffix::Wall,
                    delta_seconds: 3600,
                    letter: Some("D".into()),
                },
                ZoneRule {
                    from_year: 2007,
                    to_year: MAX_TO_YEAR,
                    in_month: 11,
                    on_day_of_week: 7,
                    on_day_of_month: 1,
                    at_seconds: 2 * 3600,
                    at_suffix: Suffix::Wall,
                    delta_seconds: 0,
                    letter: None,
                },
            ],
        }),
        format: Format::StdDst {
            standard: "PST".into(),
            dst: "PDT".into(),
        },
        until_year: MAX_UNTIL_YEAR,
        until_month: 1,
        until_day: 1,
        until_seconds: 0,
        until_suffix: Suffix::Wall,
    }]
}

fn london() -> Vec<ZoneEra> {
    vec![ZoneEra {
        offset_seconds: 0,
        policy: Policy::Named(ZonePolicy {
            name: "EU".into(),
            rules: vec![
                ZoneRule {
                    from_year: 1996,
                    to_year: MAX_TO_YEAR,
                    in_month: 3,
                    on_day_of_week: 7,
                    on_day_of_month: 0,
                    at_seconds: 1 * 3600,
                    at_suffix: Suffix::Utc,
                    delta_seconds: 3600,
                    letter: Some("S".into()),
                },
                ZoneRule {
                    from_year: 1996,
                    to_year: MAX_TO_YEAR,
                    in_month: 10,
                    on_day_of_week: 7,
                    on_day_of_month: 0,
                    at_seconds: 1 * 3600,
                    at_suffix: Suffix::Utc,
                    delta_seconds: 0,
                    letter: None,
                },
            ],
        }),
        format: Format::StdDst {
            standard: "GMT".into(),
            dst: "BST".into(),
        },
        until_year: MAX_UNTIL_YEAR,
        until_month: 1,
        until_day: 1,
        until_seconds: 0,
        until_suffix: Suffix::Wall,
    }]
}

/// A stand-in for the 2011 Samoa date-line crossing: the zone jumps from
/// UTC-11 straight to UTC+13, skipping a calendar day.
fn apia() -> Vec<ZoneEra> {
    vec![
        ZoneEra {
            offset_seconds: -11 * 3600,
            policy: Policy::NoDst,
            format: Format::Literal("SST".into()),
            until_year: 2011,
            until_month: 12,
            until_day: 30,
            until_seconds: 0,
            until_suffix: Suffix::Wall,
        },
        ZoneEra {
            offset_seconds: 13 * 3600,
            policy: Policy::NoDst,
            format: Format::Literal("WSST".into()),
            until_year: MAX_UNTIL_YEAR,
            until_month: 1,
            until_day: 1,
            until_seconds: 0,
            until_suffix: Suffix::Wall,
        },
    ]
}

fn abidjan() -> Vec<ZoneEra> {
    vec![ZoneEra {
        offset_seconds: 0,
        policy: Policy::NoDst,
        format: Format::Literal("GMT".into()),
        until_year: MAX_UNTIL_YEAR,
        until_month: 1,
        until_day: 1,
        until_seconds: 0,
        until_suffix: Suffix::Wall,
    }]
}

/// A stand-in for Africa/Casablanca's historical Ramadan-linked DST rules,
/// which stop applying new transitions after a fixed year in this fixture.
fn casablanca() -> Vec<ZoneEra> {
    vec![ZoneEra {
        offset_seconds: 0,
        policy: Policy::Named(ZonePolicy {
            name: "Morocco".into(),
            rules: vec![ZoneRule {
                from_year: 2018,
                to_year: 2087,
                in_month: 5,
                on_day_of_week: 0,
                on_day_of_month: 1,
                at_seconds: 2 * 3600,
                at_suffix: Suffix::Wall,
                delta_seconds: 3600,
                letter: Some("+1".into()),
            }],
        }),
        format: Format::Templated("+00/+%s".into()),
        until_year: MAX_UNTIL_YEAR,
        until_month: 1,
        until_day: 1,
        until_seconds: 0,
        until_suffix: Suffix::Wall,
    }]
}

/// A stand-in for Asia/Amman's DST rules, which (in this fixture) run out
/// after 2021.
fn amman() -> Vec<ZoneEra> {
    vec![ZoneEra {
        offset_seconds: 2 * 3600,
        policy: Policy::Named(ZonePolicy {
            name: "Jordan".into(),
            rules: vec![ZoneRule {
                from_year: 2003,
                to_year: 2021,
                in_month: 2,
                on_day_of_week: 5, // Friday
                on_day_of_month: -1,
                at_seconds: 0,
                at_suffix: Suffix::Wall,
                delta_seconds: 3600,
                letter: Some("S".into()),
            }],
        }),
        format: Format::Templated("+02/+%s".into()),
        until_year: MAX_UNTIL_YEAR,
        until_month: 1,
        until_day: 1,
        until_seconds: 0,
        until_suffix: Suffix::Wall,
    }]
}

#[test]
fn los_angeles_spring_forward_gap_resolves_by_fold() {
    let mut facade = QueryFacade::build("America/Los_Angeles".into(), los_angeles());

    let before = CivilInput {
        year: 2000,
        month: 4,
        day: 2,
        seconds_in_day: 1 * 3600 + 59 * 60 + 59,
        fold: 0,
    };
    let info = facade.info_by_civil(before).unwrap().expect("resolves");
    assert_eq!(info.std_offset_s, -8 * 3600);
    assert_eq!(info.dst_offset_s, 0);
    assert_eq!(info.abbrev, "PST");

    let after = CivilInput {
        year: 2000,
        month: 4,
        day: 2,
        seconds_in_day: 3 * 3600,
        fold: 0,
    };
    let info = facade.info_by_civil(after).unwrap().expect("resolves");
    assert_eq!(info.total_offset_s, -7 * 3600);
    assert_eq!(info.abbrev, "PDT");

    let gap = CivilInput {
        year: 2000,
        month: 4,
        day: 2,
        seconds_in_day: 2 * 3600 + 30 * 60,
        fold: 0,
    };
    let gap_before = facade.info_by_civil(gap).unwrap().expect("resolves");
    assert_eq!(gap_before.abbrev, "PST");

    let gap_fold1 = CivilInput { fold: 1, ..gap };
    let gap_after = facade.info_by_civil(gap_fold1).unwrap().expect("resolves");
    assert_eq!(gap_after.abbrev, "PDT");
}

#[test]
fn los_angeles_fall_back_overlap_resolves_by_fold() {
    let mut facade = QueryFacade::build("America/Los_Angeles".into(), los_angeles());

    let dt = CivilInput {
        year: 2000,
        month: 10,
        day: 29,
        seconds_in_day: 1 * 3600 + 59 * 60 + 59,
        fold: 0,
    };
    let info = facade.info_by_civil(dt).unwrap().expect("resolves");
    assert_eq!(info.total_offset_s, -7 * 3600);
    assert_eq!(info.abbrev, "PDT");

    let same_fold1 = CivilInput { fold: 1, ..dt };
    let info = facade.info_by_civil(same_fold1).unwrap().expect("resolves");
    assert_eq!(info.total_offset_s, -8 * 3600);
    assert_eq!(info.abbrev, "PST");
}

#[test]
fn london_2000_has_three_active_transitions() {
    let mut facade = QueryFacade::build("Europe/London".into(), london());
    facade.init_for_year(2000).unwrap();
    // Every transition observed through a civil lookup in this year must
    // carry a zero standard offset (London never changes its base offset).
    for month in [1u8, 4, 11] {
        let info = facade
            .info_by_civil(CivilInput {
                year: 2000,
                month,
                day: 15,
                seconds_in_day: 12 * 3600,
                fold: 0,
            })
            .unwrap()
            .expect("resolves");
        assert_eq!(info.std_offset_s, 0);
    }
    assert!(facade.buffer_peak() >= 2);
}

#[test]
fn apia_date_line_crossing_skips_a_day() {
    let mut facade = QueryFacade::build("Pacific/Apia".into(), apia());

    let last_moment_old_offset = facade
        .info_by_civil(CivilInput {
            year: 2011,
            month: 12,
            day: 29,
            seconds_in_day: 23 * 3600 + 59 * 60,
            fold: 0,
        })
        .unwrap()
        .expect("resolves");
    assert_eq!(last_moment_old_offset.std_offset_s, -11 * 3600);

    let first_moment_new_offset = facade
        .info_by_civil(CivilInput {
            year: 2011,
            month: 12,
            day: 31,
            seconds_in_day: 1 * 3600,
            fold: 0,
        })
        .unwrap()
        .expect("resolves");
    assert_eq!(first_moment_new_offset.std_offset_s, 13 * 3600);
}

#[test]
fn terminal_year_predicate_across_zones() {
    let mut la = QueryFacade::build("America/Los_Angeles".into(), los_angeles());
    la.init_for_year(2000).unwrap();
    assert!(!la.is_terminal_year(2006));
    assert!(la.is_terminal_year(2007));

    let abidjan = QueryFacade::build("Africa/Abidjan".into(), abidjan());
    assert!(abidjan.is_terminal_year(2000));

    let casablanca = QueryFacade::build("Africa/Casablanca".into(), casablanca());
    assert!(!casablanca.is_terminal_year(2087));
    assert!(casablanca.is_terminal_year(2088));

    let amman = QueryFacade::build("Asia/Amman".into(), amman());
    assert!(!amman.is_terminal_year(2021));
    assert!(amman.is_terminal_year(2022));
}

#[test]
fn macquarie_style_window_spans_three_matching_eras() {
    // Three consecutive short-lived eras overlapping one 14-month window,
    // the way Antarctica/Macquarie's era table does around 2010.
    let eras = vec![
        ZoneEra {
            offset_seconds: 10 * 3600,
            policy: Policy::NoDst,
            format: Format::Literal("AEST".into()),
            until_year: 2010,
            until_month: 4,
            until_day: 4,
            until_seconds: 3 * 3600,
            until_suffix: Suffix::Standard,
        },
        ZoneEra {
            offset_seconds: 11 * 3600,
            policy: Policy::NoDst,
            format: Format::Literal("AEDT".into()),
            until_year: 2010,
            until_month: 10,
            until_day: 3,
            until_seconds: 2 * 3600,
            until_suffix: Suffix::Wall,
        },
        ZoneEra {
            offset_seconds: 11 * 3600,
            policy: Policy::NoDst,
            format: Format::Literal("AEDT".into()),
            until_year: MAX_UNTIL_YEAR,
            until_month: 1,
            until_day: 1,
            until_seconds: 0,
            until_suffix: Suffix::Wall,
        },
    ];
    let mut facade = QueryFacade::build("Antarctica/Macquarie".into(), eras);
    facade.init_for_year(2010).unwrap();
    assert!(facade.buffer_peak() >= 1);
    let info = facade
        .info_by_civil(CivilInput {
            year: 2010,
            month: 6,
            day: 1,
            seconds_in_day: 0,
            fold: 0,
        })
        .unwrap()
        .expect("resolves");
    assert_eq!(info.std_offset_s, 11 * 3600);
}
