use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A whole results document, one field per top-level section.
///
/// Example YAML:
/// ```yaml
/// Tournament:
///   name: Princeton Invitational
///   location: Princeton University
///   level: Invitational
///   state: NJ
///   division: C
///   year: 2020
///   date: 2020-02-01
///   worst placings dropped: 1
/// Events:
///   - name: Anatomy and Physiology
/// Teams:
///   - number: 1
///     school: Solon High School
///     city: Solon
///     state: OH
/// Placings:
///   - event: Anatomy and Physiology
///     team: 1
///     place: 1
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Rep {
    #[serde(rename = "Tournament")]
    pub tournament: TournamentRecord,

    #[serde(rename = "Events")]
    pub events: Vec<EventRecord>,

    #[serde(rename = "Teams")]
    pub teams: Vec<TeamRecord>,

    #[serde(rename = "Placings")]
    pub placings: Vec<PlacingRecord>,

    #[serde(rename = "Penalties", default)]
    pub penalties: Vec<PenaltyRecord>,

    #[serde(rename = "Subdivisions", default)]
    pub subdivisions: Vec<SubdivisionRecord>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum Level {
    Invitational,
    Regionals,
    States,
    Nationals,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum Division {
    A,
    B,
    C,
}

/// The `Tournament` section.
///
/// Every scoring knob is optional; the interpreter supplies the defaults.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TournamentRecord {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "short name", default)]
    pub short_name: Option<String>,

    pub location: String,

    pub level: Level,

    #[serde(default)]
    pub state: Option<String>,

    pub division: Division,

    pub year: u16,

    pub date: NaiveDate,

    /// Explicit medal count; derived from team count when absent
    #[serde(default)]
    pub medals: Option<u32>,

    /// Explicit trophy count; derived from team count when absent
    #[serde(default)]
    pub trophies: Option<u32>,

    #[serde(default)]
    pub bids: Option<u32>,

    #[serde(rename = "per-team bids", default)]
    pub per_team_bids: Option<bool>,

    #[serde(rename = "worst placings dropped", default)]
    pub worst_placings_dropped: Option<u32>,

    #[serde(rename = "exempt placings", default)]
    pub exempt_placings: Option<u32>,

    /// Scoring ceiling override; non-exhibition team count when absent
    #[serde(rename = "maximum place", default)]
    pub maximum_place: Option<u32>,

    #[serde(rename = "per-event n", default)]
    pub per_event_n: Option<bool>,

    /// Carried through as-is; placing points do not use it
    #[serde(rename = "n offset", default)]
    pub n_offset: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EventRecord {
    pub name: String,

    #[serde(default)]
    pub trial: bool,

    /// Event was replaced by a trial event and no longer counts
    #[serde(default)]
    pub trialed: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TeamRecord {
    pub number: u32,

    pub school: String,

    #[serde(rename = "school abbreviation", default)]
    pub school_abbreviation: Option<String>,

    #[serde(default)]
    pub suffix: Option<String>,

    #[serde(default)]
    pub subdivision: Option<String>,

    #[serde(default)]
    pub exhibition: bool,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state: Option<String>,
}

/// One team's result in one event, still keyed by event name and team number.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PlacingRecord {
    pub event: String,

    pub team: u32,

    #[serde(default)]
    pub place: Option<u32>,

    /// Absent means the team participated
    #[serde(default)]
    pub participated: Option<bool>,

    #[serde(default)]
    pub disqualified: bool,

    #[serde(default)]
    pub exempt: bool,

    #[serde(default)]
    pub unknown: bool,

    #[serde(default)]
    pub tie: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PenaltyRecord {
    pub team: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SubdivisionRecord {
    pub name: String,

    #[serde(default)]
    pub medals: Option<u32>,

    #[serde(default)]
    pub trophies: Option<u32>,

    #[serde(rename = "maximum place", default)]
    pub maximum_place: Option<u32>,
}
