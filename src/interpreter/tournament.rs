use chrono::NaiveDate;
use std::cell::OnceCell;
use std::collections::HashSet;

use super::{Event, Interpreter, Penalty, Placing, Subdivision, Team};
use crate::rep::{Division, Level, TournamentRecord};

/// Fewest medals or trophies awarded when the count is derived
const MINIMUM_AWARDS: u32 = 3;

/// Teams per medal when the medal count is derived
const TEAMS_PER_MEDAL: u32 = 10;

/// Teams per trophy when the trophy count is derived
const TEAMS_PER_TROPHY: u32 = 6;

pub(super) struct TournamentData {
    record: TournamentRecord,
    nonexhibition_teams_count: OnceCell<u32>,
    ties: OnceCell<bool>,
    ties_outside_of_maximum_places: OnceCell<bool>,
    ranking: OnceCell<Vec<usize>>,
}

impl TournamentData {
    pub(super) fn new(record: TournamentRecord) -> Self {
        Self {
            record,
            nonexhibition_teams_count: OnceCell::new(),
            ties: OnceCell::new(),
            ties_outside_of_maximum_places: OnceCell::new(),
            ranking: OnceCell::new(),
        }
    }
}

/// Tournament-wide settings and aggregates.
#[derive(Clone, Copy)]
pub struct Tournament<'a> {
    interpreter: &'a Interpreter,
}

impl<'a> Tournament<'a> {
    pub(super) fn new(interpreter: &'a Interpreter) -> Self {
        Self { interpreter }
    }

    fn data(&self) -> &'a TournamentData {
        &self.interpreter.tournament
    }

    pub fn record(&self) -> &'a TournamentRecord {
        &self.data().record
    }

    pub fn name(&self) -> Option<&'a str> {
        self.record().name.as_deref()
    }

    pub fn short_name(&self) -> Option<&'a str> {
        self.record().short_name.as_deref()
    }

    pub fn location(&self) -> &'a str {
        &self.record().location
    }

    pub fn level(&self) -> Level {
        self.record().level
    }

    pub fn state(&self) -> Option<&'a str> {
        self.record().state.as_deref()
    }

    pub fn division(&self) -> Division {
        self.record().division
    }

    pub fn year(&self) -> u16 {
        self.record().year
    }

    pub fn date(&self) -> NaiveDate {
        self.record().date
    }

    pub fn events(&self) -> impl Iterator<Item = Event<'a>> + 'a {
        self.interpreter.events()
    }

    pub fn teams(&self) -> impl Iterator<Item = Team<'a>> + 'a {
        self.interpreter.teams()
    }

    pub fn placings(&self) -> impl Iterator<Item = Placing<'a>> + 'a {
        self.interpreter.placings()
    }

    pub fn penalties(&self) -> impl Iterator<Item = Penalty<'a>> + 'a {
        self.interpreter.penalties()
    }

    pub fn subdivisions(&self) -> impl Iterator<Item = Subdivision<'a>> + 'a {
        self.interpreter.subdivisions()
    }

    /// Number of medals per event: explicit, or one per ten teams (at
    /// least three) capped at the maximum place
    pub fn medals(&self) -> u32 {
        self.record().medals.unwrap_or_else(|| {
            let derived = self
                .nonexhibition_teams_count()
                .div_ceil(TEAMS_PER_MEDAL)
                .max(MINIMUM_AWARDS);
            derived.min(self.maximum_place())
        })
    }

    /// Number of team trophies: explicit, or one per six teams (at least
    /// three) capped at the team count
    pub fn trophies(&self) -> u32 {
        self.record().trophies.unwrap_or_else(|| {
            let count = self.nonexhibition_teams_count();
            count
                .div_ceil(TEAMS_PER_TROPHY)
                .max(MINIMUM_AWARDS)
                .min(count)
        })
    }

    pub fn bids(&self) -> u32 {
        self.record().bids.unwrap_or(0)
    }

    pub fn per_team_bids(&self) -> bool {
        self.record().per_team_bids.unwrap_or(false)
    }

    pub fn worst_placings_dropped(&self) -> u32 {
        self.record().worst_placings_dropped.unwrap_or(0)
    }

    pub fn has_dropped_placings(&self) -> bool {
        self.worst_placings_dropped() > 0
    }

    pub fn exempt_placings(&self) -> u32 {
        self.record().exempt_placings.unwrap_or(0)
    }

    pub fn has_exempt_placings(&self) -> bool {
        self.exempt_placings() > 0
    }

    /// Scoring ceiling shared by every non-trial event
    pub fn maximum_place(&self) -> u32 {
        self.record()
            .maximum_place
            .unwrap_or_else(|| self.nonexhibition_teams_count())
    }

    /// True when the ceiling differs from the non-exhibition team count
    pub fn custom_maximum_place(&self) -> bool {
        self.maximum_place() != self.nonexhibition_teams_count()
    }

    pub fn per_event_n(&self) -> bool {
        self.record().per_event_n.unwrap_or(false)
    }

    pub fn n_offset(&self) -> i32 {
        self.record().n_offset.unwrap_or(0)
    }

    /// True if any placing is marked as tied
    pub fn ties(&self) -> bool {
        *self
            .data()
            .ties
            .get_or_init(|| self.placings().any(|p| p.tie()))
    }

    /// True if any tied placing still earns uncapped points
    pub fn ties_outside_of_maximum_places(&self) -> bool {
        *self.data().ties_outside_of_maximum_places.get_or_init(|| {
            self.placings()
                .any(|p| p.tie() && !p.points_limited_by_maximum_place())
        })
    }

    pub fn has_subdivisions(&self) -> bool {
        !self.interpreter.subdivisions.is_empty()
    }

    pub fn nonexhibition_teams_count(&self) -> u32 {
        *self.data().nonexhibition_teams_count.get_or_init(|| {
            self.interpreter
                .teams
                .iter()
                .filter(|t| !t.record.exhibition)
                .count() as u32
        })
    }

    /// Non-exhibition teams from best to worst.
    ///
    /// Lower total points rank higher. Equal totals are broken by the
    /// sorted list of counted placing points (more first places wins, then
    /// more second places, and so on), then by team number.
    pub fn teams_by_rank(&self) -> Vec<Team<'a>> {
        let interpreter = self.interpreter;
        self.data()
            .ranking
            .get_or_init(|| {
                let mut ranked: Vec<Team<'a>> =
                    interpreter.teams().filter(|t| !t.exhibition()).collect();
                ranked.sort_by_cached_key(|t| (t.points(), t.tiebreak_points(), t.number()));
                ranked.iter().map(|t| t.id()).collect()
            })
            .iter()
            .map(|&id| Team::new(interpreter, id))
            .collect()
    }

    /// First team of each distinct (school, city, state), taking ranked
    /// teams in rank order and then exhibition teams by number
    pub fn top_teams_per_school(&self) -> Vec<Team<'a>> {
        let mut exhibition: Vec<Team<'a>> = self.teams().filter(|t| t.exhibition()).collect();
        exhibition.sort_by_key(|t| t.number());

        let mut seen = HashSet::new();
        self.teams_by_rank()
            .into_iter()
            .chain(exhibition)
            .filter(|t| seen.insert((t.school(), t.city(), t.state())))
            .collect()
    }
}
