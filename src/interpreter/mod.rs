//! Linked, read-only view of one tournament's results.
//!
//! [`Interpreter::new`] takes a parsed [`Rep`], resolves every textual
//! reference (event name, team number, subdivision name) to an index into
//! the entity arenas, and freezes the graph. Entities are handed out as
//! small `Copy` handles borrowing the interpreter. Every derived value is
//! computed on first access and cached in a `OnceCell`; caches are never
//! invalidated because nothing mutates after linking.

pub mod event;
pub mod penalty;
pub mod placing;
pub mod subdivision;
pub mod team;
pub mod tournament;

pub use event::Event;
pub use penalty::Penalty;
pub use placing::{Placing, PlacingCategory};
pub use subdivision::Subdivision;
pub use team::Team;
pub use tournament::Tournament;

use anyhow::Result;
use std::collections::HashMap;

use crate::rep::Rep;
use event::EventData;
use penalty::PenaltyData;
use placing::PlacingData;
use subdivision::SubdivisionData;
use team::TeamData;
use tournament::TournamentData;

pub struct Interpreter {
    tournament: TournamentData,
    events: Vec<EventData>,
    teams: Vec<TeamData>,
    placings: Vec<PlacingData>,
    penalties: Vec<PenaltyData>,
    subdivisions: Vec<SubdivisionData>,
}

impl Interpreter {
    /// Link a parsed document into an interpreter.
    ///
    /// # Errors
    ///
    /// Fails when a natural key is duplicated or when any placing, penalty
    /// or team names an event, team or subdivision that does not exist.
    /// All problems are reported together, one per line.
    pub fn new(rep: Rep) -> Result<Self> {
        let mut errors = Vec::new();

        let mut event_index: HashMap<&str, usize> = HashMap::new();
        for (i, event) in rep.events.iter().enumerate() {
            if event_index.insert(event.name.as_str(), i).is_some() {
                errors.push(format!("duplicate event '{}'", event.name));
            }
        }

        let mut team_index: HashMap<u32, usize> = HashMap::new();
        for (i, team) in rep.teams.iter().enumerate() {
            if team_index.insert(team.number, i).is_some() {
                errors.push(format!("duplicate team number {}", team.number));
            }
        }

        let mut subdivision_index: HashMap<&str, usize> = HashMap::new();
        for (i, subdivision) in rep.subdivisions.iter().enumerate() {
            if subdivision_index.insert(subdivision.name.as_str(), i).is_some() {
                errors.push(format!("duplicate subdivision '{}'", subdivision.name));
            }
        }

        let mut placing_links = Vec::with_capacity(rep.placings.len());
        for (i, placing) in rep.placings.iter().enumerate() {
            let event = event_index.get(placing.event.as_str()).copied();
            let team = team_index.get(&placing.team).copied();
            if event.is_none() {
                errors.push(format!(
                    "placing {} (team {}) refers to unknown event '{}'",
                    i + 1,
                    placing.team,
                    placing.event
                ));
            }
            if team.is_none() {
                errors.push(format!(
                    "placing {} ({}) refers to unknown team {}",
                    i + 1,
                    placing.event,
                    placing.team
                ));
            }
            if let (Some(event), Some(team)) = (event, team) {
                placing_links.push((event, team));
            }
        }

        let mut penalty_links = Vec::with_capacity(rep.penalties.len());
        for (i, penalty) in rep.penalties.iter().enumerate() {
            match team_index.get(&penalty.team) {
                Some(&team) => penalty_links.push(team),
                None => errors.push(format!(
                    "penalty {} refers to unknown team {}",
                    i + 1,
                    penalty.team
                )),
            }
        }

        let mut subdivision_links = Vec::with_capacity(rep.teams.len());
        for team in &rep.teams {
            let link = match &team.subdivision {
                Some(name) => {
                    let found = subdivision_index.get(name.as_str()).copied();
                    if found.is_none() {
                        errors.push(format!(
                            "team {} refers to unknown subdivision '{}'",
                            team.number, name
                        ));
                    }
                    found
                }
                None => None,
            };
            subdivision_links.push(link);
        }

        if !errors.is_empty() {
            anyhow::bail!("Unresolved references:\n  - {}", errors.join("\n  - "));
        }

        let mut events: Vec<EventData> = rep.events.into_iter().map(EventData::new).collect();
        let mut teams: Vec<TeamData> = rep
            .teams
            .into_iter()
            .zip(subdivision_links)
            .map(|(record, subdivision)| TeamData::new(record, subdivision))
            .collect();
        let mut subdivisions: Vec<SubdivisionData> = rep
            .subdivisions
            .into_iter()
            .map(SubdivisionData::new)
            .collect();

        // No errors means every placing and penalty has a link, in order.
        let mut placings = Vec::with_capacity(placing_links.len());
        let linked_placings = rep.placings.into_iter().zip(placing_links);
        for (id, (record, (event, team))) in linked_placings.enumerate() {
            events[event].placings.push(id);
            teams[team].placings.push(id);
            placings.push(PlacingData::new(record, event, team));
        }

        let mut penalties = Vec::with_capacity(penalty_links.len());
        for (id, (record, team)) in rep.penalties.into_iter().zip(penalty_links).enumerate() {
            teams[team].penalties.push(id);
            penalties.push(PenaltyData::new(record, team));
        }

        for (id, team) in teams.iter().enumerate() {
            if let Some(subdivision) = team.subdivision {
                subdivisions[subdivision].teams.push(id);
            }
        }

        Ok(Self {
            tournament: TournamentData::new(rep.tournament),
            events,
            teams,
            placings,
            penalties,
            subdivisions,
        })
    }

    pub fn tournament(&self) -> Tournament<'_> {
        Tournament::new(self)
    }

    pub fn events(&self) -> impl Iterator<Item = Event<'_>> + '_ {
        (0..self.events.len()).map(move |id| Event::new(self, id))
    }

    pub fn teams(&self) -> impl Iterator<Item = Team<'_>> + '_ {
        (0..self.teams.len()).map(move |id| Team::new(self, id))
    }

    pub fn placings(&self) -> impl Iterator<Item = Placing<'_>> + '_ {
        (0..self.placings.len()).map(move |id| Placing::new(self, id))
    }

    pub fn penalties(&self) -> impl Iterator<Item = Penalty<'_>> + '_ {
        (0..self.penalties.len()).map(move |id| Penalty::new(self, id))
    }

    pub fn subdivisions(&self) -> impl Iterator<Item = Subdivision<'_>> + '_ {
        (0..self.subdivisions.len()).map(move |id| Subdivision::new(self, id))
    }

    /// Look up an event by exact name
    pub fn event(&self, name: &str) -> Option<Event<'_>> {
        self.events().find(|e| e.name() == name)
    }

    /// Look up a team by number
    pub fn team(&self, number: u32) -> Option<Team<'_>> {
        self.teams().find(|t| t.number() == number)
    }

    /// Look up the placing of `team` in `event`
    pub fn placing(&self, event: &str, team: u32) -> Option<Placing<'_>> {
        self.event(event)?
            .placings()
            .find(|p| p.team().number() == team)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::rep::{
        Division, EventRecord, Level, PlacingRecord, Rep, TeamRecord, TournamentRecord,
    };
    use chrono::NaiveDate;

    pub fn tournament() -> TournamentRecord {
        TournamentRecord {
            name: Some("Test Invitational".to_string()),
            short_name: None,
            location: "Test High School".to_string(),
            level: Level::Invitational,
            state: Some("OH".to_string()),
            division: Division::C,
            year: 2020,
            date: NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
            medals: None,
            trophies: None,
            bids: None,
            per_team_bids: None,
            worst_placings_dropped: None,
            exempt_placings: None,
            maximum_place: None,
            per_event_n: None,
            n_offset: None,
        }
    }

    pub fn event(name: &str) -> EventRecord {
        EventRecord {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn team(number: u32) -> TeamRecord {
        TeamRecord {
            number,
            school: format!("School {}", number),
            ..Default::default()
        }
    }

    pub fn placing(event: &str, team: u32, place: u32) -> PlacingRecord {
        PlacingRecord {
            event: event.to_string(),
            team,
            place: Some(place),
            ..Default::default()
        }
    }

    /// `team_count` teams numbered from 1, each placed in every event by
    /// team number (team 1 first, team 2 second, ...).
    pub fn rep(team_count: u32, events: &[&str]) -> Rep {
        let mut placings = Vec::new();
        for name in events {
            for number in 1..=team_count {
                placings.push(placing(name, number, number));
            }
        }
        Rep {
            tournament: tournament(),
            events: events.iter().map(|name| event(name)).collect(),
            teams: (1..=team_count).map(team).collect(),
            placings,
            penalties: Vec::new(),
            subdivisions: Vec::new(),
        }
    }

    /// Mutable access to the placing of `team` in `event`
    pub fn placing_mut<'a>(rep: &'a mut Rep, event: &str, team: u32) -> &'a mut PlacingRecord {
        rep.placings
            .iter_mut()
            .find(|p| p.event == event && p.team == team)
            .unwrap()
    }
}
