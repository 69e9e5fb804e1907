use std::cell::OnceCell;

use super::{Event, Interpreter, Team, Tournament};
use crate::rep::PlacingRecord;

pub(super) struct PlacingData {
    record: PlacingRecord,
    event: usize,
    team: usize,
    isolated_points: OnceCell<u32>,
    exhibition_placings_behind: OnceCell<u32>,
}

impl PlacingData {
    pub(super) fn new(record: PlacingRecord, event: usize, team: usize) -> Self {
        Self {
            record,
            event,
            team,
            isolated_points: OnceCell::new(),
            exhibition_placings_behind: OnceCell::new(),
        }
    }
}

/// How a placing is scored. Variants are listed in priority order: a
/// placing falls into the first category whose condition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacingCategory {
    /// Scores `n + 2`
    Disqualified,
    /// Scores `n + 1`
    DidNotParticipate,
    /// Participated without a recorded place; scores `n`
    ParticipationOnly,
    /// Place not known; scores `n`
    Unknown,
    /// Ranked at the given place
    Normal(u32),
}

/// One team's result in one event.
#[derive(Clone, Copy)]
pub struct Placing<'a> {
    interpreter: &'a Interpreter,
    id: usize,
}

impl<'a> Placing<'a> {
    pub(super) fn new(interpreter: &'a Interpreter, id: usize) -> Self {
        Self { interpreter, id }
    }

    pub(super) fn id(&self) -> usize {
        self.id
    }

    fn data(&self) -> &'a PlacingData {
        &self.interpreter.placings[self.id]
    }

    fn tournament(&self) -> Tournament<'a> {
        self.interpreter.tournament()
    }

    pub fn event(&self) -> Event<'a> {
        Event::new(self.interpreter, self.data().event)
    }

    pub fn team(&self) -> Team<'a> {
        Team::new(self.interpreter, self.data().team)
    }

    pub fn place(&self) -> Option<u32> {
        self.data().record.place
    }

    pub fn participated(&self) -> bool {
        self.data().record.participated.unwrap_or(true)
    }

    pub fn disqualified(&self) -> bool {
        self.data().record.disqualified
    }

    pub fn exempt(&self) -> bool {
        self.data().record.exempt
    }

    pub fn unknown(&self) -> bool {
        self.data().record.unknown
    }

    pub fn tie(&self) -> bool {
        self.data().record.tie
    }

    pub fn did_not_participate(&self) -> bool {
        !self.participated()
    }

    pub fn participation_only(&self) -> bool {
        self.participated()
            && self.place().is_none()
            && !self.disqualified()
            && !self.unknown()
    }

    pub fn category(&self) -> PlacingCategory {
        if self.disqualified() {
            PlacingCategory::Disqualified
        } else if self.did_not_participate() {
            PlacingCategory::DidNotParticipate
        } else if self.participation_only() {
            PlacingCategory::ParticipationOnly
        } else {
            match self.place() {
                Some(place) if !self.unknown() => PlacingCategory::Normal(place),
                _ => PlacingCategory::Unknown,
            }
        }
    }

    /// Points this placing adds to its team's total: zero when it is not
    /// counted (trial event, exempt, or dropped), else [`Self::isolated_points`].
    pub fn points(&self) -> u32 {
        if self.considered_for_team_points() {
            self.isolated_points()
        } else {
            0
        }
    }

    /// Points earned by this placing on its own, ignoring drops and exemptions.
    pub fn isolated_points(&self) -> u32 {
        *self.data().isolated_points.get_or_init(|| {
            let n = self.event().maximum_place();

            match self.category() {
                PlacingCategory::Disqualified => n + 2,
                PlacingCategory::DidNotParticipate => n + 1,
                PlacingCategory::ParticipationOnly | PlacingCategory::Unknown => n,
                PlacingCategory::Normal(place) => self.adjusted_place(place).min(n),
            }
        })
    }

    pub fn considered_for_team_points(&self) -> bool {
        self.initially_considered_for_team_points() && !self.dropped_as_part_of_worst_placings()
    }

    /// Counted before worst placings are dropped
    pub fn initially_considered_for_team_points(&self) -> bool {
        let event = self.event();
        !(event.trial() || event.trialed() || self.exempt())
    }

    pub fn dropped_as_part_of_worst_placings(&self) -> bool {
        self.team().worst_placings_to_be_dropped().contains(self)
    }

    /// True when an exempt or exhibition placing finished ahead of this one
    pub fn placed_behind_exhibition(&self) -> bool {
        self.exhibition_placings_behind() > 0
    }

    /// Whether the tournament's custom ceiling, rather than the place itself,
    /// decides these points
    pub fn points_limited_by_maximum_place(&self) -> bool {
        if !self.tournament().custom_maximum_place() {
            return false;
        }
        match self.category() {
            PlacingCategory::Unknown => true,
            PlacingCategory::Normal(place) => {
                self.adjusted_place(place) > self.event().maximum_place()
            }
            _ => false,
        }
    }

    /// A counted, ranked placing within the tournament's medal places
    pub fn medal(&self) -> bool {
        matches!(self.category(), PlacingCategory::Normal(_))
            && self.considered_for_team_points()
            && self.isolated_points() <= self.tournament().medals()
    }

    /// Place shifted up past exempt and exhibition placings ahead of it.
    /// Trial events keep the raw place.
    fn adjusted_place(&self, place: u32) -> u32 {
        if self.event().trial() {
            return place;
        }
        place.saturating_sub(self.exhibition_placings_behind())
    }

    fn exhibition_placings_behind(&self) -> u32 {
        *self.data().exhibition_placings_behind.get_or_init(|| {
            let Some(place) = self.place() else {
                return 0;
            };
            self.event()
                .placings()
                .filter(|p| p.exempt() || p.team().exhibition())
                .filter(|p| p.place().is_some_and(|other| other < place))
                .count() as u32
        })
    }
}

impl PartialEq for Placing<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.interpreter, other.interpreter) && self.id == other.id
    }
}

impl Eq for Placing<'_> {}

impl std::fmt::Debug for Placing<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Placing")
            .field("event", &self.event().name())
            .field("team", &self.team().number())
            .field("place", &self.place())
            .finish()
    }
}
