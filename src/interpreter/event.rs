use std::cell::OnceCell;

use super::{Interpreter, Placing, Tournament};
use crate::rep::EventRecord;

pub(super) struct EventData {
    pub(super) record: EventRecord,
    pub(super) placings: Vec<usize>,
    maximum_place: OnceCell<u32>,
    competing_teams_count: OnceCell<u32>,
}

impl EventData {
    pub(super) fn new(record: EventRecord) -> Self {
        Self {
            record,
            placings: Vec::new(),
            maximum_place: OnceCell::new(),
            competing_teams_count: OnceCell::new(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Event<'a> {
    interpreter: &'a Interpreter,
    id: usize,
}

impl<'a> Event<'a> {
    pub(super) fn new(interpreter: &'a Interpreter, id: usize) -> Self {
        Self { interpreter, id }
    }

    fn data(&self) -> &'a EventData {
        &self.interpreter.events[self.id]
    }

    pub fn tournament(&self) -> Tournament<'a> {
        self.interpreter.tournament()
    }

    pub fn name(&self) -> &'a str {
        &self.data().record.name
    }

    /// Event is being tested this season and does not count
    pub fn trial(&self) -> bool {
        self.data().record.trial
    }

    /// Event was replaced by a trial event and does not count
    pub fn trialed(&self) -> bool {
        self.data().record.trialed
    }

    pub fn placings(&self) -> impl Iterator<Item = Placing<'a>> + 'a {
        let interpreter = self.interpreter;
        self.data()
            .placings
            .iter()
            .map(move |&id| Placing::new(interpreter, id))
    }

    /// Teams that competed for a scoring slot.
    ///
    /// Counts every placing that participated, including disqualified and
    /// participation-only placings with no recorded place. Trial events
    /// count every participant; other events leave out exempt placings and
    /// exhibition teams.
    pub fn competing_teams_count(&self) -> u32 {
        *self.data().competing_teams_count.get_or_init(|| {
            let trial = self.trial();
            self.placings()
                .filter(|p| p.participated())
                .filter(|p| trial || !(p.exempt() || p.team().exhibition()))
                .count() as u32
        })
    }

    /// Scoring ceiling `n` for this event.
    ///
    /// Trial events use their own placing count. With per-event n the
    /// ceiling shrinks to the competing-team count but never exceeds the
    /// tournament ceiling.
    pub fn maximum_place(&self) -> u32 {
        *self.data().maximum_place.get_or_init(|| {
            let tournament = self.tournament();
            if self.trial() {
                self.data().placings.len() as u32
            } else if tournament.per_event_n() {
                self.competing_teams_count().min(tournament.maximum_place())
            } else {
                tournament.maximum_place()
            }
        })
    }

    /// True if any placing in this event is marked as tied
    pub fn ties(&self) -> bool {
        self.placings().any(|p| p.tie())
    }
}

impl PartialEq for Event<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.interpreter, other.interpreter) && self.id == other.id
    }
}

impl Eq for Event<'_> {}

impl std::fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event").field("name", &self.name()).finish()
    }
}
