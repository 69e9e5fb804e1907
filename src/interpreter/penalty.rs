use super::{Interpreter, Team};
use crate::rep::PenaltyRecord;

pub(super) struct PenaltyData {
    record: PenaltyRecord,
    team: usize,
}

impl PenaltyData {
    pub(super) fn new(record: PenaltyRecord, team: usize) -> Self {
        Self { record, team }
    }
}

/// Points added to a team's total outside of any event.
#[derive(Clone, Copy)]
pub struct Penalty<'a> {
    interpreter: &'a Interpreter,
    id: usize,
}

impl<'a> Penalty<'a> {
    pub(super) fn new(interpreter: &'a Interpreter, id: usize) -> Self {
        Self { interpreter, id }
    }

    fn data(&self) -> &'a PenaltyData {
        &self.interpreter.penalties[self.id]
    }

    pub fn team(&self) -> Team<'a> {
        Team::new(self.interpreter, self.data().team)
    }

    pub fn points(&self) -> u32 {
        self.data().record.points
    }
}
