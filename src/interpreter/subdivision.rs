use super::{Interpreter, Team};
use crate::rep::SubdivisionRecord;

pub(super) struct SubdivisionData {
    record: SubdivisionRecord,
    pub(super) teams: Vec<usize>,
}

impl SubdivisionData {
    pub(super) fn new(record: SubdivisionRecord) -> Self {
        Self {
            record,
            teams: Vec::new(),
        }
    }
}

/// A named group of teams, e.g. one of several Regionals sites scored together.
#[derive(Clone, Copy)]
pub struct Subdivision<'a> {
    interpreter: &'a Interpreter,
    id: usize,
}

impl<'a> Subdivision<'a> {
    pub(super) fn new(interpreter: &'a Interpreter, id: usize) -> Self {
        Self { interpreter, id }
    }

    fn data(&self) -> &'a SubdivisionData {
        &self.interpreter.subdivisions[self.id]
    }

    pub fn name(&self) -> &'a str {
        &self.data().record.name
    }

    pub fn medals(&self) -> Option<u32> {
        self.data().record.medals
    }

    pub fn trophies(&self) -> Option<u32> {
        self.data().record.trophies
    }

    pub fn maximum_place(&self) -> Option<u32> {
        self.data().record.maximum_place
    }

    pub fn teams(&self) -> impl Iterator<Item = Team<'a>> + 'a {
        let interpreter = self.interpreter;
        self.data()
            .teams
            .iter()
            .map(move |&id| Team::new(interpreter, id))
    }
}
