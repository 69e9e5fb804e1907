use std::cell::OnceCell;
use std::cmp::Reverse;

use super::{Interpreter, Penalty, Placing, Subdivision, Tournament};
use crate::rep::TeamRecord;

pub(super) struct TeamData {
    pub(super) record: TeamRecord,
    pub(super) placings: Vec<usize>,
    pub(super) penalties: Vec<usize>,
    pub(super) subdivision: Option<usize>,
    worst_placings: OnceCell<Vec<usize>>,
    points: OnceCell<u32>,
}

impl TeamData {
    pub(super) fn new(record: TeamRecord, subdivision: Option<usize>) -> Self {
        Self {
            record,
            placings: Vec::new(),
            penalties: Vec::new(),
            subdivision,
            worst_placings: OnceCell::new(),
            points: OnceCell::new(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Team<'a> {
    interpreter: &'a Interpreter,
    id: usize,
}

impl<'a> Team<'a> {
    pub(super) fn new(interpreter: &'a Interpreter, id: usize) -> Self {
        Self { interpreter, id }
    }

    pub(super) fn id(&self) -> usize {
        self.id
    }

    fn data(&self) -> &'a TeamData {
        &self.interpreter.teams[self.id]
    }

    fn tournament(&self) -> Tournament<'a> {
        self.interpreter.tournament()
    }

    pub fn number(&self) -> u32 {
        self.data().record.number
    }

    pub fn school(&self) -> &'a str {
        &self.data().record.school
    }

    pub fn school_abbreviation(&self) -> Option<&'a str> {
        self.data().record.school_abbreviation.as_deref()
    }

    pub fn suffix(&self) -> Option<&'a str> {
        self.data().record.suffix.as_deref()
    }

    pub fn city(&self) -> Option<&'a str> {
        self.data().record.city.as_deref()
    }

    pub fn state(&self) -> Option<&'a str> {
        self.data().record.state.as_deref()
    }

    pub fn exhibition(&self) -> bool {
        self.data().record.exhibition
    }

    /// School name with its suffix, e.g. "Solon High School B"
    pub fn display_name(&self) -> String {
        match self.suffix() {
            Some(suffix) => format!("{} {}", self.school(), suffix),
            None => self.school().to_string(),
        }
    }

    pub fn subdivision(&self) -> Option<Subdivision<'a>> {
        self.data()
            .subdivision
            .map(|id| Subdivision::new(self.interpreter, id))
    }

    pub fn placings(&self) -> impl Iterator<Item = Placing<'a>> + 'a {
        let interpreter = self.interpreter;
        self.data()
            .placings
            .iter()
            .map(move |&id| Placing::new(interpreter, id))
    }

    pub fn penalties(&self) -> impl Iterator<Item = Penalty<'a>> + 'a {
        let interpreter = self.interpreter;
        self.data()
            .penalties
            .iter()
            .map(move |&id| Penalty::new(interpreter, id))
    }

    /// The team's worst counted placings, excluded from its total.
    ///
    /// Takes up to the tournament's drop count from the placings initially
    /// considered for team points, highest isolated points first. Equal
    /// points are ordered by event name so the selection is deterministic.
    pub fn worst_placings_to_be_dropped(&self) -> Vec<Placing<'a>> {
        let interpreter = self.interpreter;
        self.data()
            .worst_placings
            .get_or_init(|| {
                let dropped = self.tournament().worst_placings_dropped() as usize;
                if dropped == 0 {
                    return Vec::new();
                }
                let mut eligible: Vec<Placing<'a>> = self
                    .placings()
                    .filter(|p| p.initially_considered_for_team_points())
                    .collect();
                eligible.sort_by_key(|p| (Reverse(p.isolated_points()), p.event().name()));
                eligible.truncate(dropped);
                eligible.iter().map(|p| p.id()).collect()
            })
            .iter()
            .map(|&id| Placing::new(interpreter, id))
            .collect()
    }

    pub fn placing_points(&self) -> u32 {
        *self
            .data()
            .points
            .get_or_init(|| self.placings().map(|p| p.points()).sum())
    }

    pub fn penalty_points(&self) -> u32 {
        self.penalties().map(|p| p.points()).sum()
    }

    /// Team total: counted placing points plus penalties
    pub fn points(&self) -> u32 {
        self.placing_points() + self.penalty_points()
    }

    /// Counted placing points in ascending order, used to break ties in
    /// total points
    pub fn tiebreak_points(&self) -> Vec<u32> {
        let mut points: Vec<u32> = self
            .placings()
            .filter(|p| p.considered_for_team_points())
            .map(|p| p.points())
            .collect();
        points.sort_unstable();
        points
    }

    /// 1-based rank among non-exhibition teams; `None` for exhibition teams
    pub fn rank(&self) -> Option<u32> {
        self.tournament()
            .teams_by_rank()
            .iter()
            .position(|t| t == self)
            .map(|i| i as u32 + 1)
    }

    pub fn trophy(&self) -> bool {
        self.rank()
            .is_some_and(|rank| rank <= self.tournament().trophies())
    }

    /// Number of counted placings that earned a medal
    pub fn medal_count(&self) -> usize {
        self.placings().filter(|p| p.medal()).count()
    }
}

impl PartialEq for Team<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.interpreter, other.interpreter) && self.id == other.id
    }
}

impl Eq for Team<'_> {}

impl std::fmt::Debug for Team<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Team")
            .field("number", &self.number())
            .field("school", &self.school())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::{fixtures, Interpreter};
    use crate::rep::PenaltyRecord;

    #[test]
    fn test_points_sum_placings() {
        let interpreter =
            Interpreter::new(fixtures::rep(5, &["Astronomy", "Fossils", "Optics"])).unwrap();
        let team = interpreter.team(4).unwrap();
        assert_eq!(team.points(), 12);
        assert!(team.worst_placings_to_be_dropped().is_empty());
    }

    #[test]
    fn test_drops_worst_placings() {
        let mut rep = fixtures::rep(10, &["Astronomy", "Fossils", "Optics", "Sounds of Music"]);
        rep.tournament.worst_placings_dropped = Some(2);
        fixtures::placing_mut(&mut rep, "Fossils", 1).place = Some(9);
        fixtures::placing_mut(&mut rep, "Fossils", 9).place = Some(1);
        fixtures::placing_mut(&mut rep, "Optics", 1).disqualified = true;
        let interpreter = Interpreter::new(rep).unwrap();

        let team = interpreter.team(1).unwrap();
        let dropped: Vec<&str> = team
            .worst_placings_to_be_dropped()
            .iter()
            .map(|p| p.event().name())
            .collect();
        assert_eq!(dropped, vec!["Optics", "Fossils"]);
        assert!(interpreter
            .placing("Optics", 1)
            .unwrap()
            .dropped_as_part_of_worst_placings());
        assert_eq!(interpreter.placing("Optics", 1).unwrap().points(), 0);
        assert_eq!(team.points(), 2);
    }

    #[test]
    fn test_drop_tiebreak_by_event_name() {
        let mut rep = fixtures::rep(4, &["Optics", "Astronomy", "Fossils"]);
        rep.tournament.worst_placings_dropped = Some(1);
        let interpreter = Interpreter::new(rep).unwrap();

        let team = interpreter.team(3).unwrap();
        let dropped = team.worst_placings_to_be_dropped();
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].event().name(), "Astronomy");
        assert_eq!(team.points(), 6);
    }

    #[test]
    fn test_drop_count_exceeds_eligible_placings() {
        let mut rep = fixtures::rep(4, &["Astronomy", "Circuit Lab"]);
        rep.tournament.worst_placings_dropped = Some(3);
        rep.events[1].trial = true;
        let interpreter = Interpreter::new(rep).unwrap();

        let team = interpreter.team(2).unwrap();
        let dropped = team.worst_placings_to_be_dropped();
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].event().name(), "Astronomy");
        assert_eq!(team.points(), 0);
    }

    #[test]
    fn test_exempt_placings_never_dropped() {
        let mut rep = fixtures::rep(6, &["Astronomy", "Fossils"]);
        rep.tournament.worst_placings_dropped = Some(1);
        fixtures::placing_mut(&mut rep, "Fossils", 6).exempt = true;
        let interpreter = Interpreter::new(rep).unwrap();

        let team = interpreter.team(6).unwrap();
        let dropped = team.worst_placings_to_be_dropped();
        assert_eq!(dropped[0].event().name(), "Astronomy");
        assert_eq!(team.points(), 0);
    }

    #[test]
    fn test_penalties_added_to_total() {
        let mut rep = fixtures::rep(3, &["Astronomy"]);
        rep.penalties.push(PenaltyRecord { team: 1, points: 2 });
        rep.penalties.push(PenaltyRecord { team: 1, points: 3 });
        let interpreter = Interpreter::new(rep).unwrap();

        let team = interpreter.team(1).unwrap();
        assert_eq!(team.placing_points(), 1);
        assert_eq!(team.penalty_points(), 5);
        assert_eq!(team.points(), 6);
        assert_eq!(team.rank(), Some(3));
    }

    #[test]
    fn test_rank_tiebreak_prefers_more_first_places() {
        let mut rep = fixtures::rep(4, &["Astronomy", "Fossils", "Optics"]);
        // Team 1: 1 + 1 + 4 = 6, team 2: 2 + 2 + 2 = 6
        fixtures::placing_mut(&mut rep, "Optics", 1).place = Some(4);
        fixtures::placing_mut(&mut rep, "Optics", 4).place = Some(1);
        fixtures::placing_mut(&mut rep, "Fossils", 2).place = Some(2);
        let interpreter = Interpreter::new(rep).unwrap();

        let first = interpreter.team(1).unwrap();
        let second = interpreter.team(2).unwrap();
        assert_eq!(first.points(), 6);
        assert_eq!(second.points(), 6);
        assert_eq!(first.rank(), Some(1));
        assert_eq!(second.rank(), Some(2));
    }

    #[test]
    fn test_exhibition_team_unranked() {
        let mut rep = fixtures::rep(5, &["Astronomy"]);
        rep.teams[0].exhibition = true;
        let interpreter = Interpreter::new(rep).unwrap();

        let exhibition = interpreter.team(1).unwrap();
        assert_eq!(exhibition.rank(), None);
        assert!(!exhibition.trophy());
        assert_eq!(interpreter.team(2).unwrap().rank(), Some(1));
        assert!(interpreter.team(4).unwrap().trophy());
        assert!(!interpreter.team(5).unwrap().trophy());
    }

    #[test]
    fn test_display_name_with_suffix() {
        let mut rep = fixtures::rep(2, &["Astronomy"]);
        rep.teams[1].suffix = Some("B".to_string());
        let interpreter = Interpreter::new(rep).unwrap();

        assert_eq!(interpreter.team(1).unwrap().display_name(), "School 1");
        assert_eq!(interpreter.team(2).unwrap().display_name(), "School 2 B");
    }
}
