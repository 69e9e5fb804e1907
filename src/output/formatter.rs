use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::interpreter::{Interpreter, PlacingCategory, Team};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// One line of the standings, also the JSON shape of `--json`
#[derive(Debug, Serialize)]
pub struct StandingRow {
    pub rank: Option<u32>,
    pub number: u32,
    pub school: String,
    pub points: u32,
    pub penalty_points: u32,
    pub trophy: bool,
    pub exhibition: bool,
}

impl StandingRow {
    fn from_team(team: Team<'_>) -> Self {
        Self {
            rank: team.rank(),
            number: team.number(),
            school: team.display_name(),
            points: team.points(),
            penalty_points: team.penalty_points(),
            trophy: team.trophy(),
            exhibition: team.exhibition(),
        }
    }
}

/// Ranked teams first, then exhibition teams by number
pub fn standing_rows(interpreter: &Interpreter) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = interpreter
        .tournament()
        .teams_by_rank()
        .into_iter()
        .map(StandingRow::from_team)
        .collect();

    let mut exhibition: Vec<Team<'_>> = interpreter.teams().filter(|t| t.exhibition()).collect();
    exhibition.sort_by_key(|t| t.number());
    rows.extend(exhibition.into_iter().map(StandingRow::from_team));
    rows
}

/// Standings as pretty-printed JSON
pub fn format_standings_json(interpreter: &Interpreter) -> serde_json::Result<String> {
    let tournament = interpreter.tournament();
    let value = serde_json::json!({
        "tournament": tournament.name().unwrap_or(tournament.location()),
        "medals": tournament.medals(),
        "trophies": tournament.trophies(),
        "maximum_place": tournament.maximum_place(),
        "worst_placings_dropped": tournament.worst_placings_dropped(),
        "ties": tournament.ties(),
        "standings": standing_rows(interpreter),
    });
    serde_json::to_string_pretty(&value)
}

/// Format the standings as one line per team.
/// Columns: rank, team number, points, school. Trophy winners are starred
/// and exhibition teams show "EX" in place of a rank.
pub fn format_standings_table(interpreter: &Interpreter, use_colors: bool) -> String {
    let rows = standing_rows(interpreter);
    if rows.is_empty() {
        return "No teams found.".to_string();
    }

    let term_width = get_terminal_width();
    let rank_width = 4;
    let number_width = 4;
    let points_width = 6;
    let separator = "  ";
    let fixed_width = rank_width + number_width + points_width + separator.len() * 3 + 1;

    rows.iter()
        .map(|row| {
            let rank_str = match row.rank {
                Some(rank) => format!("{:>3}.", rank),
                None => format!("{:>4}", "EX"),
            };
            let number_str = format!("{:>width$}", row.number, width = number_width);
            let points_str = format!("{:>width$}", row.points, width = points_width);
            let marker = if row.trophy { "*" } else { " " };

            let school = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&row.school, width - fixed_width)
                }
                Some(_) => truncate_name(&row.school, 20),
                None => row.school.clone(),
            };

            if use_colors {
                let rank_colored = if row.exhibition {
                    rank_str.dimmed().to_string()
                } else {
                    rank_str
                };
                let school_colored = if row.trophy {
                    school.bold().to_string()
                } else {
                    school
                };
                format!(
                    "{}{}{}{}{}{}{}{}",
                    rank_colored,
                    separator,
                    number_str.cyan(),
                    separator,
                    points_str.bold(),
                    marker.yellow(),
                    separator,
                    school_colored
                )
            } else {
                format!(
                    "{}{}{}{}{}{}{}{}",
                    rank_str,
                    separator,
                    number_str,
                    separator,
                    points_str,
                    marker,
                    separator,
                    school
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format each event with its ceiling and competing-team count
pub fn format_events_table(interpreter: &Interpreter, use_colors: bool) -> String {
    if interpreter.events().next().is_none() {
        return "No events found.".to_string();
    }

    interpreter
        .events()
        .map(|event| {
            let mut flags = Vec::new();
            if event.trial() {
                flags.push("trial");
            }
            if event.trialed() {
                flags.push("trialed");
            }
            if event.ties() {
                flags.push("ties");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            };

            let counts = format!(
                "n={:<3} competing={}",
                event.maximum_place(),
                event.competing_teams_count()
            );

            if use_colors {
                format!("{:<32}  {}{}", event.name().bold(), counts, flags.dimmed())
            } else {
                format!("{:<32}  {}{}", event.name(), counts, flags)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Describe how a placing was scored, e.g. "3", "DQ", "NP"
fn format_place(category: PlacingCategory) -> String {
    match category {
        PlacingCategory::Disqualified => "DQ".to_string(),
        PlacingCategory::DidNotParticipate => "NP".to_string(),
        PlacingCategory::ParticipationOnly => "PO".to_string(),
        PlacingCategory::Unknown => "??".to_string(),
        PlacingCategory::Normal(place) => place.to_string(),
    }
}

/// Format a team with one line per event placing (for the `team` command)
pub fn format_team_detail(team: Team<'_>, use_colors: bool) -> String {
    let rank = match team.rank() {
        Some(rank) => format!("Rank: {}", rank),
        None => "Exhibition".to_string(),
    };
    let header = format!("{} (#{})", team.display_name(), team.number());

    let mut lines = vec![
        if use_colors {
            header.bold().to_string()
        } else {
            header
        },
        format!(
            "  {}  Points: {}  Medals: {}",
            rank,
            team.points(),
            team.medal_count()
        ),
    ];

    for placing in team.placings() {
        let mut notes = Vec::new();
        if placing.exempt() {
            notes.push("exempt");
        }
        if placing.event().trial() || placing.event().trialed() {
            notes.push("trial");
        }
        if placing.dropped_as_part_of_worst_placings() {
            notes.push("dropped");
        }
        if placing.tie() {
            notes.push("tie");
        }
        if placing.medal() {
            notes.push("medal");
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!(" ({})", notes.join(", "))
        };

        lines.push(format!(
            "  {:<32} {:>3} -> {:>3}{}",
            placing.event().name(),
            format_place(placing.category()),
            placing.points(),
            notes
        ));
    }

    for penalty in team.penalties() {
        lines.push(format!("  {:<32} penalty +{}", "", penalty.points()));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::fixtures;
    use crate::rep::PenaltyRecord;

    fn sample_interpreter() -> Interpreter {
        let mut rep = fixtures::rep(4, &["Astronomy", "Fossils"]);
        rep.teams[3].exhibition = true;
        rep.tournament.worst_placings_dropped = Some(1);
        rep.penalties.push(PenaltyRecord { team: 2, points: 1 });
        fixtures::placing_mut(&mut rep, "Fossils", 3).disqualified = true;
        Interpreter::new(rep).unwrap()
    }

    #[test]
    fn test_standing_rows_order() {
        let interpreter = sample_interpreter();
        let rows = standing_rows(&interpreter);
        let numbers: Vec<u32> = rows.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(rows[0].rank, Some(1));
        assert_eq!(rows[3].rank, None);
        assert!(rows[3].exhibition);
        assert_eq!(rows[1].penalty_points, 1);
    }

    #[test]
    fn test_format_standings_table_plain() {
        let interpreter = sample_interpreter();
        let output = format_standings_table(&interpreter, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("  1."));
        assert!(lines[0].contains("School 1"));
        assert!(lines[3].contains("EX"));
    }

    #[test]
    fn test_format_standings_json() {
        let interpreter = sample_interpreter();
        let json = format_standings_json(&interpreter).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tournament"], "Test Invitational");
        assert_eq!(value["standings"].as_array().unwrap().len(), 4);
        assert_eq!(value["standings"][0]["number"], 1);
        assert_eq!(value["standings"][3]["rank"], serde_json::Value::Null);
    }

    #[test]
    fn test_format_team_detail() {
        let interpreter = sample_interpreter();
        let team = interpreter.team(3).unwrap();
        let output = format_team_detail(team, false);
        assert!(output.contains("School 3 (#3)"));
        assert!(output.contains("DQ"));
        assert!(output.contains("dropped"));
    }

    #[test]
    fn test_format_team_detail_penalty() {
        let interpreter = sample_interpreter();
        let output = format_team_detail(interpreter.team(2).unwrap(), false);
        assert!(output.contains("penalty +1"));
    }

    #[test]
    fn test_format_events_table() {
        let mut rep = fixtures::rep(3, &["Astronomy", "Circuit Lab"]);
        rep.events[1].trial = true;
        let interpreter = Interpreter::new(rep).unwrap();
        let output = format_events_table(&interpreter, false);
        assert!(output.contains("Astronomy"));
        assert!(output.contains("n=3"));
        assert!(output.contains("[trial]"));
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short", 10), "Short");
        assert_eq!(truncate_name("A Very Long School Name", 10), "A Very ...");
        assert_eq!(truncate_name("Abc", 2), "Ab");
    }
}
