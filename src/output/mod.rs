pub mod formatter;

pub use formatter::{
    format_events_table, format_standings_json, format_standings_table, format_team_detail,
    should_use_colors, standing_rows, StandingRow,
};
