mod schema;

pub use schema::{
    Division, EventRecord, Level, PenaltyRecord, PlacingRecord, Rep, SubdivisionRecord,
    TeamRecord, TournamentRecord,
};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse a results document from a YAML string
pub fn parse_rep(content: &str) -> Result<Rep> {
    let rep: Rep =
        serde_saphyr::from_str(content).context("Failed to parse results: invalid YAML")?;
    Ok(rep)
}

/// Load a results document from a YAML file
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist
/// - The file cannot be read
/// - The YAML cannot be parsed into the expected sections
pub fn load_rep(path: &Path) -> Result<Rep> {
    if !path.exists() {
        anyhow::bail!("Results file not found at {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read results file at {}", path.display()))?;

    parse_rep(&content).with_context(|| format!("Invalid results file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_missing_file() {
        let temp_path = env::temp_dir().join("sciolyff_test_missing.yaml");
        let _ = fs::remove_file(&temp_path);

        let err = load_rep(&temp_path).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_from_file() {
        let temp_path = env::temp_dir().join("sciolyff_test_load.yaml");
        let yaml = r#"
Tournament:
  location: Nationals Venue
  level: Nationals
  division: B
  year: 2021
  date: 2021-05-22
Events:
  - name: Write It Do It
Teams:
  - number: 7
    school: Beckendorff Junior High
Placings:
  - event: Write It Do It
    team: 7
    place: 1
"#;
        fs::write(&temp_path, yaml).unwrap();

        let rep = load_rep(&temp_path).unwrap();
        assert_eq!(rep.tournament.level, Level::Nationals);
        assert_eq!(rep.teams[0].number, 7);
        assert_eq!(rep.placings.len(), 1);

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_parse_missing_section() {
        let yaml = r#"
Tournament:
  location: Somewhere
  level: Regionals
  division: A
  year: 2018
  date: 2018-03-03
Events: []
Teams: []
"#;
        assert!(parse_rep(yaml).is_err());
    }
}
