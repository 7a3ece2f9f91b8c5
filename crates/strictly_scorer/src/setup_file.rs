//! Match setup loaded from TOML.

use derive_more::{Display, Error};
use std::path::Path;
use strictly_cricket::RawSetup;
use tracing::{debug, info, instrument};

/// Reads a raw setup from a TOML file.
///
/// `None` yields the empty payload, which normalizes to the defaulted
/// configuration.
///
/// # Errors
///
/// Returns [`SetupFileError`] when the file cannot be read or parsed.
#[instrument(skip(path), fields(path = ?path.map(|p| p.display().to_string())))]
pub fn load_setup(path: Option<&Path>) -> Result<RawSetup, SetupFileError> {
    let Some(path) = path else {
        debug!("No setup file, using defaults");
        return Ok(RawSetup::default());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| SetupFileError::new(format!("Failed to read setup file: {}", e)))?;
    let raw = parse_setup(&content)?;
    info!(title = ?raw.title, "Setup loaded");
    Ok(raw)
}

/// Parses a raw setup from TOML text.
///
/// # Errors
///
/// Returns [`SetupFileError`] when the text is not a valid setup.
pub fn parse_setup(content: &str) -> Result<RawSetup, SetupFileError> {
    toml::from_str(content).map_err(|e| SetupFileError::new(format!("Failed to parse setup: {}", e)))
}

/// A setup file that could not be read or parsed, tagged with where it was raised.
#[derive(Debug, Clone, Display, Error)]
#[display("Setup file error: {} ({}:{})", message, file, line)]
pub struct SetupFileError {
    /// What went wrong.
    pub message: String,
    /// Line that raised it.
    pub line: u32,
    /// Source file that raised it.
    pub file: &'static str,
}

impl SetupFileError {
    #[track_caller]
    #[instrument(skip(message))]
    fn new(message: String) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            message,
            line: caller.line(),
            file: caller.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_cricket::{BattingFirst, NumericInput};

    #[test]
    fn test_parse_full_setup() {
        let raw = parse_setup(
            r#"
            match_type = "League"
            title = "Rovers v Rangers"
            overs = 20
            target = "150"
            chasing = true
            team_one_name = "Rovers"
            team_two_name = "Rangers"
            team_one_players = ["A", "B", "C"]
            team_two_players = ["X", "Y"]
            batting_first = "team_two"
            "#,
        )
        .unwrap();
        assert_eq!(raw.title.as_deref(), Some("Rovers v Rangers"));
        assert_eq!(raw.overs.as_ref().and_then(NumericInput::value), Some(20.0));
        assert_eq!(raw.target.as_ref().and_then(NumericInput::value), Some(150.0));
        assert_eq!(raw.batting_first, Some(BattingFirst::TeamTwo));
        assert_eq!(raw.team_one_players.map(|p| p.len()), Some(3));
    }

    #[test]
    fn test_parse_error_reports_location() {
        let err = parse_setup("overs = [").unwrap_err();
        assert!(err.message.starts_with("Failed to parse setup"));
        assert!(err.file.ends_with("setup_file.rs"));
        assert!(err.line > 0);
        assert!(err.to_string().starts_with("Setup file error: Failed to parse setup"));
        assert!(err.to_string().ends_with(&format!("({}:{})", err.file, err.line)));
    }

    #[test]
    fn test_no_file_means_defaults() {
        assert_eq!(load_setup(None).unwrap(), RawSetup::default());
    }
}
