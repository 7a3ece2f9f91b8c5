//! Error types for innings scoring.
//!
//! Every error here is recoverable: a rejected operation leaves the innings
//! exactly as it was before the call.

use crate::innings::ExtraKind;
use derive_more::{Display, From};

/// Setup payload rejected by the configuration normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SetupError {
    /// A supplied player list has fewer than two named players.
    #[display("need at least two players per side ({} has {})", team, found)]
    NotEnoughPlayers {
        /// Team whose list was short.
        team: String,
        /// Named players found after trimming.
        found: usize,
    },
}

impl std::error::Error for SetupError {}

/// A scoring operation attempted while one of its preconditions fails.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GuardRejection {
    /// No setup has been applied yet.
    #[display("Complete match setup first")]
    SetupIncomplete,

    /// Overs are exhausted or ten wickets have fallen.
    #[display("Innings complete")]
    InningsComplete,

    /// No not-out batter holds strike.
    #[display("Assign active batters first")]
    NoActiveBatter,

    /// Striker and non-striker are both needed.
    #[display("Two active batters required")]
    TwoActiveBattersRequired,

    /// A wicket is waiting for the incoming batter's name.
    #[display("New batter required (default {})", _0)]
    AwaitingBatter(String),

    /// A name was supplied but no batter was requested.
    #[display("No new batter was requested")]
    NoBatterRequested,

    /// Run value outside 0..=6.
    #[display("Invalid run value {}", _0)]
    InvalidRuns(u8),

    /// Only byes and leg-byes carry a variable run value.
    #[display("{} has a fixed value", _0)]
    FixedExtraValue(ExtraKind),

    /// Progress would be discarded without the caller's confirmation.
    #[display("Confirmation required to discard progress")]
    ConfirmationRequired,
}

impl std::error::Error for GuardRejection {}

/// Classification of [`ScoringError`] for callers that only need the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// Precondition failed; state untouched.
    #[display("guard rejection")]
    GuardRejection,
    /// Setup payload rejected.
    #[display("validation failure")]
    ValidationFailure,
    /// Undo requested with an empty history.
    #[display("empty history")]
    EmptyHistory,
    /// A postcondition check failed.
    #[display("invariant violation")]
    InvariantViolation,
}

/// Any failure reported by the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum ScoringError {
    /// Precondition failed.
    #[display("{}", _0)]
    Guard(GuardRejection),

    /// Setup payload rejected.
    #[display("{}", _0)]
    Setup(SetupError),

    /// Nothing to restore.
    #[display("Nothing to undo")]
    #[from(ignore)]
    EmptyHistory,

    /// An innings invariant failed after a transition.
    #[display("Invariant violation: {}", _0)]
    #[from(ignore)]
    InvariantViolation(String),
}

impl ScoringError {
    /// Returns the taxonomy class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoringError::Guard(_) => ErrorKind::GuardRejection,
            ScoringError::Setup(_) => ErrorKind::ValidationFailure,
            ScoringError::EmptyHistory => ErrorKind::EmptyHistory,
            ScoringError::InvariantViolation(_) => ErrorKind::InvariantViolation,
        }
    }
}

impl std::error::Error for ScoringError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoringError::Guard(e) => Some(e),
            ScoringError::Setup(e) => Some(e),
            ScoringError::EmptyHistory | ScoringError::InvariantViolation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_messages_match_notices() {
        assert_eq!(GuardRejection::InningsComplete.to_string(), "Innings complete");
        assert_eq!(
            GuardRejection::TwoActiveBattersRequired.to_string(),
            "Two active batters required"
        );
        assert_eq!(ScoringError::EmptyHistory.to_string(), "Nothing to undo");
    }

    #[test]
    fn test_kind_and_source() {
        let err: ScoringError = GuardRejection::NoActiveBatter.into();
        assert_eq!(err.kind(), ErrorKind::GuardRejection);
        assert!(std::error::Error::source(&err).is_some());

        let err: ScoringError = SetupError::NotEnoughPlayers {
            team: "Rovers".to_string(),
            found: 1,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
        assert!(err.to_string().contains("at least two players"));
    }
}
