//! Strictly Cricket - a live innings scorekeeping engine
//!
//! Tracks runs, wickets, overs, extras, partnerships and batter figures as
//! ball events are recorded, with undo and derived analytics after every event.
//!
//! # Architecture
//!
//! - **Config**: normalizes a raw setup payload into an immutable [`MatchConfig`]
//! - **Innings**: the mutable [`InningsState`] aggregate
//! - **Delivery**: first-class ball events and the transitions they drive
//! - **Contracts / Invariants**: checkable pre- and postconditions
//! - **History**: bounded snapshot stack for undo
//! - **Analytics**: pure projections of an innings
//! - **Scorer**: the caller-owned context tying it all together
//!
//! # Example
//!
//! ```
//! use strictly_cricket::{ExtraKind, MatchConfig, RawSetup, Scoreboard, Scorer};
//!
//! # fn example() -> Result<(), strictly_cricket::ScoringError> {
//! let setup = RawSetup::default()
//!     .with_team_one_name("Rovers")
//!     .with_team_one_players(vec!["Ali".to_string(), "Bea".to_string(), "Cal".to_string()]);
//! let mut scorer = Scorer::new();
//! scorer.apply_setup(setup, false)?;
//!
//! scorer.record_run(4)?;
//! scorer.record_extra(ExtraKind::Wide)?;
//! scorer.undo()?;
//!
//! let board = Scoreboard::capture(&scorer);
//! assert_eq!(board.score(), "4/0");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod analytics;
mod config;
mod contracts;
mod error;
mod history;
mod innings;
mod invariants;
mod scoreboard;
mod scorer;

pub mod delivery;

// Crate-level exports - Configuration
pub use config::{
    BattingFirst, DEFAULT_OVERS, MAX_OVERS, MIN_OVERS, MIN_PLAYERS, MatchConfig, MatchInfo,
    NumericInput, RawSetup,
};

// Crate-level exports - Innings model
pub use innings::{
    BALLS_PER_OVER, BallOutcome, Batter, BatterStatus, ExtraKind, Extras, FallOfWicket,
    InningsState, LAST_BALLS_WINDOW, MAX_WICKETS, OverBall, POWERPLAY_BALLS, Partnership,
    Powerplay,
};

// Crate-level exports - Deliveries
pub use delivery::{BatterRequest, Delivery, DeliveryReport, Incoming, MAX_RUNS_PER_BALL};

// Crate-level exports - Contracts and invariants
pub use contracts::{
    Contract, DeliveryContract, InningsLive, LegalDelivery, StrikerPresent, ValueInRange,
};
pub use invariants::{
    BallLimitInvariant, InningsInvariants, Invariant, InvariantSet, InvariantViolation,
    OverLedgerInvariant, ScoreLedgerInvariant, StrikeInvariant,
};

// Crate-level exports - History
pub use history::{MAX_UNDO, Snapshot, UndoHistory};

// Crate-level exports - Analytics
pub use analytics::{InningsAnalytics, LiveStatus, NOT_APPLICABLE, RequiredRate, format_overs};

// Crate-level exports - Scorer and view
pub use scoreboard::{BatterRow, RECENT_OVERS, Scoreboard};
pub use scorer::{Notice, NoticeLevel, Scorer};

// Crate-level exports - Errors
pub use error::{ErrorKind, GuardRejection, ScoringError, SetupError};
