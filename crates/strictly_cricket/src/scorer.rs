//! The scorer: a caller-owned context tying configuration, innings, undo
//! history, and the new-batter port together.
//!
//! Every operation runs to completion before returning. Mutating operations
//! check their guards first, then snapshot, then mutate; a rejected operation
//! leaves innings and history exactly as they were.

use crate::analytics::{InningsAnalytics, LiveStatus};
use crate::config::{MatchConfig, RawSetup};
use crate::contracts::{Contract, DeliveryContract};
use crate::delivery::{self, BatterRequest, Delivery, DeliveryReport, Incoming};
use crate::error::{GuardRejection, ScoringError};
use crate::history::UndoHistory;
use crate::innings::{ExtraKind, InningsState};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{info, instrument, warn};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Something happened.
    Info,
    /// Something was refused.
    Warning,
}

/// Short status message for transient display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Message text.
    pub message: String,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Live scoring context for one innings.
#[derive(Debug, Clone)]
pub struct Scorer {
    config: MatchConfig,
    setup_complete: bool,
    state: InningsState,
    history: UndoHistory,
    pending_batter: Option<BatterRequest>,
    notices: VecDeque<Notice>,
}

impl Scorer {
    /// Creates a scorer awaiting setup, holding the default innings.
    #[instrument]
    pub fn new() -> Self {
        let config = MatchConfig::default();
        let state = InningsState::new(&config);
        Self {
            config,
            setup_complete: false,
            state,
            history: UndoHistory::new(),
            pending_batter: None,
            notices: VecDeque::new(),
        }
    }

    /// Creates a scorer with `config` already applied.
    #[instrument(skip(config))]
    pub fn with_config(config: MatchConfig) -> Self {
        let mut scorer = Self::new();
        scorer.install(config);
        scorer
    }

    // ─────────────────────────────────────────────────────────────
    //  Read access
    // ─────────────────────────────────────────────────────────────

    /// Applied configuration (the default one before setup).
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Current innings.
    pub fn state(&self) -> &InningsState {
        &self.state
    }

    /// Whether a setup has been applied.
    pub fn setup_complete(&self) -> bool {
        self.setup_complete
    }

    /// Snapshots available to undo.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Outstanding request for a new batter's name.
    pub fn pending_batter(&self) -> Option<&BatterRequest> {
        self.pending_batter.as_ref()
    }

    /// Setup applied, overs and wickets remaining.
    pub fn can_deliver_ball(&self) -> bool {
        self.setup_complete && self.state.can_deliver_ball()
    }

    /// Status tag for the board.
    pub fn status(&self) -> LiveStatus {
        LiveStatus::of(&self.state, self.setup_complete)
    }

    /// Derived figures for the current innings.
    pub fn analytics(&self) -> InningsAnalytics {
        InningsAnalytics::project(&self.state, self.status())
    }

    /// Takes every queued notice, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    // ─────────────────────────────────────────────────────────────
    //  Setup and reset
    // ─────────────────────────────────────────────────────────────

    /// Normalizes and applies a setup payload, rebuilding the innings.
    ///
    /// # Errors
    ///
    /// - [`ScoringError::Setup`] when the payload is rejected.
    /// - [`GuardRejection::ConfirmationRequired`] when an applied setup has
    ///   progress and `confirmed` is false.
    #[instrument(skip(self, raw))]
    pub fn apply_setup(&mut self, raw: RawSetup, confirmed: bool) -> Result<&MatchConfig, ScoringError> {
        let config = match MatchConfig::from_raw(raw) {
            Ok(config) => config,
            Err(e) => return Err(self.reject(e.into())),
        };
        if self.setup_complete && self.state.has_progress() && !confirmed {
            return Err(self.reject(GuardRejection::ConfirmationRequired.into()));
        }
        self.install(config);
        self.notify(NoticeLevel::Info, "Match ready. All the best!");
        Ok(&self.config)
    }

    fn install(&mut self, config: MatchConfig) {
        info!(
            batting = %config.batting_team_name(),
            overs = config.overs_limit(),
            "Applying setup"
        );
        self.state = InningsState::new(&config);
        self.config = config;
        self.setup_complete = true;
        self.history.clear();
        self.pending_batter = None;
    }

    /// Rebuilds the innings from the applied configuration.
    ///
    /// An innings with no progress resets without confirmation.
    ///
    /// # Errors
    ///
    /// - [`GuardRejection::SetupIncomplete`] before any setup.
    /// - [`GuardRejection::ConfirmationRequired`] when progress would be lost
    ///   and `confirmed` is false.
    #[instrument(skip(self))]
    pub fn reset_innings(&mut self, confirmed: bool) -> Result<(), ScoringError> {
        self.require_setup()?;
        if self.state.has_progress() && !confirmed {
            return Err(self.reject(GuardRejection::ConfirmationRequired.into()));
        }
        self.state = InningsState::new(&self.config);
        self.history.clear();
        self.pending_batter = None;
        info!("Innings reset");
        self.notify(NoticeLevel::Info, "Innings reset");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Deliveries
    // ─────────────────────────────────────────────────────────────

    /// Records runs off the bat.
    ///
    /// # Errors
    ///
    /// See [`Scorer::deliver`].
    pub fn record_run(&mut self, runs: u8) -> Result<DeliveryReport, ScoringError> {
        self.deliver(Delivery::run(runs))
    }

    /// Records an extra at its default value.
    ///
    /// # Errors
    ///
    /// See [`Scorer::deliver`].
    pub fn record_extra(&mut self, kind: ExtraKind) -> Result<DeliveryReport, ScoringError> {
        self.deliver(Delivery::extra(kind))
    }

    /// Records byes or leg-byes worth `runs`.
    ///
    /// # Errors
    ///
    /// See [`Scorer::deliver`].
    pub fn record_extra_runs(&mut self, kind: ExtraKind, runs: u8) -> Result<DeliveryReport, ScoringError> {
        self.deliver(Delivery::extra_runs(kind, runs))
    }

    /// Records a dismissal of the striker.
    ///
    /// When the bench is empty the report carries [`Incoming::Requested`]
    /// and the scorer refuses deliveries until [`Scorer::supply_batter`].
    ///
    /// # Errors
    ///
    /// See [`Scorer::deliver`].
    pub fn record_wicket(&mut self) -> Result<DeliveryReport, ScoringError> {
        self.deliver(Delivery::Wicket)
    }

    /// Applies one delivery.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::Guard`] when setup is incomplete, a new batter
    /// is awaited, the innings is complete, the value is out of range, or a
    /// run/wicket has no striker. Returns
    /// [`ScoringError::InvariantViolation`] if the transition broke an innings
    /// invariant, in which case the delivery is rolled back.
    #[instrument(skip(self), fields(delivery = %delivery))]
    pub fn deliver(&mut self, delivery: Delivery) -> Result<DeliveryReport, ScoringError> {
        self.require_setup()?;
        if let Some(request) = &self.pending_batter {
            let rejection = GuardRejection::AwaitingBatter(request.default_name().to_string());
            return Err(self.reject(rejection.into()));
        }
        if let Err(e) = DeliveryContract::pre(&self.state, &delivery) {
            return Err(self.reject(e));
        }

        self.history.push(&self.state);
        let report = match delivery::apply(&mut self.state, delivery) {
            Ok(report) => report,
            Err(e) => {
                self.roll_back();
                return Err(self.reject(e.into()));
            }
        };

        #[cfg(any(debug_assertions, feature = "verification"))]
        {
            let postcondition = match self.history.latest() {
                Some(before) => DeliveryContract::post(before.state(), &self.state),
                None => Ok(()),
            };
            if let Err(e) = postcondition {
                self.roll_back();
                return Err(self.reject(e));
            }
        }

        match &report.incoming {
            Incoming::FromBench(name) => {
                self.notify(NoticeLevel::Info, format!("{} to the crease", name));
            }
            Incoming::Requested(request) => {
                info!(default = %request.default_name(), "Awaiting new batter name");
                self.pending_batter = Some(request.clone());
            }
            Incoming::Nobody => {}
        }
        if !self.state.can_deliver_ball() {
            self.notify(NoticeLevel::Info, "Innings complete");
        }
        Ok(report)
    }

    /// Answers an outstanding new-batter request.
    ///
    /// The name is trimmed; a blank name falls back to the request default.
    /// Returns the name used.
    ///
    /// # Errors
    ///
    /// Returns [`GuardRejection::NoBatterRequested`] when nothing is pending.
    #[instrument(skip(self))]
    pub fn supply_batter(&mut self, name: &str) -> Result<String, ScoringError> {
        let Some(request) = self.pending_batter.take() else {
            return Err(self.reject(GuardRejection::NoBatterRequested.into()));
        };
        let admitted = delivery::admit_batter(&mut self.state, &request.resolve(name));
        self.notify(NoticeLevel::Info, format!("{} to the crease", admitted));
        Ok(admitted)
    }

    /// Exchanges strike on request, snapshotting first.
    ///
    /// # Errors
    ///
    /// Returns [`GuardRejection::TwoActiveBattersRequired`] unless both a
    /// striker and a non-striker are at the crease.
    #[instrument(skip(self))]
    pub fn swap_strike(&mut self) -> Result<(), ScoringError> {
        if self.state.striker().is_none() || self.state.non_striker().is_none() {
            return Err(self.reject(GuardRejection::TwoActiveBattersRequired.into()));
        }
        self.snapshot();
        if let Err(e) = delivery::swap_strike(&mut self.state) {
            self.roll_back();
            return Err(self.reject(e.into()));
        }
        Ok(())
    }

    /// Renames the batters at the crease. Blank input keeps a name.
    ///
    /// # Errors
    ///
    /// Returns [`GuardRejection::NoActiveBatter`] when nobody is at the crease.
    #[instrument(skip(self))]
    pub fn update_batter_names(&mut self, striker: &str, non_striker: &str) -> Result<(), ScoringError> {
        if self.state.striker().is_none() && self.state.non_striker().is_none() {
            self.notify(NoticeLevel::Warning, "Add batters via setup first");
            return Err(GuardRejection::NoActiveBatter.into());
        }
        self.snapshot();
        if let Err(e) = delivery::rename_batters(&mut self.state, striker, non_striker) {
            self.roll_back();
            return Err(self.reject(e.into()));
        }
        self.notify(NoticeLevel::Info, "Batters updated");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Undo
    // ─────────────────────────────────────────────────────────────

    /// Restores the innings as it was before the last mutating operation.
    ///
    /// A batter request outstanding in the restored innings is raised again.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::EmptyHistory`] when there is nothing to undo.
    #[instrument(skip(self), fields(depth = self.history.len()))]
    pub fn undo(&mut self) -> Result<(), ScoringError> {
        let Some(snapshot) = self.history.pop() else {
            return Err(self.reject(ScoringError::EmptyHistory));
        };
        self.state = snapshot.into_state();
        self.pending_batter = delivery::outstanding_request(&self.state);
        info!(
            runs = self.state.runs(),
            balls = self.state.balls_bowled(),
            awaiting_batter = self.pending_batter.is_some(),
            "Undo"
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Helpers
    // ─────────────────────────────────────────────────────────────

    fn require_setup(&mut self) -> Result<(), ScoringError> {
        if self.setup_complete {
            Ok(())
        } else {
            Err(self.reject(GuardRejection::SetupIncomplete.into()))
        }
    }

    fn snapshot(&mut self) {
        if self.setup_complete {
            self.history.push(&self.state);
        }
    }

    fn roll_back(&mut self) {
        if let Some(snapshot) = self.history.pop() {
            self.state = snapshot.into_state();
        }
    }

    fn reject(&mut self, error: ScoringError) -> ScoringError {
        warn!(kind = %error.kind(), reason = %error, "Operation rejected");
        self.notify(NoticeLevel::Warning, error.to_string());
        error
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push_back(Notice {
            level,
            message: message.into(),
        });
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_awaiting_setup_rejects_deliveries() {
        let mut scorer = Scorer::new();
        assert_eq!(scorer.status(), LiveStatus::AwaitingSetup);
        assert_eq!(
            scorer.record_run(1),
            Err(GuardRejection::SetupIncomplete.into())
        );
        assert_eq!(scorer.state().runs(), 0);
        assert_eq!(scorer.undo_depth(), 0);
        let notices = scorer.drain_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Complete match setup first");
        assert_eq!(notices[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn test_rejected_delivery_does_not_snapshot() {
        let mut scorer = Scorer::with_config(MatchConfig::default());
        assert!(scorer.record_run(9).is_err());
        assert_eq!(scorer.undo_depth(), 0);
        scorer.record_run(2).unwrap();
        assert_eq!(scorer.undo_depth(), 1);
    }

    #[test]
    fn test_pending_batter_blocks_and_undo_clears_it() {
        let mut scorer = Scorer::with_config(MatchConfig::default());
        scorer.record_wicket().unwrap();
        assert!(scorer.pending_batter().is_some());
        assert!(matches!(
            scorer.record_run(1),
            Err(ScoringError::Guard(GuardRejection::AwaitingBatter(_)))
        ));

        scorer.undo().unwrap();
        assert!(scorer.pending_batter().is_none());
        assert_eq!(scorer.state().wickets(), 0);
    }

    #[test]
    fn test_supply_without_request() {
        let mut scorer = Scorer::with_config(MatchConfig::default());
        assert_eq!(
            scorer.supply_batter("Zed"),
            Err(GuardRejection::NoBatterRequested.into())
        );
    }

    #[test]
    fn test_reset_needs_confirmation_after_progress() {
        let mut scorer = Scorer::with_config(MatchConfig::default());
        scorer.reset_innings(false).unwrap();
        scorer.record_run(4).unwrap();
        assert_eq!(
            scorer.reset_innings(false),
            Err(GuardRejection::ConfirmationRequired.into())
        );
        assert_eq!(scorer.state().runs(), 4);
        scorer.reset_innings(true).unwrap();
        assert_eq!(scorer.state().runs(), 0);
        assert_eq!(scorer.undo_depth(), 0);
    }
}
