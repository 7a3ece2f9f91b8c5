//! Contract-based validation for deliveries.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} delivery {Q}. The scorer checks `pre` before it snapshots anything, so
//! a rejected delivery never touches state or history.

use crate::delivery::{Delivery, MAX_RUNS_PER_BALL};
use crate::error::{GuardRejection, ScoringError};
use crate::innings::InningsState;
use crate::invariants::{InningsInvariants, InvariantSet};
use tracing::{instrument, warn};

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), ScoringError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), ScoringError>;
}

/// Precondition: overs and wickets remain.
pub struct InningsLive;

impl InningsLive {
    /// Rejects once the innings is complete.
    #[instrument(skip(state))]
    pub fn check(state: &InningsState) -> Result<(), GuardRejection> {
        if state.can_deliver_ball() {
            Ok(())
        } else {
            Err(GuardRejection::InningsComplete)
        }
    }
}

/// Precondition: a not-out batter is on strike.
pub struct StrikerPresent;

impl StrikerPresent {
    /// Rejects when no striker is at the crease.
    #[instrument(skip(state))]
    pub fn check(state: &InningsState) -> Result<(), GuardRejection> {
        state
            .striker()
            .map(|_| ())
            .ok_or(GuardRejection::NoActiveBatter)
    }
}

/// Precondition: the delivery carries a value its kind allows.
pub struct ValueInRange;

impl ValueInRange {
    /// Runs 0..=6; byes and leg-byes 1..=6; other extras at their fixed value.
    #[instrument]
    pub fn check(delivery: &Delivery) -> Result<(), GuardRejection> {
        match *delivery {
            Delivery::Run(runs) if runs > MAX_RUNS_PER_BALL => Err(GuardRejection::InvalidRuns(runs)),
            Delivery::Extra { kind, runs } if kind.accepts_variable_runs() => {
                if (1..=MAX_RUNS_PER_BALL).contains(&runs) {
                    Ok(())
                } else {
                    Err(GuardRejection::InvalidRuns(runs))
                }
            }
            Delivery::Extra { kind, runs } if u32::from(runs) != kind.default_runs() => {
                Err(GuardRejection::FixedExtraValue(kind))
            }
            _ => Ok(()),
        }
    }
}

/// Composite precondition for a delivery.
pub struct LegalDelivery;

impl LegalDelivery {
    /// Validates every precondition for `delivery`.
    #[instrument(skip(state))]
    pub fn check(delivery: &Delivery, state: &InningsState) -> Result<(), GuardRejection> {
        InningsLive::check(state)?;
        ValueInRange::check(delivery)?;
        match delivery {
            Delivery::Run(_) | Delivery::Wicket => StrikerPresent::check(state),
            Delivery::Extra { .. } => Ok(()),
        }
    }
}

/// Contract for deliveries.
///
/// Preconditions:
/// - Innings still live
/// - Value allowed for the delivery kind
/// - Striker present for runs and wickets
///
/// Postconditions:
/// - Every [`InningsInvariants`] member holds
/// - Balls, runs and wickets never decrease
pub struct DeliveryContract;

impl Contract<InningsState, Delivery> for DeliveryContract {
    fn pre(state: &InningsState, delivery: &Delivery) -> Result<(), ScoringError> {
        LegalDelivery::check(delivery, state).map_err(|e| {
            warn!(%delivery, reason = %e, "Delivery rejected");
            ScoringError::from(e)
        })
    }

    fn post(before: &InningsState, after: &InningsState) -> Result<(), ScoringError> {
        let mut descriptions = match InningsInvariants::check_all(after) {
            Ok(()) => Vec::new(),
            Err(violations) => violations.into_iter().map(|v| v.description).collect(),
        };
        if after.balls_bowled() < before.balls_bowled()
            || after.runs() < before.runs()
            || after.wickets() < before.wickets()
        {
            descriptions.push("Innings counters never decrease".to_string());
        }
        if descriptions.is_empty() {
            Ok(())
        } else {
            let joined = descriptions.join("; ");
            warn!(violations = %joined, "Postcondition failed");
            Err(ScoringError::InvariantViolation(format!(
                "Postcondition failed: {}",
                joined
            )))
        }
    }
}
