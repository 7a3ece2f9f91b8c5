//! Over ledger invariant: completed overs and the over in progress agree
//! with the legal ball count.

use super::Invariant;
use crate::innings::{BALLS_PER_OVER, InningsState};

/// Invariant: one `over_history` entry per completed over, and the current
/// over holds exactly `balls_bowled % 6` legal deliveries.
pub struct OverLedgerInvariant;

impl Invariant<InningsState> for OverLedgerInvariant {
    fn holds(state: &InningsState) -> bool {
        let completed = state.balls_bowled() / BALLS_PER_OVER;
        let in_progress = state.current_over().iter().filter(|b| *b.counts()).count();
        state.over_history().len() == completed as usize
            && in_progress == (state.balls_bowled() % BALLS_PER_OVER) as usize
    }

    fn description() -> &'static str {
        "Over history and current over match the legal ball count"
    }
}
