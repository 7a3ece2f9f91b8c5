//! Ball limit invariant: the innings never overruns its overs or wickets.

use super::Invariant;
use crate::innings::{InningsState, MAX_WICKETS};

/// Invariant: `balls_bowled <= overs_limit * 6` and `wickets <= 10`.
pub struct BallLimitInvariant;

impl Invariant<InningsState> for BallLimitInvariant {
    fn holds(state: &InningsState) -> bool {
        state.balls_bowled() <= state.ball_limit() && state.wickets() <= MAX_WICKETS
    }

    fn description() -> &'static str {
        "Balls bowled within the over limit and at most ten wickets"
    }
}
