//! Score ledger invariant: the team total is batter runs plus extras.

use super::Invariant;
use crate::innings::InningsState;

/// Invariant: `runs == sum(batter runs) + extras total`.
pub struct ScoreLedgerInvariant;

impl Invariant<InningsState> for ScoreLedgerInvariant {
    fn holds(state: &InningsState) -> bool {
        let off_the_bat: u32 = state.batters().iter().map(|b| b.runs()).sum();
        state.runs() == off_the_bat + state.extras().total()
    }

    fn description() -> &'static str {
        "Team runs equal batter runs plus extras"
    }
}
