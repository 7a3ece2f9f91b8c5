//! Strike invariant: one striker and one non-striker at most.

use super::Invariant;
use crate::innings::InningsState;

/// Invariant: at most one not-out batter holds strike and at most one does not.
pub struct StrikeInvariant;

impl Invariant<InningsState> for StrikeInvariant {
    fn holds(state: &InningsState) -> bool {
        let batters = state.batters();
        let strikers = batters.iter().filter(|b| b.is_striker()).count();
        let non_strikers = batters.iter().filter(|b| b.is_non_striker()).count();
        strikers <= 1 && non_strikers <= 1
    }

    fn description() -> &'static str {
        "At most one striker and one non-striker at the crease"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Delivery, MatchConfig, RawSetup, delivery};

    #[test]
    fn test_holds_through_wickets() {
        let players: Vec<String> = (1..=4).map(|i| format!("P{}", i)).collect();
        let config = MatchConfig::from_raw(RawSetup::default().with_team_one_players(players)).unwrap();
        let mut state = InningsState::new(&config);
        for ball in [Delivery::run(1), Delivery::Wicket, Delivery::run(2), Delivery::Wicket] {
            delivery::apply(&mut state, ball).unwrap();
            assert!(StrikeInvariant::holds(&state));
        }
        assert_eq!(state.not_out_count(), 2);
    }

    #[test]
    fn test_two_strikers_violate() {
        let mut state = InningsState::new(&MatchConfig::default());
        state.batters[1].strike = true;
        assert!(!StrikeInvariant::holds(&state));
    }
}
