//! First-class invariants for an innings.
//!
//! Invariants are properties every reachable [`InningsState`] satisfies.
//! They are checked after each delivery in debug builds and can be tested
//! independently.
//!
//! [`InningsState`]: crate::InningsState

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples of two to four invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

pub mod ball_limit;
pub mod over_ledger;
pub mod score_ledger;
pub mod strike;

pub use ball_limit::BallLimitInvariant;
pub use over_ledger::OverLedgerInvariant;
pub use score_ledger::ScoreLedgerInvariant;
pub use strike::StrikeInvariant;

/// Every innings invariant as a composable set.
pub type InningsInvariants = (
    BallLimitInvariant,
    StrikeInvariant,
    OverLedgerInvariant,
    ScoreLedgerInvariant,
);
