//! Delivery engine: ball events and the transitions they drive.
//!
//! Deliveries are domain events. A [`Delivery`] can be validated against an
//! innings (see [`crate::contracts`]) before it is applied, logged, and
//! replayed. The transition functions here assume the preconditions hold and
//! still refuse, rather than panic, when they do not.

use crate::analytics::format_overs;
use crate::error::GuardRejection;
use crate::innings::{
    BALLS_PER_OVER, BallOutcome, Batter, ExtraKind, FallOfWicket, InningsState, MAX_WICKETS,
    POWERPLAY_BALLS, Partnership,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Highest value a single delivery can carry.
pub const MAX_RUNS_PER_BALL: u8 = 6;

/// One ball event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    /// Runs off the bat.
    Run(u8),
    /// Extras of the given kind.
    Extra {
        /// Kind of extra.
        kind: ExtraKind,
        /// Runs awarded.
        runs: u8,
    },
    /// Striker dismissed.
    Wicket,
}

impl Delivery {
    /// Runs off the bat.
    pub fn run(runs: u8) -> Self {
        Delivery::Run(runs)
    }

    /// An extra at its default value (5 for penalty, 1 otherwise).
    pub fn extra(kind: ExtraKind) -> Self {
        Delivery::Extra {
            kind,
            runs: kind.default_runs() as u8,
        }
    }

    /// Byes or leg-byes worth `runs`.
    pub fn extra_runs(kind: ExtraKind, runs: u8) -> Self {
        Delivery::Extra { kind, runs }
    }

    /// Ball-by-ball label.
    pub fn label(&self) -> String {
        match self {
            Delivery::Run(0) => "•".to_string(),
            Delivery::Run(n) => n.to_string(),
            Delivery::Extra { kind, runs } => kind.label(u32::from(*runs)),
            Delivery::Wicket => "W".to_string(),
        }
    }

    /// Whether the delivery counts toward the over.
    pub fn is_legal(&self) -> bool {
        match self {
            Delivery::Run(_) | Delivery::Wicket => true,
            Delivery::Extra { kind, .. } => kind.counts_as_legal(),
        }
    }
}

impl std::fmt::Display for Delivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Outstanding request for the incoming batter's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatterRequest {
    default_name: String,
}

impl BatterRequest {
    pub(crate) fn new(default_name: String) -> Self {
        Self { default_name }
    }

    /// Name used when the collaborator supplies nothing usable.
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Resolves a supplied name: trimmed, or the default when blank.
    pub fn resolve(&self, supplied: &str) -> String {
        let trimmed = supplied.trim();
        if trimmed.is_empty() {
            self.default_name.clone()
        } else {
            trimmed.to_string()
        }
    }
}

/// Who walks out after a wicket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Incoming {
    /// Nobody: the innings is over or no wicket fell.
    Nobody,
    /// The next bench player, already at the crease.
    FromBench(String),
    /// The bench is empty; a name must be supplied.
    Requested(BatterRequest),
}

/// What a delivery did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    /// The delivery applied.
    pub delivery: Delivery,
    /// Whether it completed an over.
    pub over_completed: bool,
    /// Incoming batter after a wicket.
    pub incoming: Incoming,
}

/// Applies one delivery to the innings.
///
/// # Errors
///
/// Returns [`GuardRejection::NoActiveBatter`] when a run or wicket has no
/// striker to credit. Other preconditions are the caller's to check through
/// [`crate::contracts::DeliveryContract`].
#[instrument(skip(state), fields(delivery = %delivery, balls = state.balls_bowled))]
pub fn apply(state: &mut InningsState, delivery: Delivery) -> Result<DeliveryReport, GuardRejection> {
    let (over_completed, incoming) = match delivery {
        Delivery::Run(runs) => (apply_run(state, runs)?, Incoming::Nobody),
        Delivery::Extra { kind, runs } => (apply_extra(state, kind, u32::from(runs)), Incoming::Nobody),
        Delivery::Wicket => apply_wicket(state)?,
    };
    debug!(
        runs = state.runs,
        wickets = state.wickets,
        balls = state.balls_bowled,
        over_completed,
        "Delivery applied"
    );
    Ok(DeliveryReport {
        delivery,
        over_completed,
        incoming,
    })
}

fn apply_run(state: &mut InningsState, runs: u8) -> Result<bool, GuardRejection> {
    let striker = state.striker_index().ok_or(GuardRejection::NoActiveBatter)?;
    let ball_before = state.balls_bowled;
    let value = u32::from(runs);

    state.runs += value;
    let batter = &mut state.batters[striker];
    batter.runs += value;
    batter.balls += 1;
    match runs {
        4 => batter.fours += 1,
        6 => batter.sixes += 1,
        _ => {}
    }
    state.partnership.runs += value;
    state.partnership.balls += 1;
    accrue_powerplay(state, ball_before, value, false, true);

    let boundary = runs == 4 || runs == 6;
    state.register_ball(
        BallOutcome::new(Delivery::Run(runs).label(), boundary, false),
        value,
        true,
    );

    let strike_changed = value % 2 == 1;
    if strike_changed {
        state.rotate_strike();
    }
    Ok(finalize_delivery(state, true, strike_changed))
}

fn apply_extra(state: &mut InningsState, kind: ExtraKind, runs: u32) -> bool {
    let ball_before = state.balls_bowled;
    let legal = kind.counts_as_legal();

    state.runs += runs;
    state.extras.add(kind, runs);

    let mut strike_changed = false;
    if legal {
        if let Some(striker) = state.striker_index() {
            state.batters[striker].balls += 1;
        }
        state.partnership.runs += runs;
        state.partnership.balls += 1;
        strike_changed = runs % 2 == 1;
    }

    accrue_powerplay(state, ball_before, runs, false, legal);
    state.register_ball(BallOutcome::new(kind.label(runs), false, false), runs, legal);

    if strike_changed {
        state.rotate_strike();
    }
    finalize_delivery(state, legal, strike_changed)
}

fn apply_wicket(state: &mut InningsState) -> Result<(bool, Incoming), GuardRejection> {
    let striker = state.striker_index().ok_or(GuardRejection::NoActiveBatter)?;
    let ball_before = state.balls_bowled;
    let overs_before = format_overs(ball_before);

    let batter = &mut state.batters[striker];
    batter.status = crate::innings::BatterStatus::Out;
    batter.strike = false;
    batter.balls += 1;
    let dismissed = batter.name.clone();

    state.partnership.balls += 1;
    state.wickets += 1;
    let record = FallOfWicket::new(state.runs, state.wickets, dismissed, overs_before);
    info!(fall = %record, "Wicket");
    state.fall_of_wickets.push(record);

    accrue_powerplay(state, ball_before, 0, true, true);
    state.register_ball(BallOutcome::new("W".to_string(), false, true), 0, true);

    let over_completed = finalize_delivery(state, true, false);
    state.partnership = Partnership::default();

    let incoming = if state.wickets < MAX_WICKETS {
        next_batter(state)
    } else {
        info!(runs = state.runs, "All out");
        Incoming::Nobody
    };
    Ok((over_completed, incoming))
}

/// Sends in the next bench player, or asks for a name when the bench is empty.
fn next_batter(state: &mut InningsState) -> Incoming {
    let default_name = format!("Batter {}", state.batters.len() + 1);
    match state.bench.pop_front() {
        Some(name) => {
            let request = BatterRequest::new(default_name);
            let admitted = admit_batter(state, &request.resolve(&name));
            Incoming::FromBench(admitted)
        }
        None => {
            debug!(default = %default_name, "Bench empty, requesting name");
            Incoming::Requested(BatterRequest::new(default_name))
        }
    }
}

/// The batter request a state is waiting on, if any.
///
/// A request is outstanding when wickets remain, the bench is empty and
/// nobody is on strike.
pub(crate) fn outstanding_request(state: &InningsState) -> Option<BatterRequest> {
    if state.wickets < MAX_WICKETS && state.bench.is_empty() && state.striker().is_none() {
        Some(BatterRequest::new(format!("Batter {}", state.batters.len() + 1)))
    } else {
        None
    }
}

/// Adds a not-out batter on strike and forces every other not-out batter off strike.
pub(crate) fn admit_batter(state: &mut InningsState, name: &str) -> String {
    for batter in state.batters.iter_mut().filter(|b| b.is_not_out()) {
        batter.strike = false;
    }
    state.batters.push(Batter::new(name, true));
    info!(batter = name, "New batter to the crease");
    name.to_string()
}

/// Counts a legal ball and closes the over when it is the sixth.
///
/// Returns whether an over was completed. End-of-over rotation is skipped
/// when the delivery itself already changed strike.
fn finalize_delivery(state: &mut InningsState, legal: bool, strike_changed: bool) -> bool {
    if !legal {
        return false;
    }
    state.balls_bowled += 1;
    if state.balls_bowled % BALLS_PER_OVER != 0 {
        return false;
    }

    let over_runs: u32 = state.current_over.iter().map(|ball| *ball.runs()).sum();
    state.over_history.push(over_runs);
    state.current_over.clear();
    debug!(over = state.over_history.len(), over_runs, "Over complete");

    if !strike_changed && state.wickets < MAX_WICKETS {
        state.rotate_strike();
    }
    true
}

fn accrue_powerplay(state: &mut InningsState, ball_before: u32, runs: u32, wicket: bool, legal: bool) {
    if ball_before >= POWERPLAY_BALLS {
        return;
    }
    state.powerplay.runs += runs;
    if wicket {
        state.powerplay.wickets += 1;
    }
    if legal {
        state.powerplay.balls += 1;
    }
}

/// Exchanges strike between the two batters at the crease.
///
/// # Errors
///
/// Returns [`GuardRejection::TwoActiveBattersRequired`] unless both a striker
/// and a non-striker are present.
pub fn swap_strike(state: &mut InningsState) -> Result<(), GuardRejection> {
    let (Some(striker), Some(non_striker)) = (state.striker_index(), state.non_striker_index())
    else {
        return Err(GuardRejection::TwoActiveBattersRequired);
    };
    state.batters[striker].strike = false;
    state.batters[non_striker].strike = true;
    Ok(())
}

/// Renames the batters at the crease; blank input keeps the existing name.
///
/// # Errors
///
/// Returns [`GuardRejection::NoActiveBatter`] when nobody is at the crease.
pub fn rename_batters(
    state: &mut InningsState,
    striker_name: &str,
    non_striker_name: &str,
) -> Result<(), GuardRejection> {
    let striker = state.striker_index();
    let non_striker = state.non_striker_index();
    if striker.is_none() && non_striker.is_none() {
        return Err(GuardRejection::NoActiveBatter);
    }
    for (index, name) in [(striker, striker_name), (non_striker, non_striker_name)] {
        let name = name.trim();
        if let Some(i) = index
            && !name.is_empty()
        {
            state.batters[i].name = name.to_string();
        }
    }
    Ok(())
}
