//! Derived innings figures.
//!
//! Everything here is a pure function of [`InningsState`]; nothing is cached.

use crate::innings::{BALLS_PER_OVER, InningsState};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Placeholder shown for figures that do not apply.
pub const NOT_APPLICABLE: &str = "—";

/// Formats a ball count as `"<overs>.<balls>"`.
pub fn format_overs(balls: u32) -> String {
    format!("{}.{}", balls / BALLS_PER_OVER, balls % BALLS_PER_OVER)
}

/// Where the innings stands for the status tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum LiveStatus {
    /// Deliveries are being accepted.
    Live {
        /// Overs in the innings.
        overs_limit: u32,
    },
    /// Overs or wickets exhausted.
    InningsComplete,
    /// No setup applied yet.
    AwaitingSetup,
}

impl LiveStatus {
    /// Status for a scorer with the given setup flag.
    pub fn of(state: &InningsState, setup_complete: bool) -> Self {
        if !setup_complete {
            LiveStatus::AwaitingSetup
        } else if state.can_deliver_ball() {
            LiveStatus::Live {
                overs_limit: state.overs_limit(),
            }
        } else {
            LiveStatus::InningsComplete
        }
    }

    /// True while deliveries are accepted.
    pub fn is_live(&self) -> bool {
        matches!(self, LiveStatus::Live { .. })
    }
}

impl std::fmt::Display for LiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiveStatus::Live { overs_limit } => write!(f, "Live • {} Overs", overs_limit),
            LiveStatus::InningsComplete => write!(f, "Innings Complete"),
            LiveStatus::AwaitingSetup => write!(f, "Awaiting Toss"),
        }
    }
}

/// Required run rate, when one makes sense.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredRate {
    /// Runs per over needed.
    Rate(f64),
    /// Not chasing, target reached, or no balls left.
    NotApplicable,
}

impl std::fmt::Display for RequiredRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequiredRate::Rate(rate) => write!(f, "{:.2}", rate),
            RequiredRate::NotApplicable => write!(f, "{}", NOT_APPLICABLE),
        }
    }
}

/// Read-only figures derived from an innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InningsAnalytics {
    /// Overs bowled, `"<whole>.<balls>"`.
    pub overs: String,
    /// Runs per over.
    pub run_rate: f64,
    /// Run rate extended over the full allocation.
    pub projected_score: u32,
    /// Legal balls left.
    pub balls_remaining: u32,
    /// Balls left formatted as overs.
    pub overs_remaining: String,
    /// Runs still needed, floored at zero; `None` unless chasing.
    pub required_runs: Option<u32>,
    /// Runs per over needed.
    pub required_rate: RequiredRate,
    /// `"<runs> (<balls>)"`.
    pub partnership: String,
    /// `"<runs>/<wickets> (<overs>)"`.
    pub powerplay: String,
    /// `"<total> (<b>b, <lb>lb, <nb>nb, <wd>wd, <p>p)"`.
    pub extras: String,
    /// `"<runs>/<wickets> in <overs>"`.
    pub projected_finish: String,
    /// `"Chase"` or `"1st Innings"`.
    pub innings_label: String,
    /// Status tag.
    pub status: LiveStatus,
}

impl InningsAnalytics {
    /// Derives every figure from `state`.
    #[instrument(skip(state), fields(runs = state.runs(), balls = state.balls_bowled()))]
    pub fn project(state: &InningsState, status: LiveStatus) -> Self {
        let run_rate = run_rate(state.runs(), state.balls_bowled());
        let projected_score = (run_rate * f64::from(state.overs_limit())).round() as u32;
        let balls_remaining = state.balls_remaining();

        let required_runs = is_chase(state).then(|| state.target().saturating_sub(state.runs()));
        let required_rate = match required_runs {
            Some(needed) if needed > 0 && balls_remaining > 0 => RequiredRate::Rate(
                f64::from(needed) * f64::from(BALLS_PER_OVER) / f64::from(balls_remaining),
            ),
            _ => RequiredRate::NotApplicable,
        };

        let partnership = state.partnership();
        let powerplay = state.powerplay();
        let extras = state.extras();

        Self {
            overs: format_overs(state.balls_bowled()),
            run_rate,
            projected_score,
            balls_remaining,
            overs_remaining: format_overs(balls_remaining),
            required_runs,
            required_rate,
            partnership: format!("{} ({})", partnership.runs, partnership.balls),
            powerplay: format!(
                "{}/{} ({:.1})",
                powerplay.runs,
                powerplay.wickets,
                f64::from(powerplay.balls) / f64::from(BALLS_PER_OVER)
            ),
            extras: format!(
                "{} ({}b, {}lb, {}nb, {}wd, {}p)",
                extras.total(),
                extras.bye,
                extras.leg_bye,
                extras.no_ball,
                extras.wide,
                extras.penalty
            ),
            projected_finish: format!(
                "{}/{} in {}",
                state.runs(),
                state.wickets(),
                format_overs(state.balls_bowled())
            ),
            innings_label: if is_chase(state) { "Chase" } else { "1st Innings" }.to_string(),
            status,
        }
    }

    /// Run rate to two decimals.
    pub fn run_rate_display(&self) -> String {
        format!("{:.2}", self.run_rate)
    }

    /// Required runs, or the placeholder.
    pub fn required_runs_display(&self) -> String {
        self.required_runs
            .map_or_else(|| NOT_APPLICABLE.to_string(), |r| r.to_string())
    }
}

fn is_chase(state: &InningsState) -> bool {
    state.chasing() && state.target() > 0
}

fn run_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        0.0
    } else {
        f64::from(runs) / (f64::from(balls) / f64::from(BALLS_PER_OVER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;

    #[test]
    fn test_format_overs() {
        assert_eq!(format_overs(0), "0.0");
        assert_eq!(format_overs(5), "0.5");
        assert_eq!(format_overs(6), "1.0");
        assert_eq!(format_overs(93), "15.3");
    }

    #[test]
    fn test_fresh_innings_figures() {
        let state = InningsState::new(&MatchConfig::default());
        let view = InningsAnalytics::project(&state, LiveStatus::of(&state, true));
        assert_eq!(view.overs, "0.0");
        assert_eq!(view.run_rate_display(), "0.00");
        assert_eq!(view.projected_score, 0);
        assert_eq!(view.balls_remaining, 120);
        assert_eq!(view.overs_remaining, "20.0");
        assert_eq!(view.required_runs, None);
        assert_eq!(view.required_runs_display(), NOT_APPLICABLE);
        assert_eq!(view.required_rate, RequiredRate::NotApplicable);
        assert_eq!(view.partnership, "0 (0)");
        assert_eq!(view.powerplay, "0/0 (0.0)");
        assert_eq!(view.extras, "0 (0b, 0lb, 0nb, 0wd, 0p)");
        assert_eq!(view.innings_label, "1st Innings");
        assert_eq!(view.status.to_string(), "Live • 20 Overs");
    }

    #[test]
    fn test_projection_from_rate() {
        let mut state = InningsState::new(&MatchConfig::default());
        state.runs = 47;
        state.balls_bowled = 36;
        let view = InningsAnalytics::project(&state, LiveStatus::of(&state, true));
        assert_eq!(view.overs, "6.0");
        assert_eq!(view.run_rate_display(), "7.83");
        assert_eq!(view.projected_score, 157);
    }

    #[test]
    fn test_status_tags() {
        let mut state = InningsState::new(&MatchConfig::default());
        assert_eq!(LiveStatus::of(&state, false), LiveStatus::AwaitingSetup);
        state.balls_bowled = state.ball_limit();
        assert_eq!(LiveStatus::of(&state, true), LiveStatus::InningsComplete);
        assert_eq!(LiveStatus::InningsComplete.to_string(), "Innings Complete");
    }
}
