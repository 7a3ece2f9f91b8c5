//! Read-only scoreboard view.
//!
//! A [`Scoreboard`] is a plain, serializable capture of everything a display
//! needs. It owns its data, so a renderer never borrows the scorer.

use crate::analytics::{InningsAnalytics, LiveStatus};
use crate::config::MatchInfo;
use crate::delivery::BatterRequest;
use crate::innings::{BallOutcome, Batter};
use crate::scorer::Scorer;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::instrument;

/// Completed-over totals shown on the board.
pub const RECENT_OVERS: usize = 6;

/// One line of the batting card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct BatterRow {
    /// Name, with `" •"` appended for the striker.
    name: String,
    /// `"Not out"`, `"Out"`, or `"Yet to bat"`.
    status: String,
    /// Runs scored.
    runs: u32,
    /// Balls faced.
    balls: u32,
    /// Fours hit.
    fours: u32,
    /// Sixes hit.
    sixes: u32,
    /// Strike rate to one decimal.
    strike_rate: String,
}

impl BatterRow {
    fn from_batter(batter: &Batter) -> Self {
        let marker = if batter.is_striker() { " •" } else { "" };
        Self {
            name: format!("{}{}", batter.name(), marker),
            status: batter.status().to_string(),
            runs: batter.runs(),
            balls: batter.balls(),
            fours: batter.fours(),
            sixes: batter.sixes(),
            strike_rate: format!("{:.1}", batter.strike_rate()),
        }
    }

    fn yet_to_bat(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: "Yet to bat".to_string(),
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            strike_rate: format!("{:.1}", 0.0),
        }
    }
}

/// Everything the board shows at one moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Scoreboard {
    info: MatchInfo,
    batting_team: String,
    bowling_team: String,
    runs: u32,
    wickets: u32,
    target: Option<u32>,
    analytics: InningsAnalytics,
    last_balls: Vec<BallOutcome>,
    batters: Vec<BatterRow>,
    fall_of_wickets: Vec<String>,
    current_over: Vec<String>,
    recent_overs: Vec<u32>,
    status: LiveStatus,
    pending_batter: Option<BatterRequest>,
}

impl Scoreboard {
    /// Captures the board for `scorer`.
    #[instrument(skip(scorer))]
    pub fn capture(scorer: &Scorer) -> Self {
        let state = scorer.state();
        let status = scorer.status();

        let mut batters: Vec<BatterRow> = state.batters().iter().map(BatterRow::from_batter).collect();
        batters.extend(state.bench().iter().map(|name| BatterRow::yet_to_bat(name)));

        let history = state.over_history();
        let recent_overs = history[history.len().saturating_sub(RECENT_OVERS)..].to_vec();

        Self {
            info: state.info().clone(),
            batting_team: state.batting_team().to_string(),
            bowling_team: state.bowling_team().to_string(),
            runs: state.runs(),
            wickets: state.wickets(),
            target: (state.chasing() && state.target() > 0).then(|| state.target()),
            analytics: InningsAnalytics::project(state, status),
            last_balls: state.last_balls().iter().cloned().collect(),
            batters,
            fall_of_wickets: state.fall_of_wickets().iter().map(ToString::to_string).collect(),
            current_over: state.current_over().iter().map(|ball| ball.label().clone()).collect(),
            recent_overs,
            status,
            pending_batter: scorer.pending_batter().cloned(),
        }
    }

    /// `"<runs>/<wickets>"`.
    pub fn score(&self) -> String {
        format!("{}/{}", self.runs, self.wickets)
    }

    /// Plain-text rendering for terminals.
    pub fn render_text(&self) -> String {
        let a = &self.analytics;
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{} | {} | {} | {}",
            self.info.match_type(),
            self.info.title(),
            self.info.venue(),
            self.info.time()
        );
        let _ = writeln!(out, "[{}]", self.status);
        let _ = writeln!(
            out,
            "{} {} ({} ov) v {}",
            self.batting_team,
            self.score(),
            a.overs,
            self.bowling_team
        );
        let _ = writeln!(
            out,
            "{} | CRR {} | Projected {}",
            a.innings_label,
            a.run_rate_display(),
            a.projected_score
        );
        if let Some(target) = self.target {
            let _ = writeln!(
                out,
                "Target {} | Need {} | RRR {} | {} balls left",
                target,
                a.required_runs_display(),
                a.required_rate,
                a.balls_remaining
            );
        }
        let _ = writeln!(
            out,
            "Partnership {} | Powerplay {} | Extras {}",
            a.partnership, a.powerplay, a.extras
        );

        let _ = writeln!(out);
        let _ = writeln!(out, "{:<22} {:<10} {:>4} {:>4} {:>3} {:>3} {:>6}", "Batter", "", "R", "B", "4s", "6s", "SR");
        for row in &self.batters {
            let _ = writeln!(
                out,
                "{:<22} {:<10} {:>4} {:>4} {:>3} {:>3} {:>6}",
                row.name, row.status, row.runs, row.balls, row.fours, row.sixes, row.strike_rate
            );
        }

        let labels: Vec<&str> = self.last_balls.iter().map(|b| b.label().as_str()).collect();
        let _ = writeln!(out);
        let _ = writeln!(out, "Last balls: {}", labels.join(" "));
        let _ = writeln!(out, "This over: {}", self.current_over.join(" "));
        let recent: Vec<String> = self.recent_overs.iter().map(u32::to_string).collect();
        let _ = writeln!(out, "Recent overs: {}", recent.join(" "));
        if !self.fall_of_wickets.is_empty() {
            let _ = writeln!(out, "FoW: {}", self.fall_of_wickets.join(", "));
        }
        if let Some(request) = &self.pending_batter {
            let _ = writeln!(out, "New batter required (default {})", request.default_name());
        }
        out
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render_text())
    }
}
