//! Innings model: the canonical mutable state of one innings.
//!
//! The delivery engine owns every mutation; everything else reads through the
//! accessors here.

use crate::config::{MatchConfig, MatchInfo};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::instrument;

/// Legal deliveries per over.
pub const BALLS_PER_OVER: u32 = 6;

/// Wickets that end an innings.
pub const MAX_WICKETS: u32 = 10;

/// Legal deliveries covered by the powerplay.
pub const POWERPLAY_BALLS: u32 = 36;

/// Size of the recent-ball window.
pub const LAST_BALLS_WINDOW: usize = 6;

/// Whether a batter is still at the crease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatterStatus {
    /// At the crease.
    NotOut,
    /// Dismissed.
    Out,
}

impl std::fmt::Display for BatterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatterStatus::NotOut => write!(f, "Not out"),
            BatterStatus::Out => write!(f, "Out"),
        }
    }
}

/// One batter's innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batter {
    pub(crate) name: String,
    pub(crate) runs: u32,
    pub(crate) balls: u32,
    pub(crate) fours: u32,
    pub(crate) sixes: u32,
    pub(crate) status: BatterStatus,
    pub(crate) strike: bool,
}

impl Batter {
    /// Creates a not-out batter with no runs.
    pub fn new(name: impl Into<String>, strike: bool) -> Self {
        Self {
            name: name.into(),
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            status: BatterStatus::NotOut,
            strike,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs scored off the bat.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Balls faced.
    pub fn balls(&self) -> u32 {
        self.balls
    }

    /// Fours hit.
    pub fn fours(&self) -> u32 {
        self.fours
    }

    /// Sixes hit.
    pub fn sixes(&self) -> u32 {
        self.sixes
    }

    /// Current status.
    pub fn status(&self) -> BatterStatus {
        self.status
    }

    /// Whether this batter holds the strike flag.
    pub fn strike(&self) -> bool {
        self.strike
    }

    /// True while at the crease.
    pub fn is_not_out(&self) -> bool {
        self.status == BatterStatus::NotOut
    }

    /// Not out and on strike.
    pub fn is_striker(&self) -> bool {
        self.is_not_out() && self.strike
    }

    /// Not out and off strike.
    pub fn is_non_striker(&self) -> bool {
        self.is_not_out() && !self.strike
    }

    /// Runs per hundred balls, 0.0 before the first ball.
    pub fn strike_rate(&self) -> f64 {
        if self.balls == 0 {
            0.0
        } else {
            f64::from(self.runs) / f64::from(self.balls) * 100.0
        }
    }
}

/// Kinds of extras.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum ExtraKind {
    /// Wide ball.
    #[strum(serialize = "wide", serialize = "wd")]
    Wide,
    /// No-ball.
    #[strum(serialize = "no_ball", serialize = "noball", serialize = "nb")]
    NoBall,
    /// Byes.
    #[strum(serialize = "bye", serialize = "b")]
    Bye,
    /// Leg-byes.
    #[strum(serialize = "leg_bye", serialize = "legbye", serialize = "lb")]
    LegBye,
    /// Penalty runs.
    #[strum(serialize = "penalty", serialize = "p")]
    Penalty,
}

impl ExtraKind {
    /// Runs awarded when no explicit value is given.
    pub fn default_runs(self) -> u32 {
        match self {
            ExtraKind::Penalty => 5,
            _ => 1,
        }
    }

    /// Byes and leg-byes count toward the over; the rest do not.
    pub fn counts_as_legal(self) -> bool {
        matches!(self, ExtraKind::Bye | ExtraKind::LegBye)
    }

    /// Only byes and leg-byes may carry more than their default value.
    pub fn accepts_variable_runs(self) -> bool {
        self.counts_as_legal()
    }

    /// Ball-by-ball label for this extra worth `runs`.
    pub fn label(self, runs: u32) -> String {
        match self {
            ExtraKind::Wide => "Wd".to_string(),
            ExtraKind::NoBall => "Nb".to_string(),
            ExtraKind::Bye => format!("B{}", runs),
            ExtraKind::LegBye => format!("Lb{}", runs),
            ExtraKind::Penalty => format!("+{}", runs),
        }
    }
}

impl std::fmt::Display for ExtraKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExtraKind::Wide => "Wide",
            ExtraKind::NoBall => "No-ball",
            ExtraKind::Bye => "Bye",
            ExtraKind::LegBye => "Leg-bye",
            ExtraKind::Penalty => "Penalty",
        };
        write!(f, "{}", name)
    }
}

/// Runs conceded as extras, per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    /// Wides.
    pub wide: u32,
    /// No-balls.
    pub no_ball: u32,
    /// Byes.
    pub bye: u32,
    /// Leg-byes.
    pub leg_bye: u32,
    /// Penalty runs.
    pub penalty: u32,
}

impl Extras {
    /// Runs recorded against `kind`.
    pub fn get(&self, kind: ExtraKind) -> u32 {
        match kind {
            ExtraKind::Wide => self.wide,
            ExtraKind::NoBall => self.no_ball,
            ExtraKind::Bye => self.bye,
            ExtraKind::LegBye => self.leg_bye,
            ExtraKind::Penalty => self.penalty,
        }
    }

    pub(crate) fn add(&mut self, kind: ExtraKind, runs: u32) {
        let slot = match kind {
            ExtraKind::Wide => &mut self.wide,
            ExtraKind::NoBall => &mut self.no_ball,
            ExtraKind::Bye => &mut self.bye,
            ExtraKind::LegBye => &mut self.leg_bye,
            ExtraKind::Penalty => &mut self.penalty,
        };
        *slot += runs;
    }

    /// All extras.
    pub fn total(&self) -> u32 {
        self.wide + self.no_ball + self.bye + self.leg_bye + self.penalty
    }
}

/// A dismissal with its score context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct FallOfWicket {
    /// Team score when the wicket fell.
    score_at_fall: u32,
    /// Which wicket this was.
    wicket_number: u32,
    /// Dismissed batter.
    batter_name: String,
    /// Overs completed before the dismissal ball.
    over_at_fall: String,
}

impl std::fmt::Display for FallOfWicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} ({}, {})",
            self.score_at_fall, self.wicket_number, self.batter_name, self.over_at_fall
        )
    }
}

/// Entry in the recent-ball window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct BallOutcome {
    /// Ball-by-ball label.
    label: String,
    /// Four or six.
    boundary: bool,
    /// Dismissal.
    wicket: bool,
}

/// Delivery inside the over in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct OverBall {
    /// Ball-by-ball label.
    label: String,
    /// Runs the delivery contributed to the team total.
    runs: u32,
    /// Whether it counted toward the over.
    counts: bool,
}

/// Current unbroken stand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partnership {
    /// Runs added.
    pub runs: u32,
    /// Balls faced.
    pub balls: u32,
}

/// Powerplay accumulation (first 36 legal balls).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Powerplay {
    /// Runs scored.
    pub runs: u32,
    /// Wickets lost.
    pub wickets: u32,
    /// Legal balls bowled.
    pub balls: u32,
}

/// Complete state of one innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsState {
    pub(crate) info: MatchInfo,
    pub(crate) batting_team: String,
    pub(crate) bowling_team: String,
    pub(crate) bowling_players: Vec<String>,
    pub(crate) overs_limit: u32,
    pub(crate) target: u32,
    pub(crate) chasing: bool,
    pub(crate) runs: u32,
    pub(crate) wickets: u32,
    pub(crate) balls_bowled: u32,
    pub(crate) extras: Extras,
    pub(crate) fall_of_wickets: Vec<FallOfWicket>,
    pub(crate) last_balls: VecDeque<BallOutcome>,
    pub(crate) current_over: Vec<OverBall>,
    pub(crate) over_history: Vec<u32>,
    pub(crate) partnership: Partnership,
    pub(crate) powerplay: Powerplay,
    pub(crate) batters: Vec<Batter>,
    pub(crate) bench: VecDeque<String>,
}

impl InningsState {
    /// Builds a fresh innings from a configuration.
    ///
    /// The first two batting-side players open, the first on strike; the
    /// rest wait on the bench in order.
    #[instrument(skip(config), fields(batting = %config.batting_team_name()))]
    pub fn new(config: &MatchConfig) -> Self {
        let players = config.batting_players();
        let batters = players
            .iter()
            .take(2)
            .enumerate()
            .map(|(index, name)| Batter::new(name.clone(), index == 0))
            .collect();
        let bench = players.iter().skip(2).cloned().collect();

        Self {
            info: config.info().clone(),
            batting_team: config.batting_team_name().to_string(),
            bowling_team: config.bowling_team_name().to_string(),
            bowling_players: config.bowling_players().clone(),
            overs_limit: *config.overs_limit(),
            target: *config.target(),
            chasing: *config.chasing(),
            runs: 0,
            wickets: 0,
            balls_bowled: 0,
            extras: Extras::default(),
            fall_of_wickets: Vec::new(),
            last_balls: VecDeque::with_capacity(LAST_BALLS_WINDOW),
            current_over: Vec::new(),
            over_history: Vec::new(),
            partnership: Partnership::default(),
            powerplay: Powerplay::default(),
            batters,
            bench,
        }
    }

    /// Fixture details.
    pub fn info(&self) -> &MatchInfo {
        &self.info
    }

    /// Batting side.
    pub fn batting_team(&self) -> &str {
        &self.batting_team
    }

    /// Bowling side.
    pub fn bowling_team(&self) -> &str {
        &self.bowling_team
    }

    /// Bowling side's team sheet.
    pub fn bowling_players(&self) -> &[String] {
        &self.bowling_players
    }

    /// Overs in the innings.
    pub fn overs_limit(&self) -> u32 {
        self.overs_limit
    }

    /// Target runs.
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Whether the batting side is chasing.
    pub fn chasing(&self) -> bool {
        self.chasing
    }

    /// Team runs.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Wickets fallen.
    pub fn wickets(&self) -> u32 {
        self.wickets
    }

    /// Legal deliveries bowled.
    pub fn balls_bowled(&self) -> u32 {
        self.balls_bowled
    }

    /// Extras breakdown.
    pub fn extras(&self) -> &Extras {
        &self.extras
    }

    /// Dismissals in order.
    pub fn fall_of_wickets(&self) -> &[FallOfWicket] {
        &self.fall_of_wickets
    }

    /// The most recent ball outcomes, oldest first.
    pub fn last_balls(&self) -> &VecDeque<BallOutcome> {
        &self.last_balls
    }

    /// Deliveries of the over in progress.
    pub fn current_over(&self) -> &[OverBall] {
        &self.current_over
    }

    /// Run totals of completed overs.
    pub fn over_history(&self) -> &[u32] {
        &self.over_history
    }

    /// Current stand.
    pub fn partnership(&self) -> Partnership {
        self.partnership
    }

    /// Powerplay figures.
    pub fn powerplay(&self) -> Powerplay {
        self.powerplay
    }

    /// Every batter who has come to the crease, in order.
    pub fn batters(&self) -> &[Batter] {
        &self.batters
    }

    /// Players yet to bat.
    pub fn bench(&self) -> &VecDeque<String> {
        &self.bench
    }

    /// Legal deliveries available.
    pub fn ball_limit(&self) -> u32 {
        self.overs_limit * BALLS_PER_OVER
    }

    /// Balls left to bowl.
    pub fn balls_remaining(&self) -> u32 {
        self.ball_limit().saturating_sub(self.balls_bowled)
    }

    /// True while overs and wickets remain.
    pub fn can_deliver_ball(&self) -> bool {
        self.balls_bowled < self.ball_limit() && self.wickets < MAX_WICKETS
    }

    /// Any run, wicket, or legal ball recorded.
    pub fn has_progress(&self) -> bool {
        self.runs > 0 || self.wickets > 0 || self.balls_bowled > 0
    }

    pub(crate) fn striker_index(&self) -> Option<usize> {
        self.batters.iter().position(Batter::is_striker)
    }

    pub(crate) fn non_striker_index(&self) -> Option<usize> {
        self.batters.iter().position(Batter::is_non_striker)
    }

    /// Not-out batter on strike.
    pub fn striker(&self) -> Option<&Batter> {
        self.batters.iter().find(|b| b.is_striker())
    }

    /// Not-out batter off strike.
    pub fn non_striker(&self) -> Option<&Batter> {
        self.batters.iter().find(|b| b.is_non_striker())
    }

    /// Batters currently at the crease.
    pub fn not_out_count(&self) -> usize {
        self.batters.iter().filter(|b| b.is_not_out()).count()
    }

    /// Exchanges strike between whichever of striker and non-striker exist.
    pub(crate) fn rotate_strike(&mut self) {
        let striker = self.striker_index();
        let non_striker = self.non_striker_index();
        if let Some(i) = striker {
            self.batters[i].strike = false;
        }
        if let Some(i) = non_striker {
            self.batters[i].strike = true;
        }
    }

    /// Appends a delivery to the recent-ball window and the current over.
    pub(crate) fn register_ball(&mut self, outcome: BallOutcome, runs: u32, counts: bool) {
        self.current_over
            .push(OverBall::new(outcome.label.clone(), runs, counts));
        self.last_balls.push_back(outcome);
        while self.last_balls.len() > LAST_BALLS_WINDOW {
            self.last_balls.pop_front();
        }
    }
}
