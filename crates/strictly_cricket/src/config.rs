//! Match setup normalization.
//!
//! A [`RawSetup`] arrives from whatever collects the setup form (a TOML file,
//! a UI, a test) with every field optional. [`MatchConfig::from_raw`] turns it
//! into a bounded, immutable configuration. Malformed numbers degrade to their
//! defaults; the only rejection is a supplied player list that is too short.

use crate::error::SetupError;
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Overs used when the payload has no usable value.
pub const DEFAULT_OVERS: u32 = 20;

/// Shortest innings allowed.
pub const MIN_OVERS: u32 = 1;

/// Longest innings allowed.
pub const MAX_OVERS: u32 = 50;

/// Minimum players per side.
pub const MIN_PLAYERS: usize = 2;

/// A number that may arrive as a JSON/TOML number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    /// Already numeric.
    Number(f64),
    /// Text to be parsed.
    Text(String),
}

impl NumericInput {
    /// Returns the finite value, if any.
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<u32> for NumericInput {
    fn from(value: u32) -> Self {
        NumericInput::Number(f64::from(value))
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Which team bats first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattingFirst {
    /// Team one bats.
    #[default]
    TeamOne,
    /// Team two bats.
    TeamTwo,
}

/// Setup payload as submitted, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_", strip_option, into)]
#[serde(default)]
pub struct RawSetup {
    /// Competition or match type.
    pub match_type: Option<String>,
    /// Fixture title.
    pub title: Option<String>,
    /// Venue.
    pub venue: Option<String>,
    /// Start time, free text.
    pub time: Option<String>,
    /// Overs per innings.
    pub overs: Option<NumericInput>,
    /// Target for a chase.
    pub target: Option<NumericInput>,
    /// Whether the batting side is chasing.
    pub chasing: Option<bool>,
    /// Name of team one.
    pub team_one_name: Option<String>,
    /// Name of team two.
    pub team_two_name: Option<String>,
    /// Team one players in batting order.
    pub team_one_players: Option<Vec<String>>,
    /// Team two players in batting order.
    pub team_two_players: Option<Vec<String>>,
    /// Which team bats first.
    pub batting_first: Option<BattingFirst>,
}

/// Free-text fixture details shown alongside the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MatchInfo {
    /// Competition or match type.
    match_type: String,
    /// Fixture title.
    title: String,
    /// Venue.
    venue: String,
    /// Start time.
    time: String,
}

impl Default for MatchInfo {
    fn default() -> Self {
        Self {
            match_type: "Limited Overs".to_string(),
            title: "T20 Fixture".to_string(),
            venue: "Venue TBC".to_string(),
            time: "TBD".to_string(),
        }
    }
}

/// Normalized, immutable match configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MatchConfig {
    /// Fixture details.
    info: MatchInfo,
    /// Overs per innings, 1 to 50.
    overs_limit: u32,
    /// Target runs, never negative.
    target: u32,
    /// True only when a positive target is set.
    chasing: bool,
    /// Name of team one.
    team_one_name: String,
    /// Name of team two.
    team_two_name: String,
    /// Which team bats.
    batting_first: BattingFirst,
    /// Batting side's players, at least two.
    batting_players: Vec<String>,
    /// Bowling side's players, at least two.
    bowling_players: Vec<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            info: MatchInfo::default(),
            overs_limit: DEFAULT_OVERS,
            target: 0,
            chasing: false,
            team_one_name: "Team One".to_string(),
            team_two_name: "Team Two".to_string(),
            batting_first: BattingFirst::TeamOne,
            batting_players: pad_players(Vec::new(), "Batter"),
            bowling_players: pad_players(Vec::new(), "Bowler"),
        }
    }
}

impl MatchConfig {
    /// Normalizes a raw setup payload.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::NotEnoughPlayers`] when a supplied player list
    /// holds fewer than two non-blank names. An absent list is padded with
    /// placeholder names instead.
    #[instrument(skip(raw))]
    pub fn from_raw(raw: RawSetup) -> Result<Self, SetupError> {
        let defaults = MatchConfig::default();
        let info = MatchInfo {
            match_type: text_or(raw.match_type, defaults.info.match_type),
            title: text_or(raw.title, defaults.info.title),
            venue: text_or(raw.venue, defaults.info.venue),
            time: text_or(raw.time, defaults.info.time),
        };

        let overs_limit = normalize_overs(raw.overs.as_ref());
        let target = normalize_target(raw.target.as_ref());
        let chasing = raw.chasing.unwrap_or(false) && target > 0;

        let team_one_name = text_or(raw.team_one_name, defaults.team_one_name);
        let team_two_name = text_or(raw.team_two_name, defaults.team_two_name);
        let batting_first = raw.batting_first.unwrap_or_default();

        let team_one = named_players(raw.team_one_players, &team_one_name)?;
        let team_two = named_players(raw.team_two_players, &team_two_name)?;
        let (batting, bowling) = match batting_first {
            BattingFirst::TeamOne => (team_one, team_two),
            BattingFirst::TeamTwo => (team_two, team_one),
        };

        let config = Self {
            info,
            overs_limit,
            target,
            chasing,
            team_one_name,
            team_two_name,
            batting_first,
            batting_players: pad_players(batting, "Batter"),
            bowling_players: pad_players(bowling, "Bowler"),
        };
        debug!(
            overs = config.overs_limit,
            target = config.target,
            chasing = config.chasing,
            batting = %config.batting_team_name(),
            "Setup normalized"
        );
        Ok(config)
    }

    /// Name of the batting side.
    pub fn batting_team_name(&self) -> &str {
        match self.batting_first {
            BattingFirst::TeamOne => &self.team_one_name,
            BattingFirst::TeamTwo => &self.team_two_name,
        }
    }

    /// Name of the bowling side.
    pub fn bowling_team_name(&self) -> &str {
        match self.batting_first {
            BattingFirst::TeamOne => &self.team_two_name,
            BattingFirst::TeamTwo => &self.team_one_name,
        }
    }

    /// Legal deliveries available in the innings.
    pub fn ball_limit(&self) -> u32 {
        self.overs_limit * 6
    }
}

fn text_or(value: Option<String>, default: String) -> String {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
}

fn normalize_overs(input: Option<&NumericInput>) -> u32 {
    // A raw zero counts as "not supplied"; fractions below one round to the minimum.
    let overs = input
        .and_then(NumericInput::value)
        .filter(|v| *v != 0.0)
        .map(f64::round)
        .unwrap_or(f64::from(DEFAULT_OVERS));
    overs.clamp(f64::from(MIN_OVERS), f64::from(MAX_OVERS)) as u32
}

fn normalize_target(input: Option<&NumericInput>) -> u32 {
    let target = input.and_then(NumericInput::value).unwrap_or(0.0).round();
    if target <= 0.0 {
        0
    } else {
        target.min(f64::from(u32::MAX)) as u32
    }
}

fn named_players(players: Option<Vec<String>>, team: &str) -> Result<Vec<String>, SetupError> {
    let Some(players) = players else {
        return Ok(Vec::new());
    };
    let named: Vec<String> = players
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if named.len() < MIN_PLAYERS {
        warn!(team, found = named.len(), "Player list too short");
        return Err(SetupError::NotEnoughPlayers {
            team: team.to_string(),
            found: named.len(),
        });
    }
    Ok(named)
}

/// Pads a player list with `"<role> N"` placeholders up to two entries.
fn pad_players(mut players: Vec<String>, role: &str) -> Vec<String> {
    players.retain(|p| !p.trim().is_empty());
    while players.len() < MIN_PLAYERS {
        players.push(format!("{} {}", role, players.len() + 1));
    }
    players
}
