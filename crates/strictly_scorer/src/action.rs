//! Scoring actions typed at the terminal.
//!
//! Actions are parsed up front so a bad token is reported before anything
//! touches the scorer.

use derive_more::Display;
use std::str::FromStr;
use strictly_cricket::{Delivery, ExtraKind, ScoringError, Scorer};
use tracing::instrument;

/// One scorer command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A ball event.
    Deliver(Delivery),
    /// Manual strike swap.
    Swap,
    /// Undo the last mutation.
    Undo,
    /// Reset the innings; `confirmed` skips the progress check.
    Reset {
        /// Whether progress may be discarded.
        confirmed: bool,
    },
    /// Rename the batters at the crease.
    Rename {
        /// New striker name; blank keeps the old one.
        striker: String,
        /// New non-striker name; blank keeps the old one.
        non_striker: String,
    },
    /// Name the incoming batter.
    NewBatter(String),
}

impl Action {
    /// Applies the action to `scorer`.
    ///
    /// # Errors
    ///
    /// Propagates the scorer's rejection.
    #[instrument(skip(scorer))]
    pub fn apply(&self, scorer: &mut Scorer) -> Result<(), ScoringError> {
        match self {
            Action::Deliver(delivery) => scorer.deliver(*delivery).map(|_| ()),
            Action::Swap => scorer.swap_strike(),
            Action::Undo => scorer.undo(),
            Action::Reset { confirmed } => scorer.reset_innings(*confirmed),
            Action::Rename {
                striker,
                non_striker,
            } => scorer.update_batter_names(striker, non_striker),
            Action::NewBatter(name) => scorer.supply_batter(name).map(|_| ()),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Deliver(delivery) => write!(f, "{}", delivery),
            Action::Swap => write!(f, "swap"),
            Action::Undo => write!(f, "undo"),
            Action::Reset { confirmed: false } => write!(f, "reset"),
            Action::Reset { confirmed: true } => write!(f, "reset!"),
            Action::Rename {
                striker,
                non_striker,
            } => write!(f, "name {},{}", striker, non_striker),
            Action::NewBatter(name) => write!(f, "in:{}", name),
        }
    }
}

/// A token that is not a scorer command.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ActionError {
    /// Unknown token.
    #[display("Unrecognized token '{}'", _0)]
    Unrecognized(String),
    /// `name` without a `<striker>,<non-striker>` argument.
    #[display("Expected 'name <striker>,<non-striker>'")]
    MissingNames,
}

impl std::error::Error for ActionError {}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let lower = token.to_ascii_lowercase();
        if let Ok(runs) = lower.parse::<u8>() {
            return Ok(Action::Deliver(Delivery::run(runs)));
        }
        if let Some(name) = token.strip_prefix("in:") {
            return Ok(Action::NewBatter(name.to_string()));
        }
        match lower.as_str() {
            "w" | "wicket" => return Ok(Action::Deliver(Delivery::Wicket)),
            "swap" => return Ok(Action::Swap),
            "undo" | "u" => return Ok(Action::Undo),
            "reset" => return Ok(Action::Reset { confirmed: false }),
            "reset!" => return Ok(Action::Reset { confirmed: true }),
            _ => {}
        }

        // Extras: `wd`, `nb`, `p`, and `b`/`lb` with optional runs (`b4`, `lb2`).
        let split = lower
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(lower.len());
        let (kind, runs) = lower.split_at(split);
        let kind = ExtraKind::from_str(kind)
            .map_err(|_| ActionError::Unrecognized(token.to_string()))?;
        if runs.is_empty() {
            return Ok(Action::Deliver(Delivery::extra(kind)));
        }
        let runs = runs
            .parse::<u8>()
            .map_err(|_| ActionError::Unrecognized(token.to_string()))?;
        Ok(Action::Deliver(Delivery::extra_runs(kind, runs)))
    }
}

/// Parses `name <striker>,<non-striker>` arguments.
fn rename(names: &str) -> Result<Action, ActionError> {
    let (striker, non_striker) = names.split_once(',').ok_or(ActionError::MissingNames)?;
    Ok(Action::Rename {
        striker: striker.trim().to_string(),
        non_striker: non_striker.trim().to_string(),
    })
}

/// Parses a sequence of tokens.
///
/// `name` takes the following token as its `<striker>,<non-striker>` argument.
///
/// # Errors
///
/// Returns the first token that does not parse.
#[instrument(skip(tokens))]
pub fn parse_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Result<Vec<Action>, ActionError> {
    let mut tokens = tokens.into_iter();
    let mut actions = Vec::new();
    while let Some(token) = tokens.next() {
        if token.eq_ignore_ascii_case("name") {
            actions.push(rename(tokens.next().ok_or(ActionError::MissingNames)?)?);
        } else {
            actions.push(token.parse()?);
        }
    }
    Ok(actions)
}

/// Parses one interactive line.
///
/// A line starting with `name` renames the batters and may contain spaces,
/// as in `name Ali Khan, Bea Smith`. Any other line is a run of tokens.
///
/// # Errors
///
/// Returns the first token that does not parse.
pub fn parse_line(line: &str) -> Result<Vec<Action>, ActionError> {
    let line = line.trim();
    let mut words = line.splitn(2, char::is_whitespace);
    if words
        .next()
        .is_some_and(|first| first.eq_ignore_ascii_case("name"))
    {
        return rename(words.next().unwrap_or_default()).map(|action| vec![action]);
    }
    parse_tokens(line.split_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_and_wicket() {
        assert_eq!("4".parse::<Action>(), Ok(Action::Deliver(Delivery::run(4))));
        assert_eq!("W".parse::<Action>(), Ok(Action::Deliver(Delivery::Wicket)));
        // Range checks belong to the scorer.
        assert_eq!("9".parse::<Action>(), Ok(Action::Deliver(Delivery::run(9))));
    }

    #[test]
    fn test_extras() {
        assert_eq!("wd".parse::<Action>(), Ok(Action::Deliver(Delivery::extra(ExtraKind::Wide))));
        assert_eq!("NB".parse::<Action>(), Ok(Action::Deliver(Delivery::extra(ExtraKind::NoBall))));
        assert_eq!("p".parse::<Action>(), Ok(Action::Deliver(Delivery::extra(ExtraKind::Penalty))));
        assert_eq!("b".parse::<Action>(), Ok(Action::Deliver(Delivery::extra(ExtraKind::Bye))));
        assert_eq!(
            "lb2".parse::<Action>(),
            Ok(Action::Deliver(Delivery::extra_runs(ExtraKind::LegBye, 2)))
        );
        assert_eq!(
            "b4".parse::<Action>(),
            Ok(Action::Deliver(Delivery::extra_runs(ExtraKind::Bye, 4)))
        );
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(
            "zz".parse::<Action>(),
            Err(ActionError::Unrecognized("zz".to_string()))
        );
        assert!("lbx".parse::<Action>().is_err());
    }

    #[test]
    fn test_parse_tokens_with_names() {
        let actions = parse_tokens(["1", "name", "Ali,Bea", "undo", "in:Cal"]).unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Deliver(Delivery::run(1)),
                Action::Rename {
                    striker: "Ali".to_string(),
                    non_striker: "Bea".to_string()
                },
                Action::Undo,
                Action::NewBatter("Cal".to_string()),
            ]
        );
        assert_eq!(parse_tokens(["name"]), Err(ActionError::MissingNames));
    }

    #[test]
    fn test_parse_line_keeps_spaces_in_names() {
        assert_eq!(
            parse_line("name Ali Khan, Bea Smith"),
            Ok(vec![Action::Rename {
                striker: "Ali Khan".to_string(),
                non_striker: "Bea Smith".to_string()
            }])
        );
        assert_eq!(
            parse_line(" 1 4  wd "),
            Ok(vec![
                Action::Deliver(Delivery::run(1)),
                Action::Deliver(Delivery::run(4)),
                Action::Deliver(Delivery::extra(ExtraKind::Wide)),
            ])
        );
    }
}
