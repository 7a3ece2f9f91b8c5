//! Driving a scorer from the terminal.
//!
//! A [`ScoringSession`] owns the scorer, answers new-batter requests, and
//! decides how rejected commands are reported. Output is written to any
//! [`Write`], so the interactive loop runs the same against a test buffer.

use crate::action::{Action, parse_line};
use anyhow::Result;
use std::io::{BufRead, Write};
use strictly_cricket::{
    GuardRejection, NoticeLevel, RawSetup, Scoreboard, Scorer, ScoringError,
};
use tracing::{debug, info, instrument, warn};

/// How the board is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardFormat {
    /// Plain text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// A scorer plus the terminal policies around it.
#[derive(Debug)]
pub struct ScoringSession {
    scorer: Scorer,
}

impl ScoringSession {
    /// Starts a session from a raw setup.
    ///
    /// # Errors
    ///
    /// Returns the scorer's rejection when the setup is invalid.
    #[instrument(skip(raw))]
    pub fn start(raw: RawSetup) -> Result<Self, ScoringError> {
        let mut scorer = Scorer::new();
        scorer.apply_setup(raw, false)?;
        Ok(Self { scorer })
    }

    /// The underlying scorer.
    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Applies actions in order, continuing past rejections.
    ///
    /// When a delivery arrives while a new batter is awaited, the default
    /// name is accepted first. Returns the rejections encountered.
    #[instrument(skip(self, actions), fields(count = actions.len()))]
    pub fn replay(&mut self, actions: &[Action]) -> Vec<ScoringError> {
        let mut rejections = Vec::new();
        for action in actions {
            if let Action::Deliver(_) = action
                && self.scorer.pending_batter().is_some()
            {
                debug!("Accepting default batter before next delivery");
                if let Err(e) = self.scorer.supply_batter("") {
                    rejections.push(e);
                }
            }
            if let Err(e) = action.apply(&mut self.scorer) {
                warn!(%action, reason = %e, "Replay action rejected");
                rejections.push(e);
            }
        }
        info!(
            runs = self.scorer.state().runs(),
            wickets = self.scorer.state().wickets(),
            rejected = rejections.len(),
            "Replay finished"
        );
        rejections
    }

    /// Writes the board in `format`.
    ///
    /// # Errors
    ///
    /// Propagates write and serialization failures.
    pub fn print_board(&self, format: BoardFormat, out: &mut impl Write) -> Result<()> {
        let board = Scoreboard::capture(&self.scorer);
        match format {
            BoardFormat::Text => write!(out, "{}", board)?,
            BoardFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&board)?)?,
        }
        Ok(())
    }

    /// Writes and clears queued notices, warnings prefixed with `!`.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn print_notices(&mut self, out: &mut impl Write) -> Result<()> {
        for notice in self.scorer.drain_notices() {
            match notice.level {
                NoticeLevel::Info => writeln!(out, "  {}", notice)?,
                NoticeLevel::Warning => writeln!(out, "! {}", notice)?,
            }
        }
        Ok(())
    }

    /// Runs the interactive loop until `quit` or end of input.
    ///
    /// While a new batter is awaited the next line is taken as the name; an
    /// empty line accepts the default. A reset that would discard progress
    /// asks for confirmation.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures. Scoring rejections are printed, not returned.
    #[instrument(skip_all)]
    pub fn play(&mut self, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
        self.print_board(BoardFormat::Text, out)?;
        loop {
            let prompt = match self.scorer.pending_batter() {
                Some(request) => format!("New batter [{}]: ", request.default_name()),
                None => "> ".to_string(),
            };
            write!(out, "{}", prompt)?;
            out.flush()?;

            let Some(line) = read_line(input)? else {
                break;
            };

            if self.scorer.pending_batter().is_some() {
                match line.trim() {
                    "quit" | "q" | "exit" => break,
                    "undo" | "u" => {
                        if let Err(e) = self.scorer.undo() {
                            debug!(error = %e, "Undo at batter prompt rejected");
                        }
                    }
                    _ => {
                        if let Err(e) = self.scorer.supply_batter(&line) {
                            warn!(error = %e, "New batter not admitted");
                        }
                    }
                }
            } else {
                match line.trim() {
                    "" => continue,
                    "quit" | "q" | "exit" => break,
                    "help" | "?" => {
                        writeln!(out, "{}", HELP)?;
                        continue;
                    }
                    trimmed => match parse_line(trimmed) {
                        Ok(actions) => self.run_interactive(&actions, input, out)?,
                        Err(e) => writeln!(out, "! {}", e)?,
                    },
                }
            }

            self.print_notices(out)?;
            self.print_board(BoardFormat::Text, out)?;
        }
        info!("Session ended");
        Ok(())
    }

    fn run_interactive(
        &mut self,
        actions: &[Action],
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> Result<()> {
        for action in actions {
            if self.scorer.pending_batter().is_some() {
                writeln!(out, "! New batter required; remaining commands skipped")?;
                break;
            }
            match action.apply(&mut self.scorer) {
                Err(ScoringError::Guard(GuardRejection::ConfirmationRequired)) => {
                    // Drop the rejection notice; the prompt replaces it.
                    self.scorer.drain_notices();
                    write!(out, "Reset innings and lose progress? [y/N]: ")?;
                    out.flush()?;
                    let answer = read_line(input)?.unwrap_or_default();
                    if answer.trim().eq_ignore_ascii_case("y") {
                        if let Err(e) = self.scorer.reset_innings(true) {
                            warn!(error = %e, "Confirmed reset failed");
                        }
                    }
                }
                // Rejections are already queued as notices.
                Err(_) | Ok(()) => {}
            }
        }
        Ok(())
    }
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Interactive command summary.
pub const HELP: &str = "\
Commands:
  0-6            runs off the bat
  wd nb p        wide, no-ball, penalty
  b lb b4 lb2    byes / leg-byes, optionally with runs
  w              wicket
  swap           swap strike
  undo           undo last change (also at the new batter prompt)
  reset          reset the innings
  name A,B       rename striker and non-striker
  quit           leave";
