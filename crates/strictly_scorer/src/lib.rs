//! Strictly Scorer - terminal front end for strictly_cricket
//!
//! Loads a match setup from TOML, feeds scoring commands to a
//! [`strictly_cricket::Scorer`], and prints the board as text or JSON.
//!
//! # Example
//!
//! ```
//! use strictly_scorer::{ScoringSession, parse_tokens};
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut session = ScoringSession::start(Default::default())?;
//! let rejected = session.replay(&parse_tokens(["4", "1", "wd"])?);
//! assert!(rejected.is_empty());
//! assert_eq!(session.scorer().state().runs(), 6);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod cli;
mod session;
mod setup_file;

// Crate-level exports - Commands
pub use action::{Action, ActionError, parse_line, parse_tokens};

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Session
pub use session::{BoardFormat, HELP, ScoringSession};

// Crate-level exports - Setup files
pub use setup_file::{SetupFileError, load_setup, parse_setup};
