//! Scripted, headless tracker runs (`order-tracker simulate ...`).

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::tracker::{Tracker, TrackerError};

/// One scripted user gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Jump(usize),
    Cancel,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseActionError {
    #[error("unknown action '{0}' (expected next, jump:<index> or cancel)")]
    Unknown(String),

    #[error("invalid stage index in '{0}'")]
    InvalidIndex(String),
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "next" | "advance" => return Ok(Action::Next),
            "cancel" => return Ok(Action::Cancel),
            _ => {}
        }

        match s.split_once(':') {
            Some((name, index)) if name.eq_ignore_ascii_case("jump") => index
                .trim()
                .parse()
                .map(Action::Jump)
                .map_err(|_| ParseActionError::InvalidIndex(s.to_string())),
            _ => Err(ParseActionError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Next => f.write_str("next"),
            Action::Jump(index) => write!(f, "jump:{index}"),
            Action::Cancel => f.write_str("cancel"),
        }
    }
}

/// What happened when an action was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Applied,
    Ignored,
    Rejected(TrackerError),
}

/// Apply one action to the tracker.
pub fn apply(tracker: &mut Tracker, action: Action) -> StepOutcome {
    match action {
        Action::Next => {
            if tracker.advance() {
                StepOutcome::Applied
            } else {
                StepOutcome::Ignored
            }
        }
        Action::Jump(index) => match tracker.jump_to(index) {
            Ok(true) => StepOutcome::Applied,
            Ok(false) => StepOutcome::Ignored,
            Err(e) => StepOutcome::Rejected(e),
        },
        Action::Cancel => {
            tracker.cancel();
            StepOutcome::Applied
        }
    }
}

/// Apply a whole script, returning the outcome of each action in order.
pub fn run(tracker: &mut Tracker, actions: &[Action]) -> Vec<(Action, StepOutcome)> {
    actions
        .iter()
        .map(|action| (*action, apply(tracker, *action)))
        .collect()
}
