//! Order tracker - an interactive step tracker for order lifecycles
//!
//! The library holds the tracker core (stages, state machine, notifiers)
//! and the ambient pieces the binary wires together.

pub mod config;
pub mod logging;
pub mod notifications;
pub mod simulate;
pub mod stages;
pub mod tracker;

pub use notifications::{Notification, Notifier, Severity};
pub use stages::{Stage, StageList};
pub use tracker::{stage_status, Outcome, StageStatus, Tracker, TrackerError};
