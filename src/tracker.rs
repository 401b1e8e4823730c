//! Step sequence controller.
//!
//! The tracker state is just `(current_index, cancelled)`. Each stage's
//! status is derived from it on demand by [`stage_status`] and never stored.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::notifications::{Notification, Notifier};
use crate::stages::{Stage, StageList};

pub const CANCELLED_TITLE: &str = "Cancelled";
pub const CANCELLED_DESCRIPTION: &str = "Your order has been cancelled";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("stage index {index} is out of range (tracker has {len} stages)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Derived display state of a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Completed,
    Active,
    Pending,
    Cancelled,
}

impl StageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::Completed => "completed",
            StageStatus::Active => "active",
            StageStatus::Pending => "pending",
            StageStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of the stage at `index` given the tracker position.
///
/// Cancellation overrides position: every stage reports `Cancelled`.
pub fn stage_status(index: usize, current: usize, cancelled: bool) -> StageStatus {
    if cancelled {
        return StageStatus::Cancelled;
    }
    match index.cmp(&current) {
        std::cmp::Ordering::Less => StageStatus::Completed,
        std::cmp::Ordering::Equal => StageStatus::Active,
        std::cmp::Ordering::Greater => StageStatus::Pending,
    }
}

/// Overall state of the tracked order, for the summary banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    InProgress,
    Delivered,
    Cancelled,
}

/// One row of the read model handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageView<'a> {
    pub index: usize,
    pub id: u32,
    pub title: &'a str,
    pub description: &'a str,
    pub symbol: &'a str,
    pub status: StageStatus,
}

/// Holds the tracker position and notifies on every transition
pub struct Tracker {
    stages: StageList,
    current: usize,
    cancelled: bool,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("stages", &self.stages.len())
            .field("current", &self.current)
            .field("cancelled", &self.cancelled)
            .finish_non_exhaustive()
    }
}

impl Tracker {
    /// Create a tracker at the first stage, not cancelled.
    pub fn new(stages: StageList, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            stages,
            current: 0,
            cancelled: false,
            notifier,
        }
    }

    pub fn stages(&self) -> &StageList {
        &self.stages
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_stage(&self) -> &Stage {
        // current is kept within [0, len) by every mutation
        &self.stages[self.current]
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Move to the next stage.
    ///
    /// Returns false (and notifies nobody) when cancelled or already at the last stage.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            tracing::debug!(
                current = self.current,
                cancelled = self.cancelled,
                "Advance ignored"
            );
            return false;
        }

        self.current += 1;
        tracing::info!(index = self.current, "Advanced to next stage");
        self.notify_current();
        true
    }

    /// Jump to any stage, forward or backward.
    ///
    /// A cancelled tracker ignores jumps (`Ok(false)`); an index past the last
    /// stage is rejected without touching state.
    pub fn jump_to(&mut self, index: usize) -> Result<bool, TrackerError> {
        if index >= self.stages.len() {
            tracing::warn!(index, len = self.stages.len(), "Rejected jump to unknown stage");
            return Err(TrackerError::IndexOutOfRange {
                index,
                len: self.stages.len(),
            });
        }

        if self.cancelled {
            tracing::debug!(index, "Jump ignored on cancelled tracker");
            return Ok(false);
        }

        let from = self.current;
        self.current = index;
        tracing::info!(from, to = index, "Jumped to stage");
        self.notify_current();
        Ok(true)
    }

    /// Cancel the sequence. Permanent; repeated calls notify again.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        tracing::info!(index = self.current, "Tracker cancelled");
        self.notifier
            .notify(&Notification::error(CANCELLED_TITLE, CANCELLED_DESCRIPTION));
    }

    /// Status of the stage at `index`, or `None` if there is no such stage.
    pub fn status_of(&self, index: usize) -> Option<StageStatus> {
        (index < self.stages.len()).then(|| stage_status(index, self.current, self.cancelled))
    }

    /// Ordered rows for rendering
    pub fn stages_view(&self) -> Vec<StageView<'_>> {
        self.stages
            .iter()
            .enumerate()
            .map(|(index, stage)| StageView {
                index,
                id: stage.id,
                title: &stage.title,
                description: &stage.description,
                symbol: &stage.symbol,
                status: stage_status(index, self.current, self.cancelled),
            })
            .collect()
    }

    /// Position along the sequence in [0.0, 1.0]
    pub fn progress(&self) -> f64 {
        let last = self.stages.last_index();
        if last == 0 {
            return 1.0;
        }
        self.current as f64 / last as f64
    }

    pub fn can_advance(&self) -> bool {
        !self.cancelled && self.current < self.stages.last_index()
    }

    pub fn can_cancel(&self) -> bool {
        !self.cancelled
    }

    /// At the last stage and not cancelled. Jumps are still allowed.
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.current == self.stages.last_index()
    }

    pub fn outcome(&self) -> Outcome {
        if self.cancelled {
            Outcome::Cancelled
        } else if self.is_complete() {
            Outcome::Delivered
        } else {
            Outcome::InProgress
        }
    }

    fn notify_current(&self) {
        let stage = self.current_stage();
        self.notifier
            .notify(&Notification::success(&stage.title, &stage.description));
    }
}
