//! Stage definitions for the tracked lifecycle.
//!
//! A [`StageList`] is built once at startup (from config or the built-in
//! order lifecycle) and never changes afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while building a stage list
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StageError {
    #[error("stage list is empty")]
    Empty,

    #[error("stage id must be a positive integer (stage '{0}')")]
    ZeroId(String),

    #[error("duplicate stage id {0}")]
    DuplicateId(u32),

    #[error("stage {0} has a blank title")]
    BlankTitle(u32),
}

/// One discrete, ordered step in the tracked sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Unique positive identifier
    pub id: u32,
    /// Short label (e.g., "Order Accept")
    pub title: String,
    /// Explanatory text shown under the title
    pub description: String,
    /// Display marker key (e.g., "truck"), resolved to a glyph by the UI
    #[serde(default)]
    pub symbol: String,
}

impl Stage {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        description: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            symbol: symbol.into(),
        }
    }
}

/// Validated, ordered, fixed-length sequence of stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageList {
    stages: Vec<Stage>,
}

impl StageList {
    /// Build a stage list, checking ids and titles.
    pub fn new(stages: Vec<Stage>) -> Result<Self, StageError> {
        if stages.is_empty() {
            return Err(StageError::Empty);
        }

        let mut seen = HashSet::with_capacity(stages.len());
        for stage in &stages {
            if stage.id == 0 {
                return Err(StageError::ZeroId(stage.title.clone()));
            }
            if !seen.insert(stage.id) {
                return Err(StageError::DuplicateId(stage.id));
            }
            if stage.title.trim().is_empty() {
                return Err(StageError::BlankTitle(stage.id));
            }
        }

        Ok(Self { stages })
    }

    /// The six-stage order delivery lifecycle
    pub fn order_lifecycle() -> Self {
        Self {
            stages: default_stages(),
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false for a constructed list; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stage> {
        self.stages.iter()
    }

    /// Index of the final stage
    pub fn last_index(&self) -> usize {
        self.stages.len() - 1
    }
}

impl std::ops::Index<usize> for StageList {
    type Output = Stage;

    fn index(&self, index: usize) -> &Stage {
        &self.stages[index]
    }
}

impl<'a> IntoIterator for &'a StageList {
    type Item = &'a Stage;
    type IntoIter = std::slice::Iter<'a, Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.iter()
    }
}

/// Built-in order lifecycle, used when no stages are configured
pub fn default_stages() -> Vec<Stage> {
    vec![
        Stage::new(1, "Order Accept", "Your order has been accepted", "check"),
        Stage::new(2, "Start Ride", "Delivery partner is on the way", "truck"),
        Stage::new(3, "Reached Shop", "Arrived at pickup location", "map-pin"),
        Stage::new(4, "Order Picked", "Order picked up from shop", "shopping-bag"),
        Stage::new(5, "Shipped", "Order is on the way to you", "package"),
        Stage::new(6, "Delivered", "Order successfully delivered", "check"),
    ]
}
