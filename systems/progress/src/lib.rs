#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player progress tracking system.
//!
//! Progress is a pure sink of win transitions: every [`Event::LevelWon`]
//! marks its level completed and unlocks the level that follows it. The first
//! level is always unlocked.

use std::collections::BTreeSet;

use labyrinth_snake_core::{Event, LevelId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Level that is unlocked before anything has been played.
pub const FIRST_LEVEL: LevelId = LevelId::new(1);

/// Errors raised while encoding or decoding saved progress.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// The saved payload could not be serialised or deserialised.
    #[error("malformed progress payload")]
    Json(#[from] serde_json::Error),
}

/// Completed and unlocked level identifiers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    completed: BTreeSet<LevelId>,
    unlocked: BTreeSet<LevelId>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            completed: BTreeSet::new(),
            unlocked: BTreeSet::from([FIRST_LEVEL]),
        }
    }
}

impl Progress {
    /// Records a win on `level`, unlocking its successor up to `last_level`.
    ///
    /// Returns `true` when the level had not been completed before.
    pub fn record_win(&mut self, level: LevelId, last_level: LevelId) -> bool {
        let first_completion = self.completed.insert(level);
        let _ = self.unlocked.insert(level);
        if level < last_level {
            let _ = self.unlocked.insert(level.next());
        }

        if first_completion {
            tracing::debug!(level = level.get(), "level completed for the first time");
        }
        first_completion
    }

    /// Consumes session events, recording every win.
    pub fn handle(&mut self, events: &[Event], last_level: LevelId) {
        for event in events {
            if let Event::LevelWon { level, .. } = event {
                let _ = self.record_win(*level, last_level);
            }
        }
    }

    /// Reports whether `level` may be played.
    #[must_use]
    pub fn is_unlocked(&self, level: LevelId) -> bool {
        self.unlocked.contains(&level)
    }

    /// Reports whether `level` has been won at least once.
    #[must_use]
    pub fn is_completed(&self, level: LevelId) -> bool {
        self.completed.contains(&level)
    }

    /// Completed levels in ascending order.
    pub fn completed(&self) -> impl Iterator<Item = LevelId> + '_ {
        self.completed.iter().copied()
    }

    /// Unlocked levels in ascending order.
    pub fn unlocked(&self) -> impl Iterator<Item = LevelId> + '_ {
        self.unlocked.iter().copied()
    }

    /// Serialises progress as a JSON object with `completed` and `unlocked` arrays.
    pub fn to_json(&self) -> Result<String, ProgressError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restores progress from JSON, re-unlocking the first level if it is missing.
    pub fn from_json(text: &str) -> Result<Self, ProgressError> {
        let mut progress: Self = serde_json::from_str(text)?;
        let _ = progress.unlocked.insert(FIRST_LEVEL);
        Ok(progress)
    }
}
