//! Workout templates: the ordered drill list a run executes.
//!
//! Templates are immutable for the duration of a run -- the engine takes a
//! frozen snapshot at start and indexes per-drill stats by position, which
//! is only sound because nothing mutates the drill order mid-run.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillKind {
    Exercise,
    Break,
}

/// How an exercise drill completes.
///
/// Break drills ignore their mode and always run on the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillMode {
    /// Runs for `duration_secs`, then auto-advances.
    Time,
    /// Auto-advances once `reps` made shots are recorded.
    Makes,
    /// Auto-advances once `reps` attempts are recorded.
    Attempts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drill {
    pub id: String,
    pub name: String,
    pub kind: DrillKind,
    pub mode: DrillMode,
    /// Countdown length in seconds; meaningful for timed drills only.
    #[serde(default)]
    pub duration_secs: u64,
    /// Target count for makes/attempts modes.
    #[serde(default)]
    pub reps: u32,
    #[serde(default)]
    pub cat_id: Option<String>,
    #[serde(default)]
    pub sub_id: Option<String>,
}

impl Drill {
    pub fn is_break(&self) -> bool {
        self.kind == DrillKind::Break
    }

    /// Breaks always run on the clock; exercises only in time mode.
    pub fn is_timed(&self) -> bool {
        self.kind == DrillKind::Break || self.mode == DrillMode::Time
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub drills: Vec<Drill>,
}

impl Workout {
    /// Check the template is runnable: drill ids must be unique.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = std::collections::HashSet::new();
        for drill in &self.drills {
            if !seen.insert(drill.id.as_str()) {
                return Err(ValidationError::DuplicateDrillId {
                    workout_id: self.id.clone(),
                    drill_id: drill.id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.drills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drills.is_empty()
    }
}
