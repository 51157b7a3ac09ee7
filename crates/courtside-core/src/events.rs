use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::run::Phase;
use crate::workout::DrillKind;

/// Every state change in a run produces an Event.
/// Frontends poll for events; tests assert on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    RunStarted {
        workout_id: String,
        drill_count: usize,
        at: DateTime<Utc>,
    },
    DrillArmed {
        drill_index: usize,
        kind: DrillKind,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    ShotRecorded {
        drill_index: usize,
        made: bool,
        makes: u32,
        attempts: u32,
        at: DateTime<Utc>,
    },
    /// Exactly-once per drill, when the countdown passes through 31 remaining.
    ThirtySecondWarning {
        drill_index: usize,
        at: DateTime<Utc>,
    },
    DrillCompleted {
        drill_index: usize,
        time_spent_secs: u64,
        at: DateTime<Utc>,
    },
    DrillSkipped {
        drill_index: usize,
        at: DateTime<Utc>,
    },
    RunPaused {
        time_left_secs: u64,
        at: DateTime<Utc>,
    },
    RunResumed {
        time_left_secs: u64,
        at: DateTime<Utc>,
    },
    WorkoutCompleted {
        total_elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    SessionSaved {
        session_id: String,
        at: DateTime<Utc>,
    },
    RunDiscarded {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        drill_index: usize,
        drill_count: usize,
        time_left_secs: u64,
        total_elapsed_secs: u64,
        paused: bool,
        at: DateTime<Utc>,
    },
}
