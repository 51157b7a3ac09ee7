//! Immutable session records: the terminal artifact of a run.
//!
//! Built exactly once at save time; the engine hands the record to the
//! caller and retains no reference afterward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-drill snapshot, one per workout drill in order.
///
/// Breaks are included with their recorded time and zero makes/attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDrill {
    pub drill_id: String,
    pub drill_name: String,
    #[serde(default)]
    pub cat_id: Option<String>,
    #[serde(default)]
    pub sub_id: Option<String>,
    pub makes: u32,
    pub attempts: u32,
    pub time_spent_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub workout_id: String,
    pub workout_name: String,
    pub date: DateTime<Utc>,
    pub total_time_secs: u64,
    pub drills: Vec<SessionDrill>,
}
