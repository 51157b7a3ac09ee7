//! Run engine: the phase state machine driving a live practice session.
//!
//! The engine is a wall-clock-based state machine with no internal threads.
//! The caller drives it by invoking `tick()` periodically (roughly once a
//! second; the engine catches up on whole elapsed seconds) and passes the
//! current epoch-millisecond time into every time-dependent command, which
//! keeps the settle delay and warning threshold fully deterministic under
//! test.
//!
//! ## Phase Transitions
//!
//! ```text
//! Select -> Running -> Summary -> Select
//! ```
//!
//! Illegal commands for the current phase are no-ops returning `None`.
//! There is exactly one logical timer: arming a drill, skipping, pausing,
//! or leaving Running resets the tick baseline and cancels any pending
//! settle-advance, so stale callbacks can never touch a stale drill index.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::events::Event;
use crate::run::stats::{DrillStat, StatField};
use crate::run::summary::{self, SummaryTotals};
use crate::session::Session;
use crate::voice::VoiceBox;
use crate::workout::{Drill, DrillMode, Workout};

/// Grace period between a count target being reached and the drill being
/// finalized and advanced, in milliseconds. Lets the UI show the completing
/// shot before the transition.
pub const SETTLE_DELAY_MS: u64 = 300;

/// The countdown value at which the one-shot "30 seconds remaining"
/// announcement fires. Checked by exact equality on the post-decrement
/// value: drills whose countdown never passes through 31 (duration <= 31)
/// never warn. Deliberately not a `<= 30` threshold.
const WARN_AT_SECS_LEFT: u64 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Idle, choosing a workout.
    Select,
    /// A drill is active.
    Running,
    /// Reviewing stats before commit or discard.
    Summary,
}

/// Ephemeral state of one run, created at start and dropped at save or
/// discard. The stats vector is index-aligned with the frozen workout
/// snapshot for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RunState {
    workout: Workout,
    drill_idx: usize,
    stats: Vec<DrillStat>,
    total_elapsed_secs: u64,
    time_left_secs: u64,
    paused: bool,
    last_break_idx: Option<usize>,
    /// Whether the 30-second warning has fired for the current drill.
    warned: bool,
    /// Wall-clock arm time of the current drill; time_spent is finalized
    /// from this, not from the nominal duration.
    armed_at_ms: u64,
    /// Baseline for whole-second tick catch-up. Rebased on arm and on
    /// resume so paused spans produce no ticks.
    last_tick_ms: u64,
    /// Deadline of the one-shot settle advance, if a count target has been
    /// reached. At most one is outstanding per drill.
    pending_advance_at_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEngine {
    phase: Phase,
    catalog: Catalog,
    voice: VoiceBox,
    run: Option<RunState>,
}

impl RunEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            phase: Phase::Select,
            catalog,
            voice: VoiceBox::new(),
            run: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn drill_index(&self) -> usize {
        self.run.as_ref().map(|r| r.drill_idx).unwrap_or(0)
    }

    pub fn current_drill(&self) -> Option<&Drill> {
        let run = self.run.as_ref()?;
        run.workout.drills.get(run.drill_idx)
    }

    pub fn workout(&self) -> Option<&Workout> {
        self.run.as_ref().map(|r| &r.workout)
    }

    pub fn stats(&self) -> &[DrillStat] {
        self.run.as_ref().map(|r| r.stats.as_slice()).unwrap_or(&[])
    }

    pub fn time_left_secs(&self) -> u64 {
        self.run.as_ref().map(|r| r.time_left_secs).unwrap_or(0)
    }

    pub fn total_elapsed_secs(&self) -> u64 {
        self.run.as_ref().map(|r| r.total_elapsed_secs).unwrap_or(0)
    }

    pub fn is_paused(&self) -> bool {
        self.run.as_ref().map(|r| r.paused).unwrap_or(false)
    }

    /// Exercises completed since the previous break, eligible for in-break
    /// correction. Meaningful while the current drill is a break.
    pub fn exercise_window(&self) -> Vec<usize> {
        match &self.run {
            Some(r) => summary::exercise_window(&r.workout, r.last_break_idx, r.drill_idx),
            None => Vec::new(),
        }
    }

    /// Whole-run shot totals over non-break drills.
    pub fn summary_totals(&self) -> SummaryTotals {
        match &self.run {
            Some(r) => summary::summary_totals(&r.workout, &r.stats),
            None => SummaryTotals::default(),
        }
    }

    /// Take the pending announcement for delivery to the speech backend.
    pub fn take_utterance(&mut self) -> Option<String> {
        self.voice.take()
    }

    /// Look at the pending announcement without consuming it.
    pub fn pending_utterance(&self) -> Option<&str> {
        self.voice.peek()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            drill_index: self.drill_index(),
            drill_count: self.workout().map(|w| w.drills.len()).unwrap_or(0),
            time_left_secs: self.time_left_secs(),
            total_elapsed_secs: self.total_elapsed_secs(),
            paused: self.is_paused(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a run. Valid only from Select; the workout becomes a frozen
    /// snapshot and drill 0 is armed immediately. An empty workout is a
    /// no-op.
    pub fn start_workout(&mut self, workout: Workout, now_ms: u64) -> Option<Event> {
        if self.phase != Phase::Select || workout.drills.is_empty() {
            return None;
        }
        let workout_id = workout.id.clone();
        let drill_count = workout.drills.len();
        tracing::info!(workout = %workout_id, drills = drill_count, "run started");
        self.run = Some(RunState {
            stats: vec![DrillStat::default(); drill_count],
            workout,
            drill_idx: 0,
            total_elapsed_secs: 0,
            time_left_secs: 0,
            paused: false,
            last_break_idx: None,
            warned: false,
            armed_at_ms: now_ms,
            last_tick_ms: now_ms,
            pending_advance_at_ms: None,
        });
        self.phase = Phase::Running;
        self.arm_current(now_ms);
        Some(Event::RunStarted {
            workout_id,
            drill_count,
            at: Utc::now(),
        })
    }

    /// Advance the clock. Call roughly once a second; any cadence works.
    /// Returns the events produced: settle-advance firings, warnings, drill
    /// completions and the arming of the next drill.
    pub fn tick(&mut self, now_ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        if self.phase != Phase::Running {
            return events;
        }

        // One-shot settle advance for a reached count target.
        let due = self
            .run
            .as_ref()
            .and_then(|r| r.pending_advance_at_ms)
            .is_some_and(|deadline| now_ms >= deadline);
        if due {
            if let Some(run) = self.run.as_mut() {
                run.pending_advance_at_ms = None;
            }
            events.push(self.complete_current(now_ms));
            if let Some(ev) = self.advance_drill(now_ms) {
                events.push(ev);
            }
            return events;
        }

        let Some(run) = self.run.as_mut() else {
            return events;
        };
        let timed = run.workout.drills[run.drill_idx].is_timed();
        if !timed || run.paused {
            return events;
        }

        // A zero-length countdown (a timed drill armed with no duration)
        // is already expired; without this the loop below never decrements
        // and the drill stalls forever.
        let mut expired = run.time_left_secs == 0;
        while !expired && now_ms.saturating_sub(run.last_tick_ms) >= 1000 {
            run.last_tick_ms += 1000;
            run.time_left_secs -= 1;
            run.total_elapsed_secs += 1;
            if run.time_left_secs == WARN_AT_SECS_LEFT && !run.warned {
                run.warned = true;
                self.voice.say("30 seconds remaining");
                events.push(Event::ThirtySecondWarning {
                    drill_index: run.drill_idx,
                    at: Utc::now(),
                });
            }
            if run.time_left_secs == 0 {
                expired = true;
            }
        }
        if expired {
            events.push(self.complete_current(now_ms));
            if let Some(ev) = self.advance_drill(now_ms) {
                events.push(ev);
            }
        }
        events
    }

    /// Record one shot on the current drill. Legal only while Running and
    /// the current drill is not a break (timed exercises included). When a
    /// makes/attempts target is reached, schedules the one-shot settle
    /// advance; at most one may be pending.
    pub fn record_shot(&mut self, made: bool, now_ms: u64) -> Option<Event> {
        if self.phase != Phase::Running {
            return None;
        }
        let run = self.run.as_mut()?;
        let drill = &run.workout.drills[run.drill_idx];
        if drill.is_break() {
            return None;
        }
        let (mode, reps) = (drill.mode, drill.reps);
        let stat = &mut run.stats[run.drill_idx];
        stat.record_shot(made);
        let (makes, attempts) = (stat.makes, stat.attempts);
        let target_reached = match mode {
            DrillMode::Makes => makes >= reps,
            DrillMode::Attempts => attempts >= reps,
            DrillMode::Time => false,
        };
        if target_reached && run.pending_advance_at_ms.is_none() {
            run.pending_advance_at_ms = Some(now_ms + SETTLE_DELAY_MS);
            tracing::debug!(drill = run.drill_idx, "count target reached, settle advance scheduled");
        }
        Some(Event::ShotRecorded {
            drill_index: run.drill_idx,
            made,
            makes,
            attempts,
            at: Utc::now(),
        })
    }

    /// Apply a +/-1 correction to a drill's counters. Legal whenever a run
    /// exists (mid-run break review or summary review); clamped so that
    /// `makes <= attempts` always holds; never touches time spent. Returns
    /// the corrected stat.
    pub fn adjust_stat(&mut self, index: usize, field: StatField, delta: i32) -> Option<DrillStat> {
        let run = self.run.as_mut()?;
        let stat = run.stats.get_mut(index)?;
        stat.adjust(field, delta);
        Some(*stat)
    }

    /// Abandon the current drill: cancel pending work, finalize its time
    /// from the wall clock, and advance. Always legal while Running.
    pub fn skip_drill(&mut self, now_ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        if self.phase != Phase::Running {
            return events;
        }
        let Some(run) = self.run.as_mut() else {
            return events;
        };
        run.pending_advance_at_ms = None;
        let skipped = run.drill_idx;
        events.push(Event::DrillSkipped {
            drill_index: skipped,
            at: Utc::now(),
        });
        self.finalize_time(now_ms);
        if let Some(ev) = self.advance_drill(now_ms) {
            events.push(ev);
        }
        events
    }

    /// Pause or resume the countdown. Legal only while the current drill is
    /// timed. While paused no ticks occur; the paused span still counts
    /// toward the drill's wall-clock time spent.
    pub fn toggle_pause(&mut self, now_ms: u64) -> Option<Event> {
        if self.phase != Phase::Running {
            return None;
        }
        let run = self.run.as_mut()?;
        if !run.workout.drills[run.drill_idx].is_timed() {
            return None;
        }
        run.paused = !run.paused;
        let at = Utc::now();
        if run.paused {
            Some(Event::RunPaused {
                time_left_secs: run.time_left_secs,
                at,
            })
        } else {
            // Rebase so the paused span produces no catch-up ticks.
            run.last_tick_ms = now_ms;
            Some(Event::RunResumed {
                time_left_secs: run.time_left_secs,
                at,
            })
        }
    }

    /// Drop the run without emitting a session. Legal only from Summary.
    pub fn discard(&mut self) -> Option<Event> {
        if self.phase != Phase::Summary {
            return None;
        }
        self.run = None;
        self.phase = Phase::Select;
        self.voice.clear();
        tracing::info!("run discarded");
        Some(Event::RunDiscarded { at: Utc::now() })
    }

    /// Build the immutable session record from the current (possibly
    /// adjusted) stats and return it exactly once, transferring ownership
    /// to the caller. Legal only from Summary; resets to Select.
    pub fn save_session(&mut self) -> Option<Session> {
        if self.phase != Phase::Summary {
            return None;
        }
        let run = self.run.take()?;
        let session = summary::build_session(&run.workout, &run.stats, run.total_elapsed_secs);
        self.phase = Phase::Select;
        tracing::info!(session = %session.id, total_secs = session.total_time_secs, "session saved");
        Some(session)
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Arm the current drill: reset every per-drill timer/flag field and
    /// announce it. The single reset point for the warned flag, the tick
    /// baseline, and the pending settle advance.
    fn arm_current(&mut self, now_ms: u64) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let drill = &run.workout.drills[run.drill_idx];
        let announcement = if drill.is_break() {
            format!("{}. Take a rest.", drill.name)
        } else {
            let labels = self.catalog.labels(drill);
            [
                drill.name.as_str(),
                labels.category.as_str(),
                labels.subcategory.as_str(),
            ]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
        };
        let timed = drill.is_timed();
        let duration = drill.duration_secs;
        run.pending_advance_at_ms = None;
        run.armed_at_ms = now_ms;
        run.last_tick_ms = now_ms;
        run.warned = false;
        run.paused = false;
        run.time_left_secs = if timed { duration } else { 0 };
        tracing::debug!(drill = run.drill_idx, timed, "drill armed");
        self.voice.say(announcement);
    }

    /// Finalize the current drill's time spent as the rounded wall-clock
    /// delta since arm (tolerates scheduling jitter, includes paused spans).
    fn finalize_time(&mut self, now_ms: u64) {
        if let Some(run) = self.run.as_mut() {
            let elapsed_ms = now_ms.saturating_sub(run.armed_at_ms);
            run.stats[run.drill_idx].time_spent_secs = (elapsed_ms + 500) / 1000;
        }
    }

    /// Finalize the current drill and emit its completion event.
    fn complete_current(&mut self, now_ms: u64) -> Event {
        self.finalize_time(now_ms);
        let (drill_index, time_spent_secs) = match self.run.as_ref() {
            Some(r) => (r.drill_idx, r.stats[r.drill_idx].time_spent_secs),
            None => (0, 0),
        };
        Event::DrillCompleted {
            drill_index,
            time_spent_secs,
            at: Utc::now(),
        }
    }

    /// Move past the current drill: record break bookkeeping, then either
    /// arm the next drill or transition to Summary at the terminal drill.
    fn advance_drill(&mut self, now_ms: u64) -> Option<Event> {
        let run = self.run.as_mut()?;
        if run.workout.drills[run.drill_idx].is_break() {
            run.last_break_idx = Some(run.drill_idx);
        }
        let next = run.drill_idx + 1;
        if next >= run.workout.drills.len() {
            run.pending_advance_at_ms = None;
            self.phase = Phase::Summary;
            let total = run.total_elapsed_secs;
            tracing::info!(total_secs = total, "workout complete");
            self.voice.say("Workout complete. Great work!");
            Some(Event::WorkoutCompleted {
                total_elapsed_secs: total,
                at: Utc::now(),
            })
        } else {
            run.drill_idx = next;
            let (kind, duration_secs) = {
                let drill = &run.workout.drills[next];
                (drill.kind, drill.duration_secs)
            };
            self.voice.say("Next drill");
            self.arm_current(now_ms);
            Some(Event::DrillArmed {
                drill_index: next,
                kind,
                duration_secs,
                at: Utc::now(),
            })
        }
    }
}

impl Default for RunEngine {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

/// Current wall-clock time in epoch milliseconds, for production callers.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
