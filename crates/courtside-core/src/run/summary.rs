//! End-of-run aggregation: break review windows, summary totals, and the
//! final immutable session record.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::run::stats::DrillStat;
use crate::session::{Session, SessionDrill};
use crate::workout::Workout;

/// Exercise indices completed since the previous break: `last_break < i <
/// current`, breaks excluded. These are the drills eligible for correction
/// while resting.
pub fn exercise_window(
    workout: &Workout,
    last_break_idx: Option<usize>,
    current_idx: usize,
) -> Vec<usize> {
    let floor = last_break_idx.map(|i| i + 1).unwrap_or(0);
    (floor..current_idx.min(workout.drills.len()))
        .filter(|&i| !workout.drills[i].is_break())
        .collect()
}

/// Whole-run shot totals over non-break drills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub makes: u32,
    pub attempts: u32,
}

impl SummaryTotals {
    /// Rounded shooting percentage; `None` when no attempts were taken
    /// (callers display a placeholder, not zero).
    pub fn shooting_pct(&self) -> Option<u32> {
        if self.attempts == 0 {
            return None;
        }
        Some((f64::from(self.makes) / f64::from(self.attempts) * 100.0).round() as u32)
    }
}

pub fn summary_totals(workout: &Workout, stats: &[DrillStat]) -> SummaryTotals {
    let mut totals = SummaryTotals::default();
    for (drill, stat) in workout.drills.iter().zip(stats) {
        if drill.is_break() {
            continue;
        }
        totals.makes += stat.makes;
        totals.attempts += stat.attempts;
    }
    totals
}

/// Build the terminal session record from the current (possibly manually
/// adjusted) stats. Breaks are included with zero makes/attempts by
/// construction of the recorder.
pub fn build_session(workout: &Workout, stats: &[DrillStat], total_time_secs: u64) -> Session {
    Session {
        id: Uuid::new_v4().to_string(),
        workout_id: workout.id.clone(),
        workout_name: workout.name.clone(),
        date: Utc::now(),
        total_time_secs,
        drills: workout
            .drills
            .iter()
            .zip(stats)
            .map(|(drill, stat)| SessionDrill {
                drill_id: drill.id.clone(),
                drill_name: drill.name.clone(),
                cat_id: drill.cat_id.clone(),
                sub_id: drill.sub_id.clone(),
                makes: stat.makes,
                attempts: stat.attempts,
                time_spent_secs: stat.time_spent_secs,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::{Drill, DrillKind, DrillMode};

    fn exercise(id: &str) -> Drill {
        Drill {
            id: id.into(),
            name: id.to_uppercase(),
            kind: DrillKind::Exercise,
            mode: DrillMode::Makes,
            duration_secs: 0,
            reps: 5,
            cat_id: None,
            sub_id: None,
        }
    }

    fn rest(id: &str) -> Drill {
        Drill {
            id: id.into(),
            name: "Rest".into(),
            kind: DrillKind::Break,
            mode: DrillMode::Time,
            duration_secs: 30,
            reps: 0,
            cat_id: None,
            sub_id: None,
        }
    }

    fn workout(drills: Vec<Drill>) -> Workout {
        Workout {
            id: "w1".into(),
            name: "Practice".into(),
            drills,
        }
    }

    #[test]
    fn window_covers_exercises_since_last_break() {
        // [A, B, BREAK, C, BREAK]: at the second break only C is in scope.
        let w = workout(vec![
            exercise("a"),
            exercise("b"),
            rest("r1"),
            exercise("c"),
            rest("r2"),
        ]);
        assert_eq!(exercise_window(&w, Some(2), 4), vec![3]);
    }

    #[test]
    fn window_before_any_break_starts_at_zero() {
        let w = workout(vec![exercise("a"), exercise("b"), rest("r1")]);
        assert_eq!(exercise_window(&w, None, 2), vec![0, 1]);
    }

    #[test]
    fn window_excludes_breaks_and_current() {
        let w = workout(vec![exercise("a"), rest("r1"), exercise("b")]);
        assert_eq!(exercise_window(&w, None, 1), vec![0]);
        assert_eq!(exercise_window(&w, Some(1), 2), Vec::<usize>::new());
    }

    #[test]
    fn totals_skip_breaks() {
        let w = workout(vec![exercise("a"), rest("r1"), exercise("b")]);
        let stats = vec![
            DrillStat { makes: 3, attempts: 5, time_spent_secs: 40 },
            DrillStat { makes: 0, attempts: 0, time_spent_secs: 30 },
            DrillStat { makes: 7, attempts: 10, time_spent_secs: 60 },
        ];
        let totals = summary_totals(&w, &stats);
        assert_eq!(totals, SummaryTotals { makes: 10, attempts: 15 });
        assert_eq!(totals.shooting_pct(), Some(67));
    }

    #[test]
    fn pct_is_none_with_no_attempts() {
        assert_eq!(SummaryTotals::default().shooting_pct(), None);
    }

    #[test]
    fn session_mirrors_workout_order_and_stats() {
        let w = workout(vec![exercise("a"), rest("r1")]);
        let stats = vec![
            DrillStat { makes: 4, attempts: 6, time_spent_secs: 55 },
            DrillStat { makes: 0, attempts: 0, time_spent_secs: 31 },
        ];
        let session = build_session(&w, &stats, 86);
        assert_eq!(session.workout_id, "w1");
        assert_eq!(session.total_time_secs, 86);
        assert_eq!(session.drills.len(), 2);
        assert_eq!(session.drills[0].drill_id, "a");
        assert_eq!(session.drills[0].makes, 4);
        assert_eq!(session.drills[1].makes, 0);
        assert_eq!(session.drills[1].time_spent_secs, 31);
    }

    #[test]
    fn session_totals_match_summary_totals() {
        let w = workout(vec![exercise("a"), rest("r1"), exercise("b")]);
        let stats = vec![
            DrillStat { makes: 2, attempts: 4, time_spent_secs: 10 },
            DrillStat { makes: 0, attempts: 0, time_spent_secs: 20 },
            DrillStat { makes: 5, attempts: 5, time_spent_secs: 30 },
        ];
        let totals = summary_totals(&w, &stats);
        let session = build_session(&w, &stats, 60);
        let (m, a) = session
            .drills
            .iter()
            .zip(&w.drills)
            .filter(|(_, d)| !d.is_break())
            .fold((0, 0), |(m, a), (sd, _)| (m + sd.makes, a + sd.attempts));
        assert_eq!((totals.makes, totals.attempts), (m, a));
    }
}
