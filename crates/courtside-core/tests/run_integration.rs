//! End-to-end run of a mixed workout in simulated time.
//!
//! Drives the engine the way a frontend would: one tick per simulated
//! second, shots recorded against count-target drills, a mid-break
//! correction, and a final summary edit before save.

use courtside_core::{
    Catalog, Category, Drill, DrillKind, DrillMode, Event, Phase, RunEngine, StatField,
    Subcategory, Workout, SETTLE_DELAY_MS,
};

fn exercise(id: &str, mode: DrillMode, duration_secs: u64, reps: u32) -> Drill {
    Drill {
        id: id.into(),
        name: id.to_uppercase(),
        kind: DrillKind::Exercise,
        mode,
        duration_secs,
        reps,
        cat_id: Some("shooting".into()),
        sub_id: Some("spot".into()),
    }
}

fn rest(id: &str, duration_secs: u64) -> Drill {
    Drill {
        id: id.into(),
        name: "Rest".into(),
        kind: DrillKind::Break,
        mode: DrillMode::Time,
        duration_secs,
        reps: 0,
        cat_id: None,
        sub_id: None,
    }
}

fn catalog() -> Catalog {
    Catalog::new(vec![Category {
        id: "shooting".into(),
        name: "Shooting".into(),
        goal: Some(50),
        subcategories: vec![Subcategory {
            id: "spot".into(),
            name: "Spot Up".into(),
            goal: Some(60),
        }],
    }])
}

/// Advance simulated time one second at a time, collecting events.
fn run_secs(engine: &mut RunEngine, now: &mut u64, secs: u64) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..secs {
        *now += 1000;
        events.extend(engine.tick(*now));
    }
    events
}

#[test]
fn full_run_from_select_to_saved_session() {
    let workout = Workout {
        id: "w-full".into(),
        name: "Full Court".into(),
        drills: vec![
            exercise("warmup", DrillMode::Time, 40, 0),
            exercise("spots", DrillMode::Makes, 0, 3),
            rest("water", 10),
            exercise("closeouts", DrillMode::Attempts, 0, 4),
        ],
    };
    workout.validate().expect("valid template");

    let mut engine = RunEngine::new(catalog());
    let mut now = 1_700_000_000_000;

    assert!(engine.start_workout(workout, now).is_some());
    assert_eq!(engine.phase(), Phase::Running);
    assert_eq!(
        engine.take_utterance().as_deref(),
        Some("WARMUP, Shooting, Spot Up")
    );

    // Drill 0: 40s timed exercise with a couple of shots along the way.
    run_secs(&mut engine, &mut now, 9);
    engine.record_shot(true, now);
    let events = run_secs(&mut engine, &mut now, 31);
    assert!(!events
        .iter()
        .any(|e| matches!(e, Event::ThirtySecondWarning { .. })));
    assert_eq!(engine.drill_index(), 1);
    assert_eq!(engine.total_elapsed_secs(), 40);
    assert_eq!(engine.stats()[0].time_spent_secs, 40);

    // Drill 1: three makes trigger the settle advance.
    engine.record_shot(true, now);
    engine.record_shot(false, now);
    engine.record_shot(true, now);
    engine.record_shot(true, now);
    assert_eq!(engine.drill_index(), 1);
    now += SETTLE_DELAY_MS;
    engine.tick(now);
    assert_eq!(engine.drill_index(), 2);

    // Drill 2: the break exposes the drills completed since the start.
    assert_eq!(engine.exercise_window(), vec![0, 1]);
    // Correct a phantom attempt during the break.
    let stat = engine.adjust_stat(1, StatField::Attempts, -1).unwrap();
    assert_eq!(stat.attempts, 3);
    assert_eq!(stat.makes, 3);
    run_secs(&mut engine, &mut now, 10);
    assert_eq!(engine.drill_index(), 3);

    // Drill 3: four attempts, then the terminal advance.
    for made in [true, false, false, true] {
        engine.record_shot(made, now);
    }
    now += SETTLE_DELAY_MS;
    let events = engine.tick(now);
    assert_eq!(engine.phase(), Phase::Summary);
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::WorkoutCompleted { .. })));

    // Summary review: pull one make off the warmup drill.
    engine.adjust_stat(0, StatField::Makes, -1).unwrap();
    let totals = engine.summary_totals();
    assert_eq!(totals.makes, 5);
    assert_eq!(totals.attempts, 8);
    assert_eq!(totals.shooting_pct(), Some(63));

    let session = engine.save_session().expect("session emitted once");
    assert_eq!(engine.phase(), Phase::Select);
    assert!(engine.save_session().is_none());

    // Round trip: session totals match the summary totals at save time.
    assert_eq!(session.drills.len(), 4);
    let (makes, attempts) = session
        .drills
        .iter()
        .filter(|d| d.drill_id != "water")
        .fold((0, 0), |(m, a), d| (m + d.makes, a + d.attempts));
    assert_eq!((makes, attempts), (totals.makes, totals.attempts));
    // Breaks carry their time but no shots.
    let water = &session.drills[2];
    assert_eq!(water.makes, 0);
    assert_eq!(water.attempts, 0);
    assert_eq!(water.time_spent_secs, 10);
    assert_eq!(session.total_time_secs, 50);
}

#[test]
fn discard_leaves_no_trace() {
    let workout = Workout {
        id: "w-discard".into(),
        name: "Short".into(),
        drills: vec![exercise("only", DrillMode::Makes, 0, 1)],
    };
    let mut engine = RunEngine::new(Catalog::default());
    let mut now = 0;
    engine.start_workout(workout, now);
    engine.record_shot(true, now);
    now += SETTLE_DELAY_MS;
    engine.tick(now);
    assert_eq!(engine.phase(), Phase::Summary);

    assert!(engine.discard().is_some());
    assert_eq!(engine.phase(), Phase::Select);
    assert!(engine.stats().is_empty());
    assert!(engine.save_session().is_none());
}
