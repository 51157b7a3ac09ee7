use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use courtside_core::{now_ms, Catalog, Event, Phase, RunEngine, Workout};

#[derive(Subcommand)]
pub enum RunAction {
    /// Drive a workout end to end in simulated time and print the session
    Simulate {
        /// Path to a workout JSON file
        file: PathBuf,
        /// Path to a category catalog JSON file
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Percentage of simulated shots that are makes
        #[arg(long, default_value = "60")]
        makes_pct: u32,
    },
}

pub fn run(action: RunAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RunAction::Simulate {
            file,
            catalog,
            makes_pct,
        } => simulate(&file, catalog.as_deref(), makes_pct.min(100)),
    }
}

fn print_event(event: &Event) {
    if let Ok(line) = serde_json::to_string(event) {
        println!("{line}");
    }
}

fn simulate(
    file: &std::path::Path,
    catalog: Option<&std::path::Path>,
    makes_pct: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let workout: Workout = serde_json::from_str(&fs::read_to_string(file)?)?;
    workout.validate()?;
    let catalog: Catalog = match catalog {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Catalog::default(),
    };

    let mut engine = RunEngine::new(catalog);
    let mut now = now_ms();
    match engine.start_workout(workout, now) {
        Some(event) => print_event(&event),
        None => return Err("workout has no drills".into()),
    }

    // Evenly spread makes over the simulated shots.
    let mut shot_acc = 0u32;
    // Generous bound: one simulated second or shot per iteration.
    let mut budget = 1_000_000u64;
    while engine.phase() == Phase::Running && budget > 0 {
        budget -= 1;
        if let Some(text) = engine.take_utterance() {
            println!("[voice] {text}");
        }
        let timed = engine
            .current_drill()
            .map(|d| d.is_timed())
            .unwrap_or(false);
        if !timed {
            shot_acc += makes_pct;
            let made = shot_acc >= 100;
            if made {
                shot_acc -= 100;
            }
            if let Some(event) = engine.record_shot(made, now) {
                print_event(&event);
            }
        }
        now += 1000;
        for event in engine.tick(now) {
            print_event(&event);
        }
    }
    if let Some(text) = engine.take_utterance() {
        println!("[voice] {text}");
    }
    if engine.phase() != Phase::Summary {
        return Err("simulation did not reach the summary phase".into());
    }

    let totals = engine.summary_totals();
    let pct = totals
        .shooting_pct()
        .map(|p| format!("{p}%"))
        .unwrap_or_else(|| "-".into());
    println!(
        "summary: {}/{} ({pct}) in {}s",
        totals.makes,
        totals.attempts,
        engine.total_elapsed_secs()
    );

    let session = engine
        .save_session()
        .ok_or("engine refused to emit a session")?;
    print_event(&Event::SessionSaved {
        session_id: session.id.clone(),
        at: Utc::now(),
    });
    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}
