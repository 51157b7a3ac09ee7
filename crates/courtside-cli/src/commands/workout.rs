use std::fs;
use std::path::PathBuf;

use clap::Subcommand;
use courtside_core::{DrillKind, DrillMode, Workout};

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Validate a workout file and print its drills
    Show {
        /// Path to a workout JSON file
        file: PathBuf,
        /// Print the workout as JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: WorkoutAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        WorkoutAction::Show { file, json } => {
            let workout: Workout = serde_json::from_str(&fs::read_to_string(&file)?)?;
            workout.validate()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&workout)?);
                return Ok(());
            }
            println!("{} ({} drills)", workout.name, workout.drills.len());
            for (i, drill) in workout.drills.iter().enumerate() {
                let detail = match (drill.kind, drill.mode) {
                    (DrillKind::Break, _) => format!("break, {}s", drill.duration_secs),
                    (_, DrillMode::Time) => format!("timed, {}s", drill.duration_secs),
                    (_, DrillMode::Makes) => format!("{} makes", drill.reps),
                    (_, DrillMode::Attempts) => format!("{} attempts", drill.reps),
                };
                println!("  {:>2}. {} [{}]", i + 1, drill.name, detail);
            }
            Ok(())
        }
    }
}
