use std::fs;
use std::path::PathBuf;

use clap::Subcommand;
use courtside_core::history;
use courtside_core::{Catalog, Session};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Aggregate a sessions file into global and per-category rollups
    Summary {
        /// Path to a JSON file holding an array of sessions
        file: PathBuf,
        /// Path to a category catalog JSON file
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Print the rollups as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StatsAction::Summary {
            file,
            catalog,
            json,
        } => {
            let sessions: Vec<Session> = serde_json::from_str(&fs::read_to_string(&file)?)?;
            let catalog: Catalog = match catalog {
                Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
                None => Catalog::default(),
            };

            let global = history::global_stats(&sessions);
            let by_category = history::category_stats(&sessions, &catalog);
            let by_subcategory = history::subcategory_stats(&sessions, &catalog);

            if json {
                let report = serde_json::json!({
                    "global": global,
                    "by_category": by_category,
                    "by_subcategory": by_subcategory,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            let pct = |p: Option<u32>| p.map(|p| format!("{p}%")).unwrap_or_else(|| "-".into());
            println!(
                "{} workouts, {}s trained, {}/{} ({})",
                global.workouts,
                global.time_secs,
                global.makes,
                global.attempts,
                pct(global.shooting_pct())
            );
            for row in &by_category {
                println!(
                    "  {}: {}/{} ({})",
                    row.name,
                    row.makes,
                    row.attempts,
                    pct(row.shooting_pct())
                );
            }
            for row in &by_subcategory {
                println!(
                    "  {} / {}: {}/{} ({}, goal {}%)",
                    row.category_name,
                    row.name,
                    row.makes,
                    row.attempts,
                    pct(row.shooting_pct()),
                    row.goal
                );
            }
            Ok(())
        }
    }
}
