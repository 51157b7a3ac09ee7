//! Rollups over saved sessions: global totals and per-category /
//! per-subcategory shooting percentages measured against goals.
//!
//! Display is an external concern; this module only does the math.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::session::Session;

fn shooting_pct(makes: u32, attempts: u32) -> Option<u32> {
    if attempts == 0 {
        return None;
    }
    Some((f64::from(makes) / f64::from(attempts) * 100.0).round() as u32)
}

/// Whole-history totals across every saved session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub workouts: usize,
    pub time_secs: u64,
    pub makes: u32,
    pub attempts: u32,
}

impl GlobalStats {
    pub fn shooting_pct(&self) -> Option<u32> {
        shooting_pct(self.makes, self.attempts)
    }
}

/// How a shooting percentage tracks against its goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalRating {
    /// At least 10 points above goal.
    Ahead,
    /// At or above goal.
    OnTrack,
    /// Up to 5 points below goal.
    Behind,
    /// More than 5 points below goal.
    FarBehind,
}

impl GoalRating {
    /// Rate an actual percentage against a goal; `None` when no shots were
    /// taken.
    pub fn rate(actual_pct: Option<u32>, goal: u32) -> Option<GoalRating> {
        let actual = actual_pct?;
        let diff = i64::from(actual) - i64::from(goal);
        Some(if diff >= 10 {
            GoalRating::Ahead
        } else if diff >= 0 {
            GoalRating::OnTrack
        } else if diff >= -5 {
            GoalRating::Behind
        } else {
            GoalRating::FarBehind
        })
    }
}

/// Shot totals for one category across the whole history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    pub cat_id: String,
    pub name: String,
    pub goal: Option<u32>,
    pub makes: u32,
    pub attempts: u32,
}

impl CategoryStats {
    pub fn shooting_pct(&self) -> Option<u32> {
        shooting_pct(self.makes, self.attempts)
    }

    pub fn goal_rating(&self) -> Option<GoalRating> {
        GoalRating::rate(self.shooting_pct(), self.goal?)
    }
}

/// Shot totals for one subcategory, with its parent category name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcategoryStats {
    pub sub_id: String,
    pub name: String,
    pub category_name: String,
    /// Defaults to 50 when the subcategory has no explicit goal.
    pub goal: u32,
    pub makes: u32,
    pub attempts: u32,
}

impl SubcategoryStats {
    pub fn shooting_pct(&self) -> Option<u32> {
        shooting_pct(self.makes, self.attempts)
    }

    pub fn goal_rating(&self) -> Option<GoalRating> {
        GoalRating::rate(self.shooting_pct(), self.goal)
    }
}

pub fn global_stats(sessions: &[Session]) -> GlobalStats {
    let mut stats = GlobalStats {
        workouts: sessions.len(),
        ..GlobalStats::default()
    };
    for session in sessions {
        stats.time_secs += session.total_time_secs;
        for drill in &session.drills {
            stats.makes += drill.makes;
            stats.attempts += drill.attempts;
        }
    }
    stats
}

/// Per-category rollup, sorted by attempts descending. Categories with no
/// recorded attempts and drills with unknown category ids are dropped.
pub fn category_stats(sessions: &[Session], catalog: &Catalog) -> Vec<CategoryStats> {
    let mut by_cat: HashMap<&str, (u32, u32)> = HashMap::new();
    for session in sessions {
        for drill in &session.drills {
            if let Some(cat_id) = drill.cat_id.as_deref() {
                let entry = by_cat.entry(cat_id).or_default();
                entry.0 += drill.makes;
                entry.1 += drill.attempts;
            }
        }
    }
    let mut rows: Vec<CategoryStats> = catalog
        .categories
        .iter()
        .filter_map(|cat| {
            let &(makes, attempts) = by_cat.get(cat.id.as_str())?;
            (attempts > 0).then(|| CategoryStats {
                cat_id: cat.id.clone(),
                name: cat.name.clone(),
                goal: cat.goal,
                makes,
                attempts,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.attempts.cmp(&a.attempts));
    rows
}

/// Per-subcategory rollup, sorted by attempts descending.
pub fn subcategory_stats(sessions: &[Session], catalog: &Catalog) -> Vec<SubcategoryStats> {
    let mut by_sub: HashMap<&str, (u32, u32)> = HashMap::new();
    for session in sessions {
        for drill in &session.drills {
            if let Some(sub_id) = drill.sub_id.as_deref() {
                let entry = by_sub.entry(sub_id).or_default();
                entry.0 += drill.makes;
                entry.1 += drill.attempts;
            }
        }
    }
    let mut rows = Vec::new();
    for cat in &catalog.categories {
        for sub in &cat.subcategories {
            if let Some(&(makes, attempts)) = by_sub.get(sub.id.as_str()) {
                rows.push(SubcategoryStats {
                    sub_id: sub.id.clone(),
                    name: sub.name.clone(),
                    category_name: cat.name.clone(),
                    goal: sub.goal.unwrap_or(50),
                    makes,
                    attempts,
                });
            }
        }
    }
    rows.sort_by(|a, b| b.attempts.cmp(&a.attempts));
    rows
}
