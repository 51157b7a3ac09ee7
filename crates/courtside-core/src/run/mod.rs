//! The run session engine: controller, per-drill counters, aggregation.

mod engine;
mod stats;
mod summary;

pub use engine::{now_ms, Phase, RunEngine, SETTLE_DELAY_MS};
pub use stats::{DrillStat, StatField};
pub use summary::{build_session, exercise_window, summary_totals, SummaryTotals};
