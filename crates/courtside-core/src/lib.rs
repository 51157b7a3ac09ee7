//! # Courtside Core Library
//!
//! Core business logic for Courtside, a live practice-session runner for
//! drill-based workouts. The CLI binary is a thin layer over this crate;
//! any other frontend drives the same engine.
//!
//! ## Architecture
//!
//! - **Run Engine**: a wall-clock-based phase state machine
//!   (`select -> running -> summary`) that requires the caller to
//!   periodically invoke `tick()` with the current time. It arms one drill
//!   at a time, counts down timed drills, records shots, and schedules the
//!   settle advance when a count target is reached.
//! - **Aggregation**: break review windows, summary totals, and the
//!   immutable [`Session`] record built exactly once at save.
//! - **History**: rollups over saved sessions against category goals.
//!
//! ## Key Components
//!
//! - [`RunEngine`]: the session controller and drill timer
//! - [`Workout`] / [`Catalog`]: read-only templates supplied by the caller
//! - [`VoiceBox`]: single-slot announcement mailbox for a speech backend
//! - [`Event`]: state-change events for frontends and tests

pub mod catalog;
pub mod error;
pub mod events;
pub mod history;
pub mod logging;
pub mod run;
pub mod session;
pub mod voice;
pub mod workout;

pub use catalog::{Catalog, Category, DrillLabels, Subcategory};
pub use error::{CoreError, Result, ValidationError};
pub use events::Event;
pub use run::{now_ms, DrillStat, Phase, RunEngine, StatField, SummaryTotals, SETTLE_DELAY_MS};
pub use session::{Session, SessionDrill};
pub use voice::VoiceBox;
pub use workout::{Drill, DrillKind, DrillMode, Workout};
