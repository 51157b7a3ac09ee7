pub mod run;
pub mod stats;
pub mod workout;
