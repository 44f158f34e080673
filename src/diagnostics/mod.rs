//! Severity diagnostics for cultivation observations
//!
//! - `types`: crop types, observations and the per-axis severity labels
//! - `classify`: threshold rules for the withered, yield and net-yield axes
//! - `report`: per-plant narratives and batch label sequences
//! - `coerce`: JSON rows into observations
//! - `frame`: Polars tables into observations

pub mod types;
pub mod classify;
pub mod report;
pub mod coerce;
pub mod frame;

pub use types::{CropType, NetYieldLabel, Observation, WitheredLabel, YieldLabel};
pub use classify::{classify_net_yield, classify_withered, classify_yield};
pub use report::{compose_report, compose_reports, BatchReport, PlantReport};
pub use coerce::observations_from_json;
pub use frame::{load_observation_table, observations_from_frame};
