//! Crop Diagnostics
//!
//! Rule-based agronomic diagnostics for per-plant cultivation metrics.
//!
//! - `diagnostics/`: severity classification and report composition
//! - `growth`: recent vs average growth comparison
//! - `prescription/`: remediation steps from a pre-trained classifier
//! - `api_server`: Axum endpoints (feature `api`)

pub mod error;
pub mod config;
pub mod diagnostics;
pub mod growth;
pub mod prescription;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use error::DiagnosticError;
pub use config::ServerConfig;
pub use diagnostics::{
    compose_report, compose_reports, BatchReport, CropType, NetYieldLabel, Observation,
    PlantReport, WitheredLabel, YieldLabel,
};
pub use growth::{compare_growth, GrowthComparison, GrowthVerdict};
pub use prescription::{
    split_prescription, ForestClassifier, Prescription, PrescriptionAdapter,
    PrescriptionClassifier, PrescriptionRequest,
};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
