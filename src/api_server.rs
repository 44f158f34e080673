// Axum API Server Module
//
// Purpose: JSON endpoints for batch crop reports, growth comparison and
// prescription lookup. All handlers are thin: coerce input, call the core,
// serialize the result.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::diagnostics::coerce::{number_field, observations_from_json};
use crate::diagnostics::compose_reports;
use crate::error::DiagnosticError;
use crate::growth::compare_growth;
use crate::prescription::{
    prescription_requests_from_json, ForestClassifier, Prescription, PrescriptionAdapter,
    PrescriptionClassifier,
};

// ============================================================================
// Application State
// ============================================================================

/// Shared, read-only state. The classifier is loaded once and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub prescriptions: PrescriptionAdapter,
}

impl AppState {
    /// Load the prescription model named by the configuration
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading prescription model from {}", config.model_path.display());
        let forest = ForestClassifier::from_json_file(&config.model_path)?;
        tracing::info!(
            "Loaded forest with {} trees and {} classes",
            forest.n_trees(),
            forest.classes().len()
        );
        Ok(Self::with_classifier(Arc::new(forest)))
    }

    /// Use an already constructed classifier
    pub fn with_classifier(classifier: Arc<dyn PrescriptionClassifier>) -> Self {
        Self {
            prescriptions: PrescriptionAdapter::new(classifier),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Severity reports for a batch of observations
        .route("/pre-defined", post(generate_reports))

        // Recent vs average growth
        .route("/growth-rate", post(compare_growth_rate))

        // Remediation steps from the pre-trained classifier
        .route("/predict-prescription", post(predict_prescription))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "model": state.prescriptions.classifier_name(),
    }))
}

/// Unwrap a JSON body, turning axum's plain-text rejection (bad syntax,
/// missing content type) into the service's own error payload.
fn json_body(payload: Result<Json<serde_json::Value>, JsonRejection>) -> Result<serde_json::Value, AppError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(DiagnosticError::malformed("body", None, rejection.body_text()).into()),
    }
}

async fn generate_reports(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let payload = json_body(payload)?;
    let observations = observations_from_json(&payload)?;
    tracing::info!("Generating reports for {} observations", observations.len());

    let batch = compose_reports(&observations)?;
    Ok(Json(batch.to_json()))
}

async fn compare_growth_rate(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let payload = json_body(payload)?;
    let body = payload.as_object().ok_or_else(|| {
        DiagnosticError::malformed("body", None, "expected a JSON object")
    })?;

    let average = number_field(body, "average_growth", None)?;
    let recent = number_field(body, "recent_growth", None)?;

    let comparison = compare_growth(average, recent);
    tracing::info!(
        "Growth comparison average={} recent={} -> {:?}",
        average,
        recent,
        comparison.verdict
    );

    Ok(Json(serde_json::json!({ "result": comparison.message })))
}

async fn predict_prescription(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Vec<Prescription>>, AppError> {
    let payload = json_body(payload)?;
    let requests = prescription_requests_from_json(&payload)?;
    tracing::info!("Predicting prescriptions for {} requests", requests.len());

    // CPU-bound inference: run on the blocking pool, rayon fans out inside
    let adapter = state.prescriptions.clone();
    let predictions = tokio::task::spawn_blocking(move || adapter.prescribe_batch(&requests))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(predictions))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    Diagnostic(DiagnosticError),
    Internal(String),
}

impl From<DiagnosticError> for AppError {
    fn from(err: DiagnosticError) -> Self {
        AppError::Diagnostic(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, kind, message) = match self {
            AppError::Diagnostic(err) => {
                let status = match &err {
                    DiagnosticError::MalformedInput { .. } => StatusCode::BAD_REQUEST,
                    DiagnosticError::UnrecognizedCategory { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    DiagnosticError::CollaboratorFailure(_) => StatusCode::BAD_GATEWAY,
                };
                tracing::warn!("Rejecting request: {}", err);
                (status, err.kind(), err.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg)
            }
        };

        let body = Json(serde_json::json!({
            "status": "error",
            "kind": kind,
            "message": message,
        }));

        (status, body).into_response()
    }
}
