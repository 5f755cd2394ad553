/// HTTP surface of the suggestion service.
///
/// Exposes two routes:
/// - `POST /predict`: rank analytical accounts for a transaction
/// - `GET /health`: liveness plus whether a model is loaded
use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, error};

use suggest_common::api::{HealthResponse, PredictRequest, SuggestionResponse};
use suggest_common::classifier::ClassifierAdapter;
use suggest_common::directory::CategoryDirectory;
use suggest_common::error::CommonError;
use suggest_common::selector;

use crate::error::AppError;

/// Shared per-process state. Both parts are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    adapter: ClassifierAdapter,
    directory: Arc<CategoryDirectory>,
}

impl AppState {
    pub fn new(adapter: ClassifierAdapter, directory: CategoryDirectory) -> Self {
        Self {
            adapter,
            directory: Arc::new(directory),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .with_state(state)
}

async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let product_name = request.product_name().to_string();
    let partner_name = request.partner_name().to_string();

    // Inference is CPU-bound; keep it off the async workers.
    let adapter = state.adapter.clone();
    let (product, partner) = (product_name.clone(), partner_name.clone());
    let scores = tokio::task::spawn_blocking(move || adapter.classify(&product, &partner))
        .await
        .map_err(|e| CommonError::Inference(format!("inference task failed: {e}")))
        .and_then(|result| result)
        .inspect_err(|e| {
            if let CommonError::Inference(_) = e {
                error!(
                    error = %e,
                    product_name = %product_name,
                    partner_name = %partner_name,
                    "prediction failed"
                );
            }
        })?;

    let response = selector::select(&scores, |id| state.directory.name(id));
    debug!(
        suggestions = response.suggestions.len(),
        ambiguous = response.is_ambiguous(),
        "prediction complete"
    );
    Ok(Json(response))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.adapter.is_ready(),
    })
}
