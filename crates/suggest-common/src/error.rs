/// Error types shared by the suggestion library and the server crate.
///
/// `ModelUnavailable` and `Inference` are request-scoped and map to distinct outcomes at the
/// HTTP layer ("not ready" vs. "failed"). `Artifact`, `Io` and `Json` only occur while loading
/// model artifacts at startup. Server-specific errors wrap `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("model not loaded")]
    ModelUnavailable,

    #[error("inference error: {0}")]
    Inference(String),

    #[error("invalid model artifact: {0}")]
    Artifact(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
