/// Errors that can occur while talking to the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("catalog query error: {0}")]
    Graph(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
