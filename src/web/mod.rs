//! Axum web layer: shared state, router assembly, and error mapping.

pub mod handlers;
pub mod views;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use std::sync::Arc;

use crate::footprint::EmissionModel;
use crate::report::render::{DocumentRenderer, PdfRenderer};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state. The emission model is the single source of the
/// calculation constants for both the page path and the download path, and
/// the renderer decides the download format.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<EmissionModel>,
    pub renderer: Arc<dyn DocumentRenderer + Send + Sync>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            model: Arc::new(EmissionModel::default()),
            renderer: Arc::new(PdfRenderer::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(handlers::index))
        .route("/calculate", post(handlers::calculate))
        .route("/download_pdf", post(handlers::download_pdf))
        // Operations
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Error Handling
// ============================================================================

/// Request-level failures mapped onto responses. Internal detail is logged
/// and never echoed to the client.
#[derive(Debug)]
pub enum AppError {
    /// Unanticipated failure while serving a page.
    Internal(String),
    /// Invalid input on the download path, where there is no form to re-render.
    BadRequest(String),
    /// The document backend failed to produce bytes.
    PdfGeneration(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal(detail) => {
                tracing::error!("Request failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred during calculation".to_string(),
                )
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::PdfGeneration(detail) => {
                tracing::error!("Report rendering failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error generating PDF".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}
