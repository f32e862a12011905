//! Route handlers for the calculator pages and the report download.

use askama::Template;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    Form,
};
use chrono::Utc;

use crate::input::UsageInput;
use crate::report::build_report;
use crate::web::views::{IndexTemplate, ResultTemplate};
use crate::web::{AppError, AppState};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, serde::Deserialize)]
pub struct CalculateForm {
    pub user_type: Option<String>,
    pub monthly_usage: Option<String>,
}

/// The result page echoes its derived totals in hidden fields for the
/// download form. They are accepted on the wire but never read; the
/// footprint is recomputed from the usage value on every request.
#[derive(Debug, serde::Deserialize)]
pub struct DownloadForm {
    pub user_type: Option<String>,
    pub monthly_usage: Option<String>,
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

/// GET / - the calculator form.
pub async fn index() -> IndexTemplate {
    IndexTemplate { error: None }
}

/// POST /calculate - validates the submission and renders the result page,
/// or the form again with an error banner.
pub async fn calculate(
    State(state): State<AppState>,
    Form(form): Form<CalculateForm>,
) -> Result<Response, AppError> {
    let input = match UsageInput::parse(form.user_type.as_deref(), form.monthly_usage.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            tracing::debug!("Rejected calculation input: {}", e);
            return form_error(e.to_string());
        }
    };

    let result = state.model.footprint(input.monthly_usage_kwh);
    tracing::info!(
        "Calculated footprint for {}: {} kWh/month -> {} kg CO2/year",
        input.user_type,
        input.monthly_usage_kwh,
        result.annual_emissions_kg
    );

    let page = ResultTemplate::new(&state.model, &input, &result);
    let html = page
        .render()
        .map_err(|e| AppError::Internal(format!("result template: {}", e)))?;
    Ok(Html(html).into_response())
}

/// POST /download_pdf - recomputes the footprint and streams the rendered
/// report as an attachment. Nothing is written to disk.
pub async fn download_pdf(
    State(state): State<AppState>,
    Form(form): Form<DownloadForm>,
) -> Result<Response, AppError> {
    let input = UsageInput::parse(form.user_type.as_deref(), form.monthly_usage.as_deref())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let result = state.model.footprint(input.monthly_usage_kwh);

    // One clock reading covers both the document body and the filename.
    let generated_at = Utc::now();
    let document = build_report(&state.model, &input, &result, generated_at);
    let bytes = state
        .renderer
        .render(&document)
        .map_err(|e| AppError::PdfGeneration(e.to_string()))?;

    let filename = format!(
        "Carbon_Footprint_Report_{}.{}",
        generated_at.format("%Y%m%d"),
        state.renderer.file_extension()
    );
    tracing::info!("Rendered {} ({} bytes)", filename, bytes.len());

    let headers = [
        (header::CONTENT_TYPE, state.renderer.media_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];
    Ok((headers, bytes).into_response())
}

/// GET /health - liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Fallback - the calculator form with a not-found banner.
pub async fn not_found() -> Result<Response, AppError> {
    let page = IndexTemplate {
        error: Some("Page not found".to_string()),
    };
    let html = page
        .render()
        .map_err(|e| AppError::Internal(format!("index template: {}", e)))?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn form_error(message: String) -> Result<Response, AppError> {
    let page = IndexTemplate {
        error: Some(message),
    };
    let html = page
        .render()
        .map_err(|e| AppError::Internal(format!("index template: {}", e)))?;
    Ok(Html(html).into_response())
}
