//! Explain HTTP Routes
//!
//! The form page and its three actions, plus a JSON API for the same
//! workflow.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::levels::DEFAULT_LEVEL;
use crate::sink::LogStatus;
use crate::workflow::{random_example, validate_input, ExplainError, ExplainWorkflow};

use super::page::{NoticeKind, PageView};

// ==================
// Shared State
// ==================

/// State shared across explain handlers
pub struct ExplainState {
    pub workflow: ExplainWorkflow,
}

impl ExplainState {
    pub fn new(workflow: ExplainWorkflow) -> Self {
        Self { workflow }
    }

    fn page(&self, level: i64, text: impl Into<String>) -> PageView {
        PageView::with_input(level, text).sink_warning(self.workflow.sink().startup_warning())
    }
}

// ==================
// Request/Response Types
// ==================

fn default_level() -> i64 {
    DEFAULT_LEVEL
}

/// Fields posted by the form
#[derive(Debug, Deserialize)]
pub struct ExplainForm {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_level")]
    pub level: i64,
}

#[derive(Debug, Deserialize)]
pub struct ApiExplainRequest {
    pub text: String,
    #[serde(default = "default_level")]
    pub level: i64,
}

#[derive(Debug, Serialize)]
pub struct ApiExplainResponse {
    pub request_id: String,
    pub explanation: String,
    pub level: i64,
    pub level_label: String,
    pub log: LogStatus,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

type HtmlResponse = (StatusCode, Html<String>);

// ==================
// Explain Routes
// ==================

/// Create explain routes
pub fn explain_routes(state: Arc<ExplainState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/explain", post(explain_form_handler))
        .route("/example", post(example_handler))
        .route("/log/test", post(test_log_handler))
        .route("/api/explain", post(api_explain_handler))
        .with_state(state)
}

fn status_of(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

// ==================
// Form Handlers
// ==================

async fn index_handler(State(state): State<Arc<ExplainState>>) -> Html<String> {
    Html(state.page(DEFAULT_LEVEL, String::new()).render())
}

async fn explain_form_handler(
    State(state): State<Arc<ExplainState>>,
    Form(form): Form<ExplainForm>,
) -> HtmlResponse {
    let page = state.page(form.level, form.text.as_str());

    if let Err(e) = validate_input(&form.text) {
        return (StatusCode::OK, Html(page.notice(NoticeKind::Warning, e.to_string()).render()));
    }

    match state.workflow.explain(&form.text, form.level).await {
        Ok(explanation) => {
            let mut page = page.explanation(explanation.text);
            if let Some(row) = state.workflow.sink().pending_row(&explanation.entry) {
                let row = serde_json::to_string(&row).unwrap_or_default();
                page = page.notice(NoticeKind::Info, format!("Attempting to log: {}", row));
            }
            if let Some(message) = explanation.log.notice() {
                let kind = if explanation.log.is_warning() {
                    NoticeKind::Warning
                } else {
                    NoticeKind::Success
                };
                page = page.notice(kind, message);
            }
            (StatusCode::OK, Html(page.render()))
        }
        Err(e) => (
            status_of(e.status_code()),
            Html(page.notice(NoticeKind::Error, e.to_string()).render()),
        ),
    }
}

async fn example_handler(
    State(state): State<Arc<ExplainState>>,
    Form(form): Form<ExplainForm>,
) -> Html<String> {
    Html(state.page(form.level, random_example()).render())
}

async fn test_log_handler(
    State(state): State<Arc<ExplainState>>,
    Form(form): Form<ExplainForm>,
) -> HtmlResponse {
    let page = state.page(form.level, form.text);

    match state.workflow.test_logging().await {
        Ok(()) => (
            StatusCode::OK,
            Html(page.notice(NoticeKind::Success, "Test row successfully logged.").render()),
        ),
        Err(e) => (
            StatusCode::OK,
            Html(
                page.notice(NoticeKind::Error, format!("Manual test log failed: {}", e))
                    .render(),
            ),
        ),
    }
}

// ==================
// JSON API
// ==================

async fn api_explain_handler(
    State(state): State<Arc<ExplainState>>,
    Json(request): Json<ApiExplainRequest>,
) -> Result<Json<ApiExplainResponse>, (StatusCode, Json<ErrorResponse>)> {
    validate_input(&request.text).map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
                code: 422,
            }),
        )
    })?;

    let explanation = state
        .workflow
        .explain(&request.text, request.level)
        .await
        .map_err(|e: ExplainError| {
            let code = e.status_code();
            (
                status_of(code),
                Json(ErrorResponse {
                    error: e.to_string(),
                    code,
                }),
            )
        })?;

    Ok(Json(ApiExplainResponse {
        request_id: explanation.request_id.to_string(),
        explanation: explanation.text,
        level: explanation.level.rank,
        level_label: explanation.level.label.to_string(),
        log: explanation.log,
    }))
}
