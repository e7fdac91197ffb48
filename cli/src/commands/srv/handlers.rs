//! # EyeQA HTTP Handlers
//!
//! File: cli/src/commands/srv/handlers.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Request handlers for the JSON API. Every handler shares one
//! `Arc<Assistant>` through `AppState`.
//!
//! | Method | Path               | Body / Query          | Response                      |
//! |--------|--------------------|-----------------------|-------------------------------|
//! | GET    | `/health`          |                       | `{status, version, entries}`  |
//! | POST   | `/api/ask`         | `{"question": "..."}` | `{answer, category, tier}`    |
//! | POST   | `/api/detect`      | `{"text": "..."}`     | `{category, score}`           |
//! | GET    | `/api/suggestions` | `?category=tag`       | `[{text, category}, ...]`     |
//!
//! Client errors are answered with status 400 and `{"error": "..."}`.
//!
use crate::core::error::EyeqaError;
use crate::faq::detector::DetectedCategory;
use crate::faq::matcher::MatchResult;
use crate::faq::suggestions::{follow_ups, starter_questions, Suggestion};
use crate::faq::{Assistant, CategoryTag};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub entries: usize,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An error response with its status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<EyeqaError> for ApiError {
    fn from(err: EyeqaError) -> Self {
        match err {
            EyeqaError::EmptyInput | EyeqaError::UnknownCategory { .. } => {
                Self::bad_request(err.to_string())
            }
            other => {
                warn!("Request failed: {}", other);
                Self::internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        entries: state.assistant.knowledge().len(),
    })
}

pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<MatchResult>, ApiError> {
    let result = state.assistant.answer(&request.question)?;
    debug!("Answered '{}' via {:?}", request.question, result.tier);
    Ok(Json(result))
}

pub async fn detect(
    State(state): State<AppState>,
    Json(request): Json<DetectRequest>,
) -> Json<DetectedCategory> {
    Json(state.assistant.detect_category(&request.text))
}

pub async fn suggestions(
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<Vec<Suggestion>>, ApiError> {
    let list = match query.category.as_deref() {
        Some(name) => follow_ups(name.parse::<CategoryTag>()?),
        None => starter_questions().to_vec(),
    };
    Ok(Json(list))
}
