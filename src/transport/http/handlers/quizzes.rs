use crate::domain::quiz;
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::common::{json_body, quiz_request, typed_body};
use crate::transport::http::types::{AppState, ErrorResponse, QuizBody, QuizResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    post,
    path = "/quizzes",
    request_body = QuizBody,
    responses(
        (status = 200, description = "A random unseen question of the category, or null", body = QuizResponse),
        (status = 400, description = "Body is not JSON", body = ErrorResponse),
        (status = 422, description = "Body has the wrong shape or the lookup failed", body = ErrorResponse)
    )
)]
pub async fn next_quiz_question_handler(
    State(state): State<AppState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let body: QuizBody = typed_body(json_body(body)?)
        .map_err(|e| ApiError::unprocessable("invalid quiz body", e))?;
    let request = quiz_request(body).map_err(|e| ApiError::unprocessable("invalid quiz body", e))?;

    let candidates = state
        .store
        .quiz_candidates(request.category_id, &request.previous_questions)
        .await
        .map_err(|e| ApiError::unprocessable("failed to load quiz candidates", e))?;
    let remaining = candidates.len();

    let question = quiz::pick_next(candidates, &mut rand::thread_rng());
    tracing::debug!(
        category_id = request.category_id,
        remaining,
        picked = ?question.as_ref().map(|q| q.id),
        "quiz question selected"
    );

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}
