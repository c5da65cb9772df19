use crate::domain::model::NewQuestion;
use crate::domain::pagination::paginate;
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::categories::load_category_map;
use crate::transport::http::handlers::common::{
    json_body, path_id, query_or_default, questions_request, typed_body,
};
use crate::transport::http::types::{
    AppState, CreatedQuestionResponse, ErrorResponse, PageQuery, QuestionsBody,
    QuestionsPageResponse, QuestionsPostResponse, QuestionsRequest, SearchResponse,
    SuccessResponse,
};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    get,
    path = "/questions",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of questions plus the category map", body = QuestionsPageResponse),
        (status = 404, description = "Page is empty", body = ErrorResponse)
    )
)]
pub async fn list_questions_handler(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<QuestionsPageResponse>, ApiError> {
    let page = query_or_default(query).page();
    let categories = load_category_map(&state).await?;

    let selection = state
        .store
        .questions()
        .await
        .map_err(|e| ApiError::unprocessable("failed to load questions", e))?;

    let questions = paginate(&selection, page);
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPageResponse {
        success: true,
        questions,
        categories,
        total_questions: selection.len(),
    }))
}

#[utoipa::path(
    delete,
    path = "/questions/{question_id}",
    params(
        ("question_id" = i32, Path, description = "Question id")
    ),
    responses(
        (status = 200, description = "Question deleted", body = SuccessResponse),
        (status = 404, description = "No question with this id", body = ErrorResponse),
        (status = 422, description = "Delete failed", body = ErrorResponse)
    )
)]
pub async fn delete_question_handler(
    State(state): State<AppState>,
    question_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let question_id = path_id(question_id)?;

    let existing = state
        .store
        .question_by_id(question_id)
        .await
        .map_err(|e| ApiError::unprocessable("failed to look up question", e))?;
    if existing.is_none() {
        return Err(ApiError::NotFound);
    }

    state
        .store
        .delete_question(question_id)
        .await
        .map_err(|e| ApiError::unprocessable("failed to delete question", e))?;
    tracing::info!(question_id, "deleted question");

    Ok(Json(SuccessResponse { success: true }))
}

#[utoipa::path(
    post,
    path = "/questions",
    params(PageQuery),
    request_body = QuestionsBody,
    responses(
        (status = 200, description = "Search results when `searchTerm` is set, otherwise the created question id with a page of questions", body = QuestionsPostResponse),
        (status = 400, description = "Body is not JSON", body = ErrorResponse),
        (status = 422, description = "Search or insert failed", body = ErrorResponse)
    )
)]
pub async fn post_questions_handler(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<QuestionsPostResponse>, ApiError> {
    let page = query_or_default(query).page();
    let body: QuestionsBody = typed_body(json_body(body)?)
        .map_err(|e| ApiError::unprocessable("invalid questions body", e))?;
    let request =
        questions_request(body).map_err(|e| ApiError::unprocessable("invalid questions body", e))?;

    let response = match request {
        QuestionsRequest::Search { term } => {
            QuestionsPostResponse::Search(search_questions(&state, &term, page).await?)
        }
        QuestionsRequest::Create(new) => {
            QuestionsPostResponse::Created(create_question(&state, new, page).await?)
        }
    };
    Ok(Json(response))
}

async fn search_questions(
    state: &AppState,
    term: &str,
    page: i64,
) -> Result<SearchResponse, ApiError> {
    let selection = state
        .store
        .search_questions(term)
        .await
        .map_err(|e| ApiError::unprocessable("search failed", e))?;

    Ok(SearchResponse {
        success: true,
        questions: paginate(&selection, page),
        total_questions: selection.len(),
    })
}

async fn create_question(
    state: &AppState,
    new: NewQuestion,
    page: i64,
) -> Result<CreatedQuestionResponse, ApiError> {
    let created = state
        .store
        .insert_question(&new)
        .await
        .map_err(|e| ApiError::unprocessable("failed to insert question", e))?;
    tracing::info!(question_id = created.id, "created question");

    let selection = state
        .store
        .questions()
        .await
        .map_err(|e| ApiError::unprocessable("failed to reload questions", e))?;

    Ok(CreatedQuestionResponse {
        success: true,
        created: created.id,
        questions: paginate(&selection, page),
        total_questions: selection.len(),
    })
}
