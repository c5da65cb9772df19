use crate::domain::model::CategoryMap;
use crate::domain::pagination::paginate;
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::common::{path_id, query_or_default};
use crate::transport::http::types::{
    AppState, CategoriesResponse, CategoryQuestionsResponse, ErrorResponse, PageQuery,
};
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;

/// Loads the `id -> type` map for one request.
pub async fn load_category_map(state: &AppState) -> Result<CategoryMap, ApiError> {
    let categories = state
        .store
        .categories()
        .await
        .map_err(|e| ApiError::unprocessable("failed to load categories", e))?;
    Ok(categories.into_iter().collect())
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories keyed by id", body = CategoriesResponse),
        (status = 404, description = "No category exists", body = ErrorResponse)
    )
)]
pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = load_category_map(&state).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoriesResponse {
        success: true,
        total_categories: categories.len(),
        categories,
    }))
}

#[utoipa::path(
    get,
    path = "/categories/{category_id}/questions",
    params(
        ("category_id" = i32, Path, description = "Category id"),
        PageQuery
    ),
    responses(
        (status = 200, description = "One page of the category's questions", body = CategoryQuestionsResponse),
        (status = 404, description = "Empty category or page out of range", body = ErrorResponse)
    )
)]
pub async fn category_questions_handler(
    State(state): State<AppState>,
    category_id: Result<Path<i32>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let category_id = path_id(category_id)?;
    let page = query_or_default(query).page();

    let selection = state
        .store
        .questions_in_category(category_id)
        .await
        .map_err(|e| ApiError::unprocessable("failed to load category questions", e))?;

    let questions = paginate(&selection, page);
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions,
        total_questions: selection,
        current_category: category_id,
    }))
}
