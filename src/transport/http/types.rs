use crate::domain::model::{CategoryMap, NewQuestion, Question};
use crate::domain::pagination;
use crate::storage::TriviaStore;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TriviaStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TriviaStore>) -> Self {
        Self { store }
    }
}

// --- Requests ---

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number; anything that is not an integer means page 1.
    #[param(value_type = Option<i64>)]
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        pagination::parse_page(self.page.as_deref())
    }
}

/// Body of `POST /questions`: either a search (`searchTerm`) or a new question.
///
/// Values are kept loose here and coerced in the handler, so that a wrong
/// type becomes a 422 rather than a body rejection.
#[derive(Deserialize, Debug, ToSchema)]
pub struct QuestionsBody {
    #[serde(rename = "searchTerm")]
    #[schema(value_type = Option<String>)]
    pub search_term: Option<JsonValue>,
    #[schema(value_type = Option<String>)]
    pub question: Option<JsonValue>,
    #[schema(value_type = Option<String>)]
    pub answer: Option<JsonValue>,
    #[schema(value_type = Option<i32>)]
    pub difficulty: Option<JsonValue>,
    #[schema(value_type = Option<i32>)]
    pub category: Option<JsonValue>,
}

/// `POST /questions` after dispatch on `searchTerm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionsRequest {
    Search { term: String },
    Create(NewQuestion),
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct QuizBody {
    pub quiz_category: QuizCategory,
    /// Ids already shown to the player; `[]` on the first round.
    #[schema(value_type = Vec<i32>)]
    pub previous_questions: Vec<JsonValue>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct QuizCategory {
    /// Category id, as a number or a numeric string.
    #[schema(value_type = i32)]
    pub id: JsonValue,
    #[serde(default, rename = "type")]
    #[schema(value_type = Option<String>)]
    pub kind: Option<JsonValue>,
}

/// `POST /quizzes` after coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub category_id: i32,
    pub previous_questions: Vec<i32>,
}

// --- Responses ---

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    /// HTTP status code, repeated in the body.
    pub error: u16,
    pub message: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub success: bool,
    pub status: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CategoriesResponse {
    pub success: bool,
    /// `{ "<id>": "<type>" }`
    #[schema(value_type = Object)]
    pub categories: CategoryMap,
    pub total_categories: usize,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct QuestionsPageResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    #[schema(value_type = Object)]
    pub categories: CategoryMap,
    pub total_questions: usize,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CreatedQuestionResponse {
    pub success: bool,
    pub created: i32,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// `POST /questions` answers with one of two shapes, depending on `searchTerm`.
#[derive(Serialize, Debug, ToSchema)]
#[serde(untagged)]
pub enum QuestionsPostResponse {
    Created(CreatedQuestionResponse),
    Search(SearchResponse),
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    /// Every question of the category, not a count.
    pub total_questions: Vec<Question>,
    pub current_category: i32,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct QuizResponse {
    pub success: bool,
    /// `null` once every question of the category has been played.
    pub question: Option<Question>,
}
