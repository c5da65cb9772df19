use crate::domain::model::{Category, Question};
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::{categories, health, questions, quizzes};
use crate::transport::http::types::{
    AppState, CategoriesResponse, CategoryQuestionsResponse, CreatedQuestionResponse,
    ErrorResponse, HealthResponse, QuestionsBody, QuestionsPageResponse, QuestionsPostResponse,
    QuizBody, QuizCategory, QuizResponse, SearchResponse, SuccessResponse,
};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        categories::list_categories_handler,
        categories::category_questions_handler,
        questions::list_questions_handler,
        questions::delete_question_handler,
        questions::post_questions_handler,
        quizzes::next_quiz_question_handler
    ),
    components(schemas(
        Category,
        Question,
        QuestionsBody,
        QuizBody,
        QuizCategory,
        ErrorResponse,
        SuccessResponse,
        HealthResponse,
        CategoriesResponse,
        QuestionsPageResponse,
        CreatedQuestionResponse,
        SearchResponse,
        QuestionsPostResponse,
        CategoryQuestionsResponse,
        QuizResponse
    ))
)]
pub struct ApiDoc;

/// API routes only, without docs or middleware.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/categories", get(categories::list_categories_handler))
        .route(
            "/categories/:category_id/questions",
            get(categories::category_questions_handler),
        )
        .route(
            "/questions",
            get(questions::list_questions_handler).post(questions::post_questions_handler),
        )
        .route(
            "/questions/:question_id",
            delete(questions::delete_question_handler),
        )
        .route("/quizzes", post(quizzes::next_quiz_question_handler))
        .fallback(|| async { ApiError::NotFound })
        .with_state(app_state)
}

/// The full application: routes, Swagger UI, permissive CORS and request tracing.
pub fn create_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
