pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use domain::model::{Category, CategoryMap, NewQuestion, Question};
pub use storage::{MemoryTriviaStore, PgTriviaStore, TriviaStore};
pub use transport::http::{create_app, create_router, ApiError, AppState};
