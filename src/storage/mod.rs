//! Storage for categories and questions.
//!
//! Every listing is ordered by id ascending. Writes are single statements
//! committed on their own; nothing spans more than one statement.

use crate::domain::model::{Category, NewQuestion, Question};
use async_trait::async_trait;

pub mod memory;
pub mod postgres;

pub use memory::MemoryTriviaStore;
pub use postgres::PgTriviaStore;

#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Cheap reachability check.
    async fn ping(&self) -> anyhow::Result<()>;

    async fn categories(&self) -> anyhow::Result<Vec<Category>>;

    async fn insert_category(&self, kind: &str) -> anyhow::Result<Category>;

    async fn questions(&self) -> anyhow::Result<Vec<Question>>;

    async fn question_by_id(&self, id: i32) -> anyhow::Result<Option<Question>>;

    async fn questions_in_category(&self, category_id: i32) -> anyhow::Result<Vec<Question>>;

    /// Questions whose text contains `term`, ignoring case.
    async fn search_questions(&self, term: &str) -> anyhow::Result<Vec<Question>>;

    /// Questions of `category_id` whose id is not in `previous`.
    async fn quiz_candidates(
        &self,
        category_id: i32,
        previous: &[i32],
    ) -> anyhow::Result<Vec<Question>>;

    async fn insert_question(&self, new: &NewQuestion) -> anyhow::Result<Question>;

    /// Deletes the row if present. Deleting a missing id is not an error.
    async fn delete_question(&self, id: i32) -> anyhow::Result<()>;
}
