//! PostgreSQL-backed trivia store.

use crate::domain::model::category::DEFAULT_CATEGORIES;
use crate::domain::model::{Category, NewQuestion, Question};
use crate::infra::config;
use crate::storage::TriviaStore;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

const QUESTION_COLUMNS: &str = "id, question, answer, difficulty, category";

/// Table row counts reported by the preflight check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub categories: i64,
    pub questions: i64,
}

/// A trivia store that uses a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgTriviaStore {
    pool: PgPool,
}

impl PgTriviaStore {
    /// Connects using the configured database URL and pool size, then makes sure
    /// the tables exist (and seeds categories when enabled).
    pub async fn connect() -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config::db_max_connections()?)
            .connect(&config::database_url())
            .await?;
        let store = Self::new(pool);
        store.bootstrap(config::seed_categories()?).await?;
        Ok(store)
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the tables if they are missing and, when `seed` is set and the
    /// `categories` table is empty, inserts the default categories.
    pub async fn bootstrap(&self, seed: bool) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS categories (
                id SERIAL PRIMARY KEY,
                type TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        // `category` deliberately has no foreign key: inserts are not checked.
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS questions (
                id SERIAL PRIMARY KEY,
                question TEXT,
                answer TEXT,
                difficulty INTEGER,
                category INTEGER
            )",
        )
        .execute(&self.pool)
        .await?;

        if seed {
            let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
                .fetch_one(&self.pool)
                .await?;
            if existing == 0 {
                for kind in DEFAULT_CATEGORIES {
                    self.insert_category(kind).await?;
                }
                tracing::info!(count = DEFAULT_CATEGORIES.len(), "seeded default categories");
            }
        }
        Ok(())
    }

    /// Returns `None` when either table is missing.
    pub async fn table_counts(&self) -> Result<Option<TableCounts>> {
        let present: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables
             WHERE table_schema = current_schema()
               AND table_name IN ('categories', 'questions')",
        )
        .fetch_one(&self.pool)
        .await?;
        if present < 2 {
            return Ok(None);
        }

        let categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        let questions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        Ok(Some(TableCounts {
            categories,
            questions,
        }))
    }

    async fn fetch_questions(&self, sql: &str) -> Result<Vec<Question>> {
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        rows.iter().map(question_from_row).collect()
    }
}

fn question_from_row(row: &PgRow) -> Result<Question> {
    Ok(Question {
        id: row.try_get("id")?,
        question: row.try_get("question")?,
        answer: row.try_get("answer")?,
        difficulty: row.try_get("difficulty")?,
        category: row.try_get("category")?,
    })
}

fn category_from_row(row: &PgRow) -> Result<Category> {
    Ok(Category {
        id: row.try_get("id")?,
        kind: row.try_get("type")?,
    })
}

#[async_trait]
impl TriviaStore for PgTriviaStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(category_from_row).collect()
    }

    async fn insert_category(&self, kind: &str) -> Result<Category> {
        let row = sqlx::query("INSERT INTO categories (type) VALUES ($1) RETURNING id, type")
            .bind(kind)
            .fetch_one(&self.pool)
            .await?;
        category_from_row(&row)
    }

    async fn questions(&self) -> Result<Vec<Question>> {
        self.fetch_questions(&format!(
            "SELECT {} FROM questions ORDER BY id",
            QUESTION_COLUMNS
        ))
        .await
    }

    async fn question_by_id(&self, id: i32) -> Result<Option<Question>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM questions WHERE id = $1",
            QUESTION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(question_from_row).transpose()
    }

    async fn questions_in_category(&self, category_id: i32) -> Result<Vec<Question>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM questions WHERE category = $1 ORDER BY id",
            QUESTION_COLUMNS
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(question_from_row).collect()
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>> {
        // POSITION instead of ILIKE so '%' and '_' in the term match literally.
        let rows = sqlx::query(&format!(
            "SELECT {} FROM questions
             WHERE POSITION(LOWER($1) IN LOWER(question)) > 0
             ORDER BY id",
            QUESTION_COLUMNS
        ))
        .bind(term)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(question_from_row).collect()
    }

    async fn quiz_candidates(&self, category_id: i32, previous: &[i32]) -> Result<Vec<Question>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM questions
             WHERE category = $1 AND id <> ALL($2)
             ORDER BY id",
            QUESTION_COLUMNS
        ))
        .bind(category_id)
        .bind(previous.to_vec())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(question_from_row).collect()
    }

    async fn insert_question(&self, new: &NewQuestion) -> Result<Question> {
        let row = sqlx::query(&format!(
            "INSERT INTO questions (question, answer, difficulty, category)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            QUESTION_COLUMNS
        ))
        .bind(new.question.as_deref())
        .bind(new.answer.as_deref())
        .bind(new.difficulty)
        .bind(new.category)
        .fetch_one(&self.pool)
        .await?;
        question_from_row(&row)
    }

    async fn delete_question(&self, id: i32) -> Result<()> {
        sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
