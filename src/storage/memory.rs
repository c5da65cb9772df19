//! In-process trivia store.
//!
//! Mirrors the Postgres store's ordering and matching so the HTTP layer can be
//! exercised without a database. Data lives only as long as the process.

use crate::domain::model::category::DEFAULT_CATEGORIES;
use crate::domain::model::{Category, NewQuestion, Question};
use crate::domain::quiz;
use crate::storage::TriviaStore;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    questions: BTreeMap<i32, Question>,
    last_category_id: i32,
    last_question_id: i32,
}

#[derive(Default)]
pub struct MemoryTriviaStore {
    tables: RwLock<Tables>,
}

impl MemoryTriviaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the default categories and no questions.
    pub fn seeded() -> Self {
        let mut tables = Tables::default();
        for kind in DEFAULT_CATEGORIES {
            tables.last_category_id += 1;
            let id = tables.last_category_id;
            tables.categories.insert(
                id,
                Category {
                    id,
                    kind: kind.to_string(),
                },
            );
        }
        Self {
            tables: RwLock::new(tables),
        }
    }

    async fn filter_questions<F>(&self, keep: F) -> Vec<Question>
    where
        F: Fn(&Question) -> bool + Send,
    {
        let tables = self.tables.read().await;
        tables
            .questions
            .values()
            .filter(|q| keep(q))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TriviaStore for MemoryTriviaStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().cloned().collect())
    }

    async fn insert_category(&self, kind: &str) -> Result<Category> {
        let mut tables = self.tables.write().await;
        tables.last_category_id += 1;
        let category = Category {
            id: tables.last_category_id,
            kind: kind.to_string(),
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn questions(&self) -> Result<Vec<Question>> {
        Ok(self.filter_questions(|_| true).await)
    }

    async fn question_by_id(&self, id: i32) -> Result<Option<Question>> {
        let tables = self.tables.read().await;
        Ok(tables.questions.get(&id).cloned())
    }

    async fn questions_in_category(&self, category_id: i32) -> Result<Vec<Question>> {
        Ok(self
            .filter_questions(|q| q.is_in_category(category_id))
            .await)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>> {
        Ok(self.filter_questions(|q| q.matches_term(term)).await)
    }

    async fn quiz_candidates(&self, category_id: i32, previous: &[i32]) -> Result<Vec<Question>> {
        Ok(self
            .filter_questions(|q| quiz::is_candidate(q, category_id, previous))
            .await)
    }

    async fn insert_question(&self, new: &NewQuestion) -> Result<Question> {
        let mut tables = self.tables.write().await;
        tables.last_question_id = tables
            .last_question_id
            .checked_add(1)
            .ok_or_else(|| anyhow::anyhow!("question id sequence exhausted"))?;
        let question = new.clone().into_question(tables.last_question_id);
        tables.questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn delete_question(&self, id: i32) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.questions.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_question(text: &str, category: i32) -> NewQuestion {
        NewQuestion {
            question: Some(text.to_string()),
            answer: Some("answer".to_string()),
            difficulty: Some(1),
            category: Some(category),
        }
    }

    #[tokio::test]
    async fn seeded_store_lists_default_categories_in_id_order() {
        let store = MemoryTriviaStore::seeded();
        let categories = store.categories().await.unwrap();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
        assert_eq!(categories[0].id, 1);
        assert_eq!(categories[0].kind, "Science");
        assert_eq!(categories[5].kind, "Sports");
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryTriviaStore::new();
        let first = store.insert_question(&new_question("a", 1)).await.unwrap();
        store.delete_question(first.id).await.unwrap();
        let second = store.insert_question(&new_question("b", 1)).await.unwrap();
        assert!(second.id > first.id);
        assert_eq!(store.question_by_id(first.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn search_and_category_filters_keep_id_order() {
        let store = MemoryTriviaStore::new();
        store.insert_question(&new_question("What was it", 2)).await.unwrap();
        store.insert_question(&new_question("Who is it", 1)).await.unwrap();
        store.insert_question(&new_question("WAS it you", 2)).await.unwrap();

        let found: Vec<i32> = store
            .search_questions("was")
            .await
            .unwrap()
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(found, vec![1, 3]);

        let in_category: Vec<i32> = store
            .questions_in_category(2)
            .await
            .unwrap()
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(in_category, vec![1, 3]);
    }

    #[tokio::test]
    async fn quiz_candidates_skip_previous_questions() {
        let store = MemoryTriviaStore::new();
        store.insert_question(&new_question("one", 1)).await.unwrap();
        store.insert_question(&new_question("two", 1)).await.unwrap();
        store.insert_question(&new_question("three", 2)).await.unwrap();

        let left = store.quiz_candidates(1, &[1]).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, 2);
        assert!(store.quiz_candidates(1, &[1, 2]).await.unwrap().is_empty());
    }
}
