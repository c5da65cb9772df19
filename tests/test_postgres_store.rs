//! Postgres store round trip. Runs only when `DATABASE_URL` is set; rows it
//! creates are removed again at the end.

use sqlx::postgres::PgPoolOptions;
use std::env;
use trivia_api::{NewQuestion, PgTriviaStore, TriviaStore};

#[tokio::test]
async fn test_postgres_store() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let Ok(database_url) = env::var("DATABASE_URL") else {
        println!("DATABASE_URL not set, skipping Postgres store test");
        return Ok(());
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await?;
    let store = PgTriviaStore::new(pool);
    store.bootstrap(true).await?;
    store.ping().await?;

    let categories = store.categories().await?;
    assert!(!categories.is_empty());
    assert!(categories.windows(2).all(|w| w[0].id < w[1].id));

    let category = store.insert_category("Integration Test Category").await?;
    let marker = format!("pg-store-test-{}", category.id);

    let first = store
        .insert_question(&NewQuestion {
            question: Some(format!("{} first 100%_done?", marker)),
            answer: Some("yes".to_string()),
            difficulty: Some(3),
            category: Some(category.id),
        })
        .await?;
    let second = store
        .insert_question(&NewQuestion {
            question: Some(format!("{} SECOND", marker.to_uppercase())),
            answer: None,
            difficulty: None,
            category: Some(category.id),
        })
        .await?;
    assert!(second.id > first.id);

    let found = store.search_questions(&marker).await?;
    assert_eq!(
        found.iter().map(|q| q.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );
    // '%' and '_' match literally.
    let literal = store.search_questions("100%_done").await?;
    assert!(literal.iter().any(|q| q.id == first.id));
    assert!(store.search_questions("100%x").await?.iter().all(|q| q.id != first.id));

    let in_category = store.questions_in_category(category.id).await?;
    assert_eq!(in_category.len(), 2);

    let candidates = store.quiz_candidates(category.id, &[first.id]).await?;
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, second.id);
    assert!(store.quiz_candidates(category.id, &[]).await?.len() == 2);

    store.delete_question(first.id).await?;
    store.delete_question(second.id).await?;
    assert_eq!(store.question_by_id(first.id).await?, None);
    assert!(store.questions_in_category(category.id).await?.is_empty());

    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(category.id)
        .execute(store.pool())
        .await?;
    Ok(())
}
