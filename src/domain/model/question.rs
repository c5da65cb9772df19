use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of the `questions` table.
///
/// Everything but the id is nullable: question creation stores whatever the
/// client sent, including missing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub id: i32,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<i32>,
    /// Category id. Not checked against `categories`.
    pub category: Option<i32>,
}

impl Question {
    /// Case-insensitive substring match on the question text.
    pub fn matches_term(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.question
            .as_deref()
            .map(|text| text.to_lowercase().contains(&needle))
            .unwrap_or(false)
    }

    pub fn is_in_category(&self, category_id: i32) -> bool {
        self.category == Some(category_id)
    }
}

/// Column values for an insert into `questions`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<i32>,
    pub category: Option<i32>,
}

impl NewQuestion {
    pub fn into_question(self, id: i32) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            difficulty: self.difficulty,
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn q(text: Option<&str>) -> Question {
        Question {
            id: 1,
            question: text.map(str::to_string),
            answer: None,
            difficulty: Some(2),
            category: Some(4),
        }
    }

    #[test]
    fn matches_term_ignores_case() {
        let question = q(Some("Who Was the first president?"));
        assert!(question.matches_term("was"));
        assert!(question.matches_term("FIRST PRES"));
        assert!(!question.matches_term("applejacks"));
    }

    #[test]
    fn question_without_text_never_matches() {
        assert!(!q(None).matches_term("a"));
    }

    #[test]
    fn serializes_missing_fields_as_null() {
        assert_eq!(
            serde_json::to_value(q(None)).unwrap(),
            json!({
                "id": 1,
                "question": null,
                "answer": null,
                "difficulty": 2,
                "category": 4
            })
        );
    }
}
