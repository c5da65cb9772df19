use crate::domain::model::NewQuestion;
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{QuestionsBody, QuestionsRequest, QuizBody, QuizRequest};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

/// Unwraps a JSON body. Anything that is not parseable JSON is a bad request.
pub fn json_body(body: Result<Json<JsonValue>, JsonRejection>) -> Result<JsonValue, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(e) => {
            tracing::debug!(error = %e, "rejected request body");
            Err(ApiError::BadRequest)
        }
    }
}

/// Path ids that do not parse as integers name no resource.
pub fn path_id(id: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    id.map(|Path(id)| id).map_err(|e| {
        tracing::debug!(error = %e, "rejected path id");
        ApiError::NotFound
    })
}

/// A malformed query string just means "use the defaults".
pub fn query_or_default<T: Default>(query: Result<Query<T>, QueryRejection>) -> T {
    query.map(|Query(q)| q).unwrap_or_default()
}

/// Reads a well-formed JSON object into the operation's body type.
pub fn typed_body<T: DeserializeOwned>(value: JsonValue) -> Result<T, String> {
    // serde would otherwise accept a positional array for a struct.
    if !value.is_object() {
        return Err(format!("expected a JSON object, got {}", value));
    }
    serde_json::from_value(value).map_err(|e| format!("unexpected body shape: {}", e))
}

/// Accepts `1` and `"1"`; rejects everything outside `i32`.
pub fn coerce_int(field: &str, v: &JsonValue) -> Result<i32, String> {
    let n = if let Some(n) = v.as_i64() {
        n
    } else if let Some(s) = v.as_str() {
        s.trim()
            .parse::<i64>()
            .map_err(|_| format!("{}: expected int, got {:?}", field, s))?
    } else {
        return Err(format!("{}: expected int, got {}", field, v));
    };
    i32::try_from(n).map_err(|_| format!("{}: out of range for int: {}", field, n))
}

pub fn coerce_optional_int(field: &str, v: Option<&JsonValue>) -> Result<Option<i32>, String> {
    match v {
        None | Some(JsonValue::Null) => Ok(None),
        Some(v) => coerce_int(field, v).map(Some),
    }
}

/// Text columns take strings as-is and stringify numbers and bools.
pub fn coerce_optional_text(field: &str, v: Option<&JsonValue>) -> Result<Option<String>, String> {
    match v {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(v @ (JsonValue::Number(_) | JsonValue::Bool(_))) => Ok(Some(v.to_string())),
        Some(v) => Err(format!("{}: expected text, got {}", field, v)),
    }
}

/// `Some(term)` when the body asks for a search.
///
/// Any falsy value (absent, null, `false`, `0`, `""`, `[]`, `{}`) falls
/// through to question creation. `true` searches for the text `True`.
pub fn search_term(v: Option<&JsonValue>) -> Result<Option<String>, String> {
    match v {
        None | Some(JsonValue::Null) | Some(JsonValue::Bool(false)) => Ok(None),
        Some(JsonValue::Bool(true)) => Ok(Some("True".to_string())),
        Some(JsonValue::String(s)) if s.is_empty() => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(JsonValue::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(JsonValue::Array(a)) if a.is_empty() => Ok(None),
        Some(JsonValue::Object(o)) if o.is_empty() => Ok(None),
        Some(v) => Err(format!("searchTerm: expected text, got {}", v)),
    }
}

pub fn questions_request(body: QuestionsBody) -> Result<QuestionsRequest, String> {
    if let Some(term) = search_term(body.search_term.as_ref())? {
        return Ok(QuestionsRequest::Search { term });
    }
    Ok(QuestionsRequest::Create(NewQuestion {
        question: coerce_optional_text("question", body.question.as_ref())?,
        answer: coerce_optional_text("answer", body.answer.as_ref())?,
        difficulty: coerce_optional_int("difficulty", body.difficulty.as_ref())?,
        category: coerce_optional_int("category", body.category.as_ref())?,
    }))
}

pub fn quiz_request(body: QuizBody) -> Result<QuizRequest, String> {
    let category_id = coerce_int("quiz_category.id", &body.quiz_category.id)?;
    let previous_questions = body
        .previous_questions
        .iter()
        .map(|id| coerce_int("previous_questions", id))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(QuizRequest {
        category_id,
        previous_questions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ints_accept_numbers_and_numeric_strings() {
        assert_eq!(coerce_int("id", &json!(5)).unwrap(), 5);
        assert_eq!(coerce_int("id", &json!("5")).unwrap(), 5);
        assert!(coerce_int("id", &json!("five")).is_err());
        assert!(coerce_int("id", &json!(1.5)).is_err());
        assert!(coerce_int("id", &json!(null)).is_err());
        assert!(coerce_int("id", &json!(i64::MAX)).is_err());
    }

    #[test]
    fn text_stringifies_scalars_only() {
        assert_eq!(coerce_optional_text("q", None).unwrap(), None);
        assert_eq!(
            coerce_optional_text("q", Some(&json!(42))).unwrap(),
            Some("42".to_string())
        );
        assert!(coerce_optional_text("q", Some(&json!(["a"]))).is_err());
    }

    #[test]
    fn search_term_presence_decides_the_branch() {
        let search: QuestionsBody = typed_body(json!({ "searchTerm": "title" })).unwrap();
        assert_eq!(
            questions_request(search).unwrap(),
            QuestionsRequest::Search {
                term: "title".to_string()
            }
        );

        let create: QuestionsBody = typed_body(json!({
            "searchTerm": "",
            "question": "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?",
            "answer": "Maya Angelou",
            "difficulty": 2,
            "category": "4"
        }))
        .unwrap();
        match questions_request(create).unwrap() {
            QuestionsRequest::Create(new) => {
                assert_eq!(new.answer.as_deref(), Some("Maya Angelou"));
                assert_eq!(new.difficulty, Some(2));
                assert_eq!(new.category, Some(4));
            }
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn empty_create_body_inserts_nulls() {
        let body: QuestionsBody = typed_body(json!({})).unwrap();
        assert_eq!(
            questions_request(body).unwrap(),
            QuestionsRequest::Create(NewQuestion::default())
        );
    }

    #[test]
    fn create_with_bad_category_is_rejected() {
        let body: QuestionsBody = typed_body(json!({ "category": "science" })).unwrap();
        assert!(questions_request(body).is_err());
    }

    #[test]
    fn quiz_body_coerces_string_ids() {
        let body: QuizBody = typed_body(json!({
            "previous_questions": [4, "7"],
            "quiz_category": { "type": "Entertainment", "id": "5" }
        }))
        .unwrap();
        assert_eq!(
            quiz_request(body).unwrap(),
            QuizRequest {
                category_id: 5,
                previous_questions: vec![4, 7]
            }
        );
    }

    #[test]
    fn quiz_body_without_category_id_is_rejected() {
        assert!(typed_body::<QuizBody>(json!({ "quiz_category": { "type": "Art" } })).is_err());
        assert!(typed_body::<QuizBody>(json!({ "previous_questions": [] })).is_err());

        let body: QuizBody = typed_body(json!({
            "previous_questions": [],
            "quiz_category": { "id": "x" }
        }))
        .unwrap();
        assert!(quiz_request(body).is_err());
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert!(typed_body::<QuestionsBody>(json!(["not", "an", "object"])).is_err());
        assert!(typed_body::<QuestionsBody>(json!(null)).is_err());
    }

    #[test]
    fn quiz_body_requires_previous_questions() {
        assert!(typed_body::<QuizBody>(json!({ "quiz_category": { "id": 1 } })).is_err());
        assert!(typed_body::<QuizBody>(json!({
            "previous_questions": null,
            "quiz_category": { "id": 1 }
        }))
        .is_err());

        let body: QuizBody = typed_body(json!({
            "previous_questions": [],
            "quiz_category": { "id": 1 }
        }))
        .unwrap();
        assert!(quiz_request(body).unwrap().previous_questions.is_empty());
    }

    #[test]
    fn falsy_search_terms_create_a_question() {
        for falsy in [json!(0), json!(0.0), json!(false), json!(""), json!([]), json!({})] {
            assert_eq!(search_term(Some(&falsy)).unwrap(), None, "{}", falsy);
        }
        assert_eq!(search_term(Some(&json!(7))).unwrap(), Some("7".to_string()));
        assert_eq!(
            search_term(Some(&json!(true))).unwrap(),
            Some("True".to_string())
        );
        assert!(search_term(Some(&json!(["was"]))).is_err());
    }
}
