// src/models/question.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::prelude::FromRow;

use crate::{
    error::AppError,
    utils::coerce::{int_from_json, is_truthy},
};

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// The question text shown to players.
    pub question: String,

    pub answer: String,

    /// Foreign key into 'categories'.
    pub category: i64,

    pub difficulty: i64,
}

/// A question ready to be inserted, stored exactly as the client sent it.
/// Storage assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// Body of `POST /api/questions`.
///
/// The endpoint searches when `searchTerm` is truthy and creates a question
/// from the remaining fields otherwise. `searchTerm` and the numeric fields
/// are kept as raw JSON because clients send them both as numbers and as
/// strings.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionsPostRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<Value>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<Value>,
    pub difficulty: Option<Value>,
}

impl QuestionsPostRequest {
    /// The search term, if this request is a search.
    ///
    /// Falsy terms select create mode. Scalars are searched for in their
    /// textual form; arrays and objects cannot be.
    pub fn search_term(&self) -> Result<Option<String>, AppError> {
        let term = match self.search_term.as_ref().filter(|t| is_truthy(t)) {
            None => return Ok(None),
            Some(term) => term,
        };

        match term {
            Value::String(s) => Ok(Some(s.clone())),
            Value::Number(n) => Ok(Some(n.to_string())),
            Value::Bool(_) => Ok(Some("True".to_string())),
            other => Err(AppError::Unprocessable(format!(
                "searchTerm must be a string, got {}",
                other
            ))),
        }
    }

    /// Builds the question to insert. Every field is required; text is
    /// kept verbatim.
    pub fn into_new_question(self) -> Result<NewQuestion, AppError> {
        Ok(NewQuestion {
            question: required_text(self.question, "question")?,
            answer: required_text(self.answer, "answer")?,
            category: required_int(self.category.as_ref(), "category")?,
            difficulty: required_int(self.difficulty.as_ref(), "difficulty")?,
        })
    }
}

fn required_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::Unprocessable(format!("missing field `{}`", field)))
}

fn required_int(value: Option<&Value>, field: &str) -> Result<i64, AppError> {
    let value =
        value.ok_or_else(|| AppError::Unprocessable(format!("missing field `{}`", field)))?;
    int_from_json(value)
        .ok_or_else(|| AppError::Unprocessable(format!("field `{}` is not an integer", field)))
}

/// Query parameters for `GET /api/questions` and the per-category listing.
///
/// Values are read leniently: anything that does not parse falls back to
/// the default.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub category: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> i64 {
        lenient_int(self.page.as_deref()).unwrap_or(1)
    }

    pub fn category(&self) -> i64 {
        lenient_int(self.category.as_deref()).unwrap_or(0)
    }
}

fn lenient_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}

/// Response shape shared by the paginated listings.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: i64,
    pub categories: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> QuestionsPostRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn falsy_search_term_means_create() {
        for body in [
            json!({}),
            json!({"searchTerm": null}),
            json!({"searchTerm": ""}),
            json!({"searchTerm": 0}),
            json!({"searchTerm": false}),
        ] {
            assert_eq!(request(body.clone()).search_term().unwrap(), None, "{body}");
        }
    }

    #[test]
    fn scalar_search_terms_are_searched_as_text() {
        assert_eq!(
            request(json!({"searchTerm": "name"})).search_term().unwrap(),
            Some("name".to_string())
        );
        assert_eq!(
            request(json!({"searchTerm": 5})).search_term().unwrap(),
            Some("5".to_string())
        );
        assert!(matches!(
            request(json!({"searchTerm": ["name"]})).search_term(),
            Err(AppError::Unprocessable(_))
        ));
    }

    #[test]
    fn builds_question_verbatim_from_mixed_field_types() {
        let new_question = request(json!({
            "question": "  Who painted the Mona Lisa? ",
            "answer": "",
            "category": "2",
            "difficulty": 42
        }))
        .into_new_question()
        .unwrap();

        assert_eq!(
            new_question,
            NewQuestion {
                question: "  Who painted the Mona Lisa? ".into(),
                answer: "".into(),
                category: 2,
                difficulty: 42,
            }
        );
    }

    #[test]
    fn missing_or_non_integer_fields_are_unprocessable() {
        let bodies = [
            json!({"answer": "a", "category": 1, "difficulty": 1}),
            json!({"question": "q", "category": 1, "difficulty": 1}),
            json!({"question": "q", "answer": "a", "difficulty": 1}),
            json!({"question": "q", "answer": "a", "category": 1}),
            json!({"question": "q", "answer": "a", "category": "art", "difficulty": 1}),
            json!({"question": "q", "answer": "a", "category": 1, "difficulty": 1.5}),
        ];

        for body in bodies {
            let err = request(body.clone()).into_new_question().unwrap_err();
            assert!(
                matches!(err, AppError::Unprocessable(_)),
                "{body} gave {err:?}"
            );
        }
    }

    #[test]
    fn list_params_fall_back_to_defaults() {
        let params = ListParams {
            page: Some("abc".into()),
            category: None,
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.category(), 0);

        let params = ListParams {
            page: Some("3".into()),
            category: Some("5".into()),
        };
        assert_eq!(params.page(), 3);
        assert_eq!(params.category(), 5);
    }
}
