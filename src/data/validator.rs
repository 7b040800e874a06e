//! Validation of untrusted question payloads.
//!
//! Remote generators return free text. It is parsed as JSON (with a
//! best-effort extraction of an embedded object when the text is wrapped in
//! prose or code fences), then every question is checked before any record is
//! built. The first violation fails the whole payload.

use serde_json::Value;
use thiserror::Error;

use crate::models::{ANSWER_COUNT, QuestionRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid response structure: {0}")]
    Structure(String),

    #[error("invalid question structure at index {position}: {reason}")]
    Field { position: usize, reason: String },

    #[error("invalid correct answer index at question {position}: {value}")]
    Range { position: usize, value: String },

    #[error("no valid JSON found in response")]
    Parse,
}

/// Parse raw generator output into a JSON value.
///
/// Tries the whole text first, then the first balanced `{...}` block that
/// parses on its own.
pub fn parse_payload(raw: &str) -> Result<Value, ValidationError> {
    let trimmed = raw.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    extract_object(trimmed).ok_or(ValidationError::Parse)
}

/// Validate a parsed payload of the shape `{"questions": [...]}`.
///
/// Ids supplied by the payload are ignored; records are numbered from 1 in
/// payload order.
pub fn validate(payload: &Value) -> Result<Vec<QuestionRecord>, ValidationError> {
    let items = payload
        .get("questions")
        .ok_or_else(|| ValidationError::Structure("missing questions array".to_string()))?
        .as_array()
        .ok_or_else(|| ValidationError::Structure("questions is not an array".to_string()))?;

    if items.is_empty() {
        return Err(ValidationError::Structure("questions array is empty".to_string()));
    }

    items
        .iter()
        .enumerate()
        .map(|(position, item)| validate_question(position, item))
        .collect()
}

fn validate_question(position: usize, item: &Value) -> Result<QuestionRecord, ValidationError> {
    let field_error = |reason: &str| ValidationError::Field {
        position,
        reason: reason.to_string(),
    };

    let text = item
        .get("question")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| field_error("question text is missing or empty"))?;

    let answers = item
        .get("answers")
        .and_then(Value::as_array)
        .ok_or_else(|| field_error("answers is missing or not an array"))?;
    if answers.len() != ANSWER_COUNT {
        return Err(field_error("answers must contain exactly 4 entries"));
    }
    let answers: Vec<String> = answers
        .iter()
        .map(|answer| answer.as_str().map(str::to_string))
        .collect::<Option<_>>()
        .ok_or_else(|| field_error("answers must all be strings"))?;
    let answers: [String; ANSWER_COUNT] = answers
        .try_into()
        .map_err(|_| field_error("answers must contain exactly 4 entries"))?;

    let correct = item
        .get("correct")
        .filter(|value| value.is_number())
        .ok_or_else(|| field_error("correct is missing or not a number"))?;
    let range_error = || ValidationError::Range {
        position,
        value: correct.to_string(),
    };
    let correct_index = as_index(correct).ok_or_else(range_error)?;

    let id = u32::try_from(position + 1).map_err(|_| range_error())?;
    QuestionRecord::new(id, text, answers, correct_index).ok_or_else(range_error)
}

/// Interpret a JSON number as a non-negative integer index. `2.0` counts as
/// an integer, `1.5` and negatives do not.
fn as_index(value: &Value) -> Option<usize> {
    if let Some(index) = value.as_u64() {
        return usize::try_from(index).ok();
    }
    let float = value.as_f64()?;
    if float >= 0.0 && float.fract() == 0.0 && float <= ANSWER_COUNT as f64 {
        Some(float as usize)
    } else {
        None
    }
}

/// Find the first brace-balanced object in `text` that parses as JSON.
fn extract_object(text: &str) -> Option<Value> {
    let bytes = text.as_bytes();
    let mut start = 0;

    while let Some(offset) = text[start..].find('{') {
        let open = start + offset;
        if let Some(close) = matching_brace(bytes, open) {
            if let Ok(value) = serde_json::from_str::<Value>(&text[open..=close]) {
                return Some(value);
            }
        }
        start = open + 1;
    }

    None
}

/// Index of the brace closing the one at `open`, skipping braces inside
/// string literals.
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, &byte) in bytes.iter().enumerate().skip(open) {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_and_validate(raw: &str) -> Result<Vec<QuestionRecord>, ValidationError> {
        validate(&parse_payload(raw)?)
    }
    use serde_json::json;

    fn question(text: &str, correct: Value) -> Value {
        json!({
            "question": text,
            "answers": ["Paris", "London", "Berlin", "Madrid"],
            "correct": correct,
        })
    }

    #[test]
    fn test_valid_payload_renumbers_ids() {
        let payload = json!({
            "questions": [
                { "id": 42, "question": "Capital of France?", "answers": ["Paris", "London", "Berlin", "Madrid"], "correct": 0 },
                question("Capital of Spain?", json!(3)),
            ]
        });

        let records = validate(&payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id(), 1);
        assert_eq!(records[1].id(), 2);
        assert_eq!(records[1].correct_index(), 3);
        assert_eq!(records[0].text(), "Capital of France?");
    }

    #[test]
    fn test_missing_questions_is_structure_error() {
        let err = validate(&json!({ "items": [] })).unwrap_err();
        assert!(matches!(err, ValidationError::Structure(_)));

        let err = validate(&json!({ "questions": "nope" })).unwrap_err();
        assert!(matches!(err, ValidationError::Structure(_)));

        let err = validate(&json!({ "questions": [] })).unwrap_err();
        assert!(matches!(err, ValidationError::Structure(_)));
    }

    #[test]
    fn test_field_errors_name_position() {
        let payload = json!({
            "questions": [
                question("fine", json!(0)),
                { "question": "", "answers": ["a", "b", "c", "d"], "correct": 0 },
            ]
        });
        assert!(matches!(
            validate(&payload).unwrap_err(),
            ValidationError::Field { position: 1, .. }
        ));

        let three_answers = json!({
            "questions": [{ "question": "q", "answers": ["a", "b", "c"], "correct": 0 }]
        });
        assert!(matches!(
            validate(&three_answers).unwrap_err(),
            ValidationError::Field { position: 0, .. }
        ));

        let non_string_answer = json!({
            "questions": [{ "question": "q", "answers": ["a", "b", 3, "d"], "correct": 0 }]
        });
        assert!(matches!(
            validate(&non_string_answer).unwrap_err(),
            ValidationError::Field { position: 0, .. }
        ));

        let string_correct = json!({ "questions": [question("q", json!("0"))] });
        assert!(matches!(
            validate(&string_correct).unwrap_err(),
            ValidationError::Field { position: 0, .. }
        ));
    }

    #[test]
    fn test_range_errors() {
        for bad in [json!(4), json!(-1), json!(1.5)] {
            let payload = json!({ "questions": [question("ok", json!(0)), question("q", bad)] });
            assert!(matches!(
                validate(&payload).unwrap_err(),
                ValidationError::Range { position: 1, .. }
            ));
        }

        let payload = json!({ "questions": [question("q", json!(2.0))] });
        assert_eq!(validate(&payload).unwrap()[0].correct_index(), 2);
    }

    #[test]
    fn test_extracts_object_from_prose() {
        let raw = r#"Sure! Here are your questions:
```json
{"questions": [{"question": "What is {this}?", "answers": ["a", "b", "c", "d"], "correct": 1}]}
```
Enjoy!"#;

        let records = parse_and_validate(raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text(), "What is {this}?");
        assert_eq!(records[0].correct_index(), 1);
    }

    #[test]
    fn test_skips_unparseable_brace_blocks() {
        let raw = r#"{not json} then {"questions": [{"question": "q", "answers": ["a","b","c","d"], "correct": 0}]}"#;
        assert_eq!(parse_and_validate(raw).unwrap().len(), 1);
    }

    #[test]
    fn test_unparseable_text_is_parse_error() {
        assert_eq!(parse_and_validate("I cannot help with that."), Err(ValidationError::Parse));
        assert_eq!(parse_and_validate("{ unterminated"), Err(ValidationError::Parse));
    }
}
