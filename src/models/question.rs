// src/models/question.rs

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

/// A candidate answer. Number-strand answers travel as JSON numbers,
/// everything else as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(i64),
    Text(String),
}

impl AnswerValue {
    /// Canonical string form used for equality between options.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Number(n) => write!(f, "{}", n),
            AnswerValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

/// One generated practice item. Never persisted on its own.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Question {
    /// Prompt markup, may embed visual aids (emoji, SVG, tables).
    #[serde(rename = "q")]
    pub prompt: String,

    #[serde(rename = "a")]
    pub correct_answer: AnswerValue,

    /// Shuffled candidates, containing `correct_answer` exactly once.
    pub options: Vec<AnswerValue>,

    /// Display name of the strand.
    #[serde(rename = "strand")]
    pub strand_label: String,

    /// Machine-readable strand key.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Question {
    /// Tagged placeholder returned for a strand key nobody registered.
    pub fn unknown_strand() -> Self {
        Self {
            prompt: "Unknown strand".to_string(),
            correct_answer: AnswerValue::Text(String::new()),
            options: Vec::new(),
            strand_label: "Error".to_string(),
            kind: "unknown".to_string(),
        }
    }

    pub fn is_unknown_strand(&self) -> bool {
        self.kind == "unknown"
    }
}

/// Entry of the strand menu.
#[derive(Debug, Serialize, ToSchema)]
pub struct StrandInfo {
    pub key: &'static str,
    pub label: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_text_share_a_canonical_form() {
        assert_eq!(AnswerValue::Number(12).canonical(), "12");
        assert_eq!(AnswerValue::from("12").canonical(), "12");
    }

    #[test]
    fn serializes_with_short_keys() {
        let q = Question {
            prompt: "What is 1 + 1?".into(),
            correct_answer: AnswerValue::Number(2),
            options: vec![AnswerValue::Number(2), AnswerValue::Number(3)],
            strand_label: "Number".into(),
            kind: "number".into(),
        };
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["q"], "What is 1 + 1?");
        assert_eq!(value["a"], 2);
        assert_eq!(value["options"], serde_json::json!([2, 3]));
        assert_eq!(value["strand"], "Number");
        assert_eq!(value["type"], "number");
    }

    #[test]
    fn unknown_strand_is_tagged() {
        let value = serde_json::to_value(Question::unknown_strand()).unwrap();
        assert_eq!(value["strand"], "Error");
        assert_eq!(value["a"], "");
        assert_eq!(value["options"], serde_json::json!([]));
    }
}
