//! Parsing of model completions into quiz questions and flashcards
//!
//! Models often wrap their JSON in markdown fences even when told not to.
//! The payload is located in this order:
//!
//! 1. the block opened by a fence tagged `json`, up to the next fence
//! 2. otherwise the block between the first pair of fences
//! 3. otherwise the whole completion
//!
//! An untagged fence whose first line is a language tag other than `json`
//! (```` ```javascript ````) has that line dropped before parsing.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ResponseError;
use crate::types::{ContentType, Flashcard, GeneratedDeck, QuizQuestion};

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Number of options every question must carry
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Locate the JSON payload inside a completion
pub fn extract_json_payload(text: &str) -> &str {
    if let Some(start) = text.find(JSON_FENCE) {
        let rest = &text[start + JSON_FENCE.len()..];
        return until_fence(rest).trim();
    }

    if let Some(start) = text.find(FENCE) {
        let rest = &text[start + FENCE.len()..];
        return skip_info_string(until_fence(rest)).trim();
    }

    text
}

fn until_fence(text: &str) -> &str {
    match text.find(FENCE) {
        Some(end) => &text[..end],
        None => text,
    }
}

fn skip_info_string(block: &str) -> &str {
    match block.split_once('\n') {
        Some((first, rest)) => {
            let tag = first.trim();
            if !tag.is_empty() && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                rest
            } else {
                block
            }
        }
        None => block,
    }
}

fn extract_array<T: DeserializeOwned>(
    text: &str,
    key: &'static str,
) -> Result<Vec<T>, ResponseError> {
    let payload = extract_json_payload(text);
    let mut value: Value = serde_json::from_str(payload)
        .map_err(|e| ResponseError::MalformedJson(e.to_string()))?;

    let items = value
        .get_mut(key)
        .filter(|items| items.is_array())
        .map(Value::take)
        .ok_or(ResponseError::MissingKey(key))?;

    let items: Vec<T> =
        serde_json::from_value(items).map_err(|e| ResponseError::MalformedJson(e.to_string()))?;

    if items.is_empty() {
        return Err(ResponseError::Empty(key));
    }

    Ok(items)
}

/// Parse a completion that should contain `{"questions": [...]}`
pub fn parse_quiz(text: &str) -> Result<Vec<QuizQuestion>, ResponseError> {
    let questions: Vec<QuizQuestion> = extract_array(text, "questions")?;

    for (i, question) in questions.iter().enumerate() {
        let index = i + 1;
        if question.options.len() != OPTIONS_PER_QUESTION {
            return Err(ResponseError::OptionCount {
                index,
                count: question.options.len(),
            });
        }
        if question.correct_answer >= question.options.len() {
            return Err(ResponseError::AnswerOutOfRange {
                index,
                answer: question.correct_answer,
            });
        }
    }

    Ok(questions)
}

/// Parse a completion that should contain `{"cards": [...]}`
pub fn parse_flashcards(text: &str) -> Result<Vec<Flashcard>, ResponseError> {
    extract_array(text, "cards")
}

/// Parse a completion for the requested content type
pub fn parse_deck(text: &str, content_type: ContentType) -> Result<GeneratedDeck, ResponseError> {
    match content_type {
        ContentType::Quiz => parse_quiz(text).map(GeneratedDeck::Quiz),
        ContentType::Flashcards => parse_flashcards(text).map(GeneratedDeck::Flashcards),
    }
}
