//! Prompt templates
//!
//! Templates use `{{placeholder}}` tokens. Content-based prompts ship with
//! the crate; topic prompts are served by the backend under
//! [`topic_template_name`].

use std::collections::HashMap;

use crate::types::{ContentType, Language};

/// Built-in prompt for quizzes generated from a document, transcript or page
pub const QUIZ_FROM_CONTENT: &str = r#"Based on the following document content, generate {{numQuestions}} multiple-choice questions in {{language}}.

Document content:
{{content}}

Please provide the questions in the following JSON format:
{
  "questions": [
    {
      "question": "Question text here",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": 0,
      "explanation": "Detailed explanation of why this is the correct answer"
    }
  ]
}

Important requirements:
- Each question must have exactly 4 options
- The correctAnswer should be the index (0-3) of the correct option
- Provide a detailed explanation for each correct answer
- Make questions challenging but fair
- Questions should be in {{language}}
- Return ONLY valid JSON, no additional text"#;

/// Built-in prompt for flashcards generated from a document, transcript or page
pub const FLASHCARDS_FROM_CONTENT: &str = r#"Based on the following document content, generate {{numCards}} flash cards in {{language}}.

Document content:
{{content}}

Please provide the flash cards in the following JSON format:
{
  "cards": [
    {
      "front": "Key concept or question",
      "back": "Concise answer or explanation"
    }
  ]
}

Important requirements:
- Create {{numCards}} flash cards
- Each card should have a front (question/concept) and back (answer/explanation)
- Front should be concise and clear (max 15 words)
- Back should be VERY CONCISE - MAXIMUM 30 WORDS ONLY
- Keep the back answer brief, focused, and to the point
- Avoid lengthy explanations - summarize key points only
- Cards should be in {{language}}
- Cover the most important concepts from the document
- Return ONLY valid JSON, no additional text"#;

/// Name of the backend template used for topic-based generation
pub fn topic_template_name(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Quiz => "quiz_topic",
        ContentType::Flashcards => "flashcards_topic",
    }
}

/// Built-in template for content-based generation
pub fn content_template(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Quiz => QUIZ_FROM_CONTENT,
        ContentType::Flashcards => FLASHCARDS_FROM_CONTENT,
    }
}

/// Values substituted into a template
#[derive(Debug, Clone, Default)]
pub struct PromptVars {
    values: HashMap<&'static str, String>,
}

impl PromptVars {
    /// Variables shared by every prompt: the count key and the language
    pub fn new(content_type: ContentType, count: u32, language: Language) -> Self {
        let count_key = match content_type {
            ContentType::Quiz => "numQuestions",
            ContentType::Flashcards => "numCards",
        };

        let mut values = HashMap::new();
        values.insert(count_key, count.to_string());
        values.insert("language", language.display_name().to_string());
        Self { values }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.values.insert("topic", topic.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.values.insert("content", content.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Substitute `{{key}}` tokens
///
/// Whitespace inside the braces is tolerated. Unknown keys and unterminated
/// tokens are copied through unchanged. Substituted values are not scanned
/// again, so content containing `{{topic}}` stays literal.
pub fn render(template: &str, vars: &PromptVars) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        match after_open.find("}}") {
            Some(close) => {
                let key = after_open[..close].trim();
                match vars.get(key) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[open..open + 2 + close + 2]),
                }
                rest = &after_open[close + 2..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
