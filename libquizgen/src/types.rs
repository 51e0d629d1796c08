//! Core types for Quizgen

use serde::{Deserialize, Serialize};

/// Upper bound on questions per quiz
pub const MAX_QUESTIONS: u32 = 20;

/// Upper bound on cards per deck
pub const MAX_CARDS: u32 = 30;

/// A multiple-choice question as produced by the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

impl QuizQuestion {
    /// Text of the option at `index`, if there is one
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    /// Text of the correct option
    pub fn correct_option(&self) -> &str {
        self.option(self.correct_answer).unwrap_or_default()
    }

    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_answer
    }
}

/// Letter shown in front of an option (`0 -> 'A'`)
pub fn option_label(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}

/// A two-sided study card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// Where the study material comes from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    #[default]
    Document,
    Youtube,
    Website,
    Topic,
}

impl ContentSource {
    pub const ALL: [ContentSource; 4] = [
        ContentSource::Document,
        ContentSource::Youtube,
        ContentSource::Website,
        ContentSource::Topic,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Youtube => "YouTube",
            Self::Website => "Website",
            Self::Topic => "Topic",
        }
    }

    /// Cycle to the next source in display order
    pub fn next(self) -> Self {
        match self {
            Self::Document => Self::Youtube,
            Self::Youtube => Self::Website,
            Self::Website => Self::Topic,
            Self::Topic => Self::Document,
        }
    }
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What to generate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Quiz,
    Flashcards,
}

impl ContentType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Quiz => "Quiz",
            Self::Flashcards => "Flash Cards",
        }
    }

    /// JSON key holding the generated items
    pub fn payload_key(&self) -> &'static str {
        match self {
            Self::Quiz => "questions",
            Self::Flashcards => "cards",
        }
    }

    pub fn max_count(&self) -> u32 {
        match self {
            Self::Quiz => MAX_QUESTIONS,
            Self::Flashcards => MAX_CARDS,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Quiz => Self::Flashcards,
            Self::Flashcards => Self::Quiz,
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quiz" => Ok(Self::Quiz),
            "flashcards" | "cards" => Ok(Self::Flashcards),
            _ => Err(format!(
                "Invalid content type: '{}'. Valid options: quiz, flashcards",
                s
            )),
        }
    }
}

/// Output language of the generated material
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Indonesian,
}

impl Language {
    /// Name used inside prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Indonesian => "Indonesian",
        }
    }

    /// Transcript language code
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Indonesian => "id",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::English => Self::Indonesian,
            Self::Indonesian => Self::English,
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "indonesian" | "id" => Ok(Self::Indonesian),
            _ => Err(format!(
                "Invalid language: '{}'. Valid options: english, indonesian",
                s
            )),
        }
    }
}

/// Everything needed to run one generation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub source: ContentSource,
    pub content_type: ContentType,
    pub language: Language,
    /// Number of questions or cards to ask for
    pub count: u32,
    /// Document path, video URL, website URL or topic, depending on `source`
    pub input: String,
}

/// Output of a successful generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum GeneratedDeck {
    Quiz(Vec<QuizQuestion>),
    Flashcards(Vec<Flashcard>),
}

impl GeneratedDeck {
    pub fn len(&self) -> usize {
        match self {
            Self::Quiz(questions) => questions.len(),
            Self::Flashcards(cards) => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Quiz(_) => ContentType::Quiz,
            Self::Flashcards(_) => ContentType::Flashcards,
        }
    }
}
