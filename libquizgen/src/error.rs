//! Error types for Quizgen

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuizgenError>;

#[derive(Error, Debug)]
pub enum QuizgenError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Input(#[from] InputError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("Generation failed: {0}")]
    Response(#[from] ResponseError),
}

impl QuizgenError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            QuizgenError::Input(_) => 3,
            QuizgenError::Completion(CompletionError::Unauthorized(_)) => 2,
            QuizgenError::Completion(_) => 1,
            QuizgenError::Backend(_) => 1,
            QuizgenError::Config(_) => 1,
            QuizgenError::Response(_) => 1,
        }
    }

    /// Whether the error belongs next to an input field rather than in an overlay
    pub fn is_inline(&self) -> bool {
        matches!(self, QuizgenError::Input(_))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Rejected user input
///
/// The display text of each variant is the message shown next to the field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a YouTube video URL")]
    EmptyYouTubeUrl,

    #[error("Playlist URLs are not supported. Please enter a single video URL")]
    YouTubePlaylist,

    #[error("Channel URLs are not supported. Please enter a video URL")]
    YouTubeChannel,

    #[error("YouTube Shorts are not currently supported. Please enter a regular video URL")]
    YouTubeShorts,

    #[error("Invalid YouTube URL. Please enter a valid video URL (e.g., https://www.youtube.com/watch?v=...)")]
    InvalidYouTubeUrl,

    #[error("Please enter a website URL")]
    EmptyWebsiteUrl,

    #[error("URL must start with http:// or https://")]
    MissingHttpScheme,

    #[error("This is a YouTube URL. Please select \"YouTube\" as your content source instead")]
    YouTubeAsWebsite,

    #[error("Invalid protocol")]
    InvalidProtocol,

    #[error("Invalid domain structure")]
    InvalidDomain,

    #[error("Invalid URL format. Please enter a valid website URL")]
    MalformedUrl,

    #[error("Please enter a topic (e.g., \"English Grammar Past Tense\")")]
    EmptyTopic,

    #[error("URLs are not allowed as a topic. Please enter a topic phrase.")]
    TopicIsUrl,

    #[error("Topic must be at least 3 characters long")]
    TopicTooShort,

    #[error("Topic must be less than 200 characters")]
    TopicTooLong,

    #[error("Invalid characters detected. Please use only letters, numbers, and basic punctuation")]
    SqlPattern,

    #[error("HTML tags and scripts are not allowed")]
    MarkupPattern,

    #[error("Please upload a document first")]
    MissingDocument,

    #[error("Error reading file: {0}")]
    UnreadableDocument(String),

    #[error("Please enter a number between 1 and {max}")]
    CountOutOfRange { max: u32 },
}

/// Failures talking to the backend collaborator
#[derive(Error, Debug, Clone)]
pub enum BackendError {
    #[error("Network error: {0}. Make sure the backend server is running.")]
    Network(String),

    #[error("Backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Rejected(String),

    #[error("Unexpected response from backend: {0}")]
    Decode(String),

    #[error("The {0} came back empty. Please try another source.")]
    EmptyContent(&'static str),
}

/// Failures talking to the completion endpoint
#[derive(Error, Debug, Clone)]
pub enum CompletionError {
    #[error("API error: {0}")]
    Status(String),

    #[error("API key rejected: {0}")]
    Unauthorized(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Completion response had no choices")]
    EmptyChoices,

    #[error("Unexpected completion payload: {0}")]
    Decode(String),
}

/// The model answered, but not with the JSON shape that was asked for
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    #[error("response is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("response is missing the \"{0}\" array")]
    MissingKey(&'static str),

    #[error("response contained no {0}")]
    Empty(&'static str),

    #[error("question {index} has {count} options, expected 4")]
    OptionCount { index: usize, count: usize },

    #[error("question {index} marks option {answer} as correct, which does not exist")]
    AnswerOutOfRange { index: usize, answer: usize },
}
