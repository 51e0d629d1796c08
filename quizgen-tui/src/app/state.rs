//! Application state
//!
//! All state transitions happen through the reducer (see `reducer.rs`).

use libquizgen::config::DefaultsConfig;
use libquizgen::validation::{validate_count, validate_input};
use libquizgen::{ContentSource, ContentType, GenerationRequest, Language, Session, ViewKind};

/// Root application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub should_quit: bool,

    /// Help overlay visible?
    pub help_visible: bool,

    /// Error overlay message
    pub error: Option<String>,

    /// Setup form
    pub setup: SetupState,

    /// Quiz, flashcards and results
    pub session: Session,

    /// In-flight generation
    pub generation: GenerationState,

    /// First visible line of the results breakdown
    pub results_scroll: u16,

    pub status: StatusBarState,

    pub config: UiConfig,

    /// Request queued by the reducer for the event loop to spawn
    pub pending_generation: Option<GenerationRequest>,
}

/// Field of the setup form that receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    Source,
    ContentType,
    Language,
    Count,
    Input,
}

impl SetupField {
    const ORDER: [SetupField; 5] = [
        SetupField::Source,
        SetupField::ContentType,
        SetupField::Language,
        SetupField::Count,
        SetupField::Input,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SetupField::Source => "Source",
            SetupField::ContentType => "Generate",
            SetupField::Language => "Language",
            SetupField::Count => "Count",
            SetupField::Input => "Input",
        }
    }
}

/// Setup form state
#[derive(Debug, Clone)]
pub struct SetupState {
    pub focus: SetupField,
    pub source: ContentSource,
    pub content_type: ContentType,
    pub language: Language,
    pub num_questions: u32,
    pub num_cards: u32,

    /// Document path, video URL, website URL or topic
    pub input: String,

    /// Set once the user has typed or tried to generate
    pub touched: bool,

    pub input_error: Option<String>,
    pub count_error: Option<String>,
}

/// Generation status shown while the form is disabled
#[derive(Debug, Clone, Default)]
pub struct GenerationState {
    pub busy: bool,
    pub generation_id: Option<String>,
    pub message: Option<String>,
    /// Advances on every tick while busy
    pub spinner_frame: usize,
}

/// Status bar state
#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    pub message: Option<String>,
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,

    /// Use unicode symbols (false = ASCII fallback)
    pub unicode_enabled: bool,

    pub tick_rate_ms: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_defaults(&DefaultsConfig::default())
    }
}

impl Default for SetupState {
    fn default() -> Self {
        Self::from_defaults(&DefaultsConfig::default())
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        let colors_enabled = std::env::var_os("NO_COLOR").is_none()
            && std::env::var_os("QUIZGEN_TUI_NO_COLOR").is_none();

        let unicode_enabled = colors_enabled;

        let tick_rate_ms = std::env::var("QUIZGEN_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            colors_enabled,
            unicode_enabled,
            tick_rate_ms,
        }
    }
}

impl SetupState {
    /// Form pre-filled from the `[defaults]` config section
    pub fn from_defaults(defaults: &DefaultsConfig) -> Self {
        Self {
            focus: SetupField::Input,
            source: defaults.source,
            content_type: defaults.content_type,
            language: defaults.language,
            num_questions: defaults.num_questions,
            num_cards: defaults.num_cards,
            input: String::new(),
            touched: false,
            input_error: None,
            count_error: None,
        }
        .validated()
    }

    /// Questions or cards requested for the current content type
    pub fn count(&self) -> u32 {
        match self.content_type {
            ContentType::Quiz => self.num_questions,
            ContentType::Flashcards => self.num_cards,
        }
    }

    pub fn set_count(&mut self, count: u32) {
        match self.content_type {
            ContentType::Quiz => self.num_questions = count,
            ContentType::Flashcards => self.num_cards = count,
        }
    }

    /// Recompute inline errors for the current fields
    pub fn validated(self) -> Self {
        let input_error = validate_input(self.source, &self.input)
            .err()
            .map(|e| e.to_string());
        let count_error = validate_count(self.content_type, self.count())
            .err()
            .map(|e| e.to_string());
        Self {
            input_error,
            count_error,
            ..self
        }
    }

    pub fn is_valid(&self) -> bool {
        self.input_error.is_none() && self.count_error.is_none()
    }

    /// Input error, hidden until the field has been touched
    pub fn visible_input_error(&self) -> Option<&str> {
        self.input_error.as_deref().filter(|_| self.touched)
    }

    pub fn request(&self) -> GenerationRequest {
        GenerationRequest {
            source: self.source,
            content_type: self.content_type,
            language: self.language,
            count: self.count(),
            input: self.input.trim().to_string(),
        }
    }

    /// Title of the input field for the current source
    pub fn input_title(&self) -> &'static str {
        match self.source {
            ContentSource::Document => "Document path",
            ContentSource::Youtube => "YouTube video URL",
            ContentSource::Website => "Website URL",
            ContentSource::Topic => "Topic",
        }
    }

    pub fn input_placeholder(&self) -> &'static str {
        match self.source {
            ContentSource::Document => "~/notes/lecture.md",
            ContentSource::Youtube => "https://www.youtube.com/watch?v=...",
            ContentSource::Website => "https://en.wikipedia.org/wiki/...",
            ContentSource::Topic => "English Grammar Past Tense",
        }
    }

    /// Upper bound of the count field
    pub fn max_count(&self) -> u32 {
        self.content_type.max_count()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose setup form starts from `defaults`
    pub fn with_defaults(defaults: &DefaultsConfig) -> Self {
        Self {
            should_quit: false,
            help_visible: false,
            error: None,
            setup: SetupState::from_defaults(defaults),
            session: Session::new(),
            generation: GenerationState::default(),
            results_scroll: 0,
            status: StatusBarState::default(),
            config: UiConfig::default(),
            pending_generation: None,
        }
    }

    pub fn view(&self) -> ViewKind {
        self.session.kind()
    }

    /// Generation is allowed from a valid, idle setup form
    pub fn can_generate(&self) -> bool {
        self.view() == ViewKind::Setup && self.setup.is_valid() && !self.generation.busy
    }

    /// Whether the setup input field should receive typed characters
    pub fn input_focused(&self) -> bool {
        self.view() == ViewKind::Setup
            && self.setup.focus == SetupField::Input
            && !self.generation.busy
            && !self.overlay_visible()
    }

    /// Help or error overlay is covering the view
    pub fn overlay_visible(&self) -> bool {
        self.help_visible || self.error.is_some()
    }

    /// `q` quits only when it cannot be input or an answer
    pub fn can_quit(&self) -> bool {
        !self.generation.busy && !self.input_focused()
    }

    /// Unwrapped lines in the results breakdown
    ///
    /// Each question takes its header, both answers and a blank line, plus
    /// one line when an explanation is shown.
    pub fn results_line_count(&self) -> u16 {
        self.session.results().map_or(0, |results| {
            results
                .outcomes
                .iter()
                .map(|outcome| 4 + u16::from(outcome.shown_explanation().is_some()))
                .fold(0u16, u16::saturating_add)
        })
    }

    /// Furthest the breakdown may scroll; the last line stays visible
    pub fn max_results_scroll(&self) -> u16 {
        self.results_line_count().saturating_sub(1)
    }
}

/// Count bounds for a form field, used by the reducer to clamp
pub(crate) fn clamp_count(count: u32, max: u32) -> u32 {
    count.clamp(1, max.max(1))
}
