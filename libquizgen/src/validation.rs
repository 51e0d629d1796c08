//! Input validation and sanitization
//!
//! Pure string checks applied to everything the user types before it reaches
//! the backend or a prompt:
//!
//! - YouTube video URLs (playlists, channels and Shorts are rejected)
//! - Website URLs
//! - Free-text topics (length, URL look-alikes, SQL and markup heuristics)
//! - Sanitizers that strip invisible characters, script/iframe elements,
//!   inline event handlers and SQL comment markers
//!
//! The injection checks are keyword heuristics, not parsers. They exist to
//! keep obviously hostile text out of prompts, not to make it safe for a
//! database or a browser.
//!
//! # Example
//!
//! ```
//! use libquizgen::validation::{validate_youtube_url, validate_topic, sanitize_text};
//! use libquizgen::error::InputError;
//!
//! assert!(validate_youtube_url("https://youtu.be/dQw4w9WgXcQ").is_ok());
//! assert_eq!(
//!     validate_youtube_url("https://www.youtube.com/shorts/abc"),
//!     Err(InputError::YouTubeShorts)
//! );
//! assert!(validate_topic("Photosynthesis").is_ok());
//! assert_eq!(sanitize_text("  hello\u{200B} -- world  "), "hello  world");
//! ```

use std::sync::LazyLock;

use regex::{Regex, RegexSet};
use reqwest::Url;

use crate::error::InputError;
use crate::types::{ContentSource, ContentType};

/// Topics shorter than this (after trimming) are rejected
pub const MIN_TOPIC_CHARS: usize = 3;

/// Topics longer than this (after trimming) are rejected
pub const MAX_TOPIC_CHARS: usize = 200;

/// Sanitized text is cut to this many characters
pub const MAX_SANITIZED_CHARS: usize = 500;

static YOUTUBE_ID_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"youtube\.com/embed/([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"youtube\.com/v/([A-Za-z0-9_-]{11})").unwrap(),
    ]
});

static SQL_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)\bSELECT\b.*\bFROM\b",
        r"(?i)\bINSERT\b.*\bINTO\b",
        r"(?i)\bUPDATE\b.*\bSET\b",
        r"(?i)\bDELETE\b.*\bFROM\b",
        r"(?i)\bDROP\b.*\bTABLE\b",
        r"(?i)\bUNION\b.*\bSELECT\b",
        r"--|/\*|\*/",
        r"(?i)\bOR\b.*=",
        r"(?i)'.*OR.*'.*=.*'",
    ])
    .unwrap()
});

static MARKUP_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)<script[^>]*>",
        r"(?i)<iframe[^>]*>",
        r"(?i)javascript:",
        r"(?i)onerror\s*=",
        r"(?i)onload\s*=",
        r"(?i)onclick\s*=",
    ])
    .unwrap()
});

static URL_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(https?://)?",
        r"((([a-z\d]([a-z\d-]*[a-z\d])*)\.)+[a-z]{2,}|((\d{1,3}\.){3}\d{1,3}))",
        r"(:\d+)?(/[-a-z\d%_.~+]*)*",
        r"(\?[;&a-z\d%_.~+=-]*)?",
        r"(#[-a-z\d_]*)?$",
    ))
    .unwrap()
});

static SCRIPT_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());

static IFRAME_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<iframe[^>]*>.*?</iframe>").unwrap());

static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)on\w+\s*=\s*["'][^"']*["']"#).unwrap());

// ============================================================================
// YouTube
// ============================================================================

/// Classification of a YouTube-looking URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YouTubeUrlKind {
    Video,
    Playlist,
    Channel,
    Shorts,
    Invalid,
}

/// Extract the 11-character video ID from a watch, short-link, embed or `/v/` URL
pub fn extract_youtube_video_id(url: &str) -> Option<&str> {
    YOUTUBE_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Whether the URL points at any YouTube domain
pub fn is_youtube_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.contains("youtube.com") || lower.contains("youtu.be")
}

pub fn is_youtube_playlist(url: &str) -> bool {
    url.contains("/playlist?") || url.contains("&list=")
}

pub fn is_youtube_channel(url: &str) -> bool {
    url.contains("/channel/") || url.contains("/@")
}

pub fn is_youtube_shorts(url: &str) -> bool {
    url.contains("/shorts/")
}

/// Classify a URL. Playlist, channel and Shorts markers win over a video ID.
pub fn youtube_url_kind(url: &str) -> YouTubeUrlKind {
    let url = url.trim();

    if !is_youtube_url(url) {
        YouTubeUrlKind::Invalid
    } else if is_youtube_playlist(url) {
        YouTubeUrlKind::Playlist
    } else if is_youtube_channel(url) {
        YouTubeUrlKind::Channel
    } else if is_youtube_shorts(url) {
        YouTubeUrlKind::Shorts
    } else if extract_youtube_video_id(url).is_some() {
        YouTubeUrlKind::Video
    } else {
        YouTubeUrlKind::Invalid
    }
}

/// Accept only single-video YouTube URLs
pub fn validate_youtube_url(url: &str) -> Result<(), InputError> {
    if url.trim().is_empty() {
        return Err(InputError::EmptyYouTubeUrl);
    }

    match youtube_url_kind(url) {
        YouTubeUrlKind::Video => Ok(()),
        YouTubeUrlKind::Playlist => Err(InputError::YouTubePlaylist),
        YouTubeUrlKind::Channel => Err(InputError::YouTubeChannel),
        YouTubeUrlKind::Shorts => Err(InputError::YouTubeShorts),
        YouTubeUrlKind::Invalid => Err(InputError::InvalidYouTubeUrl),
    }
}

// ============================================================================
// Websites
// ============================================================================

/// Accept absolute http(s) URLs with a dotted hostname that are not YouTube
pub fn validate_website_url(url: &str) -> Result<(), InputError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(InputError::EmptyWebsiteUrl);
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(InputError::MissingHttpScheme);
    }

    if is_youtube_url(url) {
        return Err(InputError::YouTubeAsWebsite);
    }

    let parsed = Url::parse(url).map_err(|_| InputError::MalformedUrl)?;

    if matches!(parsed.scheme(), "javascript" | "data") {
        return Err(InputError::InvalidProtocol);
    }

    match parsed.host_str() {
        Some(host) if host.contains('.') => Ok(()),
        _ => Err(InputError::InvalidDomain),
    }
}

// ============================================================================
// Topics
// ============================================================================

/// Loose "is this a URL or bare domain" check used to keep links out of topics
pub fn looks_like_url(text: &str) -> bool {
    URL_LIKE.is_match(text)
}

pub fn contains_sql_pattern(text: &str) -> bool {
    SQL_PATTERNS.is_match(text)
}

pub fn contains_markup_pattern(text: &str) -> bool {
    MARKUP_PATTERNS.is_match(text)
}

/// Validate a free-text topic
pub fn validate_topic(text: &str) -> Result<(), InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyTopic);
    }

    if looks_like_url(trimmed) {
        return Err(InputError::TopicIsUrl);
    }

    let chars = trimmed.chars().count();
    if chars < MIN_TOPIC_CHARS {
        return Err(InputError::TopicTooShort);
    }
    if chars > MAX_TOPIC_CHARS {
        return Err(InputError::TopicTooLong);
    }

    if contains_sql_pattern(trimmed) {
        return Err(InputError::SqlPattern);
    }

    if contains_markup_pattern(trimmed) {
        return Err(InputError::MarkupPattern);
    }

    Ok(())
}

/// Run the validator that matches the chosen content source
///
/// Documents are only checked for a non-empty path here; reading the file
/// happens when content is gathered.
pub fn validate_input(source: ContentSource, input: &str) -> Result<(), InputError> {
    match source {
        ContentSource::Document => {
            if input.trim().is_empty() {
                Err(InputError::MissingDocument)
            } else {
                Ok(())
            }
        }
        ContentSource::Youtube => validate_youtube_url(input),
        ContentSource::Website => validate_website_url(input),
        ContentSource::Topic => validate_topic(input),
    }
}

/// Check the requested number of questions or cards
pub fn validate_count(content_type: ContentType, count: u32) -> Result<(), InputError> {
    let max = content_type.max_count();
    if (1..=max).contains(&count) {
        Ok(())
    } else {
        Err(InputError::CountOutOfRange { max })
    }
}

// ============================================================================
// Sanitizers
// ============================================================================

fn is_invisible(c: char) -> bool {
    matches!(c, '\0' | '\u{200B}'..='\u{200D}' | '\u{FEFF}')
}

fn strip_invisible(text: &str) -> String {
    text.chars().filter(|c| !is_invisible(*c)).collect()
}

fn sanitize_pass(text: &str) -> String {
    let text = strip_invisible(text.trim());
    let text = SCRIPT_ELEMENT.replace_all(&text, "");
    let text = IFRAME_ELEMENT.replace_all(&text, "");
    let text = EVENT_HANDLER.replace_all(&text, "");
    text.replace("--", "")
        .replace("/*", "")
        .replace("*/", "")
        .trim()
        .to_string()
}

/// Clean free text before it is placed in a prompt
///
/// Removals can splice together a new match (`<scr<script></script>ipt>`), so
/// the cleaning pass is repeated until nothing changes. Every pass only
/// deletes, so the loop terminates. The result is a fixed point, which makes
/// the function idempotent.
pub fn sanitize_text(text: &str) -> String {
    let mut current = sanitize_pass(text);
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }

    match current.char_indices().nth(MAX_SANITIZED_CHARS) {
        Some((cut, _)) => current[..cut].trim_end().to_string(),
        None => current,
    }
}

/// Clean a URL; `javascript:` URLs come back empty
pub fn sanitize_url(url: &str) -> String {
    let url = strip_invisible(url.trim());
    let url = SCRIPT_ELEMENT.replace_all(&url, "");

    if url.to_lowercase().starts_with("javascript:") {
        return String::new();
    }

    url.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_limits_follow_content_type() {
        assert!(validate_count(ContentType::Quiz, 1).is_ok());
        assert!(validate_count(ContentType::Quiz, 20).is_ok());
        assert_eq!(
            validate_count(ContentType::Quiz, 21),
            Err(InputError::CountOutOfRange { max: 20 })
        );
        assert!(validate_count(ContentType::Flashcards, 30).is_ok());
        assert_eq!(
            validate_count(ContentType::Flashcards, 0).unwrap_err().to_string(),
            "Please enter a number between 1 and 30"
        );
    }

    #[test]
    fn test_extract_video_id_from_all_forms() {
        let cases = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
        ];
        for url in cases {
            assert_eq!(extract_youtube_video_id(url), Some("dQw4w9WgXcQ"), "{url}");
        }
    }

    #[test]
    fn test_extract_video_id_requires_eleven_chars() {
        assert_eq!(extract_youtube_video_id("https://youtu.be/short"), None);
        assert_eq!(extract_youtube_video_id(""), None);
    }

    #[test]
    fn test_url_kind_precedence() {
        // A list parameter wins over a valid video ID
        assert_eq!(
            youtube_url_kind("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL123"),
            YouTubeUrlKind::Playlist
        );
        assert_eq!(
            youtube_url_kind("https://www.youtube.com/@somebody"),
            YouTubeUrlKind::Channel
        );
        assert_eq!(
            youtube_url_kind("https://vimeo.com/watch?v=dQw4w9WgXcQ"),
            YouTubeUrlKind::Invalid
        );
    }

    #[test]
    fn test_youtube_validator_messages() {
        assert_eq!(validate_youtube_url("   "), Err(InputError::EmptyYouTubeUrl));
        assert_eq!(
            validate_youtube_url("https://www.youtube.com/playlist?list=PL123"),
            Err(InputError::YouTubePlaylist)
        );
        assert_eq!(
            validate_youtube_url("https://www.youtube.com/channel/UC123"),
            Err(InputError::YouTubeChannel)
        );
        assert_eq!(
            validate_youtube_url("https://www.youtube.com/shorts/abcdefghijk"),
            Err(InputError::YouTubeShorts)
        );
        assert_eq!(
            validate_youtube_url("https://www.youtube.com/feed/trending"),
            Err(InputError::InvalidYouTubeUrl)
        );
        assert!(validate_youtube_url("  https://www.youtube.com/watch?v=dQw4w9WgXcQ  ").is_ok());
    }

    #[test]
    fn test_website_validator() {
        assert!(validate_website_url("https://example.com/article").is_ok());
        assert!(validate_website_url("http://192.168.0.1/page").is_ok());
        assert_eq!(validate_website_url(""), Err(InputError::EmptyWebsiteUrl));
        assert_eq!(
            validate_website_url("ftp://example.com"),
            Err(InputError::MissingHttpScheme)
        );
        assert_eq!(
            validate_website_url("javascript:alert(1)"),
            Err(InputError::MissingHttpScheme)
        );
        assert_eq!(
            validate_website_url("https://youtu.be/dQw4w9WgXcQ"),
            Err(InputError::YouTubeAsWebsite)
        );
        assert_eq!(
            validate_website_url("http://localhost:8080"),
            Err(InputError::InvalidDomain)
        );
        assert_eq!(
            validate_website_url("https://exa mple.com"),
            Err(InputError::MalformedUrl)
        );
    }

    #[test]
    fn test_topic_validator() {
        assert!(validate_topic("English Grammar Past Tense").is_ok());
        assert!(validate_topic("  The French Revolution  ").is_ok());
        assert_eq!(validate_topic(""), Err(InputError::EmptyTopic));
        assert_eq!(validate_topic("ab"), Err(InputError::TopicTooShort));
        assert_eq!(validate_topic(&"a".repeat(201)), Err(InputError::TopicTooLong));
        assert!(validate_topic(&"a".repeat(200)).is_ok());
        assert_eq!(validate_topic("example.com"), Err(InputError::TopicIsUrl));
        assert_eq!(
            validate_topic("https://en.wikipedia.org/wiki/Rust"),
            Err(InputError::TopicIsUrl)
        );
    }

    #[test]
    fn test_topic_injection_heuristics() {
        assert_eq!(
            validate_topic("select name from users"),
            Err(InputError::SqlPattern)
        );
        assert_eq!(validate_topic("x' OR '1'='1"), Err(InputError::SqlPattern));
        assert_eq!(validate_topic("history -- of rome"), Err(InputError::SqlPattern));
        assert_eq!(
            validate_topic("<script>alert(1)</script>"),
            Err(InputError::MarkupPattern)
        );
        assert_eq!(
            validate_topic("<img src=x onerror=alert(1)>"),
            Err(InputError::MarkupPattern)
        );
    }

    #[test]
    fn test_topic_keywords_need_word_boundaries() {
        // "Oregon" contains "or" and "Selection" contains "select"
        assert!(validate_topic("Oregon Trail history").is_ok());
        assert!(validate_topic("Natural Selection from Darwin").is_ok());
    }

    #[test]
    fn test_validate_input_dispatches_by_source() {
        assert_eq!(
            validate_input(ContentSource::Document, " "),
            Err(InputError::MissingDocument)
        );
        assert!(validate_input(ContentSource::Document, "notes.txt").is_ok());
        assert_eq!(
            validate_input(ContentSource::Youtube, "https://example.com"),
            Err(InputError::InvalidYouTubeUrl)
        );
        assert!(validate_input(ContentSource::Website, "https://example.com").is_ok());
        assert_eq!(validate_input(ContentSource::Topic, "ab"), Err(InputError::TopicTooShort));
    }

    #[test]
    fn test_sanitize_text_strips_hostile_fragments() {
        assert_eq!(
            sanitize_text("Rust <script>alert('x')</script>ownership"),
            "Rust ownership"
        );
        assert_eq!(sanitize_text("a<iframe src=x></iframe>b"), "ab");
        assert_eq!(sanitize_text(r#"<b onclick="steal()">bold</b>"#), "<b >bold</b>");
        assert_eq!(sanitize_text("drop -- table /* x */"), "drop  table  x");
        assert_eq!(sanitize_text("zero\u{200B}width\u{FEFF}\0"), "zerowidth");
    }

    #[test]
    fn test_sanitize_text_handles_spliced_tags() {
        let nested = "<scr<script></script>ipt>alert(1)</script>safe";
        assert_eq!(sanitize_text(nested), "safe");
        assert_eq!(sanitize_text("-/*-"), "");
    }

    #[test]
    fn test_sanitize_text_truncates() {
        let long = "word ".repeat(200);
        let cleaned = sanitize_text(&long);
        assert!(cleaned.chars().count() <= MAX_SANITIZED_CHARS);
        assert!(!cleaned.ends_with(' '));
    }

    #[test]
    fn test_sanitize_text_is_idempotent() {
        let accented = "é ".repeat(300);
        let cut_tag = format!("{}<script>", "x".repeat(499));
        let samples = [
            "",
            "   plain topic   ",
            " <script></script> x",
            "<scr<script></script>ipt>x</script>",
            "a-/*-b",
            "on<script></script>click='x' text",
            "\u{200B}--\u{200B}-",
            accented.as_str(),
            cut_tag.as_str(),
        ];
        for sample in samples {
            let once = sanitize_text(sample);
            assert_eq!(sanitize_text(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_sanitize_url() {
        assert_eq!(sanitize_url("  https://example.com\u{200B}  "), "https://example.com");
        assert_eq!(sanitize_url("JavaScript:alert(1)"), "");
        assert_eq!(
            sanitize_url("https://example.com/<script>x</script>"),
            "https://example.com/"
        );
    }
}
