//! Validator and sanitizer behavior across the public API

use libquizgen::error::InputError;
use libquizgen::validation::{
    extract_youtube_video_id, sanitize_text, sanitize_url, validate_input, validate_topic,
    validate_website_url, validate_youtube_url, youtube_url_kind, YouTubeUrlKind,
};
use libquizgen::ContentSource;

#[test]
fn test_youtube_rejections_are_distinct() {
    let playlists = [
        "https://www.youtube.com/playlist?list=PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf",
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL123",
    ];
    for url in playlists {
        assert_eq!(validate_youtube_url(url), Err(InputError::YouTubePlaylist), "{url}");
    }

    let channels = [
        "https://www.youtube.com/channel/UC_x5XG1OV2P6uZZ5FSM9Ttw",
        "https://www.youtube.com/@GoogleDevelopers",
    ];
    for url in channels {
        assert_eq!(validate_youtube_url(url), Err(InputError::YouTubeChannel), "{url}");
    }

    assert_eq!(
        validate_youtube_url("https://www.youtube.com/shorts/abcdefghijk"),
        Err(InputError::YouTubeShorts)
    );
}

#[test]
fn test_youtube_videos_are_accepted() {
    for url in [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://youtu.be/dQw4w9WgXcQ",
        "https://www.youtube.com/embed/dQw4w9WgXcQ",
        "youtube.com/v/dQw4w9WgXcQ",
    ] {
        assert!(validate_youtube_url(url).is_ok(), "{url}");
        assert_eq!(extract_youtube_video_id(url), Some("dQw4w9WgXcQ"));
        assert_eq!(youtube_url_kind(url), YouTubeUrlKind::Video);
    }
}

#[test]
fn test_youtube_garbage() {
    assert_eq!(validate_youtube_url("   "), Err(InputError::EmptyYouTubeUrl));
    assert_eq!(
        validate_youtube_url("https://vimeo.com/123456"),
        Err(InputError::InvalidYouTubeUrl)
    );
    assert_eq!(
        validate_youtube_url("https://www.youtube.com/watch?v=short"),
        Err(InputError::InvalidYouTubeUrl)
    );
}

#[test]
fn test_website_urls() {
    assert!(validate_website_url("https://en.wikipedia.org/wiki/Rust").is_ok());
    assert_eq!(validate_website_url(""), Err(InputError::EmptyWebsiteUrl));
    assert_eq!(validate_website_url("ftp://example.com"), Err(InputError::MissingHttpScheme));
    assert_eq!(validate_website_url("example.com"), Err(InputError::MissingHttpScheme));
    assert_eq!(
        validate_website_url("https://youtu.be/dQw4w9WgXcQ"),
        Err(InputError::YouTubeAsWebsite)
    );
    assert_eq!(validate_website_url("http://localhost"), Err(InputError::InvalidDomain));
}

#[test]
fn test_topic_lengths() {
    assert_eq!(validate_topic("ab"), Err(InputError::TopicTooShort));
    assert_eq!(validate_topic(&"a".repeat(201)), Err(InputError::TopicTooLong));
    assert!(validate_topic(&"a".repeat(200)).is_ok());
    assert_eq!(validate_topic("   "), Err(InputError::EmptyTopic));
}

#[test]
fn test_topic_rejects_urls_and_injection() {
    assert_eq!(validate_topic("www.example.com"), Err(InputError::TopicIsUrl));
    assert_eq!(validate_topic("https://example.com/page"), Err(InputError::TopicIsUrl));
    assert_eq!(
        validate_topic("history; DROP TABLE users"),
        Err(InputError::SqlPattern)
    );
    assert_eq!(
        validate_topic("<script>alert(1)</script> biology"),
        Err(InputError::MarkupPattern)
    );
    assert!(validate_topic("English Grammar Past Tense").is_ok());
}

#[test]
fn test_validate_input_dispatch() {
    assert_eq!(validate_input(ContentSource::Document, ""), Err(InputError::MissingDocument));
    assert!(validate_input(ContentSource::Document, "~/notes.txt").is_ok());
    assert_eq!(
        validate_input(ContentSource::Topic, "hi"),
        Err(InputError::TopicTooShort)
    );
}

#[test]
fn test_sanitize_text_is_idempotent() {
    let inputs = [
        "plain text",
        "  padded\u{FEFF}  ",
        "<scr<script>x</script>ipt>alert(1)</script>",
        "a -- b /* c */ d",
        "<img src=x onerror=\"steal()\"> cats",
        "\0null\u{200C}byte",
    ];

    for input in inputs {
        let once = sanitize_text(input);
        assert_eq!(sanitize_text(&once), once, "not idempotent for {input:?}");
    }
}

#[test]
fn test_sanitize_text_truncates_long_topics() {
    let long = "word ".repeat(200);
    let cleaned = sanitize_text(&long);
    assert!(cleaned.chars().count() <= 500);
    assert_eq!(sanitize_text(&cleaned), cleaned);
}

#[test]
fn test_sanitize_url() {
    assert_eq!(sanitize_url("javascript:alert(1)"), "");
    assert_eq!(sanitize_url("JavaScript:alert(1)"), "");
    assert_eq!(sanitize_url(" https://example.com\u{200B} "), "https://example.com");
}
