//! Setup form validation service
//!
//! Runs the source-specific input validator and the count check together so
//! a form can show both results inline while the user types.

use std::sync::Arc;

use crate::config::Config;
use crate::error::InputError;
use crate::types::{ContentSource, ContentType, GenerationRequest};
use crate::validation::{validate_count, validate_input};

/// Service for validating the setup form
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use libquizgen::config::Config;
/// use libquizgen::service::validation::{ValidationRequest, ValidationService};
/// use libquizgen::types::{ContentSource, ContentType};
///
/// let service = ValidationService::new(Arc::new(Config::default()));
/// let response = service.validate(&ValidationRequest {
///     source: ContentSource::Topic,
///     content_type: ContentType::Quiz,
///     count: 25,
///     input: "ab".to_string(),
/// });
///
/// assert!(!response.valid);
/// assert_eq!(response.input.unwrap().to_string(), "Topic must be at least 3 characters long");
/// assert_eq!(response.count.unwrap().to_string(), "Please enter a number between 1 and 20");
/// ```
#[derive(Clone)]
pub struct ValidationService {
    config: Arc<Config>,
}

/// Form fields to validate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    pub source: ContentSource,
    pub content_type: ContentType,
    pub count: u32,
    pub input: String,
}

impl From<&GenerationRequest> for ValidationRequest {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            source: request.source,
            content_type: request.content_type,
            count: request.count,
            input: request.input.clone(),
        }
    }
}

/// Per-field validation results
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResponse {
    /// Whether every field is valid
    pub valid: bool,
    /// Problem with the input field, if any
    pub input: Option<InputError>,
    /// Problem with the count field, if any
    pub count: Option<InputError>,
}

impl ValidationResponse {
    /// First error, input field before count
    pub fn first_error(&self) -> Option<&InputError> {
        self.input.as_ref().or(self.count.as_ref())
    }

    pub fn into_result(self) -> Result<(), InputError> {
        match self.input.or(self.count) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl ValidationService {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn validate(&self, request: &ValidationRequest) -> ValidationResponse {
        let input = validate_input(request.source, &request.input).err();
        let count = validate_count(request.content_type, request.count).err();

        ValidationResponse {
            valid: input.is_none() && count.is_none(),
            input,
            count,
        }
    }

    /// Check a single input against the source's validator
    pub fn is_valid(&self, source: ContentSource, input: &str) -> bool {
        validate_input(source, input).is_ok()
    }

    /// Count to prefill for a content type, from `[defaults]`
    pub fn default_count(&self, content_type: ContentType) -> u32 {
        self.config.defaults.count_for(content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ValidationService {
        ValidationService::new(Arc::new(Config::default()))
    }

    fn request(source: ContentSource, input: &str) -> ValidationRequest {
        ValidationRequest {
            source,
            content_type: ContentType::Flashcards,
            count: 10,
            input: input.to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let response = service().validate(&request(
            ContentSource::Youtube,
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        ));
        assert!(response.valid);
        assert!(response.first_error().is_none());
        assert!(response.into_result().is_ok());
    }

    #[test]
    fn test_website_validator_applies_to_website_source() {
        let response = service().validate(&request(ContentSource::Website, "ftp://example.com"));
        assert_eq!(response.input, Some(InputError::MissingHttpScheme));
        assert_eq!(response.count, None);
    }

    #[test]
    fn test_input_error_reported_before_count() {
        let mut req = request(ContentSource::Document, "");
        req.count = 0;
        let response = service().validate(&req);
        assert_eq!(response.first_error(), Some(&InputError::MissingDocument));
        assert_eq!(response.into_result(), Err(InputError::MissingDocument));
    }

    #[test]
    fn test_default_counts_come_from_config() {
        let service = service();
        assert_eq!(service.default_count(ContentType::Quiz), 5);
        assert_eq!(service.default_count(ContentType::Flashcards), 10);
        assert!(service.is_valid(ContentSource::Topic, "Plate tectonics"));
    }
}
