/*!
 * Tests for error types and conversions
 */

use std::error::Error;
use std::time::Duration;

use yamat::errors::{AppError, ConfigError, GlossaryError, InputError, PipelineError, ProviderError};
use yamat::translation::Stage;

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection reset".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection reset"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 503,
        message: "Service unavailable".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("Service unavailable"));
}

#[test]
fn test_providerError_timeout_shouldMentionLimit() {
    assert_eq!(ProviderError::Timeout(Duration::from_secs(30)).to_string(), "Request timed out after 30s");
    assert_eq!(ProviderError::Timeout(Duration::from_millis(50)).to_string(), "Request timed out after 50ms");
}

#[test]
fn test_pipelineError_shouldNameStageAndKeepSource() {
    let error = PipelineError::Generation {
        stage: Stage::GlossaryCheck,
        source: ProviderError::RateLimitExceeded("quota exhausted".to_string()),
    };

    assert_eq!(error.stage(), Stage::GlossaryCheck);
    assert!(error.to_string().starts_with("glossary_check stage failed"));
    let source = error.source().map(|s| s.to_string()).unwrap_or_default();
    assert!(source.contains("quota exhausted"));
}

#[test]
fn test_glossaryError_missingColumns_shouldDisplayCount() {
    let display = GlossaryError::MissingColumns(1).to_string();
    assert!(display.contains("two columns"));
    assert!(display.contains("found 1"));
}

#[test]
fn test_configError_missingCredential_shouldNameProvider() {
    let display = ConfigError::MissingCredential("OpenAI".to_string()).to_string();
    assert_eq!(display, "API key is required for the OpenAI provider");
}

#[test]
fn test_appError_fromPipelineError_shouldWrap() {
    let pipeline_error = PipelineError::Generation {
        stage: Stage::Draft,
        source: ProviderError::EmptyResponse,
    };

    let app_error: AppError = pipeline_error.into();

    assert!(matches!(app_error, AppError::Pipeline(_)));
    assert!(app_error.to_string().contains("draft stage failed"));
}

#[test]
fn test_appError_fromInputError_shouldWrap() {
    let app_error: AppError = InputError::EmptySourceText.into();
    assert!(matches!(app_error, AppError::Input(InputError::EmptySourceText)));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(_)));
}
