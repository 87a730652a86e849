/*!
 * Error types for the yamat application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions:
 * - `ProviderError`: faults of a single generation call
 * - `PipelineError`: a generation fault attributed to the stage that issued it
 * - `GlossaryError`: unreadable or malformed glossary sources (non-fatal for the CLI)
 * - `InputError`: caller-side preconditions on the source text
 * - `ConfigError`: startup configuration problems (fatal)
 */

use std::time::Duration;
use thiserror::Error;

use crate::translation::pipeline::Stage;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting or exhausted quota
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The call did not complete within the configured time
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The API answered without any generated text
    #[error("Provider returned an empty response")]
    EmptyResponse,
}

/// A failed pipeline run, tagged with the stage whose generation call failed
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Generation failure at one of the four stages
    #[error("{stage} stage failed: {source}")]
    Generation {
        /// Stage that issued the failing call
        stage: Stage,
        /// Underlying provider fault
        #[source]
        source: ProviderError,
    },
}

impl PipelineError {
    /// Stage the failure originated from
    pub fn stage(&self) -> Stage {
        match self {
            Self::Generation { stage, .. } => *stage,
        }
    }

    /// Underlying provider fault
    pub fn cause(&self) -> &ProviderError {
        match self {
            Self::Generation { source, .. } => source,
        }
    }
}

/// Errors raised while reading a glossary source
#[derive(Error, Debug)]
pub enum GlossaryError {
    /// File could not be opened or read
    #[error("Failed to read glossary file {path}: {message}")]
    Unreadable { path: String, message: String },

    /// Extension is not a supported tabular format
    #[error("Unsupported glossary format: {0}")]
    UnsupportedFormat(String),

    /// Workbook has no sheet to read terms from
    #[error("Glossary workbook has no worksheets")]
    NoWorksheet,

    /// Fewer than two columns of data
    #[error("Glossary needs two columns (source, target), found {0}")]
    MissingColumns(usize),

    /// Row-level parse failure
    #[error("Malformed glossary row {row}: {message}")]
    MalformedRow { row: usize, message: String },
}

/// Caller-side precondition failures
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    /// Nothing to translate
    #[error("Source text is empty")]
    EmptySourceText,
}

/// Startup configuration errors; any of these prevents a pipeline run
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Credential absent for a provider that needs one
    #[error("API key is required for the {0} provider")]
    MissingCredential(String),

    /// Model identifier absent
    #[error("Model identifier is required for the {0} provider")]
    MissingModel(String),

    /// Language code or name not recognised
    #[error("Invalid language: {0}")]
    InvalidLanguage(String),

    /// Provider endpoint is not a usable URL
    #[error("Invalid endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// Provider name not recognised
    #[error("Invalid provider type: {0}")]
    InvalidProvider(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from a pipeline run
    #[error("Translation error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Error from a glossary source
    #[error("Glossary error: {0}")]
    Glossary(#[from] GlossaryError),

    /// Error from input validation
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
