/*!
 * Provider implementations for different text-generation services.
 *
 * This module contains client implementations for various LLM providers:
 * - OpenAI: OpenAI chat completions API (default)
 * - Anthropic: Anthropic messages API
 * - Ollama: Local LLM server
 * - Mock: scripted provider for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

use crate::errors::ProviderError;

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably behind the generation client.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    ///
    /// # Arguments
    /// * `response` - The response from the provider
    ///
    /// # Returns
    /// * `String` - The extracted text
    fn extract_text(response: &Self::Response) -> String;
}

pub mod anthropic;
pub mod mock;
pub mod ollama;
pub mod openai;

/// Classify a transport-level reqwest failure
pub(crate) fn map_transport_error(error: reqwest::Error, timeout_secs: u64) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout(Duration::from_secs(timeout_secs))
    } else if error.is_connect() {
        ProviderError::ConnectionError(error.to_string())
    } else {
        ProviderError::RequestFailed(error.to_string())
    }
}

/// Classify a non-success HTTP status returned by a provider
pub(crate) fn map_status_error(status_code: u16, body: String) -> ProviderError {
    match status_code {
        401 | 403 => ProviderError::AuthenticationError(body),
        429 => ProviderError::RateLimitExceeded(body),
        _ => ProviderError::ApiError {
            status_code,
            message: body,
        },
    }
}

/// Send a JSON request and decode the JSON answer, mapping every failure mode
pub(crate) async fn send_json<T: serde::de::DeserializeOwned>(
    builder: reqwest::RequestBuilder,
    provider_name: &str,
    timeout_secs: u64,
) -> Result<T, ProviderError> {
    let response = builder
        .send()
        .await
        .map_err(|e| map_transport_error(e, timeout_secs))?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());
        log::debug!("{} API error ({}): {}", provider_name, status, error_text);
        return Err(map_status_error(status.as_u16(), error_text));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::ParseError(format!("{} response: {}", provider_name, e)))
}
