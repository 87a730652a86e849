/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds, echoing the user message
 * - `MockProvider::scripted()` - Returns fixed responses in call order
 * - `MockProvider::fail_on_call()` - Fails on the k-th call only
 * - `MockProvider::failing()` - Always fails with an error
 *
 * Every call is recorded so tests can assert on the exact instruction and
 * message each stage sent.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::translation::client::GenerationClient;

/// Mock request for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    /// Role instruction (system prompt)
    pub instruction: String,
    /// User message
    pub message: String,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The generated text
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, echoing the message with a marker
    Working,
    /// Returns the scripted responses in order, then echoes
    Scripted(Vec<String>),
    /// Fails on the given 1-based call number, succeeds otherwise
    FailOnCall { call: usize },
    /// Always fails with an error
    Failing,
    /// Returns empty response
    Empty,
    /// Simulates slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing pipeline behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter shared between clones
    request_count: Arc<AtomicUsize>,
    /// Requests received, in order
    calls: Arc<Mutex<Vec<MockRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that answers with `responses` in call order
    pub fn scripted<S: Into<String>>(responses: impl IntoIterator<Item = S>) -> Self {
        Self::new(MockBehavior::Scripted(responses.into_iter().map(Into::into).collect()))
    }

    /// Create a mock that fails on the given 1-based call number
    pub fn fail_on_call(call: usize) -> Self {
        Self::new(MockBehavior::FailOnCall { call })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that waits `delay_ms` before answering
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Snapshot of all requests received so far
    pub fn calls(&self) -> Vec<MockRequest> {
        self.calls.lock().clone()
    }

    fn echo(&self, request: &MockRequest, call: usize) -> String {
        match self.custom_response {
            Some(generator) => generator(request),
            None => format!("[MOCK {}] {}", call, request.message),
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            request_count: Arc::clone(&self.request_count),
            calls: Arc::clone(&self.calls),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let call = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.calls.lock().push(request.clone());

        let text = match &self.behavior {
            MockBehavior::Working => self.echo(&request, call),

            MockBehavior::Scripted(responses) => match responses.get(call - 1) {
                Some(response) => response.clone(),
                None => self.echo(&request, call),
            },

            MockBehavior::FailOnCall { call: failing_call } => {
                if call == *failing_call {
                    return Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated failure (request #{})", call),
                    });
                }
                self.echo(&request, call)
            }

            MockBehavior::Failing => {
                return Err(ProviderError::ApiError {
                    status_code: 500,
                    message: "Simulated provider failure".to_string(),
                });
            }

            MockBehavior::Empty => String::new(),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                self.echo(&request, call)
            }
        };

        Ok(MockResponse { text })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError("Simulated outage".to_string())),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}

#[async_trait]
impl GenerationClient for MockProvider {
    async fn generate(&self, instruction: &str, message: &str) -> Result<String, ProviderError> {
        let response = self.complete(MockRequest {
            instruction: instruction.to_string(),
            message: message.to_string(),
        }).await?;
        Ok(Self::extract_text(&response))
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
