/*!
 * Generation client: the capability boundary around a text-generation service.
 *
 * The pipeline only ever talks to a `GenerationClient`; `ProviderClient` is the
 * production implementation that forwards each call to the configured provider
 * with a fixed model, while tests substitute a `MockProvider`.
 */

use async_trait::async_trait;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::{ConfigError, ProviderError};
use crate::providers::Provider;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::mock::MockProvider;
use crate::providers::ollama::{ChatMessage, ChatRequest, Ollama};
use crate::providers::openai::{OpenAI, OpenAIRequest};

/// A single-method text-generation capability.
///
/// One call is one outbound request: no retry, no trimming of the output.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate text for `message` under the role `instruction`
    async fn generate(&self, instruction: &str, message: &str) -> Result<String, ProviderError>;

    /// Short human-readable description, used in logs
    fn describe(&self) -> String {
        "generation client".to_string()
    }
}

/// Provider implementation variants
#[derive(Debug)]
enum Backend {
    OpenAI(OpenAI),
    Anthropic(Anthropic),
    Ollama(Ollama),
    Mock(MockProvider),
}

/// Generation client backed by one of the configured providers
#[derive(Debug)]
pub struct ProviderClient {
    backend: Backend,
    provider: TranslationProvider,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl ProviderClient {
    /// Build the client for the active provider of `config`
    pub fn from_config(config: &TranslationConfig) -> Result<Self, ConfigError> {
        let provider = config.provider;
        let timeout_secs = config.get_timeout_secs();
        let model = config.get_model();
        if model.trim().is_empty() {
            return Err(ConfigError::MissingModel(provider.display_name().to_string()));
        }

        let backend = match provider {
            TranslationProvider::OpenAI | TranslationProvider::Anthropic => {
                let api_key = config.get_api_key();
                if api_key.is_empty() {
                    return Err(ConfigError::MissingCredential(provider.display_name().to_string()));
                }
                if provider == TranslationProvider::OpenAI {
                    Backend::OpenAI(OpenAI::new(api_key, config.get_endpoint(), timeout_secs))
                } else {
                    Backend::Anthropic(Anthropic::new(api_key, config.get_endpoint(), timeout_secs))
                }
            }
            TranslationProvider::Ollama => Backend::Ollama(Ollama::new(config.get_endpoint(), timeout_secs)),
            TranslationProvider::Mock => Backend::Mock(MockProvider::working()),
        };

        Ok(Self {
            backend,
            provider,
            model,
            temperature: config.common.temperature,
            max_tokens: config.common.max_tokens,
        })
    }

    /// Model identifier sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Test the connection to the provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.backend {
            Backend::OpenAI(client) => client.test_connection().await,
            Backend::Anthropic(client) => client.test_connection().await,
            Backend::Ollama(client) => client.test_connection().await,
            Backend::Mock(client) => client.test_connection().await,
        }
    }
}

#[async_trait]
impl GenerationClient for ProviderClient {
    async fn generate(&self, instruction: &str, message: &str) -> Result<String, ProviderError> {
        match &self.backend {
            Backend::OpenAI(client) => {
                let request = OpenAIRequest::new(&self.model)
                    .add_message("system", instruction)
                    .add_message("user", message)
                    .temperature(self.temperature)
                    .max_tokens(self.max_tokens);

                let response = client.complete(request).await?;
                if let Some(usage) = &response.usage {
                    log::debug!("OpenAI usage: {} prompt / {} completion tokens",
                        usage.prompt_tokens, usage.completion_tokens);
                }
                // No choices, or a choice whose content is null
                response
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.message.content)
                    .ok_or(ProviderError::EmptyResponse)
            }
            Backend::Anthropic(client) => {
                let request = AnthropicRequest::new(&self.model, self.max_tokens)
                    .system(instruction)
                    .add_message("user", message)
                    .temperature(self.temperature);

                let response = client.complete(request).await?;
                if !response.content.iter().any(|c| c.content_type == "text") {
                    return Err(ProviderError::EmptyResponse);
                }
                log::debug!("Anthropic usage: {} input / {} output tokens",
                    response.usage.input_tokens, response.usage.output_tokens);
                Ok(Anthropic::extract_text(&response))
            }
            Backend::Ollama(client) => {
                let request = ChatRequest::new(&self.model, vec![
                    ChatMessage { role: "system".to_string(), content: instruction.to_string() },
                    ChatMessage { role: "user".to_string(), content: message.to_string() },
                ])
                .temperature(self.temperature)
                .num_predict(self.max_tokens);

                let response = client.complete(request).await?;
                Ok(Ollama::extract_text(&response))
            }
            Backend::Mock(client) => client.generate(instruction, message).await,
        }
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.provider.display_name(), self.model)
    }
}
