/*!
 * Tests for app configuration loading and validation
 */

use anyhow::Result;

use yamat::app_config::{Config, LogLevel, TranslationProvider};
use yamat::errors::ConfigError;

use crate::common;

#[test]
fn test_loadOrCreate_existingFile_shouldReadValues() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "conf.json", r#"{
        "source_language": "fr",
        "target_language": "de",
        "translation": {
            "provider": "anthropic",
            "available_providers": [
                { "type": "anthropic", "model": "claude-3-5-sonnet-latest", "api_key": "sk-ant" }
            ],
            "common": { "temperature": 0.1, "skip_glossary_check_when_empty": true }
        },
        "log_level": "debug"
    }"#)?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.source_language, "fr");
    assert_eq!(config.translation.provider, TranslationProvider::Anthropic);
    assert_eq!(config.translation.get_model(), "claude-3-5-sonnet-latest");
    assert_eq!(config.translation.get_endpoint(), "https://api.anthropic.com");
    assert_eq!(config.translation.get_timeout_secs(), 120);
    assert!(config.translation.common.skip_glossary_check_when_empty);
    assert_eq!(config.translation.common.output_file, "translation.txt");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_loadOrCreate_invalidJson_shouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "conf.json", "{ not json")?;

    let result = Config::load_or_create(&path);

    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_loadOrCreate_createdFile_shouldRoundTrip() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    let reloaded = Config::load_or_create(&path)?;

    assert_eq!(created.translation.provider, reloaded.translation.provider);
    assert_eq!(reloaded.translation.available_providers.len(), 4);
    Ok(())
}

#[test]
fn test_validate_anthropicKeyFromLookup_shouldPass() {
    let mut config = common::config_for(TranslationProvider::Anthropic);
    assert!(matches!(config.validate(), Err(ConfigError::MissingCredential(_))));

    config.resolve_credentials_with(|name| (name == "ANTHROPIC_API_KEY").then(|| "sk-ant".to_string()));

    assert_eq!(config.translation.get_api_key(), "sk-ant");
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_languageNames_shouldBeAccepted() {
    let mut config = common::config_for(TranslationProvider::Mock);
    config.source_language = "English".to_string();
    config.target_language = "japanese".to_string();

    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_mockProvider_shouldNeedNoCredentialOrEndpoint() {
    let config = common::config_for(TranslationProvider::Mock);
    assert!(config.validate().is_ok());
}
