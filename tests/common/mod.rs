/*!
 * Common test utilities for the yamat test suite
 */

use anyhow::Result;
use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};
use tempfile::TempDir;

use yamat::app_config::{Config, TranslationProvider};
use yamat::providers::mock::MockProvider;
use yamat::translation::{Glossary, TranslationPipeline};

/// Source text used by the end-to-end scenarios
pub const SAMPLE_TEXT: &str = "Hello world! This is a test message.";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Path of a checked-in fixture under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

/// The two-entry glossary used throughout the scenarios
pub fn sample_glossary() -> Glossary {
    Glossary::from_rows([["Hello", "Hola"], ["world", "mundo"]])
}

/// Every record logged by the test binary, in order
static CAPTURED: Mutex<Vec<(Level, String)>> = parking_lot::const_mutex(Vec::new());

/// Records everything, prints what `RUST_LOG` lets through
struct CapturingLogger {
    inner: env_logger::Logger,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.lock().push((record.level(), record.args().to_string()));
        if self.inner.matches(record) {
            self.inner.log(record);
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Route log output through the test harness
pub fn init_logger() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let inner = env_logger::Builder::from_default_env().is_test(true).build();
        if log::set_boxed_logger(Box::new(CapturingLogger { inner })).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

/// Messages logged at `level` so far, by any test in this binary
pub fn logged_at(level: Level) -> Vec<String> {
    CAPTURED
        .lock()
        .iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, message)| message.clone())
        .collect()
}

/// English to Spanish pipeline backed by `client`
pub fn mock_pipeline(client: &MockProvider) -> TranslationPipeline {
    init_logger();
    TranslationPipeline::for_languages(Arc::new(client.clone()), "English", "Spanish")
}

/// Default config switched to `provider`
pub fn config_for(provider: TranslationProvider) -> Config {
    let mut config = Config::default();
    config.translation.provider = provider;
    config
}

/// Config pointing `provider` at a mock server
pub fn config_for_server(provider: TranslationProvider, base_url: &str) -> Config {
    let mut config = config_for(provider);
    let provider_config = config.translation.active_provider_config_mut();
    provider_config.endpoint = base_url.to_string();
    provider_config.api_key = "test-key".to_string();
    provider_config.timeout_secs = 5;
    config
}
