use log::{warn, info, debug};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::{FileManager, TextSource};
use crate::translation::client::{GenerationClient, ProviderClient};
use crate::translation::glossary::{self, Glossary};
use crate::translation::pipeline::{PipelineConfig, PipelineReport, TranslationPipeline};
use crate::translation::request::TranslationRequest;

// @module: Application controller for text translation

/// Glossary entries shown after loading
const GLOSSARY_PREVIEW_ROWS: usize = 10;

/// Column width of the side-by-side rendering
const COLUMN_WIDTH: usize = 48;

/// One translation job as requested on the command line
#[derive(Debug, Clone)]
pub struct TranslationJob {
    /// Where the source text comes from
    pub source: TextSource,
    /// Optional glossary file
    pub glossary_path: Option<PathBuf>,
    /// Where the final translation is written
    pub output_path: PathBuf,
}

/// What a job ended with
#[derive(Debug)]
pub enum JobOutcome {
    /// Input was empty; nothing was sent to the provider
    Skipped,
    /// The pipeline completed and the translation was written
    Translated(PipelineReport),
}

/// Main application controller for text translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        PipelineConfig::from_config(&config)?;
        Ok(Self { config })
    }

    /// Configuration the controller was created with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a job against the configured provider
    pub async fn run(&self, job: &TranslationJob) -> Result<JobOutcome, AppError> {
        let client = ProviderClient::from_config(&self.config.translation)?;
        info!("YAMAT: {} - {}", self.config.translation.provider.display_name(), client.model());
        self.run_with_client(job, Arc::new(client)).await
    }

    /// Run a job with an explicit generation client
    pub async fn run_with_client(&self, job: &TranslationJob, client: Arc<dyn GenerationClient>) -> Result<JobOutcome, AppError> {
        let start_time = std::time::Instant::now();

        let source_text = FileManager::read_text(&job.source)?;
        let glossary = self.load_glossary(job.glossary_path.as_ref());

        let request = match TranslationRequest::new(source_text, glossary) {
            Ok(request) => request,
            Err(e) => {
                warn!("Nothing to translate: {}. Please enter some text.", e);
                return Ok(JobOutcome::Skipped);
            }
        };

        let progress_bar = Self::spinner();
        let pb = progress_bar.clone();
        let pipeline = TranslationPipeline::new(client, PipelineConfig::from_config(&self.config)?)
            .with_progress(Box::new(move |progress| pb.set_message(progress.status())));

        // Failures are reported once by the caller
        let result = pipeline.run(&request).await;
        progress_bar.finish_and_clear();
        let report = result?;

        println!("{}", render_side_by_side(request.source_text(), &report.translated_text, COLUMN_WIDTH));

        FileManager::write_to_file(&job.output_path, &report.translated_text)?;
        info!("Translation saved to {:?}", job.output_path);

        if !report.glossary_audit.is_satisfied() {
            warn!(
                "{} of {} applicable glossary terms are missing from the translation",
                report.glossary_audit.missing.len(),
                report.glossary_audit.applicable
            );
        }

        info!("Translation completed in {}.", Self::format_duration(start_time.elapsed()));

        Ok(JobOutcome::Translated(report))
    }

    /// Test the connection to the configured provider
    pub async fn test_connection(&self) -> Result<(), AppError> {
        let client = ProviderClient::from_config(&self.config.translation)?;
        info!("Testing connection to {}...", client.describe());
        client.test_connection().await?;
        info!("Connection to {} OK", client.describe());
        Ok(())
    }

    fn load_glossary(&self, path: Option<&PathBuf>) -> Glossary {
        let Some(path) = path else {
            debug!("No glossary provided");
            return Glossary::new();
        };

        let (glossary, notice) = glossary::load_glossary_lenient(path);
        if let Some(e) = notice {
            warn!("Glossary {:?} was not loaded ({}); translating without it", path, e);
        } else if glossary.is_empty() {
            warn!("Glossary {:?} has no usable entries", path);
        } else {
            info!("Loaded {} glossary entries:\n{}", glossary.len(), glossary.preview(GLOSSARY_PREVIEW_ROWS));
        }
        glossary
    }

    fn spinner() -> ProgressBar {
        let progress_bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        progress_bar.set_style(style);
        progress_bar.set_message("Translating...");
        progress_bar.enable_steady_tick(Duration::from_millis(100));
        progress_bar
    }

    /// Format a duration in a human-readable form
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Render the original and the translation as two columns
pub fn render_side_by_side(original: &str, translated: &str, width: usize) -> String {
    let left = wrap(original, width);
    let right = wrap(translated, width);
    let rows = left.len().max(right.len());

    let mut lines = vec![
        format!("{:<width$} | {}", "Original", "Translation", width = width),
        format!("{}-+-{}", "-".repeat(width), "-".repeat(width)),
    ];
    for i in 0..rows {
        let l = left.get(i).map(String::as_str).unwrap_or("");
        let r = right.get(i).map(String::as_str).unwrap_or("");
        lines.push(format!("{:<width$} | {}", l, r, width = width).trim_end().to_string());
    }
    lines.join("\n")
}

/// Word-wrap `text` to `width` characters, keeping existing line breaks
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() { word.chars().count() } else { current.chars().count() + 1 + word.chars().count() };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    lines
}
