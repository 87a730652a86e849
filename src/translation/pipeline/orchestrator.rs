/*!
 * Pipeline orchestrator for the four-stage translation.
 *
 * The orchestrator drives one run through its stages in a fixed order:
 * 1. Draft: translate the source text
 * 2. Refine: improve fluency
 * 3. Glossary check: align terminology with the glossary
 * 4. Finalize: polish the result
 *
 * Each stage consumes the previous stage's output verbatim. The first failed
 * call aborts the run; nothing is retried and no partial output is returned.
 */

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use uuid::Uuid;

use crate::app_config::Config;
use crate::errors::{ConfigError, PipelineError, ProviderError};
use crate::language_utils;
use crate::translation::client::GenerationClient;
use crate::translation::glossary::{Glossary, GlossaryAudit};
use crate::translation::request::{LanguagePair, TranslationRequest};

use super::stages::{self, Stage};

/// Configuration for the translation pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Language names injected into every prompt
    pub languages: LanguagePair,

    /// Upper bound for a single generation call; `None` waits indefinitely
    pub call_timeout: Option<Duration>,

    /// Skip the glossary-check call when the glossary has no entries
    pub skip_glossary_check_when_empty: bool,
}

impl PipelineConfig {
    /// Create a new pipeline configuration.
    pub fn new(source_language: &str, target_language: &str) -> Self {
        Self {
            languages: LanguagePair::new(source_language, target_language),
            call_timeout: None,
            skip_glossary_check_when_empty: false,
        }
    }

    /// Build the pipeline configuration from the application config.
    ///
    /// Language codes are resolved to English names for the prompts.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let source = language_utils::resolve_language_name(&config.source_language)
            .map_err(|_| ConfigError::InvalidLanguage(config.source_language.clone()))?;
        let target = language_utils::resolve_language_name(&config.target_language)
            .map_err(|_| ConfigError::InvalidLanguage(config.target_language.clone()))?;

        let timeout_secs = config.translation.get_timeout_secs();

        Ok(Self::new(&source, &target)
            .with_call_timeout((timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)))
            .with_skip_empty_glossary(config.translation.common.skip_glossary_check_when_empty))
    }

    /// Set the per-call timeout.
    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Enable or disable skipping the glossary check for empty glossaries.
    pub fn with_skip_empty_glossary(mut self, enabled: bool) -> Self {
        self.skip_glossary_check_when_empty = enabled;
        self
    }
}

/// Where a pipeline run currently is.
///
/// Success moves strictly forward through the stage states to `Done`; any
/// failure moves to `Failed`, which records the failing stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Drafting,
    Refining,
    GlossaryChecking,
    Finalizing,
    Done,
    Failed(Stage),
}

impl PipelineState {
    /// State entered while `stage` is running
    pub fn running(stage: Stage) -> Self {
        match stage {
            Stage::Draft => Self::Drafting,
            Stage::Refine => Self::Refining,
            Stage::GlossaryCheck => Self::GlossaryChecking,
            Stage::Finalize => Self::Finalizing,
        }
    }

    /// Stage being run in this state, if any
    pub fn stage(self) -> Option<Stage> {
        match self {
            Self::Drafting => Some(Stage::Draft),
            Self::Refining => Some(Stage::Refine),
            Self::GlossaryChecking => Some(Stage::GlossaryCheck),
            Self::Finalizing => Some(Stage::Finalize),
            Self::Idle | Self::Done | Self::Failed(_) => None,
        }
    }

    /// Whether the run has ended
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed(_))
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Drafting => f.write_str("drafting"),
            Self::Refining => f.write_str("refining"),
            Self::GlossaryChecking => f.write_str("checking glossary"),
            Self::Finalizing => f.write_str("finalizing"),
            Self::Done => f.write_str("done"),
            Self::Failed(stage) => write!(f, "failed at {}", stage),
        }
    }
}

/// Progress information during pipeline execution.
#[derive(Debug, Clone)]
pub struct PipelineProgress {
    /// Identifier of the run
    pub run_id: Uuid,

    /// State just entered
    pub state: PipelineState,

    /// Stages completed so far (skipped stages count as completed)
    pub completed_stages: usize,

    /// Time since the run started
    pub elapsed: Duration,
}

impl PipelineProgress {
    /// Current status message
    pub fn status(&self) -> String {
        match self.state.stage() {
            Some(stage) => format!("Stage {}/{}: {}", stage.number(), Stage::ALL.len(), self.state),
            None => self.state.to_string(),
        }
    }
}

/// Progress callback invoked on every state change
pub type ProgressCallback = Box<dyn Fn(&PipelineProgress) + Send + Sync>;

/// Timing of one completed stage
#[derive(Debug, Clone)]
pub struct StageTiming {
    pub stage: Stage,
    pub duration: Duration,
    /// Characters in the stage's output
    pub output_chars: usize,
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Identifier of the run, also present in log lines
    pub run_id: Uuid,

    /// Output of the finalize stage, unmodified
    pub translated_text: String,

    /// Timings of the stages that issued a call, in order
    pub stage_timings: Vec<StageTiming>,

    /// Stages that were skipped by configuration
    pub skipped_stages: Vec<Stage>,

    /// Generation calls issued
    pub generation_calls: usize,

    /// Glossary terms applicable to the source but absent from the result
    pub glossary_audit: GlossaryAudit,

    /// Total duration of pipeline execution
    pub duration: Duration,
}

impl PipelineReport {
    /// Get a summary of the pipeline result.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        parts.push(format!("Duration: {:.2}s", self.duration.as_secs_f32()));
        parts.push(format!("Calls: {}", self.generation_calls));

        for timing in &self.stage_timings {
            parts.push(format!("{}: {:.2}s", timing.stage, timing.duration.as_secs_f32()));
        }
        for stage in &self.skipped_stages {
            parts.push(format!("{}: skipped", stage));
        }

        if self.glossary_audit.applicable > 0 {
            parts.push(format!(
                "Glossary: {}/{} terms applied",
                self.glossary_audit.applicable - self.glossary_audit.missing.len(),
                self.glossary_audit.applicable
            ));
        }

        parts.join(" | ")
    }
}

/// Bookkeeping for one run
struct RunTracker {
    run_id: Uuid,
    started: Instant,
    state: PipelineState,
    completed: usize,
    calls: usize,
    timings: Vec<StageTiming>,
    skipped: Vec<Stage>,
}

impl RunTracker {
    fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started: Instant::now(),
            state: PipelineState::Idle,
            completed: 0,
            calls: 0,
            timings: Vec::with_capacity(Stage::ALL.len()),
            skipped: Vec::new(),
        }
    }

    fn progress(&self) -> PipelineProgress {
        PipelineProgress {
            run_id: self.run_id,
            state: self.state,
            completed_stages: self.completed,
            elapsed: self.started.elapsed(),
        }
    }
}

/// The main translation pipeline orchestrator.
///
/// A pipeline holds no per-run state; concurrent runs on the same instance
/// are independent.
pub struct TranslationPipeline {
    client: Arc<dyn GenerationClient>,
    config: PipelineConfig,
    progress_callback: Option<ProgressCallback>,
}

impl TranslationPipeline {
    /// Create a new pipeline with the given client and configuration.
    pub fn new(client: Arc<dyn GenerationClient>, config: PipelineConfig) -> Self {
        Self {
            client,
            config,
            progress_callback: None,
        }
    }

    /// Create a pipeline with default configuration for the given languages.
    pub fn for_languages(client: Arc<dyn GenerationClient>, source_language: &str, target_language: &str) -> Self {
        Self::new(client, PipelineConfig::new(source_language, target_language))
    }

    /// Register a callback for state changes.
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Translate `source_text`, enforcing `glossary` in the glossary-check stage.
    ///
    /// Returns the finalize stage's output exactly as generated. The caller is
    /// responsible for rejecting empty text beforehand (see `TranslationRequest`).
    pub async fn translate(&self, source_text: &str, glossary: &Glossary) -> Result<String, PipelineError> {
        self.execute(source_text, glossary)
            .await
            .map(|report| report.translated_text)
    }

    /// Translate a validated request and report on the run.
    pub async fn run(&self, request: &TranslationRequest) -> Result<PipelineReport, PipelineError> {
        self.execute(request.source_text(), request.glossary()).await
    }

    async fn execute(&self, source_text: &str, glossary: &Glossary) -> Result<PipelineReport, PipelineError> {
        let mut tracker = RunTracker::new();
        let client = self.client.as_ref();
        let languages = &self.config.languages;

        info!(
            "Run {}: translating {} characters from {} to {} with {} ({} glossary entries)",
            tracker.run_id,
            source_text.chars().count(),
            languages.source,
            languages.target,
            client.describe(),
            glossary.len()
        );

        let draft = self
            .run_stage(&mut tracker, Stage::Draft, stages::draft(client, languages, source_text))
            .await?;

        let refined = self
            .run_stage(&mut tracker, Stage::Refine, stages::refine(client, languages, &draft))
            .await?;

        let proofread = if glossary.is_empty() && self.config.skip_glossary_check_when_empty {
            self.skip_stage(&mut tracker, Stage::GlossaryCheck);
            refined
        } else {
            self.run_stage(
                &mut tracker,
                Stage::GlossaryCheck,
                stages::glossary_check(client, languages, &refined, glossary),
            )
            .await?
        };

        let translated_text = self
            .run_stage(&mut tracker, Stage::Finalize, stages::finalize(client, languages, &proofread))
            .await?;

        let glossary_audit = glossary.audit(source_text, &translated_text);
        for entry in &glossary_audit.missing {
            warn!(
                "Run {}: glossary term '{}' should appear as '{}' but is missing from the translation",
                tracker.run_id, entry.source_term, entry.target_term
            );
        }

        let report = PipelineReport {
            run_id: tracker.run_id,
            translated_text,
            stage_timings: tracker.timings,
            skipped_stages: tracker.skipped,
            generation_calls: tracker.calls,
            glossary_audit,
            duration: tracker.started.elapsed(),
        };
        info!("Run {} complete: {}", report.run_id, report.summary());

        Ok(report)
    }

    /// Issue one stage call, bounded by the per-call timeout
    async fn run_stage<F>(&self, tracker: &mut RunTracker, stage: Stage, call: F) -> Result<String, PipelineError>
    where
        F: Future<Output = Result<String, ProviderError>>,
    {
        self.transition(tracker, PipelineState::running(stage));
        tracker.calls += 1;
        let started = Instant::now();

        let result = match self.config.call_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout(limit)),
            },
            None => call.await,
        };

        match result {
            Ok(text) => {
                let duration = started.elapsed();
                debug!(
                    "Run {}: stage {} produced {} characters in {:.2}s",
                    tracker.run_id,
                    stage,
                    text.chars().count(),
                    duration.as_secs_f32()
                );
                tracker.timings.push(StageTiming {
                    stage,
                    duration,
                    output_chars: text.chars().count(),
                });
                tracker.completed += 1;
                if stage == Stage::Finalize {
                    self.transition(tracker, PipelineState::Done);
                }
                Ok(text)
            }
            Err(source) => {
                debug!("Run {}: stage {} failed: {}", tracker.run_id, stage, source);
                self.transition(tracker, PipelineState::Failed(stage));
                Err(PipelineError::Generation { stage, source })
            }
        }
    }

    fn skip_stage(&self, tracker: &mut RunTracker, stage: Stage) {
        info!("Run {}: glossary is empty, skipping stage {}", tracker.run_id, stage);
        self.transition(tracker, PipelineState::running(stage));
        tracker.skipped.push(stage);
        tracker.completed += 1;
    }

    fn transition(&self, tracker: &mut RunTracker, next: PipelineState) {
        // Done and Failed are final
        if tracker.state.is_terminal() {
            return;
        }
        debug!("Run {}: {} -> {}", tracker.run_id, tracker.state, next);
        tracker.state = next;
        if let Some(ref callback) = self.progress_callback {
            callback(&tracker.progress());
        }
    }
}
