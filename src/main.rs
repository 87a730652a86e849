// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{error, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::process::ExitCode;
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use yamat::app_config::{self, Config, TranslationProvider};
use yamat::app_controller::{Controller, JobOutcome, TranslationJob};
use yamat::file_utils::TextSource;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "openai")]
    OpenAI,
    Anthropic,
    Ollama,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate text through the four-stage pipeline (default command)
    Translate(TranslateArgs),

    /// Check that the configured provider is reachable
    TestConnection(ProviderArgs),

    /// Generate shell completions for yamat
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by every command that talks to a provider
#[derive(Args, Debug, Clone)]
struct ProviderArgs {
    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Source language code or name (e.g., 'en', 'English')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code or name (e.g., 'es', 'Spanish')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug, Clone)]
struct TranslateArgs {
    /// Text to translate
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// File containing the text to translate (standard input when neither is given)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Two-column glossary file (xlsx, xls, xlsm, xlsb, ods, csv, tsv)
    #[arg(short, long)]
    glossary: Option<PathBuf>,

    /// Output file for the final translation
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the glossary-check stage when the glossary is empty
    #[arg(long)]
    skip_empty_glossary: bool,

    #[command(flatten)]
    provider: ProviderArgs,
}

/// YAMAT - Yet Another Multi-Agent Translator
///
/// Translates text through four LLM agents (draft, refine, glossary check,
/// finalize) while enforcing a user-supplied terminology glossary.
#[derive(Parser, Debug)]
#[command(name = "yamat")]
#[command(version = "0.1.0")]
#[command(about = "Glossary-aware multi-agent text translation")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "YAMAT translates text through four AI agents and enforces your glossary.

EXAMPLES:
    yamat --text \"Hello world!\"                  # Translate using default config
    yamat -i article.txt -g terms.xlsx             # Translate a file with a glossary
    yamat -p anthropic -s en -t fr -i notes.txt    # Use a specific provider and languages
    echo \"Good morning\" | yamat -o out.txt         # Read from standard input
    yamat test-connection -p ollama                # Check that Ollama is reachable
    yamat completions bash > yamat.bash            # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. API keys may also come from OPENAI_API_KEY and
    ANTHROPIC_API_KEY.

SUPPORTED PROVIDERS:
    openai    - OpenAI API (requires API key, default: gpt-4)
    anthropic - Anthropic Claude API (requires API key)
    ollama    - Local Ollama server (default: llama3.2:3b)
    mock      - Offline echo provider for dry runs")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logger starts permissive; the max level is lowered once the config is known
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }
    log::set_max_level(LevelFilter::Info);

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // The only place a failure is reported
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "yamat", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::TestConnection(args)) => {
            let config = load_config(&args)?;
            Controller::with_config(config)?.test_connection().await?;
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    }
}

/// Load the config file, apply CLI overrides, resolve credentials and validate
fn load_config(options: &ProviderArgs) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        config.translation.active_provider_config_mut().model = model.clone();
    }

    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }

    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }

    // Update log level in config if specified via command line
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.resolve_credentials();

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let mut config = load_config(&options.provider)?;
    if options.skip_empty_glossary {
        config.translation.common.skip_glossary_check_when_empty = true;
    }

    let source = match (options.text, options.input) {
        (Some(text), _) => TextSource::Inline(text),
        (None, Some(path)) => TextSource::File(path),
        (None, None) => {
            info!("Reading text from standard input (end with Ctrl-D)");
            TextSource::Stdin
        }
    };

    let job = TranslationJob {
        source,
        glossary_path: options.glossary,
        output_path: options
            .output
            .unwrap_or_else(|| PathBuf::from(&config.translation.common.output_file)),
    };

    let controller = Controller::with_config(config)?;
    match controller.run(&job).await? {
        JobOutcome::Skipped => {}
        JobOutcome::Translated(report) => info!("{}", report.summary()),
    }

    Ok(())
}
