// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use mantra::app_config::{Config, LogLevel};
use mantra::{resolve_language_name, TranslationSession};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for mantra
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Text lines to translate; read from stdin, one per line, when omitted
    #[arg(value_name = "TEXT")]
    texts: Vec<String>,

    /// Target language: translator code (ENG, CHS), ISO code (en, fra) or name
    #[arg(short, long)]
    target_language: Option<String>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Keep model replies in the conversation window
    #[arg(long)]
    context_retention: bool,

    /// Maximum number of messages in the conversation window
    #[arg(long)]
    context_length: Option<usize>,

    /// Do not require an API key up front
    #[arg(long)]
    no_key_check: bool,
}

/// mantra - MANga TRAnslation over hosted chat models
///
/// Translates panel text one line per request through the Groq
/// chat-completion API, carrying earlier lines as conversation context.
#[derive(Parser, Debug)]
#[command(name = "mantra")]
#[command(version)]
#[command(about = "Contextual manga text translation with hosted LLMs")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "mantra translates manga panel text through a hosted chat-completion API.

EXAMPLES:
    mantra -t ENG 'こんにちは'                      # Translate one line into English
    mantra -t CHS < panels.txt                      # Translate stdin, one line per panel
    mantra -t fr --context-retention < panels.txt   # Keep model replies as context
    mantra completions bash > mantra.bash           # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created. GROQ_API_KEY, GROQ_MODEL, CONTEXT_RETENTION and
    CONTEXT_LENGTH override the file.")]
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
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
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
            let (color, tag) = Self::style_for_level(record.level());
            let _ = writeln!(std::io::stderr(), "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Max level is adjusted once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "mantra", &mut std::io::stdout());
            Ok(())
        }
        None => run_translate(cli.translate).await,
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let target_language = options
        .target_language
        .as_deref()
        .ok_or_else(|| anyhow!("--target-language is required"))?;
    let target_language = resolve_language_name(target_language)?;

    let mut config = load_or_create_config(&options.config_path)?;
    config.apply_process_env()?;

    if let Some(model) = &options.model {
        config.translation.provider.model = model.clone();
    }
    if options.context_retention {
        config.translation.session.context_retention = true;
    }
    if let Some(length) = options.context_length {
        config.translation.session.max_context = length;
    }
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let check_api_key = !options.no_key_check;
    config.validate(check_api_key).context("Configuration validation failed")?;

    let texts = if options.texts.is_empty() {
        read_stdin_lines()?
    } else {
        options.texts.clone()
    };

    let mut session = TranslationSession::from_config(&config.translation, check_api_key)?;
    debug!(
        "Translating {} line(s) into {} with {}",
        texts.len(),
        target_language,
        session.model()
    );

    let translations = session.translate(&target_language, &texts).await?;

    let mut stdout = std::io::stdout().lock();
    for line in &translations {
        writeln!(stdout, "{}", line)?;
    }

    debug!("{}", session.usage().summary());
    Ok(())
}

fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path).context(format!("Failed to open config file: {}", config_path))?;
        let config: Config = serde_json::from_reader(BufReader::new(file))
            .context(format!("Failed to parse config file: {}", config_path))?;
        return Ok(config);
    }

    warn!("Config file not found at '{}', creating default config.", config_path);
    let config = Config::default();
    let config_json =
        serde_json::to_string_pretty(&config).context("Failed to serialize default config to JSON")?;
    std::fs::write(config_path, config_json)
        .context(format!("Failed to write default config to file: {}", config_path))?;
    Ok(config)
}

fn read_stdin_lines() -> Result<Vec<String>> {
    std::io::stdin()
        .lock()
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to read text from stdin")
}
