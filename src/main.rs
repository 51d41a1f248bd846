// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::recognition::ModelTier;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod language_utils;
mod pipeline;
mod providers;
mod recognition;
mod subtitle;
mod translation;

/// CLI Wrapper for ModelTier to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliModelTier {
    Tiny,
    Base,
    Small,
    Medium,
}

impl From<CliModelTier> for ModelTier {
    fn from(cli_tier: CliModelTier) -> Self {
        match cli_tier {
            CliModelTier::Tiny => ModelTier::Tiny,
            CliModelTier::Base => ModelTier::Base,
            CliModelTier::Small => ModelTier::Small,
            CliModelTier::Medium => ModelTier::Medium,
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
    /// Generate translated subtitles from audio (default command)
    Generate(GenerateArgs),

    /// Check that the recognition engine and translation provider are usable
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// Generate shell completions for subvox
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input audio file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Recognition model tier (speed/accuracy tradeoff)
    #[arg(short, long, value_enum)]
    model_tier: Option<CliModelTier>,

    /// Target language code (e.g. 'zh-TW', 'fr', 'es')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Also produce a bilingual subtitle document
    #[arg(short, long)]
    bilingual: bool,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subvox - spoken audio to translated subtitles
///
/// Transcribes audio with a local whisper engine and translates each
/// segment into the target language, producing SRT subtitle documents.
#[derive(Parser, Debug)]
#[command(name = "subvox")]
#[command(author = "subvox contributors")]
#[command(version = "1.0.0")]
#[command(about = "Audio-to-translated-subtitle generator")]
#[command(long_about = "subvox transcribes audio files with a local whisper engine and
translates the transcript segment by segment, rendering SRT subtitles.

EXAMPLES:
    subvox talk.mp3                         # Subtitle using default config
    subvox -f talk.mp3                      # Force overwrite existing files
    subvox -m small -t fr talk.mp3          # Small model, French subtitles
    subvox -b talk.mp3                      # Also write a bilingual document
    subvox --log-level debug /podcasts/     # Process a directory with debug logging
    subvox check                            # Verify engine and provider health
    subvox completions bash > subvox.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

MODEL TIERS:
    tiny    - fastest, least accurate (degraded-mode fallback)
    base    - balanced default
    small   - slower, more accurate
    medium  - slowest, most accurate")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input audio file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Recognition model tier (speed/accuracy tradeoff)
    #[arg(short, long, value_enum)]
    model_tier: Option<CliModelTier>,

    /// Target language code (e.g. 'zh-TW', 'fr', 'es')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Also produce a bilingual subtitle document
    #[arg(short, long)]
    bilingual: bool,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subvox", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Check { config_path }) => {
            let config = load_config(&config_path, &None, &None, &None, false)?;
            let controller = Controller::with_config(config)?;
            controller.check().await
        }
        Some(Commands::Generate(args)) => run_generate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let generate_args = GenerateArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                model_tier: cli.model_tier,
                target_language: cli.target_language,
                bilingual: cli.bilingual,
                output_dir: cli.output_dir,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_generate(generate_args).await
        }
    }
}

/// Load the configuration file, creating a default one when missing, and
/// apply CLI overrides on top.
fn load_config(
    config_path: &str,
    model_tier: &Option<CliModelTier>,
    target_language: &Option<String>,
    log_level: &Option<CliLogLevel>,
    bilingual: bool,
) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(tier) = model_tier {
        config.model_tier = tier.clone().into();
    }
    if let Some(target) = target_language {
        config.target_language = target.clone();
    }
    if let Some(level) = log_level {
        config.log_level = level.clone().into();
    }
    if bilingual {
        config.bilingual = true;
    }

    Ok(config)
}

async fn run_generate(options: GenerateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config = load_config(
        &options.config_path,
        &options.model_tier,
        &options.target_language,
        &options.log_level,
        options.bilingual,
    )?;

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    // Run the controller with the input file(s) and output directory
    if options.input_path.is_file() {
        // Process a single file
        let output_dir = options.output_dir.clone().unwrap_or_else(|| {
            options
                .input_path
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf()
        });
        controller
            .run(options.input_path.clone(), output_dir, options.force_overwrite)
            .await?;
    } else if options.input_path.is_dir() {
        // Process a directory
        controller
            .run_folder(options.input_path.clone(), options.force_overwrite)
            .await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
