// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use chunkwise::app_config::{Config, LogLevel, TranslationProvider};
use chunkwise::app_controller::Controller;
use chunkwise::file_utils::FileManager;
use chunkwise::language_utils::{self, SUPPORTED_LANGUAGES};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "mymemory")]
    MyMemory,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::MyMemory => TranslationProvider::MyMemory,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Translate text from a file or stdin
    Translate(TranslateArgs),

    /// Show how text would be split into segments, without translating
    Segment(SegmentArgs),

    /// List the languages offered for translation
    Languages,

    /// Check that the configured provider answers
    TestConnection,

    /// Generate shell completions for chunkwise
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input text file, or '-' / nothing for stdin
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target language code (e.g. 'hi', 'gu', 'en')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Source language code, or 'Autodetect'
    #[arg(short, long)]
    source_language: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Maximum characters per request
    #[arg(long)]
    max_chars: Option<usize>,

    /// Pause between requests in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Retries per failed segment
    #[arg(long)]
    retries: Option<u32>,

    /// Use the mock provider instead of the network
    #[arg(long)]
    dry_run: bool,
}

#[derive(Parser, Debug)]
struct SegmentArgs {
    /// Input text file, or '-' / nothing for stdin
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Maximum characters per segment
    #[arg(long)]
    max_chars: Option<usize>,
}

/// chunkwise - sentence-aware chunked translation
///
/// Translates text of any length through services that only accept short
/// requests, one segment at a time.
#[derive(Parser, Debug)]
#[command(name = "chunkwise")]
#[command(version)]
#[command(about = "Sentence-aware chunked text translation")]
#[command(long_about = "chunkwise splits long text at sentence boundaries and translates it one segment at a time.

EXAMPLES:
    chunkwise translate -t hi message.txt          # Translate a file to Hindi
    cat reply.txt | chunkwise translate -t gu      # Translate stdin to Gujarati
    chunkwise translate -s en -t hi -o out.txt in.txt
    chunkwise translate --dry-run -t hi in.txt     # No network calls
    chunkwise segment --max-chars 200 in.txt       # Inspect segmentation
    chunkwise completions bash > chunkwise.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Colored stderr logger, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let (color, tag) = Self::style_for_level(record.level());
        let _ = writeln!(
            std::io::stderr(),
            "\x1B[{}m{} {} {}\x1B[0m",
            color,
            now,
            tag,
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start at info; the config or --log-level may change it below
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();
    if let Some(level) = cli.log_level {
        log::set_max_level(LogLevel::from(level).to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "chunkwise", &mut std::io::stdout());
            Ok(())
        }
        Commands::Languages => {
            for lang in SUPPORTED_LANGUAGES {
                println!("{}\t{}", lang.code, lang.name);
            }
            Ok(())
        }
        Commands::Segment(args) => {
            let mut config = load_config(&cli.config_path, cli.log_level)?;
            if let Some(max_chars) = args.max_chars {
                config.segmentation.max_chars = max_chars;
            }
            let controller = Controller::with_config(config)?;
            let text = FileManager::read_input(args.input.as_deref())?;

            for (index, segment) in controller.segment_text(&text).iter().enumerate() {
                println!("{}\t{}\t{}", index + 1, segment.chars().count(), segment);
            }
            Ok(())
        }
        Commands::TestConnection => {
            let config = load_config(&cli.config_path, cli.log_level)?;
            let controller = Controller::with_config(config)?;
            controller.test_connection().await?;
            info!("Connection OK");
            Ok(())
        }
        Commands::Translate(args) => run_translate(&cli.config_path, cli.log_level, args).await,
    }
}

// Load config and apply its log level unless one was given on the command line
fn load_config(config_path: &str, cli_log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = Config::load_or_create(config_path)?;

    match cli_log_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}

async fn run_translate(config_path: &str, cli_log_level: Option<CliLogLevel>, args: TranslateArgs) -> Result<()> {
    let mut config = load_config(config_path, cli_log_level)?;

    // Override config with CLI options if provided
    if let Some(target) = args.target_language {
        config.target_language = target;
    }
    if let Some(source) = args.source_language {
        config.source_language = source;
    }
    if let Some(provider) = args.provider {
        config.translation.provider = provider.into();
    }
    if args.dry_run {
        config.translation.provider = TranslationProvider::Mock;
    }
    if let Some(max_chars) = args.max_chars {
        config.segmentation.max_chars = max_chars;
    }
    if let Some(delay_ms) = args.delay_ms {
        config.translation.inter_request_delay_ms = delay_ms;
    }
    if let Some(retries) = args.retries {
        config.translation.retry_count = retries;
    }

    let target_name = language_utils::get_language_name(&config.target_language)
        .unwrap_or_else(|_| config.target_language.clone());
    info!("Target language: {}", target_name);

    let show_progress = !FileManager::is_stdio(args.output.as_deref());
    let mut controller = Controller::with_config(config)
        .context("Failed to set up translation")?;
    if !show_progress {
        controller = controller.without_progress();
    }

    controller
        .run(args.input.as_deref(), args.output.as_deref())
        .await?;

    Ok(())
}
