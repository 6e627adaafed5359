// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{Read, Write};
use std::path::PathBuf;

use comprehend::app_config::{self, Config, Formality, ProxyType};
use comprehend::app_controller::{Controller, OutputMode};

/// CLI Wrapper for Formality to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFormality {
    Default,
    More,
    Less,
    PreferMore,
    PreferLess,
}

impl From<CliFormality> for Formality {
    fn from(cli_formality: CliFormality) -> Self {
        match cli_formality {
            CliFormality::Default => Formality::Default,
            CliFormality::More => Formality::More,
            CliFormality::Less => Formality::Less,
            CliFormality::PreferMore => Formality::PreferMore,
            CliFormality::PreferLess => Formality::PreferLess,
        }
    }
}

/// CLI Wrapper for ProxyType to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProxyType {
    Direct,
    CorsProxy,
    DeeplApiProxyStb,
    Own,
}

impl From<CliProxyType> for ProxyType {
    fn from(cli_proxy: CliProxyType) -> Self {
        match cli_proxy {
            CliProxyType::Direct => ProxyType::Direct,
            CliProxyType::CorsProxy => ProxyType::CorsProxy,
            CliProxyType::DeeplApiProxyStb => ProxyType::DeepLApiProxyStb,
            CliProxyType::Own => ProxyType::Own,
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
    /// Translate an HTML page, or every page in a directory
    Translate {
        /// HTML file or directory of HTML pages
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Replace the source pages instead of writing <stem>.<lang>.html files
        #[arg(long)]
        in_place: bool,

        /// Overwrite existing translated files
        #[arg(short, long, conflicts_with = "in_place")]
        force_overwrite: bool,
    },

    /// Translate a piece of text and print it ("-" reads stdin)
    Text {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Generate shell completions for comprehend
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Comprehend - translate rich-text documents through DeepL
///
/// Splits documents into paragraph-sized units, translates them one at a
/// time with rate-limit backoff, and reassembles the markup.
#[derive(Parser, Debug)]
#[command(name = "comprehend")]
#[command(version)]
#[command(about = "Markup-preserving, rate-limited document translation")]
#[command(long_about = "Comprehend translates HTML pages through the DeepL API without breaking their markup.

EXAMPLES:
    comprehend translate journal/intro.html         # Translate one page
    comprehend translate journal/                   # Translate every page in a directory
    comprehend -t FR --formality less translate a.html
    comprehend translate --in-place journal/        # Replace the source pages
    comprehend text \"<p>Roll for initiative</p>\"    # Translate a selection
    comprehend completions bash > comprehend.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If it does not exist a
    default one is created. The token can also be given with DEEPL_TOKEN.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: PathBuf,

    /// DeepL authentication key
    #[arg(long, global = true, env = "DEEPL_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Target language code (e.g. 'DE', 'FR', 'EN-GB')
    #[arg(short, long, global = true)]
    target_language: Option<String>,

    /// Tone of the translation
    #[arg(long, global = true, value_enum)]
    formality: Option<CliFormality>,

    /// Transport used to reach the service
    #[arg(long, global = true, value_enum)]
    proxy: Option<CliProxyType>,

    /// Proxy URL used with --proxy own
    #[arg(long, global = true)]
    own_proxy_url: Option<String>,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
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
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the configuration says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "comprehend", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config).context("Configuration validation failed")?;

    match cli.command {
        Commands::Translate { input_path, in_place, force_overwrite } => {
            let mode = if in_place {
                OutputMode::InPlace
            } else {
                OutputMode::Alongside { force_overwrite }
            };
            let summary = controller.run(&input_path, mode).await?;
            for path in &summary.written {
                info!("Success: {:?}", path);
            }
        }
        Commands::Text { text } => {
            let text = if text == "-" {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer).context("Failed to read stdin")?;
                buffer
            } else {
                text
            };
            let translated = controller.translate_selection(&text).await?;
            println!("{}", translated);
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Load the config file and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(token) = &cli.token {
        config.token = token.clone();
    }
    if let Some(target_language) = &cli.target_language {
        config.target_language = target_language.clone();
    }
    if let Some(formality) = &cli.formality {
        config.formality = formality.clone().into();
    }
    if let Some(proxy) = &cli.proxy {
        config.proxy = proxy.clone().into();
    }
    if let Some(own_proxy_url) = &cli.own_proxy_url {
        config.own_proxy_url = own_proxy_url.clone();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}
