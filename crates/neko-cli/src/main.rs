//! neko CLI: terminal chat mockup with a cat companion

use clap::{Parser, Subcommand};
use neko_core::{seed, ChatConfig, Message, ThemeChoice};
use std::fmt::Write as _;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Chat with AnuNeko in your terminal
#[derive(Parser)]
#[command(name = "neko")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: .neko/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Color theme: light or dark
    #[arg(long, global = true)]
    theme: Option<ThemeChoice>,

    /// Delay before the simulated reply, in milliseconds
    #[arg(long, global = true)]
    reply_delay_ms: Option<u64>,

    /// Log file (default: neko-chat.log in the temp directory)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat (default when no command specified)
    Tui,

    /// Print the opening conversation
    Transcript {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file
    Init,
}

const LOG_FILE: &str = "neko-chat.log";
const DEFAULT_FILTER: &str = "info,neko_core=debug,neko_tui=debug";

fn main() {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE));
    if let Err(e) = init_logging(&log_path) {
        eprintln!("Warning: logging disabled ({}: {e})", log_path.display());
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| ChatConfig::default_path(Path::new(".")));

    match cli.command {
        None | Some(Commands::Tui) => {
            let config = load_config(&cli, &config_path);
            info!(config = %config_path.display(), "starting chat");
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("Error: failed to start runtime: {e}");
                    std::process::exit(1);
                }
            };
            if let Err(e) = rt.block_on(neko_tui::run_tui(config)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Transcript { json }) => {
            let config = load_config(&cli, &config_path);
            cmd_transcript(&config, json);
        }
        Some(Commands::Init) => {
            cmd_init(&config_path);
        }
    }
}

/// Send tracing output to a file so it never draws over the TUI.
fn init_logging(path: &Path) -> std::io::Result<()> {
    let log_file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();
    Ok(())
}

/// Load the config, exiting on a broken file. An explicit `--config` must exist.
fn load_config(cli: &Cli, path: &Path) -> ChatConfig {
    let loaded = if cli.config.is_some() {
        ChatConfig::load(path)
    } else {
        ChatConfig::load_or_default(path)
    };
    match loaded {
        Ok(config) => apply_overrides(config, cli),
        Err(e) => {
            eprintln!("Error: failed to load {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

/// Command-line flags win over the config file.
fn apply_overrides(mut config: ChatConfig, cli: &Cli) -> ChatConfig {
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(delay) = cli.reply_delay_ms {
        config.reply_delay_ms = delay;
    }
    config
}

fn cmd_transcript(config: &ChatConfig, json: bool) {
    let messages = seed::initial_messages();

    if json {
        match serde_json::to_string_pretty(&messages) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", format_transcript(&messages, &config.assistant_name));
    }
}

/// Plain-text rendering of a conversation.
fn format_transcript(messages: &[Message], assistant_name: &str) -> String {
    let mut out = String::new();
    for message in messages {
        let author = if message.is_assistant() {
            assistant_name
        } else {
            "You"
        };
        let _ = writeln!(out, "[{}] {author}", message.timestamp);
        for (i, segment) in message.segments().into_iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for line in segment.lines() {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push('\n');
    }
    out
}

fn cmd_init(config_path: &Path) {
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return;
    }
    match ChatConfig::default().save(config_path) {
        Ok(()) => println!("Created {}", config_path.display()),
        Err(e) => {
            eprintln!("Failed to write config: {e}");
            std::process::exit(1);
        }
    }
}
