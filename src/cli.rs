//! CLI interface for homecare-bot

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::chat::{ConversationEngine, Session, StdConsole};
use crate::config::{self, Config};
use crate::knowledge::ResponseStore;

#[derive(Parser)]
#[command(name = "homecare-bot")]
#[command(about = "HomeCare Services chatbot that learns new replies as you talk to it", long_about = None)]
#[command(version)]
struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Knowledge file to load and append to
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Bot name used in the greeting
    #[arg(short, long, global = true)]
    name: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session (default when no command given)
    Chat,
    /// Answer a single question without teaching on a miss
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Teach a keyword/reply pair without starting a session
    Teach {
        /// Keyword or phrase to match
        keyword: String,
        /// Reply to give when the keyword matches
        reply: String,
    },
    /// List learned responses in match order
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or reset configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
        /// Print the configuration file path
        #[arg(long)]
        path: bool,
        /// Print the default configuration as TOML
        #[arg(long)]
        print_default: bool,
    },
}

/// Main CLI entry point
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::config_path()?,
    };

    // Default to an interactive session if no command given
    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let config = load_config(&config_path, cli.file, cli.name)?;
            let store = open_store(&config)?;
            let mut session = Session::from_config(&config, store);
            let mut console = StdConsole::new();
            session.run(&mut console).context("Console I/O failed")?;
        }
        Commands::Ask { text } => {
            let config = load_config(&config_path, cli.file, cli.name)?;
            let engine = ConversationEngine::new(open_store(&config)?);
            match engine.ask(&text.join(" ")) {
                Some(reply) => println!("{}", reply),
                None => println!("I don't have a response for that yet. Start a chat session to teach me."),
            }
        }
        Commands::Teach { keyword, reply } => {
            let config = load_config(&config_path, cli.file, cli.name)?;
            teach(open_store(&config)?, &keyword, &reply)?;
        }
        Commands::List { json } => {
            let config = load_config(&config_path, cli.file, cli.name)?;
            list(&open_store(&config)?, json)?;
        }
        Commands::Config { show, reset, path, print_default } => {
            run_config(&config_path, show, reset, path, print_default)?;
        }
    }

    Ok(())
}

/// Load configuration and apply command-line overrides
fn load_config(path: &Path, file: Option<PathBuf>, name: Option<String>) -> Result<Config> {
    let mut config = Config::load_from(path)?;
    if let Some(file) = file {
        config.knowledge.file = Some(file);
    }
    if let Some(name) = name {
        config.bot.name = name;
    }
    Ok(config)
}

/// Load the knowledge file named by `config`, making sure its directory exists
fn open_store(config: &Config) -> Result<ResponseStore> {
    let path = config.knowledge.resolve_file()?;
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!("Could not create knowledge directory {}: {}", parent.display(), e);
        }
    }
    Ok(ResponseStore::load(path))
}

fn teach(store: ResponseStore, keyword: &str, reply: &str) -> Result<()> {
    if keyword.contains('\n') || reply.contains('\n') {
        anyhow::bail!("Keyword and reply must each fit on a single line");
    }

    let mut engine = ConversationEngine::new(store);
    let learned = engine.teach(keyword, reply)
        .context("Response learned for this run only")?;
    println!("I've learned a new response! Keyword: '{}'", learned);
    Ok(())
}

fn list(store: &ResponseStore, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(store.entries())
            .context("Failed to serialize responses")?;
        println!("{}", out);
        return Ok(());
    }

    if store.is_empty() {
        println!("No responses learned yet ({}).", store.path().display());
        return Ok(());
    }

    println!("Learned responses ({}):", store.path().display());
    for (i, entry) in store.entries().iter().enumerate() {
        println!("  {:>3}. {} => {}", i + 1, entry.keyword, entry.reply);
    }
    Ok(())
}

fn run_config(path: &Path, show: bool, reset: bool, print_path: bool, print_default: bool) -> Result<()> {
    if reset {
        config::reset_config(path)?;
    }
    if print_path {
        println!("{}", path.display());
    }
    if print_default {
        print!("{}", config::default_config_toml());
    }
    if show || !(reset || print_path || print_default) {
        config::show_config(path)?;
    }
    Ok(())
}
