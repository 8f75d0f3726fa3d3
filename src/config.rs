//! Configuration management
//!
//! Bot wording, menu lists, emergency contact and the knowledge file
//! location, stored as TOML in the platform config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Bot identity and greeting text
    #[serde(default)]
    pub bot: BotConfig,
    /// Knowledge file settings
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    /// Numbered topic menus
    #[serde(default)]
    pub menu: MenuConfig,
    /// Emergency contact capability
    #[serde(default)]
    pub emergency: EmergencyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Name used in the greeting
    #[serde(default = "default_name")]
    pub name: String,
    /// Greeting template, `{name}` is replaced with the bot name
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Shown when the user leaves
    #[serde(default = "default_farewell")]
    pub farewell: String,
}

fn default_name() -> String {
    "Service Bot".to_string()
}

fn default_greeting() -> String {
    "Hello! Welcome to the HomeCare Services. I'm {name}. How can I assist you today?".to_string()
}

fn default_farewell() -> String {
    "Goodbye! Have a great day!".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            greeting: default_greeting(),
            farewell: default_farewell(),
        }
    }
}

impl BotConfig {
    /// Greeting with the bot name filled in
    pub fn render_greeting(&self) -> String {
        self.greeting.replace("{name}", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Knowledge file path (defaults to `details.txt` in the data directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl KnowledgeConfig {
    /// Resolve the knowledge file path
    pub fn resolve_file(&self) -> Result<PathBuf> {
        match &self.file {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("details.txt")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default = "default_primary_title")]
    pub primary_title: String,
    #[serde(default = "default_secondary_title")]
    pub secondary_title: String,
    /// Primary topics, numbered from 1
    #[serde(default = "default_primary")]
    pub primary: Vec<String>,
    /// Service sub-topics, numbered from 1
    #[serde(default = "default_secondary")]
    pub secondary: Vec<String>,
    /// Primary label that opens the sub-menu instead of being matched
    #[serde(default = "default_services_label")]
    pub services_label: String,
    /// Shown when the sub-menu opens
    #[serde(default = "default_services_prompt")]
    pub services_prompt: String,
    /// Label of the emergency slot
    #[serde(default = "default_emergency_label")]
    pub emergency_label: String,
    /// Footer line under every menu
    #[serde(default = "default_hint")]
    pub hint: String,
}

fn default_primary_title() -> String {
    "🏡 Primary Options".to_string()
}

fn default_secondary_title() -> String {
    "🧹 Service Options".to_string()
}

fn default_primary() -> Vec<String> {
    ["services", "appointment", "pricing", "location", "hours", "feedback"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_secondary() -> Vec<String> {
    [
        "deep cleaning",
        "kitchen cleaning",
        "bathroom cleaning",
        "carpet cleaning",
        "dusting",
        "floor cleaning",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_services_label() -> String {
    "services".to_string()
}

fn default_services_prompt() -> String {
    "Great! Which service are you interested in?".to_string()
}

fn default_emergency_label() -> String {
    "Emergency Contact".to_string()
}

fn default_hint() -> String {
    "Type the option number, or type your query directly (e.g., timings, hi, bye).".to_string()
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            primary_title: default_primary_title(),
            secondary_title: default_secondary_title(),
            primary: default_primary(),
            secondary: default_secondary(),
            services_label: default_services_label(),
            services_prompt: default_services_prompt(),
            emergency_label: default_emergency_label(),
            hint: default_hint(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyConfig {
    /// Offer the emergency slot and `emergency` command
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Contact details shown on request
    #[serde(default = "default_contact")]
    pub contact: String,
}

fn default_true() -> bool {
    true
}

fn default_contact() -> String {
    "In case of urgency, please contact +91 123 4567890 for immediate assistance.".to_string()
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            contact: default_contact(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, writing defaults there if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent()
            .context("Config path has no parent")?;

        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "homecare-bot", "homecare-bot")
        .context("Failed to get project directories")
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

/// Get the data directory path
pub fn data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

/// Show configuration stored at `path`
pub fn show_config(path: &Path) -> Result<()> {
    let config = Config::load_from(path)?;
    let knowledge = config.knowledge.resolve_file()?;

    println!("Configuration: {}", path.display());
    println!();
    println!("  Bot name:        {}", config.bot.name);
    println!("  Greeting:        {}", config.bot.render_greeting());
    println!("  Farewell:        {}", config.bot.farewell);
    println!("  Knowledge file:  {}", knowledge.display());
    println!("  Primary menu:    {}", config.menu.primary.join(", "));
    println!("  Service menu:    {}", config.menu.secondary.join(", "));
    println!("  Emergency:       {}", if config.emergency.enabled { "Enabled" } else { "Disabled" });
    Ok(())
}

/// Reset configuration at `path` to defaults
pub fn reset_config(path: &Path) -> Result<()> {
    Config::default().save_to(path)?;
    println!("Configuration reset to defaults.");
    Ok(())
}

/// Get default configuration as TOML string
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| "# Default configuration\n".to_string())
}
