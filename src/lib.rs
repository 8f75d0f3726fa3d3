//! HomeCare Bot Library
//!
//! A command-line responder with:
//! - A learned keyword -> reply table matched by substring, first match wins
//! - Teach-on-miss: unknown input prompts the user for a new pair
//! - An append-only flat file that keeps learned pairs across sessions
//! - Numbered topic menus that feed labels into the same matching path
//!
//! # Example
//!
//! ```no_run
//! use homecare_bot::chat::{ConversationEngine, StdConsole};
//! use homecare_bot::knowledge::ResponseStore;
//!
//! fn main() -> std::io::Result<()> {
//!     let mut engine = ConversationEngine::new(ResponseStore::load("details.txt"));
//!     let mut console = StdConsole::new();
//!     engine.handle_turn("What are your hours?", &mut console)?;
//!     Ok(())
//! }
//! ```

pub mod knowledge;
pub mod chat;
pub mod config;
pub mod cli;

// Re-export commonly used types for convenience
pub use knowledge::{KnowledgeError, LoadStatus, ResponseEntry, ResponseStore};

pub use chat::{
    Console,
    ConversationEngine,
    ScriptedConsole,
    Session,
    StdConsole,
    TurnOutcome,
};

pub use config::Config;
