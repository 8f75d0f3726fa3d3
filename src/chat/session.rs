//! Interactive session - greeting, menu loop and farewell
//!
//! Each iteration shows the current menu and reads one line. A leading
//! number selects from the menu, anything else is typed text. `bye` or
//! `exit` (or end of input) ends the session.

use std::io;
use tracing::debug;

use super::console::Console;
use super::engine::ConversationEngine;
use super::menu::{MenuAction, MenuLayer, MenuState};
use crate::config::Config;
use crate::knowledge::ResponseStore;

/// Prompt shown before every user line
pub const INPUT_PROMPT: &str = "You: ";
/// Shown at startup when no knowledge file could be read
pub const FRESH_START_MESSAGE: &str = "No previous knowledge found. Starting fresh!";
/// Shown for numbers outside the current menu
pub const INVALID_CHOICE_MESSAGE: &str = "Invalid menu choice. Please try again.";

/// Emergency contact capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyContact {
    contact: String,
}

impl EmergencyContact {
    pub fn new(contact: impl Into<String>) -> Self {
        Self { contact: contact.into() }
    }

    pub fn info(&self) -> &str {
        &self.contact
    }
}

/// Whether the loop keeps going after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// One interactive conversation
pub struct Session {
    engine: ConversationEngine,
    menu: MenuLayer,
    greeting: String,
    farewell: String,
    emergency: Option<EmergencyContact>,
    state: MenuState,
}

impl Session {
    pub fn new(
        engine: ConversationEngine,
        menu: MenuLayer,
        greeting: impl Into<String>,
        farewell: impl Into<String>,
        emergency: Option<EmergencyContact>,
    ) -> Self {
        Self {
            engine,
            menu,
            greeting: greeting.into(),
            farewell: farewell.into(),
            emergency,
            state: MenuState::Primary,
        }
    }

    /// Build a session from configuration around an already loaded store
    pub fn from_config(config: &Config, store: ResponseStore) -> Self {
        let emergency = config
            .emergency
            .enabled
            .then(|| EmergencyContact::new(config.emergency.contact.clone()));
        let menu = MenuLayer::new(config.menu.clone(), emergency.is_some());

        Self::new(
            ConversationEngine::new(store),
            menu,
            config.bot.render_greeting(),
            config.bot.farewell.clone(),
            emergency,
        )
    }

    /// Run until the user leaves or input ends
    pub fn run(&mut self, console: &mut dyn Console) -> io::Result<()> {
        if self.engine.store().status().is_fresh_start() {
            console.emit_line(FRESH_START_MESSAGE)?;
        }
        console.emit_line(&self.greeting)?;

        loop {
            for line in self.menu.render(self.state) {
                console.emit_line(&line)?;
            }

            let line = match next_line(console)? {
                Some(line) => line,
                None => break,
            };

            match self.handle_line(&line, console) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e),
            }
        }

        console.emit_line(&self.farewell)?;
        Ok(())
    }

    fn handle_line(&mut self, line: &str, console: &mut dyn Console) -> io::Result<Flow> {
        if let Some(token) = choice_token(line) {
            // Numbers too large for any menu are still menu choices
            let action = match token.parse::<i64>() {
                Ok(choice) => self.menu.select(self.state, choice),
                Err(_) => MenuAction::Invalid,
            };
            debug!("Menu choice {} in {:?} -> {:?}", token, self.state, action);
            self.state = action.next_state();
            self.apply(action, console)?;
            return Ok(Flow::Continue);
        }

        self.state = MenuState::Primary;
        match line.trim().to_lowercase().as_str() {
            "bye" | "exit" => return Ok(Flow::Exit),
            "emergency" if self.emergency.is_some() => self.show_emergency(console)?,
            _ => {
                self.engine.handle_turn(line, console)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn apply(&mut self, action: MenuAction, console: &mut dyn Console) -> io::Result<()> {
        match action {
            MenuAction::Forward(label) => {
                self.engine.handle_turn(&label, console)?;
            }
            MenuAction::OpenSecondary => console.emit_line(self.menu.services_prompt())?,
            MenuAction::Emergency => self.show_emergency(console)?,
            MenuAction::Invalid => console.emit_line(INVALID_CHOICE_MESSAGE)?,
        }
        Ok(())
    }

    fn show_emergency(&self, console: &mut dyn Console) -> io::Result<()> {
        if let Some(emergency) = &self.emergency {
            console.emit_line(emergency.info())?;
        }
        Ok(())
    }

    pub fn engine(&self) -> &ConversationEngine {
        &self.engine
    }

    pub fn menu_state(&self) -> MenuState {
        self.state
    }
}

/// Read the next non-blank line; `None` at end of input
fn next_line(console: &mut dyn Console) -> io::Result<Option<String>> {
    loop {
        match console.prompt_line(INPUT_PROMPT) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => return Ok(Some(line)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e),
        }
    }
}

/// First token of `line` when it is an optionally signed integer; the rest
/// of the line is ignored
fn choice_token(line: &str) -> Option<&str> {
    let token = line.split_whitespace().next()?;
    let digits = token.strip_prefix(&['+', '-'][..]).unwrap_or(token);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(token)
    } else {
        None
    }
}
