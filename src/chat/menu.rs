//! Numbered topic menus
//!
//! The menu is a shortcut for typing a topic: picking a number resolves to
//! a label that goes through the normal matching path. Two lists exist, the
//! primary topics and the service sub-topics reached through the services
//! label. The slot right after the primary list is the emergency contact.

use crate::config::MenuConfig;

/// Which list the next number refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Primary,
    Secondary,
}

/// What a numeric choice resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Treat the label as typed text
    Forward(String),
    /// Switch to the service sub-menu
    OpenSecondary,
    /// Show emergency contact details
    Emergency,
    /// Number outside every list
    Invalid,
}

impl MenuAction {
    /// Menu state that follows this action
    pub fn next_state(&self) -> MenuState {
        match self {
            MenuAction::OpenSecondary => MenuState::Secondary,
            _ => MenuState::Primary,
        }
    }
}

/// Renders menus and resolves numeric choices
#[derive(Debug, Clone)]
pub struct MenuLayer {
    config: MenuConfig,
    emergency_slot: bool,
}

impl MenuLayer {
    /// `emergency_slot` adds the emergency entry after the primary list
    pub fn new(config: MenuConfig, emergency_slot: bool) -> Self {
        Self { config, emergency_slot }
    }

    /// Lines to display for `state`
    pub fn render(&self, state: MenuState) -> Vec<String> {
        let (title, items) = match state {
            MenuState::Primary => (&self.config.primary_title, &self.config.primary),
            MenuState::Secondary => (&self.config.secondary_title, &self.config.secondary),
        };

        let mut lines = Vec::with_capacity(items.len() + 5);
        lines.push(String::new());
        lines.push(format!("--- {} ---", title));
        for (i, item) in items.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, item));
        }
        if state == MenuState::Primary && self.emergency_slot {
            lines.push(format!("{}. {}", items.len() + 1, self.config.emergency_label));
        }
        lines.push("-".repeat(26));
        lines.push(self.config.hint.clone());
        lines
    }

    /// Resolve a 1-based choice against the list for `state`
    pub fn select(&self, state: MenuState, choice: i64) -> MenuAction {
        match state {
            MenuState::Primary => {
                let count = self.config.primary.len() as i64;
                if let Some(label) = pick(&self.config.primary, choice) {
                    if *label == self.config.services_label {
                        MenuAction::OpenSecondary
                    } else {
                        MenuAction::Forward(label.clone())
                    }
                } else if self.emergency_slot && choice == count + 1 {
                    MenuAction::Emergency
                } else {
                    MenuAction::Invalid
                }
            }
            MenuState::Secondary => match pick(&self.config.secondary, choice) {
                Some(label) => MenuAction::Forward(label.clone()),
                None => MenuAction::Invalid,
            },
        }
    }

    /// Message shown when switching to the service sub-menu
    pub fn services_prompt(&self) -> &str {
        &self.config.services_prompt
    }
}

fn pick(items: &[String], choice: i64) -> Option<&String> {
    if choice < 1 {
        return None;
    }
    items.get(usize::try_from(choice - 1).ok()?)
}
