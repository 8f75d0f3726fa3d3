//! Chat module - turn handling, menus and the interactive session

pub mod console;
pub mod engine;
pub mod menu;
pub mod session;

pub use console::{Console, ScriptedConsole, StdConsole};
pub use engine::{ConversationEngine, TurnOutcome};
pub use menu::{MenuAction, MenuLayer, MenuState};
pub use session::{EmergencyContact, Session};
