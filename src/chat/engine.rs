//! Conversation engine - one user turn against the response table
//!
//! A turn either answers from the table or, on a miss, runs the teach
//! prompts: ask for a keyword, ask for its reply, learn the pair. There is
//! no way to back out of teaching once it starts; empty answers are taught
//! as-is.

use std::io;
use tracing::debug;

use super::console::Console;
use crate::knowledge::{normalize_input, normalize_keyword, KnowledgeError, ResponseStore};

/// Shown when no keyword matches
pub const MISS_MESSAGE: &str = "I don't understand. Can you teach me a response for this?";
/// First teach prompt
pub const KEYWORD_PROMPT: &str = "Enter a keyword or phrase: ";
/// Second teach prompt
pub const REPLY_PROMPT: &str = "Enter the response for this keyword or phrase: ";
/// Shown once when a learned pair could not be written to disk
pub const SAVE_FAILED_MESSAGE: &str = "Error: Unable to save response to file.";

/// Result of a single turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A keyword matched and its reply was shown
    Replied { reply: String },
    /// Nothing matched and the user taught a new pair
    Learned { keyword: String, persisted: bool },
}

/// Turn-level protocol between user text and the response table
pub struct ConversationEngine {
    store: ResponseStore,
}

impl ConversationEngine {
    pub fn new(store: ResponseStore) -> Self {
        Self { store }
    }

    /// Handle one line of user text.
    ///
    /// Console errors (including end of input during the teach prompts) are
    /// returned to the caller; persistence failures are not.
    pub fn handle_turn(&mut self, raw: &str, console: &mut dyn Console) -> io::Result<TurnOutcome> {
        let input = normalize_input(raw);

        if let Some(reply) = self.store.lookup(&input) {
            let reply = reply.to_string();
            console.emit_line(&reply)?;
            return Ok(TurnOutcome::Replied { reply });
        }

        debug!("No response matched '{}'", input);
        console.emit_line(MISS_MESSAGE)?;
        self.run_teach_prompts(console)
    }

    fn run_teach_prompts(&mut self, console: &mut dyn Console) -> io::Result<TurnOutcome> {
        let keyword = console.prompt_line(KEYWORD_PROMPT)?;
        let reply = console.prompt_line(REPLY_PROMPT)?;

        let learned = normalize_keyword(keyword.trim());
        let persisted = match self.teach(&keyword, &reply) {
            Ok(_) => true,
            Err(_) => {
                console.emit_line(SAVE_FAILED_MESSAGE)?;
                false
            }
        };

        console.emit_line(&format!("I've learned a new response! Keyword: '{}'", learned))?;
        Ok(TurnOutcome::Learned {
            keyword: learned,
            persisted,
        })
    }

    /// Learn a pair without prompting.
    ///
    /// The keyword is trimmed the same way the teach prompts trim it. Returns
    /// the normalized keyword. On error the pair is still usable this session.
    pub fn teach(&mut self, keyword: &str, reply: &str) -> Result<String, KnowledgeError> {
        let keyword = keyword.trim();
        self.store.learn(keyword, reply)?;
        Ok(normalize_keyword(keyword))
    }

    /// Look up a reply without teaching on a miss
    pub fn ask(&self, raw: &str) -> Option<&str> {
        self.store.lookup(&normalize_input(raw))
    }

    pub fn store(&self) -> &ResponseStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::console::{MockConsole, ScriptedConsole};
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn engine_in(dir: &tempfile::TempDir) -> ConversationEngine {
        ConversationEngine::new(ResponseStore::load(dir.path().join("details.txt")))
    }

    #[test]
    fn test_hit_emits_reply_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(&dir);
        engine.teach("Hi", "Hello There!").unwrap();

        let mut console = ScriptedConsole::new(Vec::<String>::new());
        let outcome = engine.handle_turn("HI there", &mut console).unwrap();

        assert_eq!(outcome, TurnOutcome::Replied { reply: "Hello There!".to_string() });
        assert_eq!(console.output(), &["Hello There!"]);
        assert!(console.prompts().is_empty());
    }

    #[test]
    fn test_miss_runs_teach_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(&dir);

        let mut console = ScriptedConsole::new(["  Foo  ", "bar"]);
        let outcome = engine.handle_turn("what is foo?", &mut console).unwrap();

        assert_eq!(
            outcome,
            TurnOutcome::Learned { keyword: "foo".to_string(), persisted: true }
        );
        assert_eq!(console.prompts(), &[KEYWORD_PROMPT, REPLY_PROMPT]);
        assert_eq!(
            console.output(),
            &[MISS_MESSAGE, "I've learned a new response! Keyword: 'foo'"]
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("details.txt")).unwrap(),
            "Foo\nbar\n"
        );
        assert_eq!(engine.ask("FOO"), Some("bar"));
    }

    #[test]
    fn test_empty_answers_are_taught() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(&dir);

        let mut console = ScriptedConsole::new(["", ""]);
        let outcome = engine.handle_turn("zzz", &mut console).unwrap();

        assert_eq!(outcome, TurnOutcome::Learned { keyword: String::new(), persisted: true });
        assert_eq!(engine.store().len(), 1);
        // Empty keywords never match
        assert_eq!(engine.ask("zzz"), None);
    }

    #[test]
    fn test_end_of_input_during_teach() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(&dir);

        let mut console = ScriptedConsole::new(["only a keyword"]);
        let err = engine.handle_turn("unknown", &mut console).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert!(engine.store().is_empty());
    }

    #[test]
    fn test_persistence_failure_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("details.txt");
        let mut engine = ConversationEngine::new(ResponseStore::load(path));

        let mut console = MockConsole::new();
        let mut seq = Sequence::new();
        console
            .expect_emit_line()
            .with(eq(MISS_MESSAGE))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        console
            .expect_prompt_line()
            .with(eq(KEYWORD_PROMPT))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("foo".to_string()));
        console
            .expect_prompt_line()
            .with(eq(REPLY_PROMPT))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("bar".to_string()));
        console
            .expect_emit_line()
            .with(eq(SAVE_FAILED_MESSAGE))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        console
            .expect_emit_line()
            .with(eq("I've learned a new response! Keyword: 'foo'"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let outcome = engine.handle_turn("what about foo", &mut console).unwrap();
        assert_eq!(
            outcome,
            TurnOutcome::Learned { keyword: "foo".to_string(), persisted: false }
        );
        assert_eq!(engine.ask("foo"), Some("bar"));
    }

    #[test]
    fn test_teach_trims_keyword() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(&dir);

        assert_eq!(engine.teach("  Opening Hours \t", " 9-5 ").unwrap(), "opening hours");
        assert_eq!(engine.ask("What are your opening hours?"), Some(" 9-5 "));
        assert_eq!(engine.ask("opening  hours"), None);
    }
}
