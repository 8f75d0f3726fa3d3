//! Response Store - the keyword -> reply table and its flat-file log
//!
//! The backing file is a sequence of line pairs, keyword line then reply line:
//!
//! ```text
//! [imported] hours
//! We are open 9-5
//! pricing
//! Cleaning starts at $40
//! ```
//!
//! The file is only ever appended to. It is opened per `learn` call and
//! flushed before the call returns.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::normalize::{effective_keyword, normalize_keyword};

/// Errors raised by the knowledge base
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// Appending a learned pair to the backing file failed.
    /// The pair is still available in memory for the current session.
    #[error("failed to persist learned response to {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single keyword -> reply pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEntry {
    /// Lowercased, trimmed match trigger
    pub keyword: String,
    /// Reply exactly as it was taught
    pub reply: String,
}

impl ResponseEntry {
    pub fn new(keyword: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            reply: reply.into(),
        }
    }
}

/// What happened when the backing file was read at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// File was read. `dropped` counts pairs with an empty keyword plus a
    /// trailing unpaired line, if any.
    Loaded { entries: usize, dropped: usize },
    /// No file at the configured path
    Missing,
    /// File exists but could not be read
    Unreadable,
}

impl LoadStatus {
    /// True when the session starts without any prior knowledge file
    pub fn is_fresh_start(&self) -> bool {
        !matches!(self, LoadStatus::Loaded { .. })
    }
}

/// In-memory response table backed by an append-only text file
#[derive(Debug)]
pub struct ResponseStore {
    path: PathBuf,
    entries: Vec<ResponseEntry>,
    status: LoadStatus,
}

impl ResponseStore {
    /// Load the table from `path`.
    ///
    /// Never fails: a missing or unreadable file yields an empty store, and
    /// malformed pairs are skipped.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let (entries, status) = match std::fs::read(&path) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                let (entries, dropped) = parse_entries(&content);
                if dropped > 0 {
                    debug!("Skipped {} malformed pair(s) in {}", dropped, path.display());
                }
                let status = LoadStatus::Loaded {
                    entries: entries.len(),
                    dropped,
                };
                (entries, status)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No knowledge file at {}", path.display());
                (Vec::new(), LoadStatus::Missing)
            }
            Err(e) => {
                warn!("Could not read knowledge file {}: {}", path.display(), e);
                (Vec::new(), LoadStatus::Unreadable)
            }
        };

        info!("Loaded {} response(s) from {}", entries.len(), path.display());
        Self { path, entries, status }
    }

    /// Reply of the first entry whose keyword occurs in `input`.
    ///
    /// `input` must already be lowercased. Entries are scanned in insertion
    /// order, so earlier keywords shadow later ones.
    pub fn lookup(&self, input: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| !e.keyword.is_empty() && input.contains(e.keyword.as_str()))
            .map(|e| e.reply.as_str())
    }

    /// Add a pair to the table and append it to the backing file.
    ///
    /// The in-memory entry is kept even when the append fails.
    pub fn learn(&mut self, keyword: &str, reply: &str) -> Result<(), KnowledgeError> {
        let normalized = normalize_keyword(keyword);
        self.entries.push(ResponseEntry::new(normalized.clone(), reply));

        match self.append_pair(keyword, reply) {
            Ok(()) => {
                info!("Learned response for '{}'", normalized);
                Ok(())
            }
            Err(source) => {
                error!(
                    "Failed to save response for '{}' to {}: {}",
                    normalized,
                    self.path.display(),
                    source
                );
                Err(KnowledgeError::Persistence {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    fn append_pair(&self, keyword: &str, reply: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        write!(file, "{}\n{}\n", keyword, reply)?;
        file.flush()?;
        Ok(())
    }

    /// All entries in match-priority order
    pub fn entries(&self) -> &[ResponseEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Outcome of the startup load
    pub fn status(&self) -> LoadStatus {
        self.status
    }
}

/// Parse line pairs into entries, returning the entries and the number of
/// discarded pairs / trailing lines.
fn parse_entries(content: &str) -> (Vec<ResponseEntry>, usize) {
    let lines = split_lines(content);
    let mut entries = Vec::with_capacity(lines.len() / 2);
    let mut dropped = lines.len() % 2;

    for pair in lines.chunks_exact(2) {
        let keyword = effective_keyword(pair[0]);
        if keyword.is_empty() {
            dropped += 1;
            continue;
        }
        entries.push(ResponseEntry::new(keyword, pair[1]));
    }

    (entries, dropped)
}

/// Split on `\n` the way a line reader does: a final terminator does not
/// start another line, and `\r` stays part of the line.
fn split_lines(content: &str) -> Vec<&str> {
    if content.is_empty() {
        return Vec::new();
    }
    content
        .strip_suffix('\n')
        .unwrap_or(content)
        .split('\n')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(content: &str) -> (tempfile::TempDir, ResponseStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("details.txt");
        std::fs::write(&path, content).unwrap();
        let store = ResponseStore::load(&path);
        (dir, store)
    }

    #[test]
    fn test_split_lines() {
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("\n"), vec![""]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\nb\r\n"), vec!["a\r", "b\r"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResponseStore::load(dir.path().join("nope.txt"));
        assert!(store.is_empty());
        assert_eq!(store.status(), LoadStatus::Missing);
        assert!(store.status().is_fresh_start());
    }

    #[test]
    fn test_load_unreadable_path() {
        // A directory cannot be read as a file
        let dir = tempfile::tempdir().unwrap();
        let store = ResponseStore::load(dir.path());
        assert!(store.is_empty());
        assert_eq!(store.status(), LoadStatus::Unreadable);
    }

    #[test]
    fn test_load_empty_file() {
        let (_dir, store) = store_with("");
        assert!(store.is_empty());
        assert_eq!(store.status(), LoadStatus::Loaded { entries: 0, dropped: 0 });
        assert!(!store.status().is_fresh_start());
    }

    #[test]
    fn test_load_pairs_in_order() {
        let (_dir, store) = store_with("Hi\nHello There!\n[faq] Hours\n  We are open 9-5  \n");
        assert_eq!(
            store.entries(),
            &[
                ResponseEntry::new("hi", "Hello There!"),
                ResponseEntry::new("hours", "  We are open 9-5  "),
            ]
        );
    }

    #[test]
    fn test_load_discards_trailing_line() {
        let (_dir, store) = store_with("hi\nhello\norphan\n");
        assert_eq!(store.len(), 1);
        assert_eq!(store.status(), LoadStatus::Loaded { entries: 1, dropped: 1 });
    }

    #[test]
    fn test_load_drops_blank_keyword_with_its_reply() {
        let (_dir, store) = store_with("   \npricing\nhours\nopen 9-5\n");
        assert_eq!(store.entries(), &[ResponseEntry::new("hours", "open 9-5")]);
        assert_eq!(store.lookup("pricing"), None);
    }

    #[test]
    fn test_load_keeps_carriage_return_in_reply() {
        let (_dir, store) = store_with("hi\r\nhello\r\n");
        assert_eq!(store.entries(), &[ResponseEntry::new("hi", "hello\r")]);
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let (_dir, store) = store_with("bye\nsee you\ngoodbye\nfarewell\n");
        assert_eq!(store.lookup("say goodbye now"), Some("see you"));
        assert_eq!(store.lookup("hello"), None);
        assert_eq!(store.lookup(""), None);
    }

    #[test]
    fn test_lookup_skips_empty_keyword() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ResponseStore::load(dir.path().join("k.txt"));
        store.learn("", "never").unwrap();
        store.learn("hi", "hello").unwrap();
        assert_eq!(store.lookup("xyz"), None);
        assert_eq!(store.lookup("hi"), Some("hello"));
    }

    #[test]
    fn test_learn_appends_raw_keyword() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("details.txt");
        let mut store = ResponseStore::load(&path);

        store.learn("Hours", "We are open 9-5").unwrap();
        store.learn("hours", "duplicate").unwrap();

        assert_eq!(store.entries()[0], ResponseEntry::new("hours", "We are open 9-5"));
        assert_eq!(store.len(), 2);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Hours\nWe are open 9-5\nhours\nduplicate\n"
        );
    }

    #[test]
    fn test_learn_failure_keeps_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("details.txt");
        let mut store = ResponseStore::load(&path);

        let err = store.learn("foo", "bar").unwrap_err();
        assert!(matches!(err, KnowledgeError::Persistence { .. }));
        assert!(err.to_string().contains("details.txt"));
        assert_eq!(store.lookup("foo"), Some("bar"));
        assert!(!path.exists());
    }
}
