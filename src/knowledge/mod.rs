//! Knowledge base - the learned keyword -> reply table
//!
//! Keywords are matched as substrings of lowercased user input, first match
//! in insertion order wins. New pairs are appended to a flat text file so
//! they survive restarts.

pub mod normalize;
pub mod store;

pub use normalize::{effective_keyword, normalize_input, normalize_keyword};
pub use store::{KnowledgeError, LoadStatus, ResponseEntry, ResponseStore};
