//! Lexicon sources - read-only providers of candidate words.
//!
//! Two implementations share one contract: the frequency-ranked corpus
//! (bounded to a top-N window) and the broad unranked dictionary used as
//! a fallback. Neither knows which words a conversation has already used.

mod ranked;
mod unranked;

pub use ranked::*;
pub use unranked::*;

use crate::candidate::Candidate;

/// A read-only provider of candidate words.
pub trait LexiconSource {
    /// All alphabetic entries at least `min_length` long whose lowercase
    /// form starts with `start_letter` (case-insensitive).
    fn matching(&self, start_letter: char, min_length: usize) -> Vec<Candidate>;
}
