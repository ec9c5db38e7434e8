//! The broad unranked dictionary, used when the ranked window runs dry.

use std::collections::BTreeSet;

use crate::candidate::{is_game_word, Candidate};
use crate::sources::LexiconSource;

/// A word source with no frequency information and no meaningful order;
/// lookups return candidates lexicographically so ties break the same
/// way every time.
#[derive(Debug, Clone, Default)]
pub struct UnrankedLexicon {
    words: BTreeSet<String>,
}

impl UnrankedLexicon {
    /// Build a lexicon from an arbitrary collection of words.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// True when the word is present exactly as spelled.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl LexiconSource for UnrankedLexicon {
    fn matching(&self, start_letter: char, min_length: usize) -> Vec<Candidate> {
        let start = start_letter.to_ascii_lowercase();
        self.words
            .iter()
            .filter(|word| {
                is_game_word(word)
                    && word.len() >= min_length
                    && word
                        .chars()
                        .next()
                        .is_some_and(|c| c.to_ascii_lowercase() == start)
            })
            .map(|word| Candidate::unranked(word.clone()))
            .collect()
    }
}
